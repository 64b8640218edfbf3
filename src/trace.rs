// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Opt-in tracing of executed instructions
//!
//! See [`Interpreter::start_trace`] for an example.
use std::fmt::{self, Debug, Display};

use super::{Interpreter, OpCode, ParamMode};

#[derive(Clone, Copy)]
struct PackedModes(u8);
impl PackedModes {
    const fn pack(modes: [ParamMode; 3]) -> Self {
        Self(modes[0] as u8 | ((modes[1] as u8) << 2) | ((modes[2] as u8) << 4))
    }
    const fn unpack(self) -> [ParamMode; 3] {
        const fn unpack_bit_pair(bit_pair: u8) -> ParamMode {
            match bit_pair {
                0b00 => ParamMode::Positional,
                0b01 => ParamMode::Immediate,
                0b10 => ParamMode::Relative,
                _ => unreachable!(),
            }
        }
        [
            unpack_bit_pair(self.0 & 0b11),
            unpack_bit_pair((self.0 & 0b1100) >> 2),
            unpack_bit_pair((self.0 & 0b11_0000) >> 4),
        ]
    }
}

/// Each parameter is stored as a `(raw, resolved)` pair. For destinations, the resolved value is
/// the address written to.
#[derive(Clone, Copy)]
enum TracedOp {
    Three((i64, i64), (i64, i64), (i64, i64)),
    Two((i64, i64), (i64, i64)),
    One((i64, i64)),
    Halt,
}

impl TracedOp {
    fn pairs(self) -> Vec<(i64, i64)> {
        match self {
            Self::Three(a, b, c) => vec![a, b, c],
            Self::Two(a, b) => vec![a, b],
            Self::One(a) => vec![a],
            Self::Halt => Vec::new(),
        }
    }
}

#[derive(Clone)]
/// An opaque type containing information about what instruction was executed, which can be queried
/// with its various methods, or converted into a [String] using its [Display] impl.
pub struct TracedInstr {
    op: TracedOp,
    op_int: i64,
    instr_ptr: i64,
    rel_base: i64,
    packed_modes: PackedModes,
    opcode: OpCode,
    stored: Option<i64>,
}

impl TracedInstr {
    /// Return the relative base at the time the traced instruction was excuted
    pub fn rel_base(&self) -> i64 {
        self.rel_base
    }

    /// Return the instruction pointer's position when the traced instruction was executed
    pub fn instr_ptr(&self) -> i64 {
        self.instr_ptr
    }

    /// Return the actual integer of the traced instruction
    pub fn op_int(&self) -> i64 {
        self.op_int
    }

    /// Return the opcode of the traced instruction
    pub fn op_code(&self) -> OpCode {
        self.opcode
    }

    /// If the instruction stored a value, return that value
    pub fn stored_val(&self) -> Option<i64> {
        self.stored
    }

    /// Return an array of the parameter modes of the traced instruction
    pub fn param_modes(&self) -> [ParamMode; 3] {
        self.packed_modes.unpack()
    }

    /// Return the `(raw, resolved)` pairs of each parameter
    pub fn params(&self) -> Vec<(i64, i64)> {
        self.op.pairs()
    }

    pub(crate) fn build(
        op_int: i64,
        opcode: OpCode,
        modes: [ParamMode; 3],
        instr_ptr: i64,
        rel_base: i64,
        resolved_params: &[(i64, i64)],
        stored: Option<i64>,
    ) -> Self {
        debug_assert_eq!(resolved_params.len(), opcode.param_count());
        let op = match *resolved_params {
            [a, b, c] => TracedOp::Three(a, b, c),
            [a, b] => TracedOp::Two(a, b),
            [a] => TracedOp::One(a),
            _ => TracedOp::Halt,
        };
        Self {
            op,
            op_int,
            instr_ptr,
            rel_base,
            packed_modes: PackedModes::pack(modes),
            opcode,
            stored,
        }
    }
}

impl Interpreter {
    /// Begin a [Trace] of executed instructions. If a trace is already running, this replaces that
    /// trace and returns in a [`Some`], otherwise, it returns [`None`].
    ///
    /// # Example
    /// ```
    /// use intcode::prelude::*;
    /// let mut interp = Interpreter::new([1101, 90, 9, 4, 0]);
    /// assert!(interp.start_trace().is_none());
    /// interp.run_through_inputs(empty()).unwrap();
    /// let trace = interp.end_trace().unwrap();
    /// assert_eq!(trace.0.len(), 2);
    /// assert_eq!(trace.0[0].stored_val(), Some(99));
    /// ```
    pub fn start_trace(&mut self) -> Option<Trace> {
        self.trace.replace(Trace::default())
    }

    /// Stop tracing executed instructions into a [Trace]. If no trace was active, returns [`None`]
    ///
    /// see [Interpreter::start_trace]
    pub fn end_trace(&mut self) -> Option<Trace> {
        self.trace.take()
    }

    /// Get a view of the current trace
    pub fn show_trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }
}

#[derive(Debug, Default, Clone)]
/// A log of instructions that an [Interpreter] has executed since a call to
/// [Interpreter::start_trace]
///
/// see [Interpreter::start_trace]
pub struct Trace(pub Vec<TracedInstr>);

impl Debug for TracedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("TracedOp");
        for (raw, resolved) in self.pairs() {
            tuple.field(&format_args!("{raw} => {resolved}"));
        }
        tuple.finish()
    }
}

impl Debug for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedInstr")
            .field("op", &self.op)
            .field("op_int", &self.op_int)
            .field("instr_ptr", &self.instr_ptr)
            .field("rel_base", &self.rel_base)
            .field("modes", &self.packed_modes.unpack())
            .field("opcode", &self.opcode)
            .field("stored", &self.stored)
            .finish()
    }
}

impl Display for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ip: {:>6} | rbo: {:>5} | {:05} | ",
            self.instr_ptr, self.rel_base, self.op_int
        )?;
        let modes = self.packed_modes.unpack();

        match (self.op, self.opcode) {
            (TracedOp::Three((pa, va), (pb, vb), (dest, addr)), _) => {
                write!(
                    f,
                    "{} {}{pa} ({va}), {}{pb} ({vb}), {}{dest} (stored {} at {addr})",
                    self.opcode,
                    modes[0],
                    modes[1],
                    modes[2],
                    self.stored.unwrap_or_default(),
                )
            }
            (TracedOp::Two((p_cond, v_cond), (p_dest, v_dest)), opcode) => {
                let jumped = (opcode == OpCode::Jnz) == (v_cond != 0);
                write!(
                    f,
                    "{opcode} {}{p_cond} ({v_cond}), {}{p_dest} ({} to {v_dest})",
                    modes[0],
                    modes[1],
                    if jumped { "jumped" } else { "didn't jump" }
                )
            }
            (TracedOp::One((p, addr)), OpCode::In) => write!(
                f,
                "IN {}{p} (stored {} at {addr})",
                modes[0],
                self.stored.unwrap_or_default()
            ),
            (TracedOp::One((p, v)), OpCode::Rbo) => write!(
                f,
                "RBO {}{p} (went from {} to {})",
                modes[0],
                self.rel_base,
                self.rel_base + v,
            ),
            (TracedOp::One((p, v)), opcode) => write!(f, "{opcode} {}{p} ({v})", modes[0]),
            (TracedOp::Halt, _) => write!(f, "HALT"),
        }
    }
}
