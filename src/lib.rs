// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD
#![warn(missing_docs)]

//! Library providing an Intcode interpreter, and hosts which drive one or more interpreters
//!
//! The interpreter is fully functional, with all of the [Opcodes] and [Parameter Modes] defined in
//! the completed Intcode computer for [Day 9].
//!
//! # Example
//!
//! ```rust
//! use intcode::prelude::*;
//! let mut interpreter = Interpreter::new(vec![104, 1024, 99]);
//!
//! assert_eq!(
//!     interpreter.run_through_inputs(empty()).unwrap(),
//!     (vec![1024], State::Halted)
//! );
//! ```
//!
//! Interpreters can be wired together into a ring, where each member's output feeds the next
//! member's input, and each member runs on its own thread. See the [host] module for that, as
//! well as for the synchronous turn-based host used by interactive programs.
//!
//! ```rust
//! use intcode::prelude::*;
//! use intcode::host::{Ring, RingConfig};
//!
//! // reads a phase and a signal, then outputs `phase + 10 * signal`
//! let amp: Interpreter = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0".parse().unwrap();
//! let mut ring = Ring::new(vec![amp.clone(), amp]);
//! ring.seed(0, [4, 0]);
//! ring.seed(1, [3]);
//! let report = ring.run(&RingConfig::default()).unwrap();
//! assert_eq!(report.output(), Some(43));
//! ```
//!
//! [Opcodes]: https://esolangs.org/wiki/Intcode#Opcodes
//! [Parameter Modes]: https://esolangs.org/wiki/Intcode#Parameter_Modes
//! [Day 9]: https://adventofcode.com/2019/day/9

/// A sparse, paged memory space, with pages allocated on first write.
mod mmu;

mod internals;

pub mod host;
pub mod port;
pub mod puzzles;
pub mod trace;

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use thiserror::Error;

use mmu::Memory;
use trace::Trace;

/// A small module that re-exports items needed when working with the Intcode interpreter
pub mod prelude {
    pub use crate::{Interpreter, OutputPort, State, StepOutcome};
    pub use std::iter::empty;
}

/// The run-state of an [Interpreter]
///
/// An interpreter starts out [Ready](State::Ready), and is [Running](State::Running) once it has
/// begun executing instructions. It stops either [Awaiting](State::Awaiting) input, from which it
/// can be resumed once input is available, or [Halted](State::Halted), which is terminal.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// No instruction has been executed yet
    Ready,
    /// Execution is underway
    Running,
    /// Execution is blocked on input
    Awaiting,
    /// Execution has halted
    Halted,
}

/// The result of executing a single instruction
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StepOutcome {
    /// The instruction executed and there are more to run
    Running,
    /// Execution stopped, either [halting](State::Halted) or [awaiting input](State::Awaiting)
    Stopped(State),
}

/// An error occured when executing an intcode instruction
///
/// Any of these poison the [Interpreter] that returned them.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum InterpreterError {
    /// An invalid opcode was encountered
    #[error("encountered unrecognized opcode in instruction {0}")]
    UnrecognizedOpcode(i64),
    /// An unknown parameter mode was encountered
    #[error("encountered unknown parameter mode in instruction {0}")]
    UnknownMode(i64),
    /// A negative memory address was encountered
    #[error("attempted to access negative address {0}")]
    NegativeMemAccess(i64),
    /// An instruction tried to write to an immediate destination
    #[error("attempted to write to immediate {0}")]
    WriteToImmediate(i64),
    /// A jump instruction tried to move the instruction pointer to a negative address
    #[error("attempted to jump to negative address {0}")]
    JumpToNegative(i64),
    /// The output port didn't accept a value in time
    #[error("output port would not accept {0}")]
    OutputBlocked(i64),
    /// The interpreter already failed, and can't continue
    #[error("interpreter was poisoned by an earlier error")]
    Poisoned,
}

/// Parameter mode for Intcode instruction
///
/// Intcode instruction parameters each have a mode:  [positional], [immediate], or [relative].
///
/// When executing an intcode instruction, the instruction's parameters are interpreted in
/// accordance with their associated modes.
///
/// [positional]: ParamMode::Positional
/// [immediate]: ParamMode::Immediate
/// [relative]: ParamMode::Relative
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ParamMode {
    /// Positional Mode
    ///
    /// A parameter in positional mode evaluates to the value at the address specified by the
    /// parameter.
    Positional = 0,
    /// Immediate Mode
    ///
    /// A parameter in immediate mode evaluates directly to the value specified. Instructions which
    /// write to memory may not use immediate mode for their destinations.
    #[doc(alias = "#")]
    Immediate = 1,
    /// Relative Mode
    ///
    /// A parameter in relative mode evaluates to the value at the address specified by the
    /// parameter, added to the [Relative Base], which starts out as `0` but can be modified
    /// throughout the program's execution.
    ///
    /// [Relative Base]: https://adventofcode.com/2019/day/9
    #[doc(alias = "@")]
    Relative = 2,
}

impl ParamMode {
    /// Extract the modes of all 3 parameters from `instruction`.
    ///
    /// Digits above the ten thousands place are rejected, as is any digit that isn't a known mode.
    ///
    /// ```
    /// use intcode::ParamMode;
    /// assert_eq!(
    ///     ParamMode::extract(1002),
    ///     Ok([ParamMode::Positional, ParamMode::Immediate, ParamMode::Positional])
    /// );
    /// assert!(ParamMode::extract(302).is_err());
    /// ```
    pub fn extract(instruction: i64) -> Result<[ParamMode; 3], InterpreterError> {
        let digit = |place: i64| -> Result<ParamMode, InterpreterError> {
            ParamMode::try_from((instruction / place) % 10)
                .map_err(|_| InterpreterError::UnknownMode(instruction))
        };
        if instruction / 100_000 != 0 {
            return Err(InterpreterError::UnknownMode(instruction));
        }
        Ok([digit(100)?, digit(1000)?, digit(10_000)?])
    }
}

impl Display for ParamMode {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamMode::Positional => Ok(()),
            ParamMode::Immediate => write!(fmt, "#"),
            ParamMode::Relative => write!(fmt, "@"),
        }
    }
}

impl TryFrom<i64> for ParamMode {
    type Error = i64;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            0 => Ok(ParamMode::Positional),
            1 => Ok(ParamMode::Immediate),
            2 => Ok(ParamMode::Relative),
            _ => Err(i),
        }
    }
}

/// An Intcode opcode - the last two decimal digits of an instruction
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[allow(missing_docs, reason = "trivial")]
pub enum OpCode {
    Add = 1,
    Mul = 2,
    In = 3,
    Out = 4,
    Jnz = 5,
    Jz = 6,
    Lt = 7,
    Eq = 8,
    Rbo = 9,
    Halt = 99,
}

impl OpCode {
    /// The number of parameters that follow the instruction
    pub const fn param_count(self) -> usize {
        match self {
            OpCode::Add | OpCode::Mul | OpCode::Lt | OpCode::Eq => 3,
            OpCode::Jnz | OpCode::Jz => 2,
            OpCode::In | OpCode::Out | OpCode::Rbo => 1,
            OpCode::Halt => 0,
        }
    }
}

impl TryFrom<i64> for OpCode {
    type Error = i64;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            1 => Ok(OpCode::Add),
            2 => Ok(OpCode::Mul),
            3 => Ok(OpCode::In),
            4 => Ok(OpCode::Out),
            5 => Ok(OpCode::Jnz),
            6 => Ok(OpCode::Jz),
            7 => Ok(OpCode::Lt),
            8 => Ok(OpCode::Eq),
            9 => Ok(OpCode::Rbo),
            99 => Ok(OpCode::Halt),
            _ => Err(i),
        }
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpCode::Add => "ADD",
            OpCode::Mul => "MUL",
            OpCode::In => "IN",
            OpCode::Out => "OUT",
            OpCode::Jnz => "JNZ",
            OpCode::Jz => "JZ",
            OpCode::Lt => "LT",
            OpCode::Eq => "EQ",
            OpCode::Rbo => "RBO",
            OpCode::Halt => "HALT",
        };
        f.write_str(name)
    }
}

/// Somewhere an [Interpreter] can send its output
///
/// Implemented for [`Vec<i64>`], which just collects the outputs, and for
/// [`PortWriter`](crate::port::PortWriter), which sends them to another interpreter or the host.
pub trait OutputPort {
    /// Accept one output value. May block until the consumer is ready for it.
    ///
    /// If the consumer can't take the value within a bounded wait, it's handed back as the error.
    fn put(&mut self, value: i64) -> Result<(), i64>;
}

impl OutputPort for Vec<i64> {
    fn put(&mut self, value: i64) -> Result<(), i64> {
        self.push(value);
        Ok(())
    }
}

/// Parse comma-separated program text into the initial contents of memory
///
/// ```
/// assert_eq!(intcode::parse_program("1,0, 0,0,99\n"), Ok(vec![1, 0, 0, 0, 99]));
/// assert!(intcode::parse_program("1,x,99").is_err());
/// ```
pub fn parse_program(text: &str) -> Result<Vec<i64>, ParseIntError> {
    text.trim().split(',').map(str::trim).map(str::parse).collect()
}

/// An intcode interpreter, with an optional trace of executed instructions.
#[derive(Clone)]
pub struct Interpreter {
    index: i64,
    rel_offset: i64,
    code: Memory,
    state: State,
    poisoned: bool,
    trace: Option<Trace>,
}

// ignore the trace and run-state
impl PartialEq for Interpreter {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.rel_offset == other.rel_offset
            && self.poisoned == other.poisoned
            && self.code == other.code
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Interpreter")
            .field("code", &self.code)
            .field("rbo", &self.rel_offset)
            .field("ip", &self.index)
            .field("state", &self.state)
            .field("poisoned", &self.poisoned)
            .field("tracing", &self.trace.is_some())
            .finish()
    }
}

impl Index<i64> for Interpreter {
    type Output = i64;

    fn index(&self, i: i64) -> &Self::Output {
        assert!(i >= 0, "can't index negative address {i}");
        self.code.index(i)
    }
}

impl IndexMut<i64> for Interpreter {
    fn index_mut(&mut self, i: i64) -> &mut Self::Output {
        assert!(i >= 0, "can't index negative address {i}");
        self.code.index_mut(i)
    }
}

impl FromStr for Interpreter {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_program(s).map(Interpreter::new)
    }
}

impl Interpreter {
    /// Create a new interpreter. Collects `code` into the starting memory state.
    pub fn new(code: impl IntoIterator<Item = i64>) -> Self {
        Self {
            index: 0,
            rel_offset: 0,
            code: code.into_iter().collect(),
            state: State::Ready,
            poisoned: false,
            trace: None,
        }
    }

    /// The current run-state
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether an earlier error left the interpreter unable to continue
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// The address of the next instruction to execute
    pub fn instr_ptr(&self) -> i64 {
        self.index
    }

    /// The current relative base
    pub fn rel_base(&self) -> i64 {
        self.rel_offset
    }

    /// Manually set a memory location
    ///
    /// Used to patch a program before running it.
    #[doc(alias("poke", "write"))]
    pub fn mem_override(&mut self, address: i64, value: i64) -> Result<(), InterpreterError> {
        if address < 0 {
            return Err(InterpreterError::NegativeMemAccess(address));
        }
        self.code[address] = value;
        Ok(())
    }

    /// Get the memory at `address`. Addresses that were never written to hold `0`.
    #[doc(alias = "peek")]
    pub fn mem_get(&self, address: i64) -> Result<i64, InterpreterError> {
        if address < 0 {
            return Err(InterpreterError::NegativeMemAccess(address));
        }
        Ok(self.code.get(address))
    }

    /// Copy out memory from address `0` through the highest non-zero cell
    pub fn memory(&self) -> Vec<i64> {
        self.code.dump()
    }

    /// Release any pages of memory that only hold zeros
    pub fn compact_memory(&mut self) {
        self.code.prune();
    }

    /// Execute a single instruction, reading input from `inputs` and sending output to `outputs`
    ///
    /// If the instruction needs input and `inputs` has none, nothing is changed, and the
    /// interpreter stops [awaiting input](State::Awaiting). Once halted, this keeps returning
    /// [`StepOutcome::Stopped(State::Halted)`](StepOutcome::Stopped) without doing anything.
    ///
    /// ```
    /// use intcode::prelude::*;
    /// let mut interp = Interpreter::new([1101, 90, 9, 4, 7]);
    /// let outcome = interp.exec_instruction(&mut empty(), &mut vec![]).unwrap();
    /// assert_eq!(outcome, StepOutcome::Running);
    /// assert_eq!(interp[4], 99);
    /// let outcome = interp.exec_instruction(&mut empty(), &mut vec![]).unwrap();
    /// assert_eq!(outcome, StepOutcome::Stopped(State::Halted));
    /// ```
    pub fn exec_instruction(
        &mut self,
        inputs: &mut impl Iterator<Item = i64>,
        outputs: &mut impl OutputPort,
    ) -> Result<StepOutcome, InterpreterError> {
        if self.poisoned {
            return Err(InterpreterError::Poisoned);
        }
        if self.state == State::Halted {
            return Ok(StepOutcome::Stopped(State::Halted));
        }
        self.state = State::Running;

        let instruction = self.code[self.index];
        let (opcode, modes) = self.checked(Self::parse_op(instruction))?;

        match opcode {
            OpCode::Add => self.op3(instruction, opcode, modes, |a, b| a + b),
            OpCode::Mul => self.op3(instruction, opcode, modes, |a, b| a * b),
            OpCode::Lt => self.op3(instruction, opcode, modes, |a, b| i64::from(a < b)),
            OpCode::Eq => self.op3(instruction, opcode, modes, |a, b| i64::from(a == b)),
            OpCode::Jnz => self.jump(instruction, opcode, modes, |v| v != 0),
            OpCode::Jz => self.jump(instruction, opcode, modes, |v| v == 0),
            OpCode::In => {
                let dest = self.resolve_dest(modes[0], 1)?;
                let Some(input) = inputs.next() else {
                    self.state = State::Awaiting;
                    return Ok(StepOutcome::Stopped(State::Awaiting));
                };
                let param = self.code[self.index + 1];
                self.record(instruction, opcode, modes, &[(param, dest)], Some(input));
                self.code[dest] = input;
                self.index += 2;
                Ok(StepOutcome::Running)
            }
            OpCode::Out => {
                let val = self.resolve_param(modes[0], 1)?;
                let param = self.code[self.index + 1];
                self.record(instruction, opcode, modes, &[(param, val)], None);
                let sent = outputs.put(val).map_err(InterpreterError::OutputBlocked);
                self.checked(sent)?;
                self.index += 2;
                Ok(StepOutcome::Running)
            }
            OpCode::Rbo => {
                let delta = self.resolve_param(modes[0], 1)?;
                let param = self.code[self.index + 1];
                self.record(instruction, opcode, modes, &[(param, delta)], None);
                self.rel_offset += delta;
                self.index += 2;
                Ok(StepOutcome::Running)
            }
            OpCode::Halt => {
                self.record(instruction, opcode, modes, &[], None);
                self.state = State::Halted;
                Ok(StepOutcome::Stopped(State::Halted))
            }
        }
    }

    /// Execute until either the program halts, or it tries to read from `input` when it's
    /// exhausted, sending every output to `output`. Returns the [`State`] it stopped in.
    pub fn run_with_ports(
        &mut self,
        input: &mut impl Iterator<Item = i64>,
        output: &mut impl OutputPort,
    ) -> Result<State, InterpreterError> {
        loop {
            if let StepOutcome::Stopped(state) = self.exec_instruction(input, output)? {
                break Ok(state);
            }
        }
    }

    /// Execute until either the program halts, or it tries to read nonexistent input.
    /// Returns `Ok((v, s))`, where `v` is a [`Vec<i64>`] containing all outputs that it found,
    /// and `s` is the [`State`] at the time it stopped.
    ///
    /// On error, it will return an [`InterpreterError`] that reflects the error.
    pub fn run_through_inputs(
        &mut self,
        inputs: impl IntoIterator<Item = i64>,
    ) -> Result<(Vec<i64>, State), InterpreterError> {
        let mut outputs = Vec::new();
        let state = self.run_with_ports(&mut inputs.into_iter(), &mut outputs)?;
        Ok((outputs, state))
    }

    /// Pre-compute as much as possible - that is, run every up to, but not including, the first
    /// `IN`, `OUT`, or `HALT` instruction, bubbling up any errors that occur.
    ///
    /// An instruction that can't be decoded is an error here too, and poisons the interpreter.
    pub fn precompute(&mut self) -> Result<(), InterpreterError> {
        if self.poisoned {
            return Err(InterpreterError::Poisoned);
        }
        loop {
            let decoded = Self::parse_op(self.code[self.index]);
            let (opcode, _) = self.checked(decoded)?;
            if matches!(opcode, OpCode::In | OpCode::Out | OpCode::Halt) {
                break Ok(());
            }
            self.exec_instruction(&mut std::iter::empty(), &mut Vec::with_capacity(0))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter::empty;

    /// Example program from day 9, which takes no input and outputs its own code
    #[test]
    fn quine() {
        let quine_code = vec![
            109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
        ];
        let mut interpreter = Interpreter::new(quine_code.clone());
        let (outputs, State::Halted) = interpreter.run_through_inputs(empty()).unwrap() else {
            panic!("Did not halt");
        };
        assert_eq!(quine_code, outputs);
    }

    #[test]
    fn add_example_patches_address_zero() {
        let mut interpreter: Interpreter = "1,9,10,3,2,3,11,0,99,30,40,50".parse().unwrap();
        assert_eq!(interpreter.state(), State::Ready);
        let (outputs, state) = interpreter.run_through_inputs(empty()).unwrap();
        assert!(outputs.is_empty());
        assert_eq!(state, State::Halted);
        assert_eq!(interpreter.mem_get(0), Ok(3500));
    }

    #[test]
    fn echo() {
        let mut interpreter = Interpreter::new([3, 0, 4, 0, 99]);
        assert_eq!(
            interpreter.run_through_inputs([42]),
            Ok((vec![42], State::Halted))
        );
    }

    /// Ensure that stopping due to missing input leaves the interpreter in a sane state that can
    /// be recovered from
    #[test]
    fn missing_input_recoverable() {
        let mut interpreter = Interpreter::new(vec![3, 10, 4, 10, 99]);
        let old_state = interpreter.clone();

        let stopped_run = interpreter.run_through_inputs(empty());

        assert_eq!(stopped_run, Ok((vec![], State::Awaiting)));
        assert_eq!(interpreter, old_state);
        assert_eq!(interpreter.state(), State::Awaiting);

        assert_eq!(
            interpreter.run_through_inputs(vec![1]),
            Ok((vec![1], State::Halted))
        );
    }

    #[test]
    fn halted_is_terminal() {
        let mut interpreter = Interpreter::new([104, 7, 99]);
        assert_eq!(interpreter.run_through_inputs(empty()), Ok((vec![7], State::Halted)));
        assert_eq!(interpreter.run_through_inputs([1, 2]), Ok((vec![], State::Halted)));
        assert_eq!(interpreter.instr_ptr(), 2);
    }

    #[test]
    fn deterministic_without_io() {
        let template = Interpreter::new([1, 0, 0, 0, 2, 0, 0, 9, 99]);
        let mut a = template.clone();
        let mut b = template.clone();
        a.run_through_inputs(empty()).unwrap();
        b.run_through_inputs(empty()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.memory(), b.memory());
        assert_eq!(a.memory(), vec![2, 0, 0, 0, 2, 0, 0, 9, 99, 4]);
    }

    #[test]
    fn unwritten_memory_reads_zero() {
        // output the cell at address 5000, which is never written
        let mut interpreter = Interpreter::new([4, 5000, 99]);
        assert_eq!(interpreter.run_through_inputs(empty()), Ok((vec![0], State::Halted)));
        assert_eq!(interpreter.mem_get(123_456), Ok(0));
    }

    #[test]
    fn relative_round_trip() {
        // RBO #1000; IN @5; OUT @5; OUT 1005; HALT
        let mut interpreter = Interpreter::new([109, 1000, 203, 5, 204, 5, 4, 1005, 99]);
        let (outputs, _) = interpreter.run_through_inputs([-17]).unwrap();
        assert_eq!(outputs, vec![-17, -17]);
        assert_eq!(interpreter.rel_base(), 1000);
    }

    #[test]
    fn relative_base_is_cumulative() {
        // RBO #3; RBO #4; OUT @0; HALT, padded so @0 lands on address 7
        let split = Interpreter::new([109, 3, 109, 4, 204, 0, 99, 55]);
        // RBO #7; OUT @0; HALT, padded the same way
        let joined = Interpreter::new([109, 7, 204, 0, 99, 0, 0, 55]);
        for mut interpreter in [split, joined] {
            let (outputs, _) = interpreter.run_through_inputs(empty()).unwrap();
            assert_eq!(outputs, vec![55]);
            assert_eq!(interpreter.rel_base(), 7);
        }
    }

    #[test]
    fn decode_errors_poison() {
        let mut interpreter = Interpreter::new([1101, 1, 1, 5, 42]);
        assert_eq!(
            interpreter.run_through_inputs(empty()),
            Err(InterpreterError::UnrecognizedOpcode(42))
        );
        assert!(interpreter.is_poisoned());
        assert_eq!(
            interpreter.run_through_inputs(empty()),
            Err(InterpreterError::Poisoned)
        );

        let mut interpreter = Interpreter::new([11101, 1, 1, 5, 99]);
        assert_eq!(
            interpreter.run_through_inputs(empty()),
            Err(InterpreterError::WriteToImmediate(5))
        );

        let mut interpreter = Interpreter::new([301, 1, 1, 5, 99]);
        assert_eq!(
            interpreter.run_through_inputs(empty()),
            Err(InterpreterError::UnknownMode(301))
        );

        let mut interpreter = Interpreter::new([4, -1, 99]);
        assert_eq!(
            interpreter.run_through_inputs(empty()),
            Err(InterpreterError::NegativeMemAccess(-1))
        );

        let mut interpreter = Interpreter::new([1105, 1, -4]);
        assert_eq!(
            interpreter.run_through_inputs(empty()),
            Err(InterpreterError::JumpToNegative(-4))
        );
    }

    #[test]
    fn precompute_stops_before_io() {
        let mut interpreter = Interpreter::new([1101, 2, 3, 11, 1002, 11, 2, 11, 4, 11, 99, 0]);
        interpreter.precompute().unwrap();
        assert_eq!(interpreter.instr_ptr(), 8);
        assert_eq!(interpreter[11], 10);
        assert_eq!(interpreter.run_through_inputs(empty()), Ok((vec![10], State::Halted)));
    }

    #[test]
    fn precompute_reports_bad_opcodes() {
        // ADD #1, #41 -> [4], which is then reached as the next instruction
        let mut interpreter = Interpreter::new([1101, 1, 41, 4, 0]);
        assert_eq!(
            interpreter.precompute(),
            Err(InterpreterError::UnrecognizedOpcode(42))
        );
        assert!(interpreter.is_poisoned());
        assert_eq!(interpreter.precompute(), Err(InterpreterError::Poisoned));
    }

    /// An output port that never has room
    struct Jammed;

    impl OutputPort for Jammed {
        fn put(&mut self, value: i64) -> Result<(), i64> {
            Err(value)
        }
    }

    #[test]
    fn rejected_output_poisons() {
        let mut interpreter = Interpreter::new([104, 5, 99]);
        assert_eq!(
            interpreter.run_with_ports(&mut empty(), &mut Jammed),
            Err(InterpreterError::OutputBlocked(5))
        );
        assert!(interpreter.is_poisoned());
        assert_eq!(interpreter.instr_ptr(), 0);
    }

    #[test]
    fn compacting_keeps_contents() {
        let mut interpreter = Interpreter::new([99]);
        interpreter.mem_override(10_000, 5).unwrap();
        interpreter.mem_override(10_000, 0).unwrap();
        let before = interpreter.clone();
        interpreter.compact_memory();
        assert_eq!(interpreter, before);
        assert_eq!(interpreter.memory(), vec![99]);
    }

    #[test]
    fn negative_override_rejected() {
        let mut interpreter = Interpreter::new([99]);
        assert_eq!(
            interpreter.mem_override(-3, 1),
            Err(InterpreterError::NegativeMemAccess(-3))
        );
        interpreter.mem_override(3, 1).unwrap();
        assert_eq!(interpreter[3], 1);
    }
}
