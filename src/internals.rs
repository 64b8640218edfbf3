// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use super::*;
use trace::TracedInstr;

impl Interpreter {
    // Given a 5 digit number, digits ABCDE are used as follows:
    // DE is the two-digit opcode
    // C is the 1st parameter's mode
    // B is the 2nd parameter's mode
    // A is the 3rd parameter's mode
    //
    // So *0*1202 would be parsed as follows:
    //
    // Opcode 02 is multiply
    // C=2: 1st parameter is in relative mode
    // B=1: 2nd parameter is in immediate mode
    // A=0: 3rd parameter is in positional mode
    pub(crate) fn parse_op(op: i64) -> Result<(OpCode, [ParamMode; 3]), InterpreterError> {
        Ok((
            OpCode::try_from(op % 100).map_err(|_| InterpreterError::UnrecognizedOpcode(op))?,
            ParamMode::extract(op)?,
        ))
    }

    /// Passes `result` through, marking the interpreter as poisoned if it's an error
    pub(crate) fn checked<T>(
        &mut self,
        result: Result<T, InterpreterError>,
    ) -> Result<T, InterpreterError> {
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    /// Turn the `offset`th parameter of the current instruction into an address, according to
    /// `mode`. Immediate parameters have no address, so they're returned unchanged.
    fn param_address(&self, mode: ParamMode, offset: i64) -> Result<i64, InterpreterError> {
        let raw = self.code[self.index + offset];
        let address = match mode {
            ParamMode::Positional | ParamMode::Immediate => raw,
            ParamMode::Relative => raw + self.rel_offset,
        };
        if address < 0 && mode != ParamMode::Immediate {
            Err(InterpreterError::NegativeMemAccess(address))
        } else {
            Ok(address)
        }
    }

    /// Processes the `offset`th parameter of the current instruction into a concrete value using
    /// the method appropriate for `mode`.
    /// If that would involve accessing memory at a negative index, instead marks `self` as
    /// poisoned and returns the error
    pub(crate) fn resolve_param(
        &mut self,
        mode: ParamMode,
        offset: i64,
    ) -> Result<i64, InterpreterError> {
        let address = self.param_address(mode, offset);
        let address = self.checked(address)?;
        match mode {
            ParamMode::Immediate => Ok(address),
            ParamMode::Positional | ParamMode::Relative => Ok(self.code[address]),
        }
    }

    /// Turns the `offset`th parameter into the address to write to, according to `mode`.
    /// If that would involve accessing memory at a negative index, or if `mode` is
    /// [ParamMode::Immediate], it instead marks `self` as poisoned and returns the error
    pub(crate) fn resolve_dest(
        &mut self,
        mode: ParamMode,
        offset: i64,
    ) -> Result<i64, InterpreterError> {
        let dest = if mode == ParamMode::Immediate {
            Err(InterpreterError::WriteToImmediate(
                self.code[self.index + offset],
            ))
        } else {
            self.param_address(mode, offset)
        };
        self.checked(dest)
    }

    /// Trace the instruction about to execute, both into the active [Trace] if there is one, and
    /// to the `log` crate at the trace level
    pub(crate) fn record(
        &mut self,
        instruction: i64,
        opcode: OpCode,
        modes: [ParamMode; 3],
        params: &[(i64, i64)],
        stored: Option<i64>,
    ) {
        if self.trace.is_none() && !log::log_enabled!(log::Level::Trace) {
            return;
        }
        let traced = TracedInstr::build(
            instruction,
            opcode,
            modes,
            self.index,
            self.rel_offset,
            params,
            stored,
        );
        log::trace!("{traced}");
        if let Some(trace) = self.trace.as_mut() {
            trace.0.push(traced);
        }
    }

    /// common logic of all 4 instructions that take 3 parameters
    pub(crate) fn op3(
        &mut self,
        instruction: i64,
        opcode: OpCode,
        modes: [ParamMode; 3],
        operation: impl Fn(i64, i64) -> i64,
    ) -> Result<StepOutcome, InterpreterError> {
        let a = self.resolve_param(modes[0], 1)?;
        let b = self.resolve_param(modes[1], 2)?;
        let dest = self.resolve_dest(modes[2], 3)?;
        let val = operation(a, b);
        self.record(
            instruction,
            opcode,
            modes,
            &[
                (self.code[self.index + 1], a),
                (self.code[self.index + 2], b),
                (self.code[self.index + 3], dest),
            ],
            Some(val),
        );
        self.code[dest] = val;
        self.index += 4;
        Ok(StepOutcome::Running)
    }

    /// common logic of `JNZ` and `JZ`, which jump if `func` returns true for the 1st parameter
    pub(crate) fn jump(
        &mut self,
        instruction: i64,
        opcode: OpCode,
        modes: [ParamMode; 3],
        func: impl Fn(i64) -> bool,
    ) -> Result<StepOutcome, InterpreterError> {
        let expr = self.resolve_param(modes[0], 1)?;
        let dest = self.resolve_param(modes[1], 2)?;
        self.record(
            instruction,
            opcode,
            modes,
            &[
                (self.code[self.index + 1], expr),
                (self.code[self.index + 2], dest),
            ],
            None,
        );
        if func(expr) {
            if dest < 0 {
                self.poisoned = true;
                return Err(InterpreterError::JumpToNegative(dest));
            }
            self.index = dest;
        } else {
            self.index += 3;
        }
        Ok(StepOutcome::Running)
    }
}
