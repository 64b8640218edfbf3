// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Solutions to the Advent of Code 2019 puzzles which run on an Intcode computer
//!
//! Each solver implements [Solver], and [registry] maps `(year, day)` to the solver for that day.
//! Parts are numbered from 1.
//!
//! ```
//! let registry = intcode::puzzles::registry();
//! let day7 = &registry[&(2019, 7)];
//! let program = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0";
//! assert_eq!(day7.solve(program, 1).unwrap(), "43210");
//! ```

use std::collections::BTreeMap;
use std::num::ParseIntError;

use thiserror::Error;

use crate::host::HostError;
use crate::{Interpreter, InterpreterError, State};

mod day02;
mod day05;
mod day07;
mod day09;
mod day11;
mod day13;

/// A solution to both parts of a single day's puzzle
pub trait Solver {
    /// The puzzle's title
    fn title(&self) -> &'static str;

    /// Solve `part` (either 1 or 2) for the trimmed puzzle `input`, returning the answer exactly as
    /// it should be submitted
    fn solve(&self, input: &str, part: u8) -> Result<String, PuzzleError>;
}

/// An error that prevented a puzzle from being solved
#[derive(Debug, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The input wasn't a valid Intcode program
    #[error("could not parse program: {0}")]
    BadProgram(#[from] ParseIntError),
    /// Only parts 1 and 2 exist
    #[error("there is no part {0}")]
    BadPart(u8),
    /// No candidate satisfied the puzzle
    #[error("no solution exists for this input")]
    NoSolution,
    /// The program reported failed self-tests, or more output than expected
    #[error("diagnostics failed: {0:?}")]
    FailedDiagnostic(Vec<i64>),
    /// The program halted without producing an answer
    #[error("program produced no output")]
    NoOutput,
    /// The program stopped waiting for input it was never going to get
    #[error("program is still waiting for input")]
    DidNotHalt,
    /// The interpreter failed
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
    /// A host failed while driving interpreters
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Build the table of every available solver, keyed by `(year, day)`
pub fn registry() -> BTreeMap<(u16, u8), Box<dyn Solver>> {
    let mut solvers: BTreeMap<(u16, u8), Box<dyn Solver>> = BTreeMap::new();
    solvers.insert((2019, 2), Box::new(day02::Day02));
    solvers.insert((2019, 5), Box::new(day05::Day05));
    solvers.insert((2019, 7), Box::new(day07::Day07));
    solvers.insert((2019, 9), Box::new(day09::Day09));
    solvers.insert((2019, 11), Box::new(day11::Day11));
    solvers.insert((2019, 13), Box::new(day13::Day13));
    solvers
}

/// Run `interp` to completion with `inputs`, insisting that it halts
fn run_to_halt(
    interp: &mut Interpreter,
    inputs: impl IntoIterator<Item = i64>,
) -> Result<Vec<i64>, PuzzleError> {
    match interp.run_through_inputs(inputs)? {
        (outputs, State::Halted) => Ok(outputs),
        _ => Err(PuzzleError::DidNotHalt),
    }
}

/// Run a diagnostic program, where every output but the last must be `0`, and the last is the
/// answer
fn run_diagnostic(input: &str, system_id: i64) -> Result<i64, PuzzleError> {
    let mut interp: Interpreter = input.parse()?;
    let mut outputs = run_to_halt(&mut interp, [system_id])?;
    let code = outputs.pop().ok_or(PuzzleError::NoOutput)?;
    if outputs.iter().any(|&i| i != 0) {
        outputs.push(code);
        return Err(PuzzleError::FailedDiagnostic(outputs));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_complete() {
        let days: Vec<_> = registry().into_keys().collect();
        assert_eq!(
            days,
            [(2019, 2), (2019, 5), (2019, 7), (2019, 9), (2019, 11), (2019, 13)]
        );
    }

    #[test]
    fn parts_are_one_indexed() {
        for solver in registry().values() {
            assert_eq!(solver.solve("99", 0), Err(PuzzleError::BadPart(0)));
            assert_eq!(solver.solve("99", 3), Err(PuzzleError::BadPart(3)));
        }
    }

    #[test]
    fn bad_program_text() {
        let registry = registry();
        assert!(matches!(
            registry[&(2019, 9)].solve("1,2,three", 1),
            Err(PuzzleError::BadProgram(_))
        ));
    }

    #[test]
    fn diagnostics() {
        assert_eq!(run_diagnostic("104,0,104,0,104,7,99", 1), Ok(7));
        assert_eq!(
            run_diagnostic("104,3,104,7,99", 1),
            Err(PuzzleError::FailedDiagnostic(vec![3, 7]))
        );
        assert_eq!(run_diagnostic("99", 1), Err(PuzzleError::NoOutput));
        assert_eq!(run_diagnostic("3,0,3,0,99", 1), Err(PuzzleError::DidNotHalt));
    }
}
