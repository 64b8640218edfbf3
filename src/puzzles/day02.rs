// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Day 2: 1202 Program Alarm

use super::{PuzzleError, Solver, run_to_halt};
use crate::Interpreter;

const TARGET: i64 = 19_690_720;

pub(super) struct Day02;

/// Patch the noun and verb into a copy of `base`, run it, and return address 0
fn run_with(base: &Interpreter, noun: i64, verb: i64) -> Result<i64, PuzzleError> {
    let mut interp = base.clone();
    interp[1] = noun;
    interp[2] = verb;
    let output = run_to_halt(&mut interp, [])?;
    debug_assert!(output.is_empty(), "gravity assist program had output");
    Ok(interp[0])
}

impl Solver for Day02 {
    fn title(&self) -> &'static str {
        "1202 Program Alarm"
    }

    fn solve(&self, input: &str, part: u8) -> Result<String, PuzzleError> {
        let base: Interpreter = input.parse()?;
        match part {
            1 => run_with(&base, 12, 2).map(|i| i.to_string()),
            2 => {
                for noun in 0..=99 {
                    for verb in 0..=99 {
                        if run_with(&base, noun, verb)? == TARGET {
                            return Ok((100 * noun + verb).to_string());
                        }
                    }
                }
                Err(PuzzleError::NoSolution)
            }
            _ => Err(PuzzleError::BadPart(part)),
        }
    }
}
