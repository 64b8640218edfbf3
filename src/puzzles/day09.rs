// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Day 9: Sensor Boost

use super::{PuzzleError, Solver, run_to_halt};
use crate::Interpreter;

pub(super) struct Day09;

impl Solver for Day09 {
    fn title(&self) -> &'static str {
        "Sensor Boost"
    }

    fn solve(&self, input: &str, part: u8) -> Result<String, PuzzleError> {
        let mode = match part {
            1 => 1, // test mode
            2 => 2, // sensor boost mode
            _ => return Err(PuzzleError::BadPart(part)),
        };
        let mut interp: Interpreter = input.parse()?;
        // anything other than a lone keycode is a list of malfunctioning opcodes
        match run_to_halt(&mut interp, [mode])?.as_slice() {
            [] => Err(PuzzleError::NoOutput),
            [keycode] => Ok(keycode.to_string()),
            malfunctions => Err(PuzzleError::FailedDiagnostic(malfunctions.to_vec())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_number() {
        assert_eq!(
            Day09.solve("104,1125899906842624,99", 1).unwrap(),
            "1125899906842624"
        );
    }

    #[test]
    fn quine_is_not_a_keycode() {
        let quine = "109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99";
        let Err(PuzzleError::FailedDiagnostic(outputs)) = Day09.solve(quine, 2) else {
            panic!("quine output was accepted as a keycode");
        };
        assert_eq!(outputs.len(), 16);
    }
}
