// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Day 5: Sunny with a Chance of Asteroids

use super::{PuzzleError, Solver, run_diagnostic};

pub(super) struct Day05;

impl Solver for Day05 {
    fn title(&self) -> &'static str {
        "Sunny with a Chance of Asteroids"
    }

    fn solve(&self, input: &str, part: u8) -> Result<String, PuzzleError> {
        let system_id = match part {
            1 => 1, // air conditioner unit
            2 => 5, // thermal radiator controller
            _ => return Err(PuzzleError::BadPart(part)),
        };
        run_diagnostic(input, system_id).map(|code| code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// outputs 999 if the input is below 8, 1000 if it's 8, and 1001 if it's above 8
    const COMPARE_TO_8: &str = "3,21,1008,21,8,20,1005,20,22,107,8,21,20,1006,20,31,\
        1106,0,36,98,0,0,1002,21,125,20,4,20,1105,1,46,104,999,1105,1,46,1101,1000,1,20,4,20,\
        1105,1,46,98,99";

    #[test]
    fn both_parts() {
        assert_eq!(Day05.solve(COMPARE_TO_8, 1).unwrap(), "999");
        assert_eq!(Day05.solve(COMPARE_TO_8, 2).unwrap(), "999");
    }

    #[test]
    fn system_ids() {
        // echo the system id back as the diagnostic code
        assert_eq!(Day05.solve("3,0,4,0,99", 1).unwrap(), "1");
        assert_eq!(Day05.solve("3,0,4,0,99", 2).unwrap(), "5");
    }
}
