// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Day 13: Care Package

use super::{PuzzleError, Solver};
use crate::Interpreter;
use crate::host::{Arcade, drive};

pub(super) struct Day13;

impl Solver for Day13 {
    fn title(&self) -> &'static str {
        "Care Package"
    }

    fn solve(&self, input: &str, part: u8) -> Result<String, PuzzleError> {
        if !matches!(part, 1 | 2) {
            return Err(PuzzleError::BadPart(part));
        }
        let mut interp: Interpreter = input.parse()?;
        if part == 2 {
            // insert quarters
            interp.mem_override(0, 2)?;
        }
        let mut arcade = Arcade::default();
        drive(&mut interp, &mut arcade)?;
        if part == 1 {
            Ok(arcade.blocks().to_string())
        } else {
            log::info!("game over with {} blocks left", arcade.blocks());
            Ok(arcade.score().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // address 0 adds (or, once quarters are inserted, multiplies) 3 and 4, then the cabinet draws
    // a ball, a paddle, and a block, reads the joystick, and displays the result as the score
    const CABINET: &str = "1,31,32,33,104,5,104,5,104,4,104,3,104,5,104,3,104,7,104,0,104,2,\
        3,34,104,-1,104,0,4,33,99,3,4,0";

    #[test]
    fn part1() {
        assert_eq!(Day13.solve(CABINET, 1).unwrap(), "1");
    }

    #[test]
    fn part2() {
        assert_eq!(Day13.solve(CABINET, 2).unwrap(), "12");
    }

    #[test]
    fn joystick_tracks_ball() {
        let mut interp: Interpreter = CABINET.parse().unwrap();
        let mut arcade = Arcade::default();
        drive(&mut interp, &mut arcade).unwrap();
        assert_eq!(interp[34], 1);
    }
}
