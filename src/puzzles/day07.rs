// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Day 7: Amplification Circuit

use super::{PuzzleError, Solver};
use crate::Interpreter;
use crate::host::{RingConfig, max_signal};

pub(super) struct Day07;

impl Solver for Day07 {
    fn title(&self) -> &'static str {
        "Amplification Circuit"
    }

    fn solve(&self, input: &str, part: u8) -> Result<String, PuzzleError> {
        let phases = match part {
            1 => 0..5,
            2 => 5..10, // feedback loop mode
            _ => return Err(PuzzleError::BadPart(part)),
        };
        let program: Interpreter = input.parse()?;
        let (signal, order) = max_signal(&program, phases, &RingConfig::default())?;
        log::debug!("best phase order: {order:?}");
        Ok(signal.to_string())
    }
}
