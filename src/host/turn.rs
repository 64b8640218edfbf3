// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use std::collections::HashMap;
use std::iter;

use super::HostError;
use crate::{Interpreter, State, StepOutcome};

/// The host side of a turn-based exchange with a single [Interpreter]
///
/// See [drive] for how turns alternate.
pub trait TurnHost {
    /// How many outputs make up one group
    const GROUP: usize;

    /// Handle one complete group of outputs
    fn observe(&mut self, group: &[i64]);

    /// Produce the next input, which is requested exactly once each time the interpreter blocks
    fn respond(&mut self) -> i64;
}

/// Run `interp` on the current thread, taking turns with `host` until it halts
///
/// Every [`H::GROUP`](TurnHost::GROUP) outputs are handed to [`observe`](TurnHost::observe) as
/// soon as the group is complete. When the interpreter blocks on input,
/// [`respond`](TurnHost::respond) is called once, and its value fills a single-slot handshake that
/// the interpreter must consume before `respond` can be called again.
///
/// Stopping with an incomplete group buffered is a [`HostError::PartialGroup`].
///
/// ```
/// use intcode::prelude::*;
/// use intcode::host::{TurnHost, drive};
///
/// /// records the sum of each pair of outputs, and answers with double the latest sum
/// struct Summer(Vec<i64>);
/// impl TurnHost for Summer {
///     const GROUP: usize = 2;
///     fn observe(&mut self, group: &[i64]) {
///         self.0.push(group[0] + group[1]);
///     }
///     fn respond(&mut self) -> i64 {
///         self.0.last().copied().unwrap_or(1) * 2
///     }
/// }
///
/// // IN [20]; OUT [20]; OUT #1; HALT
/// let mut interp = Interpreter::new([3, 20, 4, 20, 104, 1, 99]);
/// let mut host = Summer(Vec::new());
/// drive(&mut interp, &mut host).unwrap();
/// assert_eq!(host.0, vec![3]);
/// ```
pub fn drive<H: TurnHost>(interp: &mut Interpreter, host: &mut H) -> Result<(), HostError> {
    debug_assert!(H::GROUP > 0, "output groups can't be empty");
    let mut slot: Option<i64> = None;
    let mut group = Vec::with_capacity(H::GROUP);

    loop {
        let outcome = interp.exec_instruction(&mut iter::from_fn(|| slot.take()), &mut group)?;
        if group.len() == H::GROUP {
            host.observe(&group);
            group.clear();
        }
        match outcome {
            StepOutcome::Running => (),
            StepOutcome::Stopped(_) if !group.is_empty() => {
                return Err(HostError::PartialGroup(group.len()));
            }
            StepOutcome::Stopped(State::Awaiting) => {
                // the slot must be empty here, or the interpreter wouldn't be waiting
                let value = host.respond();
                log::debug!("host responded with {value}");
                slot = Some(value);
            }
            StepOutcome::Stopped(_) => break Ok(()),
        }
    }
}

/// A tile drawn by the arcade cabinet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs, reason = "trivial")]
pub enum Tile {
    Empty = 0,
    Wall = 1,
    Block = 2,
    Paddle = 3,
    Ball = 4,
}

impl TryFrom<i64> for Tile {
    type Error = i64;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            0 => Ok(Tile::Empty),
            1 => Ok(Tile::Wall),
            2 => Ok(Tile::Block),
            3 => Ok(Tile::Paddle),
            4 => Ok(Tile::Ball),
            _ => Err(i),
        }
    }
}

/// A [TurnHost] for the [care package] arcade cabinet
///
/// Outputs come in triples: either `x, y, tile`, or `-1, 0, score`. Whenever the cabinet asks for
/// joystick input, the joystick is tilted towards the ball.
///
/// [care package]: https://adventofcode.com/2019/day/13
#[derive(Debug, Default, Clone)]
pub struct Arcade {
    screen: HashMap<(i64, i64), Tile>,
    ball: Option<(i64, i64)>,
    paddle: Option<(i64, i64)>,
    score: i64,
}

impl Arcade {
    /// The most recently displayed score
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The number of block tiles currently on screen
    pub fn blocks(&self) -> usize {
        self.screen.values().filter(|&&t| t == Tile::Block).count()
    }

    /// The tile at `(x, y)`, if one was ever drawn there
    pub fn tile_at(&self, x: i64, y: i64) -> Option<Tile> {
        self.screen.get(&(x, y)).copied()
    }

    /// The position of the ball, if it's been drawn
    pub fn ball(&self) -> Option<(i64, i64)> {
        self.ball
    }

    /// The position of the paddle, if it's been drawn
    pub fn paddle(&self) -> Option<(i64, i64)> {
        self.paddle
    }
}

impl TurnHost for Arcade {
    const GROUP: usize = 3;

    fn observe(&mut self, group: &[i64]) {
        let &[x, y, val] = group else {
            unreachable!("groups are always 3 long")
        };
        if (x, y) == (-1, 0) {
            self.score = val;
            return;
        }
        match Tile::try_from(val) {
            Ok(tile) => {
                match tile {
                    Tile::Ball => self.ball = Some((x, y)),
                    Tile::Paddle => self.paddle = Some((x, y)),
                    _ => (),
                }
                self.screen.insert((x, y), tile);
            }
            Err(id) => log::warn!("ignoring unknown tile id {id} at ({x}, {y})"),
        }
    }

    fn respond(&mut self) -> i64 {
        match (self.ball, self.paddle) {
            (Some((ball_x, _)), Some((paddle_x, _))) => (ball_x - paddle_x).signum(),
            _ => 0,
        }
    }
}
