// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Hosts which create, wire up, and drive [Interpreter]s
//!
//! Two ways of coupling interpreters are provided:
//!
//! * [Ring]: several interpreters each run on their own thread, with each one's output feeding the
//!   next one's input, and the last one's output wrapping around to the first. The host seeds
//!   each member's initial input, waits for every member to halt, then reads the final member's
//!   last output. [`max_signal`] runs one ring per ordering of a set of phase settings.
//! * [drive]: a single interpreter runs on the caller's thread, taking turns with a [TurnHost].
//!   The host observes fixed-size groups of output, and supplies exactly one input each time the
//!   interpreter blocks.
//!
//! [Interpreter]: crate::Interpreter

use thiserror::Error;

use crate::InterpreterError;

mod ring;
mod turn;

pub use ring::{Ring, RingConfig, RingReport, max_signal};
pub use turn::{Arcade, Tile, TurnHost, drive};

/// An error that occured while hosting interpreters
#[derive(Debug, PartialEq, Eq, Error)]
pub enum HostError {
    /// A ring needs at least one member
    #[error("ring has no members")]
    EmptyRing,
    /// A ring member's interpreter failed
    #[error("ring member {member} failed: {source}")]
    Member {
        /// index of the member within the ring
        member: usize,
        /// what went wrong
        source: InterpreterError,
    },
    /// A ring member was still waiting for input when its input dried up
    #[error("ring member {member} starved waiting for input")]
    Starved {
        /// index of the member within the ring
        member: usize,
    },
    /// A ring member gave up because its neighbor never made room for its output
    #[error("ring member {member} blocked writing output")]
    Blocked {
        /// index of the member within the ring
        member: usize,
    },
    /// A ring member's thread panicked
    #[error("ring member {member} panicked")]
    Panicked {
        /// index of the member within the ring
        member: usize,
    },
    /// The final member of a ring halted without producing any output
    #[error("ring member {member} never produced output")]
    NoOutput {
        /// index of the member within the ring
        member: usize,
    },
    /// The interpreter stopped with some of a group's outputs, but not all of them
    #[error("stopped with {0} outputs left over from an incomplete group")]
    PartialGroup(usize),
    /// A single hosted interpreter failed
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
}
