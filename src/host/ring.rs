// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use std::thread;
use std::time::Duration;

use itertools::Itertools;

use super::HostError;
use crate::port::{PortWriter, port};
use crate::{Interpreter, InterpreterError, State};

/// Settings for the ports that connect a [Ring]'s members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingConfig {
    /// How many values may be in flight between two members before the writer blocks
    pub capacity: usize,
    /// How long a member waits for input before it's considered starved
    pub timeout: Duration,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: 1,
            timeout: Duration::from_secs(5),
        }
    }
}

/// A set of interpreters wired into a cycle, each running on its own thread
///
/// Member `i`'s output feeds member `i + 1`'s input, and the last member's output feeds the
/// first's. Before the ring starts, each member can be [seeded](Ring::seed) with values it reads
/// before anything arrives from its neighbor.
#[derive(Debug, Clone)]
pub struct Ring {
    members: Vec<Interpreter>,
    seeds: Vec<Vec<i64>>,
}

/// What a single member thread hands back once it stops
struct MemberOutcome {
    result: Result<State, InterpreterError>,
    last_output: Option<i64>,
    interp: Interpreter,
}

impl MemberOutcome {
    fn new(
        result: Result<State, InterpreterError>,
        writer: &PortWriter,
        interp: Interpreter,
    ) -> Self {
        Self {
            result,
            last_output: writer.last_sent(),
            interp,
        }
    }
}

/// The results of a [Ring] that ran until every member halted
#[derive(Debug)]
pub struct RingReport {
    members: Vec<Interpreter>,
    last_outputs: Vec<Option<i64>>,
}

impl RingReport {
    /// The last value output by the final member of the ring
    pub fn output(&self) -> Option<i64> {
        self.last_outputs.last().copied().flatten()
    }

    /// The last value output by member `i`
    pub fn last_output(&self, i: usize) -> Option<i64> {
        self.last_outputs.get(i).copied().flatten()
    }

    /// The final [State] of each member
    pub fn states(&self) -> Vec<State> {
        self.members.iter().map(Interpreter::state).collect()
    }

    /// The halted interpreters, in ring order
    pub fn members(&self) -> &[Interpreter] {
        &self.members
    }
}

impl Ring {
    /// Create a ring out of `members`, in order
    pub fn new(members: Vec<Interpreter>) -> Self {
        let seeds = vec![Vec::new(); members.len()];
        Self { members, seeds }
    }

    /// The number of members in the ring
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the ring has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append `values` to the input that `member` reads before anything from its neighbor
    ///
    /// # Panics
    ///
    /// Panics if `member` is out of range
    pub fn seed(&mut self, member: usize, values: impl IntoIterator<Item = i64>) -> &mut Self {
        self.seeds[member].extend(values);
        self
    }

    /// Run every member on its own thread, and wait until all of them have stopped
    ///
    /// Every member must halt for this to succeed. If a member waits longer than the configured
    /// timeout to write output, it's reported as [blocked](HostError::Blocked), and if it waits
    /// that long for input, it's reported as [starved](HostError::Starved). A member that failed
    /// or panicked is reported first, then blocked members, and only then starved ones, since
    /// the others usually stall as a result.
    pub fn run(self, config: &RingConfig) -> Result<RingReport, HostError> {
        let Ring { members, seeds } = self;
        let len = members.len();
        if len == 0 {
            return Err(HostError::EmptyRing);
        }

        let (mut writers, readers): (Vec<_>, Vec<_>) = (0..len)
            .map(|_| port(config.capacity, config.timeout))
            .unzip();
        // member i reads port i and writes port i + 1
        writers.rotate_left(1);

        let joined: Vec<thread::Result<MemberOutcome>> = thread::scope(|scope| {
            let handles: Vec<_> = members
                .into_iter()
                .zip(seeds)
                .zip(readers.into_iter().zip(writers))
                .enumerate()
                .map(|(i, ((mut interp, seed), (reader, mut writer)))| {
                    scope.spawn(move || {
                        log::debug!("ring member {i} starting with seed {seed:?}");
                        let mut input = seed.into_iter().chain(reader);
                        let result = interp.run_with_ports(&mut input, &mut writer);
                        log::debug!("ring member {i} stopped: {result:?}");
                        MemberOutcome::new(result, &writer, interp)
                    })
                })
                .collect();
            handles.into_iter().map(thread::ScopedJoinHandle::join).collect()
        });

        let mut members = Vec::with_capacity(len);
        let mut last_outputs = Vec::with_capacity(len);
        let mut blocked = None;
        let mut starved = None;
        for (member, outcome) in joined.into_iter().enumerate() {
            let outcome = outcome.map_err(|_| HostError::Panicked { member })?;
            match outcome.result {
                Ok(State::Halted) => (),
                Ok(_) => {
                    starved.get_or_insert(HostError::Starved { member });
                }
                Err(InterpreterError::OutputBlocked(_)) => {
                    blocked.get_or_insert(HostError::Blocked { member });
                }
                Err(source) => return Err(HostError::Member { member, source }),
            }
            members.push(outcome.interp);
            last_outputs.push(outcome.last_output);
        }
        if let Some(err) = blocked.or(starved) {
            return Err(err);
        }

        Ok(RingReport {
            members,
            last_outputs,
        })
    }
}

/// Find the ordering of `phases` that gives the highest output from a ring of amplifiers
///
/// For each permutation of `phases`, a fresh ring is built with one copy of `program` per phase.
/// Each member is seeded with its phase setting, and the first member is additionally seeded with
/// a starting signal of `0`. Returns the highest final output, along with the phase order that
/// produced it.
///
/// ```
/// use intcode::host::{RingConfig, max_signal};
/// let program = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0".parse().unwrap();
/// let (signal, phases) = max_signal(&program, 0..5, &RingConfig::default()).unwrap();
/// assert_eq!(signal, 43210);
/// assert_eq!(phases, vec![4, 3, 2, 1, 0]);
/// ```
pub fn max_signal(
    program: &Interpreter,
    phases: impl IntoIterator<Item = i64>,
    config: &RingConfig,
) -> Result<(i64, Vec<i64>), HostError> {
    let phases: Vec<i64> = phases.into_iter().collect();
    if phases.is_empty() {
        return Err(HostError::EmptyRing);
    }
    let mut best: Option<(i64, Vec<i64>)> = None;

    for order in phases.iter().copied().permutations(phases.len()) {
        let mut ring = Ring::new(vec![program.clone(); order.len()]);
        for (member, &phase) in order.iter().enumerate() {
            ring.seed(member, [phase]);
        }
        ring.seed(0, [0]);

        let last = ring.len().saturating_sub(1);
        let signal = ring
            .run(config)?
            .output()
            .ok_or(HostError::NoOutput { member: last })?;
        log::debug!("phases {order:?} produced {signal}");

        if best.as_ref().is_none_or(|(top, _)| signal > *top) {
            best = Some((signal, order));
        }
    }

    best.ok_or(HostError::EmptyRing)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: RingConfig = RingConfig {
        capacity: 1,
        timeout: Duration::from_millis(200),
    };

    /// `IN [100]; ADD [100], #delta -> [100]; OUT [100]; ADD [101], #-1 -> [101]; JNZ [101], #0;
    /// HALT`, looping as many times as the count at address 101
    fn forwarder(delta: i64, rounds: i64) -> Interpreter {
        let mut interp = Interpreter::new([
            3, 100, 1001, 100, delta, 100, 4, 100, 1001, 101, -1, 101, 1005, 101, 0, 99,
        ]);
        interp.mem_override(101, rounds).unwrap();
        interp
    }

    #[test]
    fn two_member_round_trip() {
        for (seed, rounds) in [(0, 1), (17, 5), (-40, 250)] {
            let mut ring = Ring::new(vec![forwarder(1, rounds), forwarder(-1, rounds)]);
            ring.seed(0, [seed]);
            let report = ring.run(&SHORT).unwrap();
            assert_eq!(report.last_output(0), Some(seed + 1));
            assert_eq!(report.output(), Some(seed));
            assert_eq!(report.states(), vec![State::Halted; 2]);
        }
    }

    #[test]
    fn phase_seeded_pair() {
        let amp: Interpreter = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0"
            .parse()
            .unwrap();
        let mut ring = Ring::new(vec![amp.clone(), amp]);
        ring.seed(0, [4]).seed(1, [3]).seed(0, [0]);
        assert_eq!(ring.run(&SHORT).unwrap().output(), Some(43));
    }

    #[test]
    fn unseeded_ring_starves() {
        let mut ring = Ring::new(vec![forwarder(1, 1), forwarder(-1, 1)]);
        assert_eq!(ring.len(), 2);
        let err = ring.run(&SHORT).unwrap_err();
        assert!(matches!(err, HostError::Starved { .. }), "{err:?}");
    }

    #[test]
    fn full_ports_are_detected() {
        // OUT #1; OUT #2; OUT #3; IN [100]; IN [100]; IN [100]; HALT
        let chatty = Interpreter::new([104, 1, 104, 2, 104, 3, 3, 100, 3, 100, 3, 100, 99]);
        let ring = Ring::new(vec![chatty.clone(), chatty]);
        let (done, result) = crossbeam::channel::bounded(1);
        thread::spawn(move || done.send(ring.run(&SHORT)));
        let err = result
            .recv_timeout(Duration::from_secs(10))
            .expect("ring never gave up on its full ports")
            .unwrap_err();
        assert!(matches!(err, HostError::Blocked { .. }), "{err:?}");
    }

    #[test]
    fn member_failure_is_reported() {
        let mut ring = Ring::new(vec![forwarder(1, 1), Interpreter::new([3, 0, 42])]);
        ring.seed(0, [5]);
        assert_eq!(
            ring.run(&SHORT).unwrap_err(),
            HostError::Member {
                member: 1,
                source: InterpreterError::UnrecognizedOpcode(42)
            }
        );
    }

    #[test]
    fn empty_ring() {
        assert_eq!(
            Ring::new(vec![]).run(&SHORT).unwrap_err(),
            HostError::EmptyRing
        );
    }

    #[test]
    fn rendezvous_ports() {
        let config = RingConfig {
            capacity: 0,
            ..SHORT
        };
        let mut ring = Ring::new(vec![forwarder(1, 20), forwarder(-1, 20)]);
        ring.seed(0, [100]);
        assert_eq!(ring.run(&config).unwrap().output(), Some(100));
    }
}
