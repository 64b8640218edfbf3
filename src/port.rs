// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Blocking, bounded, single-producer single-consumer ports for connecting interpreters
//!
//! A port is a FIFO channel of integers with exactly one [writer](PortWriter) and one
//! [reader](PortReader). Neither half can be cloned. Writing to a full port blocks until the
//! reader catches up, and reading from an empty port blocks until a value arrives or the writer is
//! dropped. Both waits are bounded by the port's timeout.
//!
//! ```
//! use intcode::prelude::*;
//! use intcode::port::port;
//! use std::time::Duration;
//!
//! let (mut writer, mut reader) = port(4, Duration::from_millis(50));
//! let mut doubler = Interpreter::new([3, 9, 1002, 9, 2, 9, 4, 9, 99, 0]);
//! writer.put(21).unwrap();
//! let mut outputs = Vec::new();
//! assert_eq!(doubler.run_with_ports(&mut reader, &mut outputs), Ok(State::Halted));
//! assert_eq!(outputs, vec![42]);
//! ```

use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError, SendTimeoutError, Sender, bounded};

use crate::OutputPort;

/// Create a port which holds up to `capacity` values in flight. The reader gives up after waiting
/// `timeout` for a value, and the writer gives up after waiting `timeout` for room.
///
/// A `capacity` of `0` makes every write wait for the matching read.
pub fn port(capacity: usize, timeout: Duration) -> (PortWriter, PortReader) {
    let (sender, receiver) = bounded(capacity);
    (
        PortWriter {
            sender,
            timeout,
            last_sent: None,
            sent: 0,
            dropped: 0,
        },
        PortReader {
            receiver,
            timeout,
            timed_out: false,
        },
    )
}

/// The sending half of a [port]
#[derive(Debug)]
pub struct PortWriter {
    sender: Sender<i64>,
    timeout: Duration,
    last_sent: Option<i64>,
    sent: usize,
    dropped: usize,
}

impl PortWriter {
    /// The most recent value given to this writer, whether or not it was delivered
    pub fn last_sent(&self) -> Option<i64> {
        self.last_sent
    }

    /// How many values were delivered to the reader's queue
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// How many values were discarded because the reader was already gone. Values refused because
    /// the port stayed full aren't counted.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl OutputPort for PortWriter {
    fn put(&mut self, value: i64) -> Result<(), i64> {
        self.last_sent = Some(value);
        match self.sender.send_timeout(value, self.timeout) {
            Ok(()) => {
                self.sent += 1;
                Ok(())
            }
            Err(SendTimeoutError::Disconnected(_)) => {
                // the consumer has halted, so nothing will ever read this
                log::debug!("port reader is gone, discarding {value}");
                self.dropped += 1;
                Ok(())
            }
            Err(SendTimeoutError::Timeout(value)) => {
                log::warn!("port stayed full for {:?}, could not send {value}", self.timeout);
                Err(value)
            }
        }
    }
}

/// The receiving half of a [port]
///
/// Iterating over it yields values in the order they were written. Iteration ends once the writer
/// is dropped and the queue is drained, or once no value arrives within the port's timeout.
#[derive(Debug)]
pub struct PortReader {
    receiver: Receiver<i64>,
    timeout: Duration,
    timed_out: bool,
}

impl PortReader {
    /// Whether a read gave up because the timeout elapsed, as opposed to the writer being dropped
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }
}

impl Iterator for PortReader {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        match self.receiver.recv_timeout(self.timeout) {
            Ok(value) => Some(value),
            Err(RecvTimeoutError::Timeout) => {
                log::warn!("no input arrived within {:?}", self.timeout);
                self.timed_out = true;
                None
            }
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SHORT: Duration = Duration::from_millis(20);

    #[test]
    fn fifo_order() {
        let (mut writer, reader) = port(8, SHORT);
        for i in [3, 1, 4, 1, 5] {
            writer.put(i).unwrap();
        }
        drop(writer);
        assert_eq!(reader.collect::<Vec<_>>(), vec![3, 1, 4, 1, 5]);
    }

    #[test]
    fn timeout_is_distinguished_from_disconnect() {
        let (writer, mut reader) = port(1, SHORT);
        assert_eq!(reader.next(), None);
        assert!(reader.timed_out());
        drop(writer);

        let (writer, mut reader) = port(1, SHORT);
        drop(writer);
        assert_eq!(reader.next(), None);
        assert!(!reader.timed_out());
    }

    #[test]
    fn writes_to_departed_reader_are_dropped() {
        let (mut writer, reader) = port(1, SHORT);
        drop(reader);
        assert_eq!(writer.put(9), Ok(()));
        assert_eq!(writer.last_sent(), Some(9));
        assert_eq!(writer.sent(), 0);
        assert_eq!(writer.dropped(), 1);
    }

    #[test]
    fn full_port_applies_backpressure() {
        let (mut writer, reader) = port(1, Duration::from_secs(5));
        let producer = thread::spawn(move || {
            for i in 0..100 {
                writer.put(i).unwrap();
            }
            writer.sent()
        });
        let received: Vec<i64> = reader.take(100).collect();
        assert_eq!(received, (0..100).collect::<Vec<_>>());
        assert_eq!(producer.join().unwrap(), 100);
    }

    #[test]
    fn full_port_times_out() {
        let (mut writer, reader) = port(1, SHORT);
        assert_eq!(writer.put(1), Ok(()));
        assert_eq!(writer.put(2), Err(2));
        assert_eq!(writer.sent(), 1);
        assert_eq!(writer.dropped(), 0);
        assert_eq!(reader.take(1).collect::<Vec<_>>(), vec![1]);
    }
}
