//! # Mock Transport
//!
//! Records every write in memory. Clones share the same recording, so a test
//! can hand one clone to a panel and inspect the other afterwards.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use super::Transport;

#[derive(Debug, Default)]
struct State {
    writes: Vec<Vec<u8>>,
    short_by: usize,
    fail_writes: bool,
    flushes: usize,
    closes: usize,
}

/// In-memory [`Transport`] for tests.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // Poisoned by a panicking test; the recording is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Report `n` fewer bytes than each write was given.
    pub fn short_by(self, n: usize) -> Self {
        self.state().short_by = n;
        self
    }

    /// Fail every write with a broken pipe error.
    pub fn failing(self) -> Self {
        self.state().fail_writes = true;
        self
    }

    /// Every buffer passed to `write`, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state().writes.clone()
    }

    pub fn flush_count(&self) -> usize {
        self.state().flushes
    }

    pub fn close_count(&self) -> usize {
        self.state().closes
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut state = self.state();
        if state.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock write failure"));
        }
        state.writes.push(data.to_vec());
        Ok(data.len().saturating_sub(state.short_by))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state().flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.state().closes += 1;
        Ok(())
    }
}
