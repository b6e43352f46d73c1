//! Recording report sink

use locus_core::ReportSink;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct SinkState {
    data: Vec<u8>,
    close_calls: usize,
    writes_after_close: usize,
}

/// Report sink that keeps everything written to it in memory
///
/// The sink is moved into a formatter, so inspection goes through the
/// [`SinkProbe`] returned alongside it.
#[derive(Debug)]
pub struct RecordingSink {
    state: Arc<Mutex<SinkState>>,
    fail_writes: bool,
    fail_close: bool,
}

/// Read side of a [`RecordingSink`]
#[derive(Debug, Clone)]
pub struct SinkProbe {
    state: Arc<Mutex<SinkState>>,
}

impl RecordingSink {
    /// Create a well-behaved sink
    pub fn new() -> (Self, SinkProbe) {
        Self::build(false, false)
    }

    /// Create a sink whose writes fail
    pub fn failing_writes() -> (Self, SinkProbe) {
        Self::build(true, false)
    }

    /// Create a sink whose `close` fails
    pub fn failing_close() -> (Self, SinkProbe) {
        Self::build(false, true)
    }

    fn build(fail_writes: bool, fail_close: bool) -> (Self, SinkProbe) {
        let state = Arc::new(Mutex::new(SinkState::default()));
        let probe = SinkProbe {
            state: Arc::clone(&state),
        };
        (
            Self {
                state,
                fail_writes,
                fail_close,
            },
            probe,
        )
    }

    fn state(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Write for RecordingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink rejected write"));
        }

        let mut state = self.state();
        if state.close_calls > 0 {
            state.writes_after_close += 1;
        }
        state.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ReportSink for RecordingSink {
    fn close(&mut self) -> io::Result<()> {
        self.state().close_calls += 1;
        if self.fail_close {
            return Err(io::Error::other("sink failed to close"));
        }
        Ok(())
    }
}

impl SinkProbe {
    fn state(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.state().data).into_owned()
    }

    /// Number of times `close` was called
    pub fn close_count(&self) -> usize {
        self.state().close_calls
    }

    /// Whether anything was written after the first `close`
    pub fn written_after_close(&self) -> bool {
        self.state().writes_after_close > 0
    }
}
