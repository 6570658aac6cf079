//! Deadline and cancellation carrier for a single RPC call.

use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default granularity of a bounded body read.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Why a bounded read stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("call cancelled")]
    Cancelled,
}

/// Deadline and cancellation state for one call.
///
/// Clones share the cancellation flag, so a clone handed to another thread
/// can abort a read in progress. The deadline and the flag are checked
/// between chunks; a single blocking `read` is bounded only by the
/// transport's own read timeout.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl CallContext {
    /// A context with no deadline that is never cancelled unless asked to.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::default(),
        }
    }

    /// A context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail if the call was cancelled or its deadline has passed.
    pub fn check(&self) -> Result<(), ContextError> {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ContextError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Read `reader` to the end in chunks of at most `chunk_size` bytes,
    /// checking the context before each chunk.
    ///
    /// A stop caused by the context is reported as an `io::Error` whose
    /// inner error is a [`ContextError`].
    pub fn read_to_end<R: Read>(&self, reader: &mut R, chunk_size: usize) -> io::Result<Vec<u8>> {
        let mut body = Vec::new();
        let mut chunk = vec![0u8; chunk_size.max(1)];

        loop {
            self.check().map_err(|e| {
                let kind = match e {
                    ContextError::DeadlineExceeded => io::ErrorKind::TimedOut,
                    ContextError::Cancelled => io::ErrorKind::Other,
                };
                io::Error::new(kind, e)
            })?;

            match reader.read(&mut chunk) {
                Ok(0) => return Ok(body),
                Ok(n) => body.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
