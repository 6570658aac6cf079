//! Diagnostic events emitted while decoding responses.
//!
//! The decoder never reaches for a global logger. It is handed a
//! [`DiagnosticSink`] at construction and emits one [`RpcEvent`] per call.
//! [`TracingSink`] forwards those events to `tracing`, so whatever subscriber
//! the application installed (see [`crate::logging`]) decides where they go.

use std::fmt;
use tracing::Level;

/// Target used for every event emitted by [`TracingSink`].
pub const RPC_TARGET: &str = "soap_client::rpc";

/// One diagnostic record describing a response about to be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEvent {
    /// HTTP status line, e.g. `200 OK`
    pub message: String,
    /// Numeric HTTP status
    pub status: u16,
    /// Operation label of the RPC call
    pub action: String,
}

impl RpcEvent {
    pub fn new(message: impl Into<String>, status: u16, action: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            action: action.into(),
        }
    }
}

impl fmt::Display for RpcEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC {} ({}) action={}", self.message, self.status, self.action)
    }
}

/// Capability to record leveled diagnostic events.
///
/// Implementations are shared between concurrent decode calls and must only
/// append; they must not hold per-call state.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, level: Level, event: &RpcEvent);
}

/// Forwards events to the `tracing` dispatcher with structured fields
/// `msg`, `status` and `action`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, level: Level, event: &RpcEvent) {
        let msg = event.message.as_str();
        let action = event.action.as_str();
        let status = event.status;

        match level {
            Level::ERROR => tracing::error!(target: RPC_TARGET, msg, status, action, "RPC"),
            Level::WARN => tracing::warn!(target: RPC_TARGET, msg, status, action, "RPC"),
            Level::INFO => tracing::info!(target: RPC_TARGET, msg, status, action, "RPC"),
            Level::DEBUG => tracing::debug!(target: RPC_TARGET, msg, status, action, "RPC"),
            _ => tracing::trace!(target: RPC_TARGET, msg, status, action, "RPC"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _level: Level, _event: &RpcEvent) {}
}
