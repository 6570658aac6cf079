//! Error types for the SOAP client

use crate::fault::Fault;
use thiserror::Error;

/// Errors that can occur while decoding an RPC response
///
/// Each variant renders with the phase that failed as a prefix, so a caller
/// printing the error can tell a truncated body apart from a schema mismatch.
#[derive(Debug, Error)]
pub enum SoapError {
    /// The transport failed before any response was available
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The response body could not be fully read
    ///
    /// Also covers a read aborted because the call deadline passed or the
    /// call was cancelled.
    #[error("read: {0}")]
    Read(#[source] std::io::Error),

    /// The body could not be parsed even as a minimal fault envelope
    #[error("decode fault info: {0}")]
    FaultDecode(#[source] quick_xml::DeError),

    /// The remote endpoint reported a protocol-level fault
    #[error(transparent)]
    Fault(#[from] Fault),

    /// The body was not a fault but did not match the expected payload
    #[error("decode: {0}")]
    Decode(#[source] quick_xml::DeError),
}

impl SoapError {
    /// The remote fault carried by this error, if any
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            SoapError::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, SoapError::Fault(_))
    }
}

/// Type alias for results that can return a SoapError
pub type Result<T> = std::result::Result<T, SoapError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_error_display() {
        let err = SoapError::Read(io::Error::new(io::ErrorKind::UnexpectedEof, "connection reset"));
        assert_eq!(err.to_string(), "read: connection reset");
        assert!(!err.is_fault());
    }

    #[test]
    fn test_network_error_display() {
        let err = SoapError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network/HTTP error: connection refused");
    }

    #[test]
    fn test_fault_error_is_transparent() {
        let fault = Fault::from_status(401);
        let err: SoapError = fault.clone().into();

        assert!(err.is_fault());
        assert_eq!(err.fault(), Some(&fault));
        assert_eq!(err.to_string(), "http-status: 401, code: /, detail: ");
    }

    #[test]
    fn test_decode_errors_carry_phase_prefix() {
        let cause = || quick_xml::DeError::Custom("bad".to_string());

        assert!(SoapError::FaultDecode(cause())
            .to_string()
            .starts_with("decode fault info: "));
        assert!(SoapError::Decode(cause()).to_string().starts_with("decode: "));
    }
}
