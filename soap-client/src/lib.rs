//! Response decoding for SOAP-style XML/HTTP RPC calls
//!
//! Given a completed HTTP response, this crate decides whether the endpoint
//! returned a SOAP fault or a successful payload, and hands back either a
//! structured [`Fault`] or the payload deserialized into the caller's type.
//! Sending the request is left to the transport; [`transport`] adapts `ureq`
//! responses, and [`RawResponse`] wraps anything else.
//!
//! # Quick Start
//!
//! ```no_run
//! use serde::Deserialize;
//! use soap_client::{transport, CallContext, ResponseDecoder, RpcOutcome};
//! use std::time::Duration;
//!
//! #[derive(Debug, Deserialize)]
//! struct GetSystemDateAndTimeResponse {
//!     #[serde(rename = "SystemDateAndTime")]
//!     system_date_and_time: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct Body {
//!     #[serde(rename = "GetSystemDateAndTimeResponse")]
//!     response: GetSystemDateAndTimeResponse,
//! }
//!
//! let decoder = ResponseDecoder::new();
//! let response = transport::accept_status(
//!     ureq::post("http://192.168.1.10/onvif/device_service").send_string("..."),
//! )?;
//!
//! let ctx = CallContext::with_timeout(Duration::from_secs(5));
//! match decoder.decode_envelope_body::<Body, _>(&ctx, response, "GetSystemDateAndTime")? {
//!     RpcOutcome::Success(body) => println!("{}", body.response.system_date_and_time),
//!     RpcOutcome::RemoteFault(fault) => eprintln!("device refused: {}", fault),
//! }
//! # Ok::<(), soap_client::SoapError>(())
//! ```

mod context;
mod decoder;
mod diagnostics;
mod envelope;
mod error;
mod fault;
mod response;

pub mod logging;
pub mod transport;
pub mod xml;

pub use context::{CallContext, ContextError, DEFAULT_CHUNK_SIZE};
pub use decoder::{decode, ResponseDecoder};
pub use diagnostics::{DiagnosticSink, NoopSink, RpcEvent, TracingSink, RPC_TARGET};
pub use envelope::Envelope;
pub use error::{Result, SoapError};
pub use fault::{Fault, RpcOutcome, STATUS_OK};
pub use response::{RawResponse, RpcResponse};
