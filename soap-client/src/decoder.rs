//! Decoding of RPC responses into faults or typed payloads.

use crate::context::{CallContext, DEFAULT_CHUNK_SIZE};
use crate::diagnostics::{DiagnosticSink, NoopSink, RpcEvent, TracingSink};
use crate::envelope::Envelope;
use crate::error::{Result, SoapError};
use crate::fault::{Fault, FaultEnvelope, RpcOutcome, STATUS_OK};
use crate::response::RpcResponse;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::Level;

/// Turns completed HTTP responses into [`RpcOutcome`]s.
///
/// A decoder holds no per-call state and can be shared between threads;
/// every call gets its own response and produces its own outcome.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use soap_client::{CallContext, RawResponse, ResponseDecoder, RpcOutcome};
///
/// #[derive(Debug, Deserialize)]
/// struct Reply {
///     #[serde(rename = "Body")]
///     body: ReplyBody,
/// }
///
/// #[derive(Debug, Deserialize)]
/// struct ReplyBody {
///     #[serde(rename = "Result")]
///     result: i64,
/// }
///
/// let decoder = ResponseDecoder::silent();
/// let body = "<Envelope><Body><Result>42</Result></Body></Envelope>";
/// let response = RawResponse::from_bytes(200, "OK", body);
///
/// match decoder.decode::<Reply, _>(&CallContext::background(), response, "GetResult")? {
///     RpcOutcome::Success(reply) => assert_eq!(reply.body.result, 42),
///     RpcOutcome::RemoteFault(fault) => panic!("unexpected fault: {}", fault),
/// }
/// # Ok::<(), soap_client::SoapError>(())
/// ```
#[derive(Clone)]
pub struct ResponseDecoder {
    sink: Arc<dyn DiagnosticSink>,
    chunk_size: usize,
}

impl ResponseDecoder {
    /// A decoder reporting to `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// A decoder that emits no diagnostics.
    pub fn silent() -> Self {
        Self::with_sink(Arc::new(NoopSink))
    }

    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set how many bytes are read between two context checks.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Decode one RPC response.
    ///
    /// Emits a debug event for the response, reads the whole body (bounded by
    /// `ctx`), then checks it for a SOAP fault. A non-200 status is a fault
    /// even when the body says nothing. Only when no fault is found is the
    /// body parsed as `T`.
    ///
    /// # Arguments
    /// * `ctx` - Deadline and cancellation for the body read
    /// * `response` - The response; its body is consumed and released
    /// * `action` - Operation label, used only for diagnostics
    ///
    /// # Errors
    /// * [`SoapError::Read`] if the body could not be read in full
    /// * [`SoapError::FaultDecode`] if a 200 response is not well-formed XML
    /// * [`SoapError::Decode`] if the body does not match `T`
    pub fn decode<T, R>(
        &self,
        ctx: &CallContext,
        response: R,
        action: &str,
    ) -> Result<RpcOutcome<T>>
    where
        T: DeserializeOwned,
        R: RpcResponse,
    {
        let status = response.status();
        self.sink
            .emit(Level::DEBUG, &RpcEvent::new(response.status_line(), status, action));

        let mut body = response.into_body();
        let read = ctx.read_to_end(&mut body, self.chunk_size);
        drop(body);
        let bytes = read.map_err(SoapError::Read)?;

        let fault = match FaultEnvelope::parse(&bytes) {
            Ok(envelope) => envelope.into_fault(status),
            // The status already says the call failed, whatever the body holds
            Err(_) if status != STATUS_OK => Fault::from_status(status),
            Err(e) => return Err(SoapError::FaultDecode(e)),
        };
        if fault.is_present() {
            return Ok(RpcOutcome::RemoteFault(fault));
        }

        crate::xml::parse_bytes(&bytes)
            .map(RpcOutcome::Success)
            .map_err(SoapError::Decode)
    }

    /// Like [`decode`](Self::decode), with a remote fault returned as
    /// [`SoapError::Fault`].
    pub fn decode_result<T, R>(&self, ctx: &CallContext, response: R, action: &str) -> Result<T>
    where
        T: DeserializeOwned,
        R: RpcResponse,
    {
        self.decode(ctx, response, action)?.into_result()
    }

    /// Decode a response as [`Envelope<T>`] and keep only the body content.
    pub fn decode_envelope_body<T, R>(
        &self,
        ctx: &CallContext,
        response: R,
        action: &str,
    ) -> Result<RpcOutcome<T>>
    where
        T: DeserializeOwned,
        R: RpcResponse,
    {
        Ok(self
            .decode::<Envelope<T>, R>(ctx, response, action)?
            .map(Envelope::into_body))
    }
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResponseDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseDecoder")
            .field("chunk_size", &self.chunk_size)
            .finish_non_exhaustive()
    }
}

/// Decode a response with a default decoder reporting to `tracing`.
pub fn decode<T, R>(ctx: &CallContext, response: R, action: &str) -> Result<RpcOutcome<T>>
where
    T: DeserializeOwned,
    R: RpcResponse,
{
    ResponseDecoder::new().decode(ctx, response, action)
}
