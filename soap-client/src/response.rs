//! The HTTP response seen by the decoder.

use std::io::Read;

/// A completed HTTP response to an RPC call.
///
/// The body is a single-read stream: [`into_body`](RpcResponse::into_body)
/// consumes the response, and dropping the returned reader releases it.
pub trait RpcResponse {
    type Body: Read;

    /// Numeric HTTP status, e.g. `200`
    fn status(&self) -> u16;

    /// Reason phrase, e.g. `OK`
    fn status_text(&self) -> &str;

    /// Status line as reported to diagnostics, e.g. `200 OK`
    fn status_line(&self) -> String {
        format!("{} {}", self.status(), self.status_text())
    }

    fn into_body(self) -> Self::Body;
}

/// A response assembled from its parts.
///
/// Useful when the transport is not `ureq`, or when replaying a captured
/// response.
#[derive(Debug, Clone)]
pub struct RawResponse<B> {
    status: u16,
    status_text: String,
    body: B,
}

impl<B: Read> RawResponse<B> {
    pub fn new(status: u16, status_text: impl Into<String>, body: B) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body,
        }
    }
}

impl RawResponse<std::io::Cursor<Vec<u8>>> {
    /// A response whose body is already in memory.
    pub fn from_bytes(
        status: u16,
        status_text: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(status, status_text, std::io::Cursor::new(body.into()))
    }
}

impl<B: Read> RpcResponse for RawResponse<B> {
    type Body = B;

    fn status(&self) -> u16 {
        self.status
    }

    fn status_text(&self) -> &str {
        &self.status_text
    }

    fn into_body(self) -> B {
        self.body
    }
}
