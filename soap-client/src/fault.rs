//! SOAP fault model and the outcome of a decoded RPC call.
//!
//! Faults follow the SOAP 1.2 layout:
//!
//! ```xml
//! <s:Fault>
//!   <s:Code><s:Value>s:Sender</s:Value><s:Subcode><s:Value>ter:NotAuthorized</s:Value></s:Subcode></s:Code>
//!   <s:Reason><s:Text xml:lang="en">Sender not Authorized</s:Text></s:Reason>
//! </s:Fault>
//! ```

use crate::error::{Result, SoapError};
use serde::Deserialize;
use thiserror::Error;

/// The HTTP status of a response that carries no fault.
pub const STATUS_OK: u16 = 200;

/// A protocol-level error returned inside an HTTP response.
///
/// The status code comes from the transport response, never from the XML.
/// A fault built from a non-200 response may have empty `code`, `subcode` and
/// `reason` when the body did not describe the failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("http-status: {status_code}, code: {code}/{subcode}, detail: {reason}")]
pub struct Fault {
    status_code: u16,
    code: String,
    subcode: String,
    reason: String,
}

impl Fault {
    /// Build a fault from its parts.
    pub fn new(
        status_code: u16,
        code: impl Into<String>,
        subcode: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            code: code.into(),
            subcode: subcode.into(),
            reason: reason.into(),
        }
    }

    /// A fault carrying only the HTTP status.
    pub fn from_status(status_code: u16) -> Self {
        Self {
            status_code,
            ..Self::default()
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Top-level classification, e.g. `s:Sender`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Finer-grained classification, e.g. `ter:NotAuthorized`
    pub fn subcode(&self) -> &str {
        &self.subcode
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Whether this value describes a failed call.
    ///
    /// True when the endpoint reported a fault code, or when the transport
    /// status alone signals failure.
    pub fn is_present(&self) -> bool {
        self.status_code != STATUS_OK || !self.code.is_empty()
    }
}

/// Result of decoding one RPC response.
///
/// A remote fault is an expected outcome of an RPC call rather than a failure
/// of the decoder, so it is reported here instead of through [`SoapError`].
#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome<T> {
    /// The endpoint answered with the expected payload
    Success(T),
    /// The endpoint reported, or the HTTP status implied, a fault
    RemoteFault(Fault),
}

impl<T> RpcOutcome<T> {
    pub fn is_fault(&self) -> bool {
        matches!(self, RpcOutcome::RemoteFault(_))
    }

    pub fn fault(&self) -> Option<&Fault> {
        match self {
            RpcOutcome::RemoteFault(fault) => Some(fault),
            RpcOutcome::Success(_) => None,
        }
    }

    /// The decoded payload, discarding a fault.
    pub fn success(self) -> Option<T> {
        match self {
            RpcOutcome::Success(value) => Some(value),
            RpcOutcome::RemoteFault(_) => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> RpcOutcome<U> {
        match self {
            RpcOutcome::Success(value) => RpcOutcome::Success(f(value)),
            RpcOutcome::RemoteFault(fault) => RpcOutcome::RemoteFault(fault),
        }
    }

    /// Fold a remote fault into [`SoapError::Fault`] so callers can use `?`.
    pub fn into_result(self) -> Result<T> {
        match self {
            RpcOutcome::Success(value) => Ok(value),
            RpcOutcome::RemoteFault(fault) => Err(SoapError::Fault(fault)),
        }
    }
}

/// Parsing scaffold reaching `Envelope/Body/Fault`; everything else in the
/// document is ignored.
///
/// Every level is a list so that repeated elements, which are well-formed,
/// never fail the parse. The first occurrence wins.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FaultEnvelope {
    #[serde(rename = "Body", default)]
    body: Vec<FaultBody>,
}

#[derive(Debug, Default, Deserialize)]
struct FaultBody {
    #[serde(rename = "Fault", default)]
    fault: Vec<FaultNode>,
}

#[derive(Debug, Default, Deserialize)]
struct FaultNode {
    #[serde(rename = "Code", default)]
    code: Vec<CodeNode>,
    #[serde(rename = "Reason", default)]
    reason: Vec<ReasonNode>,
}

#[derive(Debug, Default, Deserialize)]
struct CodeNode {
    #[serde(rename = "Value", default)]
    value: Vec<TextNode>,
    #[serde(rename = "Subcode", default)]
    subcode: Vec<SubcodeNode>,
}

#[derive(Debug, Default, Deserialize)]
struct SubcodeNode {
    #[serde(rename = "Value", default)]
    value: Vec<TextNode>,
}

#[derive(Debug, Default, Deserialize)]
struct ReasonNode {
    // One entry per language
    #[serde(rename = "Text", default)]
    text: Vec<TextNode>,
}

#[derive(Debug, Default, Deserialize)]
struct TextNode {
    #[serde(rename = "$text", default)]
    value: String,
}

fn first_text(nodes: Vec<TextNode>) -> String {
    nodes
        .into_iter()
        .next()
        .map(|t| t.value.trim().to_string())
        .unwrap_or_default()
}

impl FaultEnvelope {
    /// Parse a response body as a fault envelope.
    ///
    /// An empty body is not an error: it simply carries no fault.
    pub(crate) fn parse(xml: impl AsRef<[u8]>) -> std::result::Result<Self, quick_xml::DeError> {
        let bytes = xml.as_ref();
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        crate::xml::parse_bytes(bytes)
    }

    /// Extract the fault, stamping it with the transport status.
    pub(crate) fn into_fault(self, status_code: u16) -> Fault {
        let node = self
            .body
            .into_iter()
            .flat_map(|b| b.fault)
            .next()
            .unwrap_or_default();

        let (code, subcode) = match node.code.into_iter().next() {
            Some(code) => (
                first_text(code.value),
                code.subcode
                    .into_iter()
                    .next()
                    .map(|s| first_text(s.value))
                    .unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };
        let reason = node
            .reason
            .into_iter()
            .next()
            .map(|r| first_text(r.text))
            .unwrap_or_default();

        Fault {
            status_code,
            code,
            subcode,
            reason,
        }
    }
}
