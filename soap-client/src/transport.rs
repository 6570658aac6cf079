//! Adapter between `ureq` and the decoder.
//!
//! `ureq` turns 4xx/5xx statuses into `Err(ureq::Error::Status(..))`, but a
//! SOAP endpoint reports its faults with exactly those statuses. The response
//! is recovered here so its fault envelope can still be decoded.

use crate::error::{Result, SoapError};
use crate::response::RpcResponse;
use std::io::Read;

impl RpcResponse for ureq::Response {
    type Body = Box<dyn Read + Send + Sync + 'static>;

    fn status(&self) -> u16 {
        ureq::Response::status(self)
    }

    fn status_text(&self) -> &str {
        ureq::Response::status_text(self)
    }

    fn into_body(self) -> Self::Body {
        self.into_reader()
    }
}

/// Keep any response `ureq` received, whatever its status.
///
/// Only failures where no response exists (DNS, connect, TLS, I/O before
/// the status line) become [`SoapError::Network`].
pub fn accept_status(
    result: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(_, response)) => Ok(response),
        Err(e @ ureq::Error::Transport(_)) => Err(SoapError::Network(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CallContext;
    use crate::decoder::ResponseDecoder;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Reply {
        #[serde(rename = "Body")]
        body: ReplyBody,
    }

    #[derive(Debug, Deserialize)]
    struct ReplyBody {
        #[serde(rename = "Result")]
        result: i64,
    }

    #[test]
    fn test_accept_status_keeps_error_responses() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/onvif/device_service")
            .with_status(401)
            .with_body("")
            .create();

        let url = format!("{}/onvif/device_service", server.url());
        let response = accept_status(ureq::post(&url).send_string("<Envelope/>")).unwrap();

        mock.assert();
        assert_eq!(RpcResponse::status(&response), 401);
        assert_eq!(response.status_line(), "401 Unauthorized");
    }

    #[test]
    fn test_accept_status_maps_transport_errors() {
        // Nothing listens on port 9 of localhost
        let err = accept_status(ureq::get("http://127.0.0.1:9/").call()).unwrap_err();
        assert!(matches!(err, SoapError::Network(_)));
    }

    #[test]
    fn test_decode_ureq_response() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/rpc")
            .with_status(200)
            .with_header("content-type", "application/soap+xml; charset=utf-8")
            .with_body(concat!(
                r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope">"#,
                "<s:Body><Result>42</Result></s:Body></s:Envelope>",
            ))
            .create();

        let url = format!("{}/rpc", server.url());
        let response = accept_status(ureq::post(&url).send_string("")).unwrap();
        let reply: Reply = ResponseDecoder::silent()
            .decode_result(&CallContext::background(), response, "GetResult")
            .unwrap();

        assert_eq!(reply.body.result, 42);
    }

    #[test]
    fn test_decode_ureq_fault() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/rpc")
            .with_status(500)
            .with_body(concat!(
                r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"><s:Body><s:Fault>"#,
                "<s:Code><s:Value>s:Receiver</s:Value>",
                "<s:Subcode><s:Value>ter:ActionNotSupported</s:Value></s:Subcode></s:Code>",
                r#"<s:Reason><s:Text xml:lang="en">Optional Action Not Implemented</s:Text></s:Reason>"#,
                "</s:Fault></s:Body></s:Envelope>",
            ))
            .create();

        let url = format!("{}/rpc", server.url());
        let response = accept_status(ureq::post(&url).send_string("")).unwrap();
        let err = ResponseDecoder::silent()
            .decode_result::<Reply, _>(&CallContext::background(), response, "GetResult")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "http-status: 500, code: s:Receiver/ter:ActionNotSupported, detail: Optional Action Not Implemented"
        );
    }
}
