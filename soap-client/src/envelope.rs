//! Generic SOAP envelope for success payloads.

use serde::Deserialize;

/// `Envelope/Body` wrapper around a caller's payload type.
///
/// Lets payload structs describe only what sits inside `Body`:
///
/// ```rust
/// use serde::Deserialize;
/// use soap_client::Envelope;
///
/// #[derive(Deserialize)]
/// struct GetVolumeResponse {
///     #[serde(rename = "CurrentVolume")]
///     current_volume: u8,
/// }
///
/// #[derive(Deserialize)]
/// struct Body {
///     #[serde(rename = "GetVolumeResponse")]
///     response: GetVolumeResponse,
/// }
///
/// let xml = "<s:Envelope xmlns:s=\"urn:e\"><s:Body><GetVolumeResponse><CurrentVolume>12</CurrentVolume></GetVolumeResponse></s:Body></s:Envelope>";
/// let envelope: Envelope<Body> = soap_client::xml::parse(xml).unwrap();
/// assert_eq!(envelope.into_body().response.current_volume, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "Body")]
    pub body: T,
}

impl<T> Envelope<T> {
    pub fn into_body(self) -> T {
        self.body
    }
}
