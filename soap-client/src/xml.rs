//! Namespace-agnostic XML deserialization.
//!
//! SOAP endpoints disagree on prefixes (`s:`, `env:`, `SOAP-ENV:`, or none),
//! so element and attribute names are reduced to their local part before
//! handing the document to serde. That keeps payload structs free of prefixes.

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::{DeError, Reader, Writer};
use serde::de::DeserializeOwned;

/// Parse an XML document into `T`, ignoring namespace prefixes.
///
/// Malformed XML (mismatched or unclosed tags, bad attributes) is reported
/// as a [`DeError`].
pub fn parse<T: DeserializeOwned>(xml: &str) -> Result<T, DeError> {
    let stripped = strip_namespaces(xml)?;
    quick_xml::de::from_str(&stripped)
}

/// Decode a raw body as UTF-8 and parse it with [`parse`].
pub fn parse_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DeError> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| DeError::Custom(format!("body is not valid UTF-8: {}", e)))?;
    parse(xml)
}

/// Rewrite a document with every element and attribute name reduced to its
/// local part, dropping `xmlns` declarations.
///
/// Text, comments and declarations are copied verbatim. A document that
/// ends with elements still open, including one whose last end tag is cut
/// off before its `>`, is rejected.
///
/// Input: `<s:Envelope xmlns:s="urn:x"><s:Body/></s:Envelope>`
/// Output: `<Envelope><Body/></Envelope>`
pub fn strip_namespaces(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    let mut open: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let local = local_start(&start)?;
                open.push(String::from_utf8_lossy(local.name().as_ref()).into_owned());
                writer.write_event(Event::Start(local))?
            }
            Event::Empty(start) => writer.write_event(Event::Empty(local_start(&start)?))?,
            Event::End(end) => {
                open.pop();
                let name = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
                writer.write_event(Event::End(BytesEnd::new(name)))?
            }
            Event::Eof => break,
            other => writer.write_event(other)?,
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(quick_xml::Error::UnexpectedEof(format!("</{}>", unclosed)));
    }

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn local_start(start: &BytesStart<'_>) -> Result<BytesStart<'static>, quick_xml::Error> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut local = BytesStart::new(name);
    let mut seen: Vec<Vec<u8>> = Vec::new();

    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        // `a:id` and `b:id` collapse to the same local name; keep the first
        let key = attr.key.local_name();
        if seen.iter().any(|k| k.as_slice() == key.as_ref()) {
            continue;
        }
        seen.push(key.as_ref().to_vec());
        local.push_attribute(Attribute {
            key: QName(key.as_ref()),
            value: attr.value.clone(),
        });
    }

    Ok(local)
}
