//! Protocol header stamping
//!
//! Every outbound downstream call carries participant identification, a
//! versioned interoperability content-type, and an RFC 2822 timestamp.

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, DATE};

use crate::correlation::OperationKind;

use super::translate::ProtocolError;

/// Participant identification headers of the downstream dialect
pub const HEADER_SOURCE: &str = "FSPIOP-Source";
pub const HEADER_DESTINATION: &str = "FSPIOP-Destination";

/// Downstream resource name for an operation's content-type
fn resource_name(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::PartyLookup => "parties",
        OperationKind::Quote => "quotes",
        OperationKind::Transfer => "transfers",
    }
}

/// Versioned interoperability content-type string, e.g.
/// `application/vnd.interoperability.parties+json;version=1.1`
pub fn content_type(kind: OperationKind, version: &str) -> String {
    format!(
        "application/vnd.interoperability.{}+json;version={}",
        resource_name(kind),
        version
    )
}

/// Build the mandatory header set for one outbound call.
pub fn build_headers(
    kind: OperationKind,
    source: &str,
    destination: &str,
    version: &str,
) -> Result<HeaderMap, ProtocolError> {
    let mut headers = HeaderMap::new();

    let media_type = header_value(&content_type(kind, version), "Content-Type")?;
    headers.insert(CONTENT_TYPE, media_type.clone());
    headers.insert(ACCEPT, media_type);
    headers.insert(HEADER_SOURCE, header_value(source, HEADER_SOURCE)?);
    headers.insert(HEADER_DESTINATION, header_value(destination, HEADER_DESTINATION)?);
    headers.insert(DATE, header_value(&Utc::now().to_rfc2822(), "Date")?);

    Ok(headers)
}

fn header_value(value: &str, name: &'static str) -> Result<HeaderValue, ProtocolError> {
    HeaderValue::from_str(value).map_err(|_| ProtocolError::InvalidHeader(name))
}
