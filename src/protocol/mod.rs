//! Downstream protocol mapping
//!
//! Stateless translation between the facade's request/response shapes and
//! the downstream interoperability dialect: header stamping on the way
//! out, envelope stripping on the way back. Nothing in here retries,
//! waits, or validates business rules.

pub mod headers;
pub mod translate;

pub use translate::{
    business_payload, party_response, quote_request, transfer_request, DownstreamQuoteRequest,
    DownstreamTransferRequest, ProtocolError,
};
