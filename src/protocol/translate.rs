//! Field-for-field translation
//!
//! One outbound/inbound pair per operation. Outbound mappings populate
//! the downstream dialect's flat camelCase message bodies; inbound
//! mappings strip the protocol envelope and return only the business
//! payload. Structural problems surface as [`ProtocolError`]; anything
//! well-formed passes through untouched.

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::Config;
use crate::handlers::{CreateQuoteCommand, CreateTransferCommand};

/// Translation failures
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("expected a JSON object in downstream response")]
    NotAnObject,

    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}

/// Envelope fields of the downstream dialect, never part of the
/// business payload handed back to callers.
const ENVELOPE_FIELDS: &[&str] = &[
    "requesterFspId",
    "destinationFspId",
    "bulkQuoteId",
    "ilpPacket",
    "extensionList",
];

// =========================================================================
// Outbound mappings
// =========================================================================

/// Quote request in the downstream dialect
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamQuoteRequest {
    pub requester_fsp_id: String,
    pub destination_fsp_id: String,
    pub quote_id: Uuid,
    pub bulk_quote_id: String,
    pub transaction_id: Uuid,
    pub payee_party_id_type: String,
    pub payee_party_identifier: String,
    pub payee_fsp_id: Option<String>,
    pub payer_party_id_type: String,
    pub payer_party_identifier: String,
    pub payer_fsp_id: String,
    pub amount_type: String,
    pub currency: String,
    pub amount: String,
    pub scenario: String,
    pub initiator: String,
    pub initiator_type: String,
    pub note: Option<String>,
    pub ilp_packet: String,
    pub extension_list: Option<Value>,
}

/// Transfer request in the downstream dialect
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamTransferRequest {
    pub requester_fsp_id: String,
    pub destination_fsp_id: String,
    pub transfer_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub payer_fsp_id: String,
    pub payee_fsp_id: String,
    pub currency: String,
    pub amount: String,
    pub note: Option<String>,
    pub ilp_packet: String,
    pub extension_list: Option<Value>,
}

/// Map a quote command into the downstream shape.
pub fn quote_request(command: &CreateQuoteCommand, config: &Config) -> DownstreamQuoteRequest {
    let destination = command
        .payee_fsp_id
        .clone()
        .unwrap_or_else(|| config.destination_fsp_id.clone());

    DownstreamQuoteRequest {
        requester_fsp_id: config.source_fsp_id.clone(),
        destination_fsp_id: destination,
        quote_id: command.quote_id,
        bulk_quote_id: String::new(),
        transaction_id: command.transaction_id,
        payee_party_id_type: command.payee_party_id_type.clone(),
        payee_party_identifier: command.payee_party_identifier.clone(),
        payee_fsp_id: command.payee_fsp_id.clone(),
        payer_party_id_type: command.payer_party_id_type.clone(),
        payer_party_identifier: command.payer_party_identifier.clone(),
        payer_fsp_id: config.source_fsp_id.clone(),
        amount_type: "SEND".to_string(),
        currency: command.currency.clone(),
        amount: command.amount.clone(),
        scenario: command.scenario.clone(),
        initiator: command.initiator.clone(),
        initiator_type: command.initiator_type.clone(),
        note: command.note.clone(),
        ilp_packet: String::new(),
        extension_list: None,
    }
}

/// Map a transfer command into the downstream shape.
pub fn transfer_request(
    command: &CreateTransferCommand,
    config: &Config,
) -> DownstreamTransferRequest {
    let destination = command
        .payee_fsp_id
        .clone()
        .unwrap_or_else(|| config.destination_fsp_id.clone());

    DownstreamTransferRequest {
        requester_fsp_id: config.source_fsp_id.clone(),
        destination_fsp_id: destination.clone(),
        transfer_id: command.transfer_id,
        quote_id: command.quote_id,
        payer_fsp_id: config.source_fsp_id.clone(),
        payee_fsp_id: destination,
        currency: command.currency.clone(),
        amount: command.amount.clone(),
        note: command.note.clone(),
        ilp_packet: String::new(),
        extension_list: None,
    }
}

// =========================================================================
// Inbound mappings
// =========================================================================

/// Extract the business payload from a party callback body.
///
/// The dialect wraps party details in a `party` object; older peers send
/// them at the top level. Either way the envelope is stripped.
pub fn party_response(body: Value) -> Result<Value, ProtocolError> {
    let Value::Object(mut map) = body else {
        return Err(ProtocolError::NotAnObject);
    };

    let mut business = match map.remove("party") {
        Some(Value::Object(inner)) => inner,
        Some(_) => return Err(ProtocolError::NotAnObject),
        None => map,
    };

    strip_envelope(&mut business);
    Ok(Value::Object(business))
}

/// Extract the business payload from a quote or transfer callback body.
pub fn business_payload(body: Value) -> Result<Value, ProtocolError> {
    let Value::Object(mut map) = body else {
        return Err(ProtocolError::NotAnObject);
    };

    strip_envelope(&mut map);
    Ok(Value::Object(map))
}

fn strip_envelope(map: &mut Map<String, Value>) {
    for field in ENVELOPE_FIELDS {
        map.remove(*field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: "development".to_string(),
            downstream_url: "http://localhost:4000".to_string(),
            source_fsp_id: "gateway-fsp".to_string(),
            destination_fsp_id: "switch".to_string(),
            protocol_version: "1.1".to_string(),
            downstream_timeout: std::time::Duration::from_secs(5),
            callback_wait: std::time::Duration::from_secs(10),
            cleanup_interval: std::time::Duration::from_secs(30),
        }
    }

    fn quote_command() -> CreateQuoteCommand {
        CreateQuoteCommand {
            quote_id: Uuid::new_v4(),
            transaction_id: Uuid::new_v4(),
            payee_party_id_type: "MSISDN".to_string(),
            payee_party_identifier: "4567".to_string(),
            payee_fsp_id: Some("peer-fsp".to_string()),
            payer_party_id_type: "MSISDN".to_string(),
            payer_party_identifier: "1234".to_string(),
            amount: "100.50".to_string(),
            currency: "USD".to_string(),
            scenario: "TRANSFER".to_string(),
            initiator: "PAYER".to_string(),
            initiator_type: "CONSUMER".to_string(),
            note: None,
        }
    }

    #[test]
    fn test_quote_request_mapping() {
        let config = test_config();
        let command = quote_command();

        let request = quote_request(&command, &config);

        assert_eq!(request.requester_fsp_id, "gateway-fsp");
        assert_eq!(request.destination_fsp_id, "peer-fsp");
        assert_eq!(request.amount_type, "SEND");
        assert_eq!(request.amount, "100.50");
        assert_eq!(request.ilp_packet, "");
        assert!(request.extension_list.is_none());

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["quoteId"], json!(command.quote_id));
        assert_eq!(body["payeePartyIdentifier"], json!("4567"));
        assert_eq!(body["extensionList"], Value::Null);
    }

    #[test]
    fn test_quote_destination_falls_back_to_config() {
        let config = test_config();
        let mut command = quote_command();
        command.payee_fsp_id = None;

        let request = quote_request(&command, &config);
        assert_eq!(request.destination_fsp_id, "switch");
    }

    #[test]
    fn test_transfer_request_mapping() {
        let config = test_config();
        let command = CreateTransferCommand {
            transfer_id: Uuid::new_v4(),
            quote_id: Some(Uuid::new_v4()),
            payee_fsp_id: Some("peer-fsp".to_string()),
            amount: "300.00".to_string(),
            currency: "USD".to_string(),
            note: Some("Payment for goods".to_string()),
        };

        let request = transfer_request(&command, &config);
        assert_eq!(request.payer_fsp_id, "gateway-fsp");
        assert_eq!(request.payee_fsp_id, "peer-fsp");

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["transferId"], json!(command.transfer_id));
        assert_eq!(body["note"], json!("Payment for goods"));
    }

    #[test]
    fn test_party_response_unwraps_party_object() {
        let body = json!({
            "party": {"name": "John", "partyIdInfo": {"partyIdentifier": "4567"}},
            "extensionList": null
        });

        let payload = party_response(body).unwrap();
        assert_eq!(payload["name"], json!("John"));
        assert!(payload.get("extensionList").is_none());
    }

    #[test]
    fn test_party_response_top_level_fields() {
        let body = json!({"name": "John", "extensionList": []});

        let payload = party_response(body).unwrap();
        assert_eq!(payload, json!({"name": "John"}));
    }

    #[test]
    fn test_party_response_rejects_non_object() {
        assert!(matches!(
            party_response(json!("John")),
            Err(ProtocolError::NotAnObject)
        ));
    }

    // Round trip: no envelope field of the outbound shape survives the
    // inbound mapping; business fields pass through untouched.
    #[test]
    fn test_no_envelope_leakage() {
        let body = json!({
            "requesterFspId": "peer-fsp",
            "destinationFspId": "gateway-fsp",
            "bulkQuoteId": "",
            "ilpPacket": "AYIC...",
            "extensionList": null,
            "quoteId": "4b5a...",
            "transferAmount": {"amount": "100.50", "currency": "USD"},
            "expiration": "2026-08-06T12:00:00Z"
        });

        let payload = business_payload(body).unwrap();
        let map = payload.as_object().unwrap();

        for field in ENVELOPE_FIELDS {
            assert!(!map.contains_key(*field), "{field} leaked through");
        }
        assert_eq!(payload["transferAmount"]["amount"], json!("100.50"));
        assert_eq!(payload["expiration"], json!("2026-08-06T12:00:00Z"));
    }
}
