//! API Routes
//!
//! HTTP endpoint definitions: the synchronous facade consumed by
//! callers, and the callback routes the downstream network answers on.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::correlation::CorrelationKey;
use crate::error::AppError;
use crate::handlers::{
    CreateQuoteCommand, CreateTransferCommand, LookupHandler, LookupOutcome, LookupPartyCommand,
    QuoteHandler, TransferHandler,
};
use crate::state::AppState;

// =========================================================================
// Request types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct LookupPartyRequest {
    #[serde(default = "default_party_id_type")]
    pub party_id_type: String,
    pub party_identifier: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub destination_fsp_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(default = "Uuid::new_v4")]
    pub quote_id: Uuid,
    #[serde(default = "Uuid::new_v4")]
    pub transaction_id: Uuid,
    #[serde(default = "default_party_id_type")]
    pub payee_party_id_type: String,
    pub payee_party_identifier: String,
    #[serde(default)]
    pub payee_fsp_id: Option<String>,
    #[serde(default = "default_party_id_type")]
    pub payer_party_id_type: String,
    pub payer_party_identifier: String,
    pub amount: String,
    pub currency: String,
    #[serde(default = "default_scenario")]
    pub scenario: String,
    #[serde(default = "default_initiator")]
    pub initiator: String,
    #[serde(default = "default_initiator_type")]
    pub initiator_type: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    #[serde(default = "Uuid::new_v4")]
    pub transfer_id: Uuid,
    #[serde(default)]
    pub quote_id: Option<Uuid>,
    #[serde(default)]
    pub payee_fsp_id: Option<String>,
    pub amount: String,
    pub currency: String,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_party_id_type() -> String {
    "MSISDN".to_string()
}

fn default_scenario() -> String {
    "TRANSFER".to_string()
}

fn default_initiator() -> String {
    "PAYER".to_string()
}

fn default_initiator_type() -> String {
    "CONSUMER".to_string()
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/version", get(version))
        // Synchronous facade
        .route("/parties/lookup", post(lookup_party))
        .route("/quotes", post(create_quote))
        .route("/transfers", post(create_transfer))
        // Callbacks from the downstream network
        .route(
            "/parties/:party_id_type/:party_identifier",
            put(party_callback),
        )
        .route("/quotes/:quote_id", put(quote_callback))
        .route("/transfers/:transfer_id", put(transfer_callback))
}

// =========================================================================
// GET /version
// =========================================================================

async fn version(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "appName": env!("CARGO_PKG_NAME"),
        "appVersion": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
    }))
}

// =========================================================================
// POST /parties/lookup
// =========================================================================

/// Look up a party; blocks until the callback arrives or the wait
/// budget elapses.
async fn lookup_party(
    State(state): State<AppState>,
    Json(request): Json<LookupPartyRequest>,
) -> Result<Response, AppError> {
    let command = LookupPartyCommand {
        party_id_type: request.party_id_type,
        party_identifier: request.party_identifier,
        currency: request.currency,
        destination_fsp_id: request.destination_fsp_id,
    };

    let handler = LookupHandler::new(state);

    match handler.execute(command).await? {
        LookupOutcome::Found(party) => Ok((StatusCode::OK, Json(party)).into_response()),
        LookupOutcome::NoResponse => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({"message": "No response from lookup."})),
        )
            .into_response()),
    }
}

// =========================================================================
// POST /quotes
// =========================================================================

/// Create a quote; 200 with the resolved quote, or 202 when the
/// downstream network has accepted but not yet answered.
async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<Response, AppError> {
    let command = CreateQuoteCommand {
        quote_id: request.quote_id,
        transaction_id: request.transaction_id,
        payee_party_id_type: request.payee_party_id_type,
        payee_party_identifier: request.payee_party_identifier,
        payee_fsp_id: request.payee_fsp_id,
        payer_party_id_type: request.payer_party_id_type,
        payer_party_identifier: request.payer_party_identifier,
        amount: request.amount,
        currency: request.currency,
        scenario: request.scenario,
        initiator: request.initiator,
        initiator_type: request.initiator_type,
        note: request.note,
    };

    let handler = QuoteHandler::new(state);
    let result = handler.execute(command).await?;

    let status = if result.quote.is_some() {
        StatusCode::OK
    } else {
        StatusCode::ACCEPTED
    };

    Ok((status, Json(result)).into_response())
}

// =========================================================================
// POST /transfers
// =========================================================================

/// Create a transfer; 200 with the resolved outcome, or 202 when the
/// downstream network has accepted but not yet answered.
async fn create_transfer(
    State(state): State<AppState>,
    Json(request): Json<CreateTransferRequest>,
) -> Result<Response, AppError> {
    let command = CreateTransferCommand {
        transfer_id: request.transfer_id,
        quote_id: request.quote_id,
        payee_fsp_id: request.payee_fsp_id,
        amount: request.amount,
        currency: request.currency,
        note: request.note,
    };

    let handler = TransferHandler::new(state);
    let result = handler.execute(command).await?;

    let status = if result.transfer.is_some() {
        StatusCode::OK
    } else {
        StatusCode::ACCEPTED
    };

    Ok((status, Json(result)).into_response())
}

// =========================================================================
// Callback routes
// =========================================================================
//
// Fire-and-forget acknowledgment is the downstream protocol's contract:
// these return 200 whether or not a waiter was present. Orphan callbacks
// are dropped inside the store.

async fn party_callback(
    State(state): State<AppState>,
    Path((_party_id_type, party_identifier)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> StatusCode {
    let key = CorrelationKey::party_lookup(&party_identifier);
    state.store.resolve(&key, body);
    StatusCode::OK
}

async fn quote_callback(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> StatusCode {
    let key = CorrelationKey::quote(quote_id);
    state.store.resolve(&key, body);
    StatusCode::OK
}

async fn transfer_callback(
    State(state): State<AppState>,
    Path(transfer_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> StatusCode {
    let key = CorrelationKey::transfer(transfer_id);
    state.store.resolve(&key, body);
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_request_defaults() {
        let json = r#"{"party_identifier": "4567"}"#;

        let request: LookupPartyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.party_id_type, "MSISDN");
        assert_eq!(request.party_identifier, "4567");
        assert!(request.currency.is_none());
    }

    #[test]
    fn test_quote_request_generates_ids() {
        let json = r#"{
            "payee_party_identifier": "4567",
            "payer_party_identifier": "1234",
            "amount": "100.50",
            "currency": "USD"
        }"#;

        let request: CreateQuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.scenario, "TRANSFER");
        assert_eq!(request.initiator, "PAYER");
        assert_eq!(request.initiator_type, "CONSUMER");
        assert_ne!(request.quote_id, request.transaction_id);
    }

    #[test]
    fn test_transfer_request_deserialize() {
        let json = r#"{
            "amount": "300.00",
            "currency": "USD",
            "note": "Payment for goods"
        }"#;

        let request: CreateTransferRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, "300.00");
        assert_eq!(request.note, Some("Payment for goods".to_string()));
        assert!(request.quote_id.is_none());
    }
}
