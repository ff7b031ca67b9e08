//! Command definitions
//!
//! Commands represent a caller's intent, already shaped for dispatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// =========================================================================
// LookupPartyCommand
// =========================================================================

/// Command to look up a party on the downstream network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupPartyCommand {
    /// Identifier scheme, e.g. MSISDN
    pub party_id_type: String,
    /// The party identifier to resolve
    pub party_identifier: String,
    /// Optional currency scope for the lookup
    pub currency: Option<String>,
    /// Destination participant override
    pub destination_fsp_id: Option<String>,
}

impl LookupPartyCommand {
    pub fn new(party_id_type: String, party_identifier: String) -> Self {
        Self {
            party_id_type,
            party_identifier,
            currency: None,
            destination_fsp_id: None,
        }
    }

    pub fn with_currency(mut self, currency: String) -> Self {
        self.currency = Some(currency);
        self
    }
}

// =========================================================================
// CreateQuoteCommand
// =========================================================================

/// Command to request a quote from the downstream network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuoteCommand {
    pub quote_id: Uuid,
    pub transaction_id: Uuid,
    pub payee_party_id_type: String,
    pub payee_party_identifier: String,
    pub payee_fsp_id: Option<String>,
    pub payer_party_id_type: String,
    pub payer_party_identifier: String,
    /// Amount as string for precise decimal handling
    pub amount: String,
    pub currency: String,
    pub scenario: String,
    pub initiator: String,
    pub initiator_type: String,
    pub note: Option<String>,
}

// =========================================================================
// CreateTransferCommand
// =========================================================================

/// Command to execute a transfer on the downstream network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransferCommand {
    pub transfer_id: Uuid,
    /// Quote this transfer fulfils, when one was obtained first
    pub quote_id: Option<Uuid>,
    pub payee_fsp_id: Option<String>,
    /// Amount as string for precise decimal handling
    pub amount: String,
    pub currency: String,
    pub note: Option<String>,
}

// =========================================================================
// Results
// =========================================================================

/// Outcome of a party lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The downstream network answered within the wait budget
    Found(Value),
    /// No callback arrived in time; an expected outcome, not an error
    NoResponse,
}

/// Result of a quote request
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResult {
    pub status: String,
    pub quote_id: Uuid,
    pub transaction_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Value>,
}

/// Result of a transfer request
#[derive(Debug, Clone, Serialize)]
pub struct TransferResult {
    pub status: String,
    pub transfer_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer: Option<Value>,
}
