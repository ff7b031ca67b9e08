//! Quote Handler
//!
//! Dispatches a quote request downstream and holds the caller until the
//! quote callback arrives or the wait budget elapses.

use rust_decimal::Decimal;

use crate::correlation::{await_resolution, CorrelationKey, WaitOutcome};
use crate::error::AppError;
use crate::protocol;
use crate::state::AppState;

use super::{CreateQuoteCommand, QuoteResult};

/// Handler for quote creation
pub struct QuoteHandler {
    state: AppState,
}

impl QuoteHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Execute the quote command
    pub async fn execute(&self, command: CreateQuoteCommand) -> Result<QuoteResult, AppError> {
        validate_amount(&command.amount)?;
        if command.payee_party_identifier.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "payee_party_identifier must not be empty".to_string(),
            ));
        }

        // Quote ids are freshly generated, so the key is single-use.
        let key = CorrelationKey::quote(command.quote_id);
        let pending = self.state.store.register(key.clone());
        let ticket = pending.ticket();

        let body = protocol::quote_request(&command, &self.state.config);
        if let Err(e) = self.state.downstream.create_quote(&body).await {
            self.state.store.cancel(&key, ticket);
            return Err(e.into());
        }

        match await_resolution(pending, self.state.config.callback_wait).await {
            WaitOutcome::Resolved(payload) => {
                let quote = protocol::business_payload(payload)
                    .map_err(|e| AppError::MalformedPayload(e.to_string()))?;
                Ok(QuoteResult {
                    status: "COMPLETED".to_string(),
                    quote_id: command.quote_id,
                    transaction_id: command.transaction_id,
                    quote: Some(quote),
                })
            }
            WaitOutcome::NoResponse => {
                self.state.store.cancel(&key, ticket);
                Ok(QuoteResult {
                    status: "PENDING".to_string(),
                    quote_id: command.quote_id,
                    transaction_id: command.transaction_id,
                    quote: None,
                })
            }
        }
    }
}

pub(super) fn validate_amount(amount: &str) -> Result<Decimal, AppError> {
    let parsed: Decimal = amount
        .parse()
        .map_err(|_| AppError::InvalidRequest(format!("Invalid amount: {}", amount)))?;

    if parsed <= Decimal::ZERO {
        return Err(AppError::InvalidRequest(
            "Amount must be positive".to_string(),
        ));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("100.50").is_ok());
        assert!(validate_amount("0").is_err());
        assert!(validate_amount("-5").is_err());
        assert!(validate_amount("abc").is_err());
    }
}
