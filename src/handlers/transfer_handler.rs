//! Transfer Handler
//!
//! Dispatches a transfer downstream and holds the caller until the
//! transfer callback arrives or the wait budget elapses.

use crate::correlation::{await_resolution, CorrelationKey, WaitOutcome};
use crate::error::AppError;
use crate::protocol;
use crate::state::AppState;

use super::quote_handler::validate_amount;
use super::{CreateTransferCommand, TransferResult};

/// Handler for transfer creation
pub struct TransferHandler {
    state: AppState,
}

impl TransferHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Execute the transfer command
    pub async fn execute(
        &self,
        command: CreateTransferCommand,
    ) -> Result<TransferResult, AppError> {
        validate_amount(&command.amount)?;

        let key = CorrelationKey::transfer(command.transfer_id);
        let pending = self.state.store.register(key.clone());
        let ticket = pending.ticket();

        let body = protocol::transfer_request(&command, &self.state.config);
        if let Err(e) = self.state.downstream.create_transfer(&body).await {
            self.state.store.cancel(&key, ticket);
            return Err(e.into());
        }

        match await_resolution(pending, self.state.config.callback_wait).await {
            WaitOutcome::Resolved(payload) => {
                let transfer = protocol::business_payload(payload)
                    .map_err(|e| AppError::MalformedPayload(e.to_string()))?;

                // The callback reports the final state when the dialect
                // carries one.
                let status = transfer
                    .get("transferState")
                    .and_then(|v| v.as_str())
                    .unwrap_or("COMMITTED")
                    .to_string();

                Ok(TransferResult {
                    status,
                    transfer_id: command.transfer_id,
                    transfer: Some(transfer),
                })
            }
            WaitOutcome::NoResponse => {
                self.state.store.cancel(&key, ticket);
                Ok(TransferResult {
                    status: "PENDING".to_string(),
                    transfer_id: command.transfer_id,
                    transfer: None,
                })
            }
        }
    }
}
