//! Party Lookup Handler
//!
//! Bridges the synchronous lookup request to the asynchronous party
//! callback: register, dispatch, wait, translate.

use crate::correlation::{await_resolution, CorrelationKey, WaitOutcome};
use crate::error::AppError;
use crate::protocol;
use crate::state::AppState;

use super::{LookupOutcome, LookupPartyCommand};

/// Handler for party lookups
pub struct LookupHandler {
    state: AppState,
}

impl LookupHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Execute the lookup command
    pub async fn execute(&self, command: LookupPartyCommand) -> Result<LookupOutcome, AppError> {
        if command.party_identifier.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "party_identifier must not be empty".to_string(),
            ));
        }

        let key = CorrelationKey::party_lookup(&command.party_identifier);

        // Register before dispatch: a callback that beats the return of
        // the outbound call must still find its entry.
        let pending = self.state.store.register(key.clone());
        let ticket = pending.ticket();

        if let Err(e) = self.state.downstream.lookup_party(&command).await {
            self.state.store.cancel(&key, ticket);
            return Err(e.into());
        }

        match await_resolution(pending, self.state.config.callback_wait).await {
            WaitOutcome::Resolved(payload) => {
                let party = protocol::party_response(payload)
                    .map_err(|e| AppError::MalformedPayload(e.to_string()))?;
                Ok(LookupOutcome::Found(party))
            }
            WaitOutcome::NoResponse => {
                // Nothing will consume this entry anymore; a later
                // callback becomes an orphan either way.
                self.state.store.cancel(&key, ticket);
                Ok(LookupOutcome::NoResponse)
            }
        }
    }
}
