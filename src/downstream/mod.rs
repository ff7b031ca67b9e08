//! Outbound transport
//!
//! HTTP client for the downstream network. A 2xx here means the request
//! was *accepted*, not answered; the business outcome arrives later as an
//! inbound callback. Anything other than acceptance is a dispatch
//! failure surfaced straight back to the caller.

use std::sync::Arc;

use reqwest::StatusCode;

use crate::config::Config;
use crate::correlation::OperationKind;
use crate::handlers::LookupPartyCommand;
use crate::protocol::headers::build_headers;
use crate::protocol::{DownstreamQuoteRequest, DownstreamTransferRequest, ProtocolError};

/// Dispatch failures
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Downstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Downstream rejected request: status {0}")]
    Rejected(StatusCode),

    #[error("Could not build downstream request: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Client for the downstream interoperability API
#[derive(Clone)]
pub struct DownstreamClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl DownstreamClient {
    pub fn new(config: Arc<Config>) -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .timeout(config.downstream_timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// Issue a party lookup. The answer, if any, arrives on the party
    /// callback route.
    pub async fn lookup_party(&self, command: &LookupPartyCommand) -> Result<(), DispatchError> {
        let destination = command
            .destination_fsp_id
            .as_deref()
            .unwrap_or(&self.config.destination_fsp_id);

        let headers = build_headers(
            OperationKind::PartyLookup,
            &self.config.source_fsp_id,
            destination,
            &self.config.protocol_version,
        )?;

        let url = format!(
            "{}/parties/{}/{}",
            self.base_url(),
            command.party_id_type,
            command.party_identifier
        );

        let mut request = self.http.get(&url).headers(headers);
        if let Some(currency) = &command.currency {
            request = request.query(&[("currency", currency)]);
        }

        self.accept(request, &url).await
    }

    /// Issue a quote request
    pub async fn create_quote(&self, body: &DownstreamQuoteRequest) -> Result<(), DispatchError> {
        let headers = build_headers(
            OperationKind::Quote,
            &self.config.source_fsp_id,
            &body.destination_fsp_id,
            &self.config.protocol_version,
        )?;

        let url = format!("{}/quotes", self.base_url());
        self.accept(self.http.post(&url).headers(headers).json(body), &url)
            .await
    }

    /// Issue a transfer request
    pub async fn create_transfer(
        &self,
        body: &DownstreamTransferRequest,
    ) -> Result<(), DispatchError> {
        let headers = build_headers(
            OperationKind::Transfer,
            &self.config.source_fsp_id,
            &body.destination_fsp_id,
            &self.config.protocol_version,
        )?;

        let url = format!("{}/transfers", self.base_url());
        self.accept(self.http.post(&url).headers(headers).json(body), &url)
            .await
    }

    fn base_url(&self) -> &str {
        self.config.downstream_url.trim_end_matches('/')
    }

    async fn accept(&self, request: reqwest::RequestBuilder, url: &str) -> Result<(), DispatchError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(url = url, status = %status, "Downstream rejected request");
            return Err(DispatchError::Rejected(status));
        }

        tracing::debug!(url = url, status = %status, "Downstream accepted request");
        Ok(())
    }
}
