//! Shared application state
//!
//! The composition root builds one of these and hands it to the router;
//! every request path sees the same correlation store instance.

use std::sync::Arc;

use crate::config::Config;
use crate::correlation::CorrelationStore;
use crate::downstream::DownstreamClient;
use crate::error::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<CorrelationStore>,
    pub downstream: DownstreamClient,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let config = Arc::new(config);
        // Entries outliving the wait budget have no waiter left; the
        // sweep may reclaim them.
        let store = Arc::new(CorrelationStore::new(config.callback_wait));
        let downstream = DownstreamClient::new(config.clone())?;

        Ok(Self {
            config,
            store,
            downstream,
        })
    }
}
