//! Common test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::Router;
use serde_json::Value;

use fspiop_gateway::{api, AppState, Config};

/// One request observed by the mock downstream
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// Spawn a mock downstream network on an ephemeral port.
///
/// Records every request it receives and answers each with `status`
/// (2xx = accepted, anything else = rejected dispatch).
pub async fn spawn_downstream(status: StatusCode) -> (String, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let handler_log = log.clone();

    let app = Router::new().fallback(move |request: Request| {
        let log = handler_log.clone();
        async move {
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX)
                .await
                .unwrap_or_default();
            let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            let headers = parts
                .headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        value.to_str().unwrap_or("[invalid]").to_string(),
                    )
                })
                .collect();

            log.lock().unwrap().push(RecordedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                headers,
                body,
            });

            status
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock downstream");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Mock downstream crashed");
    });

    (format!("http://{}", addr), log)
}

/// Build application state against the given downstream URL with a
/// short, test-friendly wait budget.
pub fn test_state(downstream_url: &str, callback_wait_ms: u64) -> AppState {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        downstream_url: downstream_url.to_string(),
        source_fsp_id: "test-fsp".to_string(),
        destination_fsp_id: "peer-fsp".to_string(),
        protocol_version: "1.1".to_string(),
        downstream_timeout: Duration::from_secs(2),
        callback_wait: Duration::from_millis(callback_wait_ms),
        cleanup_interval: Duration::from_secs(30),
    };

    AppState::new(config).expect("Failed to build test state")
}

/// Build the facade router over the given state
pub fn test_app(state: AppState) -> Router {
    api::create_router().with_state(state)
}
