//! Synchronous waiter
//!
//! Holds a caller's request open until its correlation entry resolves or
//! the wait budget elapses. Event-driven: the waiter suspends on a
//! one-shot receiver and wakes the moment the callback route resolves the
//! key; a hard deadline bounds the wait.

use std::time::Duration;

use serde_json::Value;
use tokio::sync::oneshot;

/// Receiving half of a registered correlation entry
#[derive(Debug)]
pub struct PendingResolution {
    ticket: u64,
    receiver: oneshot::Receiver<Value>,
}

impl PendingResolution {
    pub(super) fn new(ticket: u64, receiver: oneshot::Receiver<Value>) -> Self {
        Self { ticket, receiver }
    }

    /// Identifies this registration; a displaced registration's ticket
    /// cannot cancel its successor.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    #[cfg(test)]
    pub(super) fn into_inner(self) -> oneshot::Receiver<Value> {
        self.receiver
    }
}

/// Outcome of a bounded wait
#[derive(Debug, Clone, PartialEq)]
pub enum WaitOutcome {
    /// The callback arrived within the budget
    Resolved(Value),
    /// No callback within the budget, or the entry was displaced or
    /// expired. A normal outcome, not an error.
    NoResponse,
}

/// Await `pending` for at most `budget`.
///
/// Returns exactly once. A dropped sender (entry overwritten by a reused
/// key, or purged by the expiry sweep) is indistinguishable from silence
/// to the caller and is reported the same way.
pub async fn await_resolution(pending: PendingResolution, budget: Duration) -> WaitOutcome {
    match tokio::time::timeout(budget, pending.receiver).await {
        Ok(Ok(payload)) => WaitOutcome::Resolved(payload),
        Ok(Err(_)) => WaitOutcome::NoResponse,
        Err(_) => WaitOutcome::NoResponse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_resolved_within_budget() {
        let (tx, rx) = oneshot::channel();
        let pending = PendingResolution::new(1, rx);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = tx.send(json!({"name": "John"}));
        });

        let outcome = await_resolution(pending, Duration::from_secs(1)).await;
        assert_eq!(outcome, WaitOutcome::Resolved(json!({"name": "John"})));
    }

    #[tokio::test]
    async fn test_deadline_elapses() {
        let (_tx, rx) = oneshot::channel::<Value>();
        let pending = PendingResolution::new(1, rx);

        let outcome = await_resolution(pending, Duration::from_millis(20)).await;
        assert_eq!(outcome, WaitOutcome::NoResponse);
    }

    #[tokio::test]
    async fn test_dropped_sender_is_no_response() {
        let (tx, rx) = oneshot::channel::<Value>();
        let pending = PendingResolution::new(1, rx);
        drop(tx);

        let outcome = await_resolution(pending, Duration::from_secs(1)).await;
        assert_eq!(outcome, WaitOutcome::NoResponse);
    }
}
