//! Correlation bridge
//!
//! Links synchronous facade requests to the asynchronous callbacks that
//! answer them: operation-scoped keys, the shared store of in-flight
//! waits, and the bounded waiter.

mod key;
mod store;
mod waiter;

pub use key::{CorrelationKey, OperationKind};
pub use store::{spawn_cleanup, CorrelationStore};
pub use waiter::{await_resolution, PendingResolution, WaitOutcome};
