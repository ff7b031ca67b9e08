//! Correlation store
//!
//! Process-wide map from correlation keys to in-flight waits. Dispatching
//! a downstream request registers a one-shot slot here; the inbound
//! callback resolves it; the registered waiter holds the receiving half,
//! so resolution wakes it without polling.
//!
//! Flow:
//! 1. A handler registers the key before dispatching downstream, so a
//!    callback can never arrive ahead of its entry.
//! 2. The handler awaits the returned [`PendingResolution`] under its
//!    wait budget.
//! 3. The callback route calls [`CorrelationStore::resolve`], which
//!    removes the entry and sends the payload through.
//! 4. Entries whose waiter never hears back are purged by the expiry
//!    sweep; the displaced receivers wake as "no response".

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::oneshot;

use super::key::CorrelationKey;
use super::waiter::PendingResolution;

/// One registered wait: the sending half plus its registration identity.
struct PendingEntry {
    ticket: u64,
    sender: oneshot::Sender<Value>,
    created_at: Instant,
}

/// Keyed store of in-flight correlated operations.
///
/// Constructed once at bootstrap and shared by the dispatching handlers
/// and the callback routes. All operations are single map operations;
/// nothing here is held across a suspension point.
pub struct CorrelationStore {
    pending: DashMap<CorrelationKey, PendingEntry>,
    /// Entries older than this are eligible for the expiry sweep.
    ttl: Duration,
    next_ticket: AtomicU64,
}

impl CorrelationStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pending: DashMap::new(),
            ttl,
            next_ticket: AtomicU64::new(1),
        }
    }

    /// Register a pending wait for `key` and return the receiving half.
    ///
    /// Re-registering a live key overwrites the entry: the displaced
    /// waiter's receiver completes with a drop error and is reported as
    /// "no response". Single-use keys (quotes, transfers) never hit this;
    /// party lookups on the same identifier can.
    pub fn register(&self, key: CorrelationKey) -> PendingResolution {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();

        let previous = self.pending.insert(
            key.clone(),
            PendingEntry {
                ticket,
                sender: tx,
                created_at: Instant::now(),
            },
        );

        if previous.is_some() {
            tracing::warn!(key = %key, "Overwrote live correlation entry for reused key");
        } else {
            tracing::debug!(key = %key, "Registered correlation entry");
        }

        PendingResolution::new(ticket, rx)
    }

    /// Resolve the entry for `key` with `payload`.
    ///
    /// Returns false when no entry exists (orphan callback: already timed
    /// out, expired, or never registered) or when the waiter already went
    /// away. Never an error; orphans are acknowledged upstream and
    /// dropped here.
    pub fn resolve(&self, key: &CorrelationKey, payload: Value) -> bool {
        let Some((_, entry)) = self.pending.remove(key) else {
            tracing::debug!(key = %key, "Callback for unknown or expired correlation key");
            return false;
        };

        let waited = entry.created_at.elapsed();
        match entry.sender.send(payload) {
            Ok(()) => {
                tracing::debug!(
                    key = %key,
                    waited_ms = waited.as_millis() as u64,
                    "Resolved correlation entry"
                );
                true
            }
            Err(_) => {
                tracing::debug!(key = %key, "Waiter gone before resolution");
                false
            }
        }
    }

    /// Remove the registration identified by `ticket`.
    ///
    /// Used to roll back a failed dispatch and to clear an entry whose
    /// waiter gave up. Matching on the ticket keeps a displaced
    /// registration from removing the successor that overwrote it.
    pub fn cancel(&self, key: &CorrelationKey, ticket: u64) -> bool {
        self.pending
            .remove_if(key, |_, entry| entry.ticket == ticket)
            .is_some()
    }

    /// Whether a wait is currently registered for `key`
    pub fn is_pending(&self, key: &CorrelationKey) -> bool {
        self.pending.contains_key(key)
    }

    /// Number of currently registered waits
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Purge entries older than the store TTL.
    ///
    /// Returns the number of entries removed. Dropping an entry's sender
    /// wakes its waiter (if still present) with the no-response outcome.
    pub fn remove_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.pending.retain(|key, entry| {
            let elapsed = now.duration_since(entry.created_at);
            if elapsed > self.ttl {
                tracing::debug!(
                    key = %key,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Expired correlation entry"
                );
                removed += 1;
                false
            } else {
                true
            }
        });

        removed
    }
}

/// Start the background expiry sweep.
///
/// Returns a handle the composition root aborts on shutdown.
pub fn spawn_cleanup(
    store: Arc<CorrelationStore>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let removed = store.remove_expired();
            if removed > 0 {
                tracing::info!(removed = removed, "Cleaned up expired correlation entries");
            }
        }
    })
}
