//! Correlation keys
//!
//! A correlation key links an outbound downstream request to the inbound
//! callback that answers it. Keys are scoped per operation so a quote
//! callback can never resolve a party lookup that happens to reuse the
//! same identifier value.

use std::fmt;

use uuid::Uuid;

/// The facade operation a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    PartyLookup,
    Quote,
    Transfer,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::PartyLookup => "party-lookup",
            OperationKind::Quote => "quote",
            OperationKind::Transfer => "transfer",
        }
    }
}

/// Operation-scoped correlation key.
///
/// Quote and transfer keys are derived from freshly generated UUIDs and
/// are therefore single-use. The party lookup key is the party identifier
/// itself: the callback leg carries only that identifier, so a
/// gateway-generated nonce could not survive the round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationKey {
    kind: OperationKind,
    value: String,
}

impl CorrelationKey {
    pub fn party_lookup(party_identifier: &str) -> Self {
        Self {
            kind: OperationKind::PartyLookup,
            value: party_identifier.to_string(),
        }
    }

    pub fn quote(quote_id: Uuid) -> Self {
        Self {
            kind: OperationKind::Quote,
            value: quote_id.to_string(),
        }
    }

    pub fn transfer(transfer_id: Uuid) -> Self {
        Self {
            kind: OperationKind::Transfer,
            value: transfer_id.to_string(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_scoped_per_operation() {
        let id = Uuid::new_v4();
        let as_quote = CorrelationKey::quote(id);
        let as_transfer = CorrelationKey::transfer(id);

        assert_eq!(as_quote.value(), as_transfer.value());
        assert_ne!(as_quote, as_transfer);
    }

    #[test]
    fn test_display_includes_scope() {
        let key = CorrelationKey::party_lookup("4567");
        assert_eq!(key.to_string(), "party-lookup:4567");
    }
}
