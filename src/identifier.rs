//! # Identifiers
//!
//! Presentations carry three single-use identifiers (`nonce`, `jti` and the
//! inner `vp.id`). They are drawn from an [`IdGenerator`] so callers can
//! substitute a deterministic source in tests.

use uuid::Uuid;

/// Source of fresh, unique identifiers.
pub trait IdGenerator: Send + Sync {
    /// Return a new identifier. Implementations must never repeat a value.
    fn generate(&self) -> Uuid;
}

/// Random (version 4) UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
