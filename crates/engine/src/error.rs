use thiserror::Error;

use blindbox_core::{DomainError, DrawId, ListingId};
use blindbox_store::StoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure of a ledger operation, as surfaced to callers.
///
/// The first four variants are deterministic business failures; `Storage`
/// is the only internal/unexpected kind. Every variant means the operation
/// was rolled back in full — no partially applied state survives.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u64, available: u64 },

    #[error("insufficient owned units: requested {requested}, owned {owned}")]
    InsufficientOwnedUnits { requested: u64, owned: u64 },

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl From<DomainError> for EngineError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => EngineError::Validation(msg),
            DomainError::NotFound(what) => EngineError::NotFound(what),
            DomainError::InsufficientStock {
                requested,
                available,
            } => EngineError::InsufficientStock {
                requested,
                available,
            },
            DomainError::InsufficientOwnedUnits { requested, owned } => {
                EngineError::InsufficientOwnedUnits { requested, owned }
            }
        }
    }
}

impl EngineError {
    pub(crate) fn listing_not_found(id: ListingId) -> Self {
        Self::NotFound(format!("listing {id}"))
    }

    pub(crate) fn draw_not_found(id: DrawId) -> Self {
        Self::NotFound(format!("draw record {id}"))
    }
}

/// Every engine entry point takes at least one unit.
pub(crate) fn ensure_quantity(qty: u64) -> EngineResult<()> {
    if qty == 0 {
        return Err(EngineError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}
