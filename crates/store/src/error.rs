use thiserror::Error;

/// Store operation error.
///
/// These are **infrastructure** failures (backend faults, lock poisoning,
/// key anomalies) as opposed to domain errors (validation, shortfalls).
/// Engines surface every variant to callers as a storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage failed.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// The store's lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// An insert collided with an existing row.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// An update or delete addressed a row that is not there.
    #[error("row not found: {0}")]
    RowMissing(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
