//! Error-kind mapping at the facade boundary.

use serde::Serialize;

use blindbox_core::DomainError;
use blindbox_engine::EngineError;

/// Operation failure as handed to the HTTP layer: a stable machine-readable
/// kind plus a human-readable message.
///
/// `storage_error` is the one kind worth alerting on; everything else is a
/// deterministic business rejection.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub kind: &'static str,
    pub message: String,
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let kind = match &err {
            EngineError::Validation(_) => "validation_error",
            EngineError::NotFound(_) => "not_found",
            EngineError::InsufficientStock { .. } => "insufficient_stock",
            EngineError::InsufficientOwnedUnits { .. } => "insufficient_owned_units",
            EngineError::Storage(_) => "storage_error",
        };

        match &err {
            EngineError::Storage(cause) => {
                tracing::error!(%cause, "storage failure surfaced to caller");
            }
            _ => tracing::debug!(error = %err, "operation rejected"),
        }

        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from(EngineError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blindbox_store::StoreError;

    #[test]
    fn kinds_match_the_error_taxonomy() {
        let err = ApiError::from(EngineError::Validation("bad".into()));
        assert_eq!(err.kind, "validation_error");

        let err = ApiError::from(EngineError::NotFound("listing x".into()));
        assert_eq!(err.kind, "not_found");

        let err = ApiError::from(EngineError::InsufficientStock {
            requested: 2,
            available: 1,
        });
        assert_eq!(err.kind, "insufficient_stock");

        let err = ApiError::from(EngineError::InsufficientOwnedUnits {
            requested: 2,
            owned: 0,
        });
        assert_eq!(err.kind, "insufficient_owned_units");

        let err = ApiError::from(EngineError::Storage(StoreError::backend("down")));
        assert_eq!(err.kind, "storage_error");
        assert!(err.message.contains("down"));
    }
}
