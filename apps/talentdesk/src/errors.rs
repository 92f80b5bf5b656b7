use serde_json::{json, Value};
use thiserror::Error;

/// Application-level error type.
/// Every store, cache and session operation returns `Result<T, AppError>`;
/// the View Layer renders failures through `to_body()`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    #[error("Malformed cached state under '{key}': {reason}")]
    MalformedCachedState { key: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot {action} section {section} while it is {from}")]
    InvalidTransition {
        section: String,
        from: String,
        action: &'static str,
    },

    #[error("Version conflict on '{key}': expected revision {expected}, found {found}")]
    VersionConflict {
        key: String,
        expected: u64,
        found: u64,
    },

    #[error("Enhancement run cancelled")]
    Cancelled,

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        AppError::MalformedCachedState {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable machine-readable code for the View Layer.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DuplicateIdentity(_) => "DUPLICATE_IDENTITY",
            AppError::MalformedCachedState { .. } => "MALFORMED_CACHED_STATE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AppError::VersionConflict { .. } => "VERSION_CONFLICT",
            AppError::Cancelled => "CANCELLED",
            AppError::Cache(_) => "CACHE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Builds the `{"error": {"code", "message"}}` payload shown to the user.
    /// Infrastructure failures are logged and masked.
    pub fn to_body(&self) -> Value {
        let message = match self {
            AppError::Cache(e) => {
                tracing::error!("Cache error: {e}");
                "A storage error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_body_carries_message() {
        let body = AppError::NotFound("Candidate nonexistent".to_string()).to_body();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Not found: Candidate nonexistent");
    }

    #[test]
    fn test_internal_error_is_masked() {
        let body = AppError::Internal(anyhow::anyhow!("lock poisoned")).to_body();
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = AppError::InvalidTransition {
            section: "summary".to_string(),
            from: "editing".to_string(),
            action: "accept",
        };
        assert_eq!(
            err.to_string(),
            "Cannot accept section summary while it is editing"
        );
        assert_eq!(err.code(), "INVALID_TRANSITION");
    }
}
