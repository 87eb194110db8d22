//! Error types for network reconciliation

use thiserror::Error;

/// Errors raised while reconciling cluster networking resources.
///
/// Provider failures are surfaced as they come back from the client; lifecycle
/// operations never retry or rewrap them.
#[derive(Error, Debug)]
pub enum InfraError {
    /// A requested resource (image, zone, running instance, ready master) does not exist
    #[error("{kind} not found: {detail}")]
    NotFound { kind: &'static str, detail: String },

    /// The cloud provider rejected a call
    #[error("{operation} failed: {message}")]
    Provider {
        operation: &'static str,
        message: String,
    },

    /// The provider answered without an error but refused the action
    #[error("{0}")]
    Policy(String),

    #[error("Status store error: {0}")]
    Store(String),
}

impl InfraError {
    pub fn not_found(kind: &'static str, detail: impl Into<String>) -> Self {
        InfraError::NotFound {
            kind,
            detail: detail.into(),
        }
    }

    pub fn provider(operation: &'static str, message: impl Into<String>) -> Self {
        InfraError::Provider {
            operation,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InfraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_resource() {
        let err = InfraError::not_found("image", "not find this image: 'ami-123'");
        assert_eq!(
            err.to_string(),
            "image not found: not find this image: 'ami-123'"
        );
    }

    #[test]
    fn test_provider_message_keeps_operation() {
        let err = InfraError::provider("DeleteVpc", "DependencyViolation");
        assert_eq!(err.to_string(), "DeleteVpc failed: DependencyViolation");
    }
}
