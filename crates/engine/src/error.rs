//! Unified pipeline error type.
//!
//! Aggregates the failure taxonomy of every entry workflow so callers can
//! handle errors uniformly. Upstream generation failures never appear
//! here: they degrade to empty URLs inside the workflows instead of
//! propagating.

use bondling_domain::DomainError;
use thiserror::Error;

use crate::infrastructure::ports::RepoError;

#[derive(Debug, Error)]
pub enum PetError {
    /// Caller does not own the target contact. Fatal, never retried.
    #[error("Permission denied: caller does not own contact {contact_id}")]
    PermissionDenied { contact_id: String },

    /// Contact or pet missing. Fatal, never retried.
    #[error("Not found: {entity_type} {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Not enough evolution tokens for the requested customization.
    #[error("Insufficient evolution tokens: need {required}, have {available}")]
    InsufficientTokens { required: u32, available: u32 },

    /// Contact storage failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PetError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn permission_denied(contact_id: impl Into<String>) -> Self {
        Self::PermissionDenied {
            contact_id: contact_id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<RepoError> for PetError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            RepoError::Storage(msg) => Self::Storage(msg),
        }
    }
}

impl From<DomainError> for PetError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InsufficientTokens {
                required,
                available,
            } => Self::InsufficientTokens {
                required,
                available,
            },
            DomainError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            other => Self::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_not_found_maps_to_pet_not_found() {
        let err: PetError = RepoError::not_found("Contact", "abc").into();
        assert!(err.is_not_found());
    }

    #[test]
    fn domain_insufficient_tokens_maps_through() {
        let err: PetError = DomainError::InsufficientTokens {
            required: 1,
            available: 0,
        }
        .into();
        assert!(matches!(
            err,
            PetError::InsufficientTokens {
                required: 1,
                available: 0
            }
        ));
    }
}
