//! Error types for the contact use cases

use phonebook_domain::{ContactId, RepositoryError};
use thiserror::Error;

/// Input rejected before the store is touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Invalid ID")]
    InvalidId,

    #[error("Invalid ID: ID must be positive or zero")]
    NegativeId,

    #[error("Valid ID is required")]
    IdRequired,
}

/// Errors surfaced by `ContactService`
#[derive(Debug, Error)]
pub enum ContactServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Contact not found")]
    NotFound { id: ContactId },

    #[error("Failed to create contact: ID already exists")]
    DuplicateId { id: ContactId },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, ContactServiceError>;
