//! Contact Repository - Abstract storage for Contacts
//!
//! Expected outcomes (duplicate id, missing id) are reported through
//! the return values. `RepositoryError` is only for the store itself
//! failing.

use crate::model::contact::{Contact, ContactDraft, ContactId};

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A previous holder of the table lock panicked
    LockPoisoned,
    /// No unused id is left to allocate
    IdSpaceExhausted,
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::LockPoisoned => {
                write!(f, "Contact table lock is poisoned")
            }
            RepositoryError::IdSpaceExhausted => {
                write!(f, "No contact id left to allocate")
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Result of `ContactRepository::create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Stored; carries a copy of the stored record with its final id
    Inserted(Contact),
    /// The explicit id is already taken; nothing was written
    DuplicateId(ContactId),
}

/// Result of `ContactRepository::update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Replaced in place; carries a copy of the updated record
    Updated(Contact),
    NotFound,
}

/// Contact Repository Trait
///
/// This is a PORT in hexagonal architecture.
///
/// Every method takes `&self`: implementations are shared between
/// request handlers and serialize access internally. All returned
/// contacts are copies, so callers can never mutate the store.
pub trait ContactRepository: Send + Sync {
    /// Insert a new contact.
    ///
    /// A draft without an id (or with id zero) gets the next id from
    /// the store's sequence. An explicit id is used as-is unless it
    /// already exists.
    fn create(&self, draft: &ContactDraft) -> Result<CreateOutcome, RepositoryError>;

    /// Find a contact by ID
    fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>, RepositoryError>;

    /// Snapshot of every stored contact
    fn get_all(&self) -> Result<Vec<Contact>, RepositoryError>;

    /// Replace name, phone and address of the contact with `contact.id()`.
    fn update(&self, contact: &Contact) -> Result<UpdateOutcome, RepositoryError>;

    /// Delete a contact; `true` only if something was removed.
    fn remove(&self, id: ContactId) -> Result<bool, RepositoryError>;

    /// Count all contacts
    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.get_all()?.len())
    }
}
