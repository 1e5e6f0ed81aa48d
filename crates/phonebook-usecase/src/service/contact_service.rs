//! Contact Service - Validation and orchestration over a ContactRepository
//!
//! The flow for every request:
//! 1. Validate: reject bad input before the store is touched
//! 2. Delegate: one repository call, one atomic step on the table
//! 3. Translate: "no result" outcomes become named errors
//!
//! Delete is the exception to step 3: a missing id is reported as
//! `false`, not as an error.

use std::sync::Arc;

use phonebook_domain::{
    Contact, ContactDraft, ContactId, ContactRepository, CreateOutcome, UpdateOutcome,
};
use tracing::{debug, info, warn};

use crate::error::{ContactServiceError, Result, ValidationError};

/// ContactService - the only entry point the transport layer talks to
///
/// Holds nothing but a shared handle to the repository.
pub struct ContactService<R> {
    repository: Arc<R>,
}

impl<R> Clone for ContactService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a contact, allocating an id unless a non-zero one is given.
    pub fn create_contact(&self, draft: &ContactDraft) -> Result<Contact> {
        validate_fields(draft).inspect_err(|e| warn!("create rejected: {}", e))?;

        if draft.id.is_some_and(|id| id.get() < 0) {
            warn!("create rejected: negative id {:?}", draft.id);
            return Err(ValidationError::NegativeId.into());
        }

        match self.repository.create(draft)? {
            CreateOutcome::Inserted(contact) => {
                info!(id = %contact.id(), "contact created");
                Ok(contact)
            }
            CreateOutcome::DuplicateId(id) => {
                warn!(%id, "create rejected: id already exists");
                Err(ContactServiceError::DuplicateId { id })
            }
        }
    }

    pub fn get_contact_by_id(&self, id: ContactId) -> Result<Contact> {
        require_positive(id)?;

        debug!(%id, "looking up contact");
        self.repository
            .get_by_id(id)?
            .ok_or(ContactServiceError::NotFound { id })
    }

    pub fn get_all_contacts(&self) -> Result<Vec<Contact>> {
        let contacts = self.repository.get_all()?;
        debug!(count = contacts.len(), "listed contacts");
        Ok(contacts)
    }

    /// Replace name, phone and address of an existing contact.
    pub fn update_contact(&self, draft: &ContactDraft) -> Result<Contact> {
        let id = match draft.id {
            Some(id) if id.is_positive() => id,
            _ => {
                warn!("update rejected: missing or non-positive id {:?}", draft.id);
                return Err(ValidationError::IdRequired.into());
            }
        };
        validate_fields(draft).inspect_err(|e| warn!(%id, "update rejected: {}", e))?;

        match self.repository.update(&Contact::from_draft(id, draft))? {
            UpdateOutcome::Updated(contact) => {
                info!(%id, "contact updated");
                Ok(contact)
            }
            UpdateOutcome::NotFound => Err(ContactServiceError::NotFound { id }),
        }
    }

    /// Delete a contact. `Ok(false)` means there was nothing to delete.
    pub fn delete_contact(&self, id: ContactId) -> Result<bool> {
        require_positive(id)?;

        let removed = self.repository.remove(id)?;
        if removed {
            info!(%id, "contact deleted");
        } else {
            debug!(%id, "delete found nothing");
        }
        Ok(removed)
    }
}

fn require_positive(id: ContactId) -> std::result::Result<(), ValidationError> {
    if id.is_positive() {
        Ok(())
    } else {
        warn!(%id, "rejected non-positive id");
        Err(ValidationError::InvalidId)
    }
}

fn validate_fields(draft: &ContactDraft) -> std::result::Result<(), ValidationError> {
    let fields = [
        ("Name", &draft.name),
        ("Phone", &draft.phone),
        ("Address", &draft.address),
    ];
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((field, _)) => Err(ValidationError::MissingField { field: *field }),
        None => Ok(()),
    }
}
