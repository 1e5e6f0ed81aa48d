//! # Phonebook Domain Layer
//!
//! The vocabulary of the phone directory with zero external dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Contact entity, ContactId, ContactDraft       ││
//! │  │  repository/- ContactRepository port + outcome types        ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation rules live one layer up in `phonebook-usecase`.
//! Storage lives one layer out in `phonebook-adapter`.

pub mod model;
pub mod repository;

// Re-export commonly used types
pub use model::contact::{Contact, ContactDraft, ContactId};

pub use repository::contact_repository::{
    ContactRepository, CreateOutcome, RepositoryError, UpdateOutcome,
};
