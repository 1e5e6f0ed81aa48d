//! # Phonebook Use Case Layer
//!
//! Application-specific business rules.
//! `ContactService` validates requests, delegates to a `ContactRepository`
//! and turns "no result" outcomes into named errors for the transport.

pub mod error;
pub mod service;

pub use phonebook_domain;

pub use error::{ContactServiceError, Result, ValidationError};
pub use service::contact_service::ContactService;
