//! # Phonebook Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `controller/` - Inbound adapters (HTTP)
//! - `repository/` - Storage implementations

pub mod controller;
pub mod repository;

pub use controller::http::{router, ApiError, ContactDto, ErrorDto};
pub use repository::in_memory::InMemoryContactRepository;
