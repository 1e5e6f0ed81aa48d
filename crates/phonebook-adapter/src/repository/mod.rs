//! Storage Adapters - Repository implementations
//!
//! These implement the repository traits from phonebook-domain.

pub mod in_memory;
