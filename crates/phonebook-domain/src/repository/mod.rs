//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants to store contacts,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait ContactRepo     │  InMemoryContactRepo
//!   fn create()         │
//!   fn get_by_id()      │
//! ```

pub mod contact_repository;
