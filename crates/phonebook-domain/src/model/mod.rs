//! Domain Models
//!
//! A phone directory only knows one thing: the contact.

pub mod contact;
