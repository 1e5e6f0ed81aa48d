//! Application Services

pub mod contact_service;
