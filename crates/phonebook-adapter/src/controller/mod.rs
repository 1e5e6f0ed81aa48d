//! Inbound Adapters - Transports that drive the ContactService

pub mod http;
