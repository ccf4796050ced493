//! Messages placed on relay transports.

pub mod envelope;
