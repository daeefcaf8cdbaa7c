//! # nimbus-core
//! Foundation types for the Nimbus proof-of-importance protocol.

pub mod account;
pub mod constants;
pub mod error;
pub mod types;
