//! Remote directory access.
//!
//! # Responsibility
//! - Define the contract for the external contacts collection.
//! - Provide the HTTP implementation and an in-memory stand-in.
//!
//! # Invariants
//! - Nothing in this layer touches the local cache; reconciliation belongs to
//!   the service layer.

pub mod directory;
pub mod http;
pub mod memory;
