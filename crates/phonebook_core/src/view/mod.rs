//! Presentation-side state.
//!
//! # Responsibility
//! - Project contacts into display rows with id-keyed actions.
//! - Track add-vs-update form mode.
//!
//! # Invariants
//! - Nothing here writes the contact cache.

pub mod presenter;
pub mod session;
