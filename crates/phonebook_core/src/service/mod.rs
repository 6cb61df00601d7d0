//! Core use-case services.
//!
//! # Responsibility
//! - Keep the local contact cache consistent with the remote directory.
//! - Keep UI/CLI layers decoupled from transport details.

pub mod cache;
pub mod reconciler;
