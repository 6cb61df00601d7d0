//! Client-side contact search.
//!
//! # Responsibility
//! - Derive filtered views of the local cache from a query string.

pub mod filter;
