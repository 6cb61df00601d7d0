//! Contact domain model.
//!
//! # Responsibility
//! - Define the contact record shapes shared by the reconciler, search and
//!   presenter.
//! - Own the pure field validation rules applied before writes.
//!
//! # Invariants
//! - Every cached contact is identified by a service-assigned `ContactId`.

pub mod contact;
pub mod validation;
