//! Contact field validation.
//!
//! # Responsibility
//! - Check form input well-formedness before any network call.
//!
//! # Invariants
//! - Checks run in the order name -> phone -> email and stop at the first
//!   failure, so exactly one error is surfaced per submission.
//! - Validation is pure: no logging, no I/O.

use crate::model::contact::ContactDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// First validation failure found in a candidate contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `name` is empty after trimming.
    InvalidName,
    /// `phone` is not exactly 10 ASCII digits.
    InvalidPhone,
    /// `email` is not shaped like `local@domain.tld`.
    InvalidEmail,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => f.write_str("Name is required."),
            Self::InvalidPhone => f.write_str("Phone number must be exactly 10 digits."),
            Self::InvalidEmail => f.write_str("Please enter a valid email address."),
        }
    }
}

impl Error for ValidationError {}

/// Validates a candidate contact, returning the first failing field.
pub fn validate_contact(draft: &ContactDraft) -> Result<(), ValidationError> {
    if !is_valid_name(&draft.name) {
        return Err(ValidationError::InvalidName);
    }
    if !is_valid_phone(&draft.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    if !is_valid_email(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// No separators, no country code.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
