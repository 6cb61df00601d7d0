//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record mirrored from the directory service.
//! - Define the unsaved form-input shape submitted for create/replace.
//!
//! # Invariants
//! - A `Contact` always carries a service-assigned `ContactId`.
//! - A `ContactDraft` never carries an id; identity is supplied separately.
//! - Text fields tolerate out-of-band data on read (missing or null -> empty
//!   string, numbers and bools -> their JSON text).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque identifier assigned by the directory service.
///
/// The wire format allows any JSON number (negative and fractional included)
/// or a JSON string. Equality is textual, so `7` and `"7"` name the same
/// record. Unlike a loose JavaScript `==`, `"07"` and `7` stay distinct: string
/// ids are compared as written, never coerced to numbers.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
    Number(Number),
    Text(String),
}

impl PartialEq for ContactId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::Number(number), Self::Text(text)) | (Self::Text(text), Self::Number(number)) => {
                *text == number.to_string()
            }
        }
    }
}

impl Display for ContactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<u64> for ContactId {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl FromStr for ContactId {
    type Err = InvalidContactId;

    /// Parses user-typed ids. All-digit input becomes `Number`, anything else
    /// non-blank becomes `Text`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InvalidContactId);
        }
        if trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            if let Ok(number) = trimmed.parse::<u64>() {
                return Ok(Self::Number(number.into()));
            }
        }
        Ok(Self::Text(trimmed.to_string()))
    }
}

/// Returned when a blank string is parsed as a [`ContactId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidContactId;

impl Display for InvalidContactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("contact id cannot be blank")
    }
}

impl std::error::Error for InvalidContactId {}

/// Server-acknowledged contact record held by the local cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
}

impl Contact {
    pub fn new(
        id: impl Into<ContactId>,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Copies the editable fields back into form-input shape.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

/// Unsaved form input for create and full-replace requests.
///
/// Serialized as the request body; the id travels in the URL path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// Wire shape for records returned by the directory service.
///
/// `id` is optional on the wire even though the cache requires it; callers
/// decide whether a missing id is fatal or recoverable.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireContact {
    #[serde(default)]
    pub id: Option<ContactId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
}

impl WireContact {
    /// Promotes the wire record to a cached contact, using `fallback_id` when
    /// the service omitted the id.
    pub fn into_contact(self, fallback_id: Option<&ContactId>) -> Option<Contact> {
        let id = self.id.or_else(|| fallback_id.cloned())?;
        Some(Contact {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
        })
    }
}

/// Accepts any JSON value for a text field. `null` reads as empty; other
/// scalars keep their JSON text (`5551234567`, `true`).
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}
