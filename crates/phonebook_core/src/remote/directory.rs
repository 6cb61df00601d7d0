//! Directory service contract.
//!
//! # Responsibility
//! - Define the list/create/replace/delete operations the reconciler needs
//!   from the remote contacts collection.
//! - Define transport-agnostic failure semantics.
//!
//! # Invariants
//! - Any non-2xx response is a failure, never a partial success.
//! - Returned contacts always carry an id.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure reported by a directory implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Request never produced a response (DNS, connect, TLS, I/O).
    Transport(String),
    /// Service answered with a non-2xx status.
    Status(u16),
    /// Response body was not the expected JSON shape.
    Decode(String),
    /// Create acknowledgement did not include the assigned id.
    MissingId,
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "request failed: {message}"),
            Self::Status(status) => write!(f, "service responded with HTTP {status}"),
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
            Self::MissingId => f.write_str("service response is missing the contact id"),
        }
    }
}

impl Error for RemoteError {}

/// Remote contacts collection.
///
/// Implementations are used sequentially; a call returns only once the
/// service has answered or the transport gave up.
pub trait ContactDirectory {
    /// Fetches the full collection in server order.
    fn list_contacts(&self) -> RemoteResult<Vec<Contact>>;
    /// Creates a record and returns the stored representation with its id.
    fn create_contact(&self, draft: &ContactDraft) -> RemoteResult<Contact>;
    /// Fully replaces the record at `id` and returns the stored representation.
    fn replace_contact(&self, id: &ContactId, draft: &ContactDraft) -> RemoteResult<Contact>;
    /// Deletes the record at `id`. Success is judged by status only.
    fn delete_contact(&self, id: &ContactId) -> RemoteResult<()>;
}

impl<D: ContactDirectory + ?Sized> ContactDirectory for &D {
    fn list_contacts(&self) -> RemoteResult<Vec<Contact>> {
        (**self).list_contacts()
    }

    fn create_contact(&self, draft: &ContactDraft) -> RemoteResult<Contact> {
        (**self).create_contact(draft)
    }

    fn replace_contact(&self, id: &ContactId, draft: &ContactDraft) -> RemoteResult<Contact> {
        (**self).replace_contact(id, draft)
    }

    fn delete_contact(&self, id: &ContactId) -> RemoteResult<()> {
        (**self).delete_contact(id)
    }
}

impl<D: ContactDirectory + ?Sized> ContactDirectory for Box<D> {
    fn list_contacts(&self) -> RemoteResult<Vec<Contact>> {
        (**self).list_contacts()
    }

    fn create_contact(&self, draft: &ContactDraft) -> RemoteResult<Contact> {
        (**self).create_contact(draft)
    }

    fn replace_contact(&self, id: &ContactId, draft: &ContactDraft) -> RemoteResult<Contact> {
        (**self).replace_contact(id, draft)
    }

    fn delete_contact(&self, id: &ContactId) -> RemoteResult<()> {
        (**self).delete_contact(id)
    }
}
