//! In-memory [`ContactDirectory`] for tests and offline smoke runs.
//!
//! # Responsibility
//! - Behave like a well-formed contacts collection without a network.
//! - Let callers script one-shot failures per operation.
//! - Record every request so callers can assert create-vs-replace choices.
//!
//! # Invariants
//! - Assigned ids are numeric and increase monotonically.
//! - A scripted failure is consumed by the next matching call and leaves the
//!   stored records untouched.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::remote::directory::{ContactDirectory, RemoteError, RemoteResult};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Directory operation kinds, used for failure scripting and request logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryOperation {
    List,
    Create,
    Replace,
    Delete,
}

/// One request observed by [`InMemoryDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRequest {
    pub operation: DirectoryOperation,
    pub id: Option<ContactId>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    records: Vec<Contact>,
    next_id: u64,
    failures: VecDeque<(DirectoryOperation, RemoteError)>,
    requests: Vec<DirectoryRequest>,
}

/// Single-threaded fake of the remote contacts collection.
#[derive(Debug)]
pub struct InMemoryDirectory {
    state: RefCell<DirectoryState>,
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::with_contacts(Vec::new())
    }

    /// Seeds stored records. New ids start after the largest numeric id.
    pub fn with_contacts(records: Vec<Contact>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|contact| match &contact.id {
                ContactId::Number(value) => value.as_u64(),
                ContactId::Text(value) => value.parse::<u64>().ok(),
            })
            .max()
            .map_or(1, |max| max + 1);
        Self {
            state: RefCell::new(DirectoryState {
                records,
                next_id,
                ..DirectoryState::default()
            }),
        }
    }

    /// Makes the next call of `operation` fail with `error`.
    pub fn fail_next(&self, operation: DirectoryOperation, error: RemoteError) {
        self.state
            .borrow_mut()
            .failures
            .push_back((operation, error));
    }

    /// Inserts a record directly, bypassing the request log. Simulates
    /// out-of-band writers.
    pub fn insert_out_of_band(&self, contact: Contact) {
        self.state.borrow_mut().records.push(contact);
    }

    /// Snapshot of the stored records in server order.
    pub fn records(&self) -> Vec<Contact> {
        self.state.borrow().records.clone()
    }

    pub fn requests(&self) -> Vec<DirectoryRequest> {
        self.state.borrow().requests.clone()
    }

    fn begin(&self, operation: DirectoryOperation, id: Option<&ContactId>) -> RemoteResult<()> {
        let mut state = self.state.borrow_mut();
        state.requests.push(DirectoryRequest {
            operation,
            id: id.cloned(),
        });
        let scripted = state
            .failures
            .iter()
            .position(|(kind, _)| *kind == operation);
        match scripted.and_then(|index| state.failures.remove(index)) {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }
}

impl ContactDirectory for InMemoryDirectory {
    fn list_contacts(&self) -> RemoteResult<Vec<Contact>> {
        self.begin(DirectoryOperation::List, None)?;
        Ok(self.records())
    }

    fn create_contact(&self, draft: &ContactDraft) -> RemoteResult<Contact> {
        self.begin(DirectoryOperation::Create, None)?;
        let mut state = self.state.borrow_mut();
        let id = ContactId::from(state.next_id);
        state.next_id += 1;
        let contact = Contact {
            id,
            name: draft.name.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
        };
        state.records.push(contact.clone());
        Ok(contact)
    }

    fn replace_contact(&self, id: &ContactId, draft: &ContactDraft) -> RemoteResult<Contact> {
        self.begin(DirectoryOperation::Replace, Some(id))?;
        let mut state = self.state.borrow_mut();
        let Some(stored) = state.records.iter_mut().find(|contact| contact.id == *id) else {
            return Err(RemoteError::Status(404));
        };
        stored.name = draft.name.clone();
        stored.phone = draft.phone.clone();
        stored.email = draft.email.clone();
        Ok(stored.clone())
    }

    fn delete_contact(&self, id: &ContactId) -> RemoteResult<()> {
        self.begin(DirectoryOperation::Delete, Some(id))?;
        let mut state = self.state.borrow_mut();
        let Some(index) = state.records.iter().position(|contact| contact.id == *id) else {
            return Err(RemoteError::Status(404));
        };
        state.records.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DirectoryOperation, InMemoryDirectory};
    use crate::model::contact::{Contact, ContactDraft, ContactId};
    use crate::remote::directory::{ContactDirectory, RemoteError};

    #[test]
    fn assigns_ids_after_seeded_maximum() {
        let directory = InMemoryDirectory::with_contacts(vec![
            Contact::new(4_u64, "Ann", "1234567890", "a@x.com"),
            Contact::new("9", "Bo", "1234567891", "b@x.com"),
        ]);
        let created = directory
            .create_contact(&ContactDraft::new("Cy", "1234567892", "c@x.com"))
            .unwrap();
        assert_eq!(created.id, ContactId::from(10_u64));
    }

    #[test]
    fn scripted_failure_is_consumed_once() {
        let directory = InMemoryDirectory::new();
        directory.fail_next(DirectoryOperation::List, RemoteError::Status(503));

        assert_eq!(directory.list_contacts(), Err(RemoteError::Status(503)));
        assert_eq!(directory.list_contacts(), Ok(Vec::new()));
        assert_eq!(directory.requests().len(), 2);
    }
}
