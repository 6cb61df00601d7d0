//! Local mirror of server-acknowledged contacts.
//!
//! # Invariants
//! - Order is server order for loaded records, then acknowledgement order for
//!   created ones.
//! - Mutators are crate-private; only the reconciler writes.

use crate::model::contact::{Contact, ContactId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactCache {
    entries: Vec<Contact>,
}

impl ContactCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.entries.iter().find(|contact| contact.id == *id)
    }

    pub fn position(&self, id: &ContactId) -> Option<usize> {
        self.entries.iter().position(|contact| contact.id == *id)
    }

    pub(crate) fn replace_all(&mut self, entries: Vec<Contact>) {
        self.entries = entries;
    }

    pub(crate) fn push(&mut self, contact: Contact) {
        self.entries.push(contact);
    }

    /// Replaces the entry at `id` in place. Returns `false` when absent.
    pub(crate) fn replace(&mut self, id: &ContactId, contact: Contact) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries[index] = contact;
                true
            }
            None => false,
        }
    }

    /// Removes the first entry matching `id`. Returns `false` when absent.
    pub(crate) fn remove_first(&mut self, id: &ContactId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }
}
