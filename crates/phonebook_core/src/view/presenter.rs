//! Contact list projection.
//!
//! # Responsibility
//! - Turn an ordered contact sequence into display rows.
//! - Resolve row actions (edit/delete) to record ids without embedding ids in
//!   rendered text.
//!
//! # Invariants
//! - Every `present` call builds a fresh view; nothing is carried over.
//! - Row numbers are 1-based and follow input order.

use crate::model::contact::{Contact, ContactId};
use std::fmt::Write as _;

/// Per-row trigger kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    Edit,
    Delete,
}

/// Action resolved from a rendered row, carrying the record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Edit(ContactId),
    Delete(ContactId),
}

/// One rendered contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    /// 1-based display position.
    pub row: usize,
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactRow {
    pub fn action(&self, kind: RowActionKind) -> RowAction {
        match kind {
            RowActionKind::Edit => RowAction::Edit(self.id.clone()),
            RowActionKind::Delete => RowAction::Delete(self.id.clone()),
        }
    }
}

/// Fully rendered contact list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactListView {
    pub rows: Vec<ContactRow>,
}

impl ContactListView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Maps a displayed row number to the action for its record.
    ///
    /// Returns `None` for row numbers outside the view.
    pub fn action_for(&self, row: usize, kind: RowActionKind) -> Option<RowAction> {
        let index = row.checked_sub(1)?;
        self.rows.get(index).map(|entry| entry.action(kind))
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        if self.rows.is_empty() {
            return "No contacts.\n".to_string();
        }

        let mut out = String::new();
        for row in &self.rows {
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{:>3}. {}\n     Phone: {}\n     Email: {}",
                row.row, row.name, row.phone, row.email
            );
        }
        out
    }
}

/// Builds a view of `contacts` in the given order.
pub fn present<'a, I>(contacts: I) -> ContactListView
where
    I: IntoIterator<Item = &'a Contact>,
{
    let rows = contacts
        .into_iter()
        .enumerate()
        .map(|(index, contact)| ContactRow {
            row: index + 1,
            id: contact.id.clone(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
        })
        .collect();
    ContactListView { rows }
}
