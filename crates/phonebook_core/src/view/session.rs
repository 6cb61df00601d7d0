//! Edit-session state for the contact form.
//!
//! # Invariants
//! - `editing_id == None` is add mode; `Some(id)` is update mode.
//! - Entering update mode requires the id to exist in the given cache.

use crate::model::contact::{Contact, ContactDraft, ContactId};

pub const ADD_LABEL: &str = "Add Contact";
pub const UPDATE_LABEL: &str = "Update Contact";

/// Form fields plus the id of the record being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    editing_id: Option<ContactId>,
    pub form: ContactDraft,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing_id(&self) -> Option<&ContactId> {
        self.editing_id.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Label for the submit control in the current mode.
    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            UPDATE_LABEL
        } else {
            ADD_LABEL
        }
    }

    /// Loads the contact `id` into the form and switches to update mode.
    ///
    /// Returns `false` and leaves the session untouched when `id` is not in
    /// `contacts`.
    pub fn begin_edit(&mut self, contacts: &[Contact], id: &ContactId) -> bool {
        let Some(contact) = contacts.iter().find(|contact| contact.id == *id) else {
            return false;
        };
        self.editing_id = Some(contact.id.clone());
        self.form = contact.to_draft();
        true
    }

    /// Clears the form and returns to add mode.
    pub fn reset(&mut self) {
        self.editing_id = None;
        self.form = ContactDraft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{EditSession, ADD_LABEL, UPDATE_LABEL};
    use crate::model::contact::{Contact, ContactId};

    #[test]
    fn begin_edit_populates_form_and_toggles_label() {
        let contacts = vec![Contact::new(2_u64, "Bo", "1112223333", "bo@x.com")];
        let mut session = EditSession::new();
        assert_eq!(session.submit_label(), ADD_LABEL);

        assert!(session.begin_edit(&contacts, &ContactId::Text("2".into())));
        assert_eq!(session.submit_label(), UPDATE_LABEL);
        assert_eq!(session.form.name, "Bo");
        assert_eq!(session.editing_id(), Some(&ContactId::from(2_u64)));

        session.reset();
        assert!(!session.is_editing());
        assert_eq!(session.form.name, "");
    }

    #[test]
    fn begin_edit_unknown_id_keeps_session() {
        let mut session = EditSession::new();
        session.form.name = "typed".to_string();
        assert!(!session.begin_edit(&[], &ContactId::from(9_u64)));
        assert_eq!(session.form.name, "typed");
        assert_eq!(session.submit_label(), ADD_LABEL);
    }
}
