//! Address-book controller.
//!
//! # Responsibility
//! - Wire validator, reconciler, search and presenter behind user actions.
//! - Own the error-message text, search query and current list view.
//!
//! # Invariants
//! - Every failure is caught here and replaces the error-message text; a
//!   success clears it.
//! - Validation failures abort a submit before any directory call.
//! - After a successful write the view shows the full cache and the search
//!   query is cleared.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::model::validation::{validate_contact, ValidationError};
use crate::remote::directory::ContactDirectory;
use crate::search::filter::filter_contacts;
use crate::service::reconciler::{ReconcileError, Reconciler};
use crate::view::presenter::{present, ContactListView, RowAction, RowActionKind};
use crate::view::session::EditSession;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AppResult<T> = Result<T, AppError>;

/// Failure surfaced to the user by [`PhonebookApp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Validation(ValidationError),
    Remote(ReconcileError),
    /// A row number that is not on screen.
    UnknownRow(usize),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Remote(err) => write!(f, "{err}"),
            Self::UnknownRow(row) => write!(f, "No contact at row {row}."),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Remote(err) => Some(err),
            Self::UnknownRow(_) => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ReconcileError> for AppError {
    fn from(value: ReconcileError) -> Self {
        Self::Remote(value)
    }
}

/// Controller behind the form, search box and contact list.
pub struct PhonebookApp<D: ContactDirectory> {
    reconciler: Reconciler<D>,
    session: EditSession,
    query: String,
    error_message: String,
    view: ContactListView,
}

impl<D: ContactDirectory> PhonebookApp<D> {
    pub fn new(directory: D) -> Self {
        Self {
            reconciler: Reconciler::new(directory),
            session: EditSession::new(),
            query: String::new(),
            error_message: String::new(),
            view: ContactListView::default(),
        }
    }

    /// Loads the collection and renders it.
    pub fn init(&mut self) -> AppResult<()> {
        match self.reconciler.load_all().map(|_| ()) {
            Ok(()) => {
                self.show_all();
                Ok(())
            }
            Err(err) => Err(self.report(err.into())),
        }
    }

    /// Validates the form and creates or updates the contact it describes.
    ///
    /// On success the form is reset to add mode.
    pub fn submit(&mut self) -> AppResult<Contact> {
        if let Err(err) = validate_contact(&self.session.form) {
            return Err(self.report(err.into()));
        }

        let saved = self
            .reconciler
            .save(&self.session.form, self.session.editing_id());
        match saved {
            Ok(contact) => {
                self.session.reset();
                self.show_all();
                Ok(contact)
            }
            Err(err) => Err(self.report(err.into())),
        }
    }

    /// Replaces the form fields with `draft`, keeping the current mode, and
    /// submits.
    pub fn submit_draft(&mut self, draft: ContactDraft) -> AppResult<Contact> {
        self.session.form = draft;
        self.submit()
    }

    /// Starts editing `id`. Returns `false` when it is not cached.
    pub fn edit(&mut self, id: &ContactId) -> bool {
        let found = self.session.begin_edit(self.reconciler.contacts(), id);
        if !found {
            debug!("event=contact_edit module=app status=not_found id={}", id);
        }
        found
    }

    /// Abandons the current edit and clears the form.
    pub fn cancel_edit(&mut self) {
        self.session.reset();
    }

    pub fn delete(&mut self, id: &ContactId) -> AppResult<()> {
        match self.reconciler.remove(id) {
            Ok(()) => {
                self.show_all();
                Ok(())
            }
            Err(err) => Err(self.report(err.into())),
        }
    }

    /// Runs the edit or delete trigger of a displayed row.
    pub fn trigger_row(&mut self, row: usize, kind: RowActionKind) -> AppResult<()> {
        let Some(action) = self.view.action_for(row, kind) else {
            return Err(self.report(AppError::UnknownRow(row)));
        };
        match action {
            RowAction::Edit(id) => {
                self.edit(&id);
                Ok(())
            }
            RowAction::Delete(id) => self.delete(&id),
        }
    }

    /// Re-renders the list filtered by `query`. The cache is not touched.
    pub fn search(&mut self, query: &str) -> &ContactListView {
        self.query = query.to_string();
        self.view = present(filter_contacts(self.reconciler.contacts(), &self.query));
        &self.view
    }

    pub fn visible(&self) -> &ContactListView {
        &self.view
    }

    pub fn contacts(&self) -> &[Contact] {
        self.reconciler.contacts()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current error-message text; empty when the last action succeeded.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn submit_label(&self) -> &'static str {
        self.session.submit_label()
    }

    fn show_all(&mut self) {
        self.query.clear();
        self.view = present(self.reconciler.contacts());
        self.error_message.clear();
    }

    fn report(&mut self, err: AppError) -> AppError {
        self.error_message = err.to_string();
        err
    }
}
