//! Core logic for the phonebook client.
//! This crate owns the contact cache and every rule applied to it; the remote
//! directory owns persistence.

pub mod app;
pub mod config;
pub mod logging;
pub mod model;
pub mod remote;
pub mod search;
pub mod service;
pub mod view;

pub use app::{AppError, AppResult, PhonebookApp};
pub use config::{ClientConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::contact::{Contact, ContactDraft, ContactId, InvalidContactId};
pub use model::validation::{validate_contact, ValidationError};
pub use remote::directory::{ContactDirectory, RemoteError, RemoteResult};
pub use remote::http::HttpContactDirectory;
pub use remote::memory::{DirectoryOperation, DirectoryRequest, InMemoryDirectory};
pub use search::filter::filter_contacts;
pub use service::cache::ContactCache;
pub use service::reconciler::{ReconcileError, ReconcileResult, Reconciler};
pub use view::presenter::{present, ContactListView, ContactRow, RowAction, RowActionKind};
pub use view::session::EditSession;

/// Version of this crate, reported by the CLI at startup.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
