//! Cache reconciliation against the remote directory.
//!
//! # Responsibility
//! - Issue list/create/replace/delete calls to the directory.
//! - Apply each acknowledged outcome to the local cache exactly once.
//!
//! # Invariants
//! - The cache is written only after the directory acknowledged success.
//! - A failed call leaves the cache byte-for-byte unchanged.
//! - Create-vs-replace is decided by the caller-supplied id alone; the cache
//!   is never probed to pick the request kind.
//! - Mutating operations take `&mut self`, so at most one write is in flight.
//!
//! # See also
//! - `crate::app` for how failures are surfaced to the user.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::remote::directory::{ContactDirectory, RemoteError};
use crate::service::cache::ContactCache;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Remote operation that did not succeed. The cache was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Listing the collection failed.
    FetchFailure(RemoteError),
    /// Create or replace failed.
    SaveFailure(RemoteError),
    /// Delete failed.
    DeleteFailure(RemoteError),
}

impl ReconcileError {
    pub fn remote(&self) -> &RemoteError {
        match self {
            Self::FetchFailure(err) | Self::SaveFailure(err) | Self::DeleteFailure(err) => err,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Self::FetchFailure(_) => "Error fetching contacts: ",
            Self::SaveFailure(_) => "Error saving contact: ",
            Self::DeleteFailure(_) => "Error deleting contact: ",
        }
    }

    fn status_summary(&self) -> &'static str {
        match self {
            Self::FetchFailure(_) => "Failed to fetch contacts",
            Self::SaveFailure(_) => "Failed to save contact",
            Self::DeleteFailure(_) => "Failed to delete contact",
        }
    }

    fn error_code(&self) -> &'static str {
        match self.remote() {
            RemoteError::Transport(_) => "transport",
            RemoteError::Status(_) => "status",
            RemoteError::Decode(_) => "decode",
            RemoteError::MissingId => "missing_id",
        }
    }
}

impl Display for ReconcileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())?;
        match self.remote() {
            RemoteError::Status(status) => {
                write!(f, "{} (HTTP {status})", self.status_summary())
            }
            other => write!(f, "{other}"),
        }
    }
}

impl Error for ReconcileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.remote())
    }
}

/// Sole writer of the local contact cache.
pub struct Reconciler<D: ContactDirectory> {
    directory: D,
    cache: ContactCache,
}

impl<D: ContactDirectory> Reconciler<D> {
    /// Creates a reconciler with an empty cache.
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            cache: ContactCache::new(),
        }
    }

    /// Read-only view of the cache in display order.
    pub fn contacts(&self) -> &[Contact] {
        self.cache.as_slice()
    }

    pub fn cache(&self) -> &ContactCache {
        &self.cache
    }

    /// Replaces the cache wholesale with the directory's collection.
    ///
    /// # Errors
    /// - `FetchFailure` when the list request fails; the cache is kept.
    pub fn load_all(&mut self) -> ReconcileResult<&[Contact]> {
        let started_at = Instant::now();
        match self.directory.list_contacts() {
            Ok(contacts) => {
                self.cache.replace_all(contacts);
                info!(
                    "event=contacts_load module=reconciler status=ok count={} duration_ms={}",
                    self.cache.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(self.cache.as_slice())
            }
            Err(err) => Err(self.fail(
                ReconcileError::FetchFailure(err),
                "contacts_load",
                started_at,
            )),
        }
    }

    /// Creates (`existing_id = None`) or fully replaces a contact, then upserts
    /// the acknowledged record.
    ///
    /// Returns the canonical record as stored by the directory.
    ///
    /// # Errors
    /// - `SaveFailure` when the request fails; nothing is inserted locally.
    pub fn save(
        &mut self,
        candidate: &ContactDraft,
        existing_id: Option<&ContactId>,
    ) -> ReconcileResult<Contact> {
        let started_at = Instant::now();
        let mode = if existing_id.is_some() { "replace" } else { "create" };
        let result = match existing_id {
            Some(id) => self.directory.replace_contact(id, candidate),
            None => self.directory.create_contact(candidate),
        };
        let saved = match result {
            Ok(saved) => saved,
            Err(err) => {
                return Err(self.fail(
                    ReconcileError::SaveFailure(err),
                    "contact_save",
                    started_at,
                ));
            }
        };

        match existing_id {
            Some(id) => {
                if !self.cache.replace(id, saved.clone()) {
                    debug!(
                        "event=contact_save module=reconciler status=cache_miss mode=replace id={}",
                        id
                    );
                }
            }
            None => self.cache.push(saved.clone()),
        }
        info!(
            "event=contact_save module=reconciler status=ok mode={} id={} duration_ms={}",
            mode,
            saved.id,
            started_at.elapsed().as_millis()
        );
        Ok(saved)
    }

    /// Deletes a contact and drops the first matching cache entry.
    ///
    /// # Errors
    /// - `DeleteFailure` when the request fails; the entry stays cached.
    pub fn remove(&mut self, id: &ContactId) -> ReconcileResult<()> {
        let started_at = Instant::now();
        if let Err(err) = self.directory.delete_contact(id) {
            return Err(self.fail(
                ReconcileError::DeleteFailure(err),
                "contact_delete",
                started_at,
            ));
        }

        if !self.cache.remove_first(id) {
            debug!(
                "event=contact_delete module=reconciler status=cache_miss id={}",
                id
            );
        }
        info!(
            "event=contact_delete module=reconciler status=ok id={} duration_ms={}",
            id,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn fail(&self, err: ReconcileError, event: &str, started_at: Instant) -> ReconcileError {
        warn!(
            "event={} module=reconciler status=error duration_ms={} error_code={} error={}",
            event,
            started_at.elapsed().as_millis(),
            err.error_code(),
            err.remote()
        );
        err
    }
}
