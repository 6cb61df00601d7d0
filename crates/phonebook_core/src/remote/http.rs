//! HTTP implementation of [`ContactDirectory`].
//!
//! # Responsibility
//! - Map directory operations onto GET/POST/PUT/DELETE requests.
//! - Translate transport, status and body failures into `RemoteError`.
//!
//! # Invariants
//! - Status is checked before any body is decoded.
//! - Listed records without an id, or whose shape cannot be read at all, are
//!   skipped one by one; the rest of the list still loads.
//! - Contact field values are never logged.

use crate::config::ClientConfig;
use crate::model::contact::{Contact, ContactDraft, ContactId, WireContact};
use crate::remote::directory::{ContactDirectory, RemoteError, RemoteResult};
use log::{debug, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;

/// Blocking HTTP client for a JSON contacts collection.
pub struct HttpContactDirectory {
    config: ClientConfig,
    client: Client,
}

impl HttpContactDirectory {
    /// Builds a client for the configured collection.
    ///
    /// # Errors
    /// - Returns `RemoteError::Transport` when the HTTP backend cannot be
    ///   initialized (e.g. TLS setup failure).
    pub fn new(config: ClientConfig) -> RemoteResult<Self> {
        // reqwest's blocking client defaults to a 30s timeout; unset it unless
        // one was configured.
        let mut builder = Client::builder().timeout(config.timeout);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        Ok(Self { config, client })
    }

    fn send(&self, method: &'static str, request: RequestBuilder) -> RemoteResult<Response> {
        let started_at = Instant::now();
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| {
                debug!(
                    "event=http_request module=remote status=error method={} duration_ms={} error={}",
                    method,
                    started_at.elapsed().as_millis(),
                    err
                );
                RemoteError::Transport(err.to_string())
            })?;

        let status = response.status();
        debug!(
            "event=http_request module=remote status={} method={} duration_ms={}",
            status.as_u16(),
            method,
            started_at.elapsed().as_millis()
        );
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

/// Decodes a success body, keeping serde's line/column detail in the error.
fn decode<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
    let bytes = response
        .bytes()
        .map_err(|err| RemoteError::Transport(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| RemoteError::Decode(err.to_string()))
}

impl ContactDirectory for HttpContactDirectory {
    fn list_contacts(&self) -> RemoteResult<Vec<Contact>> {
        let response = self.send("GET", self.client.get(self.config.collection_url()))?;
        let records = decode::<Vec<Value>>(response)?;

        let mut contacts = Vec::with_capacity(records.len());
        let mut skipped_without_id = 0usize;
        let mut skipped_malformed = 0usize;
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<WireContact>(record) {
                Ok(wire) => match wire.into_contact(None) {
                    Some(contact) => contacts.push(contact),
                    None => skipped_without_id += 1,
                },
                Err(err) => {
                    skipped_malformed += 1;
                    debug!(
                        "event=contacts_decode module=remote status=skipped index={} error={}",
                        index, err
                    );
                }
            }
        }
        if skipped_without_id + skipped_malformed > 0 {
            warn!(
                "event=contacts_decode module=remote status=partial skipped_without_id={} skipped_malformed={}",
                skipped_without_id, skipped_malformed
            );
        }
        Ok(contacts)
    }

    fn create_contact(&self, draft: &ContactDraft) -> RemoteResult<Contact> {
        let request = self.client.post(self.config.collection_url()).json(draft);
        let record = decode::<WireContact>(self.send("POST", request)?)?;
        record.into_contact(None).ok_or(RemoteError::MissingId)
    }

    fn replace_contact(&self, id: &ContactId, draft: &ContactDraft) -> RemoteResult<Contact> {
        let body = Contact {
            id: id.clone(),
            name: draft.name.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
        };
        let request = self
            .client
            .put(self.config.record_url(&id.to_string()))
            .json(&body);
        let record = decode::<WireContact>(self.send("PUT", request)?)?;
        record.into_contact(Some(id)).ok_or(RemoteError::MissingId)
    }

    fn delete_contact(&self, id: &ContactId) -> RemoteResult<()> {
        self.send(
            "DELETE",
            self.client.delete(self.config.record_url(&id.to_string())),
        )?;
        Ok(())
    }
}
