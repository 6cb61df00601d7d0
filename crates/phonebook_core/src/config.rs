//! Directory client configuration.
//!
//! # Responsibility
//! - Describe where the contacts collection lives and how to reach it.
//! - Load overrides from process environment.
//!
//! # Invariants
//! - `base_url` is an http(s) URL that can carry path segments.
//! - `collection` is one non-empty path segment without `/`.
//! - No request timeout is imposed unless explicitly configured.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_COLLECTION: &str = "contacts";

pub const ENV_BASE_URL: &str = "PHONEBOOK_API_URL";
pub const ENV_COLLECTION: &str = "PHONEBOOK_COLLECTION";
pub const ENV_TIMEOUT_SECS: &str = "PHONEBOOK_TIMEOUT_SECS";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl { value: String, message: String },
    InvalidCollection(String),
    InvalidTimeout(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl { value, message } => {
                write!(f, "invalid base url `{value}`: {message}")
            }
            Self::InvalidCollection(value) => write!(
                f,
                "invalid collection `{value}`; expected a single non-empty path segment"
            ),
            Self::InvalidTimeout(value) => {
                write!(f, "invalid timeout `{value}`; expected whole seconds > 0")
            }
        }
    }
}

impl Error for ConfigError {}

/// Connection settings for the remote contacts collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub collection: String,
    /// Transport-level timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    pub system_proxy: bool,
}

impl ClientConfig {
    /// Builds a config for `base_url` with the default collection name.
    ///
    /// # Errors
    /// - Returns an error when `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> ConfigResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            collection: DEFAULT_COLLECTION.to_string(),
            timeout: None,
            system_proxy: true,
        })
    }

    /// Replaces the collection path segment.
    pub fn with_collection(mut self, collection: &str) -> ConfigResult<Self> {
        self.collection = normalize_collection(collection)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    /// Loads settings from `PHONEBOOK_*` variables, falling back to defaults.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;
        if let Some(collection) = lookup(ENV_COLLECTION) {
            config = config.with_collection(&collection)?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = Some(parse_timeout_secs(&timeout)?);
        }
        Ok(config)
    }

    /// URL of the whole collection, e.g. `http://host/contacts`.
    pub fn collection_url(&self) -> Url {
        self.endpoint(None)
    }

    /// URL of one record, e.g. `http://host/contacts/7`. The id is
    /// percent-encoded as a single path segment.
    pub fn record_url(&self, id: &str) -> Url {
        self.endpoint(Some(id))
    }

    fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // `parse_base_url` rejects cannot-be-a-base URLs, so this never fails.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.collection);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

/// Parses a positive whole number of seconds.
pub fn parse_timeout_secs(value: &str) -> ConfigResult<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}

fn parse_base_url(value: &str) -> ConfigResult<Url> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
        value: trimmed.to_string(),
        message: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: trimmed.to_string(),
            message: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            value: trimmed.to_string(),
            message: "url cannot carry path segments".to_string(),
        });
    }
    Ok(url)
}

fn normalize_collection(value: &str) -> ConfigResult<String> {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() || trimmed.contains('/') {
        return Err(ConfigError::InvalidCollection(value.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, ENV_BASE_URL, ENV_COLLECTION, ENV_TIMEOUT_SECS};
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn endpoints_append_collection_and_id() {
        let config = ClientConfig::new("http://localhost:3000").unwrap();
        assert_eq!(
            config.collection_url().as_str(),
            "http://localhost:3000/contacts"
        );
        assert_eq!(
            config.record_url("7").as_str(),
            "http://localhost:3000/contacts/7"
        );
    }

    #[test]
    fn endpoints_keep_base_path_and_encode_ids() {
        let config = ClientConfig::new("https://api.example.com/v1/")
            .unwrap()
            .with_collection("users")
            .unwrap();
        assert_eq!(
            config.collection_url().as_str(),
            "https://api.example.com/v1/users"
        );
        assert_eq!(
            config.record_url("a/b").as_str(),
            "https://api.example.com/v1/users/a%2Fb"
        );
    }

    #[test]
    fn rejects_non_http_scheme_and_nested_collection() {
        assert!(matches!(
            ClientConfig::new("ftp://example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("mailto:someone@example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        let config = ClientConfig::new("http://localhost").unwrap();
        assert!(matches!(
            config.with_collection("a/b"),
            Err(ConfigError::InvalidCollection(_))
        ));
    }

    #[test]
    fn from_lookup_applies_overrides() {
        let vars = HashMap::from([
            (ENV_BASE_URL, "https://jsonplaceholder.typicode.com"),
            (ENV_COLLECTION, "users"),
            (ENV_TIMEOUT_SECS, "15"),
        ]);
        let config =
            ClientConfig::from_lookup(|key| vars.get(key).map(|value| value.to_string())).unwrap();
        assert_eq!(
            config.collection_url().as_str(),
            "https://jsonplaceholder.typicode.com/users"
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn from_lookup_defaults_without_overrides() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.collection, "contacts");
        assert_eq!(config.timeout, None);

        let err = ClientConfig::from_lookup(|key| {
            (key == ENV_TIMEOUT_SECS).then(|| "0".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }
}
