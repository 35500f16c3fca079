//! Session configuration shared by every entity of a session.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::api::RestApi;
use crate::client::{Client, Transport};
use crate::error::{Error, Result};
use crate::payload::EditOptions;
use crate::retry::{RetryPolicy, RetrySettings};

pub const WIKIDATA_ENDPOINT: &str = "https://www.wikidata.org/w/rest.php/wikibase/v0";

/// Connection settings, typically read from a `wikibase.toml`.
///
/// ```toml
/// endpoint = "https://test.wikidata.org/w/rest.php/wikibase/v0"
/// access_token = "..."
/// bot = true
/// tags = ["my-import"]
///
/// [retry]
/// max_retries = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
    pub bot: bool,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub retry: RetrySettings,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            endpoint: WIKIDATA_ENDPOINT.to_string(),
            access_token: None,
            bot: false,
            summary: None,
            tags: Vec::new(),
            retry: RetrySettings::default(),
        }
    }
}

impl ConnectionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ConnectionConfig =
            toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Config("endpoint must not be empty".to_string()));
        }
        let delays = [self.retry.base_delay_secs, self.retry.max_delay_secs];
        if delays.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(Error::Config(
                "retry delays must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// A session against one Wikibase instance.
///
/// Summary and tags are shared: entities holding the same `Arc<Connection>`
/// see changes immediately. Use separate connections for separate
/// attribution.
pub struct Connection {
    api: RestApi,
    bot: bool,
    summary: RwLock<Option<String>>,
    tags: RwLock<Vec<String>>,
}

impl Connection {
    pub fn new(endpoint: &str, access_token: Option<&str>) -> Result<Arc<Self>> {
        Ok(Self::with_client(Client::new(endpoint, access_token)?, false))
    }

    pub fn with_client(client: Client, bot: bool) -> Arc<Self> {
        Arc::new(Connection {
            api: RestApi::new(client),
            bot,
            summary: RwLock::new(None),
            tags: RwLock::new(Vec::new()),
        })
    }

    pub fn from_config(config: &ConnectionConfig) -> Result<Arc<Self>> {
        let client = Client::new(&config.endpoint, config.access_token.as_deref())?;
        Ok(Self::configure(client, config))
    }

    pub fn from_config_with_transport(
        config: &ConnectionConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Arc<Self>> {
        let client =
            Client::with_transport(&config.endpoint, config.access_token.as_deref(), transport)?;
        Ok(Self::configure(client, config))
    }

    fn configure(client: Client, config: &ConnectionConfig) -> Arc<Self> {
        let client = client.with_retry_policy(RetryPolicy::from(config.retry));
        let connection = Self::with_client(client, config.bot);
        connection.set_summary(config.summary.clone());
        for tag in &config.tags {
            connection.add_tag(tag.clone());
        }
        connection
    }

    pub fn api(&self) -> &RestApi {
        &self.api
    }

    pub fn bot(&self) -> bool {
        self.bot
    }

    pub fn set_summary(&self, summary: Option<String>) {
        *self.summary.write().unwrap_or_else(PoisonError::into_inner) = summary;
    }

    pub fn summary(&self) -> Option<String> {
        self.summary
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn add_tag(&self, tag: impl Into<String>) {
        self.tags
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tag.into());
    }

    pub fn set_tags(&self, tags: Vec<String>) {
        *self.tags.write().unwrap_or_else(PoisonError::into_inner) = tags;
    }

    pub fn tags(&self) -> Vec<String> {
        self.tags
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Attribution for the next write, read at call time.
    pub fn edit_options(&self) -> EditOptions {
        EditOptions {
            bot: self.bot,
            summary: self.summary(),
            tags: self.tags(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = ConnectionConfig::default();
        assert_eq!(config.endpoint, WIKIDATA_ENDPOINT);
        assert!(config.access_token.is_none());
        assert!(!config.bot);
        assert_eq!(config.retry.max_retries, 10);
    }

    #[test]
    fn test_config_from_toml() {
        let config = ConnectionConfig::from_toml_str(
            r#"
            endpoint = "https://test.wikidata.org/w/rest.php/wikibase/v0"
            access_token = "secret"
            bot = true
            summary = "batch import"
            tags = ["import"]

            [retry]
            max_retries = 3
            base_delay_secs = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert!(config.bot);
        assert_eq!(config.tags, vec!["import"]);
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.max_delay_secs, 60.0);

        let connection = Connection::from_config(&config).unwrap();
        let options = connection.edit_options();
        assert!(options.bot);
        assert_eq!(options.summary.as_deref(), Some("batch import"));
        assert_eq!(options.tags, vec!["import"]);

        let policy = connection.api().client().retry_policy();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = ConnectionConfig::from_toml_str("endpoint = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ConnectionConfig::from_toml_str("endpoint = \"\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ConnectionConfig::from_toml_str("[retry]\nbase_delay_secs = -1.0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConnectionConfig::load("/nonexistent/wikibase.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_summary_and_tags_are_shared() {
        let connection = Connection::new(WIKIDATA_ENDPOINT, None).unwrap();
        let other = Arc::clone(&connection);

        connection.set_summary(Some("first".to_string()));
        connection.add_tag("a");
        assert_eq!(other.summary().as_deref(), Some("first"));
        assert_eq!(other.edit_options().tags, vec!["a"]);

        other.set_tags(Vec::new());
        assert!(connection.tags().is_empty());
    }
}
