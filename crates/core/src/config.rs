//! Client configuration
//!
//! The only setting is the service endpoint. It can be passed directly or read
//! from a TOML fragment embedded in a host application's config file:
//!
//! ```toml
//! endpoint = "http://storage.local:8080"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Address of the storage service used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://10.134.17.222:8080";

/// Facade configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the storage service, without trailing slash
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration for an optional endpoint; `None` or blank uses the default
    pub fn with_endpoint(endpoint: Option<&str>) -> Self {
        let endpoint = endpoint
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT);
        Self {
            endpoint: normalize_endpoint(endpoint),
        }
    }

    /// Parse configuration from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(content)?;
        Ok(Self::with_endpoint(Some(&config.endpoint)))
    }

    /// Check that the endpoint is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        parse_service_url(&self.endpoint, &self.endpoint).map(|_| ())
    }
}

/// Parse `raw` as an absolute http(s) URL; errors name the configured `endpoint`
pub fn parse_service_url(endpoint: &str, raw: &str) -> Result<url::Url> {
    let url = url::Url::parse(raw).map_err(|e| Error::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        assert_eq!(ClientConfig::default().endpoint, DEFAULT_ENDPOINT);
        assert_eq!(ClientConfig::with_endpoint(None).endpoint, DEFAULT_ENDPOINT);
        assert_eq!(ClientConfig::with_endpoint(Some("  ")).endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::with_endpoint(Some("http://localhost:8080/"));
        assert_eq!(config.endpoint, "http://localhost:8080");
    }

    #[test]
    fn test_from_toml() {
        let config = ClientConfig::from_toml_str("endpoint = \"http://storage:9000//\"").unwrap();
        assert_eq!(config.endpoint, "http://storage:9000");

        let empty = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(empty.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = ClientConfig::from_toml_str("endpoint = 42");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::with_endpoint(Some("not a url")).validate().is_err());
        assert!(ClientConfig::with_endpoint(Some("ftp://host")).validate().is_err());
    }

    #[test]
    fn test_parse_service_url_names_endpoint() {
        let url = parse_service_url("http://h:1", "http://h:1/api/files?x=1").unwrap();
        assert_eq!(url.path(), "/api/files");

        let err = parse_service_url("ftp://h", "ftp://h/api/files").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid endpoint 'ftp://h': unsupported scheme 'ftp'"
        );
    }
}
