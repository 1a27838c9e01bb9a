//! Client configuration

use super::ClientError;
use mocktail_core::AuthConfig;
use std::time::Duration;

const DEFAULT_API_PREFIX: &str = "/api/v1/";
const DEFAULT_USER_AGENT: &str = concat!("mocktail-client/", env!("CARGO_PKG_VERSION"));

/// Settings for [`MocktailClient`](super::MocktailClient)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the API, without trailing slash
    pub base_url: String,
    /// Path prefix of every endpoint, with leading and trailing slash
    pub api_prefix: String,
    /// Tokens expiring within this window are refreshed before a request
    pub refresh_lookahead: Duration,
    /// Request timeout; ignored in the browser
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Absolute URL of an endpoint path such as `auth/login`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            self.api_prefix,
            path.trim_start_matches('/')
        )
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    api_prefix: Option<String>,
    refresh_lookahead: Option<Duration>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API path prefix
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    /// Set the refresh lookahead window
    pub const fn refresh_lookahead(mut self, lookahead: Duration) -> Self {
        self.refresh_lookahead = Some(lookahead);
        self
    }

    /// Set the request timeout
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let prefix = self.api_prefix.unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());
        let trimmed = prefix.trim_matches('/');
        let api_prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}/")
        };

        let refresh_lookahead = self.refresh_lookahead.unwrap_or(Duration::from_secs(
            AuthConfig::REFRESH_LOOKAHEAD_SECS.unsigned_abs(),
        ));

        Ok(ClientConfig {
            base_url,
            api_prefix,
            refresh_lookahead,
            timeout: self.timeout,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientConfig::builder().build();
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }

    #[test]
    fn test_endpoint_joins_prefix() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:5000/")
            .build()
            .unwrap();
        assert_eq!(config.endpoint("auth/login"), "http://localhost:5000/api/v1/auth/login");
        assert_eq!(config.refresh_lookahead, Duration::from_secs(30));

        let config = ClientConfig::builder()
            .base_url("http://localhost:5000")
            .api_prefix("api")
            .build()
            .unwrap();
        assert_eq!(config.endpoint("/backend/projects"), "http://localhost:5000/api/backend/projects");
    }
}
