//! HTTP configuration types.
//!
//! Defines `HttpConfig` and its builder, used to configure transport
//! behavior for a [`crate::pipeline::Pipeline`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base url every request path is resolved against.
    pub base_url: String,
    /// Total request timeout
    #[serde(with = "duration_option_serde")]
    pub timeout: Option<Duration>,
    /// Connection timeout
    #[serde(with = "duration_option_serde")]
    pub connect_timeout: Option<Duration>,
    /// Default headers sent on every request
    pub headers: HashMap<String, String>,
    /// User agent
    pub user_agent: Option<String>,
}

impl HttpConfig {
    /// Returns a builder for constructing `HttpConfig`
    pub fn builder(base_url: impl Into<String>) -> HttpConfigBuilder {
        HttpConfigBuilder::new(base_url)
    }

    /// Resolve a request path against the base url.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for `HttpConfig` to construct configuration in a unified and safe way
#[derive(Debug, Clone)]
pub struct HttpConfigBuilder {
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    headers: HashMap<String, String>,
    user_agent: Option<String>,
}

impl HttpConfigBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Some(crate::defaults::http::REQUEST_TIMEOUT),
            connect_timeout: Some(crate::defaults::http::CONNECT_TIMEOUT),
            headers: HashMap::new(),
            user_agent: Some(crate::defaults::http::USER_AGENT.to_string()),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> HttpConfig {
        HttpConfig {
            base_url: self.base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            headers: self.headers,
            user_agent: self.user_agent,
        }
    }
}

// Helper module for Duration serialization
mod duration_option_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => d.as_secs().serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs: Option<u64> = Option::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_joins_without_doubling_slashes() {
        let config = HttpConfig::builder("https://api.example.com/").build();
        assert_eq!(
            config.url_for("/user/profile"),
            "https://api.example.com/user/profile"
        );
        assert_eq!(
            config.url_for("user/profile"),
            "https://api.example.com/user/profile"
        );
    }

    #[test]
    fn url_for_passes_absolute_urls_through() {
        let config = HttpConfig::builder("https://api.example.com").build();
        assert_eq!(
            config.url_for("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn builder_applies_defaults() {
        let config = HttpConfig::builder("https://api.example.com").build();
        assert_eq!(config.timeout, Some(crate::defaults::http::REQUEST_TIMEOUT));
        assert!(config.user_agent.is_some());
    }
}
