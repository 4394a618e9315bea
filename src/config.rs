//! Client configuration.
//!
//! A [`ClientConfig`] is built once at process start, either explicitly or
//! from `IDOIT_*` environment variables, and handed by reference to
//! [`HttpTransport::new`](crate::transport::HttpTransport::new).

use crate::error::{Error, Result};
use reqwest::Url;
use reqwest::header::HeaderValue;
use serde::Serialize;
use std::time::Duration;

pub const ENV_URL: &str = "IDOIT_URL";
pub const ENV_KEY: &str = "IDOIT_KEY";
pub const ENV_USERNAME: &str = "IDOIT_USERNAME";
pub const ENV_PASSWORD: &str = "IDOIT_PASSWORD";
pub const ENV_LANGUAGE: &str = "IDOIT_LANGUAGE";
pub const ENV_BYPASS_SECURE_CONNECTION: &str = "IDOIT_BYPASS_SECURE_CONNECTION";
pub const ENV_PORT: &str = "IDOIT_PORT";
pub const ENV_TIMEOUT_SECS: &str = "IDOIT_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Languages the API accepts for translated output.
pub const LANGUAGES: &[&str] = &["en", "de"];

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the JSON-RPC endpoint, e.g. `https://cmdb.example.com/src/jsonrpc.php`
    pub url: String,
    pub api_key: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub language: Option<String>,
    /// Skip TLS certificate verification
    pub bypass_secure_connection: bool,
    /// Overrides the port given in `url`
    pub port: Option<u16>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            username: None,
            password: None,
            language: None,
            bypass_secure_connection: false,
            port: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_bypass_secure_connection(mut self, bypass: bool) -> Self {
        self.bypass_secure_connection = bypass;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset. Values are trimmed, except the
    /// password, which is taken as given. The result is validated before it
    /// is returned.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_verbatim = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let url = get(ENV_URL).ok_or_else(|| Error::Config(format!("{} is not set", ENV_URL)))?;
        let api_key =
            get(ENV_KEY).ok_or_else(|| Error::Config(format!("{} is not set", ENV_KEY)))?;

        let mut config = Self::new(url, api_key);
        config.username = get(ENV_USERNAME);
        config.password = get_verbatim(ENV_PASSWORD);
        config.language = get(ENV_LANGUAGE);

        if let Some(raw) = get(ENV_BYPASS_SECURE_CONNECTION) {
            config.bypass_secure_connection = parse_bool(&raw).ok_or_else(|| {
                Error::Config(format!(
                    "{} must be a boolean, got '{}'",
                    ENV_BYPASS_SECURE_CONNECTION, raw
                ))
            })?;
        }

        if let Some(raw) = get(ENV_PORT) {
            let port = raw.parse::<u16>().map_err(|_| {
                Error::Config(format!("{} must be a port number, got '{}'", ENV_PORT, raw))
            })?;
            config.port = Some(port);
        }

        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "{} must be a number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("invalid URL '{}': {}", self.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "URL scheme must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }

        match (&self.username, &self.password) {
            (Some(_), None) => {
                return Err(Error::Config("username given without password".to_string()));
            }
            (None, Some(_)) => {
                return Err(Error::Config("password given without username".to_string()));
            }
            _ => {}
        }

        for value in [&self.username, &self.password].into_iter().flatten() {
            if HeaderValue::from_str(value).is_err() {
                return Err(Error::Config(
                    "credentials contain characters not allowed in HTTP headers".to_string(),
                ));
            }
        }

        if let Some(language) = &self.language {
            if !LANGUAGES.contains(&language.as_str()) {
                return Err(Error::Config(format!(
                    "unsupported language '{}', expected one of: {}",
                    language,
                    LANGUAGES.join(", ")
                )));
            }
        }

        if self.port == Some(0) {
            return Err(Error::Config("port must not be 0".to_string()));
        }

        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }

        Ok(())
    }

    /// The endpoint URL with the port override applied.
    pub fn endpoint(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("invalid URL '{}': {}", self.url, e)))?;
        if let Some(port) = self.port {
            url.set_port(Some(port))
                .map_err(|_| Error::Config(format!("cannot set port on '{}'", self.url)))?;
        }
        Ok(url)
    }

    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Secret-free view of the configuration for diagnostics.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            url: self
                .endpoint()
                .map(|u| u.to_string())
                .unwrap_or_else(|_| self.url.clone()),
            api_key: mask(&self.api_key),
            username: self.username.clone(),
            password: self.password.as_ref().map(|_| "********".to_string()),
            language: self.language.clone(),
            bypass_secure_connection: self.bypass_secure_connection,
            port: self.port,
            timeout_secs: self.timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigSummary {
    pub url: String,
    pub api_key: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub language: Option<String>,
    pub bypass_secure_connection: bool,
    pub port: Option<u16>,
    pub timeout_secs: u64,
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Keep the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
