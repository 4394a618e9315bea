//! RPC transport.
//!
//! [`Transport`] is the seam between the request facades ([`Console`],
//! [`Search`], ...) and the network. [`HttpTransport`] is the production
//! implementation: JSON-RPC 2.0 over HTTP(S) with API-key authentication and
//! optional session login.
//!
//! [`Console`]: crate::console::Console
//! [`Search`]: crate::search::Search

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::rpc::{Request, Response};
use futures::future::BoxFuture;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

pub const HEADER_USERNAME: &str = "X-RPC-Auth-Username";
pub const HEADER_PASSWORD: &str = "X-RPC-Auth-Password";
pub const HEADER_SESSION: &str = "X-RPC-Auth-Session";

/// Performs one authenticated remote call and returns the decoded `result`.
pub trait Transport: Send + Sync {
    fn call<'a>(&'a self, method: &'a str, params: Map<String, Value>)
    -> BoxFuture<'a, Result<Value>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn call<'a>(
        &'a self,
        method: &'a str,
        params: Map<String, Value>,
    ) -> BoxFuture<'a, Result<Value>> {
        (**self).call(method, params)
    }
}

pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    api_key: String,
    language: Option<String>,
    credentials: Option<(String, String)>,
    session: RwLock<Option<HeaderValue>>,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.bypass_secure_connection)
            .user_agent(format!("{}/{}", crate::CLIENT_NAME, crate::CLIENT_VERSION))
            .build()?;

        if config.bypass_secure_connection {
            tracing::warn!("TLS certificate verification is disabled for {}", endpoint);
        }

        let credentials = match (&config.username, &config.password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            credentials,
            session: RwLock::new(None),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.read().is_some()
    }

    /// Open a session with the configured username and password.
    ///
    /// Without credentials this is a no-op; calls then authenticate with the
    /// API key alone. A session id that cannot be sent back as a header fails
    /// here with [`Error::InvalidHeader`].
    pub async fn login(&self) -> Result<()> {
        let Some((user, pass)) = &self.credentials else {
            tracing::debug!("No credentials configured, skipping login");
            return Ok(());
        };

        let mut headers = HeaderMap::new();
        headers.insert(header_name(HEADER_USERNAME)?, header_value(user)?);
        headers.insert(header_name(HEADER_PASSWORD)?, header_value(pass)?);

        let result = self.send("idoit.login", Map::new(), headers).await?;
        let session_id = result
            .get("session-id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedResponse("login result lacks session-id".to_string()))?;

        let session = header_value(session_id)?;
        *self.session.write() = Some(session);
        tracing::info!("Logged in to {} as {}", self.endpoint, user);
        Ok(())
    }

    /// Close the current session, if any.
    pub async fn logout(&self) -> Result<()> {
        if !self.is_logged_in() {
            return Ok(());
        }
        let result = self.call_inner("idoit.logout", Map::new()).await;
        *self.session.write() = None;
        result?;
        tracing::info!("Logged out from {}", self.endpoint);
        Ok(())
    }

    async fn call_inner(&self, method: &str, params: Map<String, Value>) -> Result<Value> {
        let session = self.session.read().clone();
        let mut headers = HeaderMap::new();
        if let Some(session) = session {
            headers.insert(header_name(HEADER_SESSION)?, session);
        }
        self.send(method, params, headers).await
    }

    async fn send(
        &self,
        method: &str,
        mut params: Map<String, Value>,
        headers: HeaderMap,
    ) -> Result<Value> {
        params.insert("apikey".to_string(), Value::String(self.api_key.clone()));
        if let Some(language) = &self.language {
            params
                .entry("language")
                .or_insert_with(|| Value::String(language.clone()));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request::new(method, &params, id);
        tracing::debug!(method, id, "Sending JSON-RPC request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::debug!(method, id, status = status.as_u16(), "Request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                body: truncate(&body, 512),
            });
        }

        let frame: Response = serde_json::from_str(&body)?;
        let result = frame.into_result(id);
        if let Err(e) = &result {
            tracing::debug!(method, id, "Call failed: {}", e);
        }
        result
    }
}

impl Transport for HttpTransport {
    fn call<'a>(
        &'a self,
        method: &'a str,
        params: Map<String, Value>,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(self.call_inner(method, params))
    }
}

fn header_name(name: &'static str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        Error::InvalidHeader("value contains characters not allowed in headers".to_string())
    })
}

fn truncate(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_port_override() {
        let config = ClientConfig::new("http://localhost/src/jsonrpc.php", "key").with_port(8080);
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "http://localhost:8080/src/jsonrpc.php"
        );
        assert!(!transport.is_logged_in());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ClientConfig::new("http://localhost/src/jsonrpc.php", "");
        assert!(matches!(
            HttpTransport::new(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_header_value_errors_are_execution_failures() {
        let err = header_value("bad\r\nvalue").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
        assert!(err.is_execution_failure());
        assert!(header_value("abc123").is_ok());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_login_without_credentials_is_noop() {
        let config = ClientConfig::new("http://localhost/src/jsonrpc.php", "key");
        let transport = HttpTransport::new(&config).unwrap();
        tokio_test::block_on(transport.login()).unwrap();
        assert!(!transport.is_logged_in());
    }
}
