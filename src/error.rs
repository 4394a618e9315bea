//! Error types for the i-doit client.
//!
//! Two kinds of failure matter to callers: a command rejected locally by the
//! blacklist ([`Error::Forbidden`]) and everything else that went wrong while
//! executing a call. [`Error::is_forbidden`] and
//! [`Error::is_execution_failure`] tell them apart without matching on
//! individual variants.

use serde_json::Value;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The command is on the blacklist and was never sent.
    #[error("command '{command}' is forbidden and was not executed")]
    Forbidden { command: String },

    #[error("command name must not be empty")]
    EmptyCommand,

    /// JSON-RPC error object returned by the server.
    #[error("remote error {code}: {message}")]
    Remote {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed JSON-RPC response: {0}")]
    MalformedResponse(String),

    #[error("response is not a valid output envelope: {0}")]
    InvalidEnvelope(String),

    /// A value received or built at runtime could not be sent as an HTTP header.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True when the command was rejected by local policy.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Error::Forbidden { .. })
    }

    /// True for any failure raised while executing a call.
    pub fn is_execution_failure(&self) -> bool {
        !matches!(self, Error::Forbidden { .. } | Error::Config(_))
    }

    /// Stable machine-readable code, used by the CLI's JSON error output.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Forbidden { .. } => "forbidden",
            Error::Config(_) => "config",
            _ => "execution_failed",
        }
    }
}
