//! Server metadata from the `idoit.*` namespace.

use crate::error::Result;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use serde_json::Map;

pub const CMD_VERSION: &str = "idoit.version";

/// Result of `idoit.version`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerVersion {
    pub version: String,
    #[serde(default)]
    pub step: Option<String>,
    /// Edition, e.g. `PRO` or `OPEN`
    #[serde(rename = "type", default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub login: Option<LoginInfo>,
}

/// The user the API key or session resolves to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoginInfo {
    #[serde(rename = "userid", default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub tenant: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

pub struct Idoit<T> {
    transport: T,
}

impl<T: Transport> Idoit<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn version(&self) -> Result<ServerVersion> {
        let result = self.transport.call(CMD_VERSION, Map::new()).await?;
        Ok(serde_json::from_value(result)?)
    }
}
