//! Command executor for the `console.*` API namespace.
//!
//! Console commands run i-doit CLI jobs on the server. Some of them change
//! the installation as a whole (updates, tenant lifecycle) and are never sent
//! by this client; see [`BLACKLIST`].

use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::transport::Transport;
use serde_json::{Map, Value};

/// Commands that must never reach the server.
///
/// A name is blocked if it equals an entry or extends one by further
/// `.`-separated segments.
pub const BLACKLIST: &[&str] = &[
    "console.system.checkforupdates",
    "console.system.update",
    "console.tenant.add",
    "console.tenant.disable",
    "console.tenant.enable",
    "console.tenant.list",
];

pub fn is_forbidden(command: &str) -> bool {
    let command = command.trim().to_ascii_lowercase();
    BLACKLIST.iter().any(|entry| {
        command == *entry
            || command
                .strip_prefix(entry)
                .is_some_and(|rest| rest.starts_with('.'))
    })
}

/// Local policy check run before any command is sent.
///
/// Returns the trimmed command name. Empty names fail with
/// [`Error::EmptyCommand`], blacklisted ones with [`Error::Forbidden`].
pub fn check(command: &str) -> Result<&str> {
    let command = command.trim();
    if command.is_empty() {
        return Err(Error::EmptyCommand);
    }
    if is_forbidden(command) {
        tracing::warn!("Refusing to execute forbidden command {}", command);
        return Err(Error::Forbidden {
            command: command.to_string(),
        });
    }
    Ok(command)
}

pub struct Console<T> {
    transport: T,
}

impl<T: Transport> Console<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Run a console command with a verbatim parameter mapping.
    pub async fn execute(&self, command: &str, params: Map<String, Value>) -> Result<Envelope> {
        let command = check(command)?;
        tracing::debug!("Executing {}", command);
        let result = self.transport.call(command, params).await?;
        Envelope::from_output(result)
    }

    /// Run a console command with separate option and argument maps.
    ///
    /// Empty maps are left out of the request.
    pub async fn execute_with(
        &self,
        command: &str,
        options: Map<String, Value>,
        arguments: Map<String, Value>,
    ) -> Result<Envelope> {
        let mut params = Map::new();
        if !options.is_empty() {
            params.insert("options".to_string(), Value::Object(options));
        }
        if !arguments.is_empty() {
            params.insert("arguments".to_string(), Value::Object(arguments));
        }
        self.execute(command, params).await
    }
}
