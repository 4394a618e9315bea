// Allow some clippy lints that are too strict for our codebase
#![allow(clippy::collapsible_if)]

//! i-doit API client
//!
//! A client for the JSON-RPC API of the i-doit CMDB.
//!
//! # Architecture
//!
//! Every request goes through a [`Transport`]. The request facades on top of
//! it are stateless and hold nothing but the transport handle:
//!
//! 1. **[`Console`]**: runs `console.*` commands. A fixed [`BLACKLIST`] of
//!    installation-wide commands is rejected locally with
//!    [`Error::Forbidden`] before anything is sent.
//!
//! 2. **[`Search`]**: creates or updates the search index and runs
//!    free-text queries.
//!
//! 3. **[`CmdbObjects`]** and **[`Idoit`]**: object fixtures and server
//!    metadata.
//!
//! Console responses are validated into an [`Envelope`]; see
//! [`envelope::is_output`] for the accepted shape.
//!
//! # Usage
//!
//! ```ignore
//! use idoit_client::{ClientConfig, HttpTransport, Search};
//!
//! let config = ClientConfig::from_env()?;
//! let transport = HttpTransport::new(&config)?;
//! transport.login().await?;
//!
//! let search = Search::new(&transport);
//! search.create_index().await?;
//! let hits = search.query("SERVER-01").await?;
//! for line in hits.lines() {
//!     println!("{line}");
//! }
//! ```

pub mod cmdb;
pub mod config;
pub mod console;
pub mod envelope;
pub mod error;
pub mod idoit;
pub mod object_types;
pub mod rpc;
pub mod search;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;

// Re-exports
pub use cmdb::CmdbObjects;
pub use config::{ClientConfig, ConfigSummary};
pub use console::{BLACKLIST, Console, is_forbidden};
pub use envelope::{Envelope, is_output};
pub use error::{Error, Result};
pub use idoit::{Idoit, LoginInfo, ServerVersion};
pub use search::Search;
pub use transport::{HttpTransport, Transport};

/// Client name, sent as part of the user agent.
pub const CLIENT_NAME: &str = "idoit-client";
/// Client version.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_mock_transport_is_opt_in() {
        let manifest = include_str!("../Cargo.toml");
        let default = manifest
            .lines()
            .find(|line| line.trim_start().starts_with("default ="))
            .unwrap();
        assert!(!default.contains("testing"), "default features: {}", default);
        assert!(manifest.contains("testing = []"));
    }
}
