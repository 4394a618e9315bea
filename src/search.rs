//! Search index client.
//!
//! Thin facade over [`Console`] for the `console.search.*` commands.

use crate::console::Console;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::transport::Transport;
use serde_json::{Map, Value};

pub const CMD_INDEX: &str = "console.search.index";
pub const CMD_QUERY: &str = "console.search.query";

pub struct Search<T> {
    console: Console<T>,
}

impl<T: Transport> Search<T> {
    pub fn new(transport: T) -> Self {
        Self {
            console: Console::new(transport),
        }
    }

    /// Rebuild the whole search index.
    pub async fn create_index(&self) -> Result<Envelope> {
        tracing::info!("Rebuilding search index");
        self.console.execute(CMD_INDEX, Map::new()).await
    }

    /// Index only what changed since the last run.
    pub async fn update_index(&self) -> Result<Envelope> {
        tracing::info!("Updating search index");
        let mut params = Map::new();
        params.insert("update".to_string(), Value::Bool(true));
        self.console.execute(CMD_INDEX, params).await
    }

    pub async fn query(&self, search_string: &str) -> Result<Envelope> {
        let mut params = Map::new();
        params.insert(
            "searchString".to_string(),
            Value::String(search_string.to_string()),
        );
        self.console.execute(CMD_QUERY, params).await
    }
}
