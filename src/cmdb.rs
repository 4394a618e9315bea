//! Minimal CMDB object operations, enough to set up and tear down fixtures.

use crate::error::{Error, Result};
use crate::transport::Transport;
use serde_json::{Map, Value};

pub const CMD_OBJECT_CREATE: &str = "cmdb.object.create";
pub const CMD_OBJECT_DELETE: &str = "cmdb.object.delete";

pub const STATUS_PURGE: &str = "C__RECORD_STATUS__PURGE";

pub struct CmdbObjects<T> {
    transport: T,
}

impl<T: Transport> CmdbObjects<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Create an object and return its id.
    pub async fn create(&self, object_type: &str, title: &str) -> Result<u64> {
        let mut params = Map::new();
        params.insert("type".to_string(), Value::String(object_type.to_string()));
        params.insert("title".to_string(), Value::String(title.to_string()));

        let result = self.transport.call(CMD_OBJECT_CREATE, params).await?;
        let id = parse_id(result.get("id")).ok_or_else(|| {
            Error::MalformedResponse(format!("{} returned no object id", CMD_OBJECT_CREATE))
        })?;

        tracing::debug!("Created {} object {} with id {}", object_type, title, id);
        Ok(id)
    }

    /// Remove an object from the database for good.
    pub async fn purge(&self, id: u64) -> Result<()> {
        let mut params = Map::new();
        params.insert("id".to_string(), Value::from(id));
        params.insert("status".to_string(), Value::String(STATUS_PURGE.to_string()));

        let result = self.transport.call(CMD_OBJECT_DELETE, params).await?;
        if result.get("success").and_then(Value::as_bool) == Some(false) {
            let message = result
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown reason");
            return Err(Error::MalformedResponse(format!(
                "failed to purge object {}: {}",
                id, message
            )));
        }
        Ok(())
    }
}

// The API returns ids as numbers or numeric strings depending on version.
fn parse_id(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_types::SERVER;
    use crate::testing::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_returns_id() {
        let transport = MockTransport::new();
        transport.respond(json!({"id": "42", "message": "Object was successfully created", "success": true}));
        let objects = CmdbObjects::new(&transport);

        let id = objects.create(SERVER, "web-01").await.unwrap();
        assert_eq!(id, 42);

        let calls = transport.calls();
        assert_eq!(calls[0].0, CMD_OBJECT_CREATE);
        assert_eq!(
            Value::Object(calls[0].1.clone()),
            json!({"type": "C__OBJTYPE__SERVER", "title": "web-01"})
        );
    }

    #[tokio::test]
    async fn test_create_without_id_fails() {
        let transport = MockTransport::new();
        transport.respond(json!({"success": true}));
        let objects = CmdbObjects::new(&transport);

        let err = objects.create(SERVER, "web-01").await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_purge() {
        let transport = MockTransport::new();
        transport.respond(json!({"success": true, "message": "Object(s) successfully purged"}));
        transport.respond(json!({"success": false, "message": "No permission"}));
        let objects = CmdbObjects::new(&transport);

        objects.purge(42).await.unwrap();
        let err = objects.purge(43).await.unwrap_err();
        assert!(err.to_string().contains("No permission"));

        let calls = transport.calls();
        assert_eq!(
            Value::Object(calls[0].1.clone()),
            json!({"id": 42, "status": STATUS_PURGE})
        );
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some(&json!(7))), Some(7));
        assert_eq!(parse_id(Some(&json!("7"))), Some(7));
        assert_eq!(parse_id(Some(&json!("seven"))), None);
        assert_eq!(parse_id(None), None);
    }
}
