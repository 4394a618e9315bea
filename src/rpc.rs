//! JSON-RPC 2.0 frames as spoken by the i-doit API.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Serialize)]
pub struct Request<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: &'a Map<String, Value>,
    pub id: u64,
}

impl<'a> Request<'a> {
    pub fn new(method: &'a str, params: &'a Map<String, Value>, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// `Some(Value::Null)` for an explicit `"result": null`, `None` when absent.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Response {
    /// Unwrap the frame into its `result`, mapping protocol errors.
    pub fn into_result(self, expected_id: u64) -> Result<Value> {
        if let Some(version) = &self.jsonrpc {
            if version != JSONRPC_VERSION {
                return Err(Error::MalformedResponse(format!(
                    "unsupported jsonrpc version '{}'",
                    version
                )));
            }
        }

        if let Some(error) = self.error {
            return Err(Error::Remote {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        // Servers echo ids either as numbers or as strings.
        if let Some(id) = &self.id {
            let matches = match id {
                Value::Number(n) => n.as_u64() == Some(expected_id),
                Value::String(s) => s.parse::<u64>().ok() == Some(expected_id),
                Value::Null => true,
                _ => false,
            };
            if !matches {
                return Err(Error::MalformedResponse(format!(
                    "response id {} does not match request id {}",
                    id, expected_id
                )));
            }
        }

        self.result.ok_or_else(|| {
            Error::MalformedResponse("response has neither result nor error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Response {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_serialization() {
        let mut params = Map::new();
        params.insert("searchString".to_string(), json!("server"));
        let request = Request::new("console.search.query", &params, 7);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "method": "console.search.query",
                "params": {"searchString": "server"},
                "id": 7
            })
        );
    }

    #[test]
    fn test_result_is_returned() {
        let response = parse(json!({"jsonrpc": "2.0", "result": {"output": []}, "id": 3}));
        assert_eq!(response.into_result(3).unwrap(), json!({"output": []}));
    }

    #[test]
    fn test_null_result_is_success() {
        let response = parse(json!({"jsonrpc": "2.0", "result": null, "id": 1}));
        assert_eq!(response.into_result(1).unwrap(), Value::Null);

        let with_null_error =
            parse(json!({"jsonrpc": "2.0", "result": null, "error": null, "id": 1}));
        assert_eq!(with_null_error.into_result(1).unwrap(), Value::Null);
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let response = parse(json!({"jsonrpc": "2.0", "result": true, "id": "3"}));
        assert_eq!(response.into_result(3).unwrap(), json!(true));
    }

    #[test]
    fn test_error_object_maps_to_remote() {
        let response = parse(json!({
            "jsonrpc": "2.0",
            "error": {"code": -32601, "message": "Method not found", "data": null},
            "id": 1
        }));
        match response.into_result(1) {
            Err(Error::Remote { code, message, .. }) => {
                assert_eq!(code, -32601);
                assert_eq!(message, "Method not found");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_frames() {
        let empty = parse(json!({"jsonrpc": "2.0", "id": 1}));
        assert!(matches!(
            empty.into_result(1),
            Err(Error::MalformedResponse(_))
        ));

        let wrong_id = parse(json!({"jsonrpc": "2.0", "result": 1, "id": 2}));
        assert!(matches!(
            wrong_id.into_result(1),
            Err(Error::MalformedResponse(_))
        ));

        let wrong_version = parse(json!({"jsonrpc": "1.0", "result": 1, "id": 1}));
        assert!(matches!(
            wrong_version.into_result(1),
            Err(Error::MalformedResponse(_))
        ));
    }
}
