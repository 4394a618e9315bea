//! Console output envelopes.
//!
//! Console commands answer with an object of the form
//! `{"success": true, "output": ["line", ...]}`. [`is_output`] is the shape
//! check; [`Envelope`] is a validated wrapper around it.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// Check whether `value` has the shape of console output.
///
/// The value must be an object with an `output` array whose items are all
/// strings. A `success` member, when present, must be `true`.
pub fn is_output(value: &Value) -> bool {
    check_output(value).is_ok()
}

fn check_output(value: &Value) -> std::result::Result<(), String> {
    let object = value
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", type_name(value)))?;

    if let Some(success) = object.get("success") {
        if success != &Value::Bool(true) {
            return Err(format!("success is {}", success));
        }
    }

    let output = object
        .get("output")
        .ok_or_else(|| "missing 'output' member".to_string())?
        .as_array()
        .ok_or_else(|| "'output' is not an array".to_string())?;

    if let Some((idx, item)) = output.iter().enumerate().find(|(_, v)| !v.is_string()) {
        return Err(format!("output line {} is {}", idx, type_name(item)));
    }

    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decoded response of a console command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Envelope(Value);

impl Envelope {
    pub fn from_output(value: Value) -> Result<Self> {
        check_output(&value).map_err(Error::InvalidEnvelope)?;
        Ok(Self(value))
    }

    /// Output lines, in server order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0["output"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    pub fn success(&self) -> bool {
        self.0.get("success").and_then(Value::as_bool).unwrap_or(true)
    }

    /// True if any output line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().any(|line| line.contains(needle))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_output_shapes() {
        assert!(is_output(&json!({"success": true, "output": []})));
        assert!(is_output(&json!({"output": ["a", "b"]})));
        assert!(is_output(
            &json!({"success": true, "output": ["Indexing done"], "extra": 1})
        ));
    }

    #[test]
    fn test_invalid_output_shapes() {
        assert!(!is_output(&json!(["a", "b"])));
        assert!(!is_output(&json!({"success": true})));
        assert!(!is_output(&json!({"output": "text"})));
        assert!(!is_output(&json!({"output": ["a", 1]})));
        assert!(!is_output(&json!({"success": false, "output": []})));
        assert!(!is_output(&Value::Null));
    }

    #[test]
    fn test_envelope_accessors() {
        let envelope = Envelope::from_output(json!({
            "success": true,
            "output": ["Found 1 result", "SERVER-01 (Server)"]
        }))
        .unwrap();

        assert!(envelope.success());
        assert_eq!(envelope.lines().count(), 2);
        assert!(envelope.contains("SERVER-01"));
        assert!(!envelope.contains("SERVER-02"));
    }

    #[test]
    fn test_from_output_reports_reason() {
        let err = Envelope::from_output(json!({"output": [1]})).unwrap_err();
        assert!(matches!(err, Error::InvalidEnvelope(ref msg) if msg.contains("line 0")));
    }
}
