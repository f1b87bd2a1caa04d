use crate::error::ToolError;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Structured result of one tool call: `{success, error?, <key>?}`.
///
/// Successful calls carry their result under a key naming what it is (`patient`, `staff`,
/// `events`, ...). Failed calls carry a human-readable `error` and nothing else.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolResponse {
    success: bool,
    error: Option<String>,
    payload: Option<(&'static str, Value)>,
}

impl ToolResponse {
    pub fn ok(key: &'static str, value: Value) -> Self {
        Self {
            success: true,
            error: None,
            payload: Some((key, value)),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            payload: None,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The result value when its key is `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.payload {
            Some((k, v)) if *k == key => Some(v),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({"success": false, "error": e.to_string()})
        })
    }
}

impl From<ToolError> for ToolResponse {
    fn from(err: ToolError) -> Self {
        Self::failure(err.to_string())
    }
}

impl Serialize for ToolResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.error.is_some()) + usize::from(self.payload.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("success", &self.success)?;
        if let Some(error) = &self.error {
            map.serialize_entry("error", error)?;
        }
        if let Some((key, value)) = &self.payload {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serializes_payload_under_key() {
        let resp = ToolResponse::ok("patient", json!({"id": "P-1029"}));
        assert_eq!(
            resp.to_json(),
            json!({"success": true, "patient": {"id": "P-1029"}})
        );
    }

    #[test]
    fn test_not_mounted_failure_message() {
        let resp = ToolResponse::from(ToolError::NotMounted {
            target: "CRM data store",
        });
        assert_eq!(
            resp.to_json(),
            json!({"success": false, "error": "CRM data store not mounted."})
        );
    }

    #[test]
    fn test_get_only_matches_payload_key() {
        let resp = ToolResponse::ok("events", json!([]));
        assert_eq!(resp.get("events"), Some(&json!([])));
        assert_eq!(resp.get("patient"), None);
    }
}
