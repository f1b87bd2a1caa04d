//! Argument shapes shared by tools and bridge handlers.

use crate::error::{ToolError, ToolResult};
use medcrm_core::DateKey;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `update*` arguments: the record to change and the fields to replace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateArgs<P> {
    pub id: String,
    pub changes: P,
}

/// `delete*` arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdArgs {
    pub id: String,
}

/// `getEventsForDate` arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateArgs {
    pub date: DateKey,
}

/// `list*` arguments: none.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoArgs {}

/// Deserializes tool arguments, treating `null` as an empty object.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> ToolResult<T> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_args_parse_as_empty_object() {
        let parsed: NoArgs = parse_args(Value::Null).expect("null should be accepted");
        assert_eq!(parsed, NoArgs {});
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = parse_args::<IdArgs>(json!({"id": "S001", "force": true}))
            .expect_err("extra field should fail");
        assert!(matches!(err, ToolError::InvalidArguments(msg) if msg.contains("force")));
    }

    #[test]
    fn test_date_args_reject_unpadded_dates() {
        assert!(parse_args::<DateArgs>(json!({"date": "2025-3-5"})).is_err());
        assert!(parse_args::<DateArgs>(json!({"date": "2025-03-05"})).is_ok());
    }
}
