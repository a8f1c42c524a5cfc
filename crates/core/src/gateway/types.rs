//! Gateway value types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A link between a tenant and one external accounting system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Connection identifier used to address actions.
    pub id: String,
    /// Connection display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Integration the connection belongs to.
    #[serde(default)]
    pub integration_id: Option<String>,
    /// Whether the remote side reports the connection as disconnected.
    #[serde(default)]
    pub disconnected: bool,
}

impl Connection {
    /// Creates a connection with only an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            integration_id: None,
            disconnected: false,
        }
    }
}

/// Result of running an action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRun {
    /// Action output, verbatim.
    pub output: Value,
    /// Cursor for the next page; `None` on the last page.
    pub cursor: Option<String>,
}

impl ActionRun {
    /// Wraps an action output, reading the next-page cursor from `output.cursor`.
    ///
    /// A missing, null, non-string or empty cursor means there are no more pages.
    #[must_use]
    pub fn from_output(output: Value) -> Self {
        let cursor = output
            .get("cursor")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Self { output, cursor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"records": [], "cursor": "c1"}), Some("c1"))]
    #[case(json!({"records": []}), None)]
    #[case(json!({"records": [], "cursor": null}), None)]
    #[case(json!({"records": [], "cursor": ""}), None)]
    #[case(json!({"records": [], "cursor": 7}), None)]
    #[case(json!(null), None)]
    fn test_cursor_extraction(#[case] output: Value, #[case] expected: Option<&str>) {
        let run = ActionRun::from_output(output);
        assert_eq!(run.cursor.as_deref(), expected);
    }

    #[test]
    fn test_connection_deserializes_partial_payload() {
        let conn: Connection = serde_json::from_value(json!({
            "id": "conn-1",
            "name": "QuickBooks",
            "integrationId": "int-9",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(conn.id, "conn-1");
        assert_eq!(conn.integration_id.as_deref(), Some("int-9"));
        assert!(!conn.disconnected);
    }
}
