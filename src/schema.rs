//! Static product schema.
//!
//! Embedded JSON describing the product summary and the admin navigation.
//! Parsed once at startup and shared immutably; the content itself is
//! editorial and lives in `product_schema.json`.

use serde_json::Value;

const SCHEMA_JSON: &str = include_str!("product_schema.json");

/// Parse the embedded product schema.
pub fn product_schema() -> Result<Value, serde_json::Error> {
    serde_json::from_str(SCHEMA_JSON)
}

/// Sidebar navigation entries, or an empty list when the schema carries
/// none (the nav template then falls back to a single Home link).
pub fn sidebar(schema: &Value) -> Value {
    schema
        .pointer("/app/navigation/sidebar")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_schema_parses() {
        let schema = product_schema().unwrap();
        assert!(schema["summary"]["title"].is_string());
        assert!(schema["app"]["navigation"]["sidebar"].is_array());
    }

    #[test]
    fn test_sidebar_defaults_to_empty_list() {
        let schema = serde_json::json!({});
        assert_eq!(sidebar(&schema), serde_json::json!([]));
    }
}
