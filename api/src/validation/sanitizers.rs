//! Input normalization functions
//!
//! These produce the normalized form of a field that has already passed
//! validation. They never modify their input; callers write the returned
//! value into the outgoing payload.

use serde_json::{Map, Value};

/// Trim leading and trailing whitespace from a string
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Trim a JSON string value; non-strings are returned unchanged
pub fn trim_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(trim(s)),
        other => other.clone(),
    }
}

/// Trim every string element of an array (inclusions, highlights, ...)
pub fn trim_string_items(items: &[Value]) -> Value {
    Value::Array(items.iter().map(trim_value).collect())
}

/// Trim one designated field inside each object of an array
///
/// Used for itinerary entries, where only the free-text field is normalized
/// and every other key is carried over as submitted.
pub fn trim_object_field(items: &[Value], field: &str) -> Value {
    let normalized = items
        .iter()
        .map(|item| match item {
            Value::Object(entry) => {
                let mut entry: Map<String, Value> = entry.clone();
                if let Some(text) = entry.get(field).map(trim_value) {
                    entry.insert(field.to_string(), text);
                }
                Value::Object(entry)
            }
            other => other.clone(),
        })
        .collect();
    Value::Array(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trim() {
        assert_eq!(trim("  hello  "), "hello");
        assert_eq!(trim("\n\tspaces\t\n"), "spaces");
    }

    #[test]
    fn test_trim_value() {
        assert_eq!(trim_value(&json!("  Goa ")), json!("Goa"));
        assert_eq!(trim_value(&json!(4)), json!(4));
    }

    #[test]
    fn test_trim_string_items() {
        let items = vec![json!("  meals "), json!("transfers")];
        assert_eq!(trim_string_items(&items), json!(["meals", "transfers"]));
    }

    #[test]
    fn test_trim_object_field_only_touches_named_field() {
        let items = vec![json!({"day": 1, "description": " see beach ", "note": " keep "})];
        assert_eq!(
            trim_object_field(&items, "description"),
            json!([{"day": 1, "description": "see beach", "note": " keep "}])
        );
    }

    #[test]
    fn test_trim_object_field_leaves_input_untouched() {
        let items = vec![json!({"day": 1, "description": " see beach "})];
        let _ = trim_object_field(&items, "description");
        assert_eq!(items[0]["description"], " see beach ");
    }
}
