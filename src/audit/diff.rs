//! Human-readable diffs for update entries

use serde_json::Value;

/// Fields that change on every write and say nothing about the edit
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Summarize top-level changes between two snapshots
///
/// Returns `None` when nothing meaningful changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();

    for (key, before_val) in before_obj {
        if IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match after_obj.get(key) {
            Some(after_val) if after_val != before_val => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            Some(_) => {}
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
        }
    }

    for (key, after_val) in after_obj {
        if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
            changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_added_removed() {
        let before = json!({"title": "Standup", "location": "Room 1"});
        let after = json!({"title": "Daily standup", "frequency": "daily"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("title: \"Standup\" -> \"Daily standup\""));
        assert!(diff.contains("location: \"Room 1\" -> (removed)"));
        assert!(diff.contains("frequency: (added) -> \"daily\""));
    }

    #[test]
    fn test_timestamp_only_change_is_no_diff() {
        let before = json!({"assigned": 1000, "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"assigned": 1000, "updated_at": "2025-01-02T00:00:00Z"});
        assert_eq!(generate_diff(&before, &after), None);
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)), Some("1 -> 2".to_string()));
        assert_eq!(generate_diff(&json!(true), &json!(true)), None);
    }

    #[test]
    fn test_long_multibyte_string_truncation() {
        let long = "€".repeat(80);
        let diff = generate_diff(&json!({"memo": "x"}), &json!({"memo": long})).unwrap();
        assert!(diff.ends_with("...\""));
    }
}
