use serde_json::Value;

/// Follow a chain of object keys, returning `None` at the first missing or
/// non-object link. Raw findings are arbitrarily incomplete, so every nested
/// read in the extractors goes through here instead of indexing.
pub fn get_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(key))
}

/// Like [`get_path`], but clones the target and maps a missing link to the
/// absent-marker (`Value::Null`).
pub fn path_or_null(value: &Value, path: &[&str]) -> Value {
    get_path(value, path).cloned().unwrap_or(Value::Null)
}

/// First element of a JSON array, `None` for empty arrays and non-arrays.
pub fn first(value: &Value) -> Option<&Value> {
    value.as_array().and_then(|items| items.first())
}

/// Top-level field, mapped to the absent-marker when missing.
pub fn field_or_null(value: &Value, key: &str) -> Value {
    value.get(key).cloned().unwrap_or(Value::Null)
}
