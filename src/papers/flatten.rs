use serde_json::Value;

use super::types::Row;

/// Fields stored as JSON text instead of being expanded.
pub const KEEP_AS_JSON: &[&str] = &["material_composition", "material_atom_sites"];

/// Flatten a nested object into a single-level row.
///
/// Nested objects are expanded with `parent_child` keys. Arrays, and any key
/// (bare or prefixed) listed in `keep_as_json`, are stored as compact JSON
/// text. Colliding keys overwrite in iteration order.
pub fn flatten_json(data: &Row, keep_as_json: &[&str]) -> Row {
    let mut flattened = Row::new();
    flatten_into(&mut flattened, data, "", keep_as_json);
    flattened
}

fn flatten_into(out: &mut Row, data: &Row, prefix: &str, keep_as_json: &[&str]) {
    for (key, value) in data {
        let new_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}_{}", prefix, key)
        };

        if keep_as_json.contains(&new_key.as_str()) || keep_as_json.contains(&key.as_str()) {
            out.insert(new_key, Value::String(value.to_string()));
            continue;
        }

        match value {
            Value::Object(child) => flatten_into(out, child, &new_key, keep_as_json),
            Value::Array(_) => {
                out.insert(new_key, Value::String(value.to_string()));
            }
            scalar => {
                out.insert(new_key, scalar.clone());
            }
        }
    }
}
