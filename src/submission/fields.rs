//! Field rendering — ordered allow-list pass, then fallthrough for unknown keys.

use serde_json::{Map, Value};

/// Known enquiry fields, in rendering order.
pub const FIELD_ORDER: [&str; 15] = [
    "name",
    "email",
    "phone",
    "postcode",
    "property",
    "paint_supply",
    "room_size_mode",
    "rooms_count",
    "include_kitchens",
    "include_bathrooms",
    "est_area",
    "est_height",
    "details",
    "start_when",
    "message",
];

/// Render the field mapping to `key: value` lines joined by newlines.
///
/// Known keys come first in `FIELD_ORDER`, included only when present
/// (non-null and non-empty after coercion). Unknown keys follow in
/// encounter order and are included regardless of emptiness, so a new
/// form field survives without a code change here.
pub fn render_fields(fields: &Map<String, Value>) -> String {
    let mut lines = Vec::new();

    for key in FIELD_ORDER {
        if let Some(value) = fields.get(key) {
            if matches!(value, Value::Null) {
                continue;
            }
            let text = coerce(value);
            if !text.is_empty() {
                lines.push(format!("{key}: {text}"));
            }
        }
    }

    for (key, value) in fields {
        if !FIELD_ORDER.contains(&key.as_str()) {
            lines.push(format!("{key}: {}", coerce(value)));
        }
    }

    lines.join("\n")
}

/// Coerce a JSON value to its display string.
///
/// Strings render verbatim, null renders empty, everything else uses its
/// compact JSON form (numbers, booleans, nested structures).
fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
