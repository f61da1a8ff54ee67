//! # Custard Validator
//!
//! Structural acceptance check for keyboard documents, operating on raw
//! JSON. The verdict must match the reference decoder's accept/reject
//! decision on every input — the rules both sides implement are frozen
//! in `REFERENCE.md`, and `tests/differential.rs` holds the harness that
//! keeps the two honest.
//!
//! The predicate works on `serde_json::Value` rather than the typed
//! model on purpose: the reference decoder consumes raw JSON, so a typed
//! argument would already have decided most of the answer.

use serde_json::Value;

/// Would the reference decoder accept this document?
///
/// Total and pure; there is no partial acceptance and no error detail.
/// Callers that need to know *why* a document was rejected should run it
/// through the strict decoder instead.
pub fn is_acceptable(doc: &Value) -> bool {
    let Some(root) = doc.as_object() else {
        return false;
    };

    if !is_string(root.get("identifier"))
        || !is_string(root.get("language"))
        || !is_string(root.get("input_style"))
    {
        return false;
    }

    let Some(metadata) = root.get("metadata").and_then(Value::as_object) else {
        return false;
    };
    if !is_string(metadata.get("custard_version")) || !is_string(metadata.get("display_name")) {
        return false;
    }

    let Some(interface) = root.get("interface").and_then(Value::as_object) else {
        return false;
    };
    let layout_type_ok = interface
        .get("key_layout")
        .and_then(Value::as_object)
        .map_or(false, |layout| is_string(layout.get("type")));
    if !layout_type_ok || !is_string(interface.get("key_style")) {
        return false;
    }
    let Some(keys) = interface.get("keys").and_then(Value::as_array) else {
        return false;
    };

    keys.iter().all(entry_ok)
}

fn entry_ok(entry: &Value) -> bool {
    match present(entry.get("key_type")) {
        Some(Value::String(tag)) if tag == "system" => entry
            .get("key")
            .map_or(false, |key| is_string(key.get("type"))),
        Some(Value::String(tag)) if tag == "custom" => {
            entry.get("key").map_or(false, custom_key_ok)
        }
        // No wrapper tag (or a null one): the entry is read as a bare
        // custom key.
        None => custom_key_ok(entry),
        // Anything else in the tag slot is unusable.
        Some(_) => false,
    }
}

fn custom_key_ok(key: &Value) -> bool {
    let Some(design) = key.get("design").and_then(Value::as_object) else {
        return false;
    };
    if let Some(label) = present(design.get("label")) {
        if !label_ok(label) {
            return false;
        }
    }
    if let Some(press) = present(key.get("press_actions")) {
        if !press.is_array() {
            return false;
        }
    }
    // Stricter than the in-memory model: both fields must be present,
    // and null does not count.
    if !key.get("longpress_actions").map_or(false, Value::is_object) {
        return false;
    }
    key.get("variations").map_or(false, Value::is_array)
}

fn label_ok(label: &Value) -> bool {
    let text_ok = is_string(label.get("text"));
    let symbol_ok = is_string(label.get("system_image"));
    let main_ok = present(label.get("main")).map_or(false, text_part_ok);
    let sub_ok = present(label.get("sub")).map_or(true, text_part_ok);
    text_ok || symbol_ok || (main_ok && sub_ok)
}

/// JSON null counts as absent for optional fields.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// A main/sub part: bare string or `{ "text": string }`.
fn text_part_ok(part: &Value) -> bool {
    part.is_string() || is_string(part.get("text"))
}

fn is_string(value: Option<&Value>) -> bool {
    value.map_or(false, Value::is_string)
}
