//! Batch application of edit operations.
//!
//! The engine is a pure function over the loose document model: it deep
//! copies its input, applies every operation in order, and returns the
//! new document together with a human-readable change log. Addressing
//! misses (out-of-range index, absent flick direction, system entry
//! where a custom key is expected) are silent per-operation no-ops, so
//! speculative edits from a generative source never abort a batch.
//!
//! The output is not guaranteed to pass the structural validator
//! verbatim; callers normalize before export.

use custard_model::document::{
    Design, FlickVariation, FlickVariationTag, Key, KeyItem, KeyLayout, KeyPayload, KeyType,
    KeyWrapper, Keyboard, Label, LongpressActions, Metadata, Specifier, TextPart, VariationItem,
};
use custard_model::{Action, FlickDirection};
use tracing::{debug, warn};

use crate::operations::{Edit, Operation};

const DEFAULT_VERSION: &str = "1.2";
const GRID_FIT: &str = "grid_fit";

/// Apply `ops` to a copy of `kb`, in order. Each operation sees the
/// cumulative result of the ones before it; indices are raw positions in
/// the entries array at execution time and are never re-based after a
/// removal earlier in the batch.
pub fn apply(kb: &Keyboard, ops: &[Operation]) -> (Keyboard, Vec<String>) {
    let mut kb = kb.clone();
    ensure_shape(&mut kb);

    debug!(operations = ops.len(), "Applying edit batch");

    let mut log = Vec::new();
    for op in ops {
        match op {
            Operation::Known(edit) => apply_edit(&mut kb, edit, &mut log),
            Operation::Unknown(_) => {
                let line = match op.unknown_tag() {
                    Some(tag) => {
                        warn!(tag = %tag, "Skipping unsupported operation");
                        format!("Unsupported operation \"{tag}\"")
                    }
                    None => {
                        warn!("Skipping unsupported operation without a type tag");
                        "Unsupported operation".to_string()
                    }
                };
                log.push(line);
            }
        }
    }

    (kb, log)
}

/// Join a change log into the batch's one-line summary.
pub fn summarize(log: &[String]) -> String {
    if log.is_empty() {
        "Applied operations".to_string()
    } else {
        log.join(" / ")
    }
}

fn apply_edit(kb: &mut Keyboard, edit: &Edit, log: &mut Vec<String>) {
    match edit {
        Edit::AddKey {
            x,
            y,
            width,
            height,
        } => {
            let w = cell_extent(width.unwrap_or(1.0));
            let h = cell_extent(height.unwrap_or(1.0));
            kb.interface.keys.push(KeyItem::Wrapped(KeyWrapper {
                key_type: KeyType::Custom,
                specifier_type: Some(GRID_FIT.to_string()),
                specifier: Some(Specifier::at(*x, *y, w, h)),
                key: KeyPayload::Custom(Box::new(blank_key())),
            }));
            log.push(format!("Added key at ({x}, {y})"));
        }
        Edit::RemoveKey { index } => {
            if let Ok(idx) = usize::try_from(*index) {
                if idx < kb.interface.keys.len() {
                    kb.interface.keys.remove(idx);
                    log.push(format!("Removed key #{}", idx + 1));
                }
            }
        }
        Edit::MoveKey { index, x, y } => {
            if let Some(specifier) = specifier_at(kb, *index) {
                specifier.x = Some(*x);
                specifier.y = Some(*y);
                log.push(format!("Moved key #{} to ({x}, {y})", index + 1));
            }
        }
        Edit::SetKeySize {
            index,
            width,
            height,
        } => {
            if let Some(specifier) = specifier_at(kb, *index) {
                specifier.width = Some(cell_extent(*width));
                specifier.height = Some(cell_extent(*height));
                log.push(format!("Resized key #{} to {width}x{height}", index + 1));
            }
        }
        Edit::SetKeyLabel { index, text } => {
            if let Some(key) = key_at(kb, *index) {
                set_text_label(key, text);
                log.push(format!("Set key #{} label to \"{text}\"", index + 1));
            }
        }
        Edit::SetKeyMainLabel { index, text } => {
            if let Some(key) = key_at(kb, *index) {
                set_main_label(key, text);
                log.push(format!("Set key #{} main label to \"{text}\"", index + 1));
            }
        }
        Edit::SetKeySubLabel { index, text } => {
            if let Some(key) = key_at(kb, *index) {
                set_sub_label(key, text);
                log.push(format!("Set key #{} sub label to \"{text}\"", index + 1));
            }
        }
        Edit::SetKeyLabelMainSub { index, main, sub } => {
            if let Some(key) = key_at(kb, *index) {
                set_main_label(key, main);
                if let Some(sub) = sub {
                    set_sub_label(key, sub);
                }
                log.push(format!("Set key #{} main/sub label", index + 1));
            }
        }
        Edit::SetKeyColor { index, color } => {
            if let Some(key) = key_at(kb, *index) {
                let design = key.design.get_or_insert_with(default_design);
                design.color = Some(color.clone());
                log.push(format!("Set key #{} color to {color}", index + 1));
            }
        }
        Edit::SetPressInput { index, text } => {
            if let Some(key) = key_at(kb, *index) {
                key.press_actions = Some(vec![Action::input(text.clone())]);
                log.push(format!("Set key #{} input to \"{text}\"", index + 1));
            }
        }
        Edit::SetKeyboardLayout {
            row_count,
            column_count,
        } => {
            // The wire axis names are swapped: row_count is the
            // horizontal extent, column_count the vertical one.
            if let Some(KeyLayout::GridFit {
                horizontal_key_count,
                vertical_key_count,
            }) = kb.interface.key_layout.as_mut()
            {
                *horizontal_key_count = Some(cell_extent(*row_count));
                *vertical_key_count = Some(cell_extent(*column_count));
                log.push(format!("Set layout to {row_count} x {column_count}"));
            }
        }
        Edit::SetInputStyle { input_style } => {
            kb.input_style = input_style.clone();
            log.push(format!("Set input style to {input_style}"));
        }
        Edit::SetLanguage { language } => {
            kb.language = language.clone();
            log.push(format!("Set language to {language}"));
        }
        Edit::Rename {
            identifier,
            display_name,
        } => {
            if let Some(identifier) = identifier.as_deref().filter(|s| !s.is_empty()) {
                kb.identifier = identifier.to_string();
            }
            if let Some(display_name) = display_name.as_deref().filter(|s| !s.is_empty()) {
                let metadata = kb.metadata.get_or_insert_with(|| Metadata {
                    custard_version: Some(DEFAULT_VERSION.to_string()),
                    display_name: None,
                });
                metadata.display_name = Some(display_name.to_string());
            }
            log.push("Renamed keyboard".to_string());
        }
        Edit::AddFlickVariation { index, direction } => {
            if let Some(key) = key_at(kb, *index) {
                if flick_entry(key, *direction, false).is_none() {
                    flick_entry(key, *direction, true);
                    log.push(format!("Added flick \"{direction}\" to key #{}", index + 1));
                }
            }
        }
        Edit::RemoveFlickVariation { index, direction } => {
            if let Some(key) = key_at(kb, *index) {
                ensure_flick_objects(key);
                let variations = key.variations.get_or_insert_with(Vec::new);
                let pos = variations.iter().position(|item| {
                    matches!(item, VariationItem::Tagged(v) if v.direction == *direction)
                });
                if let Some(pos) = pos {
                    variations.remove(pos);
                    log.push(format!(
                        "Removed flick \"{direction}\" from key #{}",
                        index + 1
                    ));
                }
            }
        }
        Edit::SetFlickLabel {
            index,
            direction,
            text,
        } => {
            if let Some(key) = key_at(kb, *index) {
                if let Some(entry) = flick_entry(key, *direction, true) {
                    set_text_label(&mut entry.key, text);
                    log.push(format!(
                        "Set key #{} flick \"{direction}\" label to \"{text}\"",
                        index + 1
                    ));
                }
            }
        }
        Edit::SetFlickMainLabel {
            index,
            direction,
            text,
        } => {
            if let Some(key) = key_at(kb, *index) {
                if let Some(entry) = flick_entry(key, *direction, true) {
                    set_main_label(&mut entry.key, text);
                    log.push(format!(
                        "Set key #{} flick \"{direction}\" main label to \"{text}\"",
                        index + 1
                    ));
                }
            }
        }
        Edit::SetFlickSubLabel {
            index,
            direction,
            text,
        } => {
            if let Some(key) = key_at(kb, *index) {
                if let Some(entry) = flick_entry(key, *direction, true) {
                    set_sub_label(&mut entry.key, text);
                    log.push(format!(
                        "Set key #{} flick \"{direction}\" sub label to \"{text}\"",
                        index + 1
                    ));
                }
            }
        }
        Edit::SetFlickLabelMainSub {
            index,
            direction,
            main,
            sub,
        } => {
            if let Some(key) = key_at(kb, *index) {
                if let Some(entry) = flick_entry(key, *direction, true) {
                    set_main_label(&mut entry.key, main);
                    if let Some(sub) = sub {
                        set_sub_label(&mut entry.key, sub);
                    }
                    log.push(format!(
                        "Set key #{} flick \"{direction}\" main/sub label",
                        index + 1
                    ));
                }
            }
        }
        Edit::SetFlickInput {
            index,
            direction,
            text,
        } => {
            if let Some(key) = key_at(kb, *index) {
                if let Some(entry) = flick_entry(key, *direction, true) {
                    entry.key.press_actions = Some(vec![Action::input(text.clone())]);
                    log.push(format!(
                        "Set key #{} flick \"{direction}\" input to \"{text}\"",
                        index + 1
                    ));
                }
            }
        }
        Edit::SetFlickColor {
            index,
            direction,
            color,
        } => {
            if let Some(key) = key_at(kb, *index) {
                if let Some(entry) = flick_entry(key, *direction, true) {
                    let design = entry.key.design.get_or_insert_with(default_design);
                    design.color = Some(color.clone());
                    log.push(format!(
                        "Set key #{} flick \"{direction}\" color to {color}",
                        index + 1
                    ));
                }
            }
        }
    }
}

/// Fill in the skeleton a partially-specified document may lack, so
/// every later operation has a layout and a metadata block to write to.
fn ensure_shape(kb: &mut Keyboard) {
    if kb.interface.key_layout.is_none() {
        kb.interface.key_layout = Some(KeyLayout::GridFit {
            horizontal_key_count: Some(4.0),
            vertical_key_count: Some(10.0),
        });
    }
    if kb.metadata.is_none() {
        let display_name = if kb.identifier.is_empty() {
            "keyboard".to_string()
        } else {
            kb.identifier.clone()
        };
        kb.metadata = Some(Metadata {
            custard_version: Some(DEFAULT_VERSION.to_string()),
            display_name: Some(display_name),
        });
    }
}

/// Custom key content addressed by a zero-based entry index. System
/// entries and out-of-range indices are addressing misses.
fn key_at(kb: &mut Keyboard, index: i64) -> Option<&mut Key> {
    let idx = usize::try_from(index).ok()?;
    match kb.interface.keys.get_mut(idx)? {
        KeyItem::Bare(key) => Some(key),
        KeyItem::Wrapped(wrapper) => match &mut wrapper.key {
            KeyPayload::Custom(key) => Some(key),
            KeyPayload::System(_) => None,
        },
    }
}

/// Placement of the entry at `index`, if it has one.
fn specifier_at(kb: &mut Keyboard, index: i64) -> Option<&mut Specifier> {
    let idx = usize::try_from(index).ok()?;
    match kb.interface.keys.get_mut(idx)? {
        KeyItem::Wrapped(wrapper) => wrapper.specifier.as_mut(),
        KeyItem::Bare(key) => key.specifier.as_mut(),
    }
}

/// Upgrade a legacy positional variation list to tagged flick objects,
/// in place. Tagged lists and empty lists pass through untouched.
fn ensure_flick_objects(key: &mut Key) {
    let variations = key.variations.get_or_insert_with(Vec::new);
    if !matches!(variations.first(), Some(VariationItem::Legacy(_))) {
        return;
    }
    let items = std::mem::take(variations);
    *variations = FlickDirection::LEGACY_ORDER
        .iter()
        .zip(items)
        .map(|(direction, item)| {
            let mut nested = match item {
                VariationItem::Legacy(key) => key,
                VariationItem::Tagged(variation) => variation.key,
            };
            let longpress = nested.longpress_actions.get_or_insert_with(Default::default);
            longpress.start.get_or_insert_with(Vec::new);
            longpress.repeat.get_or_insert_with(Vec::new);
            longpress
                .duration
                .get_or_insert_with(|| "normal".to_string());
            VariationItem::Tagged(FlickVariation {
                tag: FlickVariationTag::default(),
                direction: *direction,
                key: nested,
            })
        })
        .collect();
}

/// Find the variation for `direction`, creating a blank one on demand.
fn flick_entry(
    key: &mut Key,
    direction: FlickDirection,
    create: bool,
) -> Option<&mut FlickVariation> {
    ensure_flick_objects(key);
    let variations = key.variations.get_or_insert_with(Vec::new);
    let pos = variations
        .iter()
        .position(|item| matches!(item, VariationItem::Tagged(v) if v.direction == direction));
    let pos = match pos {
        Some(pos) => pos,
        None if create => {
            variations.push(VariationItem::Tagged(FlickVariation {
                tag: FlickVariationTag::default(),
                direction,
                key: blank_key(),
            }));
            variations.len() - 1
        }
        None => return None,
    };
    match &mut variations[pos] {
        VariationItem::Tagged(variation) => Some(variation),
        VariationItem::Legacy(_) => None,
    }
}

fn set_text_label(key: &mut Key, text: &str) {
    let design = key.design.get_or_insert_with(default_design);
    design.label = Some(Label::text(text));
}

fn set_main_label(key: &mut Key, text: &str) {
    to_main_sub(key);
    if let Some(Design {
        label: Some(Label::MainSub { main, .. }),
        ..
    }) = key.design.as_mut()
    {
        *main = Some(TextPart::Wrapped {
            text: text.to_string(),
        });
    }
}

fn set_sub_label(key: &mut Key, text: &str) {
    to_main_sub(key);
    if let Some(Design {
        label: Some(Label::MainSub { sub, .. }),
        ..
    }) = key.design.as_mut()
    {
        *sub = Some(TextPart::Wrapped {
            text: text.to_string(),
        });
    }
}

/// Rewrite the label as main/sub, carrying existing text over as the
/// main part. Labels already in main/sub form are kept as they are.
fn to_main_sub(key: &mut Key) {
    let design = key.design.get_or_insert_with(default_design);
    let label = design.label.get_or_insert_with(|| Label::text(""));
    if !matches!(label, Label::MainSub { .. }) {
        let main_text = match label {
            Label::Text { text } => text.clone(),
            _ => String::new(),
        };
        *label = Label::MainSub {
            main: Some(TextPart::Wrapped { text: main_text }),
            sub: None,
        };
    }
}

/// Cell extents are whole cells, at least one. NaN clamps to one.
fn cell_extent(value: f64) -> f64 {
    value.floor().max(1.0)
}

fn default_design() -> Design {
    Design {
        label: Some(Label::text("")),
        color: Some("normal".to_string()),
    }
}

/// A fully materialized empty custom key, used both for `AddKey` and for
/// flick variations created on write.
fn blank_key() -> Key {
    Key {
        design: Some(default_design()),
        press_actions: Some(Vec::new()),
        longpress_actions: Some(LongpressActions {
            start: Some(Vec::new()),
            repeat: Some(Vec::new()),
            duration: Some("normal".to_string()),
        }),
        variations: Some(Vec::new()),
        specifier: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{Edit, Operation};

    fn one_key_doc() -> Keyboard {
        serde_json::from_str(
            r#"{
                "identifier": "t",
                "interface": { "keys": [
                    { "design": { "label": { "text": "a" } },
                      "press_actions": [{ "type": "input", "text": "a" }] }
                ] }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_input_document_is_not_mutated() {
        let original = one_key_doc();
        let ops = [Operation::Known(Edit::SetKeyLabel {
            index: 0,
            text: "b".to_string(),
        })];
        let (_, log) = apply(&original, &ops);
        assert_eq!(log.len(), 1);
        assert_eq!(original, one_key_doc());
    }

    #[test]
    fn test_system_entry_is_an_addressing_miss() {
        let kb: Keyboard = serde_json::from_str(
            r#"{ "identifier": "t", "interface": { "keys": [
                { "key_type": "system", "key": { "type": "enter" } }
            ] } }"#,
        )
        .unwrap();
        let ops = [Operation::Known(Edit::SetKeyLabel {
            index: 0,
            text: "x".to_string(),
        })];
        let (after, log) = apply(&kb, &ops);
        assert!(log.is_empty());
        assert_eq!(after.interface.keys, kb.interface.keys);
    }

    #[test]
    fn test_negative_index_is_a_silent_no_op() {
        let (after, log) = apply(
            &one_key_doc(),
            &[Operation::Known(Edit::RemoveKey { index: -1 })],
        );
        assert!(log.is_empty());
        assert_eq!(after.interface.keys.len(), 1);
    }

    #[test]
    fn test_add_key_appends_wrapped_entry() {
        let ops = [Operation::Known(Edit::AddKey {
            x: 2.0,
            y: 3.0,
            width: None,
            height: Some(0.2),
        })];
        let (after, log) = apply(&one_key_doc(), &ops);
        assert_eq!(log, vec!["Added key at (2, 3)".to_string()]);
        match after.interface.keys.last() {
            Some(KeyItem::Wrapped(wrapper)) => {
                let spec = wrapper.specifier.as_ref().unwrap();
                assert_eq!(spec.x, Some(2.0));
                // Extents are floored and clamped to at least one cell.
                assert_eq!(spec.height, Some(1.0));
            }
            other => panic!("expected wrapped entry, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_edit_uses_swapped_wire_axes() {
        let ops = [Operation::Known(Edit::SetKeyboardLayout {
            row_count: 5.0,
            column_count: 4.0,
        })];
        let (after, _) = apply(&one_key_doc(), &ops);
        let value = serde_json::to_value(&after).unwrap();
        assert_eq!(value["interface"]["key_layout"]["row_count"], 5.0);
        assert_eq!(value["interface"]["key_layout"]["column_count"], 4.0);
    }

    #[test]
    fn test_rename_without_fields_still_logs() {
        let ops = [Operation::Known(Edit::Rename {
            identifier: None,
            display_name: None,
        })];
        let (after, log) = apply(&one_key_doc(), &ops);
        assert_eq!(after.identifier, "t");
        assert_eq!(log, vec!["Renamed keyboard".to_string()]);
    }

    #[test]
    fn test_summary_joins_log_lines() {
        assert_eq!(
            summarize(&["a".to_string(), "b".to_string()]),
            "a / b".to_string()
        );
        assert_eq!(summarize(&[]), "Applied operations".to_string());
    }
}
