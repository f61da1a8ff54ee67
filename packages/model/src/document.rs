//! Loose document model, the shape accepted at the import boundary.
//!
//! This model is deliberately permissive: entries may be bare keys or
//! wrappers, variation lists may be legacy positional arrays, main/sub
//! label parts may be bare strings or `{ "text": ... }` wrappers, and
//! almost everything may be absent. The normalizer is the only sanctioned
//! way to turn a value of this model into the canonical wire form.

use crate::actions::{Action, FlickDirection};
use serde::{Deserialize, Serialize};

/// Root keyboard document as loaded from arbitrary input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Keyboard {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub input_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub interface: Interface,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custard_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Interface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_layout: Option<KeyLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_style: Option<String>,
    #[serde(default)]
    pub keys: Vec<KeyItem>,
}

/// Grid layout.
///
/// The wire field names predate the current orientation: `row_count` is
/// the horizontal extent and `column_count` the vertical one. The wire
/// names are preserved exactly for compatibility; in-memory code only
/// ever sees the intention-revealing names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KeyLayout {
    #[serde(rename = "grid_fit")]
    GridFit {
        #[serde(
            rename = "row_count",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        horizontal_key_count: Option<f64>,
        #[serde(
            rename = "column_count",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        vertical_key_count: Option<f64>,
    },
    #[serde(rename = "grid_scroll")]
    GridScroll {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<String>,
        #[serde(
            rename = "row_count",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        horizontal_key_count: Option<f64>,
        #[serde(
            rename = "column_count",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        vertical_key_count: Option<f64>,
    },
}

/// One entry of `interface.keys`: either an explicit wrapper or a bare
/// custom key from a legacy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyItem {
    Wrapped(KeyWrapper),
    Bare(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    Custom,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyWrapper {
    pub key_type: KeyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier: Option<Specifier>,
    #[serde(default)]
    pub key: KeyPayload,
}

/// Wrapper payload. System keys are a single `type` tag; anything else is
/// custom key content. The two are distinguished structurally because the
/// discriminant (`key_type`) lives on the wrapper, not the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPayload {
    System(SystemKey),
    Custom(Box<Key>),
}

impl Default for KeyPayload {
    fn default() -> Self {
        KeyPayload::Custom(Box::default())
    }
}

/// `type` is required here: an untagged [`KeyPayload`] must not read an
/// empty custom key as a system key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemKey {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Custom key content. `specifier` here is a legacy placement that
/// belongs on the wrapper; normalization hoists or strips it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Key {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<Design>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub press_actions: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longpress_actions: Option<LongpressActions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<VariationItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier: Option<Specifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Design {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Key label in any accepted shape. Variant order encodes the collapse
/// priority: a label carrying several populated shapes reads as the
/// highest-priority one (symbol > text > main/sub).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Symbol {
        system_image: String,
    },
    Text {
        text: String,
    },
    MainSub {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        main: Option<TextPart>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sub: Option<TextPart>,
    },
}

impl Label {
    pub fn text(value: impl Into<String>) -> Self {
        Label::Text { text: value.into() }
    }
}

/// A main/sub label part: bare string or `{ "text": ... }` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextPart {
    Plain(String),
    Wrapped { text: String },
}

impl TextPart {
    pub fn as_str(&self) -> &str {
        match self {
            TextPart::Plain(s) => s,
            TextPart::Wrapped { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LongpressActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// One element of a `variations` list: a tagged flick variation, or a
/// bare key from a legacy positional list (`[left, top, right, bottom]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariationItem {
    Tagged(FlickVariation),
    Legacy(Key),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlickVariation {
    #[serde(rename = "type")]
    pub tag: FlickVariationTag,
    pub direction: FlickDirection,
    #[serde(default)]
    pub key: Key,
}

/// The one legal value of a flick variation's `type` field. Deserializing
/// anything else fails, which is what routes untagged list elements to the
/// legacy arm instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FlickVariationTag {
    #[serde(rename = "flick_variation")]
    #[default]
    FlickVariation,
}

/// Grid placement for an entry. Loose numbers; the normalizer clamps and
/// integerizes (`x`/`y` ≥ 0, `width`/`height` ≥ 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Specifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Specifier {
    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Specifier {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_priority_is_declaration_order() {
        // All three shapes populated: collapses to symbol.
        let label: Label = serde_json::from_str(
            r#"{"system_image":"globe","text":"ab","main":"a","sub":"b"}"#,
        )
        .unwrap();
        assert!(matches!(label, Label::Symbol { .. }));

        // Text beats main/sub.
        let label: Label = serde_json::from_str(r#"{"text":"ab","main":"a"}"#).unwrap();
        assert!(matches!(label, Label::Text { .. }));
    }

    #[test]
    fn test_main_sub_accepts_both_part_shapes() {
        let label: Label =
            serde_json::from_str(r#"{"main":{"text":"a"},"sub":"b"}"#).unwrap();
        match label {
            Label::MainSub { main, sub } => {
                assert_eq!(main.unwrap().as_str(), "a");
                assert_eq!(sub.unwrap().as_str(), "b");
            }
            other => panic!("expected main/sub label, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_variation_list_deserializes() {
        let key: Key = serde_json::from_str(
            r#"{"variations":[{"design":{"label":{"text":"i"}}}]}"#,
        )
        .unwrap();
        let items = key.variations.unwrap();
        assert!(matches!(items[0], VariationItem::Legacy(_)));
    }

    #[test]
    fn test_tagged_variation_deserializes() {
        let key: Key = serde_json::from_str(
            r#"{"variations":[{"type":"flick_variation","direction":"up","key":{}}]}"#,
        )
        .unwrap();
        match &key.variations.unwrap()[0] {
            VariationItem::Tagged(v) => assert_eq!(v.direction, FlickDirection::Top),
            other => panic!("expected tagged variation, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_wire_names_are_preserved() {
        let layout: KeyLayout =
            serde_json::from_str(r#"{"type":"grid_fit","row_count":10,"column_count":4}"#)
                .unwrap();
        match layout {
            KeyLayout::GridFit {
                horizontal_key_count,
                vertical_key_count,
            } => {
                assert_eq!(horizontal_key_count, Some(10.0));
                assert_eq!(vertical_key_count, Some(4.0));
            }
            other => panic!("expected grid_fit, got {:?}", other),
        }
        let back = serde_json::to_value(KeyLayout::GridFit {
            horizontal_key_count: Some(10.0),
            vertical_key_count: Some(4.0),
        })
        .unwrap();
        assert!(back.get("row_count").is_some());
        assert!(back.get("horizontal_key_count").is_none());
    }
}
