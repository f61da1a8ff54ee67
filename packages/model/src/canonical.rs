//! Canonical wire form, produced only by the normalizer.
//!
//! These types make the strict decoder's structural rules hold by
//! construction: `longpress_actions` and `variations` are always present,
//! nested variation keys cannot carry a specifier or further variations in
//! the type (the normalizer empties them), and `press_actions` is either
//! absent or non-empty.
//!
//! Conversions back into the loose [`crate::document`] model are provided
//! so a canonical document can re-enter any boundary that accepts loose
//! input (idempotence checks, the action engine).

use crate::actions::{Action, FlickDirection};
use crate::document;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyboard {
    pub identifier: String,
    pub language: String,
    pub input_style: String,
    pub metadata: Metadata,
    pub interface: Interface,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub custard_version: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interface {
    pub key_layout: KeyLayout,
    pub key_style: String,
    pub keys: Vec<KeyWrapper>,
}

/// Canonical layout. Wire names `row_count`/`column_count` are kept via
/// renames; see the loose model for the axis-naming note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum KeyLayout {
    #[serde(rename = "grid_fit")]
    GridFit {
        #[serde(rename = "row_count")]
        horizontal_key_count: u32,
        #[serde(rename = "column_count")]
        vertical_key_count: u32,
    },
    #[serde(rename = "grid_scroll")]
    GridScroll {
        #[serde(skip_serializing_if = "Option::is_none")]
        direction: Option<String>,
        #[serde(rename = "row_count", skip_serializing_if = "Option::is_none")]
        horizontal_key_count: Option<f64>,
        #[serde(rename = "column_count", skip_serializing_if = "Option::is_none")]
        vertical_key_count: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyWrapper {
    pub key_type: document::KeyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifier_type: Option<SpecifierType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifier: Option<Specifier>,
    pub key: KeyPayload,
}

impl KeyWrapper {
    /// `specifier_type` is emitted exactly when a specifier is.
    pub fn new(
        key_type: document::KeyType,
        specifier: Option<Specifier>,
        key: KeyPayload,
    ) -> Self {
        KeyWrapper {
            key_type,
            specifier_type: specifier.as_ref().map(|_| SpecifierType::GridFit),
            specifier,
            key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpecifierType {
    #[serde(rename = "grid_fit")]
    GridFit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KeyPayload {
    System(document::SystemKey),
    Custom(Box<Key>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Specifier {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Key {
    pub design: Design,
    /// Never `Some(vec![])`: the reference decoder treats an empty list
    /// differently from an absent one, so empty collapses to absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub press_actions: Option<Vec<Action>>,
    pub longpress_actions: LongpressActions,
    pub variations: Vec<FlickVariation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Canonical label. Text and symbol labels serialize as minimal one-key
/// maps; main/sub labels carry an explicit `"type": "main_and_sub"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    Symbol { system_image: String },
    Text { text: String },
    MainSub { main: String, sub: String },
}

impl Label {
    /// Empty labels are what the unset-entry filter looks for.
    pub fn is_empty(&self) -> bool {
        match self {
            Label::Symbol { .. } => false,
            Label::Text { text } => text.trim().is_empty(),
            Label::MainSub { main, sub } => main.trim().is_empty() && sub.trim().is_empty(),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Label::Symbol { system_image } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("system_image", system_image)?;
                map.end()
            }
            Label::Text { text } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("text", text)?;
                map.end()
            }
            Label::MainSub { main, sub } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "main_and_sub")?;
                map.serialize_entry("main", main)?;
                map.serialize_entry("sub", sub)?;
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongpressActions {
    pub start: Vec<Action>,
    pub repeat: Vec<Action>,
    pub duration: String,
}

impl Default for LongpressActions {
    fn default() -> Self {
        LongpressActions {
            start: Vec::new(),
            repeat: Vec::new(),
            duration: "normal".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlickVariation {
    #[serde(rename = "type")]
    pub tag: document::FlickVariationTag,
    pub direction: FlickDirection,
    pub key: Key,
}

// ---------------------------------------------------------------------------
// Canonical → loose. Lossless by design: the loose model is a superset.
// ---------------------------------------------------------------------------

impl From<Keyboard> for document::Keyboard {
    fn from(kb: Keyboard) -> Self {
        document::Keyboard {
            identifier: kb.identifier,
            language: kb.language,
            input_style: kb.input_style,
            metadata: Some(document::Metadata {
                custard_version: Some(kb.metadata.custard_version),
                display_name: Some(kb.metadata.display_name),
            }),
            interface: document::Interface {
                key_layout: Some(kb.interface.key_layout.into()),
                key_style: Some(kb.interface.key_style),
                keys: kb
                    .interface
                    .keys
                    .into_iter()
                    .map(|wrapper| document::KeyItem::Wrapped(wrapper.into()))
                    .collect(),
            },
        }
    }
}

impl From<KeyLayout> for document::KeyLayout {
    fn from(layout: KeyLayout) -> Self {
        match layout {
            KeyLayout::GridFit {
                horizontal_key_count,
                vertical_key_count,
            } => document::KeyLayout::GridFit {
                horizontal_key_count: Some(horizontal_key_count as f64),
                vertical_key_count: Some(vertical_key_count as f64),
            },
            KeyLayout::GridScroll {
                direction,
                horizontal_key_count,
                vertical_key_count,
            } => document::KeyLayout::GridScroll {
                direction,
                horizontal_key_count,
                vertical_key_count,
            },
        }
    }
}

impl From<KeyWrapper> for document::KeyWrapper {
    fn from(wrapper: KeyWrapper) -> Self {
        document::KeyWrapper {
            key_type: wrapper.key_type,
            specifier_type: wrapper
                .specifier_type
                .map(|_| "grid_fit".to_string()),
            specifier: wrapper.specifier.map(Into::into),
            key: match wrapper.key {
                KeyPayload::System(system) => document::KeyPayload::System(system),
                KeyPayload::Custom(key) => {
                    document::KeyPayload::Custom(Box::new((*key).into()))
                }
            },
        }
    }
}

impl From<Specifier> for document::Specifier {
    fn from(sp: Specifier) -> Self {
        document::Specifier::at(
            sp.x as f64,
            sp.y as f64,
            sp.width as f64,
            sp.height as f64,
        )
    }
}

impl From<Key> for document::Key {
    fn from(key: Key) -> Self {
        document::Key {
            design: Some(document::Design {
                label: key.design.label.map(Into::into),
                color: key.design.color,
            }),
            press_actions: key.press_actions,
            longpress_actions: Some(document::LongpressActions {
                start: Some(key.longpress_actions.start),
                repeat: Some(key.longpress_actions.repeat),
                duration: Some(key.longpress_actions.duration),
            }),
            variations: Some(
                key.variations
                    .into_iter()
                    .map(|v| {
                        document::VariationItem::Tagged(document::FlickVariation {
                            tag: v.tag,
                            direction: v.direction,
                            key: v.key.into(),
                        })
                    })
                    .collect(),
            ),
            specifier: None,
        }
    }
}

impl From<Label> for document::Label {
    fn from(label: Label) -> Self {
        match label {
            Label::Symbol { system_image } => document::Label::Symbol { system_image },
            Label::Text { text } => document::Label::Text { text },
            Label::MainSub { main, sub } => document::Label::MainSub {
                main: Some(document::TextPart::Plain(main)),
                sub: Some(document::TextPart::Plain(sub)),
            },
        }
    }
}
