//! Edit operation vocabulary.
//!
//! Operations arrive as tagged JSON from a generative or GUI-driven
//! source. The field set of each tag is fixed; additive fields are
//! ignored. Tags this crate does not model are preserved as raw values
//! so the engine can report them instead of failing the batch.

use custard_model::FlickDirection;
use serde::{Deserialize, Serialize};

/// One operation of an edit batch: a modeled edit, or a raw value whose
/// tag the engine does not recognize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operation {
    Known(Edit),
    Unknown(serde_json::Value),
}

impl Operation {
    /// The `type` tag of an unrecognized operation, if it carries one.
    pub fn unknown_tag(&self) -> Option<&str> {
        match self {
            Operation::Known(_) => None,
            Operation::Unknown(value) => value.get("type").and_then(|t| t.as_str()),
        }
    }
}

/// Modeled edits. Key indices are zero-based positions in the flat
/// entries array at the time the edit executes; indices are never
/// re-based after a removal earlier in the same batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Edit {
    AddKey {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
    },
    RemoveKey {
        index: i64,
    },
    MoveKey {
        index: i64,
        x: f64,
        y: f64,
    },
    SetKeySize {
        index: i64,
        width: f64,
        height: f64,
    },
    SetKeyLabel {
        index: i64,
        text: String,
    },
    SetKeyColor {
        index: i64,
        color: String,
    },
    SetPressInput {
        index: i64,
        text: String,
    },
    SetKeyMainLabel {
        index: i64,
        text: String,
    },
    SetKeySubLabel {
        index: i64,
        text: String,
    },
    SetKeyLabelMainSub {
        index: i64,
        main: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sub: Option<String>,
    },
    SetKeyboardLayout {
        row_count: f64,
        column_count: f64,
    },
    SetInputStyle {
        input_style: String,
    },
    SetLanguage {
        language: String,
    },
    Rename {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        identifier: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    AddFlickVariation {
        index: i64,
        direction: FlickDirection,
    },
    RemoveFlickVariation {
        index: i64,
        direction: FlickDirection,
    },
    SetFlickLabel {
        index: i64,
        direction: FlickDirection,
        text: String,
    },
    SetFlickInput {
        index: i64,
        direction: FlickDirection,
        text: String,
    },
    SetFlickColor {
        index: i64,
        direction: FlickDirection,
        color: String,
    },
    SetFlickMainLabel {
        index: i64,
        direction: FlickDirection,
        text: String,
    },
    SetFlickSubLabel {
        index: i64,
        direction: FlickDirection,
        text: String,
    },
    SetFlickLabelMainSub {
        index: i64,
        direction: FlickDirection,
        main: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sub: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tag_parses_as_edit() {
        let op: Operation =
            serde_json::from_str(r#"{"type":"set_key_label","index":0,"text":"a"}"#).unwrap();
        assert_eq!(
            op,
            Operation::Known(Edit::SetKeyLabel {
                index: 0,
                text: "a".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_tag_falls_through() {
        let op: Operation =
            serde_json::from_str(r#"{"type":"set_key_sound","index":0,"sound":"pop"}"#).unwrap();
        assert_eq!(op.unknown_tag(), Some("set_key_sound"));
    }

    #[test]
    fn test_direction_aliases_accepted() {
        let op: Operation = serde_json::from_str(
            r#"{"type":"set_flick_label","index":0,"direction":"up","text":"q"}"#,
        )
        .unwrap();
        assert_eq!(
            op,
            Operation::Known(Edit::SetFlickLabel {
                index: 0,
                direction: FlickDirection::Top,
                text: "q".to_string(),
            })
        );
    }

    #[test]
    fn test_additive_fields_are_ignored() {
        let op: Operation = serde_json::from_str(
            r#"{"type":"remove_key","index":2,"reason":"duplicate"}"#,
        )
        .unwrap();
        assert_eq!(op, Operation::Known(Edit::RemoveKey { index: 2 }));
    }
}
