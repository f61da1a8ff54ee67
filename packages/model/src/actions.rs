//! Key press actions.
//!
//! The action vocabulary is open: upstream keyboards may carry tags this
//! crate has never heard of, and those must survive a round trip intact.
//! [`Action`] therefore wraps the closed [`KnownAction`] union with an
//! opaque pass-through variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single action attached to a key press or longpress phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    Known(KnownAction),
    /// Forward-compatible pass-through for tags we do not model.
    Unknown(serde_json::Value),
}

impl Action {
    pub fn input(text: impl Into<String>) -> Self {
        Action::Known(KnownAction::Input { text: text.into() })
    }
}

/// Actions with fixed, modeled field sets. Additive fields on these tags
/// are ignored at the deserialization boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KnownAction {
    Input {
        text: String,
    },
    Delete {
        #[serde(default = "default_count")]
        count: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<CursorDirection>,
    },
    MoveCursor {
        #[serde(default = "default_count")]
        count: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<CursorDirection>,
    },
    Complete,
    MoveTab {
        tab_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    SmartDeleteDefault,
    ToggleCursorBar,
    ToggleShift,
}

fn default_count() -> i64 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorDirection {
    Forward,
    Backward,
}

/// Direction of a flick gesture. The wire form is `left`/`top`/`right`/
/// `bottom`; `up` and `down` are accepted as aliases from older documents
/// and from operation sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlickDirection {
    Left,
    #[serde(alias = "up")]
    Top,
    Right,
    #[serde(alias = "down")]
    Bottom,
}

impl FlickDirection {
    /// Positional order used by legacy variation lists.
    pub const LEGACY_ORDER: [FlickDirection; 4] = [
        FlickDirection::Left,
        FlickDirection::Top,
        FlickDirection::Right,
        FlickDirection::Bottom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlickDirection::Left => "left",
            FlickDirection::Top => "top",
            FlickDirection::Right => "right",
            FlickDirection::Bottom => "bottom",
        }
    }
}

impl fmt::Display for FlickDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
