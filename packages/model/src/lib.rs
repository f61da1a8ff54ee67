//! # Custard Model
//!
//! Data model for Custard keyboard documents.
//!
//! Two levels of types live here:
//!
//! - [`document`] — the "loose" model accepted at the import boundary.
//!   Every field that may be absent or multi-shaped in real input is an
//!   `Option` or an untagged union, so any historical document shape
//!   deserializes without error.
//! - [`canonical`] — the strict wire form. Only the normalizer produces
//!   these values; `longpress_actions` and `variations` are non-optional
//!   by construction, so a canonical document cannot fail the structural
//!   rules the reference decoder enforces.
//!
//! Shared pieces (actions, flick directions) are in [`actions`].

pub mod actions;
pub mod canonical;
pub mod document;

pub use actions::{Action, CursorDirection, FlickDirection, KnownAction};
pub use document::{
    Design, FlickVariation, FlickVariationTag, Interface, Key, KeyItem, KeyLayout, KeyPayload,
    KeyType, KeyWrapper, Keyboard, Label, LongpressActions, Metadata, Specifier, SystemKey,
    TextPart, VariationItem,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_key_and_wrapper_both_deserialize() {
        let bare: KeyItem = serde_json::from_str(
            r#"{ "design": { "label": { "text": "a" } }, "press_actions": [{ "type": "input", "text": "a" }] }"#,
        )
        .unwrap();
        assert!(matches!(bare, KeyItem::Bare(_)));

        let wrapped: KeyItem = serde_json::from_str(
            r#"{ "key_type": "system", "key": { "type": "enter" } }"#,
        )
        .unwrap();
        assert!(matches!(
            wrapped,
            KeyItem::Wrapped(KeyWrapper {
                key_type: KeyType::System,
                ..
            })
        ));
    }

    #[test]
    fn test_direction_aliases() {
        let up: FlickDirection = serde_json::from_str(r#""up""#).unwrap();
        assert_eq!(up, FlickDirection::Top);
        let down: FlickDirection = serde_json::from_str(r#""down""#).unwrap();
        assert_eq!(down, FlickDirection::Bottom);
        assert_eq!(serde_json::to_string(&up).unwrap(), r#""top""#);
    }
}
