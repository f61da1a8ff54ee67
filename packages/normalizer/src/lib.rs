//! # Custard Normalizer
//!
//! `normalize` rewrites any accepted document shape into the canonical
//! wire form. It is total: malformed or partially-specified input is
//! resolved by defaulting, never rejected (rejection is the validator's
//! job), and running the output back through `normalize` is a no-op.
//!
//! What one pass does, depth-first over every reachable custom key:
//!
//! - wraps bare keys into `key_type: "custom"` wrappers and hoists their
//!   placement specifier onto the wrapper
//! - collapses labels to the canonical shape (symbol > text > main/sub)
//! - decodes C-style escapes in `input` and `move_tab` action text
//! - synthesizes a press action from label text when none is given, and
//!   collapses an empty `press_actions` list to absent
//! - materializes `longpress_actions` and `variations` on every key
//! - upgrades legacy positional variation lists to tagged flick
//!   variations and strips placement from nested keys
//! - drops custom entries (and variations) that are entirely unset
//! - fills metadata defaults derived from the identifier

pub mod escape;

pub use escape::decode_escapes;

use custard_model::actions::{Action, FlickDirection, KnownAction};
use custard_model::{canonical, document};

const DEFAULT_CUSTARD_VERSION: &str = "1.2";
const DEFAULT_KEY_STYLE: &str = "tenkey_style";
const DEFAULT_DURATION: &str = "normal";
const FALLBACK_IDENTIFIER: &str = "custard_keyboard";

/// Normalize a loose document into the canonical wire form.
pub fn normalize(kb: &document::Keyboard) -> canonical::Keyboard {
    let identifier = sanitize_identifier(&kb.identifier);

    let metadata = canonical::Metadata {
        custard_version: kb
            .metadata
            .as_ref()
            .and_then(|m| m.custard_version.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CUSTARD_VERSION.to_string()),
        display_name: kb
            .metadata
            .as_ref()
            .and_then(|m| m.display_name.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| identifier.clone()),
    };

    let keys = kb
        .interface
        .keys
        .iter()
        .map(normalize_entry)
        .filter(|wrapper| match &wrapper.key {
            canonical::KeyPayload::System(_) => true,
            canonical::KeyPayload::Custom(key) => !is_unset(key),
        })
        .collect();

    canonical::Keyboard {
        identifier,
        language: kb.language.clone(),
        input_style: kb.input_style.clone(),
        metadata,
        interface: canonical::Interface {
            key_layout: normalize_layout(kb.interface.key_layout.as_ref()),
            key_style: kb
                .interface
                .key_style
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_KEY_STYLE.to_string()),
            keys,
        },
    }
}

/// Export identifiers are restricted to `[A-Za-z0-9_]+`.
fn sanitize_identifier(identifier: &str) -> String {
    let sanitized: String = identifier
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else {
        sanitized
    }
}

fn normalize_layout(layout: Option<&document::KeyLayout>) -> canonical::KeyLayout {
    match layout {
        Some(document::KeyLayout::GridFit {
            horizontal_key_count,
            vertical_key_count,
        }) => canonical::KeyLayout::GridFit {
            horizontal_key_count: grid_count(*horizontal_key_count, 4),
            vertical_key_count: grid_count(*vertical_key_count, 10),
        },
        Some(document::KeyLayout::GridScroll {
            direction,
            horizontal_key_count,
            vertical_key_count,
        }) => canonical::KeyLayout::GridScroll {
            direction: direction.clone(),
            horizontal_key_count: *horizontal_key_count,
            vertical_key_count: *vertical_key_count,
        },
        None => canonical::KeyLayout::GridFit {
            horizontal_key_count: 4,
            vertical_key_count: 10,
        },
    }
}

fn grid_count(value: Option<f64>, default: u32) -> u32 {
    match value {
        Some(v) if v.is_finite() => v.max(1.0) as u32,
        _ => default,
    }
}

fn normalize_entry(item: &document::KeyItem) -> canonical::KeyWrapper {
    match item {
        document::KeyItem::Wrapped(wrapper) => {
            let specifier = wrapper.specifier.as_ref().map(normalize_specifier);
            match wrapper.key_type {
                document::KeyType::System => {
                    let kind = match &wrapper.key {
                        document::KeyPayload::System(system) => system.kind.clone(),
                        document::KeyPayload::Custom(_) => String::new(),
                    };
                    canonical::KeyWrapper::new(
                        document::KeyType::System,
                        specifier,
                        canonical::KeyPayload::System(document::SystemKey { kind }),
                    )
                }
                document::KeyType::Custom => {
                    let key = match &wrapper.key {
                        document::KeyPayload::Custom(key) => normalize_key(key, true),
                        // A system payload under a custom tag carries no
                        // usable content; it normalizes to an unset key
                        // and gets filtered with the rest.
                        document::KeyPayload::System(_) => {
                            normalize_key(&document::Key::default(), true)
                        }
                    };
                    canonical::KeyWrapper::new(
                        document::KeyType::Custom,
                        specifier,
                        canonical::KeyPayload::Custom(Box::new(key)),
                    )
                }
            }
        }
        document::KeyItem::Bare(key) => {
            let specifier = key.specifier.as_ref().map(normalize_specifier);
            canonical::KeyWrapper::new(
                document::KeyType::Custom,
                specifier,
                canonical::KeyPayload::Custom(Box::new(normalize_key(key, true))),
            )
        }
    }
}

fn normalize_specifier(sp: &document::Specifier) -> canonical::Specifier {
    canonical::Specifier {
        x: cell_coord(sp.x),
        y: cell_coord(sp.y),
        width: cell_extent(sp.width),
        height: cell_extent(sp.height),
    }
}

fn cell_coord(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() => v.max(0.0) as u32,
        _ => 0,
    }
}

fn cell_extent(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() => v.max(1.0) as u32,
        _ => 1,
    }
}

/// Normalize custom key content. `top_level` keys keep (and upgrade)
/// their variation list; nested keys have it emptied — one level of
/// flicking is modeled, deeper nesting is dropped here.
fn normalize_key(key: &document::Key, top_level: bool) -> canonical::Key {
    let label = key
        .design
        .as_ref()
        .and_then(|design| design.label.as_ref())
        .and_then(collapse_label);
    let color = key.design.as_ref().and_then(|design| design.color.clone());

    let press_actions = normalize_press_actions(key.press_actions.as_deref(), label.as_ref());
    let longpress_actions = normalize_longpress(key.longpress_actions.as_ref());

    let variations = if top_level {
        key.variations
            .as_deref()
            .map(normalize_variations)
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    canonical::Key {
        design: canonical::Design { label, color },
        press_actions,
        longpress_actions,
        variations,
    }
}

/// Collapse a loose label to canonical form.
///
/// A main/sub label with an empty main and no sub carries nothing; it
/// collapses to no label at all so the canonical form never emits a
/// shape the reference decoder would refuse.
fn collapse_label(label: &document::Label) -> Option<canonical::Label> {
    match label {
        document::Label::Symbol { system_image } => Some(canonical::Label::Symbol {
            system_image: system_image.clone(),
        }),
        document::Label::Text { text } => Some(canonical::Label::Text { text: text.clone() }),
        document::Label::MainSub { main, sub } => {
            let main_text = main.as_ref().map(|p| p.as_str().to_string());
            let sub_text = sub.as_ref().map(|p| p.as_str().to_string());
            if main_text.as_deref().is_some_and(|s| !s.is_empty()) || sub_text.is_some() {
                Some(canonical::Label::MainSub {
                    main: main_text.unwrap_or_default(),
                    sub: sub_text.unwrap_or_default(),
                })
            } else {
                None
            }
        }
    }
}

fn normalize_press_actions(
    press: Option<&[Action]>,
    label: Option<&canonical::Label>,
) -> Option<Vec<Action>> {
    match press {
        Some(actions) if !actions.is_empty() => {
            Some(actions.iter().map(decode_action).collect())
        }
        // Absent or empty: synthesize from the label's literal text, or
        // stay absent. An empty list never survives to the wire form.
        _ => infer_press_text(label)
            .map(|text| vec![Action::input(decode_escapes(&text))]),
    }
}

fn infer_press_text(label: Option<&canonical::Label>) -> Option<String> {
    match label? {
        canonical::Label::Text { text } if !text.is_empty() => Some(text.clone()),
        canonical::Label::MainSub { main, .. } if !main.is_empty() => Some(main.clone()),
        _ => None,
    }
}

fn normalize_longpress(
    longpress: Option<&document::LongpressActions>,
) -> canonical::LongpressActions {
    match longpress {
        Some(lp) => canonical::LongpressActions {
            start: decode_action_list(lp.start.as_deref()),
            repeat: decode_action_list(lp.repeat.as_deref()),
            duration: lp
                .duration
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        },
        None => canonical::LongpressActions::default(),
    }
}

fn decode_action_list(actions: Option<&[Action]>) -> Vec<Action> {
    actions
        .map(|list| list.iter().map(decode_action).collect())
        .unwrap_or_default()
}

fn decode_action(action: &Action) -> Action {
    match action {
        Action::Known(KnownAction::Input { text }) => Action::Known(KnownAction::Input {
            text: decode_escapes(text),
        }),
        Action::Known(KnownAction::MoveTab { tab_type, text }) => {
            Action::Known(KnownAction::MoveTab {
                tab_type: tab_type.clone(),
                text: text.as_deref().map(decode_escapes),
            })
        }
        other => other.clone(),
    }
}

/// Upgrade a variation list to tagged flick variations.
///
/// Legacy elements get their direction from list position (left, top,
/// right, bottom); positions past the fourth are dropped. Unset nested
/// keys are filtered out, and a duplicated direction keeps its first
/// occurrence only.
fn normalize_variations(items: &[document::VariationItem]) -> Vec<canonical::FlickVariation> {
    let mut seen: Vec<FlickDirection> = Vec::with_capacity(4);
    let mut out = Vec::new();

    for (position, item) in items.iter().enumerate() {
        let (direction, key) = match item {
            document::VariationItem::Tagged(variation) => {
                (variation.direction, normalize_key(&variation.key, false))
            }
            document::VariationItem::Legacy(key) => {
                let Some(&direction) = FlickDirection::LEGACY_ORDER.get(position) else {
                    continue;
                };
                (direction, normalize_key(key, false))
            }
        };

        if is_unset(&key) || seen.contains(&direction) {
            continue;
        }
        seen.push(direction);
        out.push(canonical::FlickVariation {
            tag: document::FlickVariationTag::FlickVariation,
            direction,
            key,
        });
    }

    out
}

/// An unset key is a placeholder: nothing to press, nothing to show and
/// no variation that shows or does anything.
fn is_unset(key: &canonical::Key) -> bool {
    let no_press = key.press_actions.is_none();
    let empty_label = key
        .design
        .label
        .as_ref()
        .map_or(true, canonical::Label::is_empty);
    no_press && empty_label && key.variations.is_empty()
}
