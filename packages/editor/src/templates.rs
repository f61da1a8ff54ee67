//! Built-in starter keyboards.
//!
//! Templates are expressed in the loose document model and run through
//! the normalizer on export like any other input. The flick template
//! deliberately uses legacy positional variation lists; the upgrade
//! path is the same one imported documents take.

use custard_model::document::{
    Design, Interface, Key, KeyItem, KeyLayout, Keyboard, Label, Metadata, Specifier,
    VariationItem,
};
use custard_model::{Action, CursorDirection, KnownAction};

/// Names accepted by [`get`].
pub fn names() -> &'static [&'static str] {
    &["default_qwerty", "japanese_flick"]
}

/// Look up a template by name.
pub fn get(name: &str) -> Option<Keyboard> {
    match name {
        "default_qwerty" => Some(default_qwerty()),
        "japanese_flick" => Some(japanese_flick()),
        _ => None,
    }
}

fn input_key(label: &str, text: &str) -> Key {
    Key {
        design: Some(Design {
            label: Some(Label::text(label)),
            color: None,
        }),
        press_actions: Some(vec![Action::input(text)]),
        ..Key::default()
    }
}

fn action_key(label: &str, color: &str, action: KnownAction) -> Key {
    Key {
        design: Some(Design {
            label: Some(Label::text(label)),
            color: Some(color.to_string()),
        }),
        press_actions: Some(vec![Action::Known(action)]),
        ..Key::default()
    }
}

fn placed(mut key: Key, x: f64, y: f64, width: f64, height: f64) -> Key {
    key.specifier = Some(Specifier::at(x, y, width, height));
    key
}

/// A tenkey-style flick key with a legacy positional variation list
/// (left, top, right, bottom order; trailing entries may be omitted).
fn flick_key(label: &str, text: &str, flicks: &[(&str, &str)]) -> Key {
    let mut key = input_key(label, text);
    if !flicks.is_empty() {
        key.variations = Some(
            flicks
                .iter()
                .map(|(label, text)| VariationItem::Legacy(input_key(label, text)))
                .collect(),
        );
    }
    key
}

/// Latin QWERTY, PC style, four rows of ten.
pub fn default_qwerty() -> Keyboard {
    let mut keys: Vec<Key> = Vec::new();

    for ch in ['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p'] {
        keys.push(input_key(&ch.to_uppercase().to_string(), &ch.to_string()));
    }
    for ch in ['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l'] {
        keys.push(input_key(&ch.to_uppercase().to_string(), &ch.to_string()));
    }
    keys.push(action_key(
        "⌫",
        "special",
        KnownAction::Delete {
            count: 1,
            direction: None,
        },
    ));
    keys.push(action_key("⇧", "special", KnownAction::ToggleShift));
    for ch in ['z', 'x', 'c', 'v', 'b', 'n', 'm'] {
        keys.push(input_key(&ch.to_uppercase().to_string(), &ch.to_string()));
    }
    keys.push(input_key(",", ","));
    keys.push(input_key(".", "."));
    keys.push(action_key(
        "123",
        "special",
        KnownAction::MoveTab {
            tab_type: "number".to_string(),
            text: None,
        },
    ));
    keys.push(action_key(
        "←",
        "special",
        KnownAction::MoveCursor {
            count: 1,
            direction: Some(CursorDirection::Backward),
        },
    ));
    let mut space = input_key("Space", " ");
    space.specifier = Some(Specifier {
        width: Some(4.0),
        ..Specifier::default()
    });
    keys.push(space);
    keys.push(action_key(
        "→",
        "special",
        KnownAction::MoveCursor {
            count: 1,
            direction: Some(CursorDirection::Forward),
        },
    ));
    keys.push(input_key("?", "?"));
    keys.push(action_key("↵", "selected", KnownAction::Complete));

    Keyboard {
        identifier: "default_qwerty_keyboard".to_string(),
        language: "en_US".to_string(),
        input_style: "direct".to_string(),
        metadata: Some(Metadata {
            custard_version: Some("1.2".to_string()),
            display_name: Some("QWERTY".to_string()),
        }),
        interface: Interface {
            key_layout: Some(KeyLayout::GridFit {
                horizontal_key_count: Some(4.0),
                vertical_key_count: Some(10.0),
            }),
            key_style: Some("pc_style".to_string()),
            keys: keys.into_iter().map(KeyItem::Bare).collect(),
        },
    }
}

/// Japanese tenkey flick layout, five by five grid.
pub fn japanese_flick() -> Keyboard {
    let mut keys: Vec<Key> = Vec::new();

    keys.push(placed(
        action_key(
            "☆123",
            "special",
            KnownAction::MoveTab {
                tab_type: "number".to_string(),
                text: None,
            },
        ),
        0.0, 0.0, 1.0, 1.0,
    ));
    keys.push(placed(
        flick_key("あ", "あ", &[("い", "い"), ("う", "う"), ("え", "え"), ("お", "お")]),
        1.0, 0.0, 1.0, 1.0,
    ));
    keys.push(placed(
        flick_key("か", "か", &[("き", "き"), ("く", "く"), ("け", "け"), ("こ", "こ")]),
        2.0, 0.0, 1.0, 1.0,
    ));
    keys.push(placed(
        flick_key("さ", "さ", &[("し", "し"), ("す", "す"), ("せ", "せ"), ("そ", "そ")]),
        3.0, 0.0, 1.0, 1.0,
    ));
    let mut backspace = Key {
        design: Some(Design {
            label: Some(Label::Symbol {
                system_image: "delete.backward".to_string(),
            }),
            color: Some("special".to_string()),
        }),
        press_actions: Some(vec![Action::Known(KnownAction::Delete {
            count: 1,
            direction: None,
        })]),
        ..Key::default()
    };
    backspace.variations = Some(vec![VariationItem::Legacy(Key {
        design: Some(Design {
            label: Some(Label::Symbol {
                system_image: "xmark".to_string(),
            }),
            color: None,
        }),
        press_actions: Some(vec![Action::Known(KnownAction::Delete {
            count: -1,
            direction: None,
        })]),
        ..Key::default()
    })]);
    keys.push(placed(backspace, 4.0, 0.0, 1.0, 1.0));

    keys.push(placed(
        action_key(
            "ABC",
            "special",
            KnownAction::MoveTab {
                tab_type: "alphabet".to_string(),
                text: None,
            },
        ),
        0.0, 1.0, 1.0, 1.0,
    ));
    keys.push(placed(
        flick_key("た", "た", &[("ち", "ち"), ("つ", "つ"), ("て", "て"), ("と", "と")]),
        1.0, 1.0, 1.0, 1.0,
    ));
    keys.push(placed(
        flick_key("な", "な", &[("に", "に"), ("ぬ", "ぬ"), ("ね", "ね"), ("の", "の")]),
        2.0, 1.0, 1.0, 1.0,
    ));
    keys.push(placed(
        flick_key("は", "は", &[("ひ", "ひ"), ("ふ", "ふ"), ("へ", "へ"), ("ほ", "ほ")]),
        3.0, 1.0, 1.0, 1.0,
    ));
    let mut narrow_space = input_key("空白", " ");
    narrow_space.design = Some(Design {
        label: Some(Label::text("空白")),
        color: Some("special".to_string()),
    });
    keys.push(placed(narrow_space, 4.0, 1.0, 1.0, 1.0));

    keys.push(placed(
        action_key(
            "ひら",
            "special",
            KnownAction::MoveTab {
                tab_type: "hiragana".to_string(),
                text: None,
            },
        ),
        0.0, 2.0, 1.0, 1.0,
    ));
    keys.push(placed(
        flick_key("ま", "ま", &[("み", "み"), ("む", "む"), ("め", "め"), ("も", "も")]),
        1.0, 2.0, 1.0, 1.0,
    ));
    keys.push(placed(
        flick_key("や", "や", &[("「", "「"), ("ゆ", "ゆ"), ("」", "」"), ("よ", "よ")]),
        2.0, 2.0, 1.0, 1.0,
    ));
    keys.push(placed(
        flick_key("ら", "ら", &[("り", "り"), ("る", "る"), ("れ", "れ"), ("ろ", "ろ")]),
        3.0, 2.0, 1.0, 1.0,
    ));
    let enter = Key {
        design: Some(Design {
            label: Some(Label::Symbol {
                system_image: "return".to_string(),
            }),
            color: Some("selected".to_string()),
        }),
        press_actions: Some(vec![Action::input("\n")]),
        ..Key::default()
    };
    keys.push(placed(enter, 4.0, 2.0, 1.0, 2.0));

    keys.push(placed(
        action_key(
            "🌐",
            "special",
            KnownAction::MoveTab {
                tab_type: "keyboard_change".to_string(),
                text: None,
            },
        ),
        0.0, 3.0, 1.0, 1.0,
    ));
    let mut dakuten = input_key("小゛゜", "゛");
    dakuten.design = Some(Design {
        label: Some(Label::text("小゛゜")),
        color: Some("special".to_string()),
    });
    keys.push(placed(dakuten, 1.0, 3.0, 1.0, 1.0));
    keys.push(placed(
        flick_key("わ", "わ", &[("を", "を"), ("ん", "ん"), ("ー", "ー")]),
        2.0, 3.0, 1.0, 1.0,
    ));
    let mut punctuation = flick_key("、。", "、", &[("。", "。"), ("？", "？"), ("！", "！")]);
    punctuation.design = Some(Design {
        label: Some(Label::text("、。")),
        color: Some("special".to_string()),
    });
    keys.push(placed(punctuation, 3.0, 3.0, 1.0, 1.0));

    let mut space = input_key("space", " ");
    space.design = Some(Design {
        label: Some(Label::text("space")),
        color: Some("special".to_string()),
    });
    keys.push(placed(space, 1.0, 4.0, 3.0, 1.0));

    Keyboard {
        identifier: "japanese_flick".to_string(),
        language: "ja_JP".to_string(),
        input_style: "direct".to_string(),
        metadata: Some(Metadata {
            custard_version: Some("1.2".to_string()),
            display_name: Some("日本語フリック".to_string()),
        }),
        interface: Interface {
            key_layout: Some(KeyLayout::GridFit {
                horizontal_key_count: Some(5.0),
                vertical_key_count: Some(5.0),
            }),
            key_style: Some("tenkey_style".to_string()),
            keys: keys.into_iter().map(KeyItem::Bare).collect(),
        },
    }
}
