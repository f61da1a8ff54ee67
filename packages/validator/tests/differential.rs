//! Differential harness for the two acceptance implementations.
//!
//! `reference` below is a strict serde decoder written against
//! `REFERENCE.md`, independent of the hand-walked predicate in
//! `src/lib.rs`. Every corpus document goes through both; any verdict
//! divergence fails the test. Neither side owns correctness — fix the
//! disagreeing one against REFERENCE.md.

use custard_validator::is_acceptable;
use serde_json::{json, Value};

mod reference {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn accepts(doc: &Value) -> bool {
        serde_json::from_value::<Keyboard>(doc.clone()).is_ok()
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    pub struct Keyboard {
        identifier: String,
        language: String,
        input_style: String,
        metadata: Metadata,
        interface: Interface,
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Metadata {
        custard_version: String,
        display_name: String,
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Interface {
        key_layout: KeyLayout,
        key_style: String,
        keys: Vec<Entry>,
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct KeyLayout {
        #[serde(rename = "type")]
        kind: String,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    #[allow(dead_code)]
    enum Entry {
        Wrapped(Wrapper),
        Bare(BareKey),
    }

    #[derive(Deserialize)]
    #[serde(tag = "key_type", rename_all = "snake_case")]
    #[allow(dead_code)]
    enum Wrapper {
        System { key: SystemKey },
        Custom { key: CustomKey },
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct SystemKey {
        #[serde(rename = "type")]
        kind: String,
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct CustomKey {
        design: Design,
        #[serde(default)]
        press_actions: Option<Vec<Value>>,
        longpress_actions: serde_json::Map<String, Value>,
        variations: Vec<Value>,
    }

    /// A bare entry must not carry a wrapper tag at all; an entry whose
    /// `key_type` failed the tagged arm is rejected, not reinterpreted.
    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct BareKey {
        design: Design,
        #[serde(default)]
        press_actions: Option<Vec<Value>>,
        longpress_actions: serde_json::Map<String, Value>,
        variations: Vec<Value>,
        #[serde(default)]
        key_type: Option<Forbidden>,
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Design {
        #[serde(default)]
        label: Option<Label>,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    #[allow(dead_code)]
    enum Label {
        Text { text: String },
        Symbol { system_image: String },
        MainSub {
            main: TextPart,
            #[serde(default)]
            sub: Option<TextPart>,
        },
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    #[allow(dead_code)]
    enum TextPart {
        Plain(String),
        Wrapped { text: String },
    }

    /// Deserializing any value fails. Used to ban a field's presence.
    struct Forbidden;

    impl<'de> Deserialize<'de> for Forbidden {
        fn deserialize<D: Deserializer<'de>>(_: D) -> Result<Self, D::Error> {
            Err(D::Error::custom("field is not allowed here"))
        }
    }
}

fn acceptable_base() -> Value {
    json!({
        "identifier": "differential",
        "language": "ja_JP",
        "input_style": "direct",
        "metadata": { "custard_version": "1.2", "display_name": "差分" },
        "interface": {
            "key_layout": { "type": "grid_fit", "row_count": 5, "column_count": 4 },
            "key_style": "tenkey_style",
            "keys": []
        }
    })
}

fn with_keys(keys: Value) -> Value {
    let mut doc = acceptable_base();
    doc["interface"]["keys"] = keys;
    doc
}

fn without(mut doc: Value, pointer: &str, field: &str) -> Value {
    doc.pointer_mut(pointer)
        .and_then(Value::as_object_mut)
        .unwrap()
        .remove(field);
    doc
}

fn corpus() -> Vec<(&'static str, Value)> {
    let full_key = json!({
        "design": { "label": { "text": "a" }, "color": "normal" },
        "press_actions": [{ "type": "input", "text": "a" }],
        "longpress_actions": { "start": [], "repeat": [], "duration": "normal" },
        "variations": []
    });

    vec![
        ("empty keys", acceptable_base()),
        ("root not an object", json!([1, 2, 3])),
        ("identifier missing", without(acceptable_base(), "", "identifier")),
        ("identifier not a string", {
            let mut d = acceptable_base();
            d["identifier"] = json!(42);
            d
        }),
        ("metadata missing", without(acceptable_base(), "", "metadata")),
        ("metadata version not a string", {
            let mut d = acceptable_base();
            d["metadata"]["custard_version"] = json!(1.2);
            d
        }),
        ("layout type missing", {
            let mut d = acceptable_base();
            d["interface"]["key_layout"] = json!({ "row_count": 4 });
            d
        }),
        ("layout not an object", {
            let mut d = acceptable_base();
            d["interface"]["key_layout"] = json!("grid_fit");
            d
        }),
        ("key_style missing", without(acceptable_base(), "/interface", "key_style")),
        ("keys not an array", {
            let mut d = acceptable_base();
            d["interface"]["keys"] = json!({});
            d
        }),
        ("bare custom key, fully formed", with_keys(json!([full_key]))),
        ("wrapped custom key", with_keys(json!([{
            "key_type": "custom",
            "specifier_type": "grid_fit",
            "specifier": { "x": 0, "y": 0, "width": 1, "height": 1 },
            "key": full_key
        }]))),
        ("system key", with_keys(json!([{
            "key_type": "system", "key": { "type": "change_keyboard" }
        }]))),
        ("system key without type", with_keys(json!([{
            "key_type": "system", "key": {}
        }]))),
        ("system key with null payload", with_keys(json!([{
            "key_type": "system", "key": null
        }]))),
        ("unknown key_type string", with_keys(json!([{
            "key_type": "banana", "key": full_key
        }]))),
        ("numeric key_type", with_keys(json!([{
            "key_type": 3, "key": full_key
        }]))),
        ("null key_type reads as bare", with_keys(json!([{
            "key_type": null,
            "design": {}, "longpress_actions": {}, "variations": []
        }]))),
        ("custom wrapper without payload", with_keys(json!([{
            "key_type": "custom",
            "design": {}, "longpress_actions": {}, "variations": []
        }]))),
        ("missing design", with_keys(json!([{
            "longpress_actions": {}, "variations": []
        }]))),
        ("design not an object", with_keys(json!([{
            "design": "x", "longpress_actions": {}, "variations": []
        }]))),
        ("missing longpress_actions", with_keys(json!([{
            "design": {}, "variations": []
        }]))),
        ("null longpress_actions", with_keys(json!([{
            "design": {}, "longpress_actions": null, "variations": []
        }]))),
        ("longpress_actions as array", with_keys(json!([{
            "design": {}, "longpress_actions": [], "variations": []
        }]))),
        ("missing variations", with_keys(json!([{
            "design": {}, "longpress_actions": {}
        }]))),
        ("variations as object", with_keys(json!([{
            "design": {}, "longpress_actions": {}, "variations": {}
        }]))),
        ("press_actions not an array", with_keys(json!([{
            "design": {}, "press_actions": "input",
            "longpress_actions": {}, "variations": []
        }]))),
        ("null press_actions reads as absent", with_keys(json!([{
            "design": {}, "press_actions": null,
            "longpress_actions": {}, "variations": []
        }]))),
        ("label text shape", with_keys(json!([{
            "design": { "label": { "text": "q" } },
            "longpress_actions": {}, "variations": []
        }]))),
        ("label symbol shape", with_keys(json!([{
            "design": { "label": { "system_image": "globe" } },
            "longpress_actions": {}, "variations": []
        }]))),
        ("label main_and_sub canonical", with_keys(json!([{
            "design": { "label": { "type": "main_and_sub", "main": "a", "sub": "b" } },
            "longpress_actions": {}, "variations": []
        }]))),
        ("label pre-normalization wrappers", with_keys(json!([{
            "design": { "label": { "main": { "text": "a" }, "sub": { "text": "b" } } },
            "longpress_actions": {}, "variations": []
        }]))),
        ("label sub only", with_keys(json!([{
            "design": { "label": { "sub": "b" } },
            "longpress_actions": {}, "variations": []
        }]))),
        ("label empty object", with_keys(json!([{
            "design": { "label": {} },
            "longpress_actions": {}, "variations": []
        }]))),
        ("null label reads as absent", with_keys(json!([{
            "design": { "label": null },
            "longpress_actions": {}, "variations": []
        }]))),
        ("label text with wrong type", with_keys(json!([{
            "design": { "label": { "text": 5 } },
            "longpress_actions": {}, "variations": []
        }]))),
        ("label main with wrong sub", with_keys(json!([{
            "design": { "label": { "main": "a", "sub": 5 } },
            "longpress_actions": {}, "variations": []
        }]))),
        ("second entry bad rejects whole document", with_keys(json!([
            full_key,
            { "design": {}, "longpress_actions": {} }
        ]))),
        ("unknown root fields ignored", {
            let mut d = acceptable_base();
            d["theme"] = json!({ "dark": true });
            d
        }),
        ("unknown action tags are not inspected", with_keys(json!([{
            "design": { "label": { "text": "a" } },
            "press_actions": [{ "type": "launch_application", "destination": "calc" }],
            "longpress_actions": {}, "variations": []
        }]))),
    ]
}

#[test]
fn both_predicates_agree_on_the_whole_corpus() {
    for (name, doc) in corpus() {
        let walked = is_acceptable(&doc);
        let decoded = reference::accepts(&doc);
        assert_eq!(
            walked, decoded,
            "verdict divergence on case '{name}': walker={walked}, decoder={decoded}\n{doc:#}"
        );
    }
}

#[test]
fn normalized_documents_are_always_acceptable() {
    let sources = [
        r#"{ "identifier": "plain!", "interface": { "keys": [
            { "design": { "label": { "text": "a" } } },
            { "key_type": "system", "key": { "type": "enter" } }
        ] } }"#,
        r#"{ "identifier": "legacy", "interface": { "keys": [
            { "design": { "label": { "text": "あ" } },
              "press_actions": [{ "type": "input", "text": "あ" }],
              "variations": [
                { "design": { "label": { "text": "い" } } },
                { "design": { "label": { "text": "う" } } }
              ] }
        ] } }"#,
        r#"{ "identifier": "mixed labels", "interface": { "keys": [
            { "design": { "label": { "main": "a", "sub": { "text": "b" } } } }
        ] } }"#,
    ];

    for source in sources {
        let loose: custard_model::Keyboard = serde_json::from_str(source).unwrap();
        let normalized = custard_normalizer::normalize(&loose);
        let value = serde_json::to_value(&normalized).unwrap();
        assert!(
            is_acceptable(&value),
            "normalized output rejected by walker: {value:#}"
        );
        assert!(
            reference::accepts(&value),
            "normalized output rejected by strict decoder: {value:#}"
        );
    }
}
