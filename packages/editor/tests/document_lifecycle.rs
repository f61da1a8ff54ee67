//! Load → edit → save → reload round trip

use custard_editor::{Document, Edit, Operation};
use custard_validator::is_acceptable;

const SOURCE: &str = r#"{
    "identifier": "lifecycle",
    "language": "ja_JP",
    "input_style": "direct",
    "interface": { "keys": [
        { "design": { "label": { "text": "あ" } },
          "press_actions": [{ "type": "input", "text": "あ" }] }
    ] }
}"#;

#[test]
fn edited_document_survives_a_save_and_reload() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lifecycle.json");
    std::fs::write(&path, SOURCE)?;

    let mut doc = Document::load(path.clone())?;
    assert!(!doc.is_dirty());

    let log = doc.apply(&[Operation::Known(Edit::SetKeyLabel {
        index: 0,
        text: "い".to_string(),
    })]);
    assert_eq!(log.len(), 1);
    assert!(doc.is_dirty());

    doc.save()?;
    assert!(!doc.is_dirty());

    // The saved file is canonical and acceptable as written.
    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert!(is_acceptable(&saved));
    assert_eq!(
        saved["interface"]["keys"][0]["key"]["design"]["label"]["text"],
        "い"
    );

    let reloaded = Document::load(path)?;
    assert_eq!(reloaded.version, 0);
    assert_eq!(reloaded.keyboard().identifier, "lifecycle");
    Ok(())
}
