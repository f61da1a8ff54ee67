//! # Custard Editor
//!
//! Edit engine and document lifecycle for Custard keyboards.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: loose document ↔ canonical form      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + operations     │
//! │  - Load/save documents                      │
//! │  - Apply ordered operation batches          │
//! │  - Human-readable change logs               │
//! │  - Built-in starter templates               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ normalizer + validator: export gate         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use custard_editor::{Document, Edit, Operation};
//!
//! let mut doc = Document::load("flick.json".into())?;
//!
//! let log = doc.apply(&[Operation::Known(Edit::SetKeyLabel {
//!     index: 0,
//!     text: "あ".to_string(),
//! })]);
//! println!("{}", custard_editor::summarize(&log));
//!
//! doc.save()?;
//! ```

mod document;
mod errors;
pub mod engine;
mod operations;
pub mod templates;

pub use document::{Document, DocumentStorage};
pub use engine::{apply, summarize};
pub use errors::EditorError;
pub use operations::{Edit, Operation};

// Re-export common types for convenience
pub use custard_model::document::Keyboard;
pub use custard_model::FlickDirection;
