//! # Document Handle
//!
//! A [`Document`] owns one keyboard and its editing state. Documents
//! can be:
//! - **Memory-backed**: temporary, for testing or in-memory sessions
//! - **File-backed**: single-user editing with disk persistence
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Export → Save
//!   ↓     ↓       ↓        ↓
//! JSON  batches normalize File
//! ```
//!
//! Export always runs the normalizer first and then checks the result
//! against the structural validator; a rejected document never reaches
//! disk.

use std::path::PathBuf;

use custard_model::document::Keyboard;
use custard_validator::is_acceptable;
use tracing::debug;

use crate::engine;
use crate::errors::EditorError;
use crate::operations::Operation;

/// Editable keyboard document
#[derive(Debug)]
pub struct Document {
    /// Path to source file (if any)
    pub path: PathBuf,

    /// Current version number (increments on each applied batch)
    pub version: u64,

    /// Backing storage strategy
    storage: DocumentStorage,
}

/// Storage backend for a document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory { keyboard: Keyboard },

    /// File-backed (single-user editing)
    File { keyboard: Keyboard, dirty: bool },
}

impl Document {
    /// Create a memory-backed document from an in-memory keyboard.
    pub fn from_keyboard(path: PathBuf, keyboard: Keyboard) -> Self {
        Self {
            path,
            version: 0,
            storage: DocumentStorage::Memory { keyboard },
        }
    }

    /// Create a memory-backed document from JSON source text.
    pub fn from_source(path: PathBuf, source: &str) -> Result<Self, EditorError> {
        let keyboard = serde_json::from_str(source)?;
        Ok(Self::from_keyboard(path, keyboard))
    }

    /// Load a document from a file (file-backed).
    pub fn load(path: PathBuf) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(&path)?;
        let keyboard = serde_json::from_str(&source)?;

        Ok(Self {
            path,
            version: 0,
            storage: DocumentStorage::File {
                keyboard,
                dirty: false,
            },
        })
    }

    /// Current keyboard state.
    pub fn keyboard(&self) -> &Keyboard {
        match &self.storage {
            DocumentStorage::Memory { keyboard } => keyboard,
            DocumentStorage::File { keyboard, .. } => keyboard,
        }
    }

    /// Apply a batch of operations, returning the change log.
    pub fn apply(&mut self, ops: &[Operation]) -> Vec<String> {
        let (next, log) = engine::apply(self.keyboard(), ops);
        match &mut self.storage {
            DocumentStorage::Memory { keyboard } => *keyboard = next,
            DocumentStorage::File { keyboard, dirty } => {
                *keyboard = next;
                *dirty = true;
            }
        }
        self.version += 1;
        debug!(version = self.version, changes = log.len(), "Applied batch");
        log
    }

    /// Normalize, validate, and render the document as pretty JSON.
    ///
    /// The normalizer's output is re-checked against the structural
    /// validator; a disagreement means a defect in one of the two and is
    /// surfaced as [`EditorError::Rejected`] rather than written out.
    pub fn export(&self) -> Result<String, EditorError> {
        let canonical = custard_normalizer::normalize(self.keyboard());
        let value = serde_json::to_value(&canonical)?;
        if !is_acceptable(&value) {
            return Err(EditorError::Rejected);
        }
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Write the exported document back to its file.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let rendered = self.export()?;
        match &mut self.storage {
            DocumentStorage::Memory { .. } => Err(EditorError::NotFileBacked),
            DocumentStorage::File { dirty, .. } => {
                std::fs::write(&self.path, rendered)?;
                *dirty = false;
                Ok(())
            }
        }
    }

    /// Whether the document has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::Memory { .. } => false,
            DocumentStorage::File { dirty, .. } => *dirty,
        }
    }
}
