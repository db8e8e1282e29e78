//! Best-effort persistence for the committed transcript.
//!
//! The transcript is saved to a single JSON slot on application teardown and
//! optionally restored on the next launch. This is a cache, not a durability
//! guarantee: a missing or unreadable file must never break startup.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk shape of the saved slot.
#[derive(Debug, Serialize, Deserialize)]
struct SavedState {
    #[serde(rename = "savedTranscript")]
    saved_transcript: String,
}

/// File-backed store for the saved transcript.
pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    /// Create a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location, ~/.local/share/dictanote/transcript.json.
    pub fn default_location() -> Self {
        let path = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("dictanote")
            .join("transcript.json");
        Self::new(path)
    }

    /// Save the committed transcript.
    ///
    /// # Errors
    /// Returns I/O errors; callers treat them as non-fatal and log.
    pub fn save(&self, transcript: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let state = SavedState {
            saved_transcript: transcript.to_string(),
        };
        let json = serde_json::to_string(&state)
            .map_err(|e| crate::error::DictanoteError::Other(format!("Serialize transcript: {e}")))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the saved transcript, if any.
    ///
    /// Returns `None` when the file is missing, unreadable, or malformed;
    /// restore is best-effort.
    pub fn load(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let state: SavedState = serde_json::from_str(&contents).ok()?;
        Some(state.saved_transcript)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
