//! Durable session storage
//!
//! A single JSON file under the user's config directory holding
//! `{content, fileType, theme}`. Reads are forgiving: a missing or
//! unparseable file means "no saved session", never an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::document::{DocumentState, FileType, Theme};

/// Serialized form of the stored session.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    content: String,
    file_type: FileType,
    theme: Theme,
}

/// Handle to the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default location: `<config dir>/codepad/session.json`.
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir().context("No user config directory available")?;
        Ok(Self::at(config_dir.join("codepad").join("session.json")))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the document state, creating parent directories as needed.
    pub fn save(&self, doc: &DocumentState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let stored = StoredSession {
            content: doc.content.clone(),
            file_type: doc.file_type,
            theme: doc.theme,
        };
        let json = serde_json::to_string_pretty(&stored).context("Failed to serialize session")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;

        log::debug!("session saved to {}", self.path.display());
        Ok(())
    }

    /// Read the stored session, if a valid one exists.
    pub fn load(&self) -> Option<DocumentState> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredSession>(&json) {
            Ok(stored) => Some(DocumentState::new(
                stored.content,
                stored.file_type,
                stored.theme,
            )),
            Err(err) => {
                log::warn!(
                    "ignoring unparseable session file {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }
}
