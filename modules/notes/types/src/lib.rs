//! Wire types for the notes store and its front-end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =====================================================
// Request Types
// =====================================================

/// A note as submitted to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Content")]
    pub content: String,
}

impl Note {
    /// Build a note from raw form values. Both fields must be non-empty.
    pub fn from_form(title: &str, content: &str) -> Result<Self, ValidationError> {
        match (title.is_empty(), content.is_empty()) {
            (true, true) => Err(ValidationError::MissingBoth),
            (true, false) => Err(ValidationError::MissingTitle),
            (false, true) => Err(ValidationError::MissingContent),
            (false, false) => Ok(Self {
                name: title.to_string(),
                content: content.to_string(),
            }),
        }
    }
}

/// Rejected form input. The display text is the prompt shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter both title and content")]
    MissingTitle,
    #[error("Please enter both title and content")]
    MissingContent,
    #[error("Please enter both title and content")]
    MissingBoth,
}

/// Addresses a single stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteKey {
    #[serde(rename = "CreatedAt")]
    pub created_at: String,
    #[serde(rename = "Name")]
    pub name: String,
}

// =====================================================
// Response Types
// =====================================================

/// A note as returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerNote {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "NoteID", default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
    /// ISO date (no time component)
    #[serde(rename = "CreatedAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "UpdatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ServerNote {
    /// The store key, when the store reported a creation date
    pub fn key(&self) -> Option<NoteKey> {
        self.created_at.as_ref().map(|created_at| NoteKey {
            created_at: created_at.clone(),
            name: self.name.clone(),
        })
    }
}

/// Single-item read response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub item: ServerNote,
}
