//! Free-form employee metadata kept in per-employee subcollections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a document attached to an employee (contract, ID scan...).
///
/// Only the reference is kept here; the bytes live in external file storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Identifier assigned by the document store.
    #[serde(default)]
    pub id: String,
    /// File name shown to the user.
    pub name: String,
    /// Download location in file storage.
    pub url: String,
    /// MIME type, when known.
    #[serde(default, alias = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Upload time.
    #[serde(default, alias = "uploadedAt", skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// One entry in an employee's change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Identifier assigned by the document store.
    #[serde(default)]
    pub id: String,
    /// When the change was applied.
    pub changed_at: DateTime<Utc>,
    /// The fields that were written, as submitted.
    pub changes: serde_json::Value,
}
