//! Open vocabularies for job roles and work areas.

use serde::{Deserialize, Serialize};

/// Which vocabulary an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyKind {
    /// Job titles held by employees.
    Role,
    /// Work areas / modalities shifts are scheduled in.
    Area,
}

impl VocabularyKind {
    /// The collection explicit entries are stored in.
    pub fn collection(self) -> &'static str {
        match self {
            VocabularyKind::Role => crate::store::collections::ROLES,
            VocabularyKind::Area => crate::store::collections::AREAS,
        }
    }

    /// Singular label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            VocabularyKind::Role => "role",
            VocabularyKind::Area => "area",
        }
    }
}

/// A stored vocabulary document, keyed by its own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// The entry name; also the document id.
    pub name: String,
}
