//! Request types for the roster API.
//!
//! Most bodies deserialize straight into model or roster types; this module
//! holds the few query and body shapes that exist only at the HTTP layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query for `GET /financial`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialQuery {
    /// Average ticket price. Falls back to the configured default.
    #[serde(default)]
    pub ticket: Option<Decimal>,
}

/// Query for `GET /employees/:id/schedule-draft`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftQuery {
    /// Restricts the draft to one area.
    #[serde(default)]
    pub area: Option<String>,
}

/// Body for `POST /schedules/bulk-delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// Shift ids to delete.
    pub ids: Vec<String>,
}

/// Body for adding or renaming a role or area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyRequest {
    /// The new name.
    pub name: String,
}
