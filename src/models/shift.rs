//! Shift model.
//!
//! A shift is one scheduled working block for one employee, on one day,
//! in one area, over one time range.

use serde::{Deserialize, Serialize};

use super::Weekday;

/// Represents a single scheduled block.
///
/// `start` and `end` are kept exactly as stored (`"HH:MM"`); parsing happens
/// in the calculation layer so a malformed record never prevents the rest
/// of the roster from loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Identifier assigned by the document store.
    #[serde(default)]
    pub id: String,
    /// The employee working the shift. Not enforced to exist.
    #[serde(alias = "employeeId")]
    pub employee_id: String,
    /// The day of the week.
    pub day: Weekday,
    /// Start time, `"HH:MM"`.
    pub start: String,
    /// End time, `"HH:MM"`.
    pub end: String,
    /// Work area or modality.
    #[serde(default)]
    pub area: String,
}

impl Shift {
    /// Returns true if the shift falls on Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        self.day.is_weekend()
    }
}
