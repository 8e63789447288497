//! Opening hours per weekday.
//!
//! Stored as the single `settings/horarios_funcionamento` document and used
//! as a validation hint when schedules are saved.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Weekday;

/// Opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// Opening time, `"HH:MM"`.
    #[serde(rename = "abertura", alias = "opens")]
    pub opens: String,
    /// Closing time, `"HH:MM"`.
    #[serde(rename = "fechamento", alias = "closes")]
    pub closes: String,
    /// True when the gym does not open that day.
    #[serde(rename = "fechado", alias = "closed", default)]
    pub closed: bool,
}

/// Opening hours for the whole week.
///
/// # Example
///
/// ```
/// use roster_engine::models::{BusinessHours, Weekday};
///
/// let hours: BusinessHours = serde_json::from_str(r#"{
///     "segunda": {"abertura": "06:00", "fechamento": "22:00", "fechado": false},
///     "domingo": {"abertura": "08:00", "fechamento": "14:00", "fechado": true}
/// }"#).unwrap();
/// assert!(!hours.is_closed(Weekday::Monday));
/// assert!(hours.is_closed(Weekday::Sunday));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessHours {
    /// Hours keyed by weekday. Days without an entry are treated as open
    /// with no known limits.
    pub days: BTreeMap<Weekday, DayHours>,
}

impl BusinessHours {
    /// Returns the configured hours for `day`, if any.
    pub fn for_day(&self, day: Weekday) -> Option<&DayHours> {
        self.days.get(&day)
    }

    /// Returns true if `day` is marked closed.
    pub fn is_closed(&self, day: Weekday) -> bool {
        self.days.get(&day).is_some_and(|h| h.closed)
    }
}
