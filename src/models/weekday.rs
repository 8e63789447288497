//! Weekday labels used by shifts and opening hours.

use serde::{Deserialize, Serialize};

/// One of the seven fixed weekday labels a shift can fall on.
///
/// Stored documents written by older dashboards use Portuguese labels
/// (`"Segunda"`, `"terca"`, ...); those are accepted on read and
/// normalized to the English snake_case form on write.
///
/// # Example
///
/// ```
/// use roster_engine::models::Weekday;
///
/// let day: Weekday = serde_json::from_str("\"Segunda\"").unwrap();
/// assert_eq!(day, Weekday::Monday);
/// assert_eq!(serde_json::to_string(&day).unwrap(), "\"monday\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    /// Monday.
    #[serde(alias = "Monday", alias = "Segunda", alias = "segunda")]
    Monday,
    /// Tuesday.
    #[serde(alias = "Tuesday", alias = "Terça", alias = "terça", alias = "terca")]
    Tuesday,
    /// Wednesday.
    #[serde(alias = "Wednesday", alias = "Quarta", alias = "quarta")]
    Wednesday,
    /// Thursday.
    #[serde(alias = "Thursday", alias = "Quinta", alias = "quinta")]
    Thursday,
    /// Friday.
    #[serde(alias = "Friday", alias = "Sexta", alias = "sexta")]
    Friday,
    /// Saturday.
    #[serde(alias = "Saturday", alias = "Sábado", alias = "sábado", alias = "sabado")]
    Saturday,
    /// Sunday.
    #[serde(alias = "Sunday", alias = "Domingo", alias = "domingo")]
    Sunday,
}

impl Weekday {
    /// All seven days in calendar order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Monday to Friday.
    pub const WORKWEEK: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Parses a day label as it appears in a URL path or query string.
    ///
    /// Accepts the same labels as deserialization, case-insensitively.
    pub fn parse(label: &str) -> Option<Weekday> {
        let quoted = serde_json::Value::String(label.to_string());
        serde_json::from_value(quoted)
            .ok()
            .or_else(|| serde_json::from_value(serde_json::Value::String(label.to_lowercase())).ok())
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{}", label)
    }
}
