//! Opening hours settings.

use serde_json::Value;
use tracing::info;

use crate::calculation::minutes_of;
use crate::error::{EngineError, EngineResult};
use crate::models::BusinessHours;
use crate::store::{collections, to_document};

use super::Roster;

impl Roster {
    /// The stored opening hours, or the configured defaults if none are saved.
    pub fn business_hours(&self) -> EngineResult<BusinessHours> {
        match self
            .store()
            .get(collections::SETTINGS, collections::BUSINESS_HOURS_DOC)?
        {
            Some(document) => {
                serde_json::from_value(Value::Object(document)).map_err(|e| EngineError::Serialization {
                    collection: collections::SETTINGS.to_string(),
                    message: format!("document {}: {}", collections::BUSINESS_HOURS_DOC, e),
                })
            }
            None => Ok(self.config().default_business_hours().clone()),
        }
    }

    /// Replaces the stored opening hours.
    ///
    /// Every open day must have parseable times with opening before closing.
    pub fn set_business_hours(&self, hours: BusinessHours) -> EngineResult<BusinessHours> {
        for (day, day_hours) in &hours.days {
            if day_hours.closed {
                continue;
            }
            let field = |name: &str| format!("{}.{}", day, name);
            let opens = minutes_of(&day_hours.opens)
                .map_err(|e| EngineError::validation(field("opens"), e.to_string()))?;
            let closes = minutes_of(&day_hours.closes)
                .map_err(|e| EngineError::validation(field("closes"), e.to_string()))?;
            if opens >= closes {
                return Err(EngineError::validation(
                    field("closes"),
                    "closing time must be after opening time",
                ));
            }
        }

        let document = to_document(collections::SETTINGS, &hours)?;
        self.store().set(
            collections::SETTINGS,
            collections::BUSINESS_HOURS_DOC,
            document,
        )?;
        info!(days = hours.days.len(), "Saved business hours");
        Ok(hours)
    }
}
