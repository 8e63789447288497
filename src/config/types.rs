//! Configuration types for the roster engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files in a configuration directory.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{
    CoverageWindow, DEFAULT_WEEKS_PER_MONTH, DurationPolicy, PayrollPolicy,
};
use crate::models::BusinessHours;

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_weeks_per_month() -> Decimal {
    DEFAULT_WEEKS_PER_MONTH
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Payroll projection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Factor applied to weekly variable cost.
    #[serde(default = "default_weeks_per_month")]
    pub weeks_per_month: Decimal,
    /// How shift durations are measured.
    #[serde(default)]
    pub duration_policy: DurationPolicy,
    /// Count salaried staff with no shift assigned.
    #[serde(default)]
    pub include_unassigned_salaried: bool,
    /// Average ticket used for break-even when a request gives none.
    #[serde(default)]
    pub default_ticket_price: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            weeks_per_month: default_weeks_per_month(),
            duration_policy: DurationPolicy::default(),
            include_unassigned_salaried: false,
            default_ticket_price: Decimal::ZERO,
        }
    }
}

impl PayrollConfig {
    /// The policy handed to the cost calculator.
    pub fn policy(&self) -> PayrollPolicy {
        PayrollPolicy {
            weeks_per_month: self.weeks_per_month,
            include_unassigned_salaried: self.include_unassigned_salaried,
            duration_policy: self.duration_policy,
        }
    }
}

/// Contents of `engine.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Hours covered by coverage statistics.
    #[serde(default)]
    pub coverage_window: CoverageWindow,
    /// Payroll settings.
    #[serde(default)]
    pub payroll: PayrollConfig,
}

/// Contents of `vocabulary.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VocabularySeed {
    /// Roles written to the store the first time roles are used.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Areas written to the store the first time areas are used.
    #[serde(default)]
    pub areas: Vec<String>,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct RosterConfig {
    engine: EngineSettings,
    business_hours: BusinessHours,
    vocabulary: VocabularySeed,
}

impl RosterConfig {
    /// Creates a new RosterConfig from its component parts.
    pub fn new(
        engine: EngineSettings,
        business_hours: BusinessHours,
        vocabulary: VocabularySeed,
    ) -> Self {
        Self {
            engine,
            business_hours,
            vocabulary,
        }
    }

    /// Returns the engine settings.
    pub fn engine(&self) -> &EngineSettings {
        &self.engine
    }

    /// Returns the default opening hours.
    pub fn business_hours(&self) -> &BusinessHours {
        &self.business_hours
    }

    /// Returns the seed vocabularies.
    pub fn vocabulary(&self) -> &VocabularySeed {
        &self.vocabulary
    }
}
