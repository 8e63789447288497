//! Employee model and related types.
//!
//! This module defines the Employee struct and ContractType enum
//! for representing gym staff and how their cost is computed.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the contract under which an employee is paid.
///
/// The contract type determines which cost formula applies: salaried
/// staff are a flat monthly figure, hourly staff are billed per scheduled
/// hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Fixed monthly salary, independent of scheduled hours.
    #[serde(alias = "mensalista")]
    MonthlySalaried,
    /// Paid per scheduled hour, optionally at an area-specific rate.
    #[serde(alias = "hora_aula", alias = "horista")]
    Hourly,
}

/// Represents a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Identifier assigned by the document store.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job title, drawn from the roles vocabulary.
    #[serde(default)]
    pub role: String,
    /// The contract type.
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    /// Monthly amount for salaried staff, default hourly rate for hourly staff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    /// Fully-loaded employer cost for salaried staff.
    #[serde(default, alias = "costReal", skip_serializing_if = "Option::is_none")]
    pub cost_real: Option<Decimal>,
    /// Hourly rate overrides keyed by area name.
    #[serde(default, alias = "valuesByArea")]
    pub values_by_area: BTreeMap<String, Decimal>,
    /// False once an exit date is recorded.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Date the employee was hired.
    #[serde(default, alias = "admissionDate", skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<NaiveDate>,
    /// Date the employee left.
    #[serde(default, alias = "exitDate", skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<NaiveDate>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// When the record was created.
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last updated.
    #[serde(default, alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns true if the employee is on a fixed monthly salary.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{ContractType, Employee};
    ///
    /// let employee: Employee = serde_json::from_str(
    ///     r#"{"name": "Carlos", "role": "Gerência", "type": "mensalista", "value": 3000}"#,
    /// ).unwrap();
    /// assert!(employee.is_salaried());
    /// assert_eq!(employee.contract_type, ContractType::MonthlySalaried);
    /// ```
    pub fn is_salaried(&self) -> bool {
        self.contract_type == ContractType::MonthlySalaried
    }

    /// Returns the hourly rate that applies in `area`.
    ///
    /// The area override wins over the default `value`; `None` means the
    /// record carries no usable rate at all.
    pub fn hourly_rate_for(&self, area: &str) -> Option<Decimal> {
        self.values_by_area.get(area).copied().or(self.value)
    }

    /// Returns the monthly figure used in payroll rollups for salaried staff.
    ///
    /// `cost_real` takes precedence over `value` when present.
    pub fn monthly_cost(&self) -> Option<Decimal> {
        self.cost_real.or(self.value)
    }

    /// Active unless an exit date is set.
    ///
    /// The exit date is authoritative; the stored `active` flag is derived
    /// from it on every write and on every read through the roster.
    pub fn is_active(&self) -> bool {
        self.exit_date.is_none()
    }
}
