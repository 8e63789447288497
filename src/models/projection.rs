//! Payroll and financial projection models.
//!
//! This module contains the output types of the cost calculator: per-employee
//! cost lines, the payroll projection, the financial summary and the
//! warnings that flag data gaps inside those totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ContractType, OperationalCost};

/// How much a warning should worry the reader of a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; totals are still exact.
    Low,
    /// A total may be understated.
    Medium,
    /// A total is known to be understated.
    High,
}

/// A warning generated during a calculation.
///
/// Warnings flag records that were counted as zero because data was
/// missing or malformed, so a payroll total is never silently short.
///
/// # Example
///
/// ```
/// use roster_engine::models::{CalculationWarning, WarningSeverity};
///
/// let warning = CalculationWarning::new(
///     "UNRESOLVED_EMPLOYEE",
///     "Shift s1 references unknown employee e9",
///     WarningSeverity::High,
/// )
/// .for_shift("s1");
/// assert_eq!(warning.shift_id.as_deref(), Some("s1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
    /// The shift the warning is about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<String>,
    /// The employee the warning is about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl CalculationWarning {
    /// Creates a warning not tied to a particular record.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
            shift_id: None,
            employee_id: None,
        }
    }

    /// Attaches the shift the warning is about.
    pub fn for_shift(mut self, shift_id: impl Into<String>) -> Self {
        self.shift_id = Some(shift_id.into());
        self
    }

    /// Attaches the employee the warning is about.
    pub fn for_employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }
}

/// Cost summary for one employee on the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCostLine {
    /// The employee id.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Contract type.
    pub contract_type: ContractType,
    /// Number of shifts assigned this week.
    pub shift_count: usize,
    /// Scheduled hours per week.
    pub weekly_hours: Decimal,
    /// Variable cost per week (zero for salaried staff).
    pub weekly_cost: Decimal,
    /// Projected monthly cost: the salary for salaried staff, the weekly
    /// cost times weeks-per-month for hourly staff.
    pub monthly_cost: Decimal,
}

/// The payroll projection derived from the employee and shift collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollProjection {
    /// Sum of monthly figures for salaried staff counted in payroll.
    pub fixed_monthly_cost: Decimal,
    /// Sum of per-shift costs over one week.
    pub weekly_variable_cost: Decimal,
    /// Weekly variable cost scaled to a month.
    pub monthly_variable_cost: Decimal,
    /// Fixed plus monthly variable cost.
    pub total_monthly_cost: Decimal,
    /// The weeks-per-month factor used for scaling.
    pub weeks_per_month: Decimal,
    /// Per-employee breakdown, in employee order.
    pub lines: Vec<EmployeeCostLine>,
    /// Data gaps found while computing the totals.
    pub warnings: Vec<CalculationWarning>,
}

/// Monthly personnel cost attributed to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCost {
    /// The role name.
    pub role: String,
    /// Monthly cost of staff holding the role.
    pub monthly_cost: Decimal,
}

/// Personnel plus operational costs and the break-even point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Monthly personnel cost from the payroll projection.
    pub personnel_monthly_cost: Decimal,
    /// Sum of recurring operational costs.
    pub operational_monthly_cost: Decimal,
    /// Personnel plus operational cost.
    pub total_monthly_cost: Decimal,
    /// Average ticket price used for break-even.
    pub ticket_price: Decimal,
    /// Customers needed to cover the total; `None` when the ticket price
    /// cannot produce a meaningful figure.
    pub break_even_customers: Option<u64>,
    /// Personnel cost grouped by role.
    pub by_role: Vec<RoleCost>,
    /// The operational cost items that were summed.
    pub operational_costs: Vec<OperationalCost>,
    /// Data gaps carried over from the payroll projection.
    pub warnings: Vec<CalculationWarning>,
}

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// All employee records.
    pub total_employees: usize,
    /// Employees without an exit date.
    pub active_employees: usize,
    /// Employees with at least one shift.
    pub scheduled_employees: usize,
    /// All shift records.
    pub total_shifts: usize,
    /// Projected monthly payroll.
    pub total_monthly_cost: Decimal,
    /// Hours with a single person working, over the coverage window.
    pub critical_hours: usize,
    /// Hours with nobody working, over the coverage window.
    pub empty_hours: usize,
    /// Number of data-gap warnings in the payroll projection.
    pub warning_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_serialization_skips_empty_refs() {
        let warning = CalculationWarning::new("MISSING_RATE", "no rate", WarningSeverity::Medium);
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"MISSING_RATE\""));
        assert!(json.contains("\"severity\":\"medium\""));
        assert!(!json.contains("shift_id"));
        assert!(!json.contains("employee_id"));
    }

    #[test]
    fn test_warning_builders_attach_refs() {
        let warning = CalculationWarning::new("X", "y", WarningSeverity::Low)
            .for_shift("s1")
            .for_employee("e1");
        assert_eq!(warning.shift_id.as_deref(), Some("s1"));
        assert_eq!(warning.employee_id.as_deref(), Some("e1"));
    }

    #[test]
    fn test_break_even_serializes_null_when_absent() {
        let summary = FinancialSummary {
            personnel_monthly_cost: Decimal::ZERO,
            operational_monthly_cost: Decimal::ZERO,
            total_monthly_cost: Decimal::ZERO,
            ticket_price: Decimal::ZERO,
            break_even_customers: None,
            by_role: vec![],
            operational_costs: vec![],
            warnings: vec![],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["break_even_customers"].is_null());
    }
}
