//! Point-in-time view of the roster collections.

use serde::Serialize;

use crate::calculation::{
    CoverageReport, CoverageWindow, PayrollPolicy, ShiftFilter, WeeklyReport, WorkingEntry,
    build_coverage_report, consolidate_week, filter_shifts, financial_summary, project_payroll,
    who_is_working,
};
use crate::models::{
    DashboardSummary, Employee, EmployeeCostLine, FinancialSummary, OperationalCost,
    PayrollProjection, Shift, Weekday,
};

use rust_decimal::Decimal;
use std::collections::HashSet;

/// Employees, shifts and operational costs as fetched in one pass.
///
/// Every read-side computation for a request runs against one snapshot, so
/// totals on the same response never mix data from different moments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RosterSnapshot {
    /// Every employee record.
    pub employees: Vec<Employee>,
    /// Every shift.
    pub shifts: Vec<Shift>,
    /// Every operational cost item.
    pub operational_costs: Vec<OperationalCost>,
}

impl RosterSnapshot {
    /// Wraps already-fetched collections.
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>, operational_costs: Vec<OperationalCost>) -> Self {
        Self {
            employees,
            shifts,
            operational_costs,
        }
    }

    /// Shifts matching `filter`, in stored order.
    pub fn filtered_shifts(&self, filter: &ShiftFilter) -> Vec<Shift> {
        filter_shifts(&self.shifts, &self.employees, filter)
    }

    /// Heatmap and weekly totals over the shifts matching `filter`.
    pub fn coverage(&self, filter: &ShiftFilter, window: CoverageWindow) -> CoverageReport {
        build_coverage_report(&self.filtered_shifts(filter), window)
    }

    /// Who is working in one (day, hour) cell.
    pub fn working_at(&self, day: Weekday, hour: u32) -> Vec<WorkingEntry> {
        who_is_working(&self.shifts, &self.employees, day, hour)
    }

    /// The payroll projection.
    pub fn payroll(&self, policy: &PayrollPolicy) -> PayrollProjection {
        project_payroll(&self.employees, &self.shifts, policy)
    }

    /// Weekly hours and cost for one employee on the schedule.
    pub fn employee_line(&self, employee_id: &str, policy: &PayrollPolicy) -> Option<EmployeeCostLine> {
        self.payroll(policy)
            .lines
            .into_iter()
            .find(|line| line.employee_id == employee_id)
    }

    /// Payroll plus operational costs and break-even at `ticket_price`.
    pub fn financial(&self, policy: &PayrollPolicy, ticket_price: Decimal) -> FinancialSummary {
        financial_summary(&self.payroll(policy), &self.operational_costs, ticket_price)
    }

    /// The consolidated weekly report.
    pub fn weekly_report(&self) -> WeeklyReport {
        consolidate_week(&self.shifts, &self.employees)
    }

    /// Headline numbers for the dashboard.
    pub fn dashboard(&self, policy: &PayrollPolicy, window: CoverageWindow) -> DashboardSummary {
        let projection = self.payroll(policy);
        let coverage = build_coverage_report(&self.shifts, window);
        let scheduled: HashSet<&str> = self.shifts.iter().map(|s| s.employee_id.as_str()).collect();

        DashboardSummary {
            total_employees: self.employees.len(),
            active_employees: self.employees.iter().filter(|e| e.is_active()).count(),
            scheduled_employees: self
                .employees
                .iter()
                .filter(|e| scheduled.contains(e.id.as_str()))
                .count(),
            total_shifts: self.shifts.len(),
            total_monthly_cost: projection.total_monthly_cost,
            critical_hours: coverage.critical_hours,
            empty_hours: coverage.empty_hours,
            warning_count: projection.warnings.len(),
        }
    }
}
