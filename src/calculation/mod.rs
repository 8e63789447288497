//! Calculation logic for the roster engine.
//!
//! This module contains the pure functions that run over a roster snapshot:
//! time parsing and shift duration, hourly coverage counting and tiers,
//! per-shift cost and payroll projection, shift filtering and the weekly
//! report consolidation.

mod consolidation;
mod cost;
mod coverage;
mod filter;
mod time_interval;

pub use consolidation::{WeekendShift, WeeklyPattern, WeeklyReport, consolidate_week};
pub use cost::{
    DEFAULT_WEEKS_PER_MONTH, NO_ROLE, PayrollPolicy, ShiftCostResult, WARN_INVALID_TIME,
    WARN_MISSING_RATE, WARN_MISSING_SALARY, WARN_NEGATIVE_DURATION, WARN_UNRESOLVED_EMPLOYEE,
    assess_shift_cost, break_even_customers, costs_by_role, financial_summary,
    fixed_monthly_cost, monthly_variable_cost, project_payroll, shift_cost, weekly_variable_cost,
};
pub use coverage::{
    CoverageReport, CoverageTier, CoverageWindow, DayCoverage, HourCoverage, UNKNOWN_EMPLOYEE,
    WorkingEntry, build_coverage_report, count_working, covers, people_working, who_is_working,
};
pub use filter::{EmployeeIndex, ShiftFilter, filter_shifts};
pub use time_interval::{
    DurationPolicy, MINUTES_PER_DAY, ShiftDuration, duration_hours, format_duration, hour_of,
    minutes_of, parse_time,
};
