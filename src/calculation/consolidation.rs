//! Weekly report consolidation.
//!
//! Weekday shifts that repeat the same employee, area and times are folded
//! into one pattern listing the days they cover. Weekend shifts are reported
//! one by one.

use serde::{Deserialize, Serialize};

use crate::models::{Employee, Shift, Weekday};

use super::coverage::UNKNOWN_EMPLOYEE;
use super::filter::EmployeeIndex;

/// A weekday block repeated on one or more days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPattern {
    /// The employee id as stored on the shifts.
    pub employee_id: String,
    /// Resolved employee name, or `"unknown"`.
    pub employee_name: String,
    /// The area.
    pub area: String,
    /// Start time.
    pub start: String,
    /// End time.
    pub end: String,
    /// Days covered, Monday first.
    pub days: Vec<Weekday>,
}

/// A single weekend shift with its employee resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendShift {
    /// The shift id.
    pub shift_id: String,
    /// The employee id as stored on the shift.
    pub employee_id: String,
    /// Resolved employee name, or `"unknown"`.
    pub employee_name: String,
    /// Saturday or Sunday.
    pub day: Weekday,
    /// The area.
    pub area: String,
    /// Start time.
    pub start: String,
    /// End time.
    pub end: String,
}

/// The consolidated week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Monday–Friday patterns, in order of first appearance.
    pub patterns: Vec<WeeklyPattern>,
    /// Saturday and Sunday shifts, Saturday first, input order within a day.
    pub weekend: Vec<WeekendShift>,
}

fn employee_name(index: &EmployeeIndex<'_>, employee_id: &str) -> String {
    index
        .get(employee_id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string())
}

/// Groups the week's shifts for the printable report.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::consolidate_week;
/// use roster_engine::models::{Shift, Weekday};
///
/// let shift = |id: &str, day| Shift {
///     id: id.to_string(),
///     employee_id: "e1".to_string(),
///     day,
///     start: "06:00".to_string(),
///     end: "12:00".to_string(),
///     area: "Musculação".to_string(),
/// };
/// let shifts = vec![shift("s1", Weekday::Wednesday), shift("s2", Weekday::Monday)];
///
/// let report = consolidate_week(&shifts, &[]);
/// assert_eq!(report.patterns.len(), 1);
/// assert_eq!(report.patterns[0].days, vec![Weekday::Monday, Weekday::Wednesday]);
/// ```
pub fn consolidate_week(shifts: &[Shift], employees: &[Employee]) -> WeeklyReport {
    let index = EmployeeIndex::new(employees);
    let mut patterns: Vec<WeeklyPattern> = Vec::new();

    for shift in shifts.iter().filter(|s| !s.is_weekend()) {
        let existing = patterns.iter_mut().find(|p| {
            p.employee_id == shift.employee_id
                && p.area == shift.area
                && p.start == shift.start
                && p.end == shift.end
        });
        match existing {
            Some(pattern) => {
                if !pattern.days.contains(&shift.day) {
                    pattern.days.push(shift.day);
                    pattern.days.sort();
                }
            }
            None => patterns.push(WeeklyPattern {
                employee_id: shift.employee_id.clone(),
                employee_name: employee_name(&index, &shift.employee_id),
                area: shift.area.clone(),
                start: shift.start.clone(),
                end: shift.end.clone(),
                days: vec![shift.day],
            }),
        }
    }

    let mut weekend: Vec<WeekendShift> = shifts
        .iter()
        .filter(|s| s.is_weekend())
        .map(|s| WeekendShift {
            shift_id: s.id.clone(),
            employee_id: s.employee_id.clone(),
            employee_name: employee_name(&index, &s.employee_id),
            day: s.day,
            area: s.area.clone(),
            start: s.start.clone(),
            end: s.end.clone(),
        })
        .collect();
    // Stable sort keeps input order within each day.
    weekend.sort_by_key(|s| s.day);

    WeeklyReport { patterns, weekend }
}
