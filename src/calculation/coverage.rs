//! Staffing coverage per weekday and hour.
//!
//! Counts how many scheduled shifts overlap a given (day, hour) cell and
//! classifies the count into a severity tier. Weekly totals and the heatmap
//! grid are computed over a configurable [`CoverageWindow`].

use serde::{Deserialize, Serialize};

use crate::models::{Employee, Shift, Weekday};

use super::filter::EmployeeIndex;
use super::time_interval::{format_duration, hour_of};

/// Label used when a shift's employee cannot be resolved.
pub const UNKNOWN_EMPLOYEE: &str = "unknown";

/// Staffing density classification for one (day, hour) cell.
///
/// Thresholds are fixed: 0 empty, 1 critical, 2 acceptable, 3+ good.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::CoverageTier;
///
/// assert_eq!(CoverageTier::from_count(0), CoverageTier::Empty);
/// assert_eq!(CoverageTier::from_count(1), CoverageTier::Critical);
/// assert_eq!(CoverageTier::from_count(2), CoverageTier::Acceptable);
/// assert_eq!(CoverageTier::from_count(7), CoverageTier::Good);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageTier {
    /// Nobody is working.
    Empty,
    /// Exactly one person is working.
    Critical,
    /// Two people are working.
    Acceptable,
    /// Three or more people are working.
    Good,
}

impl CoverageTier {
    /// Classifies a head count.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => CoverageTier::Empty,
            1 => CoverageTier::Critical,
            2 => CoverageTier::Acceptable,
            _ => CoverageTier::Good,
        }
    }
}

/// The hours of the day that coverage statistics are computed over.
///
/// `start_hour` is inclusive and `end_hour` exclusive, so the default
/// window 6..23 covers the cells 06:00 through 22:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageWindow {
    /// First hour in the window.
    pub start_hour: u32,
    /// First hour after the window.
    pub end_hour: u32,
}

impl Default for CoverageWindow {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 23,
        }
    }
}

impl CoverageWindow {
    /// The hours in the window, in order.
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.start_hour..self.end_hour
    }

    /// Number of hour cells per day.
    pub fn len(&self) -> usize {
        self.end_hour.saturating_sub(self.start_hour) as usize
    }

    /// True if the window holds no hours.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns true if `shift` is on `day` and covers `hour`.
///
/// A shift covers the hours `hour_of(start) <= hour < hour_of(end)`.
/// Shifts with malformed times never cover anything.
pub fn covers(shift: &Shift, day: Weekday, hour: u32) -> bool {
    if shift.day != day {
        return false;
    }
    match (hour_of(&shift.start), hour_of(&shift.end)) {
        (Ok(start), Ok(end)) => start <= hour && hour < end,
        _ => false,
    }
}

/// Returns every shift working on `day` at `hour`, in input order.
pub fn people_working(shifts: &[Shift], day: Weekday, hour: u32) -> Vec<&Shift> {
    shifts.iter().filter(|s| covers(s, day, hour)).collect()
}

/// Number of shifts working on `day` at `hour`.
pub fn count_working(shifts: &[Shift], day: Weekday, hour: u32) -> usize {
    shifts.iter().filter(|s| covers(s, day, hour)).count()
}

/// Coverage for one hour cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCoverage {
    /// The hour.
    pub hour: u32,
    /// How many people are working.
    pub count: usize,
    /// The tier for `count`.
    pub tier: CoverageTier,
}

/// Coverage for one day across the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCoverage {
    /// The day.
    pub day: Weekday,
    /// One entry per hour in the window.
    pub hours: Vec<HourCoverage>,
    /// Hours with exactly one person working.
    pub low_coverage_hours: Vec<u32>,
}

/// Heatmap and weekly totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// The window the grid spans.
    pub window: CoverageWindow,
    /// One entry per weekday, Monday first.
    pub days: Vec<DayCoverage>,
    /// Cells with exactly one person working.
    pub critical_hours: usize,
    /// Cells with nobody working.
    pub empty_hours: usize,
}

/// Builds the weekly heatmap over `window`.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::{build_coverage_report, CoverageWindow};
///
/// let report = build_coverage_report(&[], CoverageWindow::default());
/// assert_eq!(report.days.len(), 7);
/// assert_eq!(report.empty_hours, 7 * 17);
/// assert_eq!(report.critical_hours, 0);
/// ```
pub fn build_coverage_report(shifts: &[Shift], window: CoverageWindow) -> CoverageReport {
    let mut critical_hours = 0;
    let mut empty_hours = 0;

    let days = Weekday::ALL
        .iter()
        .map(|&day| {
            let day_shifts: Vec<&Shift> = shifts.iter().filter(|s| s.day == day).collect();
            let hours: Vec<HourCoverage> = window
                .hours()
                .map(|hour| {
                    let count = day_shifts.iter().filter(|s| covers(s, day, hour)).count();
                    HourCoverage {
                        hour,
                        count,
                        tier: CoverageTier::from_count(count),
                    }
                })
                .collect();

            let low_coverage_hours: Vec<u32> = hours
                .iter()
                .filter(|h| h.tier == CoverageTier::Critical)
                .map(|h| h.hour)
                .collect();

            critical_hours += low_coverage_hours.len();
            empty_hours += hours
                .iter()
                .filter(|h| h.tier == CoverageTier::Empty)
                .count();

            DayCoverage {
                day,
                hours,
                low_coverage_hours,
            }
        })
        .collect();

    CoverageReport {
        window,
        days,
        critical_hours,
        empty_hours,
    }
}

/// Someone working in a given cell, with the employee resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingEntry {
    /// The shift id.
    pub shift_id: String,
    /// The employee id as stored on the shift.
    pub employee_id: String,
    /// Employee name, or `"unknown"`.
    pub name: String,
    /// Employee role, or `"unknown"`.
    pub role: String,
    /// The shift area.
    pub area: String,
    /// Shift start.
    pub start: String,
    /// Shift end.
    pub end: String,
    /// Shift length label such as `"5h 30min"`, absent when a time is malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Lists who is working on `day` at `hour`, resolving each employee.
pub fn who_is_working(
    shifts: &[Shift],
    employees: &[Employee],
    day: Weekday,
    hour: u32,
) -> Vec<WorkingEntry> {
    let index = EmployeeIndex::new(employees);
    people_working(shifts, day, hour)
        .into_iter()
        .map(|shift| {
            let employee = index.get(&shift.employee_id);
            WorkingEntry {
                shift_id: shift.id.clone(),
                employee_id: shift.employee_id.clone(),
                name: employee
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string()),
                role: employee
                    .map(|e| e.role.clone())
                    .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string()),
                area: shift.area.clone(),
                start: shift.start.clone(),
                end: shift.end.clone(),
                duration: format_duration(&shift.start, &shift.end),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContractType;
    use std::collections::BTreeMap;

    fn make_shift(id: &str, employee_id: &str, day: Weekday, start: &str, end: &str) -> Shift {
        Shift {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            day,
            start: start.to_string(),
            end: end.to_string(),
            area: "Musculação".to_string(),
        }
    }

    fn make_employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            role: "Instrutor".to_string(),
            contract_type: ContractType::Hourly,
            value: None,
            cost_real: None,
            values_by_area: BTreeMap::new(),
            active: true,
            admission_date: None,
            exit_date: None,
            phone: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_start_inclusive_end_exclusive() {
        let shifts = vec![make_shift("s1", "e1", Weekday::Monday, "06:00", "12:00")];
        assert_eq!(count_working(&shifts, Weekday::Monday, 5), 0);
        assert_eq!(count_working(&shifts, Weekday::Monday, 6), 1);
        assert_eq!(count_working(&shifts, Weekday::Monday, 11), 1);
        assert_eq!(count_working(&shifts, Weekday::Monday, 12), 0);
    }

    #[test]
    fn test_other_days_do_not_count() {
        let shifts = vec![make_shift("s1", "e1", Weekday::Monday, "06:00", "12:00")];
        assert_eq!(count_working(&shifts, Weekday::Tuesday, 8), 0);
    }

    #[test]
    fn test_minutes_are_ignored() {
        let shifts = vec![make_shift("s1", "e1", Weekday::Monday, "06:45", "08:15")];
        assert_eq!(count_working(&shifts, Weekday::Monday, 6), 1);
        assert_eq!(count_working(&shifts, Weekday::Monday, 7), 1);
        assert_eq!(count_working(&shifts, Weekday::Monday, 8), 0);
    }

    #[test]
    fn test_malformed_shift_never_covers() {
        let shifts = vec![make_shift("s1", "e1", Weekday::Monday, "later", "12:00")];
        assert_eq!(count_working(&shifts, Weekday::Monday, 9), 0);
    }

    #[test]
    fn test_people_working_preserves_order() {
        let shifts = vec![
            make_shift("s1", "e1", Weekday::Monday, "06:00", "12:00"),
            make_shift("s2", "e2", Weekday::Monday, "07:00", "10:00"),
            make_shift("s3", "e3", Weekday::Monday, "13:00", "18:00"),
        ];
        let ids: Vec<&str> = people_working(&shifts, Weekday::Monday, 9)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_tiers_for_counts() {
        assert_eq!(CoverageTier::from_count(0), CoverageTier::Empty);
        assert_eq!(CoverageTier::from_count(1), CoverageTier::Critical);
        assert_eq!(CoverageTier::from_count(2), CoverageTier::Acceptable);
        assert_eq!(CoverageTier::from_count(3), CoverageTier::Good);
    }

    #[test]
    fn test_report_totals() {
        // Monday 06-08 one person, 08-10 two people.
        let shifts = vec![
            make_shift("s1", "e1", Weekday::Monday, "06:00", "10:00"),
            make_shift("s2", "e2", Weekday::Monday, "08:00", "10:00"),
        ];
        let window = CoverageWindow {
            start_hour: 6,
            end_hour: 12,
        };
        let report = build_coverage_report(&shifts, window);

        let monday = &report.days[0];
        assert_eq!(monday.day, Weekday::Monday);
        assert_eq!(monday.hours.len(), 6);
        assert_eq!(monday.low_coverage_hours, vec![6, 7]);
        assert_eq!(monday.hours[2].tier, CoverageTier::Acceptable);

        assert_eq!(report.critical_hours, 2);
        // Monday 10 and 11 plus six empty days of six hours.
        assert_eq!(report.empty_hours, 2 + 6 * 6);
    }

    #[test]
    fn test_default_window() {
        let window = CoverageWindow::default();
        assert_eq!(window.hours().next(), Some(6));
        assert_eq!(window.hours().last(), Some(22));
        assert_eq!(window.len(), 17);
    }

    #[test]
    fn test_who_is_working_resolves_names() {
        let shifts = vec![
            make_shift("s1", "e1", Weekday::Friday, "06:00", "12:00"),
            make_shift("s2", "ghost", Weekday::Friday, "06:00", "12:00"),
        ];
        let employees = vec![make_employee("e1", "Ana")];

        let working = who_is_working(&shifts, &employees, Weekday::Friday, 7);
        assert_eq!(working.len(), 2);
        assert_eq!(working[0].name, "Ana");
        assert_eq!(working[0].role, "Instrutor");
        assert_eq!(working[1].name, UNKNOWN_EMPLOYEE);
        assert_eq!(working[1].employee_id, "ghost");
        assert_eq!(working[0].duration.as_deref(), Some("6h"));
    }

    proptest::proptest! {
        #[test]
        fn prop_report_totals_match_cell_tiers(
            raw in proptest::collection::vec((0usize..7, 0u32..22, 1u32..6), 0..30)
        ) {
            let shifts: Vec<Shift> = raw
                .iter()
                .enumerate()
                .map(|(i, (day, start, len))| {
                    let end = (start + len).min(23);
                    make_shift(
                        &format!("s{}", i),
                        "e1",
                        Weekday::ALL[*day],
                        &format!("{:02}:00", start),
                        &format!("{:02}:00", end),
                    )
                })
                .collect();
            let report = build_coverage_report(&shifts, CoverageWindow::default());

            let cells: Vec<&HourCoverage> = report.days.iter().flat_map(|d| d.hours.iter()).collect();
            for cell in &cells {
                proptest::prop_assert_eq!(cell.tier, CoverageTier::from_count(cell.count));
            }
            let critical = cells.iter().filter(|c| c.tier == CoverageTier::Critical).count();
            let empty = cells.iter().filter(|c| c.tier == CoverageTier::Empty).count();
            proptest::prop_assert_eq!(report.critical_hours, critical);
            proptest::prop_assert_eq!(report.empty_hours, empty);
        }
    }
}
