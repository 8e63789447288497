//! Shift filtering by area, employee, role and name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Employee, Shift};

/// Employee lookup by id, borrowed from a snapshot.
#[derive(Debug, Clone, Default)]
pub struct EmployeeIndex<'a> {
    by_id: HashMap<&'a str, &'a Employee>,
}

impl<'a> EmployeeIndex<'a> {
    /// Indexes `employees` by id. Later duplicates win.
    pub fn new(employees: &'a [Employee]) -> Self {
        Self {
            by_id: employees.iter().map(|e| (e.id.as_str(), e)).collect(),
        }
    }

    /// Looks up an employee.
    pub fn get(&self, id: &str) -> Option<&'a Employee> {
        self.by_id.get(id).copied()
    }
}

/// Conjunctive filter over shifts.
///
/// Every supplied criterion must match. Empty strings count as "no filter",
/// so query strings such as `?area=` behave like an omitted parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftFilter {
    /// Exact area match.
    #[serde(default)]
    pub area: Option<String>,
    /// Exact employee id match.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Exact role match on the shift's employee.
    #[serde(default)]
    pub role: Option<String>,
    /// Case-insensitive substring match on the shift's employee name.
    #[serde(default)]
    pub name: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ShiftFilter {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        active(&self.area).is_none()
            && active(&self.employee_id).is_none()
            && active(&self.role).is_none()
            && active(&self.name).is_none()
    }

    /// True when matching needs the shift's employee record.
    pub fn needs_employee(&self) -> bool {
        active(&self.role).is_some() || active(&self.name).is_some()
    }

    /// Tests one shift, resolving its employee through `index` when needed.
    ///
    /// A shift whose employee cannot be resolved fails a role or name
    /// criterion, and passes when neither is set.
    pub fn matches(&self, shift: &Shift, index: &EmployeeIndex<'_>) -> bool {
        if let Some(area) = active(&self.area) {
            if shift.area != area {
                return false;
            }
        }
        if let Some(employee_id) = active(&self.employee_id) {
            if shift.employee_id != employee_id {
                return false;
            }
        }
        if !self.needs_employee() {
            return true;
        }

        let Some(employee) = index.get(&shift.employee_id) else {
            return false;
        };
        if let Some(role) = active(&self.role) {
            if employee.role != role {
                return false;
            }
        }
        if let Some(name) = active(&self.name) {
            if !employee.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Applies `filter` to `shifts`, preserving order.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::{filter_shifts, ShiftFilter};
/// use roster_engine::models::{Shift, Weekday};
///
/// let shifts = vec![Shift {
///     id: "s1".to_string(),
///     employee_id: "e1".to_string(),
///     day: Weekday::Monday,
///     start: "06:00".to_string(),
///     end: "12:00".to_string(),
///     area: "Musculação".to_string(),
/// }];
///
/// assert_eq!(filter_shifts(&shifts, &[], &ShiftFilter::default()), shifts);
/// ```
pub fn filter_shifts(shifts: &[Shift], employees: &[Employee], filter: &ShiftFilter) -> Vec<Shift> {
    if filter.is_empty() {
        return shifts.to_vec();
    }
    let index = EmployeeIndex::new(employees);
    shifts
        .iter()
        .filter(|shift| filter.matches(shift, &index))
        .cloned()
        .collect()
}
