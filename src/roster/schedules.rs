//! Weekly schedule editing.
//!
//! A schedule is edited as a draft for one employee: area keys map to the
//! weekdays worked and the time block on each day. Saving a draft replaces
//! the shifts it was built from with one shift per (area, day).
//!
//! An employee who works the same area twice on one day (a split shift)
//! appears under a second key with a numeric suffix, `"Musculação (2)"`.
//! The suffix only exists in drafts; saved shifts carry the plain area name.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculation::{ShiftFilter, minutes_of, parse_time};
use crate::error::{EngineError, EngineResult};
use crate::models::{BusinessHours, CalculationWarning, Shift, WarningSeverity, Weekday};
use crate::store::{WriteBatch, collections, list_as, to_document};

use super::{Roster, required};

/// Hint code for a shift on a day the gym is closed.
pub const SCHEDULE_HINT_CLOSED_DAY: &str = "CLOSED_DAY";
/// Hint code for a shift starting before opening or ending after closing.
pub const SCHEDULE_HINT_OUTSIDE_HOURS: &str = "OUTSIDE_BUSINESS_HOURS";

/// Start and end of one block, `"HH:MM"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Start time.
    pub start: String,
    /// End time.
    pub end: String,
}

/// An editable weekly schedule for one employee.
///
/// # Example
///
/// ```
/// use roster_engine::roster::ScheduleDraft;
///
/// let draft: ScheduleDraft = serde_json::from_str(r#"{
///     "employee_id": "e1",
///     "blocks": {
///         "Musculação": {"monday": {"start": "06:00", "end": "12:00"}},
///         "Musculação (2)": {"monday": {"start": "17:00", "end": "21:00"}}
///     }
/// }"#).unwrap();
/// assert_eq!(draft.blocks.len(), 2);
/// assert!(draft.replaces.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    /// The employee the schedule belongs to.
    #[serde(alias = "employeeId")]
    pub employee_id: String,
    /// Area key to weekday to time block.
    #[serde(default, alias = "schedulesByArea")]
    pub blocks: BTreeMap<String, BTreeMap<Weekday, TimeBlock>>,
    /// Ids of the shifts this draft replaces when saved.
    #[serde(default)]
    pub replaces: Vec<String>,
}

/// Which of an employee's shifts a reconstructed draft covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftScope<'a> {
    /// Every area the employee works.
    AllAreas,
    /// A single area.
    Area(&'a str),
}

/// What a save wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSaveResult {
    /// The shifts created, with their new ids.
    pub created: Vec<Shift>,
    /// How many replaced shifts were removed.
    pub replaced: usize,
    /// Opening-hours conflicts. These never block a save.
    pub hints: Vec<CalculationWarning>,
}

/// Strips a trailing `" (n)"` split-shift suffix from a draft key.
///
/// # Example
///
/// ```
/// use roster_engine::roster::base_area_name;
///
/// assert_eq!(base_area_name("Musculação (2)"), "Musculação");
/// assert_eq!(base_area_name("Musculação"), "Musculação");
/// assert_eq!(base_area_name("Dança (Zumba)"), "Dança (Zumba)");
/// ```
pub fn base_area_name(key: &str) -> &str {
    if let Some(inner) = key.strip_suffix(')') {
        if let Some(pos) = inner.rfind(" (") {
            let suffix = &inner[pos + 2..];
            if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
                return &key[..pos];
            }
        }
    }
    key
}

/// Rebuilds a draft from an employee's existing shifts.
///
/// A second block for the same area on the same day goes under the first
/// free key among `"Area (2)"`, `"Area (3)"`, and so on.
pub fn build_draft(shifts: &[Shift], employee_id: &str, scope: DraftScope<'_>) -> ScheduleDraft {
    let mut draft = ScheduleDraft {
        employee_id: employee_id.to_string(),
        ..Default::default()
    };

    let related = shifts.iter().filter(|s| {
        s.employee_id == employee_id
            && match scope {
                DraftScope::AllAreas => true,
                DraftScope::Area(area) => s.area == area,
            }
    });

    for shift in related {
        let mut key = shift.area.clone();
        let mut counter = 2;
        while draft
            .blocks
            .get(&key)
            .is_some_and(|days| days.contains_key(&shift.day))
        {
            key = format!("{} ({})", shift.area, counter);
            counter += 1;
        }
        draft.blocks.entry(key).or_default().insert(
            shift.day,
            TimeBlock {
                start: shift.start.clone(),
                end: shift.end.clone(),
            },
        );
        draft.replaces.push(shift.id.clone());
    }

    draft
}

/// Checks shifts against opening hours.
///
/// Days without configured hours, and hours that do not parse, are skipped.
pub fn business_hours_hints(hours: &BusinessHours, shifts: &[Shift]) -> Vec<CalculationWarning> {
    let mut hints = Vec::new();
    for shift in shifts {
        let Some(day_hours) = hours.for_day(shift.day) else {
            continue;
        };
        if day_hours.closed {
            hints.push(
                CalculationWarning::new(
                    SCHEDULE_HINT_CLOSED_DAY,
                    format!("The gym is closed on {}", shift.day),
                    WarningSeverity::Low,
                )
                .for_shift(&shift.id)
                .for_employee(&shift.employee_id),
            );
            continue;
        }
        let bounds = (
            minutes_of(&day_hours.opens),
            minutes_of(&day_hours.closes),
            minutes_of(&shift.start),
            minutes_of(&shift.end),
        );
        if let (Ok(opens), Ok(closes), Ok(start), Ok(end)) = bounds {
            if start < opens || end > closes {
                hints.push(
                    CalculationWarning::new(
                        SCHEDULE_HINT_OUTSIDE_HOURS,
                        format!(
                            "{} {}-{} falls outside opening hours {}-{}",
                            shift.day, shift.start, shift.end, day_hours.opens, day_hours.closes
                        ),
                        WarningSeverity::Low,
                    )
                    .for_shift(&shift.id)
                    .for_employee(&shift.employee_id),
                );
            }
        }
    }
    hints
}

fn checked_time(field: String, value: &str) -> EngineResult<String> {
    parse_time(value).map_err(|e| EngineError::validation(field, e.to_string()))?;
    Ok(value.trim().to_string())
}

impl Roster {
    /// Shifts matching `filter`.
    pub fn list_shifts(&self, filter: &ShiftFilter) -> EngineResult<Vec<Shift>> {
        Ok(self.snapshot()?.filtered_shifts(filter))
    }

    /// Rebuilds the editable draft for an employee's current shifts.
    pub fn schedule_draft(&self, employee_id: &str, scope: DraftScope<'_>) -> EngineResult<ScheduleDraft> {
        self.get_employee(employee_id)?;
        let shifts: Vec<Shift> = list_as(self.store(), collections::SCHEDULES)?;
        Ok(build_draft(&shifts, employee_id, scope))
    }

    /// Saves a draft: removes the shifts it replaces and creates one shift
    /// per (area, day), in one batch.
    ///
    /// Nothing is written if the employee is unknown, no area has days, any
    /// time fails to parse, or a replaced shift belongs to someone else.
    /// Replaced ids that no longer exist are ignored.
    pub fn save_schedule(&self, draft: ScheduleDraft) -> EngineResult<ScheduleSaveResult> {
        let employee_id = required("employee_id", &draft.employee_id)?;
        self.get_employee(&employee_id)?;

        let mut created = Vec::new();
        for (key, days) in draft.blocks.iter().filter(|(_, days)| !days.is_empty()) {
            let area = required(&format!("blocks.{}", key), base_area_name(key))?;
            for (day, block) in days {
                created.push(Shift {
                    id: Uuid::new_v4().to_string(),
                    employee_id: employee_id.clone(),
                    day: *day,
                    start: checked_time(format!("blocks.{}.{}.start", key, day), &block.start)?,
                    end: checked_time(format!("blocks.{}.{}.end", key, day), &block.end)?,
                    area: area.clone(),
                });
            }
        }
        if created.is_empty() {
            return Err(EngineError::validation(
                "blocks",
                "at least one area with scheduled days is required",
            ));
        }

        let stored: Vec<Shift> = list_as(self.store(), collections::SCHEDULES)?;
        let mut replaced_ids: HashSet<&str> = HashSet::new();
        for id in &draft.replaces {
            let Some(shift) = stored.iter().find(|s| s.id == *id) else {
                continue;
            };
            if shift.employee_id != employee_id {
                return Err(EngineError::validation(
                    "replaces",
                    format!("shift '{}' belongs to another employee", id),
                ));
            }
            replaced_ids.insert(shift.id.as_str());
        }
        let replaced = replaced_ids.len();

        let mut batch = WriteBatch::new();
        for id in &replaced_ids {
            batch.delete(collections::SCHEDULES, *id);
        }
        for shift in &created {
            batch.set(
                collections::SCHEDULES,
                shift.id.as_str(),
                to_document(collections::SCHEDULES, shift)?,
            );
        }
        self.store().commit(batch)?;

        let hints = business_hours_hints(&self.business_hours()?, &created);
        info!(
            employee_id = %employee_id,
            created = created.len(),
            replaced = replaced,
            hints = hints.len(),
            "Saved schedule"
        );

        Ok(ScheduleSaveResult {
            created,
            replaced,
            hints,
        })
    }

    /// Deletes one shift.
    pub fn delete_shift(&self, id: &str) -> EngineResult<()> {
        if !self.store().delete(collections::SCHEDULES, id)? {
            return Err(EngineError::DocumentNotFound {
                collection: collections::SCHEDULES.to_string(),
                id: id.to_string(),
            });
        }
        info!(shift_id = %id, "Deleted shift");
        Ok(())
    }

    /// Deletes every listed shift that exists, in one batch. Returns how
    /// many were removed.
    pub fn delete_shifts(&self, ids: &[String]) -> EngineResult<usize> {
        let existing: HashSet<String> = self
            .store()
            .list(collections::SCHEDULES)?
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        let mut batch = WriteBatch::new();
        let mut seen = HashSet::new();
        for id in ids {
            if existing.contains(id) && seen.insert(id.as_str()) {
                batch.delete(collections::SCHEDULES, id.as_str());
            }
        }
        let removed = batch.len();
        if removed > 0 {
            self.store().commit(batch)?;
        }
        info!(requested = ids.len(), removed = removed, "Bulk deleted shifts");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContractType, DayHours};
    use crate::roster::test_support::{employee, insert_shift, roster};

    fn block(start: &str, end: &str) -> TimeBlock {
        TimeBlock {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    fn shift(id: &str, employee_id: &str, day: Weekday, start: &str, area: &str) -> Shift {
        Shift {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            day,
            start: start.to_string(),
            end: "23:00".to_string(),
            area: area.to_string(),
        }
    }

    #[test]
    fn test_base_area_name_only_strips_numeric_suffix() {
        assert_eq!(base_area_name("Musculação (3)"), "Musculação");
        assert_eq!(base_area_name("Aulas Coletivas (12)"), "Aulas Coletivas");
        assert_eq!(base_area_name("Yoga ()"), "Yoga ()");
        assert_eq!(base_area_name("Yoga(2)"), "Yoga(2)");
    }

    #[test]
    fn test_build_draft_allocates_split_keys() {
        let shifts = vec![
            shift("s1", "e1", Weekday::Monday, "06:00", "Musculação"),
            shift("s2", "e1", Weekday::Monday, "17:00", "Musculação"),
            shift("s3", "e1", Weekday::Monday, "20:00", "Musculação"),
            shift("s4", "e1", Weekday::Tuesday, "06:00", "Musculação"),
            shift("s5", "e1", Weekday::Tuesday, "08:00", "Funcional"),
            shift("s6", "e2", Weekday::Monday, "06:00", "Musculação"),
        ];
        let draft = build_draft(&shifts, "e1", DraftScope::AllAreas);

        let keys: Vec<&str> = draft.blocks.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Funcional", "Musculação", "Musculação (2)", "Musculação (3)"]);
        assert_eq!(draft.blocks["Musculação"].len(), 2);
        assert_eq!(draft.blocks["Musculação (2)"][&Weekday::Monday].start, "17:00");
        assert_eq!(draft.replaces, vec!["s1", "s2", "s3", "s4", "s5"]);
    }

    #[test]
    fn test_build_draft_for_single_area() {
        let shifts = vec![
            shift("s1", "e1", Weekday::Monday, "06:00", "Musculação"),
            shift("s2", "e1", Weekday::Monday, "08:00", "Funcional"),
        ];
        let draft = build_draft(&shifts, "e1", DraftScope::Area("Funcional"));
        assert_eq!(draft.blocks.len(), 1);
        assert_eq!(draft.replaces, vec!["s2"]);
    }

    #[test]
    fn test_save_creates_one_shift_per_area_day_and_strips_suffix() {
        let roster = roster();
        let ana = roster
            .create_employee(employee("Ana", "Instrutor", ContractType::Hourly, Some(20)))
            .unwrap();

        let mut draft = ScheduleDraft {
            employee_id: ana.id.clone(),
            ..Default::default()
        };
        draft.blocks.insert(
            "Musculação".to_string(),
            BTreeMap::from([
                (Weekday::Monday, block("06:00", "12:00")),
                (Weekday::Wednesday, block("06:00", "12:00")),
            ]),
        );
        draft.blocks.insert(
            "Musculação (2)".to_string(),
            BTreeMap::from([(Weekday::Monday, block("17:00", "21:00"))]),
        );
        draft.blocks.insert("Funcional".to_string(), BTreeMap::new());

        let result = roster.save_schedule(draft).unwrap();
        assert_eq!(result.created.len(), 3);
        assert!(result.created.iter().all(|s| s.area == "Musculação"));
        assert_eq!(result.replaced, 0);

        let stored = roster.list_shifts(&ShiftFilter::default()).unwrap();
        assert_eq!(stored, result.created);
    }

    #[test]
    fn test_save_replaces_listed_shifts() {
        let roster = roster();
        let ana = roster
            .create_employee(employee("Ana", "Instrutor", ContractType::Hourly, Some(20)))
            .unwrap();
        insert_shift(&roster, &ana.id, Weekday::Monday, "06:00", "12:00", "Musculação");
        insert_shift(&roster, &ana.id, Weekday::Tuesday, "06:00", "12:00", "Musculação");
        insert_shift(&roster, "someone-else", Weekday::Monday, "06:00", "12:00", "Musculação");

        let mut draft = roster.schedule_draft(&ana.id, DraftScope::AllAreas).unwrap();
        assert_eq!(draft.replaces.len(), 2);
        draft
            .blocks
            .get_mut("Musculação")
            .unwrap()
            .remove(&Weekday::Tuesday);

        let result = roster.save_schedule(draft).unwrap();
        assert_eq!(result.replaced, 2);
        assert_eq!(result.created.len(), 1);

        let all = roster.list_shifts(&ShiftFilter::default()).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.iter().filter(|s| s.employee_id == ana.id).count(), 1);
    }

    #[test]
    fn test_save_validation_writes_nothing() {
        let roster = roster();
        let ana = roster
            .create_employee(employee("Ana", "Instrutor", ContractType::Hourly, Some(20)))
            .unwrap();
        let existing = insert_shift(&roster, &ana.id, Weekday::Monday, "06:00", "12:00", "Musculação");

        let empty = ScheduleDraft {
            employee_id: ana.id.clone(),
            replaces: vec![existing.clone()],
            ..Default::default()
        };
        assert!(matches!(
            roster.save_schedule(empty),
            Err(EngineError::Validation { field, .. }) if field == "blocks"
        ));

        let mut bad_time = ScheduleDraft {
            employee_id: ana.id.clone(),
            replaces: vec![existing],
            ..Default::default()
        };
        bad_time.blocks.insert(
            "Musculação".to_string(),
            BTreeMap::from([(Weekday::Monday, block("6h", "12:00"))]),
        );
        assert!(matches!(
            roster.save_schedule(bad_time),
            Err(EngineError::Validation { field, .. }) if field.ends_with(".start")
        ));

        assert_eq!(roster.list_shifts(&ShiftFilter::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_save_refuses_to_replace_another_employees_shift() {
        let roster = roster();
        let ana = roster
            .create_employee(employee("Ana", "Instrutor", ContractType::Hourly, Some(20)))
            .unwrap();
        let bia = roster
            .create_employee(employee("Bia", "Instrutor", ContractType::Hourly, Some(25)))
            .unwrap();
        let bia_shift = insert_shift(&roster, &bia.id, Weekday::Monday, "08:00", "10:00", "Musculação");

        let mut draft = ScheduleDraft {
            employee_id: ana.id.clone(),
            replaces: vec![bia_shift.clone(), "already-gone".to_string()],
            ..Default::default()
        };
        draft.blocks.insert(
            "Musculação".to_string(),
            BTreeMap::from([(Weekday::Monday, block("06:00", "12:00"))]),
        );
        assert!(matches!(
            roster.save_schedule(draft.clone()),
            Err(EngineError::Validation { field, .. }) if field == "replaces"
        ));

        let all = roster.list_shifts(&ShiftFilter::default()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, bia_shift);

        draft.replaces = vec!["already-gone".to_string()];
        let result = roster.save_schedule(draft).unwrap();
        assert_eq!(result.replaced, 0);
        assert_eq!(roster.list_shifts(&ShiftFilter::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_save_requires_known_employee() {
        let roster = roster();
        let mut draft = ScheduleDraft {
            employee_id: "ghost".to_string(),
            ..Default::default()
        };
        draft.blocks.insert(
            "Musculação".to_string(),
            BTreeMap::from([(Weekday::Monday, block("06:00", "12:00"))]),
        );
        assert!(matches!(
            roster.save_schedule(draft),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_hints_flag_closed_and_outside_hours() {
        let hours = BusinessHours {
            days: BTreeMap::from([
                (
                    Weekday::Monday,
                    DayHours {
                        opens: "06:00".to_string(),
                        closes: "22:00".to_string(),
                        closed: false,
                    },
                ),
                (
                    Weekday::Sunday,
                    DayHours {
                        opens: "08:00".to_string(),
                        closes: "14:00".to_string(),
                        closed: true,
                    },
                ),
            ]),
        };
        let shifts = vec![
            shift("s1", "e1", Weekday::Monday, "05:00", "Musculação"),
            shift("s2", "e1", Weekday::Sunday, "08:00", "Musculação"),
            shift("s3", "e1", Weekday::Tuesday, "05:00", "Musculação"),
        ];
        let hints = business_hours_hints(&hours, &shifts);
        let codes: Vec<(&str, Option<&str>)> = hints
            .iter()
            .map(|h| (h.code.as_str(), h.shift_id.as_deref()))
            .collect();
        assert_eq!(
            codes,
            vec![
                (SCHEDULE_HINT_OUTSIDE_HOURS, Some("s1")),
                (SCHEDULE_HINT_CLOSED_DAY, Some("s2")),
            ]
        );
    }

    #[test]
    fn test_delete_and_bulk_delete() {
        let roster = roster();
        let a = insert_shift(&roster, "e1", Weekday::Monday, "06:00", "12:00", "Musculação");
        let b = insert_shift(&roster, "e1", Weekday::Tuesday, "06:00", "12:00", "Musculação");
        let c = insert_shift(&roster, "e1", Weekday::Friday, "06:00", "12:00", "Musculação");

        roster.delete_shift(&a).unwrap();
        assert!(matches!(
            roster.delete_shift(&a),
            Err(EngineError::DocumentNotFound { .. })
        ));

        let removed = roster
            .delete_shifts(&[b.clone(), b, c, "missing".to_string()])
            .unwrap();
        assert_eq!(removed, 2);
        assert!(roster.list_shifts(&ShiftFilter::default()).unwrap().is_empty());
    }
}
