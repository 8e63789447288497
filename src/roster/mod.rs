//! Roster operations over a document store.
//!
//! [`Roster`] owns the store handle and the loaded configuration and exposes
//! the typed operations the HTTP layer calls: employee records, schedules,
//! operational costs, vocabularies, settings and user profiles. Read-side
//! computations load a [`RosterSnapshot`] once and run the calculation
//! functions over it.

mod costs;
mod employees;
mod schedules;
mod settings;
mod snapshot;
mod users;
mod vocabulary;

pub use costs::OperationalCostUpdate;
pub use employees::EmployeeUpdate;
pub use schedules::{
    DraftScope, SCHEDULE_HINT_CLOSED_DAY, SCHEDULE_HINT_OUTSIDE_HOURS, ScheduleDraft,
    ScheduleSaveResult, TimeBlock, base_area_name, build_draft, business_hours_hints,
};
pub use snapshot::RosterSnapshot;
pub use vocabulary::RenameOutcome;

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{OperationalCost, Shift};
use crate::store::{DocumentStore, collections, list_as};

/// Typed operations over the roster collections.
#[derive(Clone)]
pub struct Roster {
    store: Arc<dyn DocumentStore>,
    config: Arc<ConfigLoader>,
}

impl Roster {
    /// Creates a roster over `store` using `config` for defaults.
    pub fn new(store: Arc<dyn DocumentStore>, config: Arc<ConfigLoader>) -> Self {
        Self { store, config }
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// The loaded configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Fetches employees, shifts and operational costs in one pass.
    pub fn snapshot(&self) -> EngineResult<RosterSnapshot> {
        let employees = self.list_employees()?;
        let shifts: Vec<Shift> = list_as(self.store(), collections::SCHEDULES)?;
        let operational_costs: Vec<OperationalCost> =
            list_as(self.store(), collections::OPERATIONAL_COSTS)?;
        Ok(RosterSnapshot::new(employees, shifts, operational_costs))
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Trims `value` and fails with a validation error naming `field` if it is empty.
pub(crate) fn required(field: &str, value: &str) -> EngineResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::{EngineSettings, RosterConfig, VocabularySeed};
    use crate::models::{BusinessHours, ContractType, Employee, Weekday};
    use crate::store::{MemoryStore, to_document};
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    pub fn roster() -> Roster {
        Roster::new(Arc::new(MemoryStore::new()), Arc::new(ConfigLoader::default()))
    }

    /// A roster whose configuration seeds the given roles and areas.
    pub fn seeded_roster(roles: &[&str], areas: &[&str]) -> Roster {
        let seed = VocabularySeed {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            areas: areas.iter().map(|a| a.to_string()).collect(),
        };
        let config = RosterConfig::new(EngineSettings::default(), BusinessHours::default(), seed);
        Roster::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ConfigLoader::from_config(config)),
        )
    }

    pub fn employee(name: &str, role: &str, contract_type: ContractType, value: Option<i64>) -> Employee {
        Employee {
            id: String::new(),
            name: name.to_string(),
            role: role.to_string(),
            contract_type,
            value: value.map(Decimal::from),
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

    pub fn insert_shift(roster: &Roster, employee_id: &str, day: Weekday, start: &str, end: &str, area: &str) -> String {
        let shift = Shift {
            id: String::new(),
            employee_id: employee_id.to_string(),
            day,
            start: start.to_string(),
            end: end.to_string(),
            area: area.to_string(),
        };
        roster
            .store()
            .add(collections::SCHEDULES, to_document(collections::SCHEDULES, &shift).unwrap())
            .unwrap()
    }

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required("name", "  Ana ").unwrap(), "Ana");
        assert!(matches!(
            required("name", "   "),
            Err(EngineError::Validation { field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_snapshot_loads_all_collections() {
        let roster = roster();
        let ana = roster
            .create_employee(employee("Ana", "Instrutor", ContractType::Hourly, Some(20)))
            .unwrap();
        insert_shift(&roster, &ana.id, Weekday::Monday, "06:00", "12:00", "Musculação");

        let snapshot = roster.snapshot().unwrap();
        assert_eq!(snapshot.employees.len(), 1);
        assert_eq!(snapshot.shifts.len(), 1);
        assert_eq!(snapshot.shifts[0].employee_id, ana.id);
        assert!(snapshot.operational_costs.is_empty());
    }
}
