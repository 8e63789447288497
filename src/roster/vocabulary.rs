//! Roles and areas vocabularies.
//!
//! Both are open: the offered names are the stored entries plus whatever
//! existing records already use. The configured seed is copied into the
//! store once, on first use, so seeded names can be renamed and deleted like
//! any other. Renames rewrite every referencing record in the same batch as
//! the entry itself; deletes are refused while a record still references the
//! name.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Shift, VocabularyEntry, VocabularyKind};
use crate::store::{WriteBatch, collections, list_as, to_document};

use super::{Roster, required};

/// What a rename touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOutcome {
    /// Roles or areas.
    pub kind: VocabularyKind,
    /// The old name.
    pub from: String,
    /// The new name.
    pub to: String,
    /// Employees whose role or area rates were rewritten.
    pub employees_updated: usize,
    /// Shifts whose area was rewritten.
    pub shifts_updated: usize,
}

fn entry_document(kind: VocabularyKind, name: &str) -> EngineResult<Map<String, Value>> {
    to_document(
        kind.collection(),
        &VocabularyEntry {
            name: name.to_string(),
        },
    )
}

impl Roster {
    /// Copies the configured seed for `kind` into the store unless that has
    /// already happened.
    fn seed_vocabulary(&self, kind: VocabularyKind) -> EngineResult<()> {
        let mut marker = self
            .store()
            .get(collections::SETTINGS, collections::VOCABULARY_SEED_DOC)?
            .unwrap_or_default();
        if marker.get(kind.collection()).and_then(Value::as_bool) == Some(true) {
            return Ok(());
        }

        let seed = self.config().vocabulary();
        let names = match kind {
            VocabularyKind::Role => &seed.roles,
            VocabularyKind::Area => &seed.areas,
        };
        let mut batch = WriteBatch::new();
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            batch.set(kind.collection(), name, entry_document(kind, name)?);
        }
        let seeded = batch.len();
        marker.insert(kind.collection().to_string(), Value::Bool(true));
        batch.set(collections::SETTINGS, collections::VOCABULARY_SEED_DOC, marker);
        self.store().commit(batch)?;

        info!(kind = kind.label(), seeded = seeded, "Seeded vocabulary from configuration");
        Ok(())
    }

    fn stored_names(&self, kind: VocabularyKind) -> EngineResult<Vec<String>> {
        Ok(self
            .store()
            .list(kind.collection())?
            .into_iter()
            .map(|(id, document)| {
                document
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or(id)
            })
            .collect())
    }

    /// Every offered name for `kind`, sorted and deduplicated.
    pub fn list_vocabulary(&self, kind: VocabularyKind) -> EngineResult<Vec<String>> {
        self.seed_vocabulary(kind)?;
        let mut names: BTreeSet<String> = self.stored_names(kind)?.into_iter().collect();

        match kind {
            VocabularyKind::Role => {
                let employees: Vec<Employee> = list_as(self.store(), collections::EMPLOYEES)?;
                names.extend(employees.into_iter().map(|e| e.role));
            }
            VocabularyKind::Area => {
                let shifts: Vec<Shift> = list_as(self.store(), collections::SCHEDULES)?;
                let employees: Vec<Employee> = list_as(self.store(), collections::EMPLOYEES)?;
                names.extend(shifts.into_iter().map(|s| s.area));
                names.extend(employees.into_iter().flat_map(|e| e.values_by_area.into_keys()));
            }
        }

        Ok(names
            .into_iter()
            .filter(|name| !name.trim().is_empty())
            .collect())
    }

    /// Adds a name. Fails with `DuplicateName` if it is already offered.
    pub fn add_vocabulary(&self, kind: VocabularyKind, name: &str) -> EngineResult<String> {
        let name = required("name", name)?;
        if self.list_vocabulary(kind)?.contains(&name) {
            return Err(EngineError::DuplicateName {
                kind: kind.label().to_string(),
                name,
            });
        }
        self.store()
            .set(kind.collection(), &name, entry_document(kind, &name)?)?;
        info!(kind = kind.label(), name = %name, "Added vocabulary entry");
        Ok(name)
    }

    /// Renames an entry and every record that references it, atomically.
    ///
    /// For roles this rewrites each employee's role. For areas it rewrites
    /// each shift's area and the matching key of every employee's per-area
    /// rates.
    pub fn rename_vocabulary(&self, kind: VocabularyKind, from: &str, to: &str) -> EngineResult<RenameOutcome> {
        let from = required("from", from)?;
        let to = required("name", to)?;
        let offered = self.list_vocabulary(kind)?;
        if !offered.contains(&from) {
            return Err(EngineError::DocumentNotFound {
                collection: kind.collection().to_string(),
                id: from,
            });
        }
        if from != to && offered.contains(&to) {
            return Err(EngineError::DuplicateName {
                kind: kind.label().to_string(),
                name: to,
            });
        }

        let mut batch = WriteBatch::new();
        let mut employees_updated = 0;
        let mut shifts_updated = 0;
        let employees: Vec<Employee> = list_as(self.store(), collections::EMPLOYEES)?;

        match kind {
            VocabularyKind::Role => {
                for employee in employees.iter().filter(|e| e.role == from) {
                    let mut fields = Map::new();
                    fields.insert("role".to_string(), Value::String(to.clone()));
                    batch.merge(collections::EMPLOYEES, employee.id.as_str(), fields);
                    employees_updated += 1;
                }
            }
            VocabularyKind::Area => {
                let shifts: Vec<Shift> = list_as(self.store(), collections::SCHEDULES)?;
                for shift in shifts.iter().filter(|s| s.area == from) {
                    let mut fields = Map::new();
                    fields.insert("area".to_string(), Value::String(to.clone()));
                    batch.merge(collections::SCHEDULES, shift.id.as_str(), fields);
                    shifts_updated += 1;
                }
                for employee in employees {
                    let mut rates = employee.values_by_area;
                    let Some(rate) = rates.remove(&from) else {
                        continue;
                    };
                    rates.insert(to.clone(), rate);
                    let mut fields = Map::new();
                    fields.insert(
                        "values_by_area".to_string(),
                        serde_json::to_value(&rates).map_err(|e| EngineError::Serialization {
                            collection: collections::EMPLOYEES.to_string(),
                            message: e.to_string(),
                        })?,
                    );
                    batch.merge(collections::EMPLOYEES, employee.id.as_str(), fields);
                    employees_updated += 1;
                }
            }
        }

        batch.delete(kind.collection(), from.as_str());
        batch.set(kind.collection(), to.as_str(), entry_document(kind, &to)?);
        self.store().commit(batch)?;

        info!(
            kind = kind.label(),
            from = %from,
            to = %to,
            employees_updated = employees_updated,
            shifts_updated = shifts_updated,
            "Renamed vocabulary entry"
        );
        Ok(RenameOutcome {
            kind,
            from,
            to,
            employees_updated,
            shifts_updated,
        })
    }

    /// Deletes an entry unless a record still references it.
    ///
    /// A role is referenced by employees holding it, an area by shifts in it.
    /// Deleting a name that is not stored succeeds and changes nothing.
    pub fn delete_vocabulary(&self, kind: VocabularyKind, name: &str) -> EngineResult<()> {
        self.seed_vocabulary(kind)?;
        let references = match kind {
            VocabularyKind::Role => list_as::<Employee>(self.store(), collections::EMPLOYEES)?
                .iter()
                .filter(|e| e.role == name)
                .count(),
            VocabularyKind::Area => list_as::<Shift>(self.store(), collections::SCHEDULES)?
                .iter()
                .filter(|s| s.area == name)
                .count(),
        };
        if references > 0 {
            return Err(EngineError::VocabularyInUse {
                kind: kind.label().to_string(),
                name: name.to_string(),
                references,
            });
        }
        let existed = self.store().delete(kind.collection(), name)?;
        info!(kind = kind.label(), name = %name, existed = existed, "Deleted vocabulary entry");
        Ok(())
    }
}
