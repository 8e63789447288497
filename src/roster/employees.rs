//! Employee records, their attachments and change history.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Attachment, ContractType, Employee, HistoryEntry};
use crate::store::{WriteBatch, collections, from_document, get_as, list_as, to_document};

use super::{Roster, required};

/// Fields to change on an employee.
///
/// Absent fields are left as stored. Optional fields distinguish an absent
/// key (`None`) from an explicit `null` (`Some(None)`), which clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// New contract type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,
    /// New monthly amount or default hourly rate.
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub value: Option<Option<Decimal>>,
    /// New fully-loaded cost.
    #[serde(
        default,
        alias = "costReal",
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_real: Option<Option<Decimal>>,
    /// Replacement set of per-area rates.
    #[serde(default, alias = "valuesByArea", skip_serializing_if = "Option::is_none")]
    pub values_by_area: Option<BTreeMap<String, Decimal>>,
    /// Hire date.
    #[serde(
        default,
        alias = "admissionDate",
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub admission_date: Option<Option<NaiveDate>>,
    /// Exit date. Setting it marks the employee inactive, clearing it
    /// reactivates them.
    #[serde(
        default,
        alias = "exitDate",
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_date: Option<Option<NaiveDate>>,
    /// Contact phone.
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
}

/// Reads a present key, `null` included, as `Some`.
fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Brings the stored `active` flag in line with the exit date.
fn derive_active(mut employee: Employee) -> Employee {
    employee.active = employee.is_active();
    employee
}

fn not_found(id: &str) -> EngineError {
    EngineError::EmployeeNotFound { id: id.to_string() }
}

impl Roster {
    /// Lists every employee in stored order.
    pub fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        let employees: Vec<Employee> = list_as(self.store(), collections::EMPLOYEES)?;
        Ok(employees.into_iter().map(derive_active).collect())
    }

    /// Fetches one employee.
    pub fn get_employee(&self, id: &str) -> EngineResult<Employee> {
        get_as(self.store(), collections::EMPLOYEES, id)
            .map(derive_active)
            .map_err(|e| match e {
                EngineError::DocumentNotFound { .. } => not_found(id),
                other => other,
            })
    }

    /// Creates an employee record.
    ///
    /// Name and role are required. Any id on the input is ignored; `active`
    /// follows the exit date and `created_at` is stamped now.
    pub fn create_employee(&self, employee: Employee) -> EngineResult<Employee> {
        let mut employee = employee;
        employee.name = required("name", &employee.name)?;
        employee.role = required("role", &employee.role)?;
        employee.active = employee.exit_date.is_none();
        employee.created_at = Some(Utc::now());
        employee.updated_at = None;

        let document = to_document(collections::EMPLOYEES, &employee)?;
        employee.id = self.store().add(collections::EMPLOYEES, document)?;

        info!(
            employee_id = %employee.id,
            contract_type = ?employee.contract_type,
            "Created employee"
        );
        Ok(employee)
    }

    /// Applies `update` to an employee, keeping unspecified fields.
    ///
    /// Stamps `updated_at`, rederives `active` from the resulting exit date
    /// and records the changed fields in the employee's history in the same
    /// batch.
    pub fn update_employee(&self, id: &str, update: EmployeeUpdate) -> EngineResult<Employee> {
        let mut stored = self
            .store()
            .get(collections::EMPLOYEES, id)?
            .ok_or_else(|| not_found(id))?;

        let mut update = update;
        update.name = update.name.as_deref().map(|n| required("name", n)).transpose()?;
        update.role = update.role.as_deref().map(|r| required("role", r)).transpose()?;

        let changes = to_document(collections::EMPLOYEES, &update)?;
        if changes.is_empty() {
            return from_document(collections::EMPLOYEES, id, stored);
        }

        let now = Utc::now();
        let mut fields = changes.clone();
        fields.insert("updated_at".to_string(), Value::String(now.to_rfc3339()));

        for (key, value) in &fields {
            stored.insert(key.clone(), value.clone());
        }
        let updated = derive_active(from_document(collections::EMPLOYEES, id, stored)?);
        fields.insert("active".to_string(), Value::Bool(updated.active));

        let history = HistoryEntry {
            id: String::new(),
            changed_at: now,
            changes: Value::Object(changes),
        };
        let mut batch = WriteBatch::new();
        batch.merge(collections::EMPLOYEES, id, fields);
        batch.set(
            collections::history(id),
            Uuid::new_v4().to_string(),
            to_document(&collections::history(id), &history)?,
        );
        self.store().commit(batch)?;

        info!(employee_id = %id, "Updated employee");
        Ok(updated)
    }

    /// Deletes an employee. Their shifts are left in place.
    pub fn delete_employee(&self, id: &str) -> EngineResult<()> {
        if !self.store().delete(collections::EMPLOYEES, id)? {
            return Err(not_found(id));
        }
        let orphaned = list_as::<crate::models::Shift>(self.store(), collections::SCHEDULES)?
            .iter()
            .filter(|s| s.employee_id == id)
            .count();
        if orphaned > 0 {
            warn!(employee_id = %id, orphaned_shifts = orphaned, "Deleted employee still has shifts");
        } else {
            info!(employee_id = %id, "Deleted employee");
        }
        Ok(())
    }

    /// Change history for an employee, oldest first.
    pub fn employee_history(&self, employee_id: &str) -> EngineResult<Vec<HistoryEntry>> {
        self.get_employee(employee_id)?;
        list_as(self.store(), &collections::history(employee_id))
    }

    /// Attachment metadata for an employee.
    pub fn list_attachments(&self, employee_id: &str) -> EngineResult<Vec<Attachment>> {
        self.get_employee(employee_id)?;
        list_as(self.store(), &collections::attachments(employee_id))
    }

    /// Records attachment metadata. Name and url are required.
    pub fn add_attachment(&self, employee_id: &str, attachment: Attachment) -> EngineResult<Attachment> {
        self.get_employee(employee_id)?;
        let mut attachment = attachment;
        attachment.name = required("name", &attachment.name)?;
        attachment.url = required("url", &attachment.url)?;
        if attachment.uploaded_at.is_none() {
            attachment.uploaded_at = Some(Utc::now());
        }

        let collection = collections::attachments(employee_id);
        attachment.id = self
            .store()
            .add(&collection, to_document(&collection, &attachment)?)?;

        info!(employee_id = %employee_id, attachment_id = %attachment.id, "Added attachment");
        Ok(attachment)
    }

    /// Removes attachment metadata.
    pub fn delete_attachment(&self, employee_id: &str, attachment_id: &str) -> EngineResult<()> {
        let collection = collections::attachments(employee_id);
        if !self.store().delete(&collection, attachment_id)? {
            return Err(EngineError::DocumentNotFound {
                collection,
                id: attachment_id.to_string(),
            });
        }
        info!(employee_id = %employee_id, attachment_id = %attachment_id, "Deleted attachment");
        Ok(())
    }
}
