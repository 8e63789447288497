//! Recurring operational costs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::OperationalCost;
use crate::store::{collections, from_document, list_as, to_document};

use super::{Roster, required};

/// Fields to change on an operational cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalCostUpdate {
    /// New label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New monthly amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
}

fn check_value(value: Decimal) -> EngineResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(EngineError::validation("value", "must not be negative"));
    }
    Ok(value)
}

fn not_found(id: &str) -> EngineError {
    EngineError::DocumentNotFound {
        collection: collections::OPERATIONAL_COSTS.to_string(),
        id: id.to_string(),
    }
}

impl Roster {
    /// Every operational cost item.
    pub fn list_operational_costs(&self) -> EngineResult<Vec<OperationalCost>> {
        list_as(self.store(), collections::OPERATIONAL_COSTS)
    }

    /// Adds a cost item. The name is required and the value must not be negative.
    pub fn create_operational_cost(&self, cost: OperationalCost) -> EngineResult<OperationalCost> {
        let mut cost = cost;
        cost.name = required("name", &cost.name)?;
        cost.value = check_value(cost.value)?;
        cost.id = self.store().add(
            collections::OPERATIONAL_COSTS,
            to_document(collections::OPERATIONAL_COSTS, &cost)?,
        )?;
        info!(cost_id = %cost.id, value = %cost.value, "Created operational cost");
        Ok(cost)
    }

    /// Changes the given fields of a cost item.
    pub fn update_operational_cost(&self, id: &str, update: OperationalCostUpdate) -> EngineResult<OperationalCost> {
        let mut stored = self
            .store()
            .get(collections::OPERATIONAL_COSTS, id)?
            .ok_or_else(|| not_found(id))?;

        let update = OperationalCostUpdate {
            name: update.name.as_deref().map(|n| required("name", n)).transpose()?,
            value: update.value.map(check_value).transpose()?,
        };
        let fields = to_document(collections::OPERATIONAL_COSTS, &update)?;
        if !fields.is_empty() {
            self.store()
                .merge(collections::OPERATIONAL_COSTS, id, fields.clone())?;
            info!(cost_id = %id, "Updated operational cost");
        }
        stored.extend(fields);
        from_document(collections::OPERATIONAL_COSTS, id, stored)
    }

    /// Removes a cost item.
    pub fn delete_operational_cost(&self, id: &str) -> EngineResult<()> {
        if !self.store().delete(collections::OPERATIONAL_COSTS, id)? {
            return Err(not_found(id));
        }
        info!(cost_id = %id, "Deleted operational cost");
        Ok(())
    }
}
