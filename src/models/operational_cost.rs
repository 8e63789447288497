//! Recurring non-personnel monthly expenses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recurring monthly expense such as rent or accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalCost {
    /// Identifier assigned by the document store.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Monthly amount.
    pub value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_value() {
        let cost: OperationalCost =
            serde_json::from_str(r#"{"name": "Aluguel", "value": 8000}"#).unwrap();
        assert_eq!(cost.name, "Aluguel");
        assert_eq!(cost.value, Decimal::new(8000, 0));
    }
}
