use crate::model::Parameter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A standard table defining ideal and permissible values per parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardTable {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Parameters scored by this table, keyed in canonical order.
    pub parameters: BTreeMap<Parameter, ParameterStandard>,
}

/// Ideal and standard value for a single parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterStandard {
    /// Value at which the parameter contributes zero degradation.
    pub ideal: Decimal,
    /// Permissible limit; a reading at this value scores a sub-index of 100.
    pub standard: Decimal,
    /// Unit for display. Defaults to the parameter's own unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Regulatory reference or explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl StandardTable {
    pub fn get(&self, parameter: Parameter) -> Option<&ParameterStandard> {
        self.parameters.get(&parameter)
    }

    pub fn ideal(&self, parameter: Parameter) -> Option<Decimal> {
        self.get(parameter).map(|s| s.ideal)
    }

    /// Display unit for a parameter in this table.
    pub fn unit(&self, parameter: Parameter) -> &str {
        self.get(parameter)
            .and_then(|s| s.unit.as_deref())
            .unwrap_or_else(|| parameter.unit())
    }
}
