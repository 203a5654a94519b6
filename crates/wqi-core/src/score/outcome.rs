use crate::model::Parameter;
use crate::score::status::{SeverityColor, StatusBand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parameter's contribution to the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubIndex {
    pub parameter: Parameter,
    /// The observed reading.
    pub observed: Decimal,
    /// Sub-index after clamping at zero, rounded to 2 decimals.
    pub quality_rating: Decimal,
    /// Relative weight `K / standard`.
    pub weight: Decimal,
}

/// Index value together with the per-parameter terms it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexBreakdown {
    /// Weighted mean of the sub-indices, exactly 2 decimal places.
    pub index: Decimal,
    /// Sub-indices in canonical parameter order.
    pub sub_indices: Vec<SubIndex>,
    /// Parameters that were measured but have no entry in the standard table.
    pub unscored: Vec<Parameter>,
}

/// One line of the "why" explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    /// The deviating parameter; absent for the all-clear statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Parameter>,
    /// Severity score used for ranking.
    pub score: Decimal,
    /// Human-readable sentence.
    pub message: String,
}

impl Reason {
    pub fn is_all_clear(&self) -> bool {
        self.parameter.is_none()
    }
}

/// Full evaluation of a measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WqiResult {
    /// Water Quality Index, exactly 2 decimal places.
    pub index: Decimal,
    pub status: StatusBand,
    pub color: SeverityColor,
    /// Most severe first.
    pub contributing_factors: Vec<Reason>,
    pub sub_indices: Vec<SubIndex>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unscored: Vec<Parameter>,
}
