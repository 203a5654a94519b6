pub mod engine;
pub mod explain;
pub mod outcome;
pub mod status;

pub use engine::{compute_breakdown, compute_index, round2};
pub use explain::{explain, ExplainProfile, DEFAULT_REASON_LIMIT};
pub use outcome::{IndexBreakdown, Reason, SubIndex, WqiResult};
pub use status::{classify, classify_optional, SeverityColor, StatusBand};

use crate::model::Measurement;
use crate::standards::schema::StandardTable;

/// Score, classify and explain a measurement in one pass.
pub fn evaluate(
    measurement: &Measurement,
    table: &StandardTable,
    profile: ExplainProfile,
) -> WqiResult {
    evaluate_with_limit(measurement, table, profile, DEFAULT_REASON_LIMIT)
}

/// Like [`evaluate`] with a custom cap on the number of reasons.
pub fn evaluate_with_limit(
    measurement: &Measurement,
    table: &StandardTable,
    profile: ExplainProfile,
    limit: usize,
) -> WqiResult {
    let breakdown = compute_breakdown(measurement, table);
    let status = classify(breakdown.index);

    WqiResult {
        index: breakdown.index,
        status,
        color: status.color(),
        contributing_factors: explain(measurement, table, profile, limit),
        sub_indices: breakdown.sub_indices,
        unscored: breakdown.unscored,
    }
}
