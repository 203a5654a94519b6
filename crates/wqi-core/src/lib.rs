pub mod api;
pub mod config;
pub mod error;
pub mod geo;
pub mod locations;
pub mod model;
pub mod score;
pub mod standards;
pub mod telemetry;

use model::Measurement;
use score::{ExplainProfile, WqiResult};
use standards::schema::StandardTable;
use telemetry::IotReading;

/// Score and explain a laboratory sample with the full parameter panel.
pub fn evaluate_sample(measurement: &Measurement, table: &StandardTable) -> WqiResult {
    score::evaluate(measurement, table, ExplainProfile::Laboratory)
}

/// Score and explain a batch of samples against one table.
pub fn evaluate_samples(
    measurements: &[Measurement],
    table: &StandardTable,
    profile: ExplainProfile,
    limit: usize,
) -> Vec<WqiResult> {
    measurements
        .iter()
        .map(|m| score::evaluate_with_limit(m, table, profile, limit))
        .collect()
}

/// Score and explain a field sensor reading.
///
/// Only the parameters the sensor reports are scored; the rest are absent.
pub fn evaluate_reading(reading: &IotReading, table: &StandardTable) -> WqiResult {
    score::evaluate(&reading.to_measurement(), table, ExplainProfile::Sensor)
}
