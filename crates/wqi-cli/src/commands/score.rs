use std::path::PathBuf;
use wqi_core::error::WqiError;
use wqi_core::model::Measurement;
use wqi_core::score::ExplainProfile;

use crate::output;
use crate::TableArgs;

pub fn run(
    input_file: PathBuf,
    table_args: &TableArgs,
    profile: &str,
    limit: usize,
    output_format: &str,
    verbose: bool,
) -> Result<(), WqiError> {
    let profile = ExplainProfile::from_str_loose(profile).ok_or_else(|| {
        WqiError::ConfigInvalid(format!(
            "unknown profile '{}'. Available: laboratory, sensor",
            profile
        ))
    })?;
    let (config, table) = super::resolve(table_args)?;

    // A file holds either one sample or an array of samples
    let json_bytes = std::fs::read(&input_file)?;
    let value: serde_json::Value = serde_json::from_slice(&json_bytes)?;
    let samples: Vec<Measurement> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    log::info!(
        "scoring {} sample(s) from {}",
        samples.len(),
        input_file.display()
    );

    let results = wqi_core::evaluate_samples(&samples, &table, profile, limit);

    match output_format {
        "json" => output::json::print(&results)?,
        _ => output::table::print_results(&results, &table, &config, verbose),
    }

    Ok(())
}
