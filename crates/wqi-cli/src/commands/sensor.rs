use std::path::PathBuf;
use wqi_core::error::WqiError;
use wqi_core::telemetry::IotReading;

use crate::output;
use crate::TableArgs;

pub fn run(input_file: PathBuf, table_args: &TableArgs, output_format: &str) -> Result<(), WqiError> {
    let (config, table) = super::resolve(table_args)?;

    let json_bytes = std::fs::read(&input_file)?;
    let reading = IotReading::ingest(&json_bytes)?;
    let result = wqi_core::evaluate_reading(&reading, &table);

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "reading": reading,
            "result": result,
        }))?,
        _ => output::table::print_reading(&reading, &result, &config),
    }

    Ok(())
}
