pub mod builtin;
pub mod schema;

use crate::error::WqiError;
use rust_decimal::Decimal;
use schema::StandardTable;
use std::path::Path;

/// Load a standard table from a JSON file.
pub fn load_table(path: &Path) -> Result<StandardTable, WqiError> {
    let content = std::fs::read_to_string(path).map_err(|e| WqiError::StandardsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_table(&content, path)
}

/// Parse a standard table from a JSON string.
pub fn parse_table(json: &str, source: &Path) -> Result<StandardTable, WqiError> {
    let table: StandardTable = serde_json::from_str(json).map_err(|e| WqiError::StandardsLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_table(&table)?;
    log::info!(
        "loaded standard table '{}' (v{}) from {}",
        table.name,
        table.version,
        source.display()
    );
    Ok(table)
}

/// Parse a standard table from a JSON string (no file path context).
pub fn parse_table_str(json: &str) -> Result<StandardTable, WqiError> {
    let table: StandardTable = serde_json::from_str(json).map_err(WqiError::Json)?;
    validate_table(&table)?;
    Ok(table)
}

/// Validate that a standard table is usable by the scoring engine.
///
/// Every standard must be positive (weights are `K / standard`) and differ
/// from its ideal (sub-indices divide by `standard - ideal`).
pub fn validate_table(table: &StandardTable) -> Result<(), WqiError> {
    if table.name.trim().is_empty() {
        return Err(WqiError::StandardsInvalid("name must not be empty".into()));
    }

    if table.parameters.is_empty() {
        return Err(WqiError::StandardsInvalid(
            "parameters must not be empty".into(),
        ));
    }

    for (parameter, entry) in &table.parameters {
        if entry.standard <= Decimal::ZERO {
            return Err(WqiError::StandardsInvalid(format!(
                "parameter '{}' has non-positive standard {}",
                parameter.key(),
                entry.standard
            )));
        }

        if entry.standard == entry.ideal {
            return Err(WqiError::StandardsInvalid(format!(
                "parameter '{}' has standard equal to ideal ({})",
                parameter.key(),
                entry.ideal
            )));
        }
    }

    Ok(())
}
