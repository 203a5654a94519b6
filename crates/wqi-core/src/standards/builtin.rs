use crate::error::WqiError;
use crate::standards::schema::StandardTable;
use crate::standards::validate_table;

const DRINKING_JSON: &str = include_str!("../../../../standards/drinking.json");
const FIELD_JSON: &str = include_str!("../../../../standards/field.json");

/// Available predefined standard tables.
pub const PRESETS: &[&str] = &["drinking", "field"];

/// Preset used when no table is given explicitly.
pub const DEFAULT_PRESET: &str = "drinking";

/// Load a predefined standard table by name.
pub fn load_preset(name: &str) -> Result<StandardTable, WqiError> {
    let json = match name {
        "drinking" => DRINKING_JSON,
        "field" => FIELD_JSON,
        _ => {
            return Err(WqiError::StandardsInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    let table: StandardTable = serde_json::from_str(json)?;
    validate_table(&table)?;
    Ok(table)
}
