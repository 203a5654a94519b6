pub mod locations;
pub mod score;
pub mod sensor;
pub mod standards;

use crate::TableArgs;
use wqi_core::config::{load_config, DashboardConfig};
use wqi_core::error::WqiError;
use wqi_core::standards::schema::StandardTable;
use wqi_core::standards::{builtin, load_table};

/// Resolve the dashboard config and scoring table from command-line options.
pub fn resolve(args: &TableArgs) -> Result<(DashboardConfig, StandardTable), WqiError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default(),
    };

    let table = if let Some(path) = &args.standards {
        load_table(path)?
    } else if let Some(preset) = &args.preset {
        builtin::load_preset(preset)?
    } else {
        config.standard_table()?
    };

    log::debug!("scoring with standard table '{}'", table.name);
    Ok((config, table))
}
