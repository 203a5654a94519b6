use std::path::PathBuf;
use wqi_core::error::WqiError;
use wqi_core::geo::Coordinate;
use wqi_core::locations::{self, Location};

use crate::output;
use crate::TableArgs;

fn load(file: Option<PathBuf>) -> Result<Vec<Location>, WqiError> {
    match file {
        Some(path) => locations::load_locations(&path),
        None => locations::reference_locations(),
    }
}

pub fn list(file: Option<PathBuf>, table_args: &TableArgs, output_format: &str) -> Result<(), WqiError> {
    let (_, table) = super::resolve(table_args)?;
    let sites = load(file)?;

    match output_format {
        "json" => {
            let summaries: Vec<_> = sites.iter().map(|l| l.summarize(&table)).collect();
            output::json::print(&summaries)?
        }
        "csv" => locations::write_csv(&sites, &table, std::io::stdout().lock())?,
        _ => output::table::print_locations(&sites, &table),
    }

    Ok(())
}

pub fn nearest(
    lat: f64,
    lng: f64,
    file: Option<PathBuf>,
    table_args: &TableArgs,
    output_format: &str,
) -> Result<(), WqiError> {
    let (_, table) = super::resolve(table_args)?;
    let sites = load(file)?;
    let point = Coordinate::new(lat, lng);

    let found = locations::nearest(&sites, point)?;
    let result = found.to_wqi(&table)?;

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print_nearest(found.location, found.distance_km, &result),
    }

    Ok(())
}
