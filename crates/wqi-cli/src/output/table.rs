use std::fmt::Display;
use wqi_core::api::NearestWqi;
use wqi_core::config::DashboardConfig;
use wqi_core::locations::Location;
use wqi_core::score::WqiResult;
use wqi_core::standards::schema::StandardTable;
use wqi_core::telemetry::IotReading;

pub fn print_results(
    results: &[WqiResult],
    table: &StandardTable,
    config: &DashboardConfig,
    verbose: bool,
) {
    let multi_sample = results.len() > 1;

    for (i, result) in results.iter().enumerate() {
        if multi_sample {
            if i > 0 {
                println!();
            }
            println!("--- Sample {} ---\n", i + 1);
        }
        print_result(result, table, config, verbose);
    }
}

fn print_result(result: &WqiResult, table: &StandardTable, config: &DashboardConfig, verbose: bool) {
    println!(
        "  WQI: {}  {} ({})",
        result.index,
        result.status,
        config.hex_for(result.color)
    );
    println!("  {}\n", config.safety_message(result.status));

    if verbose && !result.sub_indices.is_empty() {
        let max_name = result
            .sub_indices
            .iter()
            .map(|s| s.parameter.label().len())
            .max()
            .unwrap_or(10);

        println!("  Sub-indices:");
        for sub in &result.sub_indices {
            println!(
                "    {:<width$}  {:>8} {:<5}  qi {:>7}  weight {:.4}",
                sub.parameter.label(),
                sub.observed,
                table.unit(sub.parameter),
                sub.quality_rating,
                sub.weight,
                width = max_name
            );
        }
        if !result.unscored.is_empty() {
            let keys: Vec<&str> = result.unscored.iter().map(|p| p.key()).collect();
            println!("    Not in standard table: {}", keys.join(", "));
        }
        println!();
    }

    println!("  Why:");
    for reason in &result.contributing_factors {
        println!("    - {}", reason.message);
    }
}

pub fn print_reading(reading: &IotReading, result: &WqiResult, config: &DashboardConfig) {
    match reading.display_timestamp() {
        Some(ts) => println!("Last update: {ts} IST\n"),
        None => println!("Last update: unknown\n"),
    }

    println!("  Temperature  {} °C", show(reading.temperature_c));
    println!("  pH           {}", show(reading.ph));
    println!("  Turbidity    {} NTU\n", show(reading.turbidity));

    println!("  WQI: {}  {}", result.index, result.status);
    println!("  {}\n", config.safety_message(result.status));

    println!("  Why:");
    for reason in &result.contributing_factors {
        println!("    - {}", reason.message);
    }
}

fn show<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

pub fn print_locations(locations: &[Location], table: &StandardTable) {
    let summaries: Vec<_> = locations.iter().map(|l| l.summarize(table)).collect();
    let max_name = summaries
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(20);

    println!(
        "  {:<width$}  {:>9}  {:>9}  {:>7}  Status",
        "Location",
        "Latitude",
        "Longitude",
        "WQI",
        width = max_name
    );
    println!("  {}", "-".repeat(max_name + 2 + 11 + 11 + 9 + 22));

    for s in &summaries {
        let wqi = s
            .wqi
            .map(|w| w.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<width$}  {:>9.4}  {:>9.4}  {:>7}  {}",
            s.name,
            s.latitude,
            s.longitude,
            wqi,
            s.status,
            width = max_name
        );
    }
}

pub fn print_nearest(location: &Location, distance_km: f64, result: &NearestWqi) {
    println!(
        "  Nearest: {} ({:.4}, {:.4}), {:.1} km away",
        location.display_name(),
        result.latitude,
        result.longitude,
        distance_km
    );
    println!("  WQI: {}  {}", result.wqi, result.status);
}
