use std::path::Path;
use wqi_core::error::WqiError;
use wqi_core::model::Parameter;
use wqi_core::score::StatusBand;
use wqi_core::standards::builtin;
use wqi_core::standards::schema::StandardTable;

pub fn list() -> Result<(), WqiError> {
    println!("Available predefined standard tables:\n");
    for name in builtin::PRESETS {
        let table = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<10} {} (v{}){}",
            name, table.name, table.version, default_marker
        );
        if let Some(ref desc) = table.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), WqiError> {
    let table = builtin::load_preset(preset)?;

    println!("{} (version {})\n", table.name, table.version);

    if let Some(ref desc) = table.description {
        println!("{}\n", desc);
    }

    println!(
        "Each measured parameter gets a sub-index: 0 at its ideal value, 100 at"
    );
    println!("its standard. Sub-indices below 0 are floored at 0. Temperature is");
    println!("scored on its distance from ideal in either direction.\n");
    println!("The index is the weighted mean of the measured sub-indices, where each");
    println!("weight is proportional to 1 / standard. Unmeasured parameters are skipped.\n");

    print_parameters(&table);

    println!("Status bands:\n");
    let mut lower = String::from("0");
    for band in StatusBand::ALL {
        let range = match band.upper_bound() {
            Some(upper) => format!("{} - {}", lower, upper),
            None => format!("> {}", lower),
        };
        println!("  {:<12} {:<22} {}", range, band.label(), band.safety_message());
        if let Some(upper) = band.upper_bound() {
            lower = upper.to_string();
        }
    }
    println!();

    Ok(())
}

fn print_parameters(table: &StandardTable) {
    let max_name_len = table
        .parameters
        .keys()
        .map(|p| p.label().len())
        .max()
        .unwrap_or(12);

    println!("Parameters:\n");
    println!(
        "  {:<width$}  {:<10}  {:<10}  Unit",
        "Parameter",
        "Ideal",
        "Standard",
        width = max_name_len
    );
    println!("  {}", "-".repeat(max_name_len + 2 + 12 + 12 + 6));

    for (parameter, entry) in &table.parameters {
        println!(
            "  {:<width$}  {:<10}  {:<10}  {}",
            parameter.label(),
            entry.ideal,
            entry.standard,
            table.unit(*parameter),
            width = max_name_len
        );
        if let Some(ref note) = entry.note {
            println!("  {:<width$}  {}", "", note, width = max_name_len);
        }
    }
    println!();
}

pub fn schema() -> Result<(), WqiError> {
    let keys: Vec<&str> = Parameter::ALL.iter().map(|p| p.key()).collect();
    print!(
        r#"JSON Standard Table Schema
==========================

A standard table sets, for each parameter, the ideal value (sub-index 0)
and the standard value (sub-index 100) used by `wqi score`.

Top-level fields:
  name          (string, required)  Human-readable name of the table
  description   (string, optional)  What this table is for
  version       (string, required)  Version identifier (e.g., "2024.1")
  parameters    (object, required)  Map of parameter key -> entry (see below)

Parameter keys: {keys}

Each parameter entry:
  ideal         (number, required)  Value contributing zero degradation
  standard      (number, required)  Permissible limit. Must be positive and
                                    differ from ideal.
  unit          (string, optional)  Unit for display
  note          (string, optional)  Regulatory reference or explanation

Values may be JSON numbers or quoted decimal strings ("8.5").

Example:
{{
  "name": "Site X",
  "version": "1.0",
  "parameters": {{
    "ph": {{ "ideal": "7.0", "standard": "8.5" }},
    "do": {{ "ideal": "14.6", "standard": "5.0", "note": "lower is worse" }},
    "turbidity": {{ "ideal": "1.0", "standard": "5.0", "unit": "NTU" }}
  }}
}}
"#,
        keys = keys.join(", ")
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), WqiError> {
    let table = wqi_core::standards::load_table(file)?;

    println!("Standard table '{}' (v{}) is valid.", table.name, table.version);
    let keys: Vec<&str> = table.parameters.keys().map(|p| p.key()).collect();
    println!("  Parameters: {}", keys.join(", "));

    // Warnings, not errors
    let missing: Vec<&str> = Parameter::ALL
        .iter()
        .filter(|p| table.get(**p).is_none())
        .map(|p| p.key())
        .collect();
    if !missing.is_empty() {
        println!("\nWarnings:");
        println!(
            "  - not scored by this table: {} (readings are ignored)",
            missing.join(", ")
        );
    }

    Ok(())
}
