mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wqi",
    version,
    about = "Water Quality Index scoring for laboratory samples and field sensors"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the scoring table comes from. First match wins:
/// --standards, --preset, the config's table, then the default preset.
#[derive(Args, Clone)]
pub struct TableArgs {
    /// Custom JSON standard table
    #[arg(short, long = "standards", value_name = "FILE")]
    pub standards: Option<PathBuf>,

    /// Predefined standard table: drinking, field
    #[arg(short, long = "preset", value_name = "NAME")]
    pub preset: Option<String>,

    /// Dashboard config JSON (standard table, safety messages, scale)
    #[arg(short, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one or more samples (JSON object or array of objects)
    Score {
        /// Path to a JSON file with the sample(s)
        input_file: PathBuf,

        #[command(flatten)]
        table: TableArgs,

        /// Explanation profile: laboratory (default) or sensor
        #[arg(long, default_value = "laboratory")]
        profile: String,

        /// Maximum number of reasons per sample
        #[arg(long, default_value_t = 3)]
        limit: usize,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show per-parameter sub-indices and weights
        #[arg(long)]
        verbose: bool,
    },
    /// Score a field sensor reading (the /api/iot JSON body)
    Sensor {
        /// Path to a JSON file with the reading
        input_file: PathBuf,

        #[command(flatten)]
        table: TableArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect standard tables
    Standards {
        #[command(subcommand)]
        action: StandardsAction,
    },
    /// List monitoring locations with their index
    Locations {
        /// JSON file with locations (default: built-in reference sites)
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        table: TableArgs,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Find the location nearest to a point
    Nearest {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// JSON file with locations (default: built-in reference sites)
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        table: TableArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum StandardsAction {
    /// List predefined standard tables
    List,
    /// Explain a standard table in plain language
    Explain {
        /// Preset name (e.g., "drinking")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom standard table file
    Validate {
        /// Path to JSON standard table
        file: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            input_file,
            table,
            profile,
            limit,
            output,
            verbose,
        } => commands::score::run(input_file, &table, &profile, limit, &output, verbose),
        Commands::Sensor {
            input_file,
            table,
            output,
        } => commands::sensor::run(input_file, &table, &output),
        Commands::Standards { action } => match action {
            StandardsAction::List => commands::standards::list(),
            StandardsAction::Explain { preset } => commands::standards::explain(&preset),
            StandardsAction::Schema => commands::standards::schema(),
            StandardsAction::Validate { file } => commands::standards::validate(&file),
        },
        Commands::Locations {
            file,
            table,
            output,
        } => commands::locations::list(file, &table, &output),
        Commands::Nearest {
            lat,
            lng,
            file,
            table,
            output,
        } => commands::locations::nearest(lat, lng, file, &table, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
