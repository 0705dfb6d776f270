//! # Estimate CLI
//!
//! Terminal front end for `estimate_core`. Takes the project on the command
//! line (or as a JSON `ProjectInput` file), runs the estimate and prints a
//! text report or the JSON result.
//!
//! ```text
//! estimate --area 1000 --floors-label G+2 --location Urban
//! estimate --area 1800 --floors 2 --preset compact --duration 90 --json
//! estimate --input project.json --preset-file custom_rates.json
//! ```

mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use estimate_core::{estimate, EstimateError, EstimateResult, EstimationPreset, PresetName, ProjectInput};

#[derive(Parser, Debug)]
#[command(
    name = "estimate",
    about = "Estimate cost, workforce, materials and schedule for a residential build",
    version
)]
struct Args {
    /// Built-up area in the preset's unit (sq yd for standard, sq ft for compact)
    #[arg(long)]
    area: Option<f64>,

    /// Floor count including the ground floor
    #[arg(long, conflicts_with = "floors_label")]
    floors: Option<i64>,

    /// Floors as a label: G, G+1, G+2, ...
    #[arg(long, value_name = "LABEL")]
    floors_label: Option<String>,

    /// Location tier: Urban, Suburban, Rural or Metro
    #[arg(long, default_value = "Urban")]
    location: String,

    /// Target duration in days (0 for none)
    #[arg(long, value_name = "DAYS")]
    duration: Option<i64>,

    /// Built-in coefficient preset: standard or compact
    #[arg(long, default_value = "standard")]
    preset: PresetName,

    /// Load the preset from a JSON file instead
    #[arg(long, value_name = "PATH")]
    preset_file: Option<PathBuf>,

    /// Read the project from a JSON file instead of flags
    #[arg(long, value_name = "PATH", conflicts_with_all = ["area", "floors", "floors_label", "duration"])]
    input: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("Arguments: {:?}", args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("estimate_core={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> EstimateResult<()> {
    let custom;
    let preset = match &args.preset_file {
        Some(path) => {
            custom = EstimationPreset::from_json(&read_file(path)?)?;
            &custom
        }
        None => args.preset.preset(),
    };

    let input = project_input(args)?;
    let result = estimate(&input, preset)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let generated_on = chrono::Local::now().format("%d %b %Y, %H:%M").to_string();
        print!("{}", report::render(&result, &generated_on));
    }
    Ok(())
}

fn project_input(args: &Args) -> EstimateResult<ProjectInput> {
    if let Some(path) = &args.input {
        return Ok(serde_json::from_str(&read_file(path)?)?);
    }

    let area = args.area.ok_or_else(|| {
        EstimateError::invalid_configuration("area", "missing", "Pass --area or --input")
    })?;

    let mut input = match (args.floors, &args.floors_label) {
        (Some(floors), _) => ProjectInput::new(area, floors, &args.location),
        (None, Some(label)) => ProjectInput::with_floors_label(area, label, &args.location),
        (None, None) => ProjectInput::with_floors_label(area, "G", &args.location),
    };
    if let Some(days) = args.duration {
        input = input.with_duration_constraint(days);
    }
    Ok(input)
}

fn read_file(path: &Path) -> EstimateResult<String> {
    fs::read_to_string(path).map_err(|e| EstimateError::file_error("read", path.display().to_string(), e.to_string()))
}
