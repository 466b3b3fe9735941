//! reggie CLI - check professional registrations for a list of people
//!
//! Reads a CSV of people, resolves each registration to a canonical status and
//! writes the results as JSON or CSV.

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use reggie::constants::KNOWN_UNCHECKED_REGISTRATION_BODIES;
use reggie::{ProcessingConfig, RegistrationProcessor};

#[derive(Parser)]
#[command(name = "reggie")]
#[command(
    version,
    about = "Check professional registration status for a list of people",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check registrations for every person in a CSV file
    ///
    /// No site checkers are built into this binary: bodies outside the
    /// manual-check list report "error, check manually". Use --no-check to
    /// mark every registration as not checked instead.
    Check {
        /// Input CSV file
        input: PathBuf,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (default: configured output_file, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (json, csv)
        #[arg(short, long)]
        format: Option<String>,

        /// Skip live registry lookups
        #[arg(long)]
        no_check: bool,

        /// Input has a header row instead of the configured column names
        #[arg(long)]
        has_headers: bool,
    },

    /// Print the effective configuration
    ShowConfig {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List registration bodies and how they are checked
    ListBodies,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            input,
            config,
            output,
            format,
            no_check,
            has_headers,
        } => {
            let mut overrides = Map::new();
            if let Some(output) = output {
                overrides.insert(
                    "output_file".to_string(),
                    Value::String(output.to_string_lossy().into_owned()),
                );
            }
            if let Some(format) = format {
                overrides.insert("output_format".to_string(), Value::String(format.to_lowercase()));
            }
            if no_check {
                overrides.insert("check_registrations".to_string(), Value::Bool(false));
            }
            if has_headers {
                overrides.insert("column_names".to_string(), Value::Null);
            }
            check(input, config, overrides)
        }
        Commands::ShowConfig { config } => show_config(config),
        Commands::ListBodies => {
            list_bodies();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ProcessingConfig, String> {
    match path {
        Some(path) => ProcessingConfig::load_from_file(&path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e)),
        None => Ok(ProcessingConfig::default()),
    }
}

/// Process the input file and write results
fn check(
    input: PathBuf,
    config: Option<PathBuf>,
    overrides: Map<String, Value>,
) -> Result<(), String> {
    let config = load_config(config)?
        .merged(&overrides)
        .map_err(|e| e.to_string())?;

    let processor = RegistrationProcessor::new(config);
    let people = processor
        .process_csv(&input)
        .map_err(|e| format!("Failed to process {}: {}", input.display(), e))?;

    if processor.config().output_file.is_some() {
        processor.save(&people).map_err(|e| e.to_string())?;
    } else {
        let stdout = io::stdout();
        processor
            .write_output(&people, stdout.lock())
            .map_err(|e| e.to_string())?;
    }

    let live = people.iter().filter(|p| p.has_live_registration()).count();
    tracing::info!("{} of {} people hold a live registration", live, people.len());
    Ok(())
}

fn show_config(config: Option<PathBuf>) -> Result<(), String> {
    let config = load_config(config)?;
    let rendered = serde_json::to_string_pretty(&config.to_dict()).map_err(|e| e.to_string())?;
    println!("{}", rendered);
    Ok(())
}

fn list_bodies() {
    let processor = RegistrationProcessor::new(ProcessingConfig::default());
    let supported = processor.supported_bodies();

    println!("Automatically checked:");
    if supported.is_empty() {
        println!("  (none built in; other bodies report \"error, check manually\")");
    }
    for body in supported {
        println!("  {}", body);
    }

    println!("Check manually:");
    for body in KNOWN_UNCHECKED_REGISTRATION_BODIES {
        println!("  {}", body);
    }
}
