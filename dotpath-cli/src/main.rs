//! dotpath CLI - Dot-notation access to JSON documents
//!
//! This binary provides command-line interfaces for:
//! - get / has: read a value at a path
//! - set / delete: modify a document in place and write it back out
//! - flatten / unflatten: convert between nested and `path → value` form
//! - paths: list every leaf path

mod config;

use clap::{Parser, Subcommand, ValueEnum};
use config::CliConfig;
use dotpath_core::{enumerate_paths, flatten, unflatten, DotPath};
use serde_json::Value;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dotpath")]
#[command(about = "Dot-notation get/set/has/delete over JSON documents")]
#[command(version)]
struct Cli {
    /// TOML configuration file with a [limits] table
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at PATH (exit code 1 when undefined)
    ///
    /// Examples:
    ///   dotpath get users.0.name -i data.json
    ///   dotpath get users.name -i data.json
    ///   dotpath get settings.theme --default '"light"' < data.json
    Get {
        /// Dot-notation path (`\.` escapes a dot, `*` is the wildcard)
        path: String,
        /// Input JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// JSON value to print when the path is undefined
        #[arg(long)]
        default: Option<String>,
    },
    /// Write VALUE at PATH and print the document
    ///
    /// Examples:
    ///   dotpath set user.active true -i data.json
    ///   dotpath set items.*.seen true -i data.json -o data.json
    ///   dotpath set user.name alice --raw-string < data.json
    Set {
        /// Dot-notation path
        path: String,
        /// JSON value to write
        value: String,
        /// Treat VALUE as a literal string instead of JSON
        #[arg(long)]
        raw_string: bool,
        /// Input JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print whether PATH resolves (exit code 1 when it does not)
    Has {
        /// Dot-notation path
        path: String,
        /// Input JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Remove the value at PATH and print the document
    Delete {
        /// Dot-notation path
        path: String,
        /// Input JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Flatten the document into a single-level `path → value` object
    Flatten {
        /// Input JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Rebuild a nested document from a flat `path → value` object
    Unflatten {
        /// Input JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// List every leaf path reachable through objects
    Paths {
        /// Input JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output format (lines, json)
        #[arg(long, value_enum, default_value_t = PathsFormat::Lines)]
        format: PathsFormat,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum PathsFormat {
    Lines,
    Json,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;
    let accessor = DotPath::new(config.limits)?;
    let compact = cli.compact;

    match cli.command {
        Commands::Get {
            path,
            input,
            default,
        } => handle_get(&accessor, &path, input, default, compact),
        Commands::Set {
            path,
            value,
            raw_string,
            input,
            output,
        } => handle_set(&accessor, &path, &value, raw_string, input, output, compact),
        Commands::Has { path, input } => handle_has(&accessor, &path, input),
        Commands::Delete {
            path,
            input,
            output,
        } => handle_delete(&accessor, &path, input, output, compact),
        Commands::Flatten { input } => {
            let document = read_document(input.as_deref())?;
            write_document(&Value::Object(flatten(&document)), None, compact)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Unflatten { input } => handle_unflatten(input, compact),
        Commands::Paths { input, format } => handle_paths(input, format),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("DOTPATH_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_get(
    accessor: &DotPath,
    path: &str,
    input: Option<PathBuf>,
    default: Option<String>,
    compact: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let document = read_document(input.as_deref())?;
    let found = match default {
        Some(raw) => {
            let default: Value = serde_json::from_str(&raw)
                .map_err(|e| format!("--default is not valid JSON: {e}"))?;
            accessor.get_or(&document, path, default)
        }
        None => accessor.get(&document, path),
    };

    match found {
        Some(value) => {
            write_document(&value, None, compact)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            tracing::debug!(path, "path is undefined");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_set(
    accessor: &DotPath,
    path: &str,
    raw_value: &str,
    raw_string: bool,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    compact: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let value = if raw_string {
        Value::String(raw_value.to_string())
    } else {
        serde_json::from_str(raw_value)
            .map_err(|e| format!("VALUE is not valid JSON (use --raw-string for text): {e}"))?
    };

    let mut document = read_document(input.as_deref())?;
    accessor.set(&mut document, path, value)?;
    write_document(&document, output.as_deref(), compact)?;
    Ok(ExitCode::SUCCESS)
}

fn handle_has(
    accessor: &DotPath,
    path: &str,
    input: Option<PathBuf>,
) -> Result<ExitCode, Box<dyn Error>> {
    let document = read_document(input.as_deref())?;
    let found = accessor.has(&document, path);
    println!("{found}");
    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_delete(
    accessor: &DotPath,
    path: &str,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    compact: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let mut document = read_document(input.as_deref())?;
    accessor.delete(&mut document, path)?;
    write_document(&document, output.as_deref(), compact)?;
    Ok(ExitCode::SUCCESS)
}

fn handle_unflatten(input: Option<PathBuf>, compact: bool) -> Result<ExitCode, Box<dyn Error>> {
    let document = read_document(input.as_deref())?;
    let Value::Object(flat) = document else {
        return Err("unflatten expects a JSON object of `path: value` entries".into());
    };
    write_document(&unflatten(&flat)?, None, compact)?;
    Ok(ExitCode::SUCCESS)
}

fn handle_paths(input: Option<PathBuf>, format: PathsFormat) -> Result<ExitCode, Box<dyn Error>> {
    let document = read_document(input.as_deref())?;
    let paths = enumerate_paths(&document);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match format {
        PathsFormat::Lines => {
            for path in &paths {
                writeln!(out, "{path}")?;
            }
        }
        PathsFormat::Json => {
            serde_json::to_writer(&mut out, &paths)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn read_document(input: Option<&Path>) -> Result<Value, Box<dyn Error>> {
    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(
            File::open(path).map_err(|e| format!("Failed to open '{}': {e}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    let document = serde_json::from_reader(BufReader::new(reader))
        .map_err(|e| format!("Failed to parse JSON input: {e}"))?;
    Ok(document)
}

fn write_document(
    value: &Value,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn Error>> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path)
                .map_err(|e| format!("Failed to create '{}': {e}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut out = BufWriter::new(writer);
    if compact {
        serde_json::to_writer(&mut out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut out, value)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
