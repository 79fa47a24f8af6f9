//! flatconf CLI
//!
//! Entry point for the `flatconf` command-line tool: loads a set of
//! configuration sources in priority order and prints the flattened or
//! merged view.

use clap::{Parser, Subcommand};
use flatconf::{Container, FileSource, FlatMapping};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "flatconf")]
#[command(about = "Flatten and merge layered configuration sources", version)]
struct Cli {
    /// Only emit error-level log events
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a single JSON or TOML file and print its flat mapping
    Flatten {
        /// Path to the source file
        file: PathBuf,
    },

    /// Merge sources in priority order and print the effective view
    Merge {
        /// Required source file (repeatable; listed order is priority order)
        #[arg(long = "file")]
        files: Vec<PathBuf>,

        /// Optional source file; skipped silently when unreadable
        #[arg(long = "optional-file")]
        optional_files: Vec<PathBuf>,

        /// Highest-priority overrides as flag arguments (after --)
        #[arg(last = true)]
        overrides: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match cli.command {
        Commands::Flatten { file } => run_flatten(&file),
        Commands::Merge {
            files,
            optional_files,
            overrides,
        } => run_merge(files, optional_files, overrides),
    }
}

fn init_logging(quiet: bool) {
    let directive = if quiet { "flatconf=error" } else { "flatconf=info" };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("invalid log directive")),
        )
        .init();
}

fn run_flatten(file: &PathBuf) {
    match FileSource::new(file).load() {
        Ok(Some((mapping, _))) => print_mapping(&mapping),
        Ok(None) => unreachable!("source was not marked optional"),
        Err(e) => {
            eprintln!("Error loading source: {}", e);
            process::exit(1);
        }
    }
}

fn run_merge(files: Vec<PathBuf>, optional_files: Vec<PathBuf>, overrides: Vec<String>) {
    let mut container = Container::new();

    for file in &files {
        if let Err(e) = container.add_file(&FileSource::new(file)) {
            eprintln!("Error loading source: {}", e);
            process::exit(1);
        }
    }
    for file in &optional_files {
        if let Err(e) = container.add_file(&FileSource::new(file).optional()) {
            eprintln!("Error loading source: {}", e);
            process::exit(1);
        }
    }
    if !overrides.is_empty() {
        container.add_args(&overrides);
    }

    print_mapping(container.merged());
}

/// Print a flat mapping as a JSON object of dotted path -> value.
fn print_mapping(mapping: &FlatMapping) {
    let mut out = serde_json::Map::new();
    for (path, value) in mapping.iter() {
        out.insert(path.to_string(), serde_json::Value::String(value.to_string()));
    }
    match serde_json::to_string_pretty(&serde_json::Value::Object(out)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
