//! Kroki CLI - render text diagrams through a Kroki service.
//!
//! Provides commands for:
//! - `convert`: Render a diagram file (or stdin) to an image
//! - `encode`: Print the Kroki payload for a diagram source
//! - `decode`: Print the diagram source for a payload or diagram URL
//! - `version`: Print version information

mod commands;
mod error;
mod input;
mod output;

use std::io;

use clap::{Parser, Subcommand};
use kroki_formats::FormatTables;
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, DecodeArgs, EncodeArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit the binary was built from, injected by the release build.
const COMMIT: &str = match option_env!("KROKI_COMMIT") {
    Some(commit) => commit,
    None => "n/a",
};

/// Kroki - render text diagrams to images.
#[derive(Parser)]
#[command(name = "kroki", version, about)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a text diagram to an image.
    Convert(ConvertArgs),
    /// Encode a text diagram as a Kroki payload.
    Encode(EncodeArgs),
    /// Decode a Kroki payload or diagram URL back to text.
    Decode(DecodeArgs),
    /// Print the version of kroki.
    Version,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let tables = FormatTables::builtin();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(&tables),
        Commands::Encode(args) => args.execute(),
        Commands::Decode(args) => args.execute(),
        Commands::Version => commands::version::execute(&mut io::stdout().lock(), VERSION, COMMIT),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
