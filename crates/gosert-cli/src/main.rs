//! gosert CLI
//!
//! Command-line interface for matching JSON documents against expected
//! documents with embedded matcher expressions.
//!
//! Exit status: 0 on match, 1 on mismatch, 2 on error.

use clap::{Parser, Subcommand, ValueEnum};
use gosert_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "gosert")]
#[command(about = "gosert - Structural matching for JSON documents", long_about = None)]
struct Cli {
    /// Log to stderr with the given profile (RUST_LOG overrides the filter)
    #[arg(long, global = true, value_enum)]
    log: Option<LogProfile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    /// Human-readable, debug level
    Dev,
    /// JSON lines, info level
    Prod,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Dev => Profile::Development,
            LogProfile::Prod => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Match an actual document against an expected document
    Match(commands::matching::MatchArgs),
    /// Print a file with its ${{NAME}} placeholders substituted
    Substitute(commands::substitute::SubstituteArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log {
        logging_facility::init(profile.into());
    }

    let result = match cli.command {
        Commands::Match(args) => commands::matching::execute(args),
        Commands::Substitute(args) => commands::substitute::execute(args).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
