//! Substitute command
//!
//! Usage: gosert substitute <FILE> [--var NAME=VALUE]... [--vars-file <FILE>] [--output <FILE>]

use super::VarArgs;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SubstituteArgs {
    /// File containing ${{NAME}} placeholders
    pub file: PathBuf,

    #[command(flatten)]
    pub vars: VarArgs,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute substitute command
pub fn execute(args: SubstituteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let vars = args.vars.resolve()?;
    let text = gosert_core::read_substituted(&args.file, &vars)?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, &text)?;
        eprintln!("✓ Substituted into {}", output_path.display());
    } else {
        std::io::stdout().write_all(&text)?;
    }

    Ok(())
}
