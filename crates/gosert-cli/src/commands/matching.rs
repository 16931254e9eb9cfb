//! Match command
//!
//! Usage: gosert match <EXPECTED> <ACTUAL> [--var NAME=VALUE]... [--vars-file <FILE>] [--numeric-tolerance <F>]

use super::VarArgs;
use clap::Args;
use gosert_core::{ExError, GosertError, MatchConfig, Matcher};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Expected document, may embed matcher expressions
    pub expected: PathBuf,

    /// Actual document
    pub actual: PathBuf,

    #[command(flatten)]
    pub vars: VarArgs,

    /// Tolerance when comparing number literals (default 0.05)
    #[arg(long, value_name = "F")]
    pub numeric_tolerance: Option<f64>,
}

/// Execute match command
///
/// Prints `match`, or the failure message of the first mismatch.
pub fn execute(args: MatchArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let vars = args.vars.resolve()?;

    let mut matcher = Matcher::json_from_file(&args.expected, &vars)?;
    if let Some(tolerance) = args.numeric_tolerance {
        matcher = matcher.with_config(MatchConfig::default().with_numeric_tolerance(tolerance))?;
    }

    let actual = std::fs::read(&args.actual).map_err(|e| {
        ExError::from(GosertError::Io {
            path: args.actual.display().to_string(),
            reason: e.to_string(),
        })
    })?;

    let matched = matcher.matches(&actual)?;
    if matched {
        println!("match");
    } else {
        println!("{}", matcher.failure_message());
    }
    Ok(matched)
}
