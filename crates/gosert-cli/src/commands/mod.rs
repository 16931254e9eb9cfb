pub mod matching;
pub mod substitute;

use clap::Args;
use std::collections::HashMap;
use std::path::PathBuf;

/// Variable sources shared by every subcommand
#[derive(Debug, Args)]
pub struct VarArgs {
    /// Value for a ${{NAME}} placeholder (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// JSON object of string values; --var entries take precedence
    #[arg(long, value_name = "FILE")]
    pub vars_file: Option<PathBuf>,
}

impl VarArgs {
    /// Merge the vars file and the `--var` flags
    pub fn resolve(&self) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
        let mut vars = match &self.vars_file {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
                serde_json::from_slice::<HashMap<String, String>>(&bytes).map_err(|e| {
                    format!(
                        "vars file '{}' must be a JSON object of strings: {}",
                        path.display(),
                        e
                    )
                })?
            }
            None => HashMap::new(),
        };
        vars.extend(self.vars.iter().cloned());
        Ok(vars)
    }
}

fn parse_var(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", input)),
    }
}
