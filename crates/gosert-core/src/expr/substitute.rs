//! `${{NAME}}` variable substitution
//!
//! Purely textual and runs before any parsing, so placeholders may sit
//! inside expressions such as `{{BeTimestamp(${{NOW}}, 5000)}}`.

use crate::errors::{GosertError, Result};
use gosert_core_types::Sensitive;
use regex::bytes::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid"))
}

/// Distinct placeholder names in order of first appearance
pub fn placeholder_names(text: &[u8]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in placeholder().captures_iter(text) {
        let name = String::from_utf8_lossy(&caps[1]).into_owned();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Replace every `${{NAME}}` in `text` with its value from `vars`
///
/// # Errors
///
/// `UndefinedVariable` naming the first placeholder, in order of
/// appearance, that has no entry in `vars`. Nothing is replaced then.
pub fn substitute_variables(text: &[u8], vars: &HashMap<String, String>) -> Result<Vec<u8>> {
    let names = placeholder_names(text);
    if let Some(missing) = names.iter().find(|name| !vars.contains_key(name.as_str())) {
        return Err(GosertError::UndefinedVariable {
            name: missing.clone(),
        });
    }

    tracing::debug!(var_count = names.len(), "substituting variables");
    for name in &names {
        if let Some(value) = vars.get(name) {
            tracing::trace!(name = %name, value = ?Sensitive::new(value), "variable resolved");
        }
    }

    let replaced = placeholder().replace_all(text, |caps: &Captures<'_>| {
        let name = String::from_utf8_lossy(&caps[1]);
        vars.get(name.as_ref())
            .map(|value| value.as_bytes().to_vec())
            .unwrap_or_default()
    });
    Ok(match replaced {
        Cow::Borrowed(unchanged) => unchanged.to_vec(),
        Cow::Owned(owned) => owned,
    })
}
