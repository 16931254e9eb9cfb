use crate::errors::{GosertError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where a match failed and what was compared there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "path = {}, expected = {}, actual = {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Result of comparing one expected/actual pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Matched,
    Mismatch(Diagnostic),
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Matched)
    }
}

/// An error that aborted the walk, with the position it arose at
///
/// Display names the position only; the domain error is the `source`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("walk aborted at {diagnostic}")]
pub struct WalkError {
    pub diagnostic: Diagnostic,
    #[source]
    pub source: GosertError,
}

impl WalkError {
    pub fn new(diagnostic: Diagnostic, source: GosertError) -> Self {
        Self { diagnostic, source }
    }
}

pub type WalkResult = std::result::Result<Verdict, WalkError>;

/// Attach a diagnostic to a domain error
pub trait AtDiagnostic<T> {
    /// # Errors
    ///
    /// Returns the original error wrapped with the diagnostic.
    fn at<F>(self, diagnostic: F) -> std::result::Result<T, WalkError>
    where
        F: FnOnce() -> Diagnostic;
}

impl<T> AtDiagnostic<T> for Result<T> {
    fn at<F>(self, diagnostic: F) -> std::result::Result<T, WalkError>
    where
        F: FnOnce() -> Diagnostic,
    {
        self.map_err(|source| WalkError {
            diagnostic: diagnostic(),
            source,
        })
    }
}

/// Outcome of a whole match call
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub matched: bool,
    /// Position of the first mismatch or error
    pub diagnostic: Option<Diagnostic>,
    pub error: Option<WalkError>,
}

impl MatchOutcome {
    pub fn matched() -> Self {
        Self {
            matched: true,
            diagnostic: None,
            error: None,
        }
    }

    /// `path = ..., expected = ..., actual = ...`, empty after a match
    pub fn failure_message(&self) -> String {
        self.diagnostic
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Message for a negated assertion that unexpectedly held, empty after a match
    pub fn negated_failure_message(&self) -> String {
        self.diagnostic
            .as_ref()
            .map(|diagnostic| format!("Not {}", diagnostic))
            .unwrap_or_default()
    }
}

impl From<WalkResult> for MatchOutcome {
    fn from(result: WalkResult) -> Self {
        match result {
            Ok(Verdict::Matched) => MatchOutcome::matched(),
            Ok(Verdict::Mismatch(diagnostic)) => MatchOutcome {
                matched: false,
                diagnostic: Some(diagnostic),
                error: None,
            },
            Err(error) => MatchOutcome {
                matched: false,
                diagnostic: Some(error.diagnostic.clone()),
                error: Some(error),
            },
        }
    }
}
