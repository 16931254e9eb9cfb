//! Top-level matching surface
//!
//! A [`Matcher`] owns one expected document, already variable-substituted,
//! and compares actual documents against it. Each `matches` call is an
//! operation boundary for logging:
//! - `log_op_start!` at entry, tagged with a fresh `match_id`
//! - `log_op_end!` when the walk finished, matched or not
//! - `log_op_error!` when the walk aborted
//!
//! The outcome of the last call is kept so assertion adapters can ask for
//! the failure message afterwards.

use crate::config::MatchConfig;
use crate::errors::{ExError, GosertError};
use crate::expr::substitute_variables;
use crate::model::{DocumentModel, JsonModel};
use crate::walk::{walk_documents, MatchOutcome};
use crate::{log_op_end, log_op_error, log_op_start};
use gosert_core_types::schema::EVENT_MISMATCH;
use gosert_core_types::MatchId;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Compares actual documents against one expected document
#[derive(Debug)]
pub struct Matcher<M: DocumentModel = JsonModel> {
    expected: Vec<u8>,
    model: M,
    config: MatchConfig,
    last: Option<MatchOutcome>,
}

impl<M: DocumentModel> Matcher<M> {
    /// Build a matcher, substituting `vars` into `expected` once
    ///
    /// # Errors
    ///
    /// `UndefinedVariable` if a placeholder has no value in `vars`.
    pub fn new(expected: &[u8], vars: &HashMap<String, String>, model: M) -> Result<Self, ExError> {
        let expected = substitute(expected, vars)?;
        Ok(Self {
            expected,
            model,
            config: MatchConfig::default(),
            last: None,
        })
    }

    /// Build a matcher from an expected document on disk
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`Matcher::new`].
    pub fn from_file(
        path: impl AsRef<Path>,
        vars: &HashMap<String, String>,
        model: M,
    ) -> Result<Self, ExError> {
        let bytes = read_file(path.as_ref())?;
        Self::new(&bytes, vars, model)
    }

    /// Replace the configuration
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the configuration does not validate.
    pub fn with_config(mut self, config: MatchConfig) -> Result<Self, ExError> {
        config
            .validate()
            .map_err(|e| ExError::from(e).with_op("configure"))?;
        self.config = config;
        Ok(self)
    }

    /// Expected document after substitution
    pub fn expected(&self) -> &[u8] {
        &self.expected
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Compare without logging or retaining the outcome
    pub fn evaluate(&self, actual: &[u8]) -> MatchOutcome {
        walk_documents(&self.expected, actual, &self.model, &self.config).into()
    }

    /// Compare `actual` against the expected document
    ///
    /// A mismatch is `Ok(false)`; the failure message describes it.
    ///
    /// # Errors
    ///
    /// Any error that aborted the walk, with its path and the `match` op.
    pub fn matches(&mut self, actual: &[u8]) -> Result<bool, ExError> {
        let match_id = MatchId::new();
        log_op_start!("match", match_id = match_id.as_str());
        let start = Instant::now();

        let outcome = self.evaluate(actual);
        let result = match &outcome.error {
            Some(err) => {
                let ex_err = ExError::from(err.clone()).with_op("match");
                log_op_error!(
                    "match",
                    ex_err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    match_id = match_id.as_str(),
                    path = ex_err.path().unwrap_or_default()
                );
                Err(ex_err)
            }
            None => {
                if let Some(diagnostic) = &outcome.diagnostic {
                    tracing::debug!(
                        op = "match",
                        event = EVENT_MISMATCH,
                        match_id = match_id.as_str(),
                        path = diagnostic.path.as_str(),
                        expected = diagnostic.expected.as_str(),
                        actual = diagnostic.actual.as_str(),
                    );
                }
                log_op_end!(
                    "match",
                    duration_ms = start.elapsed().as_millis() as u64,
                    match_id = match_id.as_str(),
                    matched = outcome.matched
                );
                Ok(outcome.matched)
            }
        };

        self.last = Some(outcome);
        result
    }

    /// Outcome of the last `matches` call
    pub fn last_outcome(&self) -> Option<&MatchOutcome> {
        self.last.as_ref()
    }

    /// `path = ..., expected = ..., actual = ...` for the last call
    pub fn failure_message(&self) -> String {
        self.last
            .as_ref()
            .map(MatchOutcome::failure_message)
            .unwrap_or_default()
    }

    pub fn negated_failure_message(&self) -> String {
        self.last
            .as_ref()
            .map(MatchOutcome::negated_failure_message)
            .unwrap_or_default()
    }
}

impl Matcher<JsonModel> {
    /// Matcher over JSON documents
    ///
    /// # Errors
    ///
    /// As [`Matcher::new`].
    pub fn json(expected: &[u8], vars: &HashMap<String, String>) -> Result<Self, ExError> {
        Self::new(expected, vars, JsonModel)
    }

    /// JSON matcher from a file
    ///
    /// # Errors
    ///
    /// As [`Matcher::from_file`].
    pub fn json_from_file(
        path: impl AsRef<Path>,
        vars: &HashMap<String, String>,
    ) -> Result<Self, ExError> {
        Self::from_file(path, vars, JsonModel)
    }
}

/// Substitute `${{NAME}}` placeholders in `text`
///
/// # Errors
///
/// `UndefinedVariable` naming the first unresolved placeholder.
pub fn substitute(text: &[u8], vars: &HashMap<String, String>) -> Result<Vec<u8>, ExError> {
    log_op_start!("substitute");
    let start = Instant::now();

    let replaced = substitute_variables(text, vars).map_err(|e| {
        let ex_err = ExError::from(e).with_op("substitute");
        log_op_error!(
            "substitute",
            ex_err.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        ex_err
    })?;

    log_op_end!(
        "substitute",
        duration_ms = start.elapsed().as_millis() as u64
    );
    Ok(replaced)
}

/// Read a file and substitute its placeholders
///
/// # Errors
///
/// `Io` if the file cannot be read, `UndefinedVariable` as [`substitute`].
pub fn read_substituted(
    path: impl AsRef<Path>,
    vars: &HashMap<String, String>,
) -> Result<Vec<u8>, ExError> {
    let bytes = read_file(path.as_ref())?;
    substitute(&bytes, vars)
}

fn read_file(path: &Path) -> Result<Vec<u8>, ExError> {
    std::fs::read(path).map_err(|e| {
        ExError::from(GosertError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
        .with_op("read")
    })
}
