use gosert_core::{ExError, MatchOutcome, Matcher};
use std::collections::HashMap;

/// Build a variable map from literal pairs
#[allow(dead_code)]
pub fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// JSON matcher over `expected` with no variables
#[allow(dead_code)]
pub fn json_matcher(expected: &str) -> Matcher {
    Matcher::json(expected.as_bytes(), &HashMap::new()).expect("expected document should build")
}

/// One-shot match of two JSON documents
#[allow(dead_code)]
pub fn matches(expected: &str, actual: &str) -> Result<bool, ExError> {
    json_matcher(expected).matches(actual.as_bytes())
}

/// One-shot evaluation without logging
#[allow(dead_code)]
pub fn outcome(expected: &str, actual: &str) -> MatchOutcome {
    json_matcher(expected).evaluate(actual.as_bytes())
}

/// Path of the first mismatch, panicking on a match or an error
#[allow(dead_code)]
pub fn mismatch_path(expected: &str, actual: &str) -> String {
    let outcome = outcome(expected, actual);
    assert!(
        !outcome.matched && outcome.error.is_none(),
        "expected a plain mismatch, got {:?}",
        outcome
    );
    outcome
        .diagnostic
        .map(|diagnostic| diagnostic.path)
        .unwrap_or_default()
}
