mod common;

use common::{matches, vars};
use gosert_core::walk::{Diagnostic, WalkError};
use gosert_core::{ExError, ExErrorKind, GosertError, Kind, MatchConfig, Matcher};

#[test]
fn test_every_kind_has_a_distinct_code() {
    let kinds = [
        ExErrorKind::TypeMismatch,
        ExErrorKind::Syntax,
        ExErrorKind::SchemaViolation,
        ExErrorKind::UndefinedVariable,
        ExErrorKind::InvalidInput,
        ExErrorKind::Io,
    ];
    let mut codes: Vec<&str> = kinds.iter().map(ExErrorKind::code).collect();
    assert!(codes.iter().all(|code| code.starts_with("ERR_")));
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
}

#[test]
fn test_domain_errors_classify() {
    let cases = [
        (
            GosertError::TypeMismatch {
                expected: Kind::String,
                actual: Kind::Number,
            },
            ExErrorKind::TypeMismatch,
        ),
        (
            GosertError::InvalidExpression {
                input: "{{BeEmpty(}}".to_string(),
                reason: "expected {{BeEmpty()}}".to_string(),
            },
            ExErrorKind::Syntax,
        ),
        (GosertError::MixedReconciliation, ExErrorKind::SchemaViolation),
        (
            GosertError::UndefinedVariable {
                name: "N".to_string(),
            },
            ExErrorKind::UndefinedVariable,
        ),
        (
            GosertError::ArrayAssertionNotAllowed {
                input: "x".to_string(),
            },
            ExErrorKind::InvalidInput,
        ),
        (
            GosertError::Io {
                path: "p".to_string(),
                reason: "gone".to_string(),
            },
            ExErrorKind::Io,
        ),
    ];
    for (err, kind) in cases {
        assert_eq!(err.kind(), kind, "{}", err);
        assert_eq!(ExError::from(err).kind(), kind);
    }
}

#[test]
fn test_walk_error_conversion_keeps_path() {
    let walk_err = WalkError::new(
        Diagnostic::new(".items[2].v", "1", "\"x\""),
        GosertError::TypeMismatch {
            expected: Kind::Number,
            actual: Kind::String,
        },
    );
    let ex: ExError = walk_err.into();

    assert_eq!(ex.kind(), ExErrorKind::TypeMismatch);
    assert_eq!(ex.path(), Some(".items[2].v"));
    assert_eq!(ex.message(), "path has type String but assertion uses Number");
    assert_eq!(
        ex.to_string(),
        "[ERR_TYPE_MISMATCH]: path has type String but assertion uses Number (path: .items[2].v)"
    );
}

#[test]
fn test_match_errors_surface_with_kind_and_path() {
    let cases = [
        (
            r#"{"n": "{{BeEmpty()}}"}"#,
            r#"{"n": 1}"#,
            ExErrorKind::TypeMismatch,
            ".n",
        ),
        (
            r#"{"s": "{{BeTimestamp(yesterday, 1)}}"}"#,
            r#"{"s": "2024-01-01T00:00:00Z"}"#,
            ExErrorKind::Syntax,
            ".s",
        ),
        (
            r#"{"a": [{"v": 1}]}"#,
            r#"{"a": [{"v": 1}]}"#,
            ExErrorKind::SchemaViolation,
            ".a",
        ),
        (
            r#"{"a": "{{BeTimestamp(2024-01-01T00:00:00Z, 1)}}"}"#,
            r#"{"a": [1]}"#,
            ExErrorKind::InvalidInput,
            ".a",
        ),
    ];
    for (expected, actual, kind, path) in cases {
        let err = matches(expected, actual).unwrap_err();
        assert_eq!(err.kind(), kind, "{}", expected);
        assert_eq!(err.op(), Some("match"), "{}", expected);
        assert_eq!(err.path(), Some(path), "{}", expected);
    }
}

#[test]
fn test_construction_errors() {
    let err = Matcher::json(br#"{"a": "${{MISSING}}"}"#, &vars(&[("OTHER", "1")])).unwrap_err();
    assert_eq!(err.code(), "ERR_UNDEFINED_VARIABLE");
    assert_eq!(err.op(), Some("substitute"));

    let err = Matcher::json(b"{}", &vars(&[]))
        .unwrap()
        .with_config(MatchConfig::default().with_numeric_tolerance(f64::NAN))
        .unwrap_err();
    assert_eq!(err.code(), "ERR_INVALID_INPUT");
    assert_eq!(err.op(), Some("configure"));
}
