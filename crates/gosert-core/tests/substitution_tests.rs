mod common;

use common::vars;
use gosert_core::expr::{placeholder_names, substitute_variables};
use gosert_core::{substitute, ExErrorKind, GosertError};
use std::collections::HashMap;

#[test]
fn test_substitution_is_textual() {
    let text = br#"{"a": "${{A}}", "n": ${{N}}, "t": "{{BeTimestamp(${{T}}, 10)}}"}"#;
    let out = substitute_variables(
        text,
        &vars(&[("A", "x"), ("N", "12"), ("T", "2020-01-01T00:00:00Z")]),
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        r#"{"a": "x", "n": 12, "t": "{{BeTimestamp(2020-01-01T00:00:00Z, 10)}}"}"#
    );
}

#[test]
fn test_unused_vars_are_ignored() {
    let out = substitute_variables(b"${{A}}", &vars(&[("A", "1"), ("B", "2")])).unwrap();
    assert_eq!(out, b"1");
}

#[test]
fn test_missing_name_in_order_of_appearance() {
    let err = substitute_variables(b"${{Z}} ${{A}}", &HashMap::new()).unwrap_err();
    assert_eq!(
        err,
        GosertError::UndefinedVariable {
            name: "Z".to_string()
        }
    );
}

#[test]
fn test_non_word_names_are_not_placeholders() {
    let text = b"${{A-B}} ${{}} ${ {C}}";
    assert!(placeholder_names(text).is_empty());
    assert_eq!(substitute_variables(text, &HashMap::new()).unwrap(), text.to_vec());
}

#[test]
fn test_values_are_not_rescanned() {
    let out = substitute_variables(b"${{A}}", &vars(&[("A", "${{B}}")])).unwrap();
    assert_eq!(out, b"${{B}}");
}

#[test]
fn test_substitute_wraps_error_with_op() {
    let err = substitute(b"${{MISSING}}", &HashMap::new()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::UndefinedVariable);
    assert_eq!(err.op(), Some("substitute"));
}
