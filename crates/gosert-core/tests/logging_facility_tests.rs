#![allow(clippy::unwrap_used, clippy::expect_used)]

use gosert_core::logging_facility::test_capture::init_test_capture;
use gosert_core::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_MISMATCH, EVENT_START, FIELD_COMPONENT, FIELD_DURATION_MS,
    FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_PATH,
};
use gosert_core::{log_op_end, log_op_error, log_op_start, substitute, GosertError, Matcher};
use std::collections::HashMap;
use tracing::Level;

#[test]
fn test_op_start_and_end_events() {
    let capture = init_test_capture();

    log_op_start!("logging_test_start_end");
    log_op_end!("logging_test_start_end", duration_ms = 7);

    capture.assert_event_exists("logging_test_start_end", EVENT_START);
    capture.assert_event_exists("logging_test_start_end", EVENT_END);

    let end = capture
        .events()
        .into_iter()
        .find(|e| {
            e.op.as_deref() == Some("logging_test_start_end") && e.event.as_deref() == Some(EVENT_END)
        })
        .unwrap();
    assert_eq!(end.level, Level::INFO);
    assert_eq!(end.field(FIELD_DURATION_MS), Some("7"));
    assert!(end
        .field(FIELD_COMPONENT)
        .is_some_and(|component| component.ends_with("logging_facility_tests")));
}

#[test]
fn test_op_error_event_carries_code() {
    let capture = init_test_capture();
    let err = GosertError::UndefinedVariable {
        name: "X".to_string(),
    };

    log_op_error!("logging_test_error", err, duration_ms = 1);

    let event = capture
        .events()
        .into_iter()
        .find(|e| e.op.as_deref() == Some("logging_test_error"))
        .unwrap();
    assert_eq!(event.level, Level::ERROR);
    assert_eq!(event.event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(
        event.field(FIELD_ERR_CODE),
        Some("ERR_UNDEFINED_VARIABLE")
    );
    assert_eq!(event.field(FIELD_ERR_KIND), Some("UndefinedVariable"));
}

#[test]
fn test_match_call_events_share_match_id() {
    let capture = init_test_capture();
    let mut matcher =
        Matcher::json(br#"{"logging_sample_mismatch": 1}"#, &HashMap::new()).unwrap();

    assert!(!matcher.matches(br#"{"logging_sample_mismatch": 2}"#).unwrap());

    let mismatch = capture
        .events()
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_MISMATCH)
                && e.field(FIELD_PATH) == Some(".logging_sample_mismatch")
        })
        .expect("mismatch event");
    let match_id = mismatch.match_id.clone().expect("match_id on mismatch");

    let events = capture.events_for_match(&match_id);
    let names: Vec<&str> = events.iter().filter_map(|e| e.event.as_deref()).collect();
    assert_eq!(names, vec![EVENT_START, EVENT_MISMATCH, EVENT_END]);

    let end = events.last().unwrap();
    assert_eq!(end.field("matched"), Some("false"));
    assert_eq!(mismatch.field("expected"), Some("1"));
    assert_eq!(mismatch.field("actual"), Some("2"));
}

#[test]
fn test_match_error_event() {
    let capture = init_test_capture();
    let mut matcher =
        Matcher::json(br#"{"logging_sample_error": true}"#, &HashMap::new()).unwrap();

    matcher
        .matches(br#"{"logging_sample_error": "yes"}"#)
        .unwrap_err();

    let error = capture
        .events()
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END_ERROR)
                && e.field(FIELD_PATH) == Some(".logging_sample_error")
        })
        .expect("error event");
    assert_eq!(error.op.as_deref(), Some("match"));
    assert_eq!(
        error.field(FIELD_ERR_CODE),
        Some("ERR_TYPE_MISMATCH")
    );
    assert!(error.match_id.is_some());
}

#[test]
fn test_substitute_events() {
    let capture = init_test_capture();
    let vars = HashMap::from([("LOGGING_NAME".to_string(), "v".to_string())]);

    substitute(b"${{LOGGING_NAME}}", &vars).unwrap();

    capture.assert_event_exists("substitute", EVENT_START);
    capture.assert_event_exists("substitute", EVENT_END);
}

#[test]
fn test_variable_values_are_redacted() {
    let capture = init_test_capture();
    let vars = HashMap::from([(
        "LOGGING_SECRET".to_string(),
        "hunter2-logging-secret".to_string(),
    )]);

    let replaced = substitute(br#"{"token": "${{LOGGING_SECRET}}"}"#, &vars).unwrap();
    assert_eq!(replaced, br#"{"token": "hunter2-logging-secret"}"#);

    let resolved = capture
        .events()
        .into_iter()
        .find(|e| e.field("name") == Some("LOGGING_SECRET"))
        .expect("variable resolved event");
    assert_eq!(
        resolved.field("value"),
        Some("***REDACTED***")
    );

    let leaked = capture.count_events(|e| {
        e.fields
            .values()
            .any(|value| value.contains("hunter2-logging-secret"))
    });
    assert_eq!(leaked, 0);
}
