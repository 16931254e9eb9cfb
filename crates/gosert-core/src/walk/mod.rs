//! Recursive tree walker
//!
//! Dispatches on the kind of the actual node. The expected side decides
//! how the comparison is made: literal values, embedded expressions, or
//! reconciliation metadata on arrays. The first mismatch or error stops the
//! walk; object fields are visited in key order so the reported position
//! is stable.

pub mod diagnostic;

pub use diagnostic::{AtDiagnostic, Diagnostic, MatchOutcome, Verdict, WalkError, WalkResult};

use crate::config::MatchConfig;
use crate::errors::GosertError;
use crate::expr::{compile_emptiness, compile_number, compile_string, Comparator, Emptiness, NumberComparator};
use crate::model::{DocumentModel, Kind, Node};
use crate::reconcile::reconcile;

/// Borrowed state shared by every frame of one walk
#[derive(Clone, Copy)]
pub struct WalkContext<'c> {
    pub model: &'c dyn DocumentModel,
    pub config: &'c MatchConfig,
}

impl<'c> WalkContext<'c> {
    pub fn new(model: &'c dyn DocumentModel, config: &'c MatchConfig) -> Self {
        Self { model, config }
    }
}

/// Match two whole documents, both read as objects
///
/// # Errors
///
/// The first error met during the walk, with the position it arose at.
pub fn walk_documents(
    expected: &[u8],
    actual: &[u8],
    model: &dyn DocumentModel,
    config: &MatchConfig,
) -> WalkResult {
    let ctx = WalkContext::new(model, config);
    let diag = || {
        Diagnostic::new(
            "",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(actual),
        )
    };
    let expected_root = object_root(model, expected).at(diag)?;
    let actual_root = object_root(model, actual).at(diag)?;
    walk("", expected_root, actual_root, &ctx)
}

fn object_root<'a>(model: &dyn DocumentModel, data: &'a [u8]) -> crate::errors::Result<Node<'a>> {
    let root = model.root(data)?;
    if root.kind != Kind::Object {
        return Err(GosertError::InvalidDocument {
            reason: format!("document root must be an Object, was {}", root.kind),
        });
    }
    Ok(root)
}

/// Compare `expected` with `actual` at `path`
///
/// # Errors
///
/// Type mismatches, syntax errors and schema violations abort the walk.
/// A failed comparison is `Ok(Verdict::Mismatch)`.
pub fn walk(path: &str, expected: Node<'_>, actual: Node<'_>, ctx: &WalkContext<'_>) -> WalkResult {
    tracing::trace!(
        path,
        expected_kind = %expected.kind,
        actual_kind = %actual.kind,
        "visit"
    );

    match actual.kind {
        Kind::String => walk_string(path, expected, actual, ctx),
        Kind::Number => walk_number(path, expected, actual, ctx),
        Kind::Boolean => walk_boolean(path, expected, actual, ctx),
        Kind::Array => walk_array(path, expected, actual, ctx),
        Kind::Object => walk_object(path, expected, actual, ctx),
        Kind::Null => walk_null(path, expected, actual, ctx),
        Kind::Absent => Err(type_mismatch(path, expected, actual)),
    }
}

fn values(path: &str, expected: Node<'_>, actual: Node<'_>) -> Diagnostic {
    Diagnostic::new(path, expected.raw_text(), actual.raw_text())
}

fn kinds(path: &str, expected: Node<'_>, actual: Node<'_>) -> Diagnostic {
    Diagnostic::new(path, expected.kind.name(), actual.kind.name())
}

fn type_mismatch(path: &str, expected: Node<'_>, actual: Node<'_>) -> WalkError {
    WalkError::new(
        kinds(path, expected, actual),
        GosertError::TypeMismatch {
            expected: expected.kind,
            actual: actual.kind,
        },
    )
}

fn verdict<F>(matched: bool, diagnostic: F) -> WalkResult
where
    F: FnOnce() -> Diagnostic,
{
    if matched {
        Ok(Verdict::Matched)
    } else {
        Ok(Verdict::Mismatch(diagnostic()))
    }
}

fn walk_string(path: &str, expected: Node<'_>, actual: Node<'_>, ctx: &WalkContext<'_>) -> WalkResult {
    if expected.kind != Kind::String {
        return Err(type_mismatch(path, expected, actual));
    }
    let diag = || values(path, expected, actual);

    let expected_text = ctx.model.string_value(expected).at(diag)?;
    let comparator = compile_string(&expected_text).at(diag)?;
    let actual_text = ctx.model.string_value(actual).at(diag)?;
    let matched = comparator.matches(&*actual_text).at(diag)?;
    verdict(matched, diag)
}

fn walk_number(path: &str, expected: Node<'_>, actual: Node<'_>, ctx: &WalkContext<'_>) -> WalkResult {
    let diag = || values(path, expected, actual);
    let actual_value = ctx.model.number_value(actual).at(diag)?;

    let comparator = match expected.kind {
        Kind::String => {
            let text = ctx.model.string_value(expected).at(diag)?;
            compile_number(&text).at(diag)?
        }
        Kind::Number => {
            let expected_value = ctx.model.number_value(expected).at(diag)?;
            NumberComparator::approx(expected_value, ctx.config.numeric_tolerance)
        }
        other => {
            return Err(WalkError::new(
                kinds(path, expected, actual),
                GosertError::NumberAssertionType { expected: other },
            ))
        }
    };
    let matched = comparator.matches(&actual_value).at(diag)?;
    verdict(matched, diag)
}

fn walk_boolean(path: &str, expected: Node<'_>, actual: Node<'_>, ctx: &WalkContext<'_>) -> WalkResult {
    if expected.kind != Kind::Boolean {
        return Err(type_mismatch(path, expected, actual));
    }
    let diag = || values(path, expected, actual);

    let expected_value = ctx.model.boolean_value(expected).at(diag)?;
    let actual_value = ctx.model.boolean_value(actual).at(diag)?;
    verdict(expected_value == actual_value, diag)
}

fn walk_array(path: &str, expected: Node<'_>, actual: Node<'_>, ctx: &WalkContext<'_>) -> WalkResult {
    let diag = || values(path, expected, actual);
    let actual_elements = ctx.model.elements(actual.raw).at(diag)?;

    match expected.kind {
        Kind::Array => {
            let expected_elements = ctx.model.elements(expected.raw).at(diag)?;
            reconcile(path, &expected_elements, &actual_elements, ctx)
        }
        Kind::String => {
            let text = ctx.model.string_value(expected).at(diag)?;
            match compile_emptiness(&text).at(diag)? {
                Some(emptiness) => verdict(emptiness.holds(actual_elements.len()), diag),
                None => Err(WalkError::new(
                    diag(),
                    GosertError::ArrayAssertionNotAllowed {
                        input: text.into_owned(),
                    },
                )),
            }
        }
        other => Err(WalkError::new(
            kinds(path, expected, actual),
            GosertError::ArrayAssertionType { expected: other },
        )),
    }
}

fn walk_object(path: &str, expected: Node<'_>, actual: Node<'_>, ctx: &WalkContext<'_>) -> WalkResult {
    let diag = || values(path, expected, actual);
    ctx.model.validate_object(actual.raw).at(diag)?;
    ctx.model.validate_object(expected.raw).at(diag)?;

    let expected_fields = ctx.model.fields(expected.raw).at(diag)?;
    let actual_fields = ctx.model.fields(actual.raw).at(diag)?;

    for (name, expected_field) in &expected_fields {
        let field_path = format!("{}.{}", path, name);
        match actual_fields.get(name) {
            Some(actual_field) => {
                let result = walk(&field_path, *expected_field, *actual_field, ctx)?;
                if !result.is_match() {
                    return Ok(result);
                }
            }
            None => {
                let tolerated = is_be_empty(*expected_field, ctx)
                    .at(|| values(&field_path, *expected_field, Node::absent()))?;
                if !tolerated {
                    return Ok(Verdict::Mismatch(Diagnostic::new(
                        field_path,
                        expected_field.raw_text(),
                        Kind::Absent.name(),
                    )));
                }
            }
        }
    }
    Ok(Verdict::Matched)
}

/// A missing field is tolerated only when expected is `{{BeEmpty()}}`
fn is_be_empty(expected: Node<'_>, ctx: &WalkContext<'_>) -> crate::errors::Result<bool> {
    if expected.kind != Kind::String {
        return Ok(false);
    }
    let text = ctx.model.string_value(expected)?;
    Ok(compile_emptiness(&text)? == Some(Emptiness::Empty))
}

fn walk_null(path: &str, expected: Node<'_>, actual: Node<'_>, ctx: &WalkContext<'_>) -> WalkResult {
    match expected.kind {
        Kind::Null => Ok(Verdict::Matched),
        Kind::String => {
            let diag = || values(path, expected, actual);
            let text = ctx.model.string_value(expected).at(diag)?;
            match compile_emptiness(&text).at(diag)? {
                Some(emptiness) => verdict(emptiness.holds(0), diag),
                None => Err(type_mismatch(path, expected, actual)),
            }
        }
        _ => Err(type_mismatch(path, expected, actual)),
    }
}
