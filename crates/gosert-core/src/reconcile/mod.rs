//! Array reconciliation
//!
//! Decides which actual element each expected element is compared with:
//! - all-primitive expected arrays are compared as unordered multisets;
//! - object arrays are correlated through `_gst_index` or `_gst_id`, and
//!   only the correlated actual elements are inspected.

pub mod keys;
pub mod multiset;

pub use keys::{key_elements, KeyedElement, ReconciliationKey, ID_KEY, INDEX_KEY};
pub use multiset::same_multiset;

use crate::errors::GosertError;
use crate::model::{Kind, Node, Nodes};
use crate::walk::{walk, AtDiagnostic, Diagnostic, Verdict, WalkContext, WalkError, WalkResult};
use std::collections::HashMap;

/// Compare the elements of an expected array with those of an actual array
///
/// # Errors
///
/// Schema violations in the expected metadata or the actual identity
/// fields, and any error from recursing into a correlated pair.
pub fn reconcile(
    path: &str,
    expected: &[Node<'_>],
    actual: &[Node<'_>],
    ctx: &WalkContext<'_>,
) -> WalkResult {
    let diag = || {
        Diagnostic::new(
            path,
            Nodes(expected).to_string(),
            Nodes(actual).to_string(),
        )
    };
    tracing::debug!(
        path,
        expected_len = expected.len(),
        actual_len = actual.len(),
        "reconcile array"
    );

    if expected.iter().all(Node::is_primitive) {
        if let Some(node) = actual.iter().find(|node| !node.is_primitive()) {
            return Err(WalkError::new(
                diag(),
                GosertError::NonPrimitiveElement { kind: node.kind },
            ));
        }
        return Ok(if same_multiset(expected, actual) {
            Verdict::Matched
        } else {
            Verdict::Mismatch(diag())
        });
    }

    if !expected.iter().all(|node| node.kind == Kind::Object) {
        return Err(WalkError::new(diag(), GosertError::MixedArray));
    }

    let keyed = key_elements(ctx.model, expected).at(diag)?;
    match keyed.first().map(|element| &element.key) {
        Some(ReconciliationKey::ByIdentity { key, .. }) => {
            by_identity(path, key, &keyed, expected, actual, ctx)
        }
        _ => by_index(path, &keyed, actual, ctx),
    }
}

fn by_index(
    path: &str,
    keyed: &[KeyedElement],
    actual: &[Node<'_>],
    ctx: &WalkContext<'_>,
) -> WalkResult {
    for element in keyed {
        let ReconciliationKey::ByIndex(index) = element.key else {
            continue;
        };
        // Positions past the end of actual have nothing to compare.
        let Some(actual_element) = actual.get(index) else {
            continue;
        };
        let element_path = format!("{}{}", path, element.key.path_segment());

        let result = walk(&element_path, element.node(), *actual_element, ctx)?;
        if !result.is_match() {
            return Ok(result);
        }
    }
    Ok(Verdict::Matched)
}

fn by_identity(
    path: &str,
    key: &str,
    keyed: &[KeyedElement],
    expected: &[Node<'_>],
    actual: &[Node<'_>],
    ctx: &WalkContext<'_>,
) -> WalkResult {
    let diag = || {
        Diagnostic::new(
            path,
            Nodes(expected).to_string(),
            Nodes(actual).to_string(),
        )
    };

    // First occurrence wins when several actual elements share a value.
    let mut by_value: HashMap<String, Node<'_>> = HashMap::with_capacity(actual.len());
    for (position, element) in actual.iter().enumerate() {
        let missing = || GosertError::MissingIdentityField {
            key: key.to_string(),
            position,
        };
        if element.kind != Kind::Object {
            return Err(WalkError::new(diag(), missing()));
        }
        let fields = ctx.model.fields(element.raw).at(diag)?;
        let Some(field) = fields.get(key) else {
            return Err(WalkError::new(diag(), missing()));
        };
        let value = ctx.model.key_text(*field).at(diag)?.into_owned();
        by_value.entry(value).or_insert(*element);
    }

    for element in keyed {
        let ReconciliationKey::ByIdentity { value, .. } = &element.key else {
            continue;
        };
        let element_path = format!("{}{}", path, element.key.path_segment());
        let Some(actual_element) = by_value.get(value) else {
            return Ok(Verdict::Mismatch(Diagnostic::new(
                element_path,
                Nodes(expected).to_string(),
                Nodes(actual).to_string(),
            )));
        };

        let result = walk(&element_path, element.node(), *actual_element, ctx)?;
        if !result.is_match() {
            return Ok(result);
        }
    }
    Ok(Verdict::Matched)
}
