use crate::model::{Kind, Node};
use std::collections::HashMap;

/// Unordered equality of two primitive sequences.
///
/// Elements are equal when kind and raw bytes are equal, and every element
/// must pair with exactly one on the other side, so `[1, 1, 2]` equals
/// `[1, 2, 1]` but not `[1, 2, 2]`.
pub fn same_multiset(expected: &[Node<'_>], actual: &[Node<'_>]) -> bool {
    if expected.len() != actual.len() {
        return false;
    }
    let mut counts: HashMap<(Kind, &[u8]), i64> = HashMap::new();
    for node in expected {
        *counts.entry((node.kind, node.raw)).or_default() += 1;
    }
    for node in actual {
        *counts.entry((node.kind, node.raw)).or_default() -= 1;
    }
    counts.values().all(|count| *count == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentModel, JsonModel};

    fn nodes(json: &str) -> Vec<Node<'_>> {
        JsonModel.elements(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_order_is_ignored() {
        assert!(same_multiset(&nodes("[1, 2, 2]"), &nodes("[2, 1, 2]")));
        assert!(same_multiset(&nodes(r#"["a", null, true]"#), &nodes(r#"[true, "a", null]"#)));
    }

    #[test]
    fn test_multiplicity_matters() {
        assert!(!same_multiset(&nodes("[1, 1, 2]"), &nodes("[1, 2, 2]")));
        assert!(!same_multiset(&nodes("[1]"), &nodes("[1, 1]")));
    }

    #[test]
    fn test_kind_is_part_of_identity() {
        assert!(!same_multiset(&nodes(r#"["1"]"#), &nodes("[1]")));
    }

    #[test]
    fn test_empty_arrays() {
        assert!(same_multiset(&nodes("[]"), &nodes("[]")));
        assert!(!same_multiset(&nodes("[]"), &nodes("[0]")));
    }
}
