//! Reserved `_gst_index` / `_gst_id` metadata on expected array elements

use crate::errors::{GosertError, Result};
use crate::model::{DocumentModel, Kind, Node};
use std::collections::HashSet;

/// Correlate by position in the actual array
pub const INDEX_KEY: &str = "_gst_index";
/// Correlate by a `key=value` identity field
pub const ID_KEY: &str = "_gst_id";

/// How one expected element finds its actual counterpart
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReconciliationKey {
    ByIndex(usize),
    ByIdentity { key: String, value: String },
}

impl ReconciliationKey {
    /// Reserved field this key was read from
    pub fn field(&self) -> &'static str {
        match self {
            ReconciliationKey::ByIndex(_) => INDEX_KEY,
            ReconciliationKey::ByIdentity { .. } => ID_KEY,
        }
    }

    /// Suffix appended to the array path for the correlated pair
    pub fn path_segment(&self) -> String {
        match self {
            ReconciliationKey::ByIndex(index) => format!("[{}]", index),
            ReconciliationKey::ByIdentity { key, value } => format!(".{}={}", key, value),
        }
    }

    fn same_strategy(&self, other: &ReconciliationKey) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Expected element with its reconciliation field removed.
///
/// The stripped bytes are owned here and borrowed by the recursive walk.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedElement {
    pub key: ReconciliationKey,
    pub stripped: Vec<u8>,
}

impl KeyedElement {
    pub fn node(&self) -> Node<'_> {
        Node::new(Kind::Object, &self.stripped)
    }
}

/// Read the reconciliation key of the object at `position`
///
/// # Errors
///
/// Schema violations for missing, conflicting or malformed metadata.
pub fn read_key(model: &dyn DocumentModel, element: Node<'_>, position: usize) -> Result<ReconciliationKey> {
    let fields = model.fields(element.raw)?;
    match (fields.get(INDEX_KEY), fields.get(ID_KEY)) {
        (Some(_), Some(_)) => Err(GosertError::ConflictingReconciliationKeys { position }),
        (None, None) => Err(GosertError::MissingReconciliationKey { position }),
        (Some(index), None) => parse_index(*index).map(ReconciliationKey::ByIndex),
        (None, Some(identity)) => parse_identity(model, *identity),
    }
}

fn parse_index(node: Node<'_>) -> Result<usize> {
    let invalid = || GosertError::InvalidIndexKey {
        found: node.to_string(),
    };
    if node.kind != Kind::Number {
        return Err(invalid());
    }
    node.raw_text().trim().parse::<usize>().map_err(|_| invalid())
}

fn parse_identity(model: &dyn DocumentModel, node: Node<'_>) -> Result<ReconciliationKey> {
    let invalid = || GosertError::InvalidIdentityKey {
        found: node.to_string(),
    };
    if node.kind != Kind::String {
        return Err(invalid());
    }
    let text = model.string_value(node)?;
    let mut parts = text.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !key.is_empty() => Ok(ReconciliationKey::ByIdentity {
            key: key.to_string(),
            value: value.to_string(),
        }),
        _ => Err(invalid()),
    }
}

/// Key and strip every expected element
///
/// All elements must use the same strategy, identity keys must share one
/// key part, and no index or identity may repeat. Index-keyed elements come
/// back in ascending index order; identity-keyed ones keep declaration order.
///
/// # Errors
///
/// The first schema violation found, scanning in declaration order.
pub fn key_elements(model: &dyn DocumentModel, expected: &[Node<'_>]) -> Result<Vec<KeyedElement>> {
    let mut keyed: Vec<KeyedElement> = Vec::with_capacity(expected.len());
    let mut seen: HashSet<ReconciliationKey> = HashSet::new();

    for (position, element) in expected.iter().enumerate() {
        let key = read_key(model, *element, position)?;

        if let Some(first) = keyed.first() {
            if !first.key.same_strategy(&key) {
                return Err(GosertError::MixedReconciliation);
            }
            if let (
                ReconciliationKey::ByIdentity { key: first_key, .. },
                ReconciliationKey::ByIdentity { key: other, .. },
            ) = (&first.key, &key)
            {
                if first_key != other {
                    return Err(GosertError::IdentityKeyMismatch {
                        first: first_key.clone(),
                        other: other.clone(),
                    });
                }
            }
        }

        if !seen.insert(key.clone()) {
            return Err(match key {
                ReconciliationKey::ByIndex(index) => GosertError::DuplicateIndex { index },
                ReconciliationKey::ByIdentity { key, value } => {
                    GosertError::DuplicateIdentity { key, value }
                }
            });
        }

        let stripped = model.without_field(element.raw, key.field())?;
        keyed.push(KeyedElement { key, stripped });
    }

    keyed.sort_by_key(|element| match element.key {
        ReconciliationKey::ByIndex(index) => index,
        ReconciliationKey::ByIdentity { .. } => 0,
    });
    Ok(keyed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JsonModel;

    fn elements(json: &str) -> Vec<Node<'_>> {
        JsonModel.elements(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_index_keys_sorted_and_stripped() {
        let json = r#"[{"_gst_index": 2, "v": "c"}, {"_gst_index": 0, "v": "a"}]"#;
        let keyed = key_elements(&JsonModel, &elements(json)).unwrap();

        let keys: Vec<_> = keyed.iter().map(|k| k.key.clone()).collect();
        assert_eq!(
            keys,
            vec![ReconciliationKey::ByIndex(0), ReconciliationKey::ByIndex(2)]
        );
        let fields = JsonModel.fields(&keyed[0].stripped).unwrap();
        assert!(!fields.contains_key(INDEX_KEY));
        assert_eq!(fields["v"].raw, b"\"a\"");
    }

    #[test]
    fn test_identity_keys_keep_declaration_order() {
        let json = r#"[{"_gst_id": "id=b"}, {"_gst_id": "id=a"}]"#;
        let keyed = key_elements(&JsonModel, &elements(json)).unwrap();

        assert_eq!(keyed[0].key.path_segment(), ".id=b");
        assert_eq!(keyed[1].key.path_segment(), ".id=a");
    }

    #[test]
    fn test_schema_violations() {
        let cases = [
            (r#"[{"v": 1}]"#, GosertError::MissingReconciliationKey { position: 0 }),
            (
                r#"[{"_gst_index": 0, "_gst_id": "id=1"}]"#,
                GosertError::ConflictingReconciliationKeys { position: 0 },
            ),
            (
                r#"[{"_gst_index": 0}, {"_gst_id": "id=1"}]"#,
                GosertError::MixedReconciliation,
            ),
            (
                r#"[{"_gst_id": "id=1"}, {"_gst_id": "code=2"}]"#,
                GosertError::IdentityKeyMismatch {
                    first: "id".to_string(),
                    other: "code".to_string(),
                },
            ),
            (
                r#"[{"_gst_index": 1}, {"_gst_index": 1}]"#,
                GosertError::DuplicateIndex { index: 1 },
            ),
            (
                r#"[{"_gst_id": "id=1"}, {"_gst_id": "id=1"}]"#,
                GosertError::DuplicateIdentity {
                    key: "id".to_string(),
                    value: "1".to_string(),
                },
            ),
        ];
        for (json, expected) in cases {
            assert_eq!(key_elements(&JsonModel, &elements(json)).unwrap_err(), expected, "{json}");
        }
    }

    #[test]
    fn test_malformed_metadata_values() {
        for json in [
            r#"[{"_gst_index": -1}]"#,
            r#"[{"_gst_index": 1.5}]"#,
            r#"[{"_gst_index": "1"}]"#,
        ] {
            let err = key_elements(&JsonModel, &elements(json)).unwrap_err();
            assert!(matches!(err, GosertError::InvalidIndexKey { .. }), "{json}");
        }
        for json in [
            r#"[{"_gst_id": "id"}]"#,
            r#"[{"_gst_id": "a=b=c"}]"#,
            r#"[{"_gst_id": "=x"}]"#,
            r#"[{"_gst_id": 3}]"#,
        ] {
            let err = key_elements(&JsonModel, &elements(json)).unwrap_err();
            assert!(matches!(err, GosertError::InvalidIdentityKey { .. }), "{json}");
        }
    }
}
