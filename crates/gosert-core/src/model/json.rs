//! Reference JSON document model backed by `serde_json`.
//!
//! Decomposition goes through `RawValue`, so every node is a borrowed span
//! of the caller's buffer and nested values are never materialized.

use crate::errors::{GosertError, Result};
use crate::model::node::{Kind, Node};
use crate::model::provider::{DocumentModel, Fields};
use serde::de::IgnoredAny;
use serde_json::value::RawValue;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Stateless JSON provider
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModel;

fn invalid(err: serde_json::Error) -> GosertError {
    GosertError::InvalidDocument {
        reason: err.to_string(),
    }
}

/// Kind of a JSON value from its first significant byte.
fn classify(raw: &[u8]) -> Result<Kind> {
    let first = raw.iter().copied().find(|b| !b.is_ascii_whitespace());
    match first {
        Some(b'"') => Ok(Kind::String),
        Some(b'{') => Ok(Kind::Object),
        Some(b'[') => Ok(Kind::Array),
        Some(b't') | Some(b'f') => Ok(Kind::Boolean),
        Some(b'n') => Ok(Kind::Null),
        Some(b'-') | Some(b'0'..=b'9') => Ok(Kind::Number),
        _ => Err(GosertError::InvalidDocument {
            reason: format!(
                "cannot determine value type of '{}'",
                String::from_utf8_lossy(raw)
            ),
        }),
    }
}

fn node_of(raw: &RawValue) -> Result<Node<'_>> {
    let bytes = raw.get().as_bytes();
    Ok(Node::new(classify(bytes)?, bytes))
}

impl DocumentModel for JsonModel {
    fn root<'a>(&self, data: &'a [u8]) -> Result<Node<'a>> {
        let raw: &'a RawValue = serde_json::from_slice(data).map_err(invalid)?;
        node_of(raw)
    }

    fn validate_object(&self, data: &[u8]) -> Result<()> {
        serde_json::from_slice::<BTreeMap<String, IgnoredAny>>(data)
            .map(|_| ())
            .map_err(invalid)
    }

    fn fields<'a>(&self, data: &'a [u8]) -> Result<Fields<'a>> {
        let map: BTreeMap<String, &'a RawValue> =
            serde_json::from_slice(data).map_err(invalid)?;
        map.into_iter()
            .map(|(key, raw)| Ok((key, node_of(raw)?)))
            .collect()
    }

    fn elements<'a>(&self, data: &'a [u8]) -> Result<Vec<Node<'a>>> {
        let items: Vec<&'a RawValue> = serde_json::from_slice(data).map_err(invalid)?;
        items.into_iter().map(node_of).collect()
    }

    fn without_field(&self, data: &[u8], key: &str) -> Result<Vec<u8>> {
        let mut map: BTreeMap<String, &RawValue> =
            serde_json::from_slice(data).map_err(invalid)?;
        map.remove(key);
        serde_json::to_vec(&map).map_err(invalid)
    }

    fn string_value<'a>(&self, node: Node<'a>) -> Result<Cow<'a, str>> {
        if node.kind != Kind::String {
            return Err(GosertError::TypeMismatch {
                expected: Kind::String,
                actual: node.kind,
            });
        }
        // Borrow when the literal has no escapes, decode otherwise.
        match serde_json::from_slice::<&'a str>(node.raw) {
            Ok(text) => Ok(Cow::Borrowed(text)),
            Err(_) => serde_json::from_slice::<String>(node.raw)
                .map(Cow::Owned)
                .map_err(invalid),
        }
    }
}
