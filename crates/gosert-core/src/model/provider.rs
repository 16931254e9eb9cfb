use crate::errors::{GosertError, Result};
use crate::model::node::{Kind, Node};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Field lookup for one object. Key order carries no meaning; the
/// `BTreeMap` only makes iteration deterministic.
pub type Fields<'a> = BTreeMap<String, Node<'a>>;

/// Capability set a document format must provide to be matched.
///
/// Implementations are stateless and may be shared across threads; every
/// match call owns its own node views.
pub trait DocumentModel: Send + Sync {
    /// Classify a whole buffer as a node
    ///
    /// # Errors
    ///
    /// `InvalidDocument` if the buffer is not a single well-formed value.
    fn root<'a>(&self, data: &'a [u8]) -> Result<Node<'a>>;

    /// Succeeds only for well-formed object syntax
    ///
    /// # Errors
    ///
    /// `InvalidDocument` describing the first syntax problem.
    fn validate_object(&self, data: &[u8]) -> Result<()>;

    /// Decompose an object into its fields
    ///
    /// # Errors
    ///
    /// `InvalidDocument` if `data` is not an object.
    fn fields<'a>(&self, data: &'a [u8]) -> Result<Fields<'a>>;

    /// Decompose an array into its elements, in document order
    ///
    /// # Errors
    ///
    /// `InvalidDocument` if `data` is not an array.
    fn elements<'a>(&self, data: &'a [u8]) -> Result<Vec<Node<'a>>>;

    /// Copy of an object with one top-level field removed
    ///
    /// # Errors
    ///
    /// `InvalidDocument` if `data` is not an object.
    fn without_field(&self, data: &[u8], key: &str) -> Result<Vec<u8>>;

    /// Decoded content of a String node
    ///
    /// # Errors
    ///
    /// `TypeMismatch` for non-string nodes, `InvalidDocument` for bad escapes.
    fn string_value<'a>(&self, node: Node<'a>) -> Result<Cow<'a, str>>;

    /// Numeric value of a Number node
    ///
    /// # Errors
    ///
    /// `InvalidNumber` if the span does not parse as a float.
    fn number_value(&self, node: Node<'_>) -> Result<f64> {
        let text = node.raw_text();
        text.trim()
            .parse::<f64>()
            .map_err(|_| GosertError::InvalidNumber {
                input: text.into_owned(),
            })
    }

    /// Value of a Boolean node
    ///
    /// # Errors
    ///
    /// `InvalidBoolean` unless the span reads `true` or `false`.
    fn boolean_value(&self, node: Node<'_>) -> Result<bool> {
        let text = node.raw_text();
        match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(GosertError::InvalidBoolean {
                input: text.into_owned(),
            }),
        }
    }

    /// Text used when a node's value stands in as a correlation key:
    /// decoded content for strings, the raw span otherwise.
    ///
    /// # Errors
    ///
    /// Propagates `string_value` errors.
    fn key_text<'a>(&self, node: Node<'a>) -> Result<Cow<'a, str>> {
        match node.kind {
            Kind::String => self.string_value(node),
            _ => Ok(node.raw_text()),
        }
    }
}
