//! gosert core - structural matching of JSON-like documents
//!
//! An expected document is compared against an actual document. The
//! expected side may embed matcher expressions in place of literal values:
//! - `{{BeEmpty()}}` / `{{Not(BeEmpty())}}` for strings, arrays and absent fields
//! - `{{BeTimestamp(<RFC3339>, <ms>)}}` for timestamp tolerance
//! - `{{BeNumerically(<cmp>, <n>[, <n>])}}` for numeric comparison
//!
//! Arrays of objects are correlated through `_gst_index` or `_gst_id`
//! metadata, arrays of primitives compare as unordered multisets, and
//! `${{NAME}}` placeholders are substituted before anything is parsed.
//!
//! ```
//! use gosert_core::Matcher;
//! use std::collections::HashMap;
//!
//! let mut matcher = Matcher::json(br#"{"id": "{{Not(BeEmpty())}}"}"#, &HashMap::new()).unwrap();
//! assert!(matcher.matches(br#"{"id": "a1", "extra": true}"#).unwrap());
//! ```

pub mod config;
pub mod errors;
pub mod expr;
pub mod logging_facility;
pub mod matcher;
pub mod model;
pub mod reconcile;
pub mod walk;

pub use gosert_core_types::schema;

// Re-export commonly used types
pub use config::{MatchConfig, DEFAULT_NUMERIC_TOLERANCE};
pub use errors::{ExError, ExErrorKind, GosertError, Result};
pub use matcher::{read_substituted, substitute, Matcher};
pub use model::{DocumentModel, JsonModel, Kind, Node};
pub use walk::{Diagnostic, MatchOutcome, Verdict, WalkError};
