use std::borrow::Cow;
use std::fmt;

/// Coarse value kind of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// The field or element does not exist
    Absent,
    String,
    Number,
    Boolean,
    Null,
    Object,
    Array,
}

impl Kind {
    /// Stable display name used in diagnostics and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Absent => "NotExist",
            Kind::String => "String",
            Kind::Number => "Number",
            Kind::Boolean => "Boolean",
            Kind::Null => "Null",
            Kind::Object => "Object",
            Kind::Array => "Array",
        }
    }

    /// Scalars compared by value in unordered array reconciliation
    pub fn is_primitive(&self) -> bool {
        matches!(self, Kind::String | Kind::Number | Kind::Boolean | Kind::Null)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed view over a span of document bytes.
///
/// Nodes borrow the buffer they were decomposed from and are `Copy`; the
/// buffer must outlive the match call. For JSON, `raw` is the exact value
/// text, so string nodes keep their quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node<'a> {
    pub kind: Kind,
    pub raw: &'a [u8],
}

impl<'a> Node<'a> {
    pub fn new(kind: Kind, raw: &'a [u8]) -> Self {
        Self { kind, raw }
    }

    /// Placeholder for a missing field
    pub fn absent() -> Node<'static> {
        Node {
            kind: Kind::Absent,
            raw: &[],
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.kind.is_primitive()
    }

    /// Raw span as text, lossy for invalid UTF-8
    pub fn raw_text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.raw)
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type = {}, value = {}", self.kind, self.raw_text())
    }
}

/// Diagnostic rendering of a node sequence: `[n1|n2|...]`
pub struct Nodes<'s, 'a>(pub &'s [Node<'a>]);

impl fmt::Display for Nodes<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", node)?;
        }
        f.write_str("]")
    }
}
