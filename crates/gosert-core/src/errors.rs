use crate::model::Kind;
use crate::walk::WalkError;
use thiserror::Error;

/// Result type alias using GosertError
pub type Result<T> = std::result::Result<T, GosertError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error raised while compiling expressions, reconciling arrays or
/// walking documents falls into one of these kinds. Each kind maps to a
/// stable code that callers and tests can match on without parsing messages.
///
/// A legitimate mismatch is never an error; it is reported through
/// [`crate::walk::Verdict::Mismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Expected and actual kinds cannot be compared at this position
    TypeMismatch,
    /// Malformed expression, document, timestamp or number literal
    Syntax,
    /// Array reconciliation metadata missing, mixed or inconsistent
    SchemaViolation,
    /// A `${{NAME}}` placeholder has no value
    UndefinedVariable,
    /// Assertion shape is not supported at this position
    InvalidInput,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::Syntax => "ERR_SYNTAX",
            ExErrorKind::SchemaViolation => "ERR_SCHEMA_VIOLATION",
            ExErrorKind::UndefinedVariable => "ERR_UNDEFINED_VARIABLE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the operation and document path where
/// the error surfaced. This is the error type of the public `Matcher`
/// surface and of the logging macros.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add document path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for matching operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GosertError {
    // ===== Type Errors =====
    /// Expected value kind cannot be compared with the actual kind
    #[error("path has type {actual} but assertion uses {expected}")]
    TypeMismatch { expected: Kind, actual: Kind },

    /// Numeric paths accept only numbers or `{{BeNumerically(...)}}`
    #[error("path has type Number but assertion uses {expected}. Allowed types are String or Number")]
    NumberAssertionType { expected: Kind },

    /// A well-formed expression used on a value it cannot describe
    #[error("{function} cannot be applied to a value of type {actual}")]
    ExpressionNotApplicable {
        function: &'static str,
        actual: Kind,
    },

    /// A string assertion on a Number path that is not `{{BeNumerically(...)}}`
    #[error("path has type Number but assertion ('{input}') does not have the correct format. Must be {{{{BeNumerically(...)}}}}")]
    NumberAssertionRequired { input: String },

    /// Only the emptiness expressions may stand in for a whole array
    #[error("array type assertion can only use functions [{{{{BeEmpty()}}}} {{{{Not(BeEmpty())}}}}], got '{input}'")]
    ArrayAssertionNotAllowed { input: String },

    /// Arrays accept only arrays or emptiness expressions
    #[error("unsupported expected value type '{expected}' for Array type")]
    ArrayAssertionType { expected: Kind },

    // ===== Syntax Errors =====
    /// Expression string names a known function but does not parse
    #[error("invalid expression '{input}': {reason}")]
    InvalidExpression { input: String, reason: String },

    /// Timestamp text is not RFC 3339
    #[error("invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },

    #[error("invalid number '{input}'")]
    InvalidNumber { input: String },

    #[error("expected bool but got {input}")]
    InvalidBoolean { input: String },

    /// Document bytes are not well-formed for the requested shape
    #[error("invalid document: {reason}")]
    InvalidDocument { reason: String },

    // ===== Reconciliation Schema Errors =====
    /// Expected array is all primitives but actual carries a container
    #[error("array should contain base type only but got {kind} type")]
    NonPrimitiveElement { kind: Kind },

    #[error("array type assertion must all be base data type or all object type, not a mixture of both")]
    MixedArray,

    #[error("element {position} must have field '_gst_index' or '_gst_id'")]
    MissingReconciliationKey { position: usize },

    #[error("element {position} cannot have both '_gst_index' and '_gst_id'")]
    ConflictingReconciliationKeys { position: usize },

    #[error("cannot have some elements with '_gst_index' and some with '_gst_id'")]
    MixedReconciliation,

    #[error("'_gst_index' field must be a non-negative integer Number, was {found}")]
    InvalidIndexKey { found: String },

    #[error("'_gst_id' field must be a String of format 'key=value', was {found}")]
    InvalidIdentityKey { found: String },

    #[error("all elements in the same array must have the same '_gst_id' key part, found '{first}' and '{other}'")]
    IdentityKeyMismatch { first: String, other: String },

    #[error("'_gst_index' {index} is used by more than one element")]
    DuplicateIndex { index: usize },

    #[error("'_gst_id' {key}={value} is used by more than one element")]
    DuplicateIdentity { key: String, value: String },

    /// Identity correlation needs the key field on every actual element
    #[error("object array assertion must have a key '{key}' for each actual element, missing at position {position}")]
    MissingIdentityField { key: String, position: usize },

    // ===== Substitution Errors =====
    #[error("variable '{name}' undefined")]
    UndefinedVariable { name: String },

    // ===== Configuration / IO =====
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to read '{path}': {reason}")]
    Io { path: String, reason: String },
}

impl GosertError {
    /// Classify this error in the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            GosertError::TypeMismatch { .. }
            | GosertError::NumberAssertionType { .. }
            | GosertError::ExpressionNotApplicable { .. }
            | GosertError::NumberAssertionRequired { .. }
            | GosertError::ArrayAssertionType { .. } => ExErrorKind::TypeMismatch,

            GosertError::InvalidExpression { .. }
            | GosertError::InvalidTimestamp { .. }
            | GosertError::InvalidNumber { .. }
            | GosertError::InvalidBoolean { .. }
            | GosertError::InvalidDocument { .. } => ExErrorKind::Syntax,

            GosertError::NonPrimitiveElement { .. }
            | GosertError::MixedArray
            | GosertError::MissingReconciliationKey { .. }
            | GosertError::ConflictingReconciliationKeys { .. }
            | GosertError::MixedReconciliation
            | GosertError::InvalidIndexKey { .. }
            | GosertError::InvalidIdentityKey { .. }
            | GosertError::IdentityKeyMismatch { .. }
            | GosertError::DuplicateIndex { .. }
            | GosertError::DuplicateIdentity { .. }
            | GosertError::MissingIdentityField { .. } => ExErrorKind::SchemaViolation,

            GosertError::UndefinedVariable { .. } => ExErrorKind::UndefinedVariable,

            GosertError::ArrayAssertionNotAllowed { .. } | GosertError::InvalidConfig { .. } => {
                ExErrorKind::InvalidInput
            }

            GosertError::Io { .. } => ExErrorKind::Io,
        }
    }
}

impl From<GosertError> for ExError {
    fn from(err: GosertError) -> Self {
        ExError::new(err.kind()).with_message(err.to_string())
    }
}

impl From<WalkError> for ExError {
    fn from(err: WalkError) -> Self {
        ExError::new(err.source.kind())
            .with_path(err.diagnostic.path.clone())
            .with_message(err.source.to_string())
    }
}
