//! Compiled comparators for leaf values

use crate::errors::{GosertError, Result};
use crate::expr::grammar::{parse_expression, parse_timestamp, ComparisonOp, Emptiness, Expression};
use crate::model::Kind;
use chrono::{DateTime, Duration, FixedOffset};

/// A compiled assertion on one actual value
pub trait Comparator<T: ?Sized> {
    /// # Errors
    ///
    /// Only when the actual value cannot be interpreted by this comparator,
    /// e.g. a timestamp comparator given a non-timestamp string.
    fn matches(&self, actual: &T) -> Result<bool>;
}

/// Comparator for a String position
#[derive(Debug, Clone, PartialEq)]
pub enum StringComparator {
    /// Byte-for-byte equality with the decoded literal
    Equal(String),
    Length(Emptiness),
    /// `|actual - at| <= delta`, bounds inclusive
    Timestamp {
        at: DateTime<FixedOffset>,
        delta: Duration,
    },
}

impl Comparator<str> for StringComparator {
    fn matches(&self, actual: &str) -> Result<bool> {
        match self {
            StringComparator::Equal(expected) => Ok(expected == actual),
            StringComparator::Length(emptiness) => Ok(emptiness.holds(actual.len())),
            StringComparator::Timestamp { at, delta } => {
                let actual = parse_timestamp(actual)?;
                let diff = actual.signed_duration_since(*at);
                Ok(-*delta <= diff && diff <= *delta)
            }
        }
    }
}

/// Comparator for a Number position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberComparator {
    Equal(f64),
    /// `|actual - target| <= tolerance`, bounds inclusive
    Approx { target: f64, tolerance: f64 },
    Greater(f64),
    GreaterOrEqual(f64),
    Less(f64),
    LessOrEqual(f64),
}

impl NumberComparator {
    pub fn approx(target: f64, tolerance: f64) -> Self {
        NumberComparator::Approx { target, tolerance }
    }

    fn from_operands(op: ComparisonOp, operands: &[f64]) -> Self {
        let first = operands.first().copied().unwrap_or_default();
        match op {
            ComparisonOp::Equal => NumberComparator::Equal(first),
            ComparisonOp::Approx => {
                NumberComparator::approx(first, operands.get(1).copied().unwrap_or_default())
            }
            ComparisonOp::Greater => NumberComparator::Greater(first),
            ComparisonOp::GreaterOrEqual => NumberComparator::GreaterOrEqual(first),
            ComparisonOp::Less => NumberComparator::Less(first),
            ComparisonOp::LessOrEqual => NumberComparator::LessOrEqual(first),
        }
    }
}

impl Comparator<f64> for NumberComparator {
    fn matches(&self, actual: &f64) -> Result<bool> {
        let actual = *actual;
        Ok(match *self {
            NumberComparator::Equal(expected) => actual == expected,
            NumberComparator::Approx { target, tolerance } => within(actual, target, tolerance),
            NumberComparator::Greater(bound) => actual > bound,
            NumberComparator::GreaterOrEqual(bound) => actual >= bound,
            NumberComparator::Less(bound) => actual < bound,
            NumberComparator::LessOrEqual(bound) => actual <= bound,
        })
    }
}

/// Decimal bounds such as `10.05` against `10` are not exact in binary, so
/// the tolerance is widened by one unit of rounding at the operands' scale.
fn within(actual: f64, target: f64, tolerance: f64) -> bool {
    let scale = actual.abs().max(target.abs()).max(1.0);
    (actual - target).abs() <= tolerance + f64::EPSILON * scale
}

/// Compile the expected text of a String position
///
/// # Errors
///
/// Syntax errors from the expression grammar, and `ExpressionNotApplicable`
/// for `{{BeNumerically(...)}}`.
pub fn compile_string(expected: &str) -> Result<StringComparator> {
    match parse_expression(expected)? {
        None => Ok(StringComparator::Equal(expected.to_string())),
        Some(Expression::Emptiness(emptiness)) => Ok(StringComparator::Length(emptiness)),
        Some(Expression::BeTimestamp { at, delta }) => Ok(StringComparator::Timestamp { at, delta }),
        Some(expression @ Expression::BeNumerically { .. }) => {
            Err(GosertError::ExpressionNotApplicable {
                function: expression.function().name(),
                actual: Kind::String,
            })
        }
    }
}

/// Compile an expected string standing in for a Number position
///
/// # Errors
///
/// `NumberAssertionRequired` unless the text is `{{BeNumerically(...)}}`;
/// syntax errors from the expression grammar.
pub fn compile_number(expected: &str) -> Result<NumberComparator> {
    match parse_expression(expected)? {
        Some(Expression::BeNumerically { op, operands }) => {
            Ok(NumberComparator::from_operands(op, &operands))
        }
        _ => Err(GosertError::NumberAssertionRequired {
            input: expected.to_string(),
        }),
    }
}

/// Emptiness assertion carried by `expected`, if any
///
/// # Errors
///
/// Syntax errors from the expression grammar.
pub fn compile_emptiness(expected: &str) -> Result<Option<Emptiness>> {
    match parse_expression(expected)? {
        Some(Expression::Emptiness(emptiness)) => Ok(Some(emptiness)),
        _ => Ok(None),
    }
}
