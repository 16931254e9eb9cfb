//! Parser for embedded `{{...}}` matcher expressions
//!
//! A string is an expression only when it opens with `{{` followed by one of
//! the known function names and `(`. Such a string must parse completely;
//! every other string is a literal and yields `None`.

use crate::errors::{GosertError, Result};
use chrono::{DateTime, Duration, FixedOffset};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, value},
    multi::separated_list1,
    number::complete::recognize_float,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

/// Function names recognized inside `{{...}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    BeEmpty,
    Not,
    BeTimestamp,
    BeNumerically,
}

impl Function {
    const ALL: [Function; 4] = [
        Function::BeEmpty,
        Function::Not,
        Function::BeTimestamp,
        Function::BeNumerically,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Function::BeEmpty => "BeEmpty",
            Function::Not => "Not",
            Function::BeTimestamp => "BeTimestamp",
            Function::BeNumerically => "BeNumerically",
        }
    }

    /// Accepted form, quoted in syntax errors
    pub fn usage(&self) -> &'static str {
        match self {
            Function::BeEmpty => "{{BeEmpty()}}",
            Function::Not => "{{Not(BeEmpty())}}",
            Function::BeTimestamp => "{{BeTimestamp(<RFC3339 timestamp>, <milliseconds>)}}",
            Function::BeNumerically => "{{BeNumerically(<==|~|>|>=|<|<=>, <number>[, <number>])}}",
        }
    }

    /// Function a string invokes, if it has the shape `{{Name(`
    pub fn recognize(input: &str) -> Option<Function> {
        let call = input.strip_prefix("{{")?;
        Function::ALL.into_iter().find(|function| {
            call.strip_prefix(function.name())
                .is_some_and(|rest| rest.starts_with('('))
        })
    }
}

/// Length assertion shared by strings, arrays and null
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emptiness {
    Empty,
    NotEmpty,
}

impl Emptiness {
    pub fn holds(&self, len: usize) -> bool {
        match self {
            Emptiness::Empty => len == 0,
            Emptiness::NotEmpty => len > 0,
        }
    }
}

/// Comparator token of `BeNumerically`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    Approx,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl ComparisonOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Equal => "==",
            ComparisonOp::Approx => "~",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterOrEqual => ">=",
            ComparisonOp::Less => "<",
            ComparisonOp::LessOrEqual => "<=",
        }
    }

    /// Number of operands after the comparator
    pub fn arity(&self) -> usize {
        match self {
            ComparisonOp::Approx => 2,
            _ => 1,
        }
    }
}

/// Parsed expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Emptiness(Emptiness),
    BeTimestamp {
        at: DateTime<FixedOffset>,
        delta: Duration,
    },
    /// Operand count already checked against `op.arity()`
    BeNumerically {
        op: ComparisonOp,
        operands: Vec<f64>,
    },
}

impl Expression {
    pub fn function(&self) -> Function {
        match self {
            Expression::Emptiness(Emptiness::Empty) => Function::BeEmpty,
            Expression::Emptiness(Emptiness::NotEmpty) => Function::Not,
            Expression::BeTimestamp { .. } => Function::BeTimestamp,
            Expression::BeNumerically { .. } => Function::BeNumerically,
        }
    }
}

/// Token-level parse result, before literal conversion
#[derive(Debug, Clone, PartialEq)]
enum Call<'a> {
    Emptiness(Emptiness),
    BeTimestamp { at: &'a str, delta: &'a str },
    BeNumerically { op: ComparisonOp, operands: Vec<&'a str> },
}

/// Parse a string as an expression
///
/// Returns `Ok(None)` for literals.
///
/// # Errors
///
/// `InvalidExpression` if a recognized call does not parse or has the wrong
/// operand count, `InvalidTimestamp` if the timestamp literal is not RFC 3339.
pub fn parse_expression(input: &str) -> Result<Option<Expression>> {
    let Some(function) = Function::recognize(input) else {
        return Ok(None);
    };

    let (_, call) = all_consuming(expression)(input).map_err(|_| GosertError::InvalidExpression {
        input: input.to_string(),
        reason: format!("expected {}", function.usage()),
    })?;

    let parsed = match call {
        Call::Emptiness(emptiness) => Expression::Emptiness(emptiness),
        Call::BeTimestamp { at, delta } => Expression::BeTimestamp {
            at: parse_timestamp(at)?,
            delta: parse_delta(input, delta)?,
        },
        Call::BeNumerically { op, operands } => {
            if operands.len() != op.arity() {
                return Err(GosertError::InvalidExpression {
                    input: input.to_string(),
                    reason: format!(
                        "comparator '{}' takes {} argument(s), got {}",
                        op.symbol(),
                        op.arity(),
                        operands.len()
                    ),
                });
            }
            let operands = operands
                .into_iter()
                .map(|text| {
                    text.parse::<f64>().map_err(|_| GosertError::InvalidNumber {
                        input: text.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Expression::BeNumerically { op, operands }
        }
    };
    Ok(Some(parsed))
}

/// Parse an RFC 3339 timestamp, fractional seconds optional
///
/// # Errors
///
/// `InvalidTimestamp` describing why chrono rejected the text.
pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).map_err(|e| GosertError::InvalidTimestamp {
        input: text.to_string(),
        reason: e.to_string(),
    })
}

fn parse_delta(input: &str, digits: &str) -> Result<Duration> {
    digits
        .parse::<i64>()
        .map(Duration::milliseconds)
        .map_err(|_| GosertError::InvalidExpression {
            input: input.to_string(),
            reason: format!("delta '{}' is out of range", digits),
        })
}

// ========== nom parsers ==========

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn expression(input: &str) -> IResult<&str, Call<'_>> {
    delimited(
        tag("{{"),
        alt((be_empty, not_be_empty, be_timestamp, be_numerically)),
        tag("}}"),
    )(input)
}

fn empty_call(input: &str) -> IResult<&str, ()> {
    value((), tuple((tag("BeEmpty"), char('('), multispace0, char(')'))))(input)
}

fn be_empty(input: &str) -> IResult<&str, Call<'_>> {
    value(Call::Emptiness(Emptiness::Empty), empty_call)(input)
}

fn not_be_empty(input: &str) -> IResult<&str, Call<'_>> {
    value(
        Call::Emptiness(Emptiness::NotEmpty),
        tuple((tag("Not"), char('('), ws(empty_call), char(')'))),
    )(input)
}

fn timestamp_token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == ',' || c == ')' || c.is_ascii_whitespace())(input)
}

fn be_timestamp(input: &str) -> IResult<&str, Call<'_>> {
    map(
        preceded(
            tag("BeTimestamp("),
            terminated(
                tuple((ws(timestamp_token), preceded(char(','), ws(digit1)))),
                char(')'),
            ),
        ),
        |(at, delta)| Call::BeTimestamp { at, delta },
    )(input)
}

fn comparison_op(input: &str) -> IResult<&str, ComparisonOp> {
    alt((
        value(ComparisonOp::Equal, tag("==")),
        value(ComparisonOp::GreaterOrEqual, tag(">=")),
        value(ComparisonOp::LessOrEqual, tag("<=")),
        value(ComparisonOp::Greater, tag(">")),
        value(ComparisonOp::Less, tag("<")),
        value(ComparisonOp::Approx, tag("~")),
    ))(input)
}

fn be_numerically(input: &str) -> IResult<&str, Call<'_>> {
    map(
        preceded(
            tag("BeNumerically("),
            terminated(
                tuple((
                    ws(comparison_op),
                    preceded(char(','), separated_list1(char(','), ws(recognize_float))),
                )),
                char(')'),
            ),
        ),
        |(op, operands)| Call::BeNumerically { op, operands },
    )(input)
}
