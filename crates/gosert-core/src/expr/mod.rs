//! Expression compiler
//!
//! Turns the expected-side strings of a document into comparators:
//! literals become equality checks, `{{...}}` calls are parsed by
//! [`grammar`] and compiled by [`comparator`]. [`substitute`] handles the
//! `${{NAME}}` pass that runs before anything is parsed.

pub mod comparator;
pub mod grammar;
pub mod substitute;

pub use comparator::{
    compile_emptiness, compile_number, compile_string, Comparator, NumberComparator,
    StringComparator,
};
pub use grammar::{parse_expression, ComparisonOp, Emptiness, Expression, Function};
pub use substitute::{placeholder_names, substitute_variables};
