//! Core types shared across gosert facilities
//!
//! This crate provides the small set of types used by both the error and
//! logging facilities of the matching engine:
//!
//! - **Correlation**: `MatchId` tags every event emitted by one top-level match call
//! - **Sensitive data**: `Sensitive<T>` keeps substituted variable values out of logs
//! - **Schema constants**: canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::MatchId;
pub use sensitive::Sensitive;
