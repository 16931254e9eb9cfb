//! Document model: typed views over document bytes.
//!
//! The walker never parses documents itself. It sees [`Node`] values tagged
//! with a [`Kind`] and asks a [`DocumentModel`] provider to decompose objects
//! and arrays. [`JsonModel`] is the reference provider; other formats plug in
//! by implementing the trait.

pub mod json;
pub mod node;
pub mod provider;

pub use json::JsonModel;
pub use node::{Kind, Node, Nodes};
pub use provider::{DocumentModel, Fields};
