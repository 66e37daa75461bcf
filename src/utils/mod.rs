//! Shared utilities used across the crate.
//!
//! - [`graph`] - Block identifiers, adjacency traits and traversal orders
//! - [`dot`] - Escaping helpers for Graphviz DOT output

pub mod dot;
pub mod graph;

pub use dot::{escape_dot, escape_label};
