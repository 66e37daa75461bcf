//! Traversals over graphs implementing [`Successors`](crate::utils::graph::Successors).
//!
//! - [`dfs`] - Iterative depth-first pre-order

mod traversal;

pub use traversal::{dfs, DfsIterator};
