//! Graph infrastructure shared by the control flow graph and its passes.
//!
//! The block graph is an arena: nodes are addressed by a strongly-typed
//! [`NodeId`] index and adjacency is exposed through small traits so the
//! traversal in [`algorithms`] works on any implementor.
//!
//! # Key Components
//!
//! - [`NodeId`] - Strongly-typed node identifier
//! - [`GraphBase`], [`Successors`] - Adjacency traits
//! - [`algorithms`] - Depth-first pre-order

pub mod algorithms;
mod node;
mod traits;

pub use node::NodeId;
pub use traits::{GraphBase, Successors};
