//! Adjacency traits implemented by graph types.
//!
//! Algorithms are written against these traits instead of a concrete graph:
//!
//! - [`GraphBase`] - Arena size
//! - [`Successors`] - Outgoing edges

use crate::utils::graph::NodeId;

/// Core graph properties.
pub trait GraphBase {
    /// Returns the size of the node arena.
    ///
    /// Every [`NodeId`] handed out by the graph has an index below this value,
    /// so it can be used to size per-node tables.
    fn node_count(&self) -> usize;
}

/// Forward edge traversal.
pub trait Successors: GraphBase {
    /// Returns the successors of `node` in edge order.
    ///
    /// Yields nothing for identifiers outside the arena.
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}
