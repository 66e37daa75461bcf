//! Depth-first traversal orders.
//!
//! [`dfs`] is lazy and visits each node reachable from the start exactly once, so
//! it terminates on cyclic graphs.

use crate::utils::graph::{NodeId, Successors};

/// Depth-first pre-order iterator.
///
/// Successors are visited in edge order: for a condition block the true branch
/// is explored before the false branch.
pub struct DfsIterator<'g, G: Successors> {
    graph: &'g G,
    stack: Vec<NodeId>,
    visited: Vec<bool>,
}

impl<'g, G: Successors> DfsIterator<'g, G> {
    fn new(graph: &'g G, start: NodeId) -> Self {
        let node_count = graph.node_count();
        if start.index() >= node_count {
            return DfsIterator {
                graph,
                stack: Vec::new(),
                visited: Vec::new(),
            };
        }

        DfsIterator {
            graph,
            stack: vec![start],
            visited: vec![false; node_count],
        }
    }
}

impl<G: Successors> Iterator for DfsIterator<'_, G> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.pop()?;
            if self.visited[node.index()] {
                continue;
            }
            self.visited[node.index()] = true;

            // Reverse push keeps the first successor on top of the stack
            let successors: Vec<NodeId> = self.graph.successors(node).collect();
            for &succ in successors.iter().rev() {
                if succ.index() < self.visited.len() && !self.visited[succ.index()] {
                    self.stack.push(succ);
                }
            }

            return Some(node);
        }
    }
}

/// Returns a depth-first pre-order iterator starting from `start`.
///
/// Nodes not reachable from `start` are not visited. An out-of-range start
/// yields an empty iteration.
///
/// # Arguments
///
/// * `graph` - The graph to traverse
/// * `start` - The starting node
pub fn dfs<G: Successors>(graph: &G, start: NodeId) -> DfsIterator<'_, G> {
    DfsIterator::new(graph, start)
}
