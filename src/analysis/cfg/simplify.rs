//! Merge and empty-block elimination.
//!
//! Simplification walks the graph depth-first from the entry. At every block it
//! first absorbs straight-line successors, then bypasses empty successors, then
//! descends into the successors it has not visited yet. A visited set guards the
//! walk against the back edges of loops.
//!
//! Blocks that no path from the entry reaches (code after `return`, the unused
//! return sink) are detached before the walk so they cannot inflate predecessor
//! counts. The walk is repeated until it no longer changes the graph, which makes
//! [`ControlFlowGraph::simplify`] idempotent.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::{
    analysis::cfg::{BlockFlags, BlockId, BlockKind, ControlFlowGraph},
    Result,
};

impl ControlFlowGraph {
    /// Simplifies the graph in place.
    ///
    /// - A Base block with exactly one successor and at most one predecessor absorbs
    ///   that successor when it is a Base block entered only from here.
    /// - An empty Base block with a single successor is removed and all of its
    ///   predecessors point directly at that successor. Condition slots keep their
    ///   position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Invariant`] if a rewrite would break the edge
    /// structure, and [`crate::Error::BlockNotFound`] for dangling ids.
    pub fn simplify(&mut self) -> Result<()> {
        let pruned = self.prune_unreachable()?;

        let mut passes = 0;
        loop {
            passes += 1;
            let changes = self.merge_walk()?;
            if changes == 0 {
                break;
            }
        }

        debug!(
            function = self.name().unwrap_or("<anonymous>"),
            pruned,
            passes,
            blocks = self.block_count(),
            "simplified control flow graph"
        );
        Ok(())
    }

    /// Detaches every live block the entry does not reach.
    ///
    /// Returns the number of detached blocks.
    pub(crate) fn prune_unreachable(&mut self) -> Result<usize> {
        let reachable: FxHashSet<BlockId> = self.dfs().collect();
        let dead: Vec<BlockId> = self
            .blocks()
            .map(|block| block.id())
            .filter(|id| !reachable.contains(id))
            .collect();

        for &id in &dead {
            let successors = self.block_mut(id)?.successors.clone();
            for succ in successors {
                self.block_mut(succ)?.predecessors.retain(|&p| p != id);
            }
        }
        for &id in &dead {
            self.block_mut(id)?.detach();
        }
        Ok(dead.len())
    }

    /// One depth-first merge/elimination pass from the entry.
    ///
    /// Runs on an explicit stack of `(block, next slot)` pairs. The successor list
    /// is re-read on every step because rewriting a block can reshape it.
    fn merge_walk(&mut self) -> Result<usize> {
        let entry = self.entry();
        let mut visited = FxHashSet::default();
        visited.insert(entry);

        let mut changes = self.simplify_block(entry)?;
        let mut stack = vec![(entry, 0usize)];
        while let Some(frame) = stack.last_mut() {
            let (id, slot) = *frame;
            let Some(succ) = self.try_block(id)?.successors.get(slot).copied() else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if visited.insert(succ) {
                changes += self.simplify_block(succ)?;
                stack.push((succ, 0));
            }
        }
        Ok(changes)
    }

    /// Absorbs straight-line successors of `id`, then bypasses its empty ones.
    fn simplify_block(&mut self, id: BlockId) -> Result<usize> {
        let mut changes = 0;

        while let Some(next) = self.absorbable_successor(id)? {
            self.merge_with(id, next)?;
            changes += 1;
        }

        let mut slot = 0;
        loop {
            let Some(succ) = self.try_block(id)?.successors.get(slot).copied() else {
                break;
            };
            if self.try_block(succ)?.is_eliminable() {
                self.eliminate(succ)?;
                changes += 1;
                slot = 0;
            } else {
                slot += 1;
            }
        }
        Ok(changes)
    }

    fn absorbable_successor(&self, id: BlockId) -> Result<Option<BlockId>> {
        let block = self.try_block(id)?;
        if !block.can_be_merged() {
            return Ok(None);
        }

        let next = block.successors[0];
        let candidate = self.try_block(next)?;
        let absorbable = next != id
            && next != self.entry()
            && candidate.kind() == BlockKind::Base
            && !candidate.is_detached()
            && candidate.predecessors() == [id];
        Ok(absorbable.then_some(next))
    }

    /// Splices `next` into `id`: statements are appended, outgoing edges are taken
    /// over and `next` is detached.
    pub(crate) fn merge_with(&mut self, id: BlockId, next: BlockId) -> Result<()> {
        let block = self.try_block(id)?;
        if block.kind() == BlockKind::Condition {
            return Err(invariant_error!("condition block {} cannot be merged", id));
        }
        if block.successors() != [next] {
            return Err(invariant_error!(
                "block {} must have {} as its only successor to absorb it, has {:?}",
                id,
                next,
                block.successors()
            ));
        }

        let absorbed = self.try_block(next)?;
        if absorbed.kind() == BlockKind::Condition {
            return Err(invariant_error!("condition block {} cannot be merged", next));
        }
        if absorbed.predecessors().len() != 1 {
            return Err(invariant_error!(
                "block {} has {} predecessors and cannot be merged into {}",
                next,
                absorbed.predecessors().len(),
                id
            ));
        }

        let absorbed = self.block_mut(next)?;
        let statements = std::mem::take(&mut absorbed.statements);
        let successors = std::mem::take(&mut absorbed.successors);
        let label = absorbed.label.take();
        let is_final = absorbed.flags.contains(BlockFlags::FINAL);
        absorbed.detach();

        for &succ in &successors {
            for pred in &mut self.block_mut(succ)?.predecessors {
                if *pred == next {
                    *pred = id;
                }
            }
        }

        let block = self.block_mut(id)?;
        block.statements.extend(statements);
        block.successors = successors;
        if block.label.is_none() {
            block.label = label;
        }
        block.flags.set(BlockFlags::FINAL, is_final);

        if self.exit() == next {
            self.set_exit(id);
        }
        Ok(())
    }

    /// Removes the empty block `id`, redirecting each incoming edge to its single
    /// successor.
    pub(crate) fn eliminate(&mut self, id: BlockId) -> Result<()> {
        let block = self.try_block(id)?;
        if !block.is_eliminable() {
            return Err(invariant_error!(
                "block {} is not an empty forwarding block",
                id
            ));
        }
        let target = block.successors[0];

        let predecessors = std::mem::take(&mut self.block_mut(id)?.predecessors);
        self.block_mut(target)?.predecessors.retain(|&p| p != id);

        for &pred in &predecessors {
            let source = self.block_mut(pred)?;
            if let Some(slot) = source.successors.iter_mut().find(|slot| **slot == id) {
                *slot = target;
            }
            self.block_mut(target)?.predecessors.push(pred);
        }

        self.block_mut(id)?.detach();
        if self.exit() == id {
            self.set_exit(target);
        }
        Ok(())
    }
}
