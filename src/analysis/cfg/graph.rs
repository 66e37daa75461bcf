//! The arena-backed control flow graph.
//!
//! Blocks live in a `Vec` and are addressed by [`BlockId`]. Rewriting passes never
//! remove a block from the arena; merged and eliminated blocks are detached
//! instead, so every id handed out stays valid. Cloning the graph is a plain
//! arena clone, which is how the SSA pass keeps the pre-SSA graph intact.

use crate::{
    analysis::cfg::{Block, BlockColor, BlockFlags, BlockId, BlockKind, CfgEdge, CfgEdgeKind},
    utils::graph::{
        algorithms::{self, DfsIterator},
        GraphBase, Successors,
    },
    Error, Result,
};

/// A control flow graph for one top-level entry of a translation unit.
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::{ast::{Node, TranslationUnit}, CfgBuilder};
///
/// let unit = TranslationUnit::new(vec![Node::function(
///     "f",
///     vec![],
///     vec![Node::assign(Node::id("a"), Node::int(1)), Node::ret(Some(Node::id("a")))],
/// )]);
/// let cfg = &CfgBuilder::new().build(&unit)?[0];
///
/// assert_eq!(cfg.name(), Some("f"));
/// assert_eq!(cfg.block_count(), 1);
/// for id in cfg.reachable() {
///     let block = cfg.block(id).unwrap();
///     println!("{id}: {} statements", block.statements().len());
/// }
/// # Ok::<(), c_lang_ssa::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    name: Option<String>,
    blocks: Vec<Block>,
    entry: BlockId,
    exit: BlockId,
}

impl Default for ControlFlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlFlowGraph {
    /// Creates an empty graph. Entry and exit are set once construction finishes.
    pub(crate) fn new() -> Self {
        Self {
            name: None,
            blocks: Vec::new(),
            entry: BlockId::new(0),
            exit: BlockId::new(0),
        }
    }

    pub(crate) fn add_block(&mut self, kind: BlockKind) -> BlockId {
        let id = BlockId::new(self.blocks.len());
        self.blocks.push(Block::new(id, kind));
        id
    }

    pub(crate) fn set_bounds(&mut self, entry: BlockId, exit: BlockId) {
        self.entry = entry;
        self.exit = exit;
    }

    pub(crate) fn set_exit(&mut self, exit: BlockId) {
        self.exit = exit;
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Returns the function name, if the graph was built from a function definition.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the entry block.
    ///
    /// For a function this is the header block holding the formal parameters.
    #[must_use]
    pub fn entry(&self) -> BlockId {
        self.entry
    }

    /// Returns the block where the top-level construct ends.
    ///
    /// Paths ending in `return` do not necessarily reach it.
    #[must_use]
    pub fn exit(&self) -> BlockId {
        self.exit
    }

    /// Returns the block with the given id, or `None` if the id is out of range.
    ///
    /// Detached blocks are still returned; check [`Block::is_detached`].
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    /// Returns the block with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlockNotFound`] if the id is out of range.
    pub fn try_block(&self, id: BlockId) -> Result<&Block> {
        self.blocks.get(id.index()).ok_or(Error::BlockNotFound(id))
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> Result<&mut Block> {
        self.blocks
            .get_mut(id.index())
            .ok_or(Error::BlockNotFound(id))
    }

    /// Returns an iterator over all blocks that are still part of the graph.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|block| !block.is_detached())
    }

    /// Returns the number of blocks that are still part of the graph.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    /// Returns the blocks reachable from the entry in depth-first pre-order.
    #[must_use]
    pub fn reachable(&self) -> Vec<BlockId> {
        self.dfs().collect()
    }

    /// Returns a depth-first pre-order iterator from the entry.
    pub fn dfs(&self) -> DfsIterator<'_, Self> {
        algorithms::dfs(self, self.entry)
    }

    /// Returns every edge between reachable blocks, in pre-order of the source and
    /// slot order within a source.
    #[must_use]
    pub fn edges(&self) -> Vec<CfgEdge> {
        let mut edges = Vec::new();
        for id in self.dfs() {
            let Some(block) = self.block(id) else {
                continue;
            };
            for (slot, &target) in block.successors.iter().enumerate() {
                let kind = CfgEdgeKind::for_slot(block.is_condition(), slot);
                edges.push(CfgEdge::new(id, target, kind));
            }
        }
        edges
    }

    /// Returns the reachable condition blocks.
    #[must_use]
    pub fn condition_blocks(&self) -> Vec<BlockId> {
        self.dfs()
            .filter(|&id| self.block(id).is_some_and(Block::is_condition))
            .collect()
    }

    /// Adds a sequential edge `parent -> child`.
    pub(crate) fn link(&mut self, parent: BlockId, child: BlockId) -> Result<()> {
        self.try_block(parent)?;
        self.block_mut(child)?.predecessors.push(parent);
        self.block_mut(parent)?.successors.push(child);
        Ok(())
    }

    /// Sets both successor slots of a condition block and colors the branch entries.
    pub(crate) fn link_branches(
        &mut self,
        cond: BlockId,
        on_true: BlockId,
        on_false: BlockId,
    ) -> Result<()> {
        self.try_block(on_true)?;
        self.try_block(on_false)?;

        let block = self.block_mut(cond)?;
        if block.kind != BlockKind::Condition || !block.successors.is_empty() {
            return Err(invariant_error!(
                "block {} cannot take branch successors",
                cond
            ));
        }
        block.successors = vec![on_true, on_false];

        let true_block = self.block_mut(on_true)?;
        true_block.color = BlockColor::TrueBranch;
        true_block.predecessors.push(cond);

        let false_block = self.block_mut(on_false)?;
        false_block.color = BlockColor::FalseBranch;
        false_block.predecessors.push(cond);
        Ok(())
    }

    pub(crate) fn mark_final(&mut self, id: BlockId) -> Result<()> {
        self.block_mut(id)?.flags.insert(BlockFlags::FINAL);
        Ok(())
    }

    /// Checks that predecessor and successor lists mirror each other for every
    /// live block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] describing the first mismatch found.
    pub fn validate(&self) -> Result<()> {
        for block in self.blocks() {
            for &succ in &block.successors {
                let target = self.try_block(succ)?;
                let forward = block.successors.iter().filter(|&&s| s == succ).count();
                let backward = target
                    .predecessors
                    .iter()
                    .filter(|&&p| p == block.id)
                    .count();
                if target.is_detached() || forward != backward {
                    return Err(Error::GraphError(format!(
                        "edge {} -> {} is not mirrored ({forward} forward, {backward} backward)",
                        block.id, succ
                    )));
                }
            }
            for &pred in &block.predecessors {
                let source = self.try_block(pred)?;
                if source.is_detached() || !source.successors.contains(&block.id) {
                    return Err(Error::GraphError(format!(
                        "predecessor {} of {} has no matching edge",
                        pred, block.id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl GraphBase for ControlFlowGraph {
    fn node_count(&self) -> usize {
        self.blocks.len()
    }
}

impl Successors for ControlFlowGraph {
    fn successors(&self, node: BlockId) -> impl Iterator<Item = BlockId> {
        self.block(node)
            .map(|block| block.successors.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
    }
}
