//! Basic and condition blocks of the control flow graph.

use bitflags::bitflags;
use strum::{Display, IntoStaticStr};

use crate::{analysis::ssa::PhiNode, ast::Node, utils::graph::NodeId};

/// Index of a block inside its [`ControlFlowGraph`](crate::ControlFlowGraph) arena.
pub type BlockId = NodeId;

/// The two block variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum BlockKind {
    /// A straight-line sequence of statements with at most one fall-through successor
    /// before simplification.
    Base,
    /// A two-way branch holding exactly one condition expression. Successor slot 0
    /// is the true branch, slot 1 the false branch.
    Condition,
}

bitflags! {
    /// Block state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BlockFlags: u8 {
        /// Control never falls through the end of this block (`return`, `break`, `continue`).
        const FINAL = 0x01;
        /// The block was merged into a predecessor or eliminated and is no longer part of the graph.
        const DETACHED = 0x02;
    }
}

/// Fill color of a block, decided by the branch that leads into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr)]
pub enum BlockColor {
    /// Plain block.
    #[default]
    #[strum(serialize = "white")]
    Default,
    /// Entry of a true branch.
    #[strum(serialize = "#80ff80")]
    TrueBranch,
    /// Entry of a false branch.
    #[strum(serialize = "#ff9999")]
    FalseBranch,
}

impl BlockColor {
    /// Returns the color as a Graphviz color string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A node of the control flow graph.
///
/// Successors are edges owned by the graph; predecessors are back references kept
/// in sync by every graph mutation, one entry per incoming edge.
#[derive(Debug, Clone)]
pub struct Block {
    pub(crate) id: BlockId,
    pub(crate) kind: BlockKind,
    pub(crate) statements: Vec<Node>,
    pub(crate) predecessors: Vec<BlockId>,
    pub(crate) successors: Vec<BlockId>,
    pub(crate) color: BlockColor,
    pub(crate) flags: BlockFlags,
    pub(crate) label: Option<String>,
    pub(crate) phis: Vec<PhiNode>,
}

impl Block {
    pub(crate) fn new(id: BlockId, kind: BlockKind) -> Self {
        Self {
            id,
            kind,
            statements: Vec::new(),
            predecessors: Vec::new(),
            successors: Vec::new(),
            color: BlockColor::Default,
            flags: BlockFlags::empty(),
            label: None,
            phis: Vec::new(),
        }
    }

    /// Returns the block's id.
    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Returns the block variant.
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Returns `true` for condition blocks.
    #[must_use]
    pub fn is_condition(&self) -> bool {
        self.kind == BlockKind::Condition
    }

    /// Returns the statements in execution order.
    ///
    /// A condition block holds exactly one statement, its condition expression.
    #[must_use]
    pub fn statements(&self) -> &[Node] {
        &self.statements
    }

    /// Returns the predecessors, one entry per incoming edge.
    #[must_use]
    pub fn predecessors(&self) -> &[BlockId] {
        &self.predecessors
    }

    /// Returns the successors in slot order.
    #[must_use]
    pub fn successors(&self) -> &[BlockId] {
        &self.successors
    }

    /// Returns the successor taken when the condition holds.
    #[must_use]
    pub fn true_branch(&self) -> Option<BlockId> {
        if self.is_condition() {
            self.successors.first().copied()
        } else {
            None
        }
    }

    /// Returns the successor taken when the condition does not hold.
    #[must_use]
    pub fn false_branch(&self) -> Option<BlockId> {
        if self.is_condition() {
            self.successors.get(1).copied()
        } else {
            None
        }
    }

    /// Returns `true` when the block holds no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Returns `true` when control never falls through the end of this block.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.flags.contains(BlockFlags::FINAL)
    }

    /// Returns `true` once the block has been merged away or eliminated.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.flags.contains(BlockFlags::DETACHED)
    }

    /// Returns `true` when more than one edge enters this block.
    #[must_use]
    pub fn is_join(&self) -> bool {
        self.predecessors.len() > 1
    }

    /// Returns the block's state flags.
    #[must_use]
    pub fn flags(&self) -> BlockFlags {
        self.flags
    }

    /// Returns the fill color.
    #[must_use]
    pub fn color(&self) -> BlockColor {
        self.color
    }

    /// Returns the optional display label, e.g. `function main start`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the phi nodes of this block ordered by variable name.
    #[must_use]
    pub fn phis(&self) -> &[PhiNode] {
        &self.phis
    }

    /// Returns the phi node merging `variable`, if any.
    #[must_use]
    pub fn phi(&self, variable: &str) -> Option<&PhiNode> {
        self.phis.iter().find(|phi| phi.variable() == variable)
    }

    /// Appends statements without reordering the existing ones.
    pub fn add_statements(&mut self, statements: impl IntoIterator<Item = Node>) {
        self.statements.extend(statements);
    }

    /// Records a phi placeholder for `variable` unless one already exists.
    ///
    /// Returns `true` if a placeholder was added.
    pub(crate) fn add_phi(&mut self, variable: &str) -> bool {
        match self
            .phis
            .binary_search_by(|phi| phi.variable().cmp(variable))
        {
            Ok(_) => false,
            Err(pos) => {
                self.phis.insert(pos, PhiNode::new(variable));
                true
            }
        }
    }

    /// A Base block with one successor and at most one predecessor may absorb
    /// its successor.
    pub(crate) fn can_be_merged(&self) -> bool {
        self.kind == BlockKind::Base
            && !self.is_detached()
            && self.successors.len() == 1
            && self.predecessors.len() <= 1
    }

    /// An empty Base block that only forwards to a different block.
    pub(crate) fn is_eliminable(&self) -> bool {
        self.kind == BlockKind::Base
            && !self.is_detached()
            && self.statements.is_empty()
            && self.successors.len() == 1
            && self.successors[0] != self.id
    }

    pub(crate) fn detach(&mut self) {
        self.statements.clear();
        self.successors.clear();
        self.predecessors.clear();
        self.phis.clear();
        self.flags.insert(BlockFlags::DETACHED);
    }
}
