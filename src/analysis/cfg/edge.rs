//! Control flow edge types for the CFG.
//!
//! Edges are not stored; they are derived from a block's successor slots. A
//! condition block's slot 0 is its true edge and slot 1 its false edge, every
//! other edge is unconditional.

use crate::analysis::cfg::BlockId;

/// The kind of control flow represented by an edge.
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::analysis::cfg::CfgEdgeKind;
///
/// assert!(CfgEdgeKind::ConditionalTrue.is_conditional());
/// assert_eq!(CfgEdgeKind::ConditionalFalse.color(), "red");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CfgEdgeKind {
    /// Sequential flow out of a base block.
    Unconditional,

    /// Taken when the condition of a condition block holds.
    ConditionalTrue,

    /// Taken when the condition of a condition block does not hold.
    ConditionalFalse,
}

impl CfgEdgeKind {
    /// Returns `true` for the two edges leaving a condition block.
    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        matches!(self, Self::ConditionalTrue | Self::ConditionalFalse)
    }

    /// Returns the Graphviz color used to draw this kind of edge.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Unconditional => "black",
            Self::ConditionalTrue => "#2b782a",
            Self::ConditionalFalse => "red",
        }
    }

    /// Returns the edge kind of successor slot `slot` of a block.
    ///
    /// # Arguments
    ///
    /// * `is_condition` - Whether the source block is a condition block
    /// * `slot` - The successor slot index
    #[must_use]
    pub const fn for_slot(is_condition: bool, slot: usize) -> Self {
        match (is_condition, slot) {
            (true, 0) => Self::ConditionalTrue,
            (true, _) => Self::ConditionalFalse,
            (false, _) => Self::Unconditional,
        }
    }
}

/// A directed edge between two blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CfgEdge {
    source: BlockId,
    target: BlockId,
    kind: CfgEdgeKind,
}

impl CfgEdge {
    /// Creates a new edge.
    #[must_use]
    pub const fn new(source: BlockId, target: BlockId, kind: CfgEdgeKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }

    /// Returns the source block.
    #[must_use]
    pub const fn source(&self) -> BlockId {
        self.source
    }

    /// Returns the target block.
    #[must_use]
    pub const fn target(&self) -> BlockId {
        self.target
    }

    /// Returns the kind of control flow.
    #[must_use]
    pub const fn kind(&self) -> CfgEdgeKind {
        self.kind
    }

    /// Returns the Graphviz color of this edge.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        self.kind.color()
    }
}
