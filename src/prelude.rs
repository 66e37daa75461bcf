//! # c-lang-ssa Prelude
//!
//! This module re-exports the types needed to build, simplify, convert and render
//! control flow graphs. Import it with `use c_lang_ssa::prelude::*;`.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type
pub use crate::Error;

/// The result type used throughout the crate
pub use crate::Result;

/// The jump kind reported by `Error::NotInLoop`
pub use crate::LoopJump;

/// Builder configuration
pub use crate::CfgConfig;

// ================================================================================================
// Syntax Tree
// ================================================================================================

/// Nodes, translation units and operators
pub use crate::ast::{
    AssignOperator, BinaryOperator, ForInit, Node, TranslationUnit, UnaryOperator,
};

/// Identifier substitution
pub use crate::ast::{rename_identifier, rewrite_identifiers};

// ================================================================================================
// Control Flow Graph
// ================================================================================================

/// Graph construction
pub use crate::analysis::cfg::{CfgBuilder, TraversalContext};

/// Graph, blocks and edges
pub use crate::analysis::cfg::{
    Block, BlockColor, BlockFlags, BlockId, BlockKind, CfgEdge, CfgEdgeKind, ControlFlowGraph,
};

/// Rendering attributes
pub use crate::analysis::cfg::{RenderDescriptor, Shape};

// ================================================================================================
// SSA
// ================================================================================================

/// SSA driver and phi nodes
pub use crate::analysis::ssa::{PhiNode, PhiOperand, SsaCounters, SsaPass};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// Non-fatal findings collected during construction
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};

// ================================================================================================
// Graph Utilities
// ================================================================================================

/// Generic graph traits
pub use crate::utils::graph::{GraphBase, NodeId, Successors};
