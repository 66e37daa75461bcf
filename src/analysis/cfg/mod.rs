//! Control Flow Graph (CFG) construction, simplification and rendering.
//!
//! # Architecture
//!
//! The graph is an arena of [`Block`]s addressed by [`BlockId`], built on the
//! generic traversal traits of [`crate::utils::graph`]. Two block kinds exist:
//!
//! - **Base** blocks hold a straight-line run of statements
//! - **Condition** blocks hold a single condition expression and exactly two
//!   successor slots, true first
//!
//! # Key Components
//!
//! - [`CfgBuilder`] - Turns a [`TranslationUnit`](crate::ast::TranslationUnit)
//!   into one graph per top-level declaration
//! - [`ControlFlowGraph`] - The arena, traversals and edge enumeration
//! - [`ControlFlowGraph::simplify`] - Merge and empty-block elimination
//! - [`RenderDescriptor`] and [`ControlFlowGraph::to_dot`] - Display attributes
//!
//! # Edge Types
//!
//! - **Unconditional**: sequential flow, drawn black
//! - **Conditional True/False**: the two slots of a condition block, drawn
//!   `#2b782a` and `red`
//!
//! # Examples
//!
//! ```rust
//! use c_lang_ssa::{ast::{BinaryOperator, Node, TranslationUnit}, CfgBuilder};
//!
//! // int f(int x) { if (x > 0) { return 1; } return 0; }
//! let unit = TranslationUnit::new(vec![Node::function(
//!     "f",
//!     vec![Node::decl("int", "x", None)],
//!     vec![
//!         Node::if_then(
//!             Node::binary(BinaryOperator::Gt, Node::id("x"), Node::int(0)),
//!             Node::compound(vec![Node::ret(Some(Node::int(1)))]),
//!         ),
//!         Node::ret(Some(Node::int(0))),
//!     ],
//! )]);
//! let cfg = &CfgBuilder::new().build(&unit)?[0];
//!
//! for edge in cfg.edges() {
//!     println!("{} -> {} ({:?})", edge.source(), edge.target(), edge.kind());
//! }
//! println!("{}", cfg.to_dot(Some("f")));
//! # Ok::<(), c_lang_ssa::Error>(())
//! ```

mod block;
mod builder;
mod edge;
mod graph;
mod render;
mod simplify;

pub use block::{Block, BlockColor, BlockFlags, BlockId, BlockKind};
pub use builder::{CfgBuilder, TraversalContext};
pub use edge::{CfgEdge, CfgEdgeKind};
pub use graph::ControlFlowGraph;
pub use render::{RenderDescriptor, Shape};
