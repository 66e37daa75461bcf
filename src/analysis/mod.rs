//! Control flow and SSA analysis of C functions.
//!
//! # Architecture
//!
//! - [`cfg`] - Control flow graph construction, simplification and rendering
//! - [`ssa`] - Naive SSA construction over a simplified graph
//!
//! # Usage
//!
//! ```rust
//! use c_lang_ssa::{
//!     analysis::{CfgBuilder, SsaPass},
//!     ast::{Node, TranslationUnit},
//! };
//!
//! let unit = TranslationUnit::new(vec![Node::function(
//!     "f",
//!     vec![Node::decl("int", "a", None)],
//!     vec![Node::assign(Node::id("a"), Node::int(2)), Node::ret(Some(Node::id("a")))],
//! )]);
//! let graphs = CfgBuilder::new().build(&unit)?;
//! let ssa = SsaPass::run(&graphs[0])?;
//!
//! let entry = ssa.block(ssa.entry()).unwrap();
//! let rendered: Vec<String> = entry.statements().iter().map(ToString::to_string).collect();
//! assert_eq!(rendered, vec!["int a_0", "a_1 = 2", "return a_1;"]);
//! # Ok::<(), c_lang_ssa::Error>(())
//! ```

pub mod cfg;
pub mod ssa;

pub use cfg::{CfgBuilder, CfgEdge, CfgEdgeKind, ControlFlowGraph};
pub use ssa::{PhiNode, SsaPass};
