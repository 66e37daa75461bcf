// Copyright 2025 c-lang-ssa contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # c-lang-ssa
//!
//! Control flow graph construction, block simplification and naive SSA conversion
//! for C function bodies.
//!
//! The crate consumes an already parsed C translation unit ([`ast::TranslationUnit`]),
//! turns every top-level entry into a [`ControlFlowGraph`] of basic and condition
//! blocks, collapses straight-line chains and empty blocks, and converts the result
//! into static single assignment form with phi placeholders at join points. The
//! resulting graphs carry everything a renderer needs (labels, fill colors, shapes,
//! edge colors) and can be emitted as Graphviz DOT text.
//!
//! ## Features
//!
//! - **Structured CFG construction** - `if`/`else`, `while`, `for`, `return`, `break`
//!   and `continue` with explicit loop context threading
//! - **Simplification** - merge of single-entry/single-exit chains and elimination
//!   of empty blocks, with exact predecessor bookkeeping
//! - **Naive SSA** - path-local phi placement, per-variable versioning and phi
//!   argument accumulation
//! - **Rendering** - per-block render descriptors and DOT output
//! - **Diagnostics** - non-fatal findings collected without aborting the traversal
//!
//! ## Quick Start
//!
//! ```rust
//! use c_lang_ssa::prelude::*;
//!
//! // int f(int x) { int y = x + 1; return y; }
//! let unit = TranslationUnit::new(vec![Node::function(
//!     "f",
//!     vec![Node::decl("int", "x", None)],
//!     vec![
//!         Node::decl("int", "y", Some(Node::binary(BinaryOperator::Add, Node::id("x"), Node::int(1)))),
//!         Node::ret(Some(Node::id("y"))),
//!     ],
//! )]);
//!
//! let builder = CfgBuilder::new();
//! let graphs = builder.build(&unit)?;
//! let ssa = SsaPass::run(&graphs[0])?;
//!
//! println!("{}", ssa.to_dot(Some("f")));
//! # Ok::<(), c_lang_ssa::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`ast`] - Owned C AST consumed by the builder, statement printer and identifier rewriter
//! - [`analysis::cfg`] - Block graph, builder, simplification and rendering
//! - [`analysis::ssa`] - Variable collection, phi placement and renaming
//! - [`diagnostics`] - Non-fatal findings collected during construction
//! - [`Error`] and [`Result`] - Error handling for all fatal conditions

#[macro_use]
pub(crate) mod error;

pub mod analysis;
pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod prelude;
pub mod utils;

/// `c-lang-ssa` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. Every fallible operation of the crate returns this type.
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::{ast::TranslationUnit, CfgBuilder, Result};
///
/// fn count_graphs(unit: &TranslationUnit) -> Result<usize> {
///     Ok(CfgBuilder::new().build(unit)?.len())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `c-lang-ssa` Error type
///
/// The main error type for all operations in this crate. See [`Error`] for
/// the full list of variants.
pub use error::Error;

/// The loop-control statement carried by [`Error::NotInLoop`].
pub use error::LoopJump;

/// Builder and graph types for control flow graph construction.
pub use analysis::cfg::{Block, BlockId, BlockKind, CfgBuilder, ControlFlowGraph};

/// SSA conversion entry point.
pub use analysis::ssa::SsaPass;

/// Builder configuration.
pub use config::CfgConfig;
