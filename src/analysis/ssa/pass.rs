//! The SSA driver: variable discovery, phi placement and renaming.

use rayon::prelude::*;
use tracing::debug;

use crate::{
    analysis::{
        cfg::ControlFlowGraph,
        ssa::{collect_declared_variables, insert_phi_placeholders, rename},
    },
    Result,
};

/// Converts control flow graphs into naive SSA form.
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::{ast::{BinaryOperator, Node, TranslationUnit}, CfgBuilder, SsaPass};
///
/// // int f(int x) { if (x > 0) { x = 0; } return x; }
/// let unit = TranslationUnit::new(vec![Node::function(
///     "f",
///     vec![Node::decl("int", "x", None)],
///     vec![
///         Node::if_then(
///             Node::binary(BinaryOperator::Gt, Node::id("x"), Node::int(0)),
///             Node::compound(vec![Node::assign(Node::id("x"), Node::int(0))]),
///         ),
///         Node::ret(Some(Node::id("x"))),
///     ],
/// )]);
/// let cfg = &CfgBuilder::new().build(&unit)?[0];
/// let ssa = SsaPass::run(cfg)?;
///
/// let exit = ssa.block(ssa.exit()).unwrap();
/// assert_eq!(exit.phis()[0].to_string(), "x_2 = phi(x_1, x_0)");
/// # Ok::<(), c_lang_ssa::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SsaPass;

impl SsaPass {
    /// Returns an SSA copy of `cfg`, leaving the input untouched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BlockNotFound`] if the graph references a block
    /// outside its arena.
    pub fn run(cfg: &ControlFlowGraph) -> Result<ControlFlowGraph> {
        let mut ssa = cfg.clone();
        Self::run_in_place(&mut ssa)?;
        Ok(ssa)
    }

    /// Rewrites `cfg` into SSA form.
    ///
    /// # Errors
    ///
    /// See [`SsaPass::run`].
    pub fn run_in_place(cfg: &mut ControlFlowGraph) -> Result<()> {
        let declared = collect_declared_variables(cfg);
        let placeholders = insert_phi_placeholders(cfg, &declared)?;
        let counters = rename(cfg, &declared)?;

        debug!(
            function = cfg.name().unwrap_or("<anonymous>"),
            variables = declared.len(),
            placeholders,
            versions = declared.iter().map(|var| counters.versions(var)).sum::<usize>(),
            "converted to ssa form"
        );
        Ok(())
    }

    /// Converts every graph of a translation unit in parallel.
    ///
    /// Graphs are independent, so the result keeps the input order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn run_all(graphs: &[ControlFlowGraph]) -> Result<Vec<ControlFlowGraph>> {
        graphs.par_iter().map(Self::run).collect()
    }
}
