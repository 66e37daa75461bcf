//! Naive phi placement.
//!
//! The graph is walked depth-first from the entry while carrying the set of
//! variables declared on the current path. Whenever the walk crosses an edge into
//! a join block, that block receives a placeholder for every variable in the set.
//! No liveness or dominance information is used, so placeholders may be
//! redundant, and a join only receives the variables declared on the paths the
//! walk takes into it.

use std::collections::BTreeSet;

use imbl::OrdSet;
use rustc_hash::FxHashSet;

use crate::{
    analysis::cfg::{BlockId, ControlFlowGraph},
    ast::Node,
    Result,
};

/// Inserts phi placeholders into the join blocks of `cfg`.
///
/// Only names contained in `declared` receive placeholders.
///
/// # Arguments
///
/// * `cfg` - The graph to annotate
/// * `declared` - The variables to version, see
///   [`collect_declared_variables`](crate::analysis::ssa::collect_declared_variables)
///
/// # Returns
///
/// The number of placeholders added.
///
/// # Errors
///
/// Returns [`crate::Error::BlockNotFound`] if the graph references a block
/// outside its arena.
pub fn insert_phi_placeholders(cfg: &mut ControlFlowGraph, declared: &BTreeSet<String>) -> Result<usize> {
    let mut placement = Placement {
        declared,
        visited: FxHashSet::default(),
        added: 0,
    };
    let entry = cfg.entry();
    placement.visited.insert(entry);
    placement.walk(cfg, entry)?;
    Ok(placement.added)
}

struct Placement<'a> {
    declared: &'a BTreeSet<String>,
    visited: FxHashSet<BlockId>,
    added: usize,
}

struct Frame {
    defined: OrdSet<String>,
    successors: Vec<BlockId>,
    slot: usize,
}

impl Placement<'_> {
    fn walk(&mut self, cfg: &mut ControlFlowGraph, entry: BlockId) -> Result<()> {
        let mut stack = vec![self.enter(cfg, entry, OrdSet::new())?];

        while let Some(frame) = stack.last_mut() {
            let Some(&succ) = frame.successors.get(frame.slot) else {
                stack.pop();
                continue;
            };
            frame.slot += 1;

            let target = cfg.block_mut(succ)?;
            if target.is_join() {
                for name in &frame.defined {
                    if target.add_phi(name) {
                        self.added += 1;
                    }
                }
            }
            if self.visited.insert(succ) {
                let defined = frame.defined.clone();
                let child = self.enter(cfg, succ, defined)?;
                stack.push(child);
            }
        }
        Ok(())
    }

    /// Extends `defined` with the declarations of `id`.
    fn enter(&self, cfg: &ControlFlowGraph, id: BlockId, mut defined: OrdSet<String>) -> Result<Frame> {
        let block = cfg.try_block(id)?;
        for statement in block.statements() {
            if let Node::Decl { name, .. } = statement {
                if self.declared.contains(name) {
                    defined.insert(name.clone());
                }
            }
        }
        Ok(Frame {
            defined,
            successors: block.successors().to_vec(),
            slot: 0,
        })
    }
}
