//! Variable renaming into SSA form.
//!
//! Renaming walks the graph depth-first from the entry with an environment that
//! maps each base name to its current version. At every block:
//!
//! 1. each phi node defines a fresh version of its variable;
//! 2. each statement has its uses rewritten through the environment, then, if it
//!    is a declaration or an assignment to a plain identifier, receives a fresh
//!    version for the target;
//! 3. for every successor in slot order, a join successor's phi nodes receive the
//!    current version as an operand, and an unvisited successor is renamed with
//!    a snapshot of the environment before the next successor is crossed.
//!
//! Operands are therefore appended in the order the walk crosses the incoming
//! edges, and each block sees exactly the definitions on its path.

use std::collections::BTreeSet;

use imbl::OrdMap;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    analysis::{
        cfg::{BlockId, ControlFlowGraph},
        ssa::PhiOperand,
    },
    ast::rewrite_identifiers,
    Result,
};

/// Per-variable version counters.
///
/// Versions of a variable are numbered from 0 in the order they are handed out,
/// which makes every renamed name unique within a graph.
#[derive(Debug, Clone, Default)]
pub struct SsaCounters {
    next: FxHashMap<String, usize>,
}

impl SsaCounters {
    /// Creates an empty counter table. Unknown variables start at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh name `{variable}_{n}` and advances the counter.
    pub fn fresh(&mut self, variable: &str) -> String {
        let counter = self.next.entry(variable.to_string()).or_insert(0);
        let name = format!("{variable}_{counter}");
        *counter += 1;
        name
    }

    /// Returns how many versions of `variable` have been handed out.
    #[must_use]
    pub fn versions(&self, variable: &str) -> usize {
        self.next.get(variable).copied().unwrap_or(0)
    }
}

type Environment = OrdMap<String, String>;

/// Renames every definition and use of a variable in `cfg`.
///
/// Phi placeholders must already be in place, see
/// [`insert_phi_placeholders`](crate::analysis::ssa::insert_phi_placeholders).
/// Every declaration and every assignment to a plain identifier defines a new
/// version, including assignments to names declared outside the function. Uses
/// of a variable with no definition on the current path keep their base name, and
/// an edge along which a phi's variable is undefined contributes no operand.
///
/// # Arguments
///
/// * `cfg` - The graph to rewrite in place
/// * `declared` - The declared variables; each starts with a version counter at 0
///
/// # Returns
///
/// The counters after renaming, one entry per versioned variable.
///
/// # Errors
///
/// Returns [`crate::Error::BlockNotFound`] if the graph references a block
/// outside its arena.
pub fn rename(cfg: &mut ControlFlowGraph, declared: &BTreeSet<String>) -> Result<SsaCounters> {
    let mut counters = SsaCounters::new();
    for variable in declared {
        counters.next.insert(variable.clone(), 0);
    }
    let mut renamer = Renamer {
        counters,
        visited: FxHashSet::default(),
    };
    let entry = cfg.entry();
    renamer.visited.insert(entry);
    renamer.walk(cfg, entry)?;
    Ok(renamer.counters)
}

struct Renamer {
    counters: SsaCounters,
    visited: FxHashSet<BlockId>,
}

/// A renamed block whose successors are still being crossed.
struct Frame {
    id: BlockId,
    env: Environment,
    successors: Vec<BlockId>,
    slot: usize,
}

impl Renamer {
    /// Depth-first walk on an explicit stack, so long block chains cannot exhaust
    /// the call stack. Successors are crossed in slot order and a sibling edge is
    /// only crossed once the subtree before it is finished.
    fn walk(&mut self, cfg: &mut ControlFlowGraph, entry: BlockId) -> Result<()> {
        let mut stack = vec![self.enter(cfg, entry, Environment::new())?];

        while let Some(frame) = stack.last_mut() {
            let Some(&succ) = frame.successors.get(frame.slot) else {
                stack.pop();
                continue;
            };
            frame.slot += 1;

            let target = cfg.block_mut(succ)?;
            if target.is_join() {
                for phi in &mut target.phis {
                    if let Some(value) = frame.env.get(phi.variable()) {
                        phi.add_operand(PhiOperand::new(value.clone(), frame.id));
                    }
                }
            }
            if self.visited.insert(succ) {
                let env = frame.env.clone();
                let child = self.enter(cfg, succ, env)?;
                stack.push(child);
            }
        }
        Ok(())
    }

    /// Renames the phis and statements of `id` and returns its frame.
    fn enter(&mut self, cfg: &mut ControlFlowGraph, id: BlockId, mut env: Environment) -> Result<Frame> {
        let block = cfg.block_mut(id)?;

        for phi in &mut block.phis {
            let version = self.counters.fresh(phi.variable());
            env.insert(phi.variable().to_string(), version.clone());
            phi.set_result(version);
        }

        for statement in &mut block.statements {
            let target = statement.defined_variable().map(str::to_owned);

            rewrite_identifiers(statement, &|name: &str| env.get(name).cloned());

            if let Some(target) = target {
                let version = self.counters.fresh(&target);
                statement.set_defined_variable(version.clone());
                env.insert(target, version);
            }
        }

        Ok(Frame {
            id,
            env,
            successors: block.successors.clone(),
            slot: 0,
        })
    }
}
