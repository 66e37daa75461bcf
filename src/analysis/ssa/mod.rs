//! Naive Static Single Assignment (SSA) construction.
//!
//! The conversion runs in three steps over a simplified control flow graph:
//!
//! - [`collect_declared_variables`] finds the variables to version: every name
//!   declared in a reachable block, parameters included
//! - [`insert_phi_placeholders`] gives each join block a placeholder for every
//!   variable declared on a path into it
//! - [`rename`] hands out `{variable}_{n}` versions to definitions and phi
//!   results, rewrites uses and fills in phi operands
//!
//! Placement uses neither dominance frontiers nor liveness, so the output can
//! contain phi nodes whose operands are all the same version. [`SsaPass`] runs
//! the three steps on a copy of a graph.
//!
//! # Example
//!
//! For `int f(int x) { int y = x + 1; if (y > 0) { y = y - 1; } return y; }` the
//! return block ends up as
//!
//! ```text
//! x_1 = phi(x_0, x_0)
//! y_2 = phi(y_1, y_0)
//! return y_2;
//! ```

mod pass;
mod phi;
mod placement;
mod rename;
mod variables;

pub use pass::SsaPass;
pub use phi::{PhiNode, PhiOperand};
pub use placement::insert_phi_placeholders;
pub use rename::{rename, SsaCounters};
pub use variables::collect_declared_variables;
