use std::fmt;

use thiserror::Error;

use crate::analysis::cfg::BlockId;

macro_rules! invariant_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Invariant {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Invariant {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The loop-control statement that triggered a [`Error::NotInLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopJump {
    /// A `continue;` statement.
    Continue,
    /// A `break;` statement.
    Break,
}

impl fmt::Display for LoopJump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopJump::Continue => write!(f, "continue"),
            LoopJump::Break => write!(f, "break"),
        }
    }
}

/// The generic Error type, which covers every failure the graph construction,
/// simplification and SSA passes can report.
///
/// All variants are fatal for the pass that raised them. There is no partial
/// result: callers rerun from a pre-mutation copy of the graph.
///
/// # Error Categories
///
/// ## Structural Errors
/// - [`Error::NotInLoop`] - `continue`/`break` with no enclosing loop
/// - [`Error::RecursionLimit`] - AST nesting deeper than the configured limit
///
/// ## Graph Errors
/// - [`Error::Invariant`] - a merge or elimination precondition was violated
/// - [`Error::BlockNotFound`] - a block id that does not belong to the graph
/// - [`Error::GraphError`] - any other inconsistency in the block graph
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::{ast::{Node, TranslationUnit}, CfgBuilder, Error};
///
/// let unit = TranslationUnit::new(vec![Node::function("f", vec![], vec![Node::Break])]);
/// match CfgBuilder::new().build(&unit) {
///     Err(Error::NotInLoop(jump)) => println!("{jump} outside of a loop"),
///     Err(e) => println!("Other error: {e}"),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `continue` or `break` was found outside of any enclosing loop.
    ///
    /// There is no block the statement could be linked to, so the traversal
    /// of the translation unit is aborted.
    #[error("{0} not in a loop")]
    NotInLoop(LoopJump),

    /// A graph rewriting precondition was violated.
    ///
    /// Raised when a condition block is offered to the merge step, when the
    /// absorbed block has more than one predecessor, or when the absorbing
    /// block does not have exactly one successor. Carries the source location
    /// where the violation was detected.
    #[error("Invariant violation - {file}:{line}: {message}")]
    Invariant {
        /// The message describing the violated invariant
        message: String,
        /// The source file in which the violation was detected
        file: &'static str,
        /// The source line in which the violation was detected
        line: u32,
    },

    /// The referenced block does not exist in the graph.
    #[error("Block {0} does not exist in the graph")]
    BlockNotFound(BlockId),

    /// Recursion limit reached.
    ///
    /// The builder descends into nested statements recursively; the depth is
    /// capped by [`crate::CfgConfig::max_depth`]. The associated value is the
    /// limit that was exceeded.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// Generic block graph error.
    #[error("{0}")]
    GraphError(String),
}
