//! Phi nodes for join blocks.
//!
//! A phi node `y_2 = phi(y_1, y_0)` selects the version of `y` that belongs to the
//! edge control arrived on. Placement creates the node as an unresolved
//! placeholder carrying only the base variable name; renaming then assigns the
//! result and appends one operand per incoming edge, in the order the renaming
//! walk traverses those edges.

use std::fmt;

use crate::analysis::cfg::BlockId;

/// The value a phi node receives over one incoming edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhiOperand {
    value: String,
    predecessor: BlockId,
}

impl PhiOperand {
    /// Creates a new phi operand.
    ///
    /// # Arguments
    ///
    /// * `value` - The renamed variable flowing in
    /// * `predecessor` - The block the edge leaves from
    #[must_use]
    pub fn new(value: impl Into<String>, predecessor: BlockId) -> Self {
        Self {
            value: value.into(),
            predecessor,
        }
    }

    /// Returns the renamed variable.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the predecessor block.
    #[must_use]
    pub fn predecessor(&self) -> BlockId {
        self.predecessor
    }
}

impl fmt::Display for PhiOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}", self.value, self.predecessor)
    }
}

/// A phi node merging the versions of one variable.
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::{analysis::ssa::{PhiNode, PhiOperand}, BlockId};
///
/// let mut phi = PhiNode::new("y");
/// assert_eq!(phi.to_string(), "y = phi()");
///
/// phi.set_result("y_2");
/// phi.add_operand(PhiOperand::new("y_1", BlockId::new(3)));
/// phi.add_operand(PhiOperand::new("y_0", BlockId::new(1)));
/// assert_eq!(phi.to_string(), "y_2 = phi(y_1, y_0)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhiNode {
    variable: String,
    result: Option<String>,
    operands: Vec<PhiOperand>,
}

impl PhiNode {
    /// Creates an unresolved placeholder for `variable`.
    #[must_use]
    pub fn new(variable: &str) -> Self {
        Self {
            variable: variable.to_string(),
            result: None,
            operands: Vec::new(),
        }
    }

    /// Returns the base variable name.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the renamed result, once renaming has run.
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Returns the result if assigned, the base variable name otherwise.
    #[must_use]
    pub fn name(&self) -> &str {
        self.result.as_deref().unwrap_or(&self.variable)
    }

    /// Returns the operands in the order they were appended.
    #[must_use]
    pub fn operands(&self) -> &[PhiOperand] {
        &self.operands
    }

    /// Returns the operand received from `predecessor`, if any.
    #[must_use]
    pub fn operand_from(&self, predecessor: BlockId) -> Option<&PhiOperand> {
        self.operands
            .iter()
            .find(|operand| operand.predecessor == predecessor)
    }

    /// Returns `true` once a result has been assigned.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    /// Assigns the renamed result, replacing any earlier one.
    pub fn set_result(&mut self, result: impl Into<String>) {
        self.result = Some(result.into());
    }

    /// Appends the value received over one more incoming edge.
    pub fn add_operand(&mut self, operand: PhiOperand) {
        self.operands.push(operand);
    }
}

impl fmt::Display for PhiNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = phi(", self.name())?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", operand.value)?;
        }
        write!(f, ")")
    }
}
