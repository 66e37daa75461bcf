//! Identifier substitution inside statements.
//!
//! The substitution walks a fixed subset of node shapes: declarations (initializer
//! only, never the declared name), assignments (both sides), binary and unary
//! operations, `return` expressions and call arguments. Every other node, and any
//! absent child, is left untouched.

use crate::ast::Node;

/// Rewrites every identifier for which `lookup` returns a replacement.
///
/// All identifiers are looked up against their original name, so a mapping such
/// as `{x -> y, y -> x}` swaps the two names instead of chaining.
///
/// # Arguments
///
/// * `node` - The statement or expression to rewrite in place
/// * `lookup` - Returns the replacement for an identifier, or `None` to keep it
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::ast::{rewrite_identifiers, BinaryOperator, Node};
///
/// let mut expr = Node::binary(BinaryOperator::Add, Node::id("x"), Node::id("y"));
/// rewrite_identifiers(&mut expr, &|name: &str| match name {
///     "x" => Some("y".to_string()),
///     "y" => Some("x".to_string()),
///     _ => None,
/// });
/// assert_eq!(expr.to_string(), "y + x");
/// ```
pub fn rewrite_identifiers<F>(node: &mut Node, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    match node {
        Node::Decl { init, .. } => {
            if let Some(init) = init {
                rewrite_identifiers(init, lookup);
            }
        }
        Node::Assignment { lvalue, rvalue, .. } => {
            rewrite_identifiers(lvalue, lookup);
            rewrite_identifiers(rvalue, lookup);
        }
        Node::BinaryOp { left, right, .. } => {
            rewrite_identifiers(left, lookup);
            rewrite_identifiers(right, lookup);
        }
        Node::UnaryOp { operand, .. } => rewrite_identifiers(operand, lookup),
        Node::Return { expr: Some(expr) } => rewrite_identifiers(expr, lookup),
        Node::FuncCall { args, .. } => {
            for arg in args {
                rewrite_identifiers(arg, lookup);
            }
        }
        Node::Id { name } => {
            if let Some(new_name) = lookup(name) {
                *name = new_name;
            }
        }
        _ => {}
    }
}

/// Renames every occurrence of the identifier `old` to `new`.
///
/// # Arguments
///
/// * `node` - The statement or expression to rewrite in place
/// * `old` - The identifier to replace
/// * `new` - The replacement name
pub fn rename_identifier(node: &mut Node, old: &str, new: &str) {
    rewrite_identifiers(node, &|name: &str| (name == old).then(|| new.to_string()));
}
