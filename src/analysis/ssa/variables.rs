//! Discovery of the variables the SSA pass versions.

use std::collections::BTreeSet;

use crate::{analysis::cfg::ControlFlowGraph, ast::Node};

/// Collects the names declared in blocks reachable from the entry.
///
/// Parameters count as declarations because the function header holds them as
/// declaration statements. Assignments never introduce a variable, so globals
/// assigned inside a function stay out of the set and never receive phi
/// placeholders.
///
/// # Arguments
///
/// * `cfg` - The graph to scan
///
/// # Returns
///
/// The declared names in lexical order.
#[must_use]
pub fn collect_declared_variables(cfg: &ControlFlowGraph) -> BTreeSet<String> {
    cfg.dfs()
        .filter_map(|id| cfg.block(id))
        .flat_map(|block| block.statements())
        .filter_map(|statement| match statement {
            Node::Decl { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{BinaryOperator, TranslationUnit},
        config::CfgConfig,
        CfgBuilder,
    };

    #[test]
    fn test_params_and_locals_are_collected() {
        let unit = TranslationUnit::new(vec![Node::function(
            "f",
            vec![Node::decl("int", "n", None)],
            vec![
                Node::decl("int", "acc", Some(Node::int(0))),
                Node::while_loop(
                    Node::binary(BinaryOperator::Gt, Node::id("n"), Node::int(0)),
                    Node::compound(vec![
                        Node::decl("int", "step", Some(Node::int(1))),
                        Node::assign(Node::id("global"), Node::id("step")),
                    ]),
                ),
            ],
        )]);
        let cfg = &CfgBuilder::with_config(CfgConfig::raw()).build(&unit).unwrap()[0];

        let vars: Vec<String> = collect_declared_variables(cfg).into_iter().collect();
        assert_eq!(vars, vec!["acc", "n", "step"]);
    }

    #[test]
    fn test_unreachable_declarations_are_skipped() {
        let unit = TranslationUnit::new(vec![Node::function(
            "f",
            vec![],
            vec![Node::ret(None), Node::decl("int", "dead", None)],
        )]);
        let cfg = &CfgBuilder::new().build(&unit).unwrap()[0];
        assert!(collect_declared_variables(cfg).is_empty());
    }
}
