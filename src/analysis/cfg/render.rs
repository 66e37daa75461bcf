//! Display attributes and Graphviz output.
//!
//! Every live block maps to a [`RenderDescriptor`] and every edge to a color, which
//! is all an external renderer needs. [`ControlFlowGraph::to_dot`] assembles those
//! attributes into DOT text; writing or laying out the result is left to the caller.

use std::fmt::Write;

use strum::Display;

use crate::{
    analysis::cfg::{Block, BlockColor, ControlFlowGraph},
    utils::{escape_dot, escape_label},
};

/// Graphviz node shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Shape {
    /// Used for base blocks.
    Record,
    /// Used for condition blocks.
    Diamond,
}

/// Renderer-facing attributes of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDescriptor {
    /// Left-justified label text, one `\l`-terminated line per entry.
    pub label: String,
    /// Graphviz fill color.
    pub color: &'static str,
    /// Graphviz node shape.
    pub shape: Shape,
}

impl Block {
    /// Builds the label text of this block.
    ///
    /// The optional block label comes first, then one line per phi node, then one
    /// line per statement. Each line ends in `\l`, and `<`/`>` are escaped.
    #[must_use]
    pub fn render_label(&self) -> String {
        let mut label = String::new();
        if let Some(text) = &self.label {
            let _ = write!(label, "{}\\l", escape_label(text));
        }
        for phi in &self.phis {
            let _ = write!(label, "{}\\l", escape_label(&phi.to_string()));
        }
        for statement in &self.statements {
            let _ = write!(label, "{}\\l", escape_label(&statement.to_string()));
        }
        label
    }

    /// Returns the display attributes of this block.
    ///
    /// Condition blocks are always white diamonds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use c_lang_ssa::{analysis::cfg::Shape, ast::{BinaryOperator, Node, TranslationUnit}, CfgBuilder};
    ///
    /// let unit = TranslationUnit::new(vec![Node::function(
    ///     "f",
    ///     vec![],
    ///     vec![Node::while_loop(
    ///         Node::binary(BinaryOperator::Lt, Node::id("i"), Node::int(3)),
    ///         Node::compound(vec![Node::assign(Node::id("i"), Node::int(0))]),
    ///     )],
    /// )]);
    /// let cfg = &CfgBuilder::new().build(&unit)?[0];
    /// let cond = cfg.block(cfg.condition_blocks()[0]).unwrap().render_descriptor();
    ///
    /// assert_eq!(cond.shape, Shape::Diamond);
    /// assert_eq!(cond.color, "white");
    /// assert_eq!(cond.label, "i \\< 3\\l");
    /// # Ok::<(), c_lang_ssa::Error>(())
    /// ```
    #[must_use]
    pub fn render_descriptor(&self) -> RenderDescriptor {
        let (color, shape) = if self.is_condition() {
            (BlockColor::Default.as_str(), Shape::Diamond)
        } else {
            (self.color.as_str(), Shape::Record)
        };
        RenderDescriptor {
            label: self.render_label(),
            color,
            shape,
        }
    }
}

impl ControlFlowGraph {
    /// Generates a DOT representation of the reachable part of the graph.
    ///
    /// Nodes are named after their block id and filled with their block color;
    /// edges carry the color of their [`CfgEdgeKind`](crate::analysis::cfg::CfgEdgeKind).
    ///
    /// # Arguments
    ///
    /// * `title` - Optional graph title, e.g. the function name
    ///
    /// # Returns
    ///
    /// The DOT text.
    #[must_use]
    pub fn to_dot(&self, title: Option<&str>) -> String {
        let mut dot = String::new();

        dot.push_str("strict digraph CFG {\n");
        if let Some(name) = title {
            let _ = writeln!(dot, "    label=\"{}\";", escape_dot(name));
            dot.push_str("    labelloc=t;\n");
        }
        dot.push_str("    node [style=filled, fontname=\"Courier\", fontsize=10];\n\n");

        for id in self.dfs() {
            let Some(block) = self.block(id) else {
                continue;
            };
            let descriptor = block.render_descriptor();
            let _ = writeln!(
                dot,
                "    {id} [label=\"{}\", shape={}, fillcolor=\"{}\"];",
                descriptor.label.replace('"', "\\\""),
                descriptor.shape,
                descriptor.color
            );
        }

        dot.push('\n');

        for edge in self.edges() {
            let _ = writeln!(
                dot,
                "    {} -> {} [color=\"{}\"];",
                edge.source(),
                edge.target(),
                edge.color()
            );
        }

        dot.push_str("}\n");
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::cfg::BlockKind,
        ast::{BinaryOperator, Node},
    };

    fn branch() -> ControlFlowGraph {
        let mut cfg = ControlFlowGraph::new();
        let head = cfg.add_block(BlockKind::Base);
        let cond = cfg.add_block(BlockKind::Condition);
        let left = cfg.add_block(BlockKind::Base);
        let right = cfg.add_block(BlockKind::Base);
        {
            let block = cfg.block_mut(head).unwrap();
            block.label = Some("function f start".to_string());
            block.add_statements([Node::decl("int", "y", None)]);
        }
        cfg.block_mut(cond)
            .unwrap()
            .add_statements([Node::binary(BinaryOperator::Gt, Node::id("y"), Node::int(0))]);
        cfg.block_mut(left)
            .unwrap()
            .add_statements([Node::call("puts", vec![Node::constant("string", "\"hi\"")])]);
        cfg.block_mut(right).unwrap().add_statements([Node::ret(None)]);
        cfg.link(head, cond).unwrap();
        cfg.link_branches(cond, left, right).unwrap();
        cfg.set_bounds(head, right);
        cfg
    }

    #[test]
    fn test_label_lines_and_escaping() {
        let cfg = branch();
        let head = cfg.block(cfg.entry()).unwrap();
        assert_eq!(head.render_label(), "function f start\\lint y\\l");

        let cond = cfg.block(cfg.condition_blocks()[0]).unwrap();
        assert_eq!(cond.render_label(), "y \\> 0\\l");
    }

    #[test]
    fn test_phi_lines_come_first() {
        let mut cfg = branch();
        let exit = cfg.exit();
        cfg.block_mut(exit).unwrap().add_phi("y");
        let label = cfg.block(exit).unwrap().render_label();
        assert_eq!(label, "y = phi()\\lreturn;\\l");
    }

    #[test]
    fn test_descriptors() {
        let cfg = branch();
        let cond = cfg.condition_blocks()[0];
        let descriptor = cfg.block(cond).unwrap().render_descriptor();
        assert_eq!(descriptor.shape, Shape::Diamond);
        assert_eq!(descriptor.color, "white");

        let left = cfg.block(cond).unwrap().true_branch().unwrap();
        let descriptor = cfg.block(left).unwrap().render_descriptor();
        assert_eq!(descriptor.shape, Shape::Record);
        assert_eq!(descriptor.color, "#80ff80");
        assert_eq!(Shape::Record.to_string(), "record");
    }

    #[test]
    fn test_to_dot() {
        let cfg = branch();
        let dot = cfg.to_dot(Some("f"));

        assert!(dot.starts_with("strict digraph CFG {\n"));
        assert!(dot.contains("label=\"f\";"));
        assert!(dot.contains("B1 [label=\"y \\> 0\\l\", shape=diamond, fillcolor=\"white\"];"));
        assert!(dot.contains("B2 [label=\"puts(\\\"hi\\\")\\l\", shape=record, fillcolor=\"#80ff80\"];"));
        assert!(dot.contains("B1 -> B2 [color=\"#2b782a\"];"));
        assert!(dot.contains("B1 -> B3 [color=\"red\"];"));
        assert!(dot.contains("B0 -> B1 [color=\"black\"];"));
        assert!(dot.ends_with("}\n"));
    }
}
