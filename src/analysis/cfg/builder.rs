//! Construction of control flow graphs from the AST.
//!
//! The builder descends recursively through a top-level declaration. Every
//! handler returns the entry and exit block of the construct it consumed, and the
//! caller wires those pairs together. A [`TraversalContext`] is threaded down the
//! recursion and replaced at every loop so that `break` and `continue` know where
//! to jump.
//!
//! # Composition Rules
//!
//! - **Function definition**: a labelled header block holding the formal
//!   parameters, linked to the body
//! - **Compound statement**: a leading empty block followed by the children in order
//! - **If/else**: empty block, condition block, both branches, join block
//! - **While**: empty block, condition block, body looping back to the condition,
//!   after-block on the false edge
//! - **For**: init block, condition block, body, step block looping back to the
//!   condition, after-block on the false edge
//! - **Return/break/continue**: final blocks; a final exit never receives a
//!   fall-through edge
//!
//! Nodes without a handler become a single opaque block and are reported as a
//! warning in the builder's [`Diagnostics`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    analysis::cfg::{BlockId, BlockKind, ControlFlowGraph},
    ast::{Node, TranslationUnit},
    config::CfgConfig,
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    Error, LoopJump, Result,
};

/// Entry and exit block of a built construct.
type Span = (BlockId, BlockId);

/// Jump targets visible at a point of the traversal.
///
/// A context is never mutated; entering a loop creates a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalContext {
    /// Where `continue` jumps: the condition block of a `while`, the step block of a `for`.
    pub continue_target: Option<BlockId>,
    /// Where `break` jumps: the after-block of the innermost loop.
    pub break_target: Option<BlockId>,
    /// The function's return sink. Recorded for every top-level entry, `return`
    /// statements do not link to it.
    pub return_sink: BlockId,
}

impl TraversalContext {
    /// Creates the context of a top-level entry.
    #[must_use]
    pub fn new(return_sink: BlockId) -> Self {
        Self {
            continue_target: None,
            break_target: None,
            return_sink,
        }
    }

    /// Creates the context for the body of a loop.
    #[must_use]
    pub fn enter_loop(&self, continue_target: BlockId, break_target: BlockId) -> Self {
        Self {
            continue_target: Some(continue_target),
            break_target: Some(break_target),
            return_sink: self.return_sink,
        }
    }

    fn jump_target(&self, jump: LoopJump) -> Result<BlockId> {
        match jump {
            LoopJump::Continue => self.continue_target,
            LoopJump::Break => self.break_target,
        }
        .ok_or(Error::NotInLoop(jump))
    }
}

/// Builds one [`ControlFlowGraph`] per top-level declaration.
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::{ast::{BinaryOperator, Node, TranslationUnit}, CfgBuilder};
///
/// // int f(int n) { while (n > 0) { n = n - 1; } return n; }
/// let body = vec![
///     Node::while_loop(
///         Node::binary(BinaryOperator::Gt, Node::id("n"), Node::int(0)),
///         Node::compound(vec![Node::assign(
///             Node::id("n"),
///             Node::binary(BinaryOperator::Sub, Node::id("n"), Node::int(1)),
///         )]),
///     ),
///     Node::ret(Some(Node::id("n"))),
/// ];
/// let unit = TranslationUnit::new(vec![Node::function("f", vec![Node::decl("int", "n", None)], body)]);
///
/// let builder = CfgBuilder::new();
/// let graphs = builder.build(&unit)?;
/// assert_eq!(graphs[0].condition_blocks().len(), 1);
/// assert!(!builder.diagnostics().has_any());
/// # Ok::<(), c_lang_ssa::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct CfgBuilder {
    config: CfgConfig,
    diagnostics: Arc<Diagnostics>,
}

impl CfgBuilder {
    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn with_config(config: CfgConfig) -> Self {
        Self {
            config,
            diagnostics: Arc::new(Diagnostics::new()),
        }
    }

    /// Reports into a shared diagnostics container instead of a private one.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CfgConfig {
        &self.config
    }

    /// Returns the diagnostics collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        &self.diagnostics
    }

    /// Builds a graph for every top-level declaration of `unit`, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInLoop`] for a `break` or `continue` outside of a loop,
    /// [`Error::RecursionLimit`] when nesting exceeds [`CfgConfig::max_depth`], and
    /// any error raised by simplification.
    pub fn build(&self, unit: &TranslationUnit) -> Result<Vec<ControlFlowGraph>> {
        unit.ext.iter().map(|node| self.build_entry(node)).collect()
    }

    /// Builds the graph of a single top-level declaration.
    ///
    /// # Errors
    ///
    /// See [`CfgBuilder::build`].
    pub fn build_entry(&self, node: &Node) -> Result<ControlFlowGraph> {
        let mut traversal = Traversal {
            graph: ControlFlowGraph::new(),
            config: &self.config,
            diagnostics: &self.diagnostics,
            function: node.function_name().map(str::to_owned),
        };

        let return_sink = traversal.graph.add_block(BlockKind::Base);
        let (entry, exit) = traversal.traverse(node, TraversalContext::new(return_sink), 0)?;

        let mut graph = traversal.graph;
        graph.set_bounds(entry, exit);
        if let Some(name) = node.function_name() {
            graph.set_name(name);
        }

        debug!(
            function = graph.name().unwrap_or("<anonymous>"),
            blocks = graph.block_count(),
            "built control flow graph"
        );

        if self.config.simplify {
            graph.simplify()?;
        }
        Ok(graph)
    }
}

struct Traversal<'a> {
    graph: ControlFlowGraph,
    config: &'a CfgConfig,
    diagnostics: &'a Diagnostics,
    function: Option<String>,
}

impl Traversal<'_> {
    fn traverse(&mut self, node: &Node, ctx: TraversalContext, depth: usize) -> Result<Span> {
        if depth > self.config.max_depth {
            return Err(Error::RecursionLimit(self.config.max_depth));
        }

        match node {
            Node::FuncDef { decl, body } => self.traverse_func_def(decl, body, ctx, depth),
            Node::FuncDecl { .. }
            | Node::ParamList { .. }
            | Node::Decl { .. }
            | Node::BinaryOp { .. }
            | Node::Assignment { .. } => self.single(node, false),
            Node::Compound { items } => self.traverse_compound(items, ctx, depth),
            Node::If {
                cond,
                then_branch,
                else_branch,
            } => self.traverse_if(cond, then_branch, else_branch.as_deref(), ctx, depth),
            Node::Return { .. } => self.single(node, true),
            Node::While { cond, body } => self.traverse_while(cond, body, ctx, depth),
            Node::For {
                init,
                cond,
                next,
                body,
            } => {
                let init = init.as_ref().map(|init| init.statements()).unwrap_or_default();
                self.traverse_for(init, cond.as_deref(), next.as_deref(), body, ctx, depth)
            }
            Node::Continue => self.traverse_jump(LoopJump::Continue, ctx),
            Node::Break => self.traverse_jump(LoopJump::Break, ctx),
            _ => self.traverse_unknown(node),
        }
    }

    fn single(&mut self, node: &Node, is_final: bool) -> Result<Span> {
        let block = self.graph.add_block(BlockKind::Base);
        self.graph.block_mut(block)?.add_statements([node.clone()]);
        if is_final {
            self.graph.mark_final(block)?;
        }
        Ok((block, block))
    }

    fn is_final(&self, block: BlockId) -> Result<bool> {
        Ok(self.graph.try_block(block)?.is_final())
    }

    fn report(&self, severity: DiagnosticSeverity, category: DiagnosticCategory, message: String, node: &Node) {
        let mut diagnostic = Diagnostic::new(severity, category, message).with_node(node.kind());
        if let Some(function) = &self.function {
            diagnostic = diagnostic.with_function(function.clone());
        }
        self.diagnostics.push(diagnostic);
    }

    fn traverse_unknown(&mut self, node: &Node) -> Result<Span> {
        warn!(
            node = node.kind(),
            function = self.function.as_deref().unwrap_or("<anonymous>"),
            "no handler for node, keeping it as an opaque statement"
        );
        self.report(
            DiagnosticSeverity::Warning,
            DiagnosticCategory::Traversal,
            format!("Unknown node {} kept as an opaque statement: {node}", node.kind()),
            node,
        );
        self.single(node, false)
    }

    fn traverse_func_def(
        &mut self,
        decl: &Node,
        body: &Node,
        ctx: TraversalContext,
        depth: usize,
    ) -> Result<Span> {
        let header = self.graph.add_block(BlockKind::Base);
        {
            let block = self.graph.block_mut(header)?;
            block.label = Some(format!(
                "function {} start",
                decl.function_name().unwrap_or_default()
            ));
            block.add_statements(decl.function_params().iter().cloned());
        }

        let (body_entry, body_exit) = self.traverse(body, ctx, depth + 1)?;
        self.graph.link(header, body_entry)?;
        Ok((header, body_exit))
    }

    fn traverse_compound(&mut self, items: &[Node], ctx: TraversalContext, depth: usize) -> Result<Span> {
        let first = self.graph.add_block(BlockKind::Base);
        let mut current = first;

        for item in items {
            let (entry, exit) = self.traverse(item, ctx, depth + 1)?;
            if self.is_final(current)? {
                self.report(
                    DiagnosticSeverity::Info,
                    DiagnosticCategory::Reachability,
                    format!("Unreachable {} after a jump statement", item.kind()),
                    item,
                );
                continue;
            }
            self.graph.link(current, entry)?;
            current = exit;
        }

        Ok((first, current))
    }

    fn traverse_if(
        &mut self,
        cond: &Node,
        then_branch: &Node,
        else_branch: Option<&Node>,
        ctx: TraversalContext,
        depth: usize,
    ) -> Result<Span> {
        let begin = self.graph.add_block(BlockKind::Base);
        let cond_block = self.graph.add_block(BlockKind::Condition);
        self.graph.link(begin, cond_block)?;
        self.graph.block_mut(cond_block)?.add_statements([cond.clone()]);

        let (left_first, left_last) = self.traverse(then_branch, ctx, depth + 1)?;
        let (right_first, right_last) = match else_branch {
            Some(else_branch) => self.traverse(else_branch, ctx, depth + 1)?,
            None => {
                let empty = self.graph.add_block(BlockKind::Base);
                (empty, empty)
            }
        };

        let join = self.graph.add_block(BlockKind::Base);
        self.graph.link_branches(cond_block, left_first, right_first)?;

        let left_final = self.is_final(left_last)?;
        let right_final = self.is_final(right_last)?;
        if !left_final {
            self.graph.link(left_last, join)?;
        }
        if !right_final {
            self.graph.link(right_last, join)?;
        }
        if left_final && right_final {
            self.graph.mark_final(join)?;
        }

        Ok((begin, join))
    }

    fn traverse_while(&mut self, cond: &Node, body: &Node, ctx: TraversalContext, depth: usize) -> Result<Span> {
        let begin = self.graph.add_block(BlockKind::Base);
        let cond_block = self.graph.add_block(BlockKind::Condition);
        let after = self.graph.add_block(BlockKind::Base);

        self.graph.link(begin, cond_block)?;
        self.graph.block_mut(cond_block)?.add_statements([cond.clone()]);

        let (body_first, body_last) =
            self.traverse(body, ctx.enter_loop(cond_block, after), depth + 1)?;

        self.graph.link_branches(cond_block, body_first, after)?;
        if !self.is_final(body_last)? {
            self.graph.link(body_last, cond_block)?;
        }

        Ok((begin, after))
    }

    fn traverse_for(
        &mut self,
        init: Vec<Node>,
        cond: Option<&Node>,
        next: Option<&Node>,
        body: &Node,
        ctx: TraversalContext,
        depth: usize,
    ) -> Result<Span> {
        let init_block = self.graph.add_block(BlockKind::Base);
        self.graph.block_mut(init_block)?.add_statements(init);

        let cond_block = self.graph.add_block(BlockKind::Condition);
        let cond = cond.cloned().unwrap_or_else(|| Node::int(1));
        self.graph.block_mut(cond_block)?.add_statements([cond]);

        let next_block = self.graph.add_block(BlockKind::Base);
        self.graph.block_mut(next_block)?.add_statements(next.cloned());

        let after = self.graph.add_block(BlockKind::Base);

        let (body_first, body_last) =
            self.traverse(body, ctx.enter_loop(next_block, after), depth + 1)?;

        self.graph.link(init_block, cond_block)?;
        self.graph.link_branches(cond_block, body_first, after)?;
        if !self.is_final(body_last)? {
            self.graph.link(body_last, next_block)?;
        }
        self.graph.link(next_block, cond_block)?;

        Ok((init_block, after))
    }

    fn traverse_jump(&mut self, jump: LoopJump, ctx: TraversalContext) -> Result<Span> {
        let target = ctx.jump_target(jump)?;
        let block = self.graph.add_block(BlockKind::Base);
        self.graph.mark_final(block)?;
        self.graph.link(block, target)?;
        Ok((block, block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, ForInit, UnaryOperator};

    fn raw_builder() -> CfgBuilder {
        CfgBuilder::with_config(CfgConfig::raw())
    }

    fn build_one(builder: &CfgBuilder, body: Vec<Node>) -> Result<ControlFlowGraph> {
        builder.build_entry(&Node::function("f", vec![], body))
    }

    fn lt(name: &str, bound: i64) -> Node {
        Node::binary(BinaryOperator::Lt, Node::id(name), Node::int(bound))
    }

    fn statements(cfg: &ControlFlowGraph, id: BlockId) -> Vec<String> {
        cfg.block(id)
            .unwrap()
            .statements()
            .iter()
            .map(Node::to_string)
            .collect()
    }

    #[test]
    fn test_function_header() {
        let builder = raw_builder();
        let cfg = builder
            .build_entry(&Node::function(
                "main",
                vec![Node::decl("int", "argc", None)],
                vec![],
            ))
            .unwrap();

        let header = cfg.block(cfg.entry()).unwrap();
        assert_eq!(header.label(), Some("function main start"));
        assert_eq!(statements(&cfg, cfg.entry()), vec!["int argc"]);
        assert_eq!(header.successors().len(), 1);
        assert_eq!(cfg.name(), Some("main"));
    }

    #[test]
    fn test_context_enter_loop_keeps_sink() {
        let ctx = TraversalContext::new(BlockId::new(0));
        let inner = ctx.enter_loop(BlockId::new(1), BlockId::new(2));
        assert_eq!(inner.return_sink, BlockId::new(0));
        assert_eq!(inner.continue_target, Some(BlockId::new(1)));
        assert_eq!(ctx.jump_target(LoopJump::Break), Err(Error::NotInLoop(LoopJump::Break)));
    }

    #[test]
    fn test_if_branch_ending_in_return_skips_join() {
        let builder = raw_builder();
        let cfg = build_one(
            &builder,
            vec![Node::if_else(
                Node::id("c"),
                Node::compound(vec![Node::ret(None)]),
                Node::compound(vec![Node::assign(Node::id("a"), Node::int(1))]),
            )],
        )
        .unwrap();

        let cond = cfg.condition_blocks()[0];
        let join = cfg.exit();
        let preds = cfg.block(join).unwrap().predecessors().to_vec();
        assert_eq!(preds.len(), 1);
        assert_eq!(statements(&cfg, preds[0]), vec!["a = 1"]);
        assert_ne!(preds[0], cond);
        assert!(!cfg.block(join).unwrap().is_final());
    }

    #[test]
    fn test_if_with_both_branches_final_has_final_join() {
        let builder = raw_builder();
        let cfg = build_one(
            &builder,
            vec![
                Node::if_else(Node::id("c"), Node::ret(Some(Node::int(1))), Node::ret(Some(Node::int(2)))),
                Node::assign(Node::id("a"), Node::int(3)),
            ],
        )
        .unwrap();

        assert!(cfg.block(cfg.exit()).unwrap().is_final());
        assert!(cfg.block(cfg.exit()).unwrap().predecessors().is_empty());
        assert_eq!(builder.diagnostics().info_count(), 1);
    }

    #[test]
    fn test_missing_else_gets_synthetic_block() {
        let builder = raw_builder();
        let cfg = build_one(&builder, vec![Node::if_then(Node::id("c"), Node::Break)]);
        assert_eq!(cfg.unwrap_err(), Error::NotInLoop(LoopJump::Break));

        let cfg = build_one(&builder, vec![Node::if_then(Node::id("c"), Node::compound(vec![]))]).unwrap();
        let cond = cfg.block(cfg.condition_blocks()[0]).unwrap();
        let synthetic = cfg.block(cond.false_branch().unwrap()).unwrap();
        assert!(synthetic.is_empty());
        assert_eq!(synthetic.successors(), &[cfg.exit()]);
    }

    #[test]
    fn test_while_break_and_continue_targets() {
        let builder = raw_builder();
        let cfg = build_one(
            &builder,
            vec![Node::while_loop(
                lt("i", 10),
                Node::compound(vec![Node::if_else(Node::id("a"), Node::Continue, Node::Break)]),
            )],
        )
        .unwrap();

        let cond = cfg.condition_blocks()[0];
        let after = cfg.exit();
        assert_eq!(cfg.block(cond).unwrap().false_branch(), Some(after));

        let jumps: Vec<&crate::Block> = cfg
            .blocks()
            .filter(|b| b.is_final() && b.is_empty() && b.successors().len() == 1)
            .collect();
        assert_eq!(jumps.len(), 2);
        assert!(jumps.iter().any(|b| b.successors() == [cond]));
        assert!(jumps.iter().any(|b| b.successors() == [after]));
    }

    #[test]
    fn test_for_without_condition_uses_constant() {
        let builder = raw_builder();
        let cfg = build_one(
            &builder,
            vec![Node::for_loop(
                Some(ForInit::Expr(Box::new(Node::assign(Node::id("i"), Node::int(0))))),
                None,
                None,
                Node::compound(vec![Node::Break]),
            )],
        )
        .unwrap();

        let cond = cfg.condition_blocks()[0];
        assert_eq!(statements(&cfg, cond), vec!["1"]);
        assert_eq!(statements(&cfg, cfg.block(cfg.entry()).unwrap().successors()[0]).len(), 0);
        let init = cfg.block(cond).unwrap().predecessors()[0];
        assert_eq!(statements(&cfg, init), vec!["i = 0"]);
    }

    #[test]
    fn test_unknown_node_is_reported() {
        let builder = CfgBuilder::new();
        let cfg = build_one(
            &builder,
            vec![
                Node::unary(UnaryOperator::PostInc, Node::id("i")),
                Node::call("g", vec![Node::id("i")]),
            ],
        )
        .unwrap();

        assert_eq!(builder.diagnostics().warning_count(), 2);
        let first = builder.diagnostics().iter().next().unwrap();
        assert_eq!(first.node, Some("UnaryOp"));
        assert_eq!(first.function.as_deref(), Some("f"));

        let body = cfg.block(cfg.entry()).unwrap();
        let rendered: Vec<String> = body.statements().iter().map(Node::to_string).collect();
        assert_eq!(rendered, vec!["i++", "g(i)"]);
    }

    #[test]
    fn test_recursion_limit() {
        let mut nested = Node::assign(Node::id("a"), Node::int(0));
        for _ in 0..10 {
            nested = Node::compound(vec![nested]);
        }
        let builder = CfgBuilder::with_config(CfgConfig::default().with_max_depth(4));
        assert_eq!(
            build_one(&builder, vec![nested]).unwrap_err(),
            Error::RecursionLimit(4)
        );
    }

    #[test]
    fn test_top_level_declaration_builds_single_block() {
        let builder = CfgBuilder::new();
        let unit = TranslationUnit::new(vec![
            Node::decl("int", "counter", Some(Node::int(0))),
            Node::function("f", vec![], vec![Node::ret(None)]),
        ]);
        let graphs = builder.build(&unit).unwrap();

        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[0].name(), None);
        assert_eq!(graphs[0].block_count(), 1);
        assert_eq!(graphs[1].name(), Some("f"));
    }
}
