//! Control flow graph integration tests.
//!
//! These tests build graphs through the public API and check their shape:
//! 1. Assemble a function body from `Node` constructors
//! 2. Build the graph with `CfgBuilder`, raw or simplified
//! 3. Verify blocks, edges, jump wiring and diagnostics

use c_lang_ssa::{
    analysis::cfg::{BlockColor, CfgEdgeKind},
    ast::{BinaryOperator, ForInit, Node, TranslationUnit, UnaryOperator},
    diagnostics::{DiagnosticCategory, DiagnosticSeverity},
    BlockId, CfgBuilder, CfgConfig, ControlFlowGraph, Error, LoopJump, Result,
};

/// Builds `int f() { body }` with the given configuration.
fn build(config: CfgConfig, body: Vec<Node>) -> Result<ControlFlowGraph> {
    let unit = TranslationUnit::new(vec![Node::function("f", vec![], body)]);
    let mut graphs = CfgBuilder::with_config(config).build(&unit)?;
    Ok(graphs.remove(0))
}

/// Renders the statements of a block.
fn lines(cfg: &ControlFlowGraph, id: BlockId) -> Vec<String> {
    cfg.block(id)
        .map(|block| block.statements().iter().map(Node::to_string).collect())
        .unwrap_or_default()
}

/// Follows empty fall-through blocks until a block with statements or a jump.
fn skip_empty(cfg: &ControlFlowGraph, mut id: BlockId) -> BlockId {
    while let Some(block) = cfg.block(id) {
        if !block.is_empty()
            || block.is_final()
            || block.is_condition()
            || block.successors().len() != 1
        {
            break;
        }
        id = block.successors()[0];
    }
    id
}

fn gt(name: &str, value: i64) -> Node {
    Node::binary(BinaryOperator::Gt, Node::id(name), Node::int(value))
}

fn set(name: &str, value: i64) -> Node {
    Node::assign(Node::id(name), Node::int(value))
}

#[test]
fn test_sequencing_collapses_into_one_block() -> Result<()> {
    let cfg = build(
        CfgConfig::default(),
        vec![
            Node::decl("int", "a", Some(Node::int(1))),
            set("a", 2),
            Node::decl("int", "b", Some(Node::binary(BinaryOperator::Mul, Node::id("a"), Node::int(3)))),
            Node::ret(Some(Node::id("b"))),
        ],
    )?;

    assert_eq!(cfg.block_count(), 1);
    assert_eq!(
        lines(&cfg, cfg.entry()),
        vec!["int a = 1", "a = 2", "int b = a * 3", "return b;"]
    );
    assert!(cfg.edges().is_empty());
    assert_eq!(cfg.block(cfg.entry()).unwrap().label(), Some("function f start"));
    Ok(())
}

#[test]
fn test_empty_function_is_single_block() -> Result<()> {
    let cfg = build(CfgConfig::default(), vec![])?;
    assert_eq!(cfg.block_count(), 1);
    assert_eq!(cfg.entry(), cfg.exit());
    Ok(())
}

#[test]
fn test_if_else_shape_before_simplification() -> Result<()> {
    let cfg = build(
        CfgConfig::raw(),
        vec![Node::if_else(
            Node::id("c"),
            Node::compound(vec![set("a", 1)]),
            Node::compound(vec![set("b", 2)]),
        )],
    )?;

    let conditions = cfg.condition_blocks();
    assert_eq!(conditions.len(), 1);
    let cond = cfg.block(conditions[0]).unwrap();
    assert_eq!(lines(&cfg, conditions[0]), vec!["c"]);

    let on_true = cond.true_branch().unwrap();
    let on_false = cond.false_branch().unwrap();
    assert_eq!(cfg.block(on_true).unwrap().color(), BlockColor::TrueBranch);
    assert_eq!(cfg.block(on_false).unwrap().color(), BlockColor::FalseBranch);

    let left = skip_empty(&cfg, on_true);
    let right = skip_empty(&cfg, on_false);
    assert_eq!(lines(&cfg, left), vec!["a = 1"]);
    assert_eq!(lines(&cfg, right), vec!["b = 2"]);

    let join = cfg.block(left).unwrap().successors()[0];
    assert_eq!(cfg.block(right).unwrap().successors(), &[join]);
    assert_eq!(cfg.block(join).unwrap().predecessors(), &[left, right]);
    cfg.validate()?;
    Ok(())
}

#[test]
fn test_if_branch_with_return_never_reaches_join() -> Result<()> {
    let cfg = build(
        CfgConfig::raw(),
        vec![
            Node::if_else(
                Node::id("c"),
                Node::compound(vec![Node::ret(Some(Node::int(1)))]),
                Node::compound(vec![set("b", 2)]),
            ),
            Node::ret(Some(Node::id("b"))),
        ],
    )?;

    let cond = cfg.block(cfg.condition_blocks()[0]).unwrap();
    let ret = skip_empty(&cfg, cond.true_branch().unwrap());
    let block = cfg.block(ret).unwrap();
    assert_eq!(lines(&cfg, ret), vec!["return 1;"]);
    assert!(block.is_final());
    assert!(block.successors().is_empty());
    Ok(())
}

#[test]
fn test_simplified_if_keeps_branch_order() -> Result<()> {
    let cfg = build(
        CfgConfig::default(),
        vec![
            Node::if_else(gt("x", 0), Node::compound(vec![set("a", 1)]), Node::compound(vec![set("a", 2)])),
            Node::ret(Some(Node::id("a"))),
        ],
    )?;

    let cond = cfg.block(cfg.condition_blocks()[0]).unwrap();
    assert_eq!(lines(&cfg, cond.true_branch().unwrap()), vec!["a = 1"]);
    assert_eq!(lines(&cfg, cond.false_branch().unwrap()), vec!["a = 2"]);

    let kinds: Vec<CfgEdgeKind> = cfg
        .edges()
        .iter()
        .filter(|edge| edge.source() == cond.id())
        .map(|edge| edge.kind())
        .collect();
    assert_eq!(kinds, vec![CfgEdgeKind::ConditionalTrue, CfgEdgeKind::ConditionalFalse]);
    cfg.validate()?;
    Ok(())
}

#[test]
fn test_while_back_edge() -> Result<()> {
    let cfg = build(
        CfgConfig::default(),
        vec![
            Node::while_loop(
                gt("n", 0),
                Node::compound(vec![Node::assign(
                    Node::id("n"),
                    Node::binary(BinaryOperator::Sub, Node::id("n"), Node::int(1)),
                )]),
            ),
            Node::ret(Some(Node::id("n"))),
        ],
    )?;

    let cond_id = cfg.condition_blocks()[0];
    let cond = cfg.block(cond_id).unwrap();
    let body = cond.true_branch().unwrap();
    assert_eq!(lines(&cfg, body), vec!["n = n - 1"]);
    assert_eq!(cfg.block(body).unwrap().successors(), &[cond_id]);
    assert_eq!(lines(&cfg, cond.false_branch().unwrap()), vec!["return n;"]);
    assert!(cond.is_join());
    cfg.validate()?;
    Ok(())
}

#[test]
fn test_for_step_runs_before_condition() -> Result<()> {
    let cfg = build(
        CfgConfig::raw(),
        vec![Node::for_loop(
            Some(ForInit::Decls(vec![Node::decl("int", "i", Some(Node::int(0)))])),
            Some(Node::binary(BinaryOperator::Lt, Node::id("i"), Node::int(10))),
            Some(Node::unary(UnaryOperator::PostInc, Node::id("i"))),
            Node::compound(vec![set("s", 1)]),
        )],
    )?;

    let cond_id = cfg.condition_blocks()[0];
    let cond = cfg.block(cond_id).unwrap();
    let body = skip_empty(&cfg, cond.true_branch().unwrap());
    assert_eq!(lines(&cfg, body), vec!["s = 1"]);

    let step = cfg.block(body).unwrap().successors()[0];
    assert_eq!(lines(&cfg, step), vec!["i++"]);
    assert_eq!(cfg.block(step).unwrap().successors(), &[cond_id]);

    let init = cond.predecessors()[0];
    assert_eq!(lines(&cfg, init), vec!["int i = 0"]);
    Ok(())
}

#[test]
fn test_continue_and_break_wiring_in_for() -> Result<()> {
    let cfg = build(
        CfgConfig::raw(),
        vec![Node::for_loop(
            Some(ForInit::Expr(Box::new(set("i", 0)))),
            Some(Node::binary(BinaryOperator::Lt, Node::id("i"), Node::int(10))),
            Some(Node::assign(
                Node::id("i"),
                Node::binary(BinaryOperator::Add, Node::id("i"), Node::int(1)),
            )),
            Node::compound(vec![
                Node::if_then(gt("i", 5), Node::compound(vec![Node::Break])),
                Node::if_then(gt("i", 2), Node::compound(vec![Node::Continue])),
                set("s", 1),
            ]),
        )],
    )?;

    let loop_cond = cfg.condition_blocks()[0];
    let after = cfg.block(loop_cond).unwrap().false_branch().unwrap();
    let step = cfg
        .blocks()
        .find(|block| lines(&cfg, block.id()) == vec!["i = i + 1"])
        .map(|block| block.id())
        .unwrap();

    let jumps: Vec<BlockId> = cfg
        .blocks()
        .filter(|block| block.is_final() && block.is_empty() && block.successors().len() == 1)
        .map(|block| block.id())
        .collect();
    assert_eq!(jumps.len(), 2);
    let targets: Vec<BlockId> = jumps
        .iter()
        .map(|&id| cfg.block(id).unwrap().successors()[0])
        .collect();
    assert!(targets.contains(&after));
    assert!(targets.contains(&step));
    cfg.validate()?;
    Ok(())
}

#[test]
fn test_jump_outside_loop_is_an_error() {
    let err = build(CfgConfig::default(), vec![Node::Continue]).unwrap_err();
    assert_eq!(err, Error::NotInLoop(LoopJump::Continue));
    assert_eq!(err.to_string(), "continue not in a loop");

    let err = build(
        CfgConfig::default(),
        vec![Node::if_then(Node::id("c"), Node::compound(vec![Node::Break]))],
    )
    .unwrap_err();
    assert_eq!(err, Error::NotInLoop(LoopJump::Break));
}

#[test]
fn test_nested_loops_bind_innermost_target() -> Result<()> {
    let cfg = build(
        CfgConfig::raw(),
        vec![Node::while_loop(
            Node::id("a"),
            Node::compound(vec![
                Node::while_loop(Node::id("b"), Node::compound(vec![Node::Break])),
                set("x", 1),
            ]),
        )],
    )?;

    let conditions = cfg.condition_blocks();
    assert_eq!(conditions.len(), 2);
    let inner_after = cfg.block(conditions[1]).unwrap().false_branch().unwrap();
    let brk = skip_empty(&cfg, cfg.block(conditions[1]).unwrap().true_branch().unwrap());
    let brk = cfg.block(brk).unwrap();
    assert!(brk.is_final());
    assert_eq!(brk.successors(), &[inner_after]);
    Ok(())
}

#[test]
fn test_simplify_twice_is_stable() -> Result<()> {
    let body = vec![
        Node::decl("int", "s", Some(Node::int(0))),
        Node::for_loop(
            Some(ForInit::Decls(vec![Node::decl("int", "i", Some(Node::int(0)))])),
            Some(Node::binary(BinaryOperator::Lt, Node::id("i"), Node::int(4))),
            Some(Node::unary(UnaryOperator::PostInc, Node::id("i"))),
            Node::compound(vec![Node::if_else(
                gt("i", 1),
                Node::compound(vec![Node::Continue]),
                Node::compound(vec![set("s", 2)]),
            )]),
        ),
        Node::ret(Some(Node::id("s"))),
    ];

    let once = build(CfgConfig::default(), body)?;
    let mut twice = once.clone();
    twice.simplify()?;

    assert_eq!(twice.reachable(), once.reachable());
    assert_eq!(twice.edges(), once.edges());
    for id in once.reachable() {
        assert_eq!(lines(&twice, id), lines(&once, id));
    }
    twice.validate()?;
    Ok(())
}

#[test]
fn test_simplified_graph_has_no_forwarding_blocks() -> Result<()> {
    let cfg = build(
        CfgConfig::default(),
        vec![
            Node::if_then(Node::id("c"), Node::compound(vec![])),
            Node::while_loop(Node::id("d"), Node::compound(vec![])),
            Node::ret(None),
        ],
    )?;

    for block in cfg.blocks() {
        let forwarding = !block.is_condition()
            && block.is_empty()
            && block.successors().len() == 1
            && block.successors()[0] != block.id()
            && block.id() != cfg.entry();
        assert!(!forwarding, "{} still forwards", block.id());
    }
    cfg.validate()?;
    Ok(())
}

#[test]
fn test_unknown_nodes_and_dead_code_are_diagnosed() -> Result<()> {
    let builder = CfgBuilder::new();
    let unit = TranslationUnit::new(vec![Node::function(
        "f",
        vec![],
        vec![
            Node::call("g", vec![]),
            Node::ret(None),
            set("a", 1),
        ],
    )]);
    builder.build(&unit)?;

    let diagnostics = builder.diagnostics();
    assert_eq!(diagnostics.count(), 2);
    assert_eq!(diagnostics.count_severity(DiagnosticSeverity::Warning), 1);
    assert_eq!(diagnostics.by_category(DiagnosticCategory::Reachability).len(), 1);
    assert_eq!(diagnostics.info_count(), 1);
    Ok(())
}

#[test]
fn test_one_graph_per_top_level_entry() -> Result<()> {
    let unit = TranslationUnit::new(vec![
        Node::function("first", vec![], vec![Node::ret(Some(Node::int(0)))]),
        Node::function("second", vec![Node::decl("int", "p", None)], vec![Node::ret(Some(Node::id("p")))]),
    ]);
    let graphs = CfgBuilder::new().build(&unit)?;

    let names: Vec<_> = graphs.iter().map(ControlFlowGraph::name).collect();
    assert_eq!(names, vec![Some("first"), Some("second")]);
    assert_eq!(lines(&graphs[1], graphs[1].entry()), vec!["int p", "return p;"]);
    Ok(())
}

#[test]
fn test_simplify_long_branch_chain() -> Result<()> {
    let mut body = vec![Node::decl("int", "x", Some(Node::int(0)))];
    body.extend((0..2000).map(|i| Node::if_then(gt("x", i), Node::compound(vec![set("x", i)]))));
    body.push(Node::ret(Some(Node::id("x"))));

    let mut cfg = build(CfgConfig::raw(), body)?;
    let raw_blocks = cfg.block_count();
    cfg.simplify()?;

    assert!(cfg.block_count() < raw_blocks);
    assert_eq!(cfg.condition_blocks().len(), 2000);
    cfg.validate()?;

    let once = cfg.to_dot(None);
    cfg.simplify()?;
    assert_eq!(cfg.to_dot(None), once);
    Ok(())
}
