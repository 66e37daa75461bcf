//! C source rendering of single statements and expressions.
//!
//! Output follows the usual C generator conventions: declarations and expressions
//! carry no trailing semicolon, jump statements do (`return y;`, `break;`), and
//! non-trivial operands of operators are parenthesized. Control statements render
//! as their header only, since the graph builder never stores them in a block.

use std::fmt::{self, Display, Formatter};

use crate::ast::{Node, UnaryOperator};

/// Identifiers, constants and calls never need parentheses as operands.
fn is_simple(node: &Node) -> bool {
    matches!(
        node,
        Node::Id { .. } | Node::Constant { .. } | Node::FuncCall { .. }
    )
}

struct Operand<'a>(&'a Node);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if is_simple(self.0) {
            write!(f, "{}", self.0)
        } else {
            write!(f, "({})", self.0)
        }
    }
}

fn write_list(f: &mut Formatter<'_>, items: &[Node]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::FuncDef { decl, .. } => write!(f, "{decl}"),
            Node::FuncDecl { name, ty, params } => {
                write!(f, "{ty} {name}(")?;
                if let Some(params) = params {
                    write!(f, "{params}")?;
                }
                f.write_str(")")
            }
            Node::ParamList { params } => write_list(f, params),
            Node::Decl { name, ty, init } => {
                write!(f, "{ty} {name}")?;
                if let Some(init) = init {
                    write!(f, " = {init}")?;
                }
                Ok(())
            }
            Node::Compound { items } => {
                f.write_str("{")?;
                for item in items {
                    write!(f, " {item}")?;
                }
                f.write_str(" }")
            }
            Node::If { cond, .. } => write!(f, "if ({cond})"),
            Node::While { cond, .. } => write!(f, "while ({cond})"),
            Node::For {
                init, cond, next, ..
            } => {
                f.write_str("for (")?;
                if let Some(init) = init {
                    write_list(f, &init.statements())?;
                }
                f.write_str(";")?;
                if let Some(cond) = cond {
                    write!(f, " {cond}")?;
                }
                f.write_str(";")?;
                if let Some(next) = next {
                    write!(f, " {next}")?;
                }
                f.write_str(")")
            }
            Node::Return { expr: Some(expr) } => write!(f, "return {expr};"),
            Node::Return { expr: None } => f.write_str("return;"),
            Node::Break => f.write_str("break;"),
            Node::Continue => f.write_str("continue;"),
            Node::BinaryOp { op, left, right } => {
                write!(f, "{} {op} {}", Operand(left), Operand(right))
            }
            Node::UnaryOp { op, operand } => match op {
                UnaryOperator::PostInc => write!(f, "{}++", Operand(operand)),
                UnaryOperator::PostDec => write!(f, "{}--", Operand(operand)),
                UnaryOperator::Sizeof => write!(f, "sizeof({operand})"),
                _ => write!(f, "{op}{}", Operand(operand)),
            },
            Node::Assignment { op, lvalue, rvalue } => {
                if matches!(rvalue.as_ref(), Node::Assignment { .. }) {
                    write!(f, "{lvalue} {op} ({rvalue})")
                } else {
                    write!(f, "{lvalue} {op} {rvalue}")
                }
            }
            Node::Id { name } => f.write_str(name),
            Node::Constant { value, .. } => f.write_str(value),
            Node::FuncCall { name, args } => {
                write!(f, "{name}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOperator, ForInit, Node, UnaryOperator};

    #[test]
    fn test_declarations() {
        assert_eq!(Node::decl("int", "x", None).to_string(), "int x");
        let decl = Node::decl(
            "int",
            "y",
            Some(Node::binary(BinaryOperator::Add, Node::id("x"), Node::int(1))),
        );
        assert_eq!(decl.to_string(), "int y = x + 1");
    }

    #[test]
    fn test_expressions() {
        let cond = Node::binary(BinaryOperator::Gt, Node::id("y"), Node::int(0));
        assert_eq!(cond.to_string(), "y > 0");

        let nested = Node::binary(
            BinaryOperator::Mul,
            Node::binary(BinaryOperator::Add, Node::id("a"), Node::id("b")),
            Node::id("c"),
        );
        assert_eq!(nested.to_string(), "(a + b) * c");

        let call = Node::call("f", vec![Node::id("a"), Node::int(2)]);
        assert_eq!(call.to_string(), "f(a, 2)");

        assert_eq!(
            Node::unary(UnaryOperator::PostInc, Node::id("i")).to_string(),
            "i++"
        );
        assert_eq!(
            Node::unary(UnaryOperator::Not, cond.clone()).to_string(),
            "!(y > 0)"
        );
        assert_eq!(
            Node::unary(UnaryOperator::Sizeof, Node::id("x")).to_string(),
            "sizeof(x)"
        );
    }

    #[test]
    fn test_statements() {
        let assign = Node::assign(
            Node::id("y"),
            Node::binary(BinaryOperator::Sub, Node::id("y"), Node::int(1)),
        );
        assert_eq!(assign.to_string(), "y = y - 1");
        assert_eq!(Node::ret(Some(Node::id("y"))).to_string(), "return y;");
        assert_eq!(Node::ret(None).to_string(), "return;");
        assert_eq!(Node::Break.to_string(), "break;");
        assert_eq!(Node::Continue.to_string(), "continue;");

        let chained = Node::assign(Node::id("a"), Node::assign(Node::id("b"), Node::int(0)));
        assert_eq!(chained.to_string(), "a = (b = 0)");
    }

    #[test]
    fn test_headers() {
        let func = Node::function(
            "f",
            vec![Node::decl("int", "x", None), Node::decl("int", "y", None)],
            vec![],
        );
        assert_eq!(func.to_string(), "int f(int x, int y)");

        let for_loop = Node::for_loop(
            Some(ForInit::Decls(vec![Node::decl("int", "i", Some(Node::int(0)))])),
            Some(Node::binary(BinaryOperator::Lt, Node::id("i"), Node::int(10))),
            Some(Node::unary(UnaryOperator::PostInc, Node::id("i"))),
            Node::compound(vec![]),
        );
        assert_eq!(for_loop.to_string(), "for (int i = 0; i < 10; i++)");
    }
}
