//! Owned C abstract syntax tree consumed by the graph builder.
//!
//! This module models the node taxonomy a C front end hands over after parsing:
//! function definitions, declarations, compound statements, the structured control
//! statements and the expression shapes that appear inside them. There is no
//! parser here; trees are assembled by a front end or with the convenience
//! constructors on [`Node`].
//!
//! # Key Components
//!
//! - [`TranslationUnit`] - The top-level sequence of external declarations
//! - [`Node`] - A single statement or expression
//! - [`BinaryOperator`], [`UnaryOperator`], [`AssignOperator`] - Operator spellings
//! - [`printer`] - C source rendering of single statements (`impl Display for Node`)
//! - [`rename`] - Identifier substitution used by the SSA renaming walk
//!
//! # Examples
//!
//! ```rust
//! use c_lang_ssa::ast::{BinaryOperator, Node};
//!
//! // y = y - 1
//! let stmt = Node::assign(
//!     Node::id("y"),
//!     Node::binary(BinaryOperator::Sub, Node::id("y"), Node::int(1)),
//! );
//! assert_eq!(stmt.to_string(), "y = y - 1");
//! assert_eq!(stmt.kind(), "Assignment");
//! ```

pub mod printer;
pub mod rename;

pub use rename::{rename_identifier, rewrite_identifiers};

use strum::{Display, EnumString, IntoStaticStr};

/// Binary operators with their C spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum BinaryOperator {
    /// `+`
    #[strum(serialize = "+")]
    Add,
    /// `-`
    #[strum(serialize = "-")]
    Sub,
    /// `*`
    #[strum(serialize = "*")]
    Mul,
    /// `/`
    #[strum(serialize = "/")]
    Div,
    /// `%`
    #[strum(serialize = "%")]
    Mod,
    /// `<`
    #[strum(serialize = "<")]
    Lt,
    /// `<=`
    #[strum(serialize = "<=")]
    Le,
    /// `>`
    #[strum(serialize = ">")]
    Gt,
    /// `>=`
    #[strum(serialize = ">=")]
    Ge,
    /// `==`
    #[strum(serialize = "==")]
    Eq,
    /// `!=`
    #[strum(serialize = "!=")]
    Ne,
    /// `&&`
    #[strum(serialize = "&&")]
    And,
    /// `||`
    #[strum(serialize = "||")]
    Or,
    /// `&`
    #[strum(serialize = "&")]
    BitAnd,
    /// `|`
    #[strum(serialize = "|")]
    BitOr,
    /// `^`
    #[strum(serialize = "^")]
    BitXor,
    /// `<<`
    #[strum(serialize = "<<")]
    Shl,
    /// `>>`
    #[strum(serialize = ">>")]
    Shr,
}

/// Unary operators.
///
/// Postfix increment and decrement use the `p++`/`p--` spelling so they can be
/// told apart from the prefix forms when parsed from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum UnaryOperator {
    /// `-x`
    #[strum(serialize = "-")]
    Neg,
    /// `+x`
    #[strum(serialize = "+")]
    Plus,
    /// `!x`
    #[strum(serialize = "!")]
    Not,
    /// `~x`
    #[strum(serialize = "~")]
    BitNot,
    /// `*x`
    #[strum(serialize = "*")]
    Deref,
    /// `&x`
    #[strum(serialize = "&")]
    AddrOf,
    /// `++x`
    #[strum(serialize = "++")]
    PreInc,
    /// `--x`
    #[strum(serialize = "--")]
    PreDec,
    /// `x++`
    #[strum(serialize = "p++")]
    PostInc,
    /// `x--`
    #[strum(serialize = "p--")]
    PostDec,
    /// `sizeof(x)`
    #[strum(serialize = "sizeof")]
    Sizeof,
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum AssignOperator {
    /// `=`
    #[strum(serialize = "=")]
    Assign,
    /// `+=`
    #[strum(serialize = "+=")]
    AddAssign,
    /// `-=`
    #[strum(serialize = "-=")]
    SubAssign,
    /// `*=`
    #[strum(serialize = "*=")]
    MulAssign,
    /// `/=`
    #[strum(serialize = "/=")]
    DivAssign,
    /// `%=`
    #[strum(serialize = "%=")]
    ModAssign,
}

/// Initializer clause of a `for` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForInit {
    /// `for (int i = 0, j = 1; ...)`
    Decls(Vec<Node>),
    /// `for (i = 0; ...)`
    Expr(Box<Node>),
}

impl ForInit {
    /// Returns the statements the initializer contributes to the loop's init block.
    #[must_use]
    pub fn statements(&self) -> Vec<Node> {
        match self {
            ForInit::Decls(decls) => decls.clone(),
            ForInit::Expr(expr) => vec![expr.as_ref().clone()],
        }
    }
}

/// A C statement or expression.
///
/// The variant name doubles as the node kind reported in diagnostics
/// (see [`Node::kind`]).
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum Node {
    /// A function definition; `decl` is a [`Node::FuncDecl`], `body` a [`Node::Compound`].
    FuncDef {
        /// The function declarator
        decl: Box<Node>,
        /// The function body
        body: Box<Node>,
    },
    /// A function declarator: return type, name and optional parameter list.
    FuncDecl {
        /// Function name
        name: String,
        /// Return type spelling
        ty: String,
        /// A [`Node::ParamList`], absent for `f()`
        params: Option<Box<Node>>,
    },
    /// Formal parameters of a function, each a [`Node::Decl`].
    ParamList {
        /// The parameter declarations
        params: Vec<Node>,
    },
    /// A variable declaration with an optional initializer.
    Decl {
        /// Declared variable name
        name: String,
        /// Type spelling
        ty: String,
        /// Initializer expression
        init: Option<Box<Node>>,
    },
    /// `{ ... }`
    Compound {
        /// Block items in source order
        items: Vec<Node>,
    },
    /// `if (cond) then_branch else else_branch`
    If {
        /// Branch condition
        cond: Box<Node>,
        /// Statement executed when the condition holds
        then_branch: Box<Node>,
        /// Optional `else` statement
        else_branch: Option<Box<Node>>,
    },
    /// `while (cond) body`
    While {
        /// Loop condition
        cond: Box<Node>,
        /// Loop body
        body: Box<Node>,
    },
    /// `for (init; cond; next) body`
    For {
        /// Initializer clause
        init: Option<ForInit>,
        /// Loop condition, absent for `for (;;)`
        cond: Option<Box<Node>>,
        /// Step expression
        next: Option<Box<Node>>,
        /// Loop body
        body: Box<Node>,
    },
    /// `return expr;`
    Return {
        /// Returned expression
        expr: Option<Box<Node>>,
    },
    /// `break;`
    Break,
    /// `continue;`
    Continue,
    /// `left op right`
    BinaryOp {
        /// Operator
        op: BinaryOperator,
        /// Left operand
        left: Box<Node>,
        /// Right operand
        right: Box<Node>,
    },
    /// `op operand`
    UnaryOp {
        /// Operator
        op: UnaryOperator,
        /// Operand
        operand: Box<Node>,
    },
    /// `lvalue op rvalue`
    Assignment {
        /// Operator
        op: AssignOperator,
        /// Assignment target
        lvalue: Box<Node>,
        /// Assigned value
        rvalue: Box<Node>,
    },
    /// A plain identifier.
    #[strum(serialize = "ID")]
    Id {
        /// Identifier name
        name: String,
    },
    /// A literal constant.
    Constant {
        /// Type spelling of the literal
        ty: String,
        /// Literal text
        value: String,
    },
    /// `name(args...)`
    FuncCall {
        /// Callee name
        name: String,
        /// Call arguments
        args: Vec<Node>,
    },
}

impl Node {
    /// Returns the node kind name, e.g. `"Decl"` or `"While"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Creates an identifier.
    pub fn id(name: impl Into<String>) -> Self {
        Node::Id { name: name.into() }
    }

    /// Creates an `int` constant.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Node::constant("int", value.to_string())
    }

    /// Creates a constant of any type.
    pub fn constant(ty: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Constant {
            ty: ty.into(),
            value: value.into(),
        }
    }

    /// Creates a binary operation.
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Node, right: Node) -> Self {
        Node::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a unary operation.
    #[must_use]
    pub fn unary(op: UnaryOperator, operand: Node) -> Self {
        Node::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    /// Creates a plain `lvalue = rvalue` assignment.
    #[must_use]
    pub fn assign(lvalue: Node, rvalue: Node) -> Self {
        Node::assign_op(AssignOperator::Assign, lvalue, rvalue)
    }

    /// Creates a compound assignment such as `x += 1`.
    #[must_use]
    pub fn assign_op(op: AssignOperator, lvalue: Node, rvalue: Node) -> Self {
        Node::Assignment {
            op,
            lvalue: Box::new(lvalue),
            rvalue: Box::new(rvalue),
        }
    }

    /// Creates a declaration `ty name = init`.
    pub fn decl(ty: impl Into<String>, name: impl Into<String>, init: Option<Node>) -> Self {
        Node::Decl {
            name: name.into(),
            ty: ty.into(),
            init: init.map(Box::new),
        }
    }

    /// Creates a compound statement.
    #[must_use]
    pub fn compound(items: Vec<Node>) -> Self {
        Node::Compound { items }
    }

    /// Creates an `if` statement without an `else` branch.
    #[must_use]
    pub fn if_then(cond: Node, then_branch: Node) -> Self {
        Node::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: None,
        }
    }

    /// Creates an `if`/`else` statement.
    #[must_use]
    pub fn if_else(cond: Node, then_branch: Node, else_branch: Node) -> Self {
        Node::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
        }
    }

    /// Creates a `while` loop.
    #[must_use]
    pub fn while_loop(cond: Node, body: Node) -> Self {
        Node::While {
            cond: Box::new(cond),
            body: Box::new(body),
        }
    }

    /// Creates a `for` loop.
    #[must_use]
    pub fn for_loop(init: Option<ForInit>, cond: Option<Node>, next: Option<Node>, body: Node) -> Self {
        Node::For {
            init,
            cond: cond.map(Box::new),
            next: next.map(Box::new),
            body: Box::new(body),
        }
    }

    /// Creates a `return` statement.
    #[must_use]
    pub fn ret(expr: Option<Node>) -> Self {
        Node::Return {
            expr: expr.map(Box::new),
        }
    }

    /// Creates a function call expression.
    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::FuncCall {
            name: name.into(),
            args,
        }
    }

    /// Creates an `int`-returning function definition.
    ///
    /// # Arguments
    ///
    /// * `name` - Function name
    /// * `params` - Parameter declarations; an empty list produces `name()`
    /// * `body` - Statements of the function body
    pub fn function(name: impl Into<String>, params: Vec<Node>, body: Vec<Node>) -> Self {
        let params = if params.is_empty() {
            None
        } else {
            Some(Box::new(Node::ParamList { params }))
        };

        Node::FuncDef {
            decl: Box::new(Node::FuncDecl {
                name: name.into(),
                ty: "int".to_string(),
                params,
            }),
            body: Box::new(Node::compound(body)),
        }
    }

    /// Returns the function name of a [`Node::FuncDef`] or [`Node::FuncDecl`].
    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Node::FuncDef { decl, .. } => decl.function_name(),
            Node::FuncDecl { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the formal parameters of a [`Node::FuncDef`] or [`Node::FuncDecl`].
    ///
    /// Returns an empty slice for every other node and for functions without a
    /// parameter list.
    #[must_use]
    pub fn function_params(&self) -> &[Node] {
        match self {
            Node::FuncDef { decl, .. } => decl.function_params(),
            Node::FuncDecl {
                params: Some(params),
                ..
            } => match params.as_ref() {
                Node::ParamList { params } => params,
                _ => &[],
            },
            _ => &[],
        }
    }

    /// Returns the variable this statement defines.
    ///
    /// A declaration defines its declared name; an assignment defines its target
    /// when the target is a plain identifier. Every other statement defines nothing.
    #[must_use]
    pub fn defined_variable(&self) -> Option<&str> {
        match self {
            Node::Decl { name, .. } => Some(name),
            Node::Assignment { lvalue, .. } => match lvalue.as_ref() {
                Node::Id { name } => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// Replaces the variable this statement defines.
    ///
    /// Does nothing for statements where [`Node::defined_variable`] returns `None`.
    pub fn set_defined_variable(&mut self, new_name: impl Into<String>) {
        match self {
            Node::Decl { name, .. } => *name = new_name.into(),
            Node::Assignment { lvalue, .. } => {
                if let Node::Id { name } = lvalue.as_mut() {
                    *name = new_name.into();
                }
            }
            _ => {}
        }
    }
}

/// A parsed C translation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Top-level declarations in source order.
    pub ext: Vec<Node>,
}

impl TranslationUnit {
    /// Creates a translation unit from its top-level declarations.
    #[must_use]
    pub fn new(ext: Vec<Node>) -> Self {
        Self { ext }
    }
}
