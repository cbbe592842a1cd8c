// AST (Abstract Syntax Tree) definitions for the Imp interpreter

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Declared type of a variable
///
/// Arrays are fixed-length and hold `int` elements only; the language has
/// no `boolean` arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Boolean,
    IntArray(usize),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Boolean => write!(f, "boolean"),
            Type::IntArray(len) => write!(f, "int[{}]", len),
        }
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
        };
        write!(f, "{}", symbol)
    }
}

/// Logical connectives (`&&`, `||`)
///
/// Both operands are always evaluated; the language has no short-circuit
/// semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

/// Relational and equality operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
        };
        write!(f, "{}", symbol)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

/// Expression nodes
///
/// Every expression evaluates to exactly one tagged value (int or boolean)
/// and has no side effects. Children are exclusively owned; the tree has
/// no sharing and no cycles.
#[derive(Debug, Clone)]
pub enum Expr {
    IntLiteral(i64, SourceLocation),
    BoolLiteral(bool, SourceLocation),
    Variable(String, SourceLocation),
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Logical {
        op: LogicOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Relational {
        op: RelOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    ArrayAccess {
        name: String,
        index: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::IntLiteral(_, loc) => *loc,
            Expr::BoolLiteral(_, loc) => *loc,
            Expr::Variable(_, loc) => *loc,
            Expr::Unary { location, .. } => *location,
            Expr::Binary { location, .. } => *location,
            Expr::Logical { location, .. } => *location,
            Expr::Relational { location, .. } => *location,
            Expr::ArrayAccess { location, .. } => *location,
        }
    }
}

/// A single variable declaration at the head of a block
#[derive(Debug, Clone)]
pub struct Decl {
    pub name: String,
    pub var_type: Type,
    pub location: SourceLocation,
}

/// A brace-delimited block: declarations first, then statements
///
/// Blocks do not open a new scope; every declaration lands in the single
/// flat environment of the run.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub decls: Vec<Decl>,
    pub stmts: Vec<Stmt>,
}

/// Statement nodes
///
/// Statements produce a control signal rather than a value. `If` and
/// `IfElse` are distinct variants so the evaluator never has to test an
/// optional branch.
#[derive(Debug, Clone)]
pub enum Stmt {
    If {
        condition: Expr,
        then_branch: Block,
        location: SourceLocation,
    },
    IfElse {
        condition: Expr,
        then_branch: Block,
        else_branch: Block,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Block,
        location: SourceLocation,
    },
    DoWhile {
        body: Block,
        condition: Expr,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Print {
        expr: Expr,
        location: SourceLocation,
    },
    Assign {
        name: String,
        value: Expr,
        location: SourceLocation,
    },
    AssignElement {
        name: String,
        index: Expr,
        value: Expr,
        location: SourceLocation,
    },
    Block(Block),
}

impl Stmt {
    /// Get the source location of this node, if it has one
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Stmt::If { location, .. }
            | Stmt::IfElse { location, .. }
            | Stmt::While { location, .. }
            | Stmt::DoWhile { location, .. }
            | Stmt::Break { location }
            | Stmt::Print { location, .. }
            | Stmt::Assign { location, .. }
            | Stmt::AssignElement { location, .. } => Some(*location),
            Stmt::Block(_) => None,
        }
    }
}

/// Top-level program structure: one root block
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub block: Block,
}

impl Program {
    pub fn new(block: Block) -> Self {
        Program { block }
    }
}
