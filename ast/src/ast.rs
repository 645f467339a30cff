//! The untyped syntax tree handed to the semantic analysis.
//!
//! Every node is wrapped in a `Spanned` that records where in the source file
//! it was parsed from. The tree only carries syntactic structure: names are
//! plain strings and types are unresolved.
//!
//! All nodes can be (de)serialized, which is how trees produced by an external
//! parser enter the compiler.
use serde_derive::{Deserialize, Serialize};
use span::Spanned;
use strum_macros::{Display, EnumDiscriminants};

pub type Ident = Spanned<String>;

/// This is the top-level AST node. It stores all class declarations of the
/// MiniJava program.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Program {
    pub classes: Vec<Spanned<ClassDeclaration>>,
}

/// This AST node stores the Class declaration, which consists of a name, an
/// optional superclass name and the members of the class.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ClassDeclaration {
    pub name: Ident,
    #[serde(default)]
    pub superclass: Option<Ident>,
    pub members: Vec<Spanned<ClassMember>>,
}

/// This AST node describes a class member. Variants of class members are
/// defined in `ClassMemberKind`. Every class member has a name; the name of a
/// constructor is the name of its class.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ClassMember {
    pub kind: ClassMemberKind,
    pub name: Ident,
}

pub type ParameterList = Vec<Spanned<Parameter>>;

/// A class member is either one of
/// * `Attribute(type)`: a declaration of an attribute of a class
/// * `Constructor(params, body)`: the constructor of a class
/// * `Method(return type, params, body)`: a method of a class. A missing
/// return type means `void`.
#[derive(EnumDiscriminants, Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[strum_discriminants(derive(Display))]
pub enum ClassMemberKind {
    Attribute(Spanned<Type>),
    Constructor(Spanned<ParameterList>, Spanned<Block>),
    Method(
        Option<Spanned<Type>>,
        Spanned<ParameterList>,
        Spanned<Block>,
    ),
}

/// This AST node represents a method parameter. A parameter consists of a
/// `Type` and a name.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub ty: Spanned<Type>,
    pub name: Ident,
}

/// A `Type` is either one of
/// * `Int`: a 32-bit integer
/// * `Boolean`: a boolean
/// * `Class`: a class name, resolved during semantic analysis
#[derive(EnumDiscriminants, Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[strum_discriminants(derive(Display))]
pub enum Type {
    Int,
    Boolean,
    Class(String),
}

/// A `Block` in the AST is basically just a vector of statements.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Spanned<Stmt>>,
}

/// A statement can have one of the kinds:
/// * `Block`: A block defined in `Block`
/// * `Empty`: An empty statement: `;`
/// * `If`: a if expression consisting of the condition, its body and
/// optionally an else statement
/// * `Expression`: an expression defined in `Expr`
/// * `While`: a while loop consisting of the condition and its body
/// * `For`: a for loop, all four parts are optional
/// * `Return`: a return which can optionally return an expression
/// * `LocalVariableDeclaration`: a declaration and optional initialization of
/// a local variable
#[derive(EnumDiscriminants, Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[strum_discriminants(derive(Display))]
pub enum Stmt {
    Block(Spanned<Block>),
    Empty,
    If(
        Box<Spanned<Expr>>,
        Box<Spanned<Stmt>>,
        Option<Box<Spanned<Stmt>>>,
    ),
    While(Box<Spanned<Expr>>, Box<Spanned<Stmt>>),
    For {
        init: Option<Box<Spanned<Stmt>>>,
        cond: Option<Box<Spanned<Expr>>>,
        step: Option<Box<Spanned<Stmt>>>,
        body: Option<Box<Spanned<Stmt>>>,
    },
    Expression(Box<Spanned<Expr>>),
    Return(Option<Box<Spanned<Expr>>>),
    LocalVariableDeclaration(Spanned<Type>, Ident, Option<Box<Spanned<Expr>>>),
}

/// An expression is either one of
/// * `Binary`: one of the binary operations defined in `BinaryOp`, including
/// assignment
/// * `Unary`: one of the unary operations defined in `UnaryOp`
/// * `MethodInvocation`: a method invocation on a primary expression:
/// `foo.method()`
/// * `ThisMethodInvocation`: a method invocation without receiver, i.e. on
/// `this`
/// * `FieldAccess`: a field access on a primary expression: `foo.bar`
/// * `InstanceOf`: `foo instanceof Bar`
/// * `Cast`: `(Bar) foo`
///
/// and the primary expressions `null`, literals, `this`, variable uses and
/// object creation: `new Foo(args)`.
#[derive(EnumDiscriminants, Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[strum_discriminants(derive(Display))]
pub enum Expr {
    Binary(BinaryOp, Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Unary(UnaryOp, Box<Spanned<Expr>>),

    // Postfix ops
    MethodInvocation(Box<Spanned<Expr>>, Ident, Spanned<ArgumentList>),
    FieldAccess(Box<Spanned<Expr>>, Ident),
    InstanceOf(Box<Spanned<Expr>>, Ident),
    Cast(Spanned<Type>, Box<Spanned<Expr>>),

    // The old primary expressions
    Null,
    Boolean(bool),
    Int(i32),
    String(String),
    Var(Ident),
    ThisMethodInvocation(Ident, Spanned<ArgumentList>),
    This,
    NewObject(Ident, Spanned<ArgumentList>),
}

/// Binary operations like comparisons (`==`, `!=`, `<=`, ...), logical
/// operations (`||`, `&&`), algebraic operation (`+`, `-`, `*`, `/`, `%`) or
/// assignment.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, Serialize, Deserialize)]
pub enum BinaryOp {
    #[strum(serialize = "=")]
    Assign,

    #[strum(serialize = "==")]
    Equals,
    #[strum(serialize = "!=")]
    NotEquals,
    #[strum(serialize = "<")]
    LessThan,
    #[strum(serialize = ">")]
    GreaterThan,
    #[strum(serialize = "<=")]
    LessEquals,
    #[strum(serialize = ">=")]
    GreaterEquals,

    #[strum(serialize = "||")]
    LogicalOr,
    #[strum(serialize = "&&")]
    LogicalAnd,

    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "%")]
    Mod,
}

/// One of the unary operations `!` and `-`
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, Serialize, Deserialize)]
pub enum UnaryOp {
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "-")]
    Neg,
}

pub type ArgumentList = Vec<Spanned<Expr>>;

impl ClassMemberKind {
    pub fn is_method(&self) -> bool {
        use self::ClassMemberKind::*;
        match self {
            Method(_, _, _) => true,
            Constructor(_, _) | Attribute(_) => false,
        }
    }
}

impl BinaryOp {
    pub fn is_arithmetic(self) -> bool {
        use self::BinaryOp::*;
        match self {
            Add | Sub | Mul | Div | Mod => true,
            _ => false,
        }
    }

    pub fn is_ordering(self) -> bool {
        use self::BinaryOp::*;
        match self {
            LessThan | GreaterThan | LessEquals | GreaterEquals => true,
            _ => false,
        }
    }

    pub fn is_equality(self) -> bool {
        use self::BinaryOp::*;
        match self {
            Equals | NotEquals => true,
            _ => false,
        }
    }

    pub fn is_logical(self) -> bool {
        use self::BinaryOp::*;
        match self {
            LogicalOr | LogicalAnd => true,
            _ => false,
        }
    }
}
