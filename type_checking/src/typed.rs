//! The typed program: the result of a successful semantic analysis.
//!
//! Statements and expressions mirror the syntax tree, but names are resolved
//! and every expression carries its `CheckedType`.
use super::type_system::{CheckedType, ClassDefId, ClassTable, Variable};
use ast::{BinaryOp, UnaryOp};
use span::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct TypedProgram {
    /// In source order.
    pub classes: Vec<TypedClass>,
    pub class_table: ClassTable,
}

impl TypedProgram {
    pub fn class(&self, name: &str) -> Option<&TypedClass> {
        self.classes.iter().find(|class| class.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedClass {
    pub id: ClassDefId,
    pub name: String,
    /// Constructors and methods in source order.
    pub members: Vec<TypedMember>,
}

impl TypedClass {
    pub fn methods(&self) -> impl Iterator<Item = &TypedMethod> {
        self.members.iter().filter_map(|member| match member {
            TypedMember::Method(method) => Some(method),
            TypedMember::Constructor(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedMember {
    Constructor(TypedConstructor),
    Method(TypedMethod),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedConstructor {
    pub params: Vec<Variable>,
    pub body: TypedBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedMethod {
    pub name: String,
    pub return_ty: CheckedType,
    pub params: Vec<Variable>,
    pub body: TypedBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedBlock {
    pub statements: Vec<TypedStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedStmt {
    Block(TypedBlock),
    Empty,
    If(TypedExpr, Box<TypedStmt>, Option<Box<TypedStmt>>),
    While(TypedExpr, Box<TypedStmt>),
    For {
        init: Option<Box<TypedStmt>>,
        cond: Option<TypedExpr>,
        step: Option<Box<TypedStmt>>,
        body: Option<Box<TypedStmt>>,
    },
    Expression(TypedExpr),
    Return(Option<TypedExpr>),
    LocalVariableDeclaration(Variable, Option<TypedExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub ty: CheckedType,
    pub span: Span,
}

impl TypedExpr {
    pub fn new(kind: TypedExprKind, ty: CheckedType, span: Span) -> Self {
        TypedExpr { kind, ty, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedExprKind {
    Binary(BinaryOp, Box<TypedExpr>, Box<TypedExpr>),
    Unary(UnaryOp, Box<TypedExpr>),
    /// The target is a `Var` or an `Attribute`.
    Assign(Box<TypedExpr>, Box<TypedExpr>),

    /// `class` is the class declaring the attribute.
    Attribute {
        target: Box<TypedExpr>,
        class: ClassDefId,
        name: String,
    },
    /// `class` is the class declaring the method.
    MethodInvocation {
        target: Box<TypedExpr>,
        class: ClassDefId,
        name: String,
        args: Vec<TypedExpr>,
    },
    NewObject(ClassDefId, Vec<TypedExpr>),
    InstanceOf(Box<TypedExpr>, ClassDefId),
    Cast(CheckedType, Box<TypedExpr>),

    Null,
    Boolean(bool),
    Int(i32),
    String(String),
    Var(Variable),
    GlobalVar(String),
    This,
}
