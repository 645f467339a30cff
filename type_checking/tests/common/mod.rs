//! Builders for syntax trees used by the integration tests.
//!
//! Nodes built without an explicit location are placed at `1:1`; since
//! `Spanned` equality ignores spans, only tests asserting on error locations
//! need `at`.
#![allow(dead_code)]

use ast::{BinaryOp, ClassMember, ClassMemberKind, Expr, Parameter, Program, Stmt, Type, UnaryOp};
use diagnostics::Diagnostics;
use span::{Position, Span, Spanned};
use type_checking::{TypedProgram, TypingError};

pub fn at<T>(line: usize, column: usize, data: T) -> Spanned<T> {
    Spanned::new(Span::from_single_position(Position::new(line, column)), data)
}

pub fn sp<T>(data: T) -> Spanned<T> {
    at(1, 1, data)
}

pub fn ident(name: &str) -> ast::Ident {
    sp(name.to_string())
}

pub fn class_ty(name: &str) -> Type {
    Type::Class(name.to_string())
}

pub fn program(classes: Vec<Spanned<ast::ClassDeclaration>>) -> Program {
    Program { classes }
}

pub fn class(
    name: &str,
    superclass: Option<&str>,
    members: Vec<Spanned<ClassMember>>,
) -> Spanned<ast::ClassDeclaration> {
    sp(ast::ClassDeclaration {
        name: ident(name),
        superclass: superclass.map(ident),
        members,
    })
}

pub fn attribute(ty: Type, name: &str) -> Spanned<ClassMember> {
    sp(ClassMember {
        kind: ClassMemberKind::Attribute(sp(ty)),
        name: ident(name),
    })
}

fn params(params: Vec<(Type, &str)>) -> Spanned<ast::ParameterList> {
    sp(params
        .into_iter()
        .map(|(ty, name)| {
            sp(Parameter {
                ty: sp(ty),
                name: ident(name),
            })
        })
        .collect())
}

fn body(statements: Vec<Spanned<Stmt>>) -> Spanned<ast::Block> {
    sp(ast::Block { statements })
}

/// A `None` return type means `void`.
pub fn method(
    return_ty: Option<Type>,
    name: &str,
    parameters: Vec<(Type, &str)>,
    statements: Vec<Spanned<Stmt>>,
) -> Spanned<ClassMember> {
    sp(ClassMember {
        kind: ClassMemberKind::Method(return_ty.map(sp), params(parameters), body(statements)),
        name: ident(name),
    })
}

pub fn constructor(
    class_name: &str,
    parameters: Vec<(Type, &str)>,
    statements: Vec<Spanned<Stmt>>,
) -> Spanned<ClassMember> {
    sp(ClassMember {
        kind: ClassMemberKind::Constructor(params(parameters), body(statements)),
        name: ident(class_name),
    })
}

/// `void main(String args) { statements }`
pub fn main_method(statements: Vec<Spanned<Stmt>>) -> Spanned<ClassMember> {
    method(None, "main", vec![(class_ty("String"), "args")], statements)
}

/// A valid `Main` class whose `main` method consists of `statements`.
pub fn main_class(statements: Vec<Spanned<Stmt>>) -> Spanned<ast::ClassDeclaration> {
    class("Main", None, vec![main_method(statements)])
}

// statements

pub fn expr_stmt(expr: Spanned<Expr>) -> Spanned<Stmt> {
    sp(Stmt::Expression(Box::new(expr)))
}

pub fn local(ty: Type, name: &str, init: Option<Spanned<Expr>>) -> Spanned<Stmt> {
    sp(Stmt::LocalVariableDeclaration(
        sp(ty),
        ident(name),
        init.map(Box::new),
    ))
}

pub fn ret(expr: Option<Spanned<Expr>>) -> Spanned<Stmt> {
    sp(Stmt::Return(expr.map(Box::new)))
}

pub fn empty() -> Spanned<Stmt> {
    sp(Stmt::Empty)
}

pub fn block(statements: Vec<Spanned<Stmt>>) -> Spanned<Stmt> {
    sp(Stmt::Block(body(statements)))
}

pub fn if_stmt(
    cond: Spanned<Expr>,
    then_arm: Spanned<Stmt>,
    else_arm: Option<Spanned<Stmt>>,
) -> Spanned<Stmt> {
    sp(Stmt::If(
        Box::new(cond),
        Box::new(then_arm),
        else_arm.map(Box::new),
    ))
}

pub fn while_stmt(cond: Spanned<Expr>, body: Spanned<Stmt>) -> Spanned<Stmt> {
    sp(Stmt::While(Box::new(cond), Box::new(body)))
}

pub fn for_stmt(
    init: Option<Spanned<Stmt>>,
    cond: Option<Spanned<Expr>>,
    step: Option<Spanned<Stmt>>,
    body: Option<Spanned<Stmt>>,
) -> Spanned<Stmt> {
    sp(Stmt::For {
        init: init.map(Box::new),
        cond: cond.map(Box::new),
        step: step.map(Box::new),
        body: body.map(Box::new),
    })
}

// expressions

pub fn var(name: &str) -> Spanned<Expr> {
    sp(Expr::Var(ident(name)))
}

pub fn int(value: i32) -> Spanned<Expr> {
    sp(Expr::Int(value))
}

pub fn boolean(value: bool) -> Spanned<Expr> {
    sp(Expr::Boolean(value))
}

pub fn string(value: &str) -> Spanned<Expr> {
    sp(Expr::String(value.to_string()))
}

pub fn null() -> Spanned<Expr> {
    sp(Expr::Null)
}

pub fn this() -> Spanned<Expr> {
    sp(Expr::This)
}

pub fn binary(op: BinaryOp, lhs: Spanned<Expr>, rhs: Spanned<Expr>) -> Spanned<Expr> {
    sp(Expr::Binary(op, Box::new(lhs), Box::new(rhs)))
}

pub fn unary(op: UnaryOp, operand: Spanned<Expr>) -> Spanned<Expr> {
    sp(Expr::Unary(op, Box::new(operand)))
}

pub fn assign(target: Spanned<Expr>, value: Spanned<Expr>) -> Spanned<Expr> {
    binary(BinaryOp::Assign, target, value)
}

pub fn field(target: Spanned<Expr>, name: &str) -> Spanned<Expr> {
    sp(Expr::FieldAccess(Box::new(target), ident(name)))
}

pub fn call(target: Spanned<Expr>, name: &str, args: Vec<Spanned<Expr>>) -> Spanned<Expr> {
    sp(Expr::MethodInvocation(Box::new(target), ident(name), sp(args)))
}

pub fn this_call(name: &str, args: Vec<Spanned<Expr>>) -> Spanned<Expr> {
    sp(Expr::ThisMethodInvocation(ident(name), sp(args)))
}

pub fn new_object(class_name: &str, args: Vec<Spanned<Expr>>) -> Spanned<Expr> {
    sp(Expr::NewObject(ident(class_name), sp(args)))
}

pub fn instance_of(target: Spanned<Expr>, class_name: &str) -> Spanned<Expr> {
    sp(Expr::InstanceOf(Box::new(target), ident(class_name)))
}

pub fn cast(ty: Type, target: Spanned<Expr>) -> Spanned<Expr> {
    sp(Expr::Cast(sp(ty), Box::new(target)))
}

/// `System.out.println(arg)`
pub fn println(arg: Spanned<Expr>) -> Spanned<Expr> {
    call(field(var("System"), "out"), "println", vec![arg])
}

// running the analysis

pub fn diagnostics() -> Diagnostics {
    Diagnostics::new(Box::new(termcolor::Buffer::no_color()))
}

pub fn check(program: &Program) -> Result<TypedProgram, TypingError> {
    type_checking::check(program, &diagnostics())
}

/// Checks a program that consists of `classes` plus a valid `Main`.
pub fn check_with_main(mut classes: Vec<Spanned<ast::ClassDeclaration>>) -> Result<TypedProgram, TypingError> {
    classes.push(main_class(vec![]));
    check(&program(classes))
}

/// Checks a program whose `main` method consists of `statements`.
pub fn check_main_body(statements: Vec<Spanned<Stmt>>) -> Result<TypedProgram, TypingError> {
    check(&program(vec![main_class(statements)]))
}

pub fn error_kind(result: Result<TypedProgram, TypingError>) -> type_checking::SemanticError {
    match result {
        Ok(_) => panic!("expected the analysis to fail"),
        Err(err) => err.into_kind(),
    }
}
