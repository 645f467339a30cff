//! Semantic analysis of mini-Java programs.
//!
//! `check` turns an untyped `ast::Program` into a `TypedProgram` in which every
//! name is resolved and every expression carries its type, or reports the first
//! semantic error.
#![warn(rust_2018_idioms)]
#![warn(clippy::print_stdout)]

mod builtin_types;
pub mod checker;
mod class_checker;
mod declaration;
mod expr_typechecker;
mod inheritance;
mod main_validator;
mod method_body_type_checker;
pub mod print;
pub mod semantics;
pub mod suggest;
pub mod type_system;
pub mod typed;

pub use self::{
    builtin_types::BuiltinTypes,
    checker::{check, SemanticContext},
    declaration::MAIN_CLASS,
    main_validator::MAIN_METHOD,
    semantics::{SemanticError, SemanticWarning, TypingError},
    type_system::{CheckedType, ClassDefId, ClassTable},
    typed::TypedProgram,
};
