//! Source locations attached to syntax nodes and semantic errors.
//!
//! The abstractions `Position` and `Span` describe a single character,
//! respectively a range of characters, of the source file a syntax tree was
//! parsed from. The syntax tree is produced outside of this workspace, so
//! unlike a lexer-side span these types do not borrow the source text; they
//! only carry line and column information.
pub mod maybe_spanned;
pub mod position;
pub mod span;
pub mod spanned;

pub use self::{maybe_spanned::MaybeSpanned, position::Position, span::Span, spanned::Spanned};
