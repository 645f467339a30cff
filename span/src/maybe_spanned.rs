use crate::{Span, Spanned};
use std::{fmt, ops::Deref};

#[derive(Debug, Clone, PartialEq)]
pub enum MaybeSpanned<T> {
    WithoutSpan(T),
    WithSpan(Spanned<T>),
}

impl<T> MaybeSpanned<T> {
    pub fn span(&self) -> Option<Span> {
        match self {
            MaybeSpanned::WithoutSpan(_) => None,
            MaybeSpanned::WithSpan(spanned) => Some(spanned.span),
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            MaybeSpanned::WithoutSpan(data) => data,
            MaybeSpanned::WithSpan(spanned) => spanned.data,
        }
    }
}

impl<T> From<(Option<Span>, T)> for MaybeSpanned<T> {
    fn from((span, data): (Option<Span>, T)) -> Self {
        match span {
            Some(span) => MaybeSpanned::WithSpan(Spanned::new(span, data)),
            None => MaybeSpanned::WithoutSpan(data),
        }
    }
}

impl<T> Deref for MaybeSpanned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            MaybeSpanned::WithoutSpan(data) => data,
            MaybeSpanned::WithSpan(spanned) => &spanned.data,
        }
    }
}

impl<T> fmt::Display for MaybeSpanned<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaybeSpanned::WithoutSpan(data) => write!(f, "{}", data),
            MaybeSpanned::WithSpan(spanned) => {
                write!(f, "{}: {}", spanned.span.start_position(), spanned.data)
            }
        }
    }
}
