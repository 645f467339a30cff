use crate::{MaybeSpanned, Span};
use serde_derive::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub span: Span,
    pub data: T,
}

impl<T> Eq for Spanned<T> where T: Eq {}
impl<T> PartialEq for Spanned<T>
where
    T: PartialEq,
{
    /// This only compares the `data`! I.e. two `Spanned`s are equal even if
    /// they point to two different spans in the source file, as long as the
    /// content is the same.
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T> Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> fmt::Display for Spanned<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.data, self.span)
    }
}

impl<T> Spanned<T> {
    pub fn new(span: Span, value: T) -> Self {
        Spanned { span, data: value }
    }

    pub fn map<U, F>(&self, f: F) -> Spanned<U>
    where
        F: FnOnce(&T) -> U,
    {
        Spanned {
            span: self.span,
            data: f(&self.data),
        }
    }
}

impl<'b, T: 'b> From<&'b Spanned<T>> for MaybeSpanned<&'b dyn fmt::Display>
where
    T: fmt::Display,
{
    fn from(spanned: &'b Spanned<T>) -> Self {
        MaybeSpanned::WithSpan(Spanned {
            span: spanned.span,
            data: &spanned.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn equality_ignores_span() {
        let a = Spanned::new(Span::from_single_position(Position::new(1, 1)), "x");
        let b = Spanned::new(Span::from_single_position(Position::new(9, 4)), "x");
        assert_eq!(a, b);
    }

    #[test]
    fn deserializes_span_and_data() {
        let spanned: Spanned<String> =
            serde_json::from_str(r#"{"span":{"start":[2,5],"end":[2,7]},"data":"foo"}"#).unwrap();
        assert_eq!("foo", spanned.as_str());
        assert_eq!(Position::new(2, 5), spanned.span.start_position());
    }
}
