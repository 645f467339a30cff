pub mod color;

/// Like `assert!(matches!(..))`, but prints the offending value on failure.
///
/// ```
/// use utils::assert_matches;
///
/// let result: Result<u8, ()> = Ok(3);
/// assert_matches!(result, Ok(1..=5));
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($expression: expr, $( $pattern: pat )|*) => {{
        match $expression {
            $( $pattern )|* => (),
            expression => panic!(
                r#"assertion failed: `(if let pattern = expression), {}:{}:{}`
pattern: `{}`,
expression: `{:?}`"#,
                file!(),
                line!(),
                column!(),
                stringify!($( $pattern )|*),
                expression
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn assert_matches_accepts_alternatives() {
        let value = Some(2);
        assert_matches!(value, Some(1) | Some(2));
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn assert_matches_panics_on_mismatch() {
        let value: Option<u8> = None;
        assert_matches!(value, Some(_));
    }
}
