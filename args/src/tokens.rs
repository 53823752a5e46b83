//! A mutable cursor over raw command-line tokens.

use crate::error::ParseError;

/// A stack-like cursor over argument tokens.
///
/// Tokens come out in their original left-to-right order.
/// [`push_back`](TokenStream::push_back) returns a token to the front for
/// re-consumption, which establishes LIFO order for at most the tokens
/// pushed. The resolver uses this when a token consumed as a flag or branch
/// candidate turns out to belong to a positional.
///
/// # Examples
///
/// ```
/// use confstack_args::TokenStream;
///
/// let mut args = TokenStream::new(["a", "b"]);
/// assert_eq!(args.pop().unwrap(), "a");
/// args.push_back("a");
/// assert_eq!(args.pop().unwrap(), "a");
/// assert_eq!(args.pop().unwrap(), "b");
/// assert!(args.pop().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TokenStream {
    // Reversed: the next token to hand out sits at the end.
    stack: Vec<String>,
}

impl TokenStream {
    /// Builds a stream from tokens in left-to-right order.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stack: Vec<String> = tokens.into_iter().map(Into::into).collect();
        stack.reverse();
        Self { stack }
    }

    /// Removes and returns the next token.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExpectedArgument`] when the stream is exhausted.
    pub fn pop(&mut self) -> Result<String, ParseError> {
        self.stack.pop().ok_or(ParseError::ExpectedArgument)
    }

    /// Returns the next token without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExpectedArgument`] when the stream is exhausted.
    pub fn peek(&self) -> Result<&str, ParseError> {
        self.stack
            .last()
            .map(String::as_str)
            .ok_or(ParseError::ExpectedArgument)
    }

    /// Returns a token to the front of the stream.
    pub fn push_back(&mut self, token: impl Into<String>) {
        self.stack.push(token.into());
    }

    /// Whether any tokens remain.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_preserves_left_to_right_order() {
        let mut args = TokenStream::new(["one", "two", "three"]);
        assert_eq!(args.pop().unwrap(), "one");
        assert_eq!(args.pop().unwrap(), "two");
        assert_eq!(args.pop().unwrap(), "three");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut args = TokenStream::new(["one"]);
        assert_eq!(args.peek().unwrap(), "one");
        assert_eq!(args.pop().unwrap(), "one");
    }

    #[test]
    fn test_exhausted_stream_errors() {
        let mut args = TokenStream::new(Vec::<String>::new());
        assert!(matches!(args.pop(), Err(ParseError::ExpectedArgument)));
        assert!(matches!(args.peek(), Err(ParseError::ExpectedArgument)));
    }

    #[test]
    fn test_push_back_is_lifo_over_stream_order() {
        let mut args = TokenStream::new(["rest"]);
        args.push_back("second");
        args.push_back("first");
        assert_eq!(args.pop().unwrap(), "first");
        assert_eq!(args.pop().unwrap(), "second");
        assert_eq!(args.pop().unwrap(), "rest");
    }
}
