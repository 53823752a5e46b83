//! Value extractors: strategies that turn tokens into typed option values.
//!
//! Each extractor knows two things: how to consume tokens from a
//! [`TokenStream`] to produce a [`Value`], and how to render its own usage
//! fragment for the target option. The parser binds one extractor to each
//! flag and positional spec.

use confstack_core::{OptionSlot, Value};

use crate::error::ParseError;
use crate::tokens::TokenStream;

/// A token-consumption strategy producing one typed value.
pub trait Extractor {
    /// Renders the usage fragment for `option` (e.g. `<count>`, `tar|zip`).
    fn usage(&self, option: &OptionSlot) -> String;

    /// Consumes tokens and produces a value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExpectedArgument`] when the stream runs out,
    /// or an extractor-specific conversion error.
    fn extract(&self, args: &mut TokenStream) -> Result<Value, ParseError>;
}

/// Ignores the stream and yields a fixed value.
///
/// This is the strategy behind presence flags: `--verbose` carries no value
/// token, it just writes `true`.
///
/// # Examples
///
/// ```
/// use confstack_args::{ConstValue, Extractor, TokenStream};
/// use confstack_core::Value;
///
/// let mut args = TokenStream::new(["untouched"]);
/// let value = ConstValue::of(true).extract(&mut args).unwrap();
/// assert_eq!(value, Value::Bool(true));
/// assert_eq!(args.pop().unwrap(), "untouched");
/// ```
#[derive(Debug, Clone)]
pub struct ConstValue(Value);

impl ConstValue {
    /// Creates a constant extractor for `value`.
    pub fn of(value: impl Into<Value>) -> Self {
        Self(value.into())
    }
}

impl Extractor for ConstValue {
    fn usage(&self, _option: &OptionSlot) -> String {
        String::new()
    }

    fn extract(&self, _args: &mut TokenStream) -> Result<Value, ParseError> {
        Ok(self.0.clone())
    }
}

/// Pops one token and parses it as an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntValue;

impl Extractor for IntValue {
    fn usage(&self, option: &OptionSlot) -> String {
        format!("<{}>", option.name())
    }

    fn extract(&self, args: &mut TokenStream) -> Result<Value, ParseError> {
        let token = args.pop()?;
        token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ParseError::InvalidArgument(format!("'{token}' is not a valid integer")))
    }
}

/// Pops one token verbatim.
///
/// When the target option is an enum, the usage fragment lists the members
/// joined by `|` instead of `<name>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValue;

impl Extractor for StringValue {
    fn usage(&self, option: &OptionSlot) -> String {
        match option.enum_members() {
            Some(members) => members.join("|"),
            None => format!("<{}>", option.name()),
        }
    }

    fn extract(&self, args: &mut TokenStream) -> Result<Value, ParseError> {
        Ok(Value::Str(args.pop()?))
    }
}

/// Greedily pops tokens into a string list.
///
/// Without a terminator the extractor stops at stream end or at the first
/// token beginning with `-` (left unconsumed). With a terminator it consumes
/// up to and including the terminator token, which is excluded from the
/// result; an exhausted stream without the terminator is an error.
///
/// # Examples
///
/// ```
/// use confstack_args::{Extractor, MultiStringValue, TokenStream};
/// use confstack_core::Value;
///
/// let mut args = TokenStream::new(["a", "b", "-v"]);
/// let value = MultiStringValue::new().extract(&mut args).unwrap();
/// assert_eq!(value, Value::List(vec!["a".into(), "b".into()]));
/// assert_eq!(args.pop().unwrap(), "-v");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiStringValue {
    terminator: Option<String>,
}

impl MultiStringValue {
    /// A greedy extractor that stops at the first leading-dash token.
    pub fn new() -> Self {
        Self::default()
    }

    /// A greedy extractor that consumes until the exact `terminator` token.
    pub fn until(terminator: impl Into<String>) -> Self {
        Self {
            terminator: Some(terminator.into()),
        }
    }
}

impl Extractor for MultiStringValue {
    fn usage(&self, option: &OptionSlot) -> String {
        let mut usage = format!("<{}>...", option.name());
        if let Some(terminator) = &self.terminator {
            usage.push(' ');
            usage.push_str(terminator);
        }
        usage
    }

    fn extract(&self, args: &mut TokenStream) -> Result<Value, ParseError> {
        let mut collected = Vec::new();
        match &self.terminator {
            None => {
                while !args.is_empty() && !args.peek()?.starts_with('-') {
                    collected.push(args.pop()?);
                }
            }
            Some(terminator) => loop {
                if args.is_empty() {
                    return Err(ParseError::MissingTerminator(terminator.clone()));
                }
                let next = args.pop()?;
                if next == *terminator {
                    break;
                }
                collected.push(next);
            },
        }
        Ok(Value::List(collected))
    }
}

#[cfg(test)]
mod tests {
    use confstack_core::OptionSlot;

    use super::*;

    #[test]
    fn test_int_value_parses() {
        let mut args = TokenStream::new(["42"]);
        assert_eq!(IntValue.extract(&mut args).unwrap(), Value::Int(42));
    }

    #[test]
    fn test_int_value_rejects_garbage() {
        let mut args = TokenStream::new(["forty"]);
        match IntValue.extract(&mut args).unwrap_err() {
            ParseError::InvalidArgument(msg) => {
                assert_eq!(msg, "'forty' is not a valid integer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_string_usage_lists_enum_members() {
        let option = OptionSlot::string_enum("format", ["tar", "zip"]);
        assert_eq!(StringValue.usage(&option), "tar|zip");
        let plain = OptionSlot::string("output");
        assert_eq!(StringValue.usage(&plain), "<output>");
    }

    #[test]
    fn test_multi_without_terminator_stops_at_dash() {
        let mut args = TokenStream::new(["x", "y", "-f", "z"]);
        let value = MultiStringValue::new().extract(&mut args).unwrap();
        assert_eq!(value, Value::List(vec!["x".into(), "y".into()]));
        assert_eq!(args.pop().unwrap(), "-f");
    }

    #[test]
    fn test_multi_without_terminator_drains_stream() {
        let mut args = TokenStream::new(["x", "y"]);
        let value = MultiStringValue::new().extract(&mut args).unwrap();
        assert_eq!(value, Value::List(vec!["x".into(), "y".into()]));
        assert!(args.is_empty());
    }

    #[test]
    fn test_multi_with_terminator_excludes_it() {
        let mut args = TokenStream::new(["x", "y", ";", "after"]);
        let value = MultiStringValue::until(";").extract(&mut args).unwrap();
        assert_eq!(value, Value::List(vec!["x".into(), "y".into()]));
        assert_eq!(args.pop().unwrap(), "after");
    }

    #[test]
    fn test_multi_missing_terminator_fails() {
        let mut args = TokenStream::new(["x", "y"]);
        let err = MultiStringValue::until(";").extract(&mut args).unwrap_err();
        assert!(matches!(err, ParseError::MissingTerminator(t) if t == ";"));
    }

    #[test]
    fn test_multi_usage_mentions_terminator() {
        let option = OptionSlot::string_list("inputs");
        assert_eq!(MultiStringValue::new().usage(&option), "<inputs>...");
        assert_eq!(MultiStringValue::until(";").usage(&option), "<inputs>... ;");
    }

    #[test]
    fn test_const_usage_is_empty() {
        let option = OptionSlot::bool("verbose");
        assert_eq!(ConstValue::of(true).usage(&option), "");
    }
}
