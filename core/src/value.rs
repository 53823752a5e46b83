//! Tagged configuration values and write priorities.
//!
//! Every option in a [`ConfigStore`](crate::ConfigStore) holds a value from
//! the closed set of variants in [`Value`]. Producers (a command-line parser,
//! a config-file merger, direct caller writes) all speak `Value`; the slot
//! decides whether the variant fits its declared type.
//!
//! [`Priority`] is the arbitration rank attached to each write. A write only
//! replaces the stored value when its priority is strictly greater than the
//! rank of the value currently held, so the highest-priority source wins
//! regardless of write order.

use std::fmt;

/// The semantic type of a [`Value`] or an option slot.
///
/// # Examples
///
/// ```
/// use confstack_core::{Value, ValueKind};
///
/// assert_eq!(Value::Int(3).kind(), ValueKind::Int);
/// assert_eq!(ValueKind::List.to_string(), "string list");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Floating-point number.
    Float,
    /// String (also the kind reported by enum-over-strings options).
    Str,
    /// Accumulating list of strings.
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::List => "string list",
        };
        f.write_str(name)
    }
}

/// A typed configuration value.
///
/// The set of variants is closed: everything the store can hold is one of
/// these, and slots match on the variant at write time instead of
/// downcasting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(String),
    /// List-of-strings value.
    List(Vec<String>),
}

impl Value {
    /// Returns the kind tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the raw value for error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::List(v) => write!(f, "{}", v.join(",")),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::List(v)
    }
}

/// Arbitration rank of a write.
///
/// Higher ranks win. The rank of a slot that still holds its default is
/// [`Priority::NONE`], so any real write replaces a default. [`Priority::MAX`]
/// is reserved for forced writes that no later source may override.
///
/// # Examples
///
/// ```
/// use confstack_core::Priority;
///
/// assert!(Priority(2) > Priority(1));
/// assert!(Priority(0) > Priority::NONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub i32);

impl Priority {
    /// The rank of a default value; every real priority outranks it.
    pub const NONE: Priority = Priority(i32::MIN);
    /// The highest possible rank, used by forced writes.
    pub const MAX: Priority = Priority(i32::MAX);
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
