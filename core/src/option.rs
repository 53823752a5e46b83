//! Option slots: one named, typed value with priority arbitration.
//!
//! A slot is declared once with one of the [`OptionSlot`] constructors and
//! registered in a [`ConfigStore`](crate::ConfigStore). Writes go through
//! [`OptionSlot::write`], which normalizes the incoming [`Value`] for the
//! slot's type and then applies the arbitration rule: replace only when the
//! incoming rank is strictly greater than the stored one. Accumulating
//! list slots are the exception: every write appends, ranks are ignored.

use crate::error::{Result, StoreError};
use crate::value::{Priority, Value, ValueKind};

/// A value together with the rank of the write that produced it.
#[derive(Debug, Clone)]
struct Ranked<T> {
    value: T,
    rank: Priority,
}

impl<T> Ranked<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            rank: Priority::NONE,
        }
    }

    /// Applies one write. `rank == None` means "set the default": the value
    /// is replaced unconditionally and the stored rank stays at
    /// [`Priority::NONE`]. Otherwise the arbitration rule applies.
    fn apply(&mut self, rank: Option<Priority>, value: T) {
        match rank {
            None => self.value = value,
            Some(rank) if rank > self.rank => {
                self.value = value;
                self.rank = rank;
            }
            Some(_) => {}
        }
    }
}

/// Per-type slot state. Closed set: no trait objects, no downcasts.
#[derive(Debug, Clone)]
enum SlotState {
    Bool(Ranked<bool>),
    Int(Ranked<i64>),
    Float(Ranked<f64>),
    Str(Ranked<Option<String>>),
    Enum {
        members: Vec<String>,
        state: Ranked<Option<String>>,
    },
    List(Vec<String>),
}

impl SlotState {
    fn kind(&self) -> ValueKind {
        match self {
            SlotState::Bool(_) => ValueKind::Bool,
            SlotState::Int(_) => ValueKind::Int,
            SlotState::Float(_) => ValueKind::Float,
            SlotState::Str(_) | SlotState::Enum { .. } => ValueKind::Str,
            SlotState::List(_) => ValueKind::List,
        }
    }
}

/// One named, typed option.
///
/// # Examples
///
/// ```
/// use confstack_core::{OptionSlot, Priority, Value};
///
/// let mut level = OptionSlot::int("level");
/// level.write(Priority(1), Value::Int(6)).unwrap();
/// level.write(Priority(0), Value::Int(9)).unwrap(); // lower rank, ignored
/// assert_eq!(level.as_int(), Some(6));
///
/// let format = OptionSlot::string_enum("format", ["tar", "zip"])
///     .with_default("tar")
///     .unwrap();
/// assert_eq!(format.as_str(), Some("tar"));
/// ```
#[derive(Debug, Clone)]
pub struct OptionSlot {
    name: String,
    file_compatible: bool,
    state: SlotState,
}

impl OptionSlot {
    fn new(name: impl Into<String>, state: SlotState) -> Self {
        Self {
            name: name.into(),
            file_compatible: true,
            state,
        }
    }

    /// A boolean option, default `false`.
    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, SlotState::Bool(Ranked::new(false)))
    }

    /// An integer option, default `0`.
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, SlotState::Int(Ranked::new(0)))
    }

    /// A float option, default `0.0`.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, SlotState::Float(Ranked::new(0.0)))
    }

    /// A string option with no default value.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, SlotState::Str(Ranked::new(None)))
    }

    /// An enum-over-strings option with a fixed, case-insensitive member set.
    ///
    /// Members are normalized to lowercase; so is every accepted value.
    pub fn string_enum<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = members
            .into_iter()
            .map(|m| m.into().to_lowercase())
            .collect();
        Self::new(
            name,
            SlotState::Enum {
                members,
                state: Ranked::new(None),
            },
        )
    }

    /// An accumulating list-of-strings option. Writes append; priority does
    /// not apply.
    pub fn string_list(name: impl Into<String>) -> Self {
        Self::new(name, SlotState::List(Vec::new()))
    }

    /// Sets the default value, validating it like a write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidValue`] when the value does not fit the
    /// slot's type, or is outside an enum's member set.
    pub fn with_default(mut self, value: impl Into<Value>) -> Result<Self> {
        self.put(None, value.into())?;
        Ok(self)
    }

    /// Marks the option as command-line only, excluding it from
    /// structured-file merging.
    pub fn cli_only(mut self) -> Self {
        self.file_compatible = false;
        self
    }

    /// The option name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The slot's semantic type. Enum options report [`ValueKind::Str`].
    pub fn kind(&self) -> ValueKind {
        self.state.kind()
    }

    /// The member set of an enum option, lowercased, in declaration order.
    pub fn enum_members(&self) -> Option<&[String]> {
        match &self.state {
            SlotState::Enum { members, .. } => Some(members),
            _ => None,
        }
    }

    /// Whether the option participates in structured-file merging.
    pub fn file_compatible(&self) -> bool {
        self.file_compatible
    }

    /// The rank of the currently held value. List slots have no rank and
    /// report [`Priority::NONE`].
    pub fn rank(&self) -> Priority {
        match &self.state {
            SlotState::Bool(r) => r.rank,
            SlotState::Int(r) => r.rank,
            SlotState::Float(r) => r.rank,
            SlotState::Str(r) => r.rank,
            SlotState::Enum { state, .. } => state.rank,
            SlotState::List(_) => Priority::NONE,
        }
    }

    /// The current value, or `None` for a string/enum option that has no
    /// value yet.
    pub fn value(&self) -> Option<Value> {
        match &self.state {
            SlotState::Bool(r) => Some(Value::Bool(r.value)),
            SlotState::Int(r) => Some(Value::Int(r.value)),
            SlotState::Float(r) => Some(Value::Float(r.value)),
            SlotState::Str(r) => r.value.clone().map(Value::Str),
            SlotState::Enum { state, .. } => state.value.clone().map(Value::Str),
            SlotState::List(items) => Some(Value::List(items.clone())),
        }
    }

    /// The boolean value, if this is a boolean slot.
    pub fn as_bool(&self) -> Option<bool> {
        match &self.state {
            SlotState::Bool(r) => Some(r.value),
            _ => None,
        }
    }

    /// The integer value, if this is an integer slot.
    pub fn as_int(&self) -> Option<i64> {
        match &self.state {
            SlotState::Int(r) => Some(r.value),
            _ => None,
        }
    }

    /// The float value, if this is a float slot.
    pub fn as_float(&self) -> Option<f64> {
        match &self.state {
            SlotState::Float(r) => Some(r.value),
            _ => None,
        }
    }

    /// The string value of a string or enum slot. `None` when the slot is
    /// not string-typed or holds no value yet.
    pub fn as_str(&self) -> Option<&str> {
        match &self.state {
            SlotState::Str(r) => r.value.as_deref(),
            SlotState::Enum { state, .. } => state.value.as_deref(),
            _ => None,
        }
    }

    /// The accumulated items of a list slot.
    pub fn as_list(&self) -> Option<&[String]> {
        match &self.state {
            SlotState::List(items) => Some(items),
            _ => None,
        }
    }

    /// Writes a value at the given priority.
    ///
    /// The value is normalized first (enum membership and lowercasing,
    /// variant/type agreement), then arbitrated: it replaces the stored
    /// value only when `priority` is strictly greater than the stored rank.
    /// List slots always append.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidValue`] when normalization rejects the
    /// value. A write that loses arbitration is not an error.
    pub fn write(&mut self, priority: Priority, value: Value) -> Result<()> {
        self.put(Some(priority), value)
    }

    fn put(&mut self, rank: Option<Priority>, value: Value) -> Result<()> {
        match (&mut self.state, value) {
            (SlotState::Bool(r), Value::Bool(b)) => r.apply(rank, b),
            (SlotState::Int(r), Value::Int(i)) => r.apply(rank, i),
            (SlotState::Float(r), Value::Float(x)) => r.apply(rank, x),
            (SlotState::Float(r), Value::Int(i)) => r.apply(rank, i as f64),
            (SlotState::Str(r), Value::Str(s)) => r.apply(rank, Some(s)),
            (SlotState::Enum { members, state }, Value::Str(s)) => {
                let lower = s.to_lowercase();
                if !members.iter().any(|m| *m == lower) {
                    return Err(StoreError::InvalidValue {
                        option: self.name.clone(),
                        value: s.clone(),
                        message: format!(
                            "'{s}' is not a member of enum option '{}'",
                            self.name
                        ),
                    });
                }
                state.apply(rank, Some(lower));
            }
            (SlotState::List(items), Value::Str(s)) => items.push(s),
            (SlotState::List(items), Value::List(mut more)) => items.append(&mut more),
            (state, value) => {
                return Err(StoreError::InvalidValue {
                    option: self.name.clone(),
                    value: value.to_string(),
                    message: format!(
                        "option '{}' expects a {} value, got {} '{}'",
                        self.name,
                        state.kind(),
                        value.kind(),
                        value
                    ),
                });
            }
        }
        Ok(())
    }
}
