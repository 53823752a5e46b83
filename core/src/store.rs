//! The option store: named slots with one shared write path.
//!
//! A [`ConfigStore`] is built once at program start from a fixed schema and
//! then fed by any number of producers (command-line parsers, file mergers,
//! direct caller writes), all going through [`ConfigStore::write`] so that
//! priority arbitration applies uniformly. Downstream code reads only from
//! the store.

use std::str::FromStr;

use crate::error::{Result, StoreError};
use crate::option::OptionSlot;
use crate::value::{Priority, Value, ValueKind};

/// A set of registered options, looked up by name.
///
/// Registration order is preserved and lookup is exact-match, first match
/// wins.
///
/// # Examples
///
/// ```
/// use confstack_core::{ConfigStore, OptionSlot, Priority, Value};
///
/// let mut store = ConfigStore::new();
/// store.register(OptionSlot::int("count")).unwrap();
///
/// store.write("count", Priority(1), Value::Int(5)).unwrap();
/// store.write("count", Priority(2), Value::Int(10)).unwrap();
/// store.write("count", Priority(1), Value::Int(99)).unwrap(); // loses
/// assert_eq!(store.get_int("count").unwrap(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    options: Vec<OptionSlot>,
}

impl ConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an option slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateOption`] when an option with the same
    /// name already exists; the existing slot is never overwritten.
    pub fn register(&mut self, slot: OptionSlot) -> Result<()> {
        if self.get(slot.name()).is_some() {
            return Err(StoreError::DuplicateOption(slot.name().to_string()));
        }
        self.options.push(slot);
        Ok(())
    }

    /// Looks up an option by name.
    pub fn get(&self, name: &str) -> Option<&OptionSlot> {
        self.options.iter().find(|slot| slot.name() == name)
    }

    /// Looks up an option by name, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OptionNotFound`].
    pub fn require(&self, name: &str) -> Result<&OptionSlot> {
        self.get(name)
            .ok_or_else(|| StoreError::OptionNotFound(name.to_string()))
    }

    /// Iterates all registered options in registration order.
    pub fn options(&self) -> impl Iterator<Item = &OptionSlot> {
        self.options.iter()
    }

    /// Writes a value to the named option at the given priority.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OptionNotFound`] for an unknown name, or
    /// [`StoreError::InvalidValue`] when the slot rejects the value. A write
    /// that loses arbitration succeeds silently.
    pub fn write(&mut self, name: &str, priority: Priority, value: Value) -> Result<()> {
        let slot = self
            .options
            .iter_mut()
            .find(|slot| slot.name() == name)
            .ok_or_else(|| StoreError::OptionNotFound(name.to_string()))?;
        slot.write(priority, value)
    }

    /// Writes at [`Priority::MAX`], overriding every other source.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`write`](Self::write).
    pub fn force(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.write(name, Priority::MAX, value.into())
    }

    /// The value of a boolean option.
    ///
    /// # Errors
    ///
    /// [`StoreError::OptionNotFound`], or [`StoreError::InvalidValue`] when
    /// the option is not boolean-typed.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let slot = self.require(name)?;
        slot.as_bool().ok_or_else(|| kind_mismatch(slot, "boolean"))
    }

    /// The value of an integer option.
    ///
    /// # Errors
    ///
    /// [`StoreError::OptionNotFound`], or [`StoreError::InvalidValue`] when
    /// the option is not integer-typed.
    pub fn get_int(&self, name: &str) -> Result<i64> {
        let slot = self.require(name)?;
        slot.as_int().ok_or_else(|| kind_mismatch(slot, "integer"))
    }

    /// The value of a float option.
    ///
    /// # Errors
    ///
    /// [`StoreError::OptionNotFound`], or [`StoreError::InvalidValue`] when
    /// the option is not float-typed.
    pub fn get_float(&self, name: &str) -> Result<f64> {
        let slot = self.require(name)?;
        slot.as_float().ok_or_else(|| kind_mismatch(slot, "float"))
    }

    /// The value of a string or enum option; `None` when no value has been
    /// set and the option has no default.
    ///
    /// # Errors
    ///
    /// [`StoreError::OptionNotFound`], or [`StoreError::InvalidValue`] when
    /// the option is not string-typed.
    pub fn get_str(&self, name: &str) -> Result<Option<&str>> {
        let slot = self.require(name)?;
        match slot.as_str() {
            Some(s) => Ok(Some(s)),
            None if slot.kind() == ValueKind::Str => Ok(None),
            None => Err(kind_mismatch(slot, "string")),
        }
    }

    /// The accumulated items of a list option.
    ///
    /// # Errors
    ///
    /// [`StoreError::OptionNotFound`], or [`StoreError::InvalidValue`] when
    /// the option is not list-typed.
    pub fn get_list(&self, name: &str) -> Result<&[String]> {
        let slot = self.require(name)?;
        slot.as_list()
            .ok_or_else(|| kind_mismatch(slot, "string list"))
    }

    /// Parses the string value of an option into `T`.
    ///
    /// Useful for mapping an enum option onto a Rust enum that implements
    /// [`FromStr`].
    ///
    /// # Errors
    ///
    /// [`StoreError::OptionNotFound`]; [`StoreError::InvalidValue`] when the
    /// option is not string-typed, holds no value, or the parse fails.
    pub fn get_parsed<T: FromStr>(&self, name: &str) -> Result<T> {
        let slot = self.require(name)?;
        let raw = slot
            .as_str()
            .ok_or_else(|| kind_mismatch(slot, "string"))?;
        raw.parse().map_err(|_| StoreError::InvalidValue {
            option: name.to_string(),
            value: raw.to_string(),
            message: format!("can't interpret '{raw}' as the requested type"),
        })
    }
}

fn kind_mismatch(slot: &OptionSlot, wanted: &str) -> StoreError {
    StoreError::InvalidValue {
        option: slot.name().to_string(),
        value: slot.value().map(|v| v.to_string()).unwrap_or_default(),
        message: format!(
            "option '{}' is a {} option, not {wanted}",
            slot.name(),
            slot.kind()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_registration_fails() {
        let mut store = ConfigStore::new();
        store.register(OptionSlot::bool("verbose")).unwrap();
        let err = store.register(OptionSlot::int("verbose")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateOption("verbose".to_string()));
        // The original slot survives.
        assert!(!store.get_bool("verbose").unwrap());
    }

    #[test]
    fn test_require_unknown_option() {
        let store = ConfigStore::new();
        assert_eq!(
            store.require("missing").unwrap_err(),
            StoreError::OptionNotFound("missing".to_string())
        );
    }

    #[test]
    fn test_highest_priority_wins_regardless_of_order() {
        let mut store = ConfigStore::new();
        store.register(OptionSlot::int("count")).unwrap();

        store.write("count", Priority(2), Value::Int(10)).unwrap();
        store.write("count", Priority(1), Value::Int(5)).unwrap();
        assert_eq!(store.get_int("count").unwrap(), 10);

        let mut store = ConfigStore::new();
        store.register(OptionSlot::int("count")).unwrap();
        store.write("count", Priority(1), Value::Int(5)).unwrap();
        store.write("count", Priority(2), Value::Int(10)).unwrap();
        assert_eq!(store.get_int("count").unwrap(), 10);
    }

    #[test]
    fn test_force_outranks_everything_later() {
        let mut store = ConfigStore::new();
        store.register(OptionSlot::string("output")).unwrap();
        store.force("output", "pinned").unwrap();
        store
            .write("output", Priority(100), Value::Str("other".into()))
            .unwrap();
        assert_eq!(store.get_str("output").unwrap(), Some("pinned"));
    }

    #[test]
    fn test_typed_getter_kind_mismatch() {
        let mut store = ConfigStore::new();
        store.register(OptionSlot::int("count")).unwrap();
        assert!(matches!(
            store.get_bool("count").unwrap_err(),
            StoreError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_get_str_none_before_any_write() {
        let mut store = ConfigStore::new();
        store.register(OptionSlot::string("output")).unwrap();
        store
            .register(OptionSlot::string_enum("format", ["tar", "zip"]))
            .unwrap();
        assert_eq!(store.get_str("output").unwrap(), None);
        assert_eq!(store.get_str("format").unwrap(), None);
    }

    #[test]
    fn test_get_parsed_maps_enum_to_rust_enum() {
        #[derive(Debug, PartialEq)]
        enum Format {
            Tar,
            Zip,
        }
        impl std::str::FromStr for Format {
            type Err = ();
            fn from_str(s: &str) -> std::result::Result<Self, ()> {
                match s {
                    "tar" => Ok(Format::Tar),
                    "zip" => Ok(Format::Zip),
                    _ => Err(()),
                }
            }
        }

        let mut store = ConfigStore::new();
        store
            .register(OptionSlot::string_enum("format", ["tar", "zip"]))
            .unwrap();
        store
            .write("format", Priority(1), Value::Str("ZIP".into()))
            .unwrap();
        assert_eq!(store.get_parsed::<Format>("format").unwrap(), Format::Zip);
    }
}
