//! Expected shapes for file-compatible options.
//!
//! A [`Shape`] is the structural constraint a config-file value must satisfy
//! before it is converted into an option's native [`Value`]. Shapes are
//! derived from the option slots themselves, so the file surface always
//! tracks the registered schema. Enum membership is deliberately NOT part of
//! the shape: a non-member string is structurally a string, and the
//! rejection happens at write time where it carries the offending value.

use confstack_core::{ConfigStore, OptionSlot, Value, ValueKind};

/// The expected shape of one option's config-file value.
///
/// # Examples
///
/// ```
/// use confstack_core::OptionSlot;
/// use confstack_file::Shape;
///
/// let slot = OptionSlot::int("count");
/// assert_eq!(Shape::of(&slot), Some(Shape::Int));
///
/// let hidden = OptionSlot::string("config").cli_only();
/// assert_eq!(Shape::of(&hidden), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A JSON/YAML boolean.
    Bool,
    /// An integral number.
    Int,
    /// Any number.
    Float,
    /// A string.
    Str,
    /// A string restricted to an enum's members (checked at write time).
    StrChoice(Vec<String>),
    /// An array of strings.
    StrList,
}

impl Shape {
    /// Derives the shape of `slot`, or `None` when the option does not
    /// participate in file merging.
    pub fn of(slot: &OptionSlot) -> Option<Shape> {
        if !slot.file_compatible() {
            return None;
        }
        let shape = match slot.kind() {
            ValueKind::Bool => Shape::Bool,
            ValueKind::Int => Shape::Int,
            ValueKind::Float => Shape::Float,
            ValueKind::Str => match slot.enum_members() {
                Some(members) => Shape::StrChoice(members.to_vec()),
                None => Shape::Str,
            },
            ValueKind::List => Shape::StrList,
        };
        Some(shape)
    }

    /// Converts a tree node into the option's native value, or `None` when
    /// the node does not match this shape.
    pub fn convert(&self, raw: &serde_json::Value) -> Option<Value> {
        match self {
            Shape::Bool => raw.as_bool().map(Value::Bool),
            Shape::Int => raw.as_i64().map(Value::Int),
            Shape::Float => raw.as_f64().map(Value::Float),
            Shape::Str | Shape::StrChoice(_) => raw.as_str().map(|s| Value::Str(s.to_string())),
            Shape::StrList => raw
                .as_array()?
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
        }
    }

    /// Human-readable description used in mismatch errors.
    pub fn describe(&self) -> String {
        match self {
            Shape::Bool => "a boolean".to_string(),
            Shape::Int => "an integer".to_string(),
            Shape::Float => "a number".to_string(),
            Shape::Str => "a string".to_string(),
            Shape::StrChoice(members) => format!("one of {}", members.join("|")),
            Shape::StrList => "a list of strings".to_string(),
        }
    }
}

/// The shapes of every file-compatible option in `store`, in registration
/// order.
pub fn store_shapes(store: &ConfigStore) -> Vec<(String, Shape)> {
    store
        .options()
        .filter_map(|slot| Shape::of(slot).map(|shape| (slot.name().to_string(), shape)))
        .collect()
}

/// Names the JSON type of a tree node, for mismatch errors.
pub(crate) fn tree_node_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_shape_derivation() {
        assert_eq!(Shape::of(&OptionSlot::bool("v")), Some(Shape::Bool));
        assert_eq!(Shape::of(&OptionSlot::float("ratio")), Some(Shape::Float));
        assert_eq!(Shape::of(&OptionSlot::string_list("xs")), Some(Shape::StrList));
        assert_eq!(
            Shape::of(&OptionSlot::string_enum("fmt", ["Tar", "zip"])),
            Some(Shape::StrChoice(vec!["tar".into(), "zip".into()]))
        );
        assert_eq!(Shape::of(&OptionSlot::string("s").cli_only()), None);
    }

    #[test]
    fn test_int_shape_rejects_fractions() {
        assert_eq!(Shape::Int.convert(&json!(5)), Some(Value::Int(5)));
        assert_eq!(Shape::Int.convert(&json!(5.5)), None);
        assert_eq!(Shape::Int.convert(&json!("5")), None);
    }

    #[test]
    fn test_float_shape_accepts_integers() {
        assert_eq!(Shape::Float.convert(&json!(2)), Some(Value::Float(2.0)));
        assert_eq!(Shape::Float.convert(&json!(2.5)), Some(Value::Float(2.5)));
    }

    #[test]
    fn test_list_shape_requires_all_strings() {
        assert_eq!(
            Shape::StrList.convert(&json!(["a", "b"])),
            Some(Value::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(Shape::StrList.convert(&json!(["a", 1])), None);
        assert_eq!(Shape::StrList.convert(&json!("a")), None);
    }

    #[test]
    fn test_store_shapes_skips_cli_only() {
        let mut store = ConfigStore::new();
        store.register(OptionSlot::int("count")).unwrap();
        store.register(OptionSlot::string("config").cli_only()).unwrap();
        let shapes = store_shapes(&store);
        assert_eq!(shapes, vec![("count".to_string(), Shape::Int)]);
    }
}
