//! Merging a parsed config-file tree into the option store.

use std::fs;
use std::path::Path;

use confstack_core::{ConfigStore, Priority, StoreError};
use tracing::debug;

use crate::error::{FileError, Result};
use crate::shape::{Shape, tree_node_kind};

/// Merges structured config files into a [`ConfigStore`] at a fixed priority.
///
/// Every accepted value goes through the same store write path the
/// command-line resolver uses, so whichever source carries the higher
/// priority wins regardless of merge order. A value losing arbitration is
/// the feature working, not an error.
///
/// # Examples
///
/// ```
/// use confstack_core::{ConfigStore, OptionSlot, Priority};
/// use confstack_file::FileMerger;
///
/// let mut store = ConfigStore::new();
/// store.register(OptionSlot::int("count")).unwrap();
///
/// let tree = serde_json::json!({ "count": 5 });
/// FileMerger::with_priority(Priority(1))
///     .merge_value(&tree, &mut store)
///     .unwrap();
/// assert_eq!(store.get_int("count").unwrap(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct FileMerger {
    priority: Priority,
}

impl Default for FileMerger {
    fn default() -> Self {
        Self {
            priority: Priority(0),
        }
    }
}

impl FileMerger {
    /// A merger writing at `Priority(0)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A merger writing at the given priority.
    pub fn with_priority(priority: Priority) -> Self {
        Self { priority }
    }

    /// Reads, parses, and merges the file at `path`.
    ///
    /// Files with a `.yml`/`.yaml` extension are parsed as YAML; everything
    /// else is parsed as JSON. Both produce the same tree type.
    ///
    /// # Errors
    ///
    /// I/O and syntax errors, plus everything
    /// [`merge_value`](Self::merge_value) can return.
    pub fn merge_file(&self, path: impl AsRef<Path>, store: &mut ConfigStore) -> Result<()> {
        self.merge_file_with(path, store, |_| Ok(()))
    }

    /// Like [`merge_file`](Self::merge_file), but hands the parsed tree to
    /// `inspect` before merging, for callers that read extra structure out
    /// of the same file.
    pub fn merge_file_with<F>(
        &self,
        path: impl AsRef<Path>,
        store: &mut ConfigStore,
        inspect: F,
    ) -> Result<()>
    where
        F: FnOnce(&serde_json::Value) -> Result<()>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let tree: serde_json::Value = if is_yaml(path) {
            serde_yaml::from_str(&text)?
        } else {
            serde_json::from_str(&text)?
        };
        debug!(path = %path.display(), "parsed config file");
        inspect(&tree)?;
        self.merge_value(&tree, store)
    }

    /// Merges an already-parsed tree into `store`.
    ///
    /// # Errors
    ///
    /// [`FileError::NotAMapping`] when the top level is not a mapping;
    /// per key, [`FileError::UnknownKey`] when no file-compatible option
    /// matches, [`FileError::ShapeMismatch`] when the value has the wrong
    /// structure, and [`FileError::InvalidConfigValue`] when the option
    /// rejects the converted value.
    pub fn merge_value(&self, tree: &serde_json::Value, store: &mut ConfigStore) -> Result<()> {
        let mapping = tree.as_object().ok_or(FileError::NotAMapping)?;

        for (key, raw) in mapping {
            let shape = store
                .get(key)
                .and_then(Shape::of)
                .ok_or_else(|| FileError::UnknownKey(key.clone()))?;
            let value = shape
                .convert(raw)
                .ok_or_else(|| FileError::ShapeMismatch {
                    key: key.clone(),
                    expected: shape.describe(),
                    got: tree_node_kind(raw).to_string(),
                })?;
            match store.write(key, self.priority, value) {
                Ok(()) => debug!(key = %key, priority = %self.priority, "merged config value"),
                Err(StoreError::InvalidValue { value, message, .. }) => {
                    return Err(FileError::InvalidConfigValue {
                        key: key.clone(),
                        value,
                        message,
                    });
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml") | Some("yaml")
    )
}

#[cfg(test)]
mod tests {
    use confstack_core::{OptionSlot, Value};
    use serde_json::json;

    use super::*;

    fn sample_store() -> ConfigStore {
        let mut store = ConfigStore::new();
        store.register(OptionSlot::bool("verbose")).unwrap();
        store.register(OptionSlot::int("count")).unwrap();
        store.register(OptionSlot::float("ratio")).unwrap();
        store
            .register(OptionSlot::string_enum("format", ["tar", "zip"]))
            .unwrap();
        store.register(OptionSlot::string_list("inputs")).unwrap();
        store.register(OptionSlot::string("config").cli_only()).unwrap();
        store
    }

    #[test]
    fn test_merges_every_shape() {
        let mut store = sample_store();
        let tree = json!({
            "verbose": true,
            "count": 3,
            "ratio": 0.5,
            "format": "ZIP",
            "inputs": ["a.txt", "b.txt"],
        });
        FileMerger::new().merge_value(&tree, &mut store).unwrap();
        assert!(store.get_bool("verbose").unwrap());
        assert_eq!(store.get_int("count").unwrap(), 3);
        assert_eq!(store.get_float("ratio").unwrap(), 0.5);
        assert_eq!(store.get_str("format").unwrap(), Some("zip"));
        assert_eq!(store.get_list("inputs").unwrap(), ["a.txt", "b.txt"]);
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let mut store = sample_store();
        let err = FileMerger::new()
            .merge_value(&json!([1, 2]), &mut store)
            .unwrap_err();
        assert!(matches!(err, FileError::NotAMapping));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut store = sample_store();
        let err = FileMerger::new()
            .merge_value(&json!({ "colour": "red" }), &mut store)
            .unwrap_err();
        assert!(matches!(err, FileError::UnknownKey(key) if key == "colour"));
    }

    #[test]
    fn test_cli_only_option_is_not_a_file_key() {
        let mut store = sample_store();
        let err = FileMerger::new()
            .merge_value(&json!({ "config": "x.json" }), &mut store)
            .unwrap_err();
        assert!(matches!(err, FileError::UnknownKey(key) if key == "config"));
    }

    #[test]
    fn test_shape_mismatch_names_key_and_shapes() {
        let mut store = sample_store();
        let err = FileMerger::new()
            .merge_value(&json!({ "count": "three" }), &mut store)
            .unwrap_err();
        match err {
            FileError::ShapeMismatch { key, expected, got } => {
                assert_eq!(key, "count");
                assert_eq!(expected, "an integer");
                assert_eq!(got, "a string");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_enum_non_member_is_invalid_config_value() {
        let mut store = sample_store();
        let err = FileMerger::new()
            .merge_value(&json!({ "format": "rar" }), &mut store)
            .unwrap_err();
        match err {
            FileError::InvalidConfigValue { key, value, .. } => {
                assert_eq!(key, "format");
                assert_eq!(value, "rar");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lower_priority_merge_loses_silently() {
        let mut store = sample_store();
        store.write("count", Priority(5), Value::Int(10)).unwrap();
        FileMerger::with_priority(Priority(1))
            .merge_value(&json!({ "count": 3 }), &mut store)
            .unwrap();
        assert_eq!(store.get_int("count").unwrap(), 10);
    }
}
