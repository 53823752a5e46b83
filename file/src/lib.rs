//! Structured config-file merging for a priority-arbitrated option store.
//!
//! This crate is the second producer into a
//! [`ConfigStore`](confstack_core::ConfigStore): where `confstack-args`
//! resolves a command line, this merges a JSON or YAML file. The raw bytes
//! are parsed by `serde_json`/`serde_yaml` into one tree type; this crate
//! only validates each key's value against the [`Shape`] its option expects
//! and feeds the converted values through the store's shared write path.
//!
//! Merge errors are returned, never printed or caught here; calling code
//! decides whether a bad config file is fatal.
//!
//! # Example
//!
//! ```
//! use confstack_core::{ConfigStore, OptionSlot, Priority, Value};
//! use confstack_file::FileMerger;
//!
//! let mut store = ConfigStore::new();
//! store.register(OptionSlot::int("count")).unwrap();
//!
//! // File merges at priority 1, a later CLI write at priority 2 still wins.
//! let tree = serde_json::json!({ "count": 5 });
//! FileMerger::with_priority(Priority(1)).merge_value(&tree, &mut store).unwrap();
//! store.write("count", Priority(2), Value::Int(10)).unwrap();
//! assert_eq!(store.get_int("count").unwrap(), 10);
//! ```

mod error;
mod merge;
mod shape;

pub use error::{FileError, Result};
pub use merge::FileMerger;
pub use shape::{Shape, store_shapes};
