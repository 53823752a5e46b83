//! Typed option store with priority-based value arbitration.
//!
//! This crate defines the single source of truth a program reads its
//! resolved configuration from:
//!
//! - [`Value`] / [`ValueKind`]: the closed set of typed values an option can
//!   hold (boolean, integer, float, string, list of strings).
//! - [`Priority`]: the arbitration rank attached to each write; the
//!   highest-priority source always wins, regardless of write order.
//! - [`OptionSlot`]: one named, typed option with its normalization rules
//!   and the rank of the value it currently holds.
//! - [`ConfigStore`]: the registry of slots, with one shared write path used
//!   by every producer (command-line parser, file merger, caller code).
//!
//! # Example
//!
//! ```
//! use confstack_core::{ConfigStore, OptionSlot, Priority, Value};
//!
//! let mut store = ConfigStore::new();
//! store.register(OptionSlot::bool("verbose")).unwrap();
//! store.register(
//!     OptionSlot::string_enum("format", ["tar", "zip"]).with_default("tar").unwrap(),
//! ).unwrap();
//!
//! // A config file writes at priority 1, the command line at priority 2.
//! store.write("format", Priority(1), Value::Str("zip".into())).unwrap();
//! store.write("format", Priority(2), Value::Str("TAR".into())).unwrap();
//!
//! assert_eq!(store.get_str("format").unwrap(), Some("tar"));
//! assert!(!store.get_bool("verbose").unwrap());
//! ```

mod error;
mod option;
mod store;
mod value;

pub use error::{Result, StoreError};
pub use option::OptionSlot;
pub use store::ConfigStore;
pub use value::{Priority, Value, ValueKind};
