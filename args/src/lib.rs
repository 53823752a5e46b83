//! Branching command-line resolver for a priority-arbitrated option store.
//!
//! This crate turns a raw argv into option-store writes:
//!
//! - [`TokenStream`]: a peek/pop/push-back cursor over the raw tokens.
//! - [`Extractor`] and its strategies ([`ConstValue`], [`IntValue`],
//!   [`StringValue`], [`MultiStringValue`]): how a flag or positional turns
//!   tokens into one typed value, and how it renders its usage fragment.
//! - [`ArgParser`]: the subcommand tree walk. Flags accumulate as branches
//!   are entered, positionals are consumed per branch, and every matched
//!   value is written to the store at the parser's priority so that file and
//!   command-line sources arbitrate instead of clobbering each other.
//! - [`HelpLayout`] and [`ArgParser::render_help`]: usage/help text for the
//!   active branch chain.
//!
//! Parsing never exits the process: [`ArgParser::parse`] returns
//! [`ParseOutcome::HelpRequested`] with the rendered text and leaves the
//! decision to the caller. [`ArgParser::parse_or_exit`] is the conventional
//! print-and-exit wrapper.
//!
//! # Example
//!
//! ```
//! use confstack_args::{ArgParser, IntValue, ParseOutcome, StringValue};
//! use confstack_core::{ConfigStore, OptionSlot};
//!
//! let mut store = ConfigStore::new();
//! store.register(OptionSlot::string("target")).unwrap();
//! store.register(OptionSlot::int("jobs").with_default(1i64).unwrap()).unwrap();
//!
//! let mut parser = ArgParser::new("builder");
//! parser.at(&["run"]);
//! parser
//!     .branch_help("Run a build target")
//!     .positional(&store, "target", StringValue, Some("target to build"))
//!     .unwrap()
//!     .flag(&store, &["j", "jobs"], "jobs", IntValue, Some("parallel jobs"))
//!     .unwrap();
//!
//! let outcome = parser.parse(["run", "all", "-j", "4"], &mut store).unwrap();
//! assert_eq!(outcome, ParseOutcome::Complete);
//! assert_eq!(store.get_str("target").unwrap(), Some("all"));
//! assert_eq!(store.get_int("jobs").unwrap(), 4);
//! ```

mod error;
mod extract;
mod help;
mod parser;
mod tokens;
mod tree;

pub use error::ParseError;
pub use extract::{ConstValue, Extractor, IntValue, MultiStringValue, StringValue};
pub use help::HelpLayout;
pub use parser::{ArgParser, ParseOutcome};
pub use tokens::TokenStream;
