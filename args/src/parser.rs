//! The command-line resolver.
//!
//! An [`ArgParser`] is built once from the program's schema: a tree of
//! branches, each owning positional and flag specs that reference options in
//! a [`ConfigStore`] by name. [`ArgParser::parse`] then walks the tree
//! against a token stream in one linear pass, writing every matched value to
//! the store at the parser's configured priority. Help is a result variant,
//! not a process exit; [`ArgParser::parse_or_exit`] is the conventional
//! wrapper that prints and exits.

use std::process;

use confstack_core::{ConfigStore, Priority, StoreError, Value};
use tracing::debug;

use crate::error::ParseError;
use crate::extract::Extractor;
use crate::help::HelpLayout;
use crate::tokens::TokenStream;
use crate::tree::{Branch, FlagSpec, PositionalSpec, render_aliases};

/// How a successful parse ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The whole stream was consumed and all required positionals were met.
    Complete,
    /// The user asked for help (a help alias, or a non-leaf branch with no
    /// further tokens). Carries the rendered help text; the caller decides
    /// what to do with it.
    HelpRequested(String),
}

/// A branching command-line parser that writes into a [`ConfigStore`].
///
/// # Examples
///
/// ```
/// use confstack_args::{ArgParser, ConstValue, ParseOutcome, StringValue};
/// use confstack_core::{ConfigStore, OptionSlot};
///
/// let mut store = ConfigStore::new();
/// store.register(OptionSlot::string("name")).unwrap();
/// store.register(OptionSlot::bool("verbose")).unwrap();
///
/// let mut parser = ArgParser::new("greet");
/// parser
///     .positional(&store, "name", StringValue, Some("who to greet"))
///     .unwrap()
///     .flag(&store, &["v", "verbose"], "verbose", ConstValue::of(true), None)
///     .unwrap();
///
/// let outcome = parser.parse(["--verbose", "alice"], &mut store).unwrap();
/// assert_eq!(outcome, ParseOutcome::Complete);
/// assert_eq!(store.get_str("name").unwrap(), Some("alice"));
/// assert!(store.get_bool("verbose").unwrap());
/// ```
pub struct ArgParser {
    pub(crate) program: String,
    pub(crate) description: Option<String>,
    pub(crate) footer: Option<String>,
    pub(crate) help_aliases: Vec<String>,
    pub(crate) layout: HelpLayout,
    priority: Priority,
    pub(crate) root: Branch,
    cursor: Vec<String>,
}

impl ArgParser {
    /// Creates a parser with the default help aliases `help` and `h` and
    /// write priority `Priority(0)`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            description: None,
            footer: None,
            help_aliases: vec!["help".to_string(), "h".to_string()],
            layout: HelpLayout::default(),
            priority: Priority(0),
            root: Branch::default(),
            cursor: Vec::new(),
        }
    }

    /// Sets the program description shown at the top of help output.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Sets the footer shown at the bottom of help output.
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    /// Replaces the help aliases. An empty list disables help handling.
    pub fn help_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.help_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the priority this parser's writes carry.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the help layout settings.
    pub fn layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Moves the build cursor to the branch at `path` (from the root),
    /// creating branches as needed. Subsequent spec registrations apply to
    /// that branch.
    pub fn at(&mut self, path: &[&str]) -> &mut Self {
        self.cursor = path.iter().map(|part| part.to_string()).collect();
        self
    }

    /// Sets the help text of the branch under the cursor.
    pub fn branch_help(&mut self, text: impl Into<String>) -> &mut Self {
        self.current_branch().help = Some(text.into());
        self
    }

    /// Adds a required positional to the branch under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OptionNotFound`] when `option` is not
    /// registered in `store`.
    pub fn positional(
        &mut self,
        store: &ConfigStore,
        option: &str,
        extractor: impl Extractor + 'static,
        help: Option<&str>,
    ) -> Result<&mut Self, StoreError> {
        self.add_positional(store, option, extractor, false, help)
    }

    /// Adds an optional positional to the branch under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OptionNotFound`] when `option` is not
    /// registered in `store`.
    pub fn optional_positional(
        &mut self,
        store: &ConfigStore,
        option: &str,
        extractor: impl Extractor + 'static,
        help: Option<&str>,
    ) -> Result<&mut Self, StoreError> {
        self.add_positional(store, option, extractor, true, help)
    }

    fn add_positional(
        &mut self,
        store: &ConfigStore,
        option: &str,
        extractor: impl Extractor + 'static,
        optional: bool,
        help: Option<&str>,
    ) -> Result<&mut Self, StoreError> {
        let slot = store.require(option)?;
        let fragment = extractor.usage(slot);
        let usage = if optional {
            format!("[{fragment}]")
        } else {
            fragment
        };
        self.current_branch().positionals.push(PositionalSpec {
            option: option.to_string(),
            usage,
            extractor: Box::new(extractor),
            optional,
            help: help.map(str::to_string),
        });
        Ok(self)
    }

    /// Adds a flag to the branch under the cursor.
    ///
    /// Aliases are given without dashes; one-character names become short
    /// form (`-v`), longer names long form (`--verbose`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OptionNotFound`] when `option` is not
    /// registered in `store`.
    pub fn flag(
        &mut self,
        store: &ConfigStore,
        aliases: &[&str],
        option: &str,
        extractor: impl Extractor + 'static,
        help: Option<&str>,
    ) -> Result<&mut Self, StoreError> {
        let slot = store.require(option)?;
        let names: Vec<String> = aliases.iter().map(|name| name.to_string()).collect();
        let value_usage = extractor.usage(slot);
        let mut usage = render_aliases(&names);
        if !value_usage.is_empty() {
            usage.push(' ');
            usage.push_str(&value_usage);
        }
        self.current_branch().flags.push(FlagSpec {
            names,
            option: option.to_string(),
            usage,
            extractor: Box::new(extractor),
            help: help.map(str::to_string),
        });
        Ok(self)
    }

    fn current_branch(&mut self) -> &mut Branch {
        let path: Vec<&str> = self.cursor.iter().map(String::as_str).collect();
        self.root.descend_mut(&path)
    }

    /// Resolves a command line against the tree, writing matched values to
    /// `store` at this parser's priority.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]; this entry point never prints or exits, so
    /// callers that want to retry or chain parse sources can handle the
    /// error themselves.
    pub fn parse<I, S>(
        &self,
        argv: I,
        store: &mut ConfigStore,
    ) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = TokenStream::new(argv);
        let mut path = Vec::new();
        self.resolve(&mut args, store, &mut path)
    }

    /// Like [`parse`](Self::parse), but handles the outcome the conventional
    /// way: help text goes to stdout and the process exits 0; a parse error
    /// is printed as `"<program>: <message>"` with a usage hint and the
    /// process exits 1. Returns normally only on a complete parse.
    pub fn parse_or_exit<I, S>(&self, argv: I, store: &mut ConfigStore)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = TokenStream::new(argv);
        let mut path = Vec::new();
        match self.resolve(&mut args, store, &mut path) {
            Ok(ParseOutcome::Complete) => {}
            Ok(ParseOutcome::HelpRequested(text)) => {
                print!("{text}");
                process::exit(0);
            }
            Err(err) => {
                println!("{}: {}", self.program, err);
                if let Some(alias) = self.help_aliases.first() {
                    let between = if path.is_empty() { "" } else { " <command>" };
                    let dashes = if alias.len() == 1 { "-" } else { "--" };
                    println!(
                        "use '{}{} {}{}' to view usage",
                        self.program, between, dashes, alias
                    );
                }
                process::exit(1);
            }
        }
    }

    fn resolve(
        &self,
        args: &mut TokenStream,
        store: &mut ConfigStore,
        path: &mut Vec<String>,
    ) -> Result<ParseOutcome, ParseError> {
        let mut branch = &self.root;
        let mut active_flags: Vec<&FlagSpec> = branch.flags.iter().collect();
        let mut remaining: Vec<&PositionalSpec> = branch.positionals.iter().rev().collect();
        let mut accepting_flags = true;

        while !args.is_empty() {
            let arg = args.pop()?;
            if arg.is_empty() {
                continue;
            }

            if accepting_flags && arg.starts_with('-') && arg.len() > 1 {
                if self
                    .help_aliases
                    .iter()
                    .any(|alias| alias == arg.trim_start_matches('-'))
                {
                    return Ok(ParseOutcome::HelpRequested(self.render_help(path)));
                }
                if arg == "--" {
                    accepting_flags = false;
                    continue;
                }
                let names: Vec<String> = match arg.strip_prefix("--") {
                    Some(long) => vec![long.to_string()],
                    // Cluster expansion: -abc means -a -b -c, in order.
                    None => arg[1..].chars().map(|c| c.to_string()).collect(),
                };
                for name in names {
                    let flag = active_flags
                        .iter()
                        .find(|flag| flag.names.iter().any(|n| *n == name))
                        .ok_or_else(|| ParseError::UnrecognizedOption(name.clone()))?;
                    let value = flag.extractor.extract(args)?;
                    debug!(flag = %name, option = %flag.option, "matched flag");
                    write_extracted(store, &flag.option, self.priority, value)?;
                }
            } else if let Some(spec) = remaining.pop() {
                // The token was consumed as a candidate; the extractor gets
                // to re-examine it.
                args.push_back(arg);
                let value = spec.extractor.extract(args)?;
                debug!(option = %spec.option, "matched positional");
                write_extracted(store, &spec.option, self.priority, value)?;
            } else if !branch.children.is_empty() {
                match branch.child(&arg) {
                    Some(child) => {
                        debug!(command = %arg, "entered subcommand");
                        path.push(arg);
                        active_flags.extend(child.flags.iter());
                        remaining = child.positionals.iter().rev().collect();
                        branch = child;
                    }
                    None => return Err(ParseError::InvalidCommand(arg)),
                }
            } else {
                return Err(ParseError::UnexpectedArgument(arg));
            }
        }

        // Stopping at a branch that still has children is a request for
        // guidance, not an error.
        if !branch.children.is_empty() {
            return Ok(ParseOutcome::HelpRequested(self.render_help(path)));
        }

        if let Some(missing) = remaining.iter().rev().find(|spec| !spec.optional) {
            return Err(ParseError::NotEnoughArguments(missing.usage.clone()));
        }

        debug!(priority = %self.priority, "parse complete");
        Ok(ParseOutcome::Complete)
    }
}

/// Writes an extracted value, translating slot-level rejections into the
/// user-facing parse error.
fn write_extracted(
    store: &mut ConfigStore,
    option: &str,
    priority: Priority,
    value: Value,
) -> Result<(), ParseError> {
    match store.write(option, priority, value) {
        Err(StoreError::InvalidValue { message, .. }) => {
            Err(ParseError::InvalidArgument(message))
        }
        other => Ok(other?),
    }
}
