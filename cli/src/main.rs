//! Demonstration binary for the confstack crates.
//!
//! `confstack-demo` models a small fictional archive tool. Its configuration
//! is resolved from two layered sources, an optional JSON/YAML config file
//! (priority 1) and the command line (priority 2), and dumped as JSON, so
//! the arbitration between the sources is directly observable:
//!
//! ```text
//! confstack-demo pack out.tar a.txt b.txt --format zip --config defaults.json
//! ```

use std::env;
use std::error::Error;
use std::process;

use confstack_args::{ArgParser, ConstValue, IntValue, MultiStringValue, StringValue};
use confstack_core::{ConfigStore, OptionSlot, Priority, StoreError};
use confstack_file::FileMerger;

const CLI_PRIORITY: Priority = Priority(2);
const FILE_PRIORITY: Priority = Priority(1);

fn build_store() -> Result<ConfigStore, StoreError> {
    let mut store = ConfigStore::new();
    store.register(OptionSlot::bool("verbose").cli_only())?;
    store.register(OptionSlot::string("config").cli_only())?;
    store.register(OptionSlot::int("level").with_default(6i64)?)?;
    store.register(
        OptionSlot::string_enum("format", ["tar", "zip", "dir"]).with_default("tar")?,
    )?;
    store.register(OptionSlot::string("output"))?;
    store.register(OptionSlot::string_list("inputs"))?;
    store.register(OptionSlot::string("archive"))?;
    Ok(store)
}

fn build_parser(store: &ConfigStore) -> Result<ArgParser, StoreError> {
    let mut parser = ArgParser::new("confstack-demo")
        .description("Layered-configuration demo: an archive tool that isn't")
        .footer("Values from the config file lose to values from the command line.")
        .priority(CLI_PRIORITY);

    parser
        .flag(
            store,
            &["v", "verbose"],
            "verbose",
            ConstValue::of(true),
            Some("Chatty output"),
        )?
        .flag(
            store,
            &["config"],
            "config",
            StringValue,
            Some("Config file merged below command-line priority"),
        )?;

    parser.at(&["pack"]);
    parser
        .branch_help("Create an archive")
        .positional(store, "output", StringValue, Some("Archive to create"))?
        .optional_positional(store, "inputs", MultiStringValue::new(), Some("Files to add"))?
        .flag(store, &["l", "level"], "level", IntValue, Some("Compression level"))?
        .flag(store, &["format"], "format", StringValue, Some("Archive format"))?;

    parser.at(&["inspect"]);
    parser
        .branch_help("List an archive's contents")
        .positional(store, "archive", StringValue, Some("Archive to inspect"))?;

    Ok(parser)
}

/// Renders every option's resolved value as a JSON object.
fn render_dump(store: &ConfigStore) -> serde_json::Result<String> {
    let mut map = serde_json::Map::new();
    for slot in store.options() {
        let value = match slot.value() {
            Some(value) => serde_json::to_value(value)?,
            None => serde_json::Value::Null,
        };
        map.insert(slot.name().to_string(), value);
    }
    serde_json::to_string_pretty(&serde_json::Value::Object(map))
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut store = build_store()?;
    let parser = build_parser(&store)?;

    // Exits itself on help or on a command-line error.
    parser.parse_or_exit(env::args().skip(1), &mut store);

    // The config file path comes from the command line, yet its values merge
    // at the lower priority: arbitration, not order, decides the winner.
    if let Some(path) = store.get_str("config")?.map(str::to_string) {
        FileMerger::with_priority(FILE_PRIORITY).merge_file(&path, &mut store)?;
    }

    println!("{}", render_dump(&store)?);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("confstack-demo: {err}");
        process::exit(1);
    }
}
