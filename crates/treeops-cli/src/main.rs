//! `treeops` CLI: merge, inspect and edit JSON documents through the tree
//! adapters from the command line.
//!
//! Every document is parsed as JSON, transcoded into a `Node` tree, run
//! through one adapter operation and transcoded back to pretty-printed JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Whole-tree merge: objects overlay, arrays concatenate
//! treeops merge base.json override.json
//!
//! # Add one entry; an existing key keeps its value
//! echo '{"a":1}' | treeops merge-entry - --key b --value 2
//!
//! # Bulk entries as [key, value] pairs; new values win
//! treeops merge-entry data.json --bulk --value '[["a",2],["c",3]]'
//!
//! # Compressed mode accepts numeric keys
//! treeops --compressed merge-entry data.json --key 7 --key-json --value true
//!
//! # Append to a list, drop a key, look a key up, report the root kind
//! treeops append list.json --value '{"id":3}'
//! treeops remove data.json --key etag
//! treeops get data.json --key name
//! treeops kind data.json
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to change the
//! level (default `warn`).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use treeops_core::{DataResult, DynamicOps, JsonOps, Mode, Node, TreeOps};

#[derive(Parser)]
#[command(
    name = "treeops",
    version,
    about = "Merge and edit JSON documents through tree adapters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use compressed mode: primitives coerce to strings, numeric strings to numbers
    #[arg(long, global = true)]
    compressed: bool,

    /// On a failed operation, print the partial result instead of exiting with an error
    #[arg(long, global = true)]
    allow_partial: bool,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge two documents: null is the identity, objects overlay, arrays concatenate
    Merge {
        /// First document ("-" for stdin)
        first: String,
        /// Second document ("-" for stdin); its values win
        second: String,
    },
    /// Add a key/value entry to an object
    MergeEntry {
        /// Input document ("-" for stdin)
        input: String,
        /// Entry key
        #[arg(long, required_unless_present = "bulk")]
        key: Option<String>,
        /// Parse the key as a JSON value instead of a plain string
        #[arg(long)]
        key_json: bool,
        /// Entry value as JSON; with --bulk, a JSON array of [key, value] pairs
        #[arg(long)]
        value: String,
        /// Merge many entries at once; incoming values replace existing ones
        #[arg(long, conflicts_with = "key")]
        bulk: bool,
    },
    /// Append a value to a list
    Append {
        /// Input document ("-" for stdin)
        input: String,
        /// Value to append, as JSON
        #[arg(long)]
        value: String,
    },
    /// Remove a key from an object
    Remove {
        /// Input document ("-" for stdin)
        input: String,
        #[arg(long)]
        key: String,
    },
    /// Print the value stored under a key
    Get {
        /// Input document ("-" for stdin)
        input: String,
        #[arg(long)]
        key: String,
    },
    /// Print the kind of the root value
    Kind {
        /// Input document ("-" for stdin)
        input: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = if cli.compressed {
        Mode::Compressed
    } else {
        Mode::Strict
    };
    let ops = TreeOps::new(mode);
    tracing::debug!(%ops, "starting");

    let output = match cli.command {
        Commands::Merge { first, second } => {
            if first == "-" && second == "-" {
                bail!("Only one of the two documents can be read from stdin");
            }
            let first = read_node(&ops, &first)?;
            let second = read_node(&ops, &second)?;
            let merged = ops
                .merge(&first, &second)
                .context("Failed to merge documents")?;
            render(&ops, &merged)?
        }
        Commands::MergeEntry {
            input,
            key,
            key_json,
            value,
            bulk,
        } => {
            let map = read_node(&ops, &input)?;
            let result = if bulk {
                let entries = parse_entries(&ops, &value)?;
                ops.merge_entries_to_map(&map, entries)
            } else {
                let Some(key) = key else {
                    bail!("--key is required unless --bulk is given");
                };
                let key = if key_json {
                    parse_node(&ops, &key).context("Failed to parse --key as JSON")?
                } else {
                    ops.create_string(&key)
                };
                let value = parse_node(&ops, &value).context("Failed to parse --value")?;
                ops.merge_to_map(&map, key, value)
            };
            render(&ops, &finish(result, cli.allow_partial)?)?
        }
        Commands::Append { input, value } => {
            let list = read_node(&ops, &input)?;
            let value = parse_node(&ops, &value).context("Failed to parse --value")?;
            let result = ops.merge_to_list(&list, value);
            render(&ops, &finish(result, cli.allow_partial)?)?
        }
        Commands::Remove { input, key } => {
            let node = read_node(&ops, &input)?;
            if node.as_object().is_none() {
                tracing::warn!(kind = %node.kind(), "remove on a non-object leaves it unchanged");
            }
            render(&ops, &ops.remove(&node, &key))?
        }
        Commands::Get { input, key } => {
            let node = read_node(&ops, &input)?;
            let view = ops.get_map(&node).into_result()?;
            let Some(found) = view.get(&ops.create_string(&key)) else {
                bail!("Key not found: '{}'", key);
            };
            render(&ops, found)?
        }
        Commands::Kind { input } => {
            let node = read_node(&ops, &input)?;
            node.kind().to_string()
        }
    };

    write_output(cli.output.as_deref(), &output)
}

/// Unwrap an operation result, falling back to its partial value when
/// `allow_partial` is set.
fn finish(result: DataResult<Node>, allow_partial: bool) -> Result<Node> {
    let result = if allow_partial {
        result.promote_partial()
    } else {
        result
    };
    Ok(result.into_result()?)
}

/// Parse `[[key, value], ...]` into entry pairs.
fn parse_entries(ops: &TreeOps, raw: &str) -> Result<Vec<(Node, Node)>> {
    let value: Value = serde_json::from_str(raw).context("Failed to parse --value as JSON")?;
    let Value::Array(items) = value else {
        bail!("--bulk expects a JSON array of [key, value] pairs");
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Array(pair) if pair.len() == 2 => Ok((
                JsonOps.convert_to(ops, &pair[0]),
                JsonOps.convert_to(ops, &pair[1]),
            )),
            other => bail!("Expected a [key, value] pair, got {}", other),
        })
        .collect()
}

fn parse_node(ops: &TreeOps, raw: &str) -> Result<Node> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(JsonOps.convert_to(ops, &value))
}

fn read_node(ops: &TreeOps, path: &str) -> Result<Node> {
    let text = read_input(path)?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON from {}", describe(path)))?;
    Ok(JsonOps.convert_to(ops, &value))
}

fn render(ops: &TreeOps, node: &Node) -> Result<String> {
    let json = ops.convert_to(&JsonOps, node);
    Ok(serde_json::to_string_pretty(&json)?)
}

fn describe(path: &str) -> String {
    if path == "-" {
        "stdin".to_string()
    } else {
        path.to_string()
    }
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{}\n", content))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
