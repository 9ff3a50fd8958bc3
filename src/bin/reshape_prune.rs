//! reshape-prune: Drop, rename and clean up fields anywhere in nested JSON
//!
//! Usage:
//!   # Remove every field named "password" or "token", at any depth
//!   reshape-prune --drop '^(password|token)$' users.json
//!
//!   # Rename fields and strip nulls and empty strings
//!   reshape-prune --rename userName=user_name --drop-empty events.jsonl
//!
//!   # Leave arrays untouched
//!   reshape-prune --drop '^debug' --no-arrays data.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use regex::Regex;
use reshape::{deep_transform_object_with, is_truthy, read_documents, Decision, Key, RecordWriter, TransformOptions};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::{stdin, stdout, BufReader, Read};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reshape-prune")]
#[command(about = "Drop, rename and clean up fields in nested JSON", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Drop leaf fields whose key matches this pattern
    #[arg(long, value_name = "REGEX")]
    drop: Option<String>,

    /// Rename a leaf field, as FROM=TO (repeatable)
    #[arg(long, value_name = "FROM=TO")]
    rename: Vec<String>,

    /// Drop null, false and empty-string leaves
    #[arg(long)]
    drop_empty: bool,

    /// Do not descend into arrays
    #[arg(long)]
    no_arrays: bool,

    /// Nesting levels to descend into (default: unlimited)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Treat a top-level array as one record instead of a stream of records
    #[arg(long)]
    no_split_array: bool,

    /// Pretty-print each record
    #[arg(long)]
    pretty: bool,
}

/// Per-leaf rules built from the command line
struct PruneRules {
    drop: Option<Regex>,
    renames: HashMap<String, String>,
    drop_empty: bool,
}

impl PruneRules {
    fn decide(&self, value: &Value, key: Key<'_>) -> Decision {
        if self.drop_empty && !value.is_number() && !is_truthy(value) {
            return Decision::Drop;
        }

        let Some(name) = key.as_name() else {
            return Decision::Keep;
        };

        if self.drop.as_ref().is_some_and(|pattern| pattern.is_match(name)) {
            debug!(key = name, "dropping field");
            return Decision::Drop;
        }

        match self.renames.get(name) {
            Some(new_name) => Decision::Rename(new_name.clone(), value.clone()),
            None => Decision::Keep,
        }
    }
}

fn parse_renames(specs: &[String]) -> Result<HashMap<String, String>> {
    let mut renames = HashMap::new();
    for spec in specs {
        let Some((from, to)) = spec.split_once('=') else {
            bail!("Invalid --rename '{}', expected FROM=TO", spec);
        };
        if from.is_empty() || to.is_empty() {
            bail!("Invalid --rename '{}', both names are required", spec);
        }
        renames.insert(from.to_string(), to.to_string());
    }
    Ok(renames)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let rules = PruneRules {
        drop: args
            .drop
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("Invalid --drop pattern")?,
        renames: parse_renames(&args.rename)?,
        drop_empty: args.drop_empty,
    };

    let mut options = TransformOptions::default().with_transform_arrays(!args.no_arrays);
    if let Some(depth) = args.max_depth {
        options = options.with_max_depth(depth);
    }

    let reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        Box::new(BufReader::new(
            File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?,
        ))
    } else {
        Box::new(stdin())
    };

    let documents = read_documents(reader, args.no_split_array)?;
    if documents.is_empty() {
        warn!("no JSON documents found in input");
    }

    let mut writer = RecordWriter::new(stdout().lock());
    for (idx, document) in documents.iter().enumerate() {
        let Value::Object(map) = document else {
            bail!("Record {} is not a JSON object", idx + 1);
        };
        let pruned = deep_transform_object_with(map, &options, |value, key, _| rules.decide(value, key));
        if args.pretty {
            writer.write_record_pretty(&pruned)?;
        } else {
            writer.write_record(&pruned)?;
        }
    }
    writer.flush()?;

    info!(records = writer.written(), "prune complete");
    Ok(())
}
