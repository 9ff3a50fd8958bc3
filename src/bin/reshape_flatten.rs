//! reshape-flatten: Flatten nested JSON objects into dotted key paths
//!
//! Usage:
//!   # Read from file, output to stdout
//!   reshape-flatten data.json
//!
//!   # Read from stdin, limit paths to two segments
//!   echo '{"a": {"b": {"c": 1}}}' | reshape-flatten --depth 2
//!
//!   # Expand JSON embedded in string fields, skip keys starting with "_"
//!   reshape-flatten --parse-json --exclude '^_' events.jsonl

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use reshape::{flatten_value, read_documents, FlattenOptions, RecordWriter};
use std::fs::File;
use std::io::{stdin, stdout, BufReader, Read};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reshape-flatten")]
#[command(about = "Flatten nested JSON objects into dotted key paths", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Maximum number of segments per output key (0 = pass records through unchanged)
    #[arg(long)]
    depth: Option<usize>,

    /// Parse string values that contain JSON and flatten them too
    #[arg(long)]
    parse_json: bool,

    /// Drop leaf entries whose key matches this pattern
    #[arg(long, value_name = "REGEX")]
    exclude: Option<String>,

    /// Lowercase every key segment in the output
    #[arg(long)]
    lowercase_keys: bool,

    /// Treat a top-level array as one record instead of a stream of records
    #[arg(long)]
    no_split_array: bool,

    /// Pretty-print each record
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let exclude = args
        .exclude
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("Invalid --exclude pattern")?;

    let mut options = FlattenOptions::new().with_parse_strings_as_json(args.parse_json);
    if let Some(depth) = args.depth {
        options = options.with_depth_limit(depth);
    }
    if let Some(pattern) = exclude {
        options = options.with_filter(move |key, _| !pattern.is_match(key));
    }
    if args.lowercase_keys {
        options = options.with_key_fn(|key, _| key.to_lowercase());
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
        let flat = flatten_value(document, &options)
            .with_context(|| format!("Cannot flatten record {}", idx + 1))?;
        if args.pretty {
            writer.write_record_pretty(&flat)?;
        } else {
            writer.write_record(&flat)?;
        }
    }
    writer.flush()?;

    info!(records = writer.written(), "flatten complete");
    Ok(())
}
