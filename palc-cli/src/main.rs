//! palc command line
//!
//! Reads one query per line from stdin and prints the results. History
//! and remembered units carry over between lines, the way they do while
//! typing into a search box.
//!
//! Lines:
//! - any text: run it as a query
//! - `:reset`: forget history and remembered units
//!
//! With `--json` each line may also be a request object `{"query": "..."}`
//! and every answer is one JSON object per line.

use clap::Parser;
use palc::{Engine, EngineOptions, Entry};
use palc_core::PalcError;
use palc_kitchen::{Dataset, ALIAS_JSON, FOOD_JSON, FORMULAE_JSON};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const RESET: &str = ":reset";

#[derive(Parser, Debug)]
#[command(name = "palc", version, about = "Incremental search over a cooking reference")]
struct Args {
    /// Directory holding food.json, alias.json and formulae.json.
    /// Missing files fall back to the built-in kitchen data.
    #[arg(short, long, env = "PALC_DATA_PATH")]
    data: Option<PathBuf>,

    /// Read and write one JSON object per line
    #[arg(long)]
    json: bool,

    /// Stop after this many entries per query
    #[arg(long)]
    limit: Option<usize>,

    /// Placed between alias fragments in headings
    #[arg(long, default_value = ", ")]
    separator: String,

    /// Decimal places for converted and scaled values
    #[arg(long, default_value_t = 2)]
    decimals: usize,
}

#[derive(Debug, Deserialize)]
struct Request {
    query: String,
}

#[derive(Debug, Serialize)]
struct Response<'a> {
    query: &'a str,
    results: Vec<Entry>,
}

#[derive(Debug, Serialize)]
struct Failure<'a> {
    error: &'a PalcError,
}

/// One file from the data directory, or the built-in copy when absent
fn read_or_builtin(dir: &Path, name: &str, builtin: &'static str) -> Result<String, PalcError> {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(text) => {
            debug!(path = %path.display(), "read data file");
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(file = name, "not in data path, using built-in copy");
            Ok(builtin.to_string())
        }
        Err(e) => Err(PalcError::io(format!("Failed to read '{}': {}", path.display(), e))),
    }
}

fn load_dataset(dir: &Path) -> Result<Dataset, PalcError> {
    let food = read_or_builtin(dir, "food.json", FOOD_JSON)?;
    let alias = read_or_builtin(dir, "alias.json", ALIAS_JSON)?;
    let formulae = read_or_builtin(dir, "formulae.json", FORMULAE_JSON)?;
    Dataset::from_json_strs(&food, &alias, &formulae)
}

/// Query text of one input line, or the error to report for it
fn request_text(line: &str, json: bool) -> Result<String, PalcError> {
    if json && line.starts_with('{') {
        let request: Request = serde_json::from_str(line)?;
        Ok(request.query)
    } else {
        Ok(line.to_string())
    }
}

fn emit(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text)?;
    out.flush()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        format!(r#"{{"error":{{"code":"INTERNAL","message":"{}"}}}}"#, e)
    })
}

fn run(
    engine: &mut Engine<'_>,
    args: &Args,
    mut reader: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            debug!("end of input");
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!("input line is not valid UTF-8, invalid bytes replaced");
        }
        let input = line.trim();
        if input.is_empty() && !args.json {
            continue;
        }

        let text = match request_text(input, args.json) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "bad request line");
                emit(out, &to_json(&Failure { error: &e }))?;
                continue;
            }
        };

        if text.trim() == RESET {
            engine.reset();
            info!("history and remembered units cleared");
            if args.json {
                let response = Response { query: &text, results: Vec::new() };
                emit(out, &to_json(&response))?;
            }
            continue;
        }

        let limit = args.limit.unwrap_or(usize::MAX);
        let results: Vec<Entry> = engine.query(&text).take(limit).collect();
        debug!(query = %text, entries = results.len(), "answered");

        if args.json {
            emit(out, &to_json(&Response { query: &text, results }))?;
        } else {
            for entry in &results {
                writeln!(out, "{}", entry)?;
            }
            out.flush()?;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let loaded;
    let dataset = match &args.data {
        Some(dir) => match load_dataset(dir) {
            Ok(data) => {
                info!(path = %dir.display(), "dataset loaded");
                loaded = data;
                &loaded
            }
            Err(e) => {
                error!(error = %e, path = %dir.display(), "failed to load dataset");
                return ExitCode::FAILURE;
            }
        },
        None => Dataset::builtin(),
    };

    let options = EngineOptions::new()
        .with_separator(args.separator.clone())
        .with_decimals(args.decimals);
    let mut engine = Engine::new(dataset).with_options(options);

    match run(&mut engine, &args, io::stdin().lock(), &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "stdin or stdout failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_text() {
        assert_eq!(request_text("cups 2", false).unwrap(), "cups 2");
        assert_eq!(request_text(r#"{"query": "oil f"}"#, true).unwrap(), "oil f");
        // plain text is accepted in json mode too
        assert_eq!(request_text("boil", true).unwrap(), "boil");
        assert!(request_text(r#"{"q": 1}"#, true).is_err());
    }

    #[test]
    fn test_missing_files_fall_back() {
        let dir = std::env::temp_dir().join("palc-cli-missing-data");
        let data = load_dataset(&dir).unwrap();
        assert!(data.graph.get(&["cups", "1 cup"]).is_some());
    }

    #[test]
    fn test_response_shape() {
        let response = Response {
            query: "cups",
            results: vec![Entry::branch("cups")],
        };
        let value: serde_json::Value = serde_json::from_str(&to_json(&response)).unwrap();
        assert_eq!(value["query"], "cups");
        assert_eq!(value["results"][0]["type"], "branch");
        assert_eq!(value["results"][0]["value"], "cups");
    }

    fn session(args: &[&str], input: &[u8]) -> String {
        let args = Args::try_parse_from(args.iter().copied()).unwrap();
        let mut engine = Engine::new(Dataset::builtin());
        let mut out = Vec::new();
        run(&mut engine, &args, io::Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        let text = session(&["palc"], b"cups\n\xff\xfe\nversion\n");
        assert!(text.starts_with("# cup measures\n"));
        assert!(text.ends_with("  version = 0.0.1\n"));

        let text = session(&["palc", "--json"], b"\xff\n{\"query\": \"version\"}\n");
        let replies: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["results"], serde_json::json!([]));
        assert_eq!(replies[1]["results"][0]["value"], "version = 0.0.1");
    }

    #[test]
    fn test_session_reset_and_bad_request() {
        let text = session(&["palc", "--json"], b"{\"q\": 1}\n:reset\n");
        let replies: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies[0]["error"]["code"], "PARSE_ERROR");
        assert_eq!(replies[1]["query"], ":reset");
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["palc", "--json", "--limit", "3"]).unwrap();
        assert!(args.json);
        assert_eq!(args.limit, Some(3));
        assert_eq!(args.separator, ", ");
        assert_eq!(args.decimals, 2);
    }
}
