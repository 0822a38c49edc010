//! Binary entrypoint: read a request from stdin, write the classification to stdout.
//!
//! Default mode reads one JSON object. `--batch` reads JSON lines and writes one
//! response (or ErrorOutput) line per input line. `--format text` prints a report
//! and exits 2/1/0 for high/medium/other risk so CI can gate on it.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use tracing::Level;

use update_classifier::render::{exit_code, render_error_text, render_text};
use update_classifier::types::ErrorOutput;
use update_classifier::{classify, telemetry, Policy, Request, Response, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
  Json,
  Text,
}

#[derive(Parser)]
#[command(name = "update-classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Classify dependency-update PRs: risk, auto-merge, deployment plan", long_about = None)]
struct Cli {
  /// Read JSON lines instead of a single object
  #[arg(long)]
  batch: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t = Format::Json)]
  format: Format,

  /// Policy JSON file overriding the default thresholds
  #[arg(long, env = "UPDATE_CLASSIFIER_POLICY")]
  policy: Option<PathBuf>,

  /// Pretty-print JSON output
  #[arg(long)]
  pretty: bool,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,

  /// Emit JSON-formatted log lines on stderr
  #[arg(long)]
  json_logs: bool,
}

fn main() {
  let cli = Cli::parse();
  let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
  telemetry::init_tracing(cli.json_logs, level);

  match run_binary(&cli) {
    Ok(code) => std::process::exit(code),
    Err(e) => {
      let _ = writeln!(io::stderr(), "update-classifier error: {:#}", e);
      std::process::exit(3);
    }
  }
}

fn run_binary(cli: &Cli) -> Result<i32> {
  let policy = match &cli.policy {
    Some(path) => Policy::from_json_file(path)
      .with_context(|| format!("loading policy {}", path.display()))?,
    None => Policy::default(),
  };

  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());

  let worst = if cli.batch {
    run_batch(io::stdin().lock(), cli.format, &policy, &mut out)?
  } else {
    let mut raw = String::new();
    io::stdin().lock().read_to_string(&mut raw)?;
    let req: Request = serde_json::from_str(&raw).context("decoding request")?;
    let resp = classify(&req, &policy);
    emit(cli.format, cli.pretty, &mut out, &resp)?;
    Some(resp.risk_level)
  };
  out.flush()?;

  Ok(match (cli.format, worst) {
    (Format::Text, Some(level)) => exit_code(level),
    _ => 0,
  })
}

/// Classify each line; returns the highest risk level seen.
///
/// Output stays one record per line in JSON mode, so `--pretty` does not apply here.
fn run_batch(
  input: impl BufRead,
  format: Format,
  policy: &Policy,
  out: &mut impl Write,
) -> Result<Option<RiskLevel>> {
  let mut worst: Option<RiskLevel> = None;
  let mut classified = 0usize;
  let mut rejected = 0usize;

  for (idx, line) in input.lines().enumerate() {
    let line = line.context("reading stdin")?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let req: Request = match serde_json::from_str(trimmed) {
      Ok(r) => r,
      Err(e) => {
        rejected += 1;
        tracing::warn!(line = idx + 1, "rejected input line: {}", e);
        let err = ErrorOutput::new(format!("json parse: {}", e)).with_line(idx + 1);
        match format {
          Format::Text => write!(out, "{}", render_error_text(&err))?,
          Format::Json => serde_json::to_writer(&mut *out, &err)?,
        }
        writeln!(out)?;
        continue;
      }
    };

    let resp = classify(&req, policy);
    worst = worst.max(Some(resp.risk_level));
    classified += 1;
    emit(format, false, &mut *out, &resp)?;
  }

  tracing::info!(classified, rejected, "batch complete");
  Ok(worst)
}

fn emit(format: Format, pretty: bool, out: &mut impl Write, resp: &Response) -> Result<()> {
  match format {
    Format::Text => write!(out, "{}", render_text(resp))?,
    Format::Json if pretty => serde_json::to_writer_pretty(&mut *out, resp)?,
    Format::Json => serde_json::to_writer(&mut *out, resp)?,
  }
  writeln!(out)?;
  Ok(())
}
