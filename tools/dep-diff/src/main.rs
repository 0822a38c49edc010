//! dep-diff: package.json diff where every changed dependency is classified
//!
//! Usage:
//!   dep-diff <old> <new>                # list removed/added/changed deps with risk
//!   dep-diff <old> <new> --json         # one classification JSON line per changed dep
//!   dep-diff <old> <new> --repo <path>  # also count files in <path> importing each dep
//!   dep-diff <old> <new> -q             # quiet: exit 0 if same, 1 if different
//!
//! Compares dependencies and devDependencies. Exit 2 on unreadable input.

mod impact;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::process;
use update_classifier::{run, Ecosystem, Request, Response};

use crate::impact::{scan_repo, UsageReport};

type Deps = BTreeMap<String, String>;

#[derive(serde::Deserialize, Default)]
struct PackageJson {
    #[serde(default)]
    dependencies: Deps,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: Deps,
}

#[derive(Parser)]
#[command(name = "dep-diff", version, about = "Diff two package.json files and classify each update")]
struct Cli {
    old: PathBuf,
    new: PathBuf,

    /// Only exit code (0=same, 1=different)
    #[arg(short, long)]
    quiet: bool,

    /// Emit JSON lines instead of the text listing
    #[arg(long)]
    json: bool,

    /// Repository to scan for files importing each changed dependency
    #[arg(long)]
    repo: Option<PathBuf>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Diff {
    removed: Vec<(String, String)>,
    added: Vec<(String, String)>,
    changed: Vec<(String, String, String)>,
}

impl Diff {
    fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}

#[derive(Serialize)]
struct ChangedDep<'a> {
    name: &'a str,
    from: &'a str,
    to: &'a str,
    classification: Response,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<UsageReport>,
}

fn load_deps(path: &Path) -> Result<Deps> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let pkg: PackageJson = serde_json::from_str(&contents)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    Ok(flatten(pkg.dependencies, pkg.dev_dependencies))
}

/// Runtime dependencies win over a dev entry with the same name.
fn flatten(mut deps: Deps, dev: Deps) -> Deps {
    for (name, v) in dev {
        deps.entry(name).or_insert(v);
    }
    deps
}

fn compare(old: &Deps, new: &Deps) -> Diff {
    let mut diff = Diff::default();
    let names: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    for name in names {
        match (old.get(name), new.get(name)) {
            (Some(a), None) => diff.removed.push((name.clone(), a.clone())),
            (None, Some(b)) => diff.added.push((name.clone(), b.clone())),
            (Some(a), Some(b)) if a != b => diff.changed.push((name.clone(), a.clone(), b.clone())),
            _ => {}
        }
    }
    diff
}

/// Strip npm range operators so `^4.17.20` classifies as `4.17.20`.
fn plain_version(range: &str) -> &str {
    range
        .trim()
        .trim_start_matches(|c: char| matches!(c, '^' | '~' | '>' | '<' | '=' | 'v' | ' '))
}

fn classify_change(name: &str, from: &str, to: &str) -> Response {
    run(&Request {
        package_name: Some(name.to_string()),
        old_version: Some(plain_version(from).to_string()),
        new_version: Some(plain_version(to).to_string()),
        ecosystem: Some("npm".to_string()),
        ..Request::default()
    })
}

fn main() {
    let cli = Cli::parse();
    match run_cli(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("dep-diff: {:#}", e);
            process::exit(2);
        }
    }
}

fn run_cli(cli: &Cli) -> Result<i32> {
    let old = load_deps(&cli.old)?;
    let new = load_deps(&cli.new)?;
    let diff = compare(&old, &new);

    if cli.quiet {
        return Ok(if diff.is_empty() { 0 } else { 1 });
    }

    if let Some(repo) = &cli.repo {
        if !repo.is_dir() {
            bail!("repository path {} is not a directory", repo.display());
        }
    }
    let usage = |name: &str| -> Result<Option<UsageReport>> {
        match &cli.repo {
            Some(repo) => Ok(Some(scan_repo(repo, name, Ecosystem::Npm)?)),
            None => Ok(None),
        }
    };

    if diff.is_empty() {
        if !cli.json {
            println!("No differences.");
        }
        return Ok(0);
    }

    if cli.json {
        for (name, from, to) in &diff.changed {
            let line = ChangedDep {
                name,
                from,
                to,
                classification: classify_change(name, from, to),
                usage: usage(name.as_str())?,
            };
            println!("{}", serde_json::to_string(&line)?);
        }
        return Ok(1);
    }

    for (name, v) in &diff.removed {
        println!("- {}@{}", name, v);
    }
    for (name, v) in &diff.added {
        println!("+ {}@{}", name, v);
    }
    for (name, from, to) in &diff.changed {
        let c = classify_change(name, from, to);
        println!(
            "~ {}: {} -> {} [{}, risk {} {}, {}]",
            name, from, to, c.update_type, c.risk_score, c.risk_level, c.deployment_plan.strategy
        );
        if let Some(report) = usage(name.as_str())? {
            println!("{}", usage_line(&report));
        }
    }

    Ok(1)
}

fn usage_line(report: &UsageReport) -> String {
    let kinds: Vec<String> = report
        .by_kind
        .iter()
        .map(|(kind, files)| format!("{}: {}", kind.as_str(), files.len()))
        .collect();
    if kinds.is_empty() {
        format!("    used in 0 files (usage impact +{})", report.usage_score)
    } else {
        format!(
            "    used in {} files ({}) (usage impact +{})",
            report.total,
            kinds.join(", "),
            report.usage_score
        )
    }
}
