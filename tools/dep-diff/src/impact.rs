//! Codebase usage scan: which files import a package, grouped by kind.
//!
//! Reads the working tree only; no package-manager calls.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use update_classifier::Ecosystem;
use walkdir::WalkDir;

/// Directories never scanned.
const SKIP_DIRS: &[&str] = &["node_modules", "venv", ".venv", ".git", "target", "dist", "build"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Tests,
    Source,
    Config,
    Other,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Tests => "tests",
            FileKind::Source => "source",
            FileKind::Config => "config",
            FileKind::Other => "other",
        }
    }

    /// Same precedence as the path check: tests, then source dirs, then config.
    pub fn of(rel_path: &str) -> Self {
        let lower = rel_path.to_lowercase();
        if lower.contains("test") {
            FileKind::Tests
        } else if rel_path.contains("src/") || rel_path.contains("lib/") {
            FileKind::Source
        } else if lower.contains("config") {
            FileKind::Config
        } else {
            FileKind::Other
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageReport {
    pub total: usize,
    pub by_kind: BTreeMap<FileKind, Vec<String>>,
    /// Relative path -> `Line N: <import line>`.
    pub details: BTreeMap<String, Vec<String>>,
    /// Extra impact from breadth of use, 0-40.
    pub usage_score: u8,
}

/// Bands on the number of importing files.
pub fn usage_score(affected_files: usize) -> u8 {
    match affected_files {
        n if n > 50 => 40,
        n if n > 20 => 25,
        n if n > 10 => 15,
        n if n > 0 => 5,
        _ => 0,
    }
}

struct Matcher {
    extensions: &'static [&'static str],
    imports: Vec<Regex>,
}

fn matcher(ecosystem: Ecosystem) -> Result<Option<Matcher>> {
    let (extensions, patterns): (&'static [&'static str], &[&str]) = match ecosystem {
        Ecosystem::Npm => (
            &["js", "jsx", "ts", "tsx", "mjs", "cjs"],
            &[
                r#"import\s+[^;]*?from\s+['"]([^'"]+)['"]"#,
                r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
                r#"import\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
            ],
        ),
        Ecosystem::Pip => (
            &["py"],
            &[r"(?m)^\s*import\s+([\w\.]+)", r"(?m)^\s*from\s+([\w\.]+)\s+import"],
        ),
        Ecosystem::Maven | Ecosystem::Gradle => (&["java"], &[r"import\s+(?:static\s+)?([\w\.]+);"]),
        _ => return Ok(None),
    };
    let imports = patterns.iter().map(|p| Regex::new(p)).collect::<Result<Vec<_>, _>>()?;
    Ok(Some(Matcher { extensions, imports }))
}

/// Whether an imported module path refers to `package`.
fn refers_to(module: &str, package: &str, ecosystem: Ecosystem) -> bool {
    match ecosystem {
        Ecosystem::Npm => module == package || module.starts_with(&format!("{}/", package)),
        Ecosystem::Pip => {
            let package = package.replace('-', "_").to_lowercase();
            let module = module.to_lowercase();
            module == package || module.starts_with(&format!("{}.", package))
        }
        _ => module.contains(package),
    }
}

fn uses_package(content: &str, package: &str, ecosystem: Ecosystem, m: &Matcher) -> bool {
    m.imports.iter().any(|re| {
        re.captures_iter(content)
            .filter_map(|c| c.get(1))
            .any(|module| refers_to(module.as_str(), package, ecosystem))
    })
}

fn usage_lines(content: &str, package: &str) -> Vec<String> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains(package) && (line.contains("import") || line.contains("require")))
        .map(|(i, line)| format!("Line {}: {}", i + 1, line.trim()))
        .collect()
}

/// Scan `root` for files importing `package`. Unreadable or non-UTF-8 files are skipped.
pub fn scan_repo(root: &Path, package: &str, ecosystem: Ecosystem) -> Result<UsageReport> {
    let m = match matcher(ecosystem)? {
        Some(m) => m,
        None => return Ok(UsageReport::default()),
    };

    let mut report = UsageReport::default();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !SKIP_DIRS.iter().any(|d| e.file_name() == *d));

    for entry in walker.flatten() {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !m.extensions.contains(&ext) {
            continue;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => continue,
        };
        if !uses_package(&content, package, ecosystem, &m) {
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        report.by_kind.entry(FileKind::of(&rel)).or_default().push(rel.clone());
        report.details.insert(rel, usage_lines(&content, package));
    }

    for files in report.by_kind.values_mut() {
        files.sort();
    }
    report.total = report.details.len();
    report.usage_score = usage_score(report.total);
    Ok(report)
}
