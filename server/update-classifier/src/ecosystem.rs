//! Ecosystem detection from the PR's changed file paths.

use crate::types::Ecosystem;

/// How a rule matches one changed path. Matching is case-sensitive.
enum Pattern {
  /// Last path segment equals the name.
  FileName(&'static str),
  /// Path ends with the suffix.
  Suffix(&'static str),
  /// Path contains the substring anywhere.
  Contains(&'static str),
}

impl Pattern {
  fn matches(&self, path: &str) -> bool {
    match self {
      Pattern::FileName(name) => file_name(path) == *name,
      Pattern::Suffix(suffix) => path.ends_with(suffix),
      Pattern::Contains(needle) => path.contains(needle),
    }
  }
}

/// Rules in priority order; the first rule with any matching path wins.
const RULES: &[(Ecosystem, &[Pattern])] = &[
  (
    Ecosystem::Npm,
    &[Pattern::FileName("package.json"), Pattern::FileName("package-lock.json")],
  ),
  (
    Ecosystem::Pip,
    &[
      Pattern::FileName("requirements.txt"),
      Pattern::FileName("Pipfile"),
      Pattern::FileName("setup.py"),
    ],
  ),
  (Ecosystem::Maven, &[Pattern::FileName("pom.xml")]),
  (Ecosystem::Gradle, &[Pattern::FileName("build.gradle")]),
  (Ecosystem::Go, &[Pattern::FileName("go.mod")]),
  (Ecosystem::Bundler, &[Pattern::FileName("Gemfile")]),
  (Ecosystem::Nuget, &[Pattern::Suffix(".csproj")]),
  (Ecosystem::Docker, &[Pattern::Suffix("Dockerfile")]),
  (Ecosystem::GithubActions, &[Pattern::Contains(".github/workflows")]),
];

fn file_name(path: &str) -> &str {
  path.rsplit('/').next().unwrap_or(path)
}

/// Detect the ecosystem of an update from its changed files. No match → `Unknown`.
pub fn detect_ecosystem(changed_files: &[String]) -> Ecosystem {
  RULES
    .iter()
    .find(|(_, patterns)| {
      changed_files
        .iter()
        .any(|path| patterns.iter().any(|p| p.matches(path)))
    })
    .map(|(ecosystem, _)| *ecosystem)
    .unwrap_or(Ecosystem::Unknown)
}
