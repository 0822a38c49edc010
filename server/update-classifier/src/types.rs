//! Request/response types for the update classifier (JSON contract with the CI orchestrator).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Semantic size of a version change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
  Major,
  Minor,
  Patch,
  Unknown,
}

/// Packaging/build system the dependency belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ecosystem {
  Npm,
  Pip,
  Maven,
  Gradle,
  Go,
  Bundler,
  Nuget,
  Docker,
  GithubActions,
  Unknown,
}

impl Ecosystem {
  /// Accepts the names used by Dependabot configs and PR labels as well as the canonical ones.
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "npm" | "yarn" | "javascript" => Some(Self::Npm),
      "pip" | "pypi" | "python" => Some(Self::Pip),
      "maven" | "java" => Some(Self::Maven),
      "gradle" => Some(Self::Gradle),
      "go" | "gomod" | "go_modules" => Some(Self::Go),
      "bundler" | "ruby" | "rubygems" => Some(Self::Bundler),
      "nuget" | "dotnet" => Some(Self::Nuget),
      "docker" => Some(Self::Docker),
      "github-actions" | "github_actions" | "actions" => Some(Self::GithubActions),
      "unknown" => Some(Self::Unknown),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  Minimal,
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
  Rolling,
  Canary,
  BlueGreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
  Staging,
  Canary,
  Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestingRequirement {
  Unit,
  Integration,
  E2e,
  Performance,
  SecurityScan,
}

macro_rules! wire_names {
  ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
    impl $ty {
      /// Name as it appears on the wire.
      pub fn as_str(self) -> &'static str {
        match self {
          $(Self::$variant => $name),+
        }
      }
    }

    impl std::fmt::Display for $ty {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
      }
    }
  };
}

wire_names!(UpdateType { Major => "major", Minor => "minor", Patch => "patch", Unknown => "unknown" });
wire_names!(Ecosystem {
  Npm => "npm",
  Pip => "pip",
  Maven => "maven",
  Gradle => "gradle",
  Go => "go",
  Bundler => "bundler",
  Nuget => "nuget",
  Docker => "docker",
  GithubActions => "github-actions",
  Unknown => "unknown",
});
wire_names!(RiskLevel { Minimal => "minimal", Low => "low", Medium => "medium", High => "high" });
wire_names!(Strategy { Rolling => "rolling", Canary => "canary", BlueGreen => "blue-green" });
wire_names!(Stage { Staging => "staging", Canary => "canary", Production => "production" });
wire_names!(TestingRequirement {
  Unit => "unit",
  Integration => "integration",
  E2e => "e2e",
  Performance => "performance",
  SecurityScan => "security-scan",
});

// ---------------------------------------------------------------------------
// Inbound (what the orchestrator sends)
// ---------------------------------------------------------------------------

/// One classification request. Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Request {
  /// PR title, used when package/version fields are absent.
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub package_name: Option<String>,
  #[serde(default)]
  pub old_version: Option<String>,
  #[serde(default)]
  pub new_version: Option<String>,
  /// Explicit ecosystem name; detected from `changed_files` when absent or unrecognized.
  #[serde(default)]
  pub ecosystem: Option<String>,
  #[serde(default)]
  pub changed_files: Vec<String>,
  #[serde(default)]
  pub labels: Vec<String>,
  #[serde(default)]
  pub body: Option<String>,
  /// Overrides label/body security detection.
  #[serde(default)]
  pub is_security_update: Option<bool>,
  #[serde(default)]
  pub tests_passed: Option<bool>,
}

// ---------------------------------------------------------------------------
// Internal value objects
// ---------------------------------------------------------------------------

/// Normalized description of one dependency update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateDescriptor {
  pub package_name: String,
  pub old_version: String,
  pub new_version: String,
  pub update_type: UpdateType,
  pub ecosystem: Ecosystem,
  pub is_security_update: bool,
  pub labels: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
  pub risk_score: u8,
  pub risk_level: RiskLevel,
  pub auto_merge_eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
  pub strategy: Strategy,
  pub stages: Vec<Stage>,
  pub approval_required: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub canary_percentage: Option<u8>,
}

// ---------------------------------------------------------------------------
// Outbound (what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
  pub decision_id: String,
  pub package_name: String,
  pub old_version: String,
  pub new_version: String,
  pub update_type: UpdateType,
  pub ecosystem: Ecosystem,
  pub is_security_update: bool,
  pub risk_score: u8,
  pub risk_level: RiskLevel,
  pub auto_merge_eligible: bool,
  pub deployment_plan: DeploymentPlan,
  pub testing_requirements: Vec<TestingRequirement>,
  pub breaking_changes: Vec<String>,
  pub recommendations: Vec<String>,
  pub explanations: Vec<String>,
}

impl Response {
  pub fn assessment(&self) -> RiskAssessment {
    RiskAssessment {
      risk_score: self.risk_score,
      risk_level: self.risk_level,
      auto_merge_eligible: self.auto_merge_eligible,
    }
  }
}

/// Structured error line for batch input that could not be decoded.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub line: Option<usize>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      line: None,
    }
  }

  pub fn with_line(mut self, line: usize) -> Self {
    self.line = Some(line);
    self
  }
}
