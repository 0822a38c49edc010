//! Dependency Update Classifier — rule-based decisions for dependency-upgrade PRs.
//!
//! Turns PR metadata into an update descriptor, scores its risk, and derives
//! auto-merge eligibility and a deployment plan. Pure computation: the caller
//! fetches PR data and performs merges/deploys. Used by the binary for
//! stdin/stdout; can also be called as a library.

pub mod config;
pub mod decision;
pub mod deploy;
pub mod ecosystem;
pub mod error;
pub mod merge;
pub mod render;
pub mod report;
pub mod score;
pub mod security;
pub mod telemetry;
pub mod title;
pub mod types;
pub mod version;

pub use config::Policy;
pub use error::ClassifierError;
pub use types::{
  DeploymentPlan, Ecosystem, Request, Response, RiskAssessment, RiskLevel, Stage, Strategy,
  TestingRequirement, UpdateDescriptor, UpdateType,
};

/// Normalize a request into an update descriptor.
///
/// Explicit fields win over values parsed from the title; the title is only consulted
/// when it names the same package (or no package is given). A missing package name or
/// an unparseable version yields `UpdateType::Unknown`.
pub fn describe(req: &Request) -> UpdateDescriptor {
  let explicit_name = req
    .package_name
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty());
  // A title naming a different package contributes nothing.
  let parsed = req
    .title
    .as_deref()
    .and_then(title::parse_title)
    .filter(|t| explicit_name.map_or(true, |name| name == t.package_name));
  let pick = |explicit: &Option<String>, from_title: Option<&String>| -> String {
    explicit
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .or(from_title.map(|s| s.as_str()))
      .unwrap_or("")
      .to_string()
  };

  let package_name = pick(&req.package_name, parsed.as_ref().map(|t| &t.package_name));
  let old_version = pick(&req.old_version, parsed.as_ref().map(|t| &t.old_version));
  let new_version = pick(&req.new_version, parsed.as_ref().map(|t| &t.new_version));

  let update_type = if package_name.is_empty() {
    UpdateType::Unknown
  } else {
    version::parse_version_delta(&old_version, &new_version)
  };

  let ecosystem = req
    .ecosystem
    .as_deref()
    .and_then(Ecosystem::from_str_loose)
    .filter(|e| *e != Ecosystem::Unknown)
    .unwrap_or_else(|| ecosystem::detect_ecosystem(&req.changed_files));

  let is_security_update = req
    .is_security_update
    .unwrap_or_else(|| security::detect_security(&req.labels, req.body.as_deref()));

  UpdateDescriptor {
    package_name,
    old_version,
    new_version,
    update_type,
    ecosystem,
    is_security_update,
    labels: req.labels.iter().cloned().collect(),
  }
}

/// Classify one request under `policy` (no I/O).
pub fn classify(req: &Request, policy: &Policy) -> Response {
  let descriptor = describe(req);
  let tests_passed = req.tests_passed.unwrap_or(false);

  let breakdown = score::risk_breakdown(&descriptor, policy);
  let risk_score = breakdown.score;
  let risk_level = score::classify_risk_level(risk_score);
  let auto_merge_eligible = merge::should_auto_merge(&descriptor, risk_score, tests_passed, policy);
  let deployment_plan = deploy::plan_deployment(&descriptor, risk_score, policy);
  let testing_requirements = report::testing_requirements(&descriptor, risk_level);
  let breaking_changes = report::breaking_changes(&descriptor, req.body.as_deref());
  let recommendations = report::recommendations(risk_score, &breaking_changes);

  let mut explanations = breakdown.explanations;
  if !tests_passed {
    explanations.push("Tests have not passed; auto-merge disabled".to_string());
  }

  tracing::debug!(
    package = %descriptor.package_name,
    update_type = %descriptor.update_type,
    ecosystem = %descriptor.ecosystem,
    risk_score,
    strategy = %deployment_plan.strategy,
    auto_merge_eligible,
    "classified update"
  );

  Response {
    decision_id: decision::decision_id(&descriptor, tests_passed),
    package_name: descriptor.package_name,
    old_version: descriptor.old_version,
    new_version: descriptor.new_version,
    update_type: descriptor.update_type,
    ecosystem: descriptor.ecosystem,
    is_security_update: descriptor.is_security_update,
    risk_score,
    risk_level,
    auto_merge_eligible,
    deployment_plan,
    testing_requirements,
    breaking_changes,
    recommendations,
    explanations,
  }
}

/// Run the classifier with the default policy.
pub fn run(req: &Request) -> Response {
  classify(req, &Policy::default())
}
