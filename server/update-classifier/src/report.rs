//! Breaking-change notes, testing requirements, and rollout recommendations.

use crate::types::{RiskLevel, TestingRequirement, UpdateDescriptor, UpdateType};

/// Breaking changes implied by the version bump or announced in the PR body.
pub fn breaking_changes(descriptor: &UpdateDescriptor, body: Option<&str>) -> Vec<String> {
  let mut out = Vec::new();
  if descriptor.update_type == UpdateType::Major {
    out.push(format!(
      "Major version change ({} → {}) - likely breaking changes",
      major_of(&descriptor.old_version),
      major_of(&descriptor.new_version)
    ));
  }
  if let Some(body) = body {
    let body = body.to_ascii_lowercase();
    if body.contains("breaking change") || body.contains("breaking-change") {
      out.push("Breaking changes mentioned in release notes".to_string());
    }
  }
  out
}

fn major_of(version: &str) -> &str {
  version.split('.').next().unwrap_or(version)
}

/// Test suites the pipeline must run before merging. Ordered, no duplicates.
pub fn testing_requirements(
  descriptor: &UpdateDescriptor,
  risk_level: RiskLevel,
) -> Vec<TestingRequirement> {
  let mut out = vec![TestingRequirement::Unit];
  if matches!(descriptor.update_type, UpdateType::Minor | UpdateType::Major) {
    out.push(TestingRequirement::Integration);
  }
  if descriptor.update_type == UpdateType::Major || risk_level == RiskLevel::High {
    out.push(TestingRequirement::E2e);
    out.push(TestingRequirement::Performance);
  }
  if descriptor.is_security_update {
    out.push(TestingRequirement::SecurityScan);
  }
  out
}

/// Short human-readable advice for the reviewer.
pub fn recommendations(risk_score: u8, breaking_changes: &[String]) -> Vec<String> {
  let mut out = Vec::new();
  if risk_score >= 70 {
    out.push("High impact update - thorough testing required".to_string());
    out.push("Consider staged rollout or canary deployment".to_string());
    out.push("Review all affected files for compatibility".to_string());
  } else if risk_score >= 40 {
    out.push("Medium impact - standard testing recommended".to_string());
    out.push("Review critical path files".to_string());
  } else {
    out.push("Low impact - basic testing should suffice".to_string());
  }
  if !breaking_changes.is_empty() {
    out.push("Breaking changes detected - manual review required".to_string());
    out.push("Update code to accommodate API changes".to_string());
    out.push("Consider creating a migration guide".to_string());
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Ecosystem;
  use std::collections::BTreeSet;

  fn descriptor(old: &str, new: &str, update_type: UpdateType, security: bool) -> UpdateDescriptor {
    UpdateDescriptor {
      package_name: "pkg".into(),
      old_version: old.into(),
      new_version: new.into(),
      update_type,
      ecosystem: Ecosystem::Npm,
      is_security_update: security,
      labels: BTreeSet::new(),
    }
  }

  #[test]
  fn major_bump_reports_breaking_change() {
    let d = descriptor("4.18.0", "5.0.0", UpdateType::Major, false);
    let out = breaking_changes(&d, None);
    assert_eq!(out.len(), 1);
    assert!(out[0].contains("4 → 5"));
  }

  #[test]
  fn body_mention_reports_breaking_change() {
    let d = descriptor("1.2.0", "1.3.0", UpdateType::Minor, false);
    let out = breaking_changes(&d, Some("## BREAKING CHANGE: drops node 14"));
    assert_eq!(out, vec!["Breaking changes mentioned in release notes".to_string()]);
    assert!(breaking_changes(&d, Some("bug fixes")).is_empty());
  }

  #[test]
  fn patch_needs_only_unit_tests() {
    let d = descriptor("1.0.0", "1.0.1", UpdateType::Patch, false);
    assert_eq!(
      testing_requirements(&d, RiskLevel::Minimal),
      vec![TestingRequirement::Unit]
    );
  }

  #[test]
  fn major_security_needs_everything() {
    let d = descriptor("1.0.0", "2.0.0", UpdateType::Major, true);
    assert_eq!(
      testing_requirements(&d, RiskLevel::High),
      vec![
        TestingRequirement::Unit,
        TestingRequirement::Integration,
        TestingRequirement::E2e,
        TestingRequirement::Performance,
        TestingRequirement::SecurityScan,
      ]
    );
  }

  #[test]
  fn high_risk_patch_needs_e2e() {
    let d = descriptor("1.0.0", "1.0.1", UpdateType::Patch, false);
    let reqs = testing_requirements(&d, RiskLevel::High);
    assert!(reqs.contains(&TestingRequirement::E2e));
    assert!(!reqs.contains(&TestingRequirement::Integration));
  }

  #[test]
  fn recommendations_by_band() {
    assert_eq!(recommendations(90, &[]).len(), 3);
    assert_eq!(recommendations(40, &[]).len(), 2);
    assert_eq!(recommendations(5, &[]), vec!["Low impact - basic testing should suffice".to_string()]);
    let with_breaking = recommendations(5, &["x".to_string()]);
    assert!(with_breaking.iter().any(|r| r.contains("manual review")));
  }
}
