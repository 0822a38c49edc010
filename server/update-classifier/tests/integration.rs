//! Integration tests for the update classifier.

use pretty_assertions::assert_eq;
use update_classifier::{
  classify, run, Ecosystem, Policy, Request, Response, RiskLevel, Stage, Strategy, UpdateType,
};

fn request(name: &str, old: &str, new: &str, security: bool) -> Request {
  Request {
    package_name: Some(name.into()),
    old_version: Some(old.into()),
    new_version: Some(new.into()),
    is_security_update: Some(security),
    tests_passed: Some(true),
    ..Request::default()
  }
}

#[test]
fn security_patch_for_lodash_auto_merges() {
  let mut req = request("lodash", "4.17.20", "4.17.21", true);
  req.ecosystem = Some("npm".into());
  let out = run(&req);

  assert_eq!(out.update_type, UpdateType::Patch);
  assert_eq!(out.ecosystem, Ecosystem::Npm);
  assert_eq!(out.risk_score, 5);
  assert_eq!(out.risk_level, RiskLevel::Minimal);
  assert!(out.auto_merge_eligible);
  assert_eq!(out.deployment_plan.strategy, Strategy::Rolling);
  assert_eq!(out.deployment_plan.stages, vec![Stage::Production]);
}

#[test]
fn major_express_is_high_risk_and_never_auto_merged() {
  let out = run(&request("express", "4.18.0", "5.0.0", false));

  assert_eq!(out.update_type, UpdateType::Major);
  assert_eq!(out.risk_score, 90);
  assert_eq!(out.risk_level, RiskLevel::High);
  assert!(!out.auto_merge_eligible);
  assert_eq!(out.deployment_plan.strategy, Strategy::BlueGreen);
  assert!(out.deployment_plan.approval_required);
  assert!(!out.breaking_changes.is_empty());
}

#[test]
fn minor_security_at_boundary_auto_merges() {
  let out = run(&request("axios", "1.2.0", "1.3.0", true));

  assert_eq!(out.update_type, UpdateType::Minor);
  assert_eq!(out.risk_score, 40);
  assert_eq!(out.risk_level, RiskLevel::Medium);
  assert!(out.auto_merge_eligible);
  // 40 is not above the canary threshold.
  assert_eq!(out.deployment_plan.strategy, Strategy::Rolling);
}

#[test]
fn minor_without_security_needs_review() {
  let out = run(&request("axios", "1.2.0", "1.3.0", false));
  assert_eq!(out.risk_score, 30);
  assert!(!out.auto_merge_eligible);
}

#[test]
fn docker_and_kubernetes_infrastructure_bonus_applied_once() {
  let mut req = request("kubernetes-client", "1.2.3", "1.2.4", false);
  req.changed_files = vec!["Dockerfile".into()];
  let out = run(&req);

  assert_eq!(out.ecosystem, Ecosystem::Docker);
  assert_eq!(out.risk_score, 25);
  assert_eq!(out.risk_level, RiskLevel::Low);
}

#[test]
fn malformed_version_degrades_to_unknown() {
  let out = run(&request("express", "latest", "5.0.0", true));

  assert_eq!(out.update_type, UpdateType::Unknown);
  assert_eq!(out.risk_score, 0);
  assert_eq!(out.risk_level, RiskLevel::Minimal);
  assert!(!out.auto_merge_eligible);
}

#[test]
fn dependabot_payload_end_to_end() {
  let json = r#"{
    "title": "chore(deps): bump django from 4.2.1 to 4.2.7 in /backend",
    "changed_files": ["backend/requirements.txt"],
    "labels": ["dependencies", "python"],
    "body": "Bumps django. Fixes CVE-2023-43665.",
    "tests_passed": true,
    "pr_number": 118
  }"#;
  let req: Request = serde_json::from_str(json).unwrap();
  let out = run(&req);

  assert_eq!(out.package_name, "django");
  assert_eq!(out.old_version, "4.2.1");
  assert_eq!(out.new_version, "4.2.7");
  assert_eq!(out.ecosystem, Ecosystem::Pip);
  assert!(out.is_security_update);
  // 10 - 5 (security patch) + 20 (critical framework)
  assert_eq!(out.risk_score, 25);
  assert!(out.auto_merge_eligible);
}

#[test]
fn response_json_shape() {
  let out = run(&request("react", "17.0.2", "17.1.0", false));
  let value = serde_json::to_value(&out).unwrap();

  assert_eq!(value["update_type"], "minor");
  assert_eq!(value["risk_level"], "medium");
  assert_eq!(value["deployment_plan"]["strategy"], "canary");
  assert_eq!(value["deployment_plan"]["canary_percentage"], 10);
  assert_eq!(value["deployment_plan"]["stages"], serde_json::json!(["staging", "production"]));

  let back: Response = serde_json::from_value(value).unwrap();
  assert_eq!(back, out);
}

// ---------------------------------------------------------------------------
// Properties over a grid of inputs
// ---------------------------------------------------------------------------

const NAMES: &[&str] = &["lodash", "express", "kubernetes-client", "vue-router", "", "Spring-Core"];
const VERSIONS: &[&str] = &["1", "1.0", "1.0.0", "1.0.1", "1.4.0", "2.0.0", "10.2.3", "latest", "1.0.0-rc1"];
const FILES: &[&str] = &["Dockerfile", "package.json", "go.mod", "README.md"];

fn grid() -> Vec<Request> {
  let mut out = Vec::new();
  for name in NAMES {
    for old in VERSIONS {
      for new in VERSIONS {
        for security in [false, true] {
          for file in FILES {
            for tests in [false, true] {
              out.push(Request {
                package_name: Some(name.to_string()),
                old_version: Some(old.to_string()),
                new_version: Some(new.to_string()),
                changed_files: vec![file.to_string()],
                is_security_update: Some(security),
                tests_passed: Some(tests),
                ..Request::default()
              });
            }
          }
        }
      }
    }
  }
  out
}

#[test]
fn score_always_within_bounds_and_consistent() {
  for req in grid() {
    let out = run(&req);
    assert!(out.risk_score <= 100);
    assert_eq!(
      out.risk_level,
      update_classifier::score::classify_risk_level(out.risk_score)
    );
  }
}

#[test]
fn major_and_failed_tests_never_auto_merge() {
  for req in grid() {
    let out = run(&req);
    if out.update_type == UpdateType::Major || req.tests_passed == Some(false) {
      assert!(!out.auto_merge_eligible, "{:?}", req);
    }
    if out.update_type == UpdateType::Unknown {
      assert!(!out.auto_merge_eligible, "{:?}", req);
    }
  }
}

#[test]
fn classification_is_idempotent() {
  let policy = Policy::default();
  for req in grid() {
    assert_eq!(classify(&req, &policy), classify(&req, &policy));
  }
}

#[test]
fn same_version_is_patch_for_well_formed_input() {
  for v in VERSIONS.iter().filter(|v| v.bytes().all(|b| b.is_ascii_digit() || b == b'.')) {
    let out = run(&request("lodash", v, v, false));
    assert_eq!(out.update_type, UpdateType::Patch, "{}", v);
  }
}

#[test]
fn major_bump_never_scores_below_minor_bump() {
  for name in NAMES.iter().filter(|n| !n.is_empty()) {
    for security in [false, true] {
      let major = run(&request(name, "1.0.0", "2.0.0", security));
      let minor = run(&request(name, "1.0.0", "1.1.0", security));
      let patch = run(&request(name, "1.0.0", "1.0.1", security));
      assert!(major.risk_score >= minor.risk_score, "{}", name);
      assert!(minor.risk_score >= patch.risk_score, "{}", name);
    }
  }
}

#[test]
fn canary_percentage_present_only_for_canary() {
  for req in grid() {
    let plan = run(&req).deployment_plan;
    assert_eq!(plan.canary_percentage.is_some(), plan.strategy == Strategy::Canary);
    assert_eq!(plan.approval_required, plan.strategy == Strategy::BlueGreen);
  }
}
