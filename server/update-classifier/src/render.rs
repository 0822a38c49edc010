//! Plain-text report for humans and CI logs.

use std::fmt::Write;

use crate::types::{ErrorOutput, RiskLevel, Response};

const RULE: &str = "============================================================";

/// Render a response as a sectioned text report.
pub fn render_text(r: &Response) -> String {
  let mut out = String::new();
  // Writing to a String cannot fail.
  let _ = write_report(&mut out, r);
  out
}

fn write_report(out: &mut String, r: &Response) -> std::fmt::Result {
  writeln!(out, "{}", RULE)?;
  writeln!(out, "DEPENDENCY UPDATE CLASSIFICATION ({})", r.decision_id)?;
  writeln!(out, "{}", RULE)?;
  writeln!(out, "Package: {}", r.package_name)?;
  writeln!(out, "Version: {} → {}", r.old_version, r.new_version)?;
  writeln!(out, "Update type: {}", r.update_type)?;
  writeln!(out, "Ecosystem: {}", r.ecosystem)?;
  writeln!(out, "Security update: {}", if r.is_security_update { "yes" } else { "no" })?;
  writeln!(out, "Risk score: {}/100", r.risk_score)?;
  writeln!(out, "Risk level: {}", r.risk_level.as_str().to_ascii_uppercase())?;
  writeln!(
    out,
    "Auto-merge: {}",
    if r.auto_merge_eligible { "eligible" } else { "not eligible" }
  )?;

  writeln!(out, "\n{}\nDEPLOYMENT PLAN\n{}", RULE, RULE)?;
  let plan = &r.deployment_plan;
  writeln!(out, "Strategy: {}", plan.strategy)?;
  let stages: Vec<&str> = plan.stages.iter().map(|s| s.as_str()).collect();
  writeln!(out, "Stages: {}", stages.join(" → "))?;
  if let Some(pct) = plan.canary_percentage {
    writeln!(out, "Canary traffic: {}%", pct)?;
  }
  writeln!(
    out,
    "Approval required: {}",
    if plan.approval_required { "yes" } else { "no" }
  )?;
  let tests: Vec<&str> = r.testing_requirements.iter().map(|t| t.as_str()).collect();
  writeln!(out, "Testing: {}", tests.join(", "))?;

  if !r.breaking_changes.is_empty() {
    writeln!(out, "\n{}\nBREAKING CHANGES\n{}", RULE, RULE)?;
    for change in &r.breaking_changes {
      writeln!(out, "- {}", change)?;
    }
  }

  writeln!(out, "\n{}\nWHY\n{}", RULE, RULE)?;
  for line in &r.explanations {
    writeln!(out, "- {}", line)?;
  }

  writeln!(out, "\n{}\nRECOMMENDATIONS\n{}", RULE, RULE)?;
  for rec in &r.recommendations {
    writeln!(out, "• {}", rec)?;
  }
  Ok(())
}

/// One-line text form of a rejected batch input line.
pub fn render_error_text(err: &ErrorOutput) -> String {
  match err.line {
    Some(line) => format!("error: line {}: {}", line, err.message),
    None => format!("error: {}", err.message),
  }
}

/// CI gate exit code: 2 for high risk, 1 for medium, 0 otherwise.
pub fn exit_code(level: RiskLevel) -> i32 {
  match level {
    RiskLevel::High => 2,
    RiskLevel::Medium => 1,
    RiskLevel::Low | RiskLevel::Minimal => 0,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{run, Request};

  #[test]
  fn report_contains_key_sections() {
    let req = Request {
      title: Some("Bump express from 4.18.0 to 5.0.0".into()),
      tests_passed: Some(true),
      ..Request::default()
    };
    let text = render_text(&run(&req));
    assert!(text.contains("Package: express"));
    assert!(text.contains("Risk level: HIGH"));
    assert!(text.contains("Strategy: blue-green"));
    assert!(text.contains("Stages: staging → canary → production"));
    assert!(text.contains("BREAKING CHANGES"));
    assert!(text.contains("Auto-merge: not eligible"));
  }

  #[test]
  fn canary_percentage_is_rendered() {
    let req = Request {
      package_name: Some("react-dom".into()),
      old_version: Some("18.2.0".into()),
      new_version: Some("18.3.0".into()),
      ..Request::default()
    };
    let text = render_text(&run(&req));
    assert!(text.contains("Canary traffic: 10%"));
  }

  #[test]
  fn error_text_includes_line() {
    let err = ErrorOutput::new("json parse: eof").with_line(7);
    assert_eq!(render_error_text(&err), "error: line 7: json parse: eof");
    assert_eq!(render_error_text(&ErrorOutput::new("boom")), "error: boom");
  }

  #[test]
  fn exit_codes_by_level() {
    assert_eq!(exit_code(RiskLevel::High), 2);
    assert_eq!(exit_code(RiskLevel::Medium), 1);
    assert_eq!(exit_code(RiskLevel::Low), 0);
    assert_eq!(exit_code(RiskLevel::Minimal), 0);
  }
}
