//! Risk score, risk level, and human-readable explanations of each adjustment.

use crate::config::Policy;
use crate::types::{Ecosystem, RiskLevel, UpdateDescriptor, UpdateType};

/// Final score plus one explanation per rule that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskBreakdown {
  pub score: u8,
  pub explanations: Vec<String>,
}

/// Risk 0–100: base from update type, then security, criticality and infrastructure adjustments.
pub fn calculate_risk_score(descriptor: &UpdateDescriptor, policy: &Policy) -> u8 {
  risk_breakdown(descriptor, policy).score
}

pub fn risk_breakdown(descriptor: &UpdateDescriptor, policy: &Policy) -> RiskBreakdown {
  let mut explanations = Vec::new();
  let base = match descriptor.update_type {
    UpdateType::Major => policy.major_base,
    UpdateType::Minor => policy.minor_base,
    UpdateType::Patch => policy.patch_base,
    // Malformed input: no adjustments apply.
    UpdateType::Unknown => {
      explanations.push("Version change could not be parsed; scored as 0".to_string());
      return RiskBreakdown {
        score: 0,
        explanations,
      };
    }
  };
  let mut score = base as i32;
  explanations.push(format!(
    "{} version update (base {})",
    capitalize(descriptor.update_type.as_str()),
    base
  ));

  if descriptor.is_security_update {
    if descriptor.update_type == UpdateType::Patch {
      score -= policy.security_patch_discount as i32;
      explanations.push(format!(
        "Security patch (-{})",
        policy.security_patch_discount
      ));
    } else {
      score += policy.security_bonus as i32;
      explanations.push(format!(
        "Security fix in a {} update needs extra scrutiny (+{})",
        descriptor.update_type, policy.security_bonus
      ));
    }
  }

  let name = descriptor.package_name.to_ascii_lowercase();
  if let Some(hit) = first_marker(&name, &policy.critical_packages) {
    score += policy.critical_bonus as i32;
    explanations.push(format!(
      "Critical framework package ({}) (+{})",
      hit, policy.critical_bonus
    ));
  }

  let infra_package = first_marker(&name, &policy.infrastructure_packages).is_some();
  if descriptor.ecosystem == Ecosystem::Docker || infra_package {
    score += policy.infrastructure_bonus as i32;
    explanations.push(format!(
      "Infrastructure dependency (+{})",
      policy.infrastructure_bonus
    ));
  }

  RiskBreakdown {
    score: score.clamp(0, 100) as u8,
    explanations,
  }
}

/// Bands are inclusive on their lower bound.
pub fn classify_risk_level(score: u8) -> RiskLevel {
  if score >= 70 {
    RiskLevel::High
  } else if score >= 40 {
    RiskLevel::Medium
  } else if score >= 20 {
    RiskLevel::Low
  } else {
    RiskLevel::Minimal
  }
}

fn first_marker<'a>(name: &str, markers: &'a [String]) -> Option<&'a str> {
  markers
    .iter()
    .map(|m| m.as_str())
    .find(|m| !m.is_empty() && name.contains(&m.to_ascii_lowercase()))
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    None => String::new(),
  }
}
