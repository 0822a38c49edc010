//! Classification policy: every threshold and list the rules consult.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ClassifierError;

/// Tunable scoring and rollout policy. `Default` is the canonical rule set.
///
/// Deserializes with per-field defaults, so a policy file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
  /// Base score per update type.
  pub major_base: u8,
  pub minor_base: u8,
  pub patch_base: u8,
  /// Subtracted from security patches.
  pub security_patch_discount: u8,
  /// Added to security updates that are not patches.
  pub security_bonus: u8,
  /// Package-name substrings that mark a framework-level dependency.
  pub critical_packages: Vec<String>,
  pub critical_bonus: u8,
  /// Package-name substrings that mark infrastructure tooling.
  pub infrastructure_packages: Vec<String>,
  pub infrastructure_bonus: u8,
  /// Patch updates auto-merge when the score is strictly below this.
  pub patch_auto_merge_below: u8,
  /// Minor security updates auto-merge when the score is at most this.
  pub minor_security_auto_merge_max: u8,
  /// Scores strictly above this go blue-green.
  pub blue_green_above: u8,
  /// Scores strictly above this (and not blue-green) go canary.
  pub canary_above: u8,
  pub canary_percentage: u8,
}

impl Default for Policy {
  fn default() -> Self {
    Self {
      major_base: 70,
      minor_base: 30,
      patch_base: 10,
      security_patch_discount: 5,
      security_bonus: 10,
      critical_packages: ["express", "react", "angular", "vue", "django", "spring", "rails"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
      critical_bonus: 20,
      infrastructure_packages: vec!["kubernetes".to_string()],
      infrastructure_bonus: 15,
      patch_auto_merge_below: 30,
      minor_security_auto_merge_max: 40,
      blue_green_above: 70,
      canary_above: 40,
      canary_percentage: 10,
    }
  }
}

impl Policy {
  /// Load and validate a policy from a JSON file.
  pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
    let raw = std::fs::read_to_string(path)?;
    Self::from_json_str(&raw)
  }

  pub fn from_json_str(raw: &str) -> Result<Self, ClassifierError> {
    let policy: Policy = serde_json::from_str(raw)?;
    policy.validate()?;
    Ok(policy)
  }

  pub fn validate(&self) -> Result<(), ClassifierError> {
    if self.canary_above > self.blue_green_above {
      return Err(ClassifierError::policy(
        "canary_above",
        "must not exceed blue_green_above",
      ));
    }
    if self.blue_green_above > 100 {
      return Err(ClassifierError::policy("blue_green_above", "must be at most 100"));
    }
    if self.canary_percentage == 0 || self.canary_percentage > 100 {
      return Err(ClassifierError::policy(
        "canary_percentage",
        "must be between 1 and 100",
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_policy_is_valid() {
    assert!(Policy::default().validate().is_ok());
  }

  #[test]
  fn partial_json_keeps_other_defaults() {
    let policy = Policy::from_json_str(r#"{"canary_percentage": 25}"#).unwrap();
    assert_eq!(policy.canary_percentage, 25);
    assert_eq!(policy.major_base, 70);
    assert!(policy.critical_packages.iter().any(|p| p == "express"));
  }

  #[test]
  fn inverted_thresholds_are_rejected() {
    let err = Policy::from_json_str(r#"{"canary_above": 80, "blue_green_above": 60}"#).unwrap_err();
    assert!(err.to_string().contains("canary_above"));
  }

  #[test]
  fn zero_canary_percentage_is_rejected() {
    let err = Policy::from_json_str(r#"{"canary_percentage": 0}"#).unwrap_err();
    assert!(err.to_string().contains("canary_percentage"));
  }

  #[test]
  fn malformed_json_is_a_json_error() {
    let err = Policy::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, ClassifierError::Json(_)));
  }
}
