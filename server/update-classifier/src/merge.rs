//! Auto-merge eligibility.

use crate::config::Policy;
use crate::types::{UpdateDescriptor, UpdateType};

/// Whether the update may merge without human review.
///
/// Major and unknown updates never qualify, nor does anything with failing tests.
/// Patches qualify below `patch_auto_merge_below`; minors only as security fixes
/// scoring at most `minor_security_auto_merge_max`.
pub fn should_auto_merge(
  descriptor: &UpdateDescriptor,
  risk_score: u8,
  all_tests_passed: bool,
  policy: &Policy,
) -> bool {
  if descriptor.update_type == UpdateType::Major || !all_tests_passed {
    return false;
  }
  match descriptor.update_type {
    UpdateType::Patch => risk_score < policy.patch_auto_merge_below,
    UpdateType::Minor => {
      descriptor.is_security_update && risk_score <= policy.minor_security_auto_merge_max
    }
    UpdateType::Major | UpdateType::Unknown => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Ecosystem;
  use std::collections::BTreeSet;

  fn descriptor(update_type: UpdateType, security: bool) -> UpdateDescriptor {
    UpdateDescriptor {
      package_name: "lodash".into(),
      old_version: "1.0.0".into(),
      new_version: "1.0.1".into(),
      update_type,
      ecosystem: Ecosystem::Npm,
      is_security_update: security,
      labels: BTreeSet::new(),
    }
  }

  #[test]
  fn major_never_merges() {
    let p = Policy::default();
    for security in [false, true] {
      for score in 0..=100 {
        assert!(!should_auto_merge(&descriptor(UpdateType::Major, security), score, true, &p));
      }
    }
  }

  #[test]
  fn failing_tests_never_merge() {
    let p = Policy::default();
    for t in [UpdateType::Patch, UpdateType::Minor, UpdateType::Unknown] {
      assert!(!should_auto_merge(&descriptor(t, true), 0, false, &p));
    }
  }

  #[test]
  fn patch_threshold_is_exclusive() {
    let p = Policy::default();
    let d = descriptor(UpdateType::Patch, false);
    assert!(should_auto_merge(&d, 29, true, &p));
    assert!(!should_auto_merge(&d, 30, true, &p));
  }

  #[test]
  fn minor_requires_security() {
    let p = Policy::default();
    assert!(!should_auto_merge(&descriptor(UpdateType::Minor, false), 30, true, &p));
    assert!(should_auto_merge(&descriptor(UpdateType::Minor, true), 40, true, &p));
    assert!(!should_auto_merge(&descriptor(UpdateType::Minor, true), 41, true, &p));
  }

  #[test]
  fn unknown_never_merges() {
    assert!(!should_auto_merge(
      &descriptor(UpdateType::Unknown, false),
      0,
      true,
      &Policy::default()
    ));
  }
}
