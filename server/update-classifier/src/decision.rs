//! Stable identifier for one classification decision.

use crate::types::UpdateDescriptor;

/// `upd-` + 16 hex chars of a blake3 hash over the normalized descriptor and test status.
///
/// Re-running the same PR yields the same id, so downstream comments can be updated in place.
pub fn decision_id(descriptor: &UpdateDescriptor, tests_passed: bool) -> String {
  let mut hasher = blake3::Hasher::new();
  hasher.update(descriptor.package_name.as_bytes());
  hasher.update(b"|");
  hasher.update(descriptor.old_version.as_bytes());
  hasher.update(b"|");
  hasher.update(descriptor.new_version.as_bytes());
  hasher.update(b"|");
  hasher.update(descriptor.ecosystem.as_str().as_bytes());
  hasher.update(b"|");
  hasher.update(if descriptor.is_security_update { b"sec" } else { b"std" });
  hasher.update(b"|");
  hasher.update(if tests_passed { b"pass" } else { b"fail" });
  for label in &descriptor.labels {
    hasher.update(b"|");
    hasher.update(label.as_bytes());
  }
  let hex = hasher.finalize().to_hex();
  format!("upd-{}", &hex[..16])
}
