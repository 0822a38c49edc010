//! Version delta classification.

use crate::types::UpdateType;

/// Split a dot-separated version into integer components.
///
/// Returns `None` for anything that is not strictly `digits(.digits)*`
/// (`latest`, `1.2.3-beta`, `4.`, empty).
pub fn parse_components(version: &str) -> Option<Vec<u64>> {
  let version = version.trim();
  if version.is_empty() {
    return None;
  }
  version
    .split('.')
    .map(|part| {
      if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
      }
      part.parse::<u64>().ok()
    })
    .collect()
}

/// Classify the change between two versions. Missing trailing components count as 0.
pub fn parse_version_delta(old_version: &str, new_version: &str) -> UpdateType {
  let (old, new) = match (parse_components(old_version), parse_components(new_version)) {
    (Some(o), Some(n)) => (o, n),
    _ => return UpdateType::Unknown,
  };
  let component = |v: &[u64], i: usize| v.get(i).copied().unwrap_or(0);

  if component(&old, 0) != component(&new, 0) {
    UpdateType::Major
  } else if component(&old, 1) != component(&new, 1) {
    UpdateType::Minor
  } else {
    UpdateType::Patch
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classifies_each_component() {
    assert_eq!(parse_version_delta("4.17.20", "4.17.21"), UpdateType::Patch);
    assert_eq!(parse_version_delta("1.2.0", "1.3.0"), UpdateType::Minor);
    assert_eq!(parse_version_delta("4.18.0", "5.0.0"), UpdateType::Major);
  }

  #[test]
  fn missing_components_are_zero() {
    assert_eq!(parse_version_delta("2", "2.0.1"), UpdateType::Patch);
    assert_eq!(parse_version_delta("2", "2.1"), UpdateType::Minor);
    assert_eq!(parse_version_delta("1.0", "2"), UpdateType::Major);
  }

  #[test]
  fn identical_versions_are_patch() {
    for v in ["0", "1.2", "10.20.30", "3.0.0.1"] {
      assert_eq!(parse_version_delta(v, v), UpdateType::Patch);
    }
  }

  #[test]
  fn downgrade_is_classified_by_magnitude() {
    assert_eq!(parse_version_delta("3.1.0", "2.9.9"), UpdateType::Major);
  }

  #[test]
  fn malformed_versions_are_unknown() {
    assert_eq!(parse_version_delta("latest", "1.0.0"), UpdateType::Unknown);
    assert_eq!(parse_version_delta("1.0.0", "1.0.0-beta"), UpdateType::Unknown);
    assert_eq!(parse_version_delta("", "1.0.0"), UpdateType::Unknown);
    assert_eq!(parse_version_delta("1..0", "1.0.1"), UpdateType::Unknown);
    assert_eq!(parse_version_delta("+1.0", "1.0.1"), UpdateType::Unknown);
    assert_eq!(parse_version_delta("v1.0", "1.0.1"), UpdateType::Unknown);
  }

  #[test]
  fn oversized_component_is_unknown() {
    assert_eq!(
      parse_version_delta("99999999999999999999999.0", "1.0"),
      UpdateType::Unknown
    );
  }
}
