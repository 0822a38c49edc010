//! Security-update detection from PR labels and body text.

const BODY_MARKERS: &[&str] = &["security", "vulnerability", "cve-", "ghsa-"];

/// True when a label mentions `security` or the body references an advisory.
pub fn detect_security(labels: &[String], body: Option<&str>) -> bool {
  if labels
    .iter()
    .any(|l| l.to_ascii_lowercase().contains("security"))
  {
    return true;
  }
  match body {
    Some(b) => {
      let b = b.to_ascii_lowercase();
      BODY_MARKERS.iter().any(|m| b.contains(m))
    }
    None => false,
  }
}
