//! Structured error types for the classifier's I/O edges.
//!
//! Classification itself never fails; these cover reading requests and policies.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("policy: {field}: {reason}")]
  Policy { field: String, reason: String },
}

impl ClassifierError {
  pub fn policy(field: &str, reason: &str) -> Self {
    Self::Policy {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
