//! Request/response types for the classification service.

use serde::Deserialize;
use update_classifier::Request;

/// Body of `POST /classify/batch`: either a bare array or `{"requests": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum BatchRequest {
  Bare(Vec<Request>),
  Wrapped { requests: Vec<Request> },
}

impl BatchRequest {
  pub fn into_requests(self) -> Vec<Request> {
    match self {
      BatchRequest::Bare(v) => v,
      BatchRequest::Wrapped { requests } => requests,
    }
  }
}
