//! Shared, read-only service state.

use update_classifier::Policy;

pub struct AppState {
  pub policy: Policy,
}
