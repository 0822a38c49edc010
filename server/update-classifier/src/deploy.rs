//! Deployment strategy selection from the risk score.

use crate::config::Policy;
use crate::types::{DeploymentPlan, Stage, Strategy, UpdateDescriptor};

/// Map a risk score to a rollout plan.
///
/// - above `blue_green_above`: blue-green through staging, canary, production; approval required
/// - above `canary_above`: canary at `canary_percentage` through staging, production
/// - otherwise: rolling straight to production
pub fn plan_deployment(descriptor: &UpdateDescriptor, risk_score: u8, policy: &Policy) -> DeploymentPlan {
  let plan = if risk_score > policy.blue_green_above {
    DeploymentPlan {
      strategy: Strategy::BlueGreen,
      stages: vec![Stage::Staging, Stage::Canary, Stage::Production],
      approval_required: true,
      canary_percentage: None,
    }
  } else if risk_score > policy.canary_above {
    DeploymentPlan {
      strategy: Strategy::Canary,
      stages: vec![Stage::Staging, Stage::Production],
      approval_required: false,
      canary_percentage: Some(policy.canary_percentage),
    }
  } else {
    DeploymentPlan {
      strategy: Strategy::Rolling,
      stages: vec![Stage::Production],
      approval_required: false,
      canary_percentage: None,
    }
  };
  tracing::trace!(
    package = %descriptor.package_name,
    risk_score,
    strategy = %plan.strategy,
    "planned deployment"
  );
  plan
}
