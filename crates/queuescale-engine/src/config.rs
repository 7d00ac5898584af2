//! Autoscaler configuration.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::{ScaleError, ScaleResult};

/// Immutable configuration for one autoscaler instance.
///
/// Loaded once at startup and owned by the poll loop. Field names follow
/// the daemon's command-line options.
#[derive(Debug, Clone)]
pub struct AutoscaleConfig {
    /// URL of the queue whose depth drives scaling.
    pub queue_url: String,
    /// Namespace of the managed deployment.
    pub namespace: String,
    /// Deployment name; lookup matches the `app=<name>` label.
    pub deployment: String,
    /// Path to the manifest used to bootstrap the deployment.
    pub manifest_path: PathBuf,
    /// Queue depth at or above which a scale-up is considered.
    pub scale_up_messages: u64,
    /// Queue depth at or below which a scale-down is considered.
    pub scale_down_messages: u64,
    /// Minimum elapsed time between scale-up actions.
    pub scale_up_cooldown: Duration,
    /// Minimum elapsed time between scale-down actions.
    pub scale_down_cooldown: Duration,
    /// Sleep between decision cycles.
    pub poll_period: Duration,
    /// Lower replica bound.
    pub min_pods: i32,
    /// Upper replica bound.
    pub max_pods: i32,
    /// Budget for each external call (queue read, lookup, create, patch).
    pub call_timeout: Duration,
}

impl AutoscaleConfig {
    /// Validate replica bounds and threshold ordering.
    ///
    /// Overlapping thresholds (`scale_down_messages >= scale_up_messages`)
    /// are legal: the up and down checks run independently, so both
    /// directions can fire in one cycle. That gets a warning, not an error.
    pub fn validate(&self) -> ScaleResult<()> {
        if self.min_pods < 0 {
            return Err(ScaleError::Config(format!(
                "min_pods must be non-negative, got {}",
                self.min_pods
            )));
        }
        if self.min_pods > self.max_pods {
            return Err(ScaleError::Config(format!(
                "min_pods ({}) exceeds max_pods ({})",
                self.min_pods, self.max_pods
            )));
        }
        if self.scale_down_messages >= self.scale_up_messages {
            warn!(
                scale_up_messages = self.scale_up_messages,
                scale_down_messages = self.scale_down_messages,
                "thresholds overlap; scale-up and scale-down can fire in the same cycle"
            );
        }
        Ok(())
    }
}
