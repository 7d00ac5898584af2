//! The poll loop.
//!
//! Drives one cycle per poll period: read the queue depth, read the
//! workload state, evaluate the decision function, apply its actions
//! through the workload handle, record cooldown stamps, sleep. Adapter
//! failures are logged and skip the affected cycle; the loop only exits
//! on the shutdown signal.

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::AutoscaleConfig;
use crate::cooldown::CooldownTracker;
use crate::decision::{evaluate, Action};
use crate::error::{ScaleError, ScaleResult};
use crate::source::MetricSource;
use crate::workload::WorkloadHandle;

/// The autoscaling control loop.
///
/// Single-task and strictly sequential: a cycle fully completes before the
/// next one starts, and the only suspension point between cycles is the
/// poll-period sleep.
pub struct Poller<M, W> {
    config: AutoscaleConfig,
    source: M,
    workload: W,
    cooldowns: CooldownTracker,
}

impl<M: MetricSource, W: WorkloadHandle> Poller<M, W> {
    /// Create a poller; both cooldown windows start now.
    pub fn new(config: AutoscaleConfig, source: M, workload: W) -> Self {
        Self {
            config,
            source,
            workload,
            cooldowns: CooldownTracker::new(Instant::now()),
        }
    }

    /// Run until `shutdown` flips.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            queue = %self.config.queue_url,
            deployment = %self.config.deployment,
            namespace = %self.config.namespace,
            period = ?self.config.poll_period,
            "autoscaler started"
        );

        loop {
            self.cycle().await;

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_period) => {}
                _ = shutdown.changed() => {
                    info!("autoscaler shutting down");
                    break;
                }
            }
        }
    }

    /// Run a single observe-decide-apply cycle.
    ///
    /// Never fails: an unreachable queue or orchestration API is logged
    /// and the cycle is abandoned, to be retried naturally next period.
    pub async fn cycle(&mut self) {
        let depth = match self.call("queue depth read", self.source.current_depth()).await {
            Ok(depth) => depth,
            Err(e) => {
                warn!(error = %e, "skipping cycle: queue depth unavailable");
                return;
            }
        };

        let state = match self
            .call("workload lookup", self.workload.current_state())
            .await
        {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "skipping cycle: workload lookup failed");
                return;
            }
        };

        let now = Instant::now();
        let eligibility = self.cooldowns.eligibility(
            now,
            self.config.scale_up_cooldown,
            self.config.scale_down_cooldown,
        );
        let decision = evaluate(depth, state, &self.config, eligibility);
        debug!(depth, ?state, ?decision, "cycle evaluated");

        if let Some(action) = decision.up {
            self.apply(action).await;
        }
        if let Some(action) = decision.down {
            self.apply(action).await;
        }

        // Stamps mark the attempt, not confirmed success: a failed apply
        // is not retried within its own cooldown window.
        if decision.record_up {
            self.cooldowns.record_scale_up(now);
        }
        if decision.record_down {
            self.cooldowns.record_scale_down(now);
        }
    }

    async fn apply(&self, action: Action) {
        let result = match action {
            Action::Hold { reason } => {
                info!("{reason}");
                return;
            }
            Action::Bootstrap => {
                info!("no workload found, creating from manifest");
                self.call("workload bootstrap", self.workload.bootstrap())
                    .await
            }
            Action::ScaleUp { target } => {
                info!(to = target, "scaling up");
                self.call("replica update", self.workload.set_replicas(target))
                    .await
            }
            Action::ScaleDown { target } => {
                info!(to = target, "scaling down");
                self.call("replica update", self.workload.set_replicas(target))
                    .await
            }
        };

        if let Err(e) = result {
            warn!(error = %e, "scale action failed");
        }
    }

    /// Wrap an external call in the configured timeout so a hung API
    /// stalls one cycle, not the loop.
    async fn call<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = ScaleResult<T>>,
    ) -> ScaleResult<T> {
        match tokio::time::timeout(self.config.call_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(ScaleError::Timeout {
                operation,
                after: self.config.call_timeout,
            }),
        }
    }
}
