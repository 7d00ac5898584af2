//! The workload-orchestration boundary.

use crate::decision::WorkloadState;
use crate::error::ScaleResult;

/// Handle to the managed workload.
///
/// All three operations hit the external orchestration API; none are
/// idempotent at this layer (a retried bootstrap can collide with the
/// deployment it already created). The engine only observes state and
/// requests mutations, it never caches across cycles.
pub trait WorkloadHandle {
    /// Look up the managed workload.
    ///
    /// Zero matches is [`WorkloadState::Absent`]; with several matches the
    /// first one wins.
    fn current_state(&self) -> impl Future<Output = ScaleResult<WorkloadState>> + Send;

    /// Create the workload from the manifest configured at startup.
    fn bootstrap(&self) -> impl Future<Output = ScaleResult<()>> + Send;

    /// Set the workload's replica count to `replicas`.
    fn set_replicas(&self, replicas: i32) -> impl Future<Output = ScaleResult<()>> + Send;
}
