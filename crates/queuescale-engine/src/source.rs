//! The queue-depth boundary.

use crate::error::ScaleResult;

/// Source of the queue-depth signal.
///
/// One read per cycle, no side effects. How the depth is obtained (SQS,
/// some other broker, a test stub) is opaque to the engine.
pub trait MetricSource {
    /// Current approximate number of pending messages.
    fn current_depth(&self) -> impl Future<Output = ScaleResult<u64>> + Send;
}
