//! queuescale-engine: the autoscaling control loop core.
//!
//! Watches one queue-depth signal and drives the replica count of one
//! managed workload, one replica per direction per cycle, with
//! per-direction cooldowns to prevent thrashing.
//!
//! # Decision algorithm
//!
//! ```text
//! if depth >= scale_up_messages and up cooldown elapsed:
//!     Absent            -> Bootstrap
//!     replicas < max    -> ScaleUp(replicas + 1)
//!     replicas > max    -> ScaleDown(replicas - 1)   // bound tightened externally
//!     replicas == max   -> hold (max reached)
//!
//! if depth <= scale_down_messages and down cooldown elapsed:
//!     Absent            -> hold (nothing to shrink)
//!     replicas > min    -> ScaleDown(replicas - 1)
//!     replicas < min    -> ScaleUp(replicas + 1)     // bound raised externally
//!     replicas == min   -> hold (min reached)
//! ```
//!
//! The two checks are independent: with overlapping thresholds both can
//! fire in the same cycle, against the same observed replica count.
//!
//! I/O lives behind the [`MetricSource`] and [`WorkloadHandle`] traits;
//! the adapter crates provide the SQS and Kubernetes implementations.

pub mod config;
pub mod cooldown;
pub mod decision;
pub mod error;
pub mod poller;
pub mod source;
pub mod workload;

pub use config::AutoscaleConfig;
pub use cooldown::{CooldownEligibility, CooldownTracker};
pub use decision::{evaluate, Action, Decision, HoldReason, WorkloadState};
pub use error::{ScaleError, ScaleResult};
pub use poller::Poller;
pub use source::MetricSource;
pub use workload::WorkloadHandle;
