//! The scaling decision function.
//!
//! Pure: takes the observed queue depth, the observed workload state, the
//! configuration and the cooldown eligibility, and returns what to do.
//! The poll loop applies the result and records the cooldown stamps.

use std::fmt;

use crate::config::AutoscaleConfig;
use crate::cooldown::CooldownEligibility;

/// Observed state of the managed workload.
///
/// Fetched fresh every cycle and discarded; never cached. Zero label
/// matches is `Absent`, an ordinary state rather than an error or a
/// zero replica count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadState {
    Absent,
    Present { replicas: i32 },
}

/// Why a fired check resulted in no replica change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    /// Scale-up cooldown has not elapsed.
    UpCooldown,
    /// Scale-down cooldown has not elapsed.
    DownCooldown,
    /// Already at the upper replica bound.
    MaxReached,
    /// Already at the lower replica bound.
    MinReached,
    /// Scale-down fired but no workload exists to shrink.
    WorkloadAbsent,
}

impl fmt::Display for HoldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            HoldReason::UpCooldown => "waiting for scale up cooldown",
            HoldReason::DownCooldown => "waiting for scale down cooldown",
            HoldReason::MaxReached => "max pods reached",
            HoldReason::MinReached => "min pods reached",
            HoldReason::WorkloadAbsent => "no workload to scale down",
        };
        f.write_str(msg)
    }
}

/// Outcome of one direction's check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create the workload from the configured manifest.
    Bootstrap,
    /// Raise the replica count to `target`.
    ScaleUp { target: i32 },
    /// Lower the replica count to `target`.
    ScaleDown { target: i32 },
    /// The check fired but nothing should change.
    Hold { reason: HoldReason },
}

/// Result of evaluating one cycle.
///
/// `up` / `down` are `None` when the respective threshold did not fire at
/// all. `record_up` / `record_down` mark attempts for cooldown stamping:
/// set whenever the threshold fired while the cooldown was eligible,
/// whichever branch was taken. Stamps mark the attempt, not confirmed
/// success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub up: Option<Action>,
    pub down: Option<Action>,
    pub record_up: bool,
    pub record_down: bool,
}

/// Evaluate both scaling checks for one cycle.
///
/// The checks are independent; with overlapping thresholds both can fire
/// against the same observed replica count. Each qualifying direction
/// moves at most one replica.
pub fn evaluate(
    depth: u64,
    workload: WorkloadState,
    config: &AutoscaleConfig,
    eligibility: CooldownEligibility,
) -> Decision {
    let mut decision = Decision {
        up: None,
        down: None,
        record_up: false,
        record_down: false,
    };

    if depth >= config.scale_up_messages {
        if !eligibility.up {
            decision.up = Some(Action::Hold {
                reason: HoldReason::UpCooldown,
            });
        } else {
            decision.record_up = true;
            decision.up = Some(match workload {
                WorkloadState::Absent => Action::Bootstrap,
                WorkloadState::Present { replicas } => {
                    if replicas < config.max_pods {
                        Action::ScaleUp {
                            target: replicas + 1,
                        }
                    } else if replicas > config.max_pods {
                        // Over the bound, e.g. max_pods was lowered after
                        // the workload was scaled under a looser one.
                        Action::ScaleDown {
                            target: replicas - 1,
                        }
                    } else {
                        Action::Hold {
                            reason: HoldReason::MaxReached,
                        }
                    }
                }
            });
        }
    }

    if depth <= config.scale_down_messages {
        if !eligibility.down {
            decision.down = Some(Action::Hold {
                reason: HoldReason::DownCooldown,
            });
        } else {
            decision.record_down = true;
            decision.down = Some(match workload {
                WorkloadState::Absent => Action::Hold {
                    reason: HoldReason::WorkloadAbsent,
                },
                WorkloadState::Present { replicas } => {
                    if replicas > config.min_pods {
                        Action::ScaleDown {
                            target: replicas - 1,
                        }
                    } else if replicas < config.min_pods {
                        Action::ScaleUp {
                            target: replicas + 1,
                        }
                    } else {
                        Action::Hold {
                            reason: HoldReason::MinReached,
                        }
                    }
                }
            });
        }
    }

    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    const BOTH: CooldownEligibility = CooldownEligibility {
        up: true,
        down: true,
    };
    const NEITHER: CooldownEligibility = CooldownEligibility {
        up: false,
        down: false,
    };

    fn config(up: u64, down: u64, min: i32, max: i32) -> AutoscaleConfig {
        AutoscaleConfig {
            queue_url: "https://sqs.example/queue".into(),
            namespace: "default".into(),
            deployment: "worker".into(),
            manifest_path: PathBuf::from("deployment.yaml"),
            scale_up_messages: up,
            scale_down_messages: down,
            scale_up_cooldown: Duration::from_secs(30),
            scale_down_cooldown: Duration::from_secs(30),
            poll_period: Duration::from_secs(5),
            min_pods: min,
            max_pods: max,
            call_timeout: Duration::from_secs(10),
        }
    }

    fn present(replicas: i32) -> WorkloadState {
        WorkloadState::Present { replicas }
    }

    #[test]
    fn backlog_with_no_workload_bootstraps() {
        let decision = evaluate(120, WorkloadState::Absent, &config(100, 10, 1, 10), BOTH);
        assert_eq!(decision.up, Some(Action::Bootstrap));
        assert_eq!(decision.down, None);
        assert!(decision.record_up);
        assert!(!decision.record_down);
    }

    #[test]
    fn backlog_adds_one_replica() {
        let decision = evaluate(100, present(3), &config(100, 10, 1, 10), BOTH);
        assert_eq!(decision.up, Some(Action::ScaleUp { target: 4 }));
    }

    #[test]
    fn at_max_holds_but_records_the_attempt() {
        let decision = evaluate(500, present(10), &config(100, 10, 1, 10), BOTH);
        assert_eq!(
            decision.up,
            Some(Action::Hold {
                reason: HoldReason::MaxReached
            })
        );
        assert!(decision.record_up);
    }

    #[test]
    fn above_max_crosses_over_to_scale_down() {
        // max_pods was tightened to 5 while 8 replicas are running.
        let decision = evaluate(500, present(8), &config(100, 10, 1, 5), BOTH);
        assert_eq!(decision.up, Some(Action::ScaleDown { target: 7 }));
    }

    #[test]
    fn up_cooldown_holds_without_recording() {
        let decision = evaluate(500, present(3), &config(100, 10, 1, 10), NEITHER);
        assert_eq!(
            decision.up,
            Some(Action::Hold {
                reason: HoldReason::UpCooldown
            })
        );
        assert!(!decision.record_up);
    }

    #[test]
    fn drained_queue_removes_one_replica() {
        let decision = evaluate(5, present(3), &config(100, 10, 1, 10), BOTH);
        assert_eq!(decision.up, None);
        assert_eq!(decision.down, Some(Action::ScaleDown { target: 2 }));
        assert!(decision.record_down);
    }

    #[test]
    fn at_min_holds_but_records_the_attempt() {
        let decision = evaluate(0, present(1), &config(100, 10, 1, 10), BOTH);
        assert_eq!(
            decision.down,
            Some(Action::Hold {
                reason: HoldReason::MinReached
            })
        );
        assert!(decision.record_down);
    }

    #[test]
    fn below_min_crosses_over_to_scale_up() {
        // min_pods was raised to 3 while 1 replica is running.
        let decision = evaluate(0, present(1), &config(100, 10, 3, 10), BOTH);
        assert_eq!(decision.down, Some(Action::ScaleUp { target: 2 }));
    }

    #[test]
    fn down_with_no_workload_holds() {
        let decision = evaluate(0, WorkloadState::Absent, &config(100, 10, 1, 10), BOTH);
        assert_eq!(
            decision.down,
            Some(Action::Hold {
                reason: HoldReason::WorkloadAbsent
            })
        );
        assert!(decision.record_down);
    }

    #[test]
    fn down_cooldown_holds_without_recording() {
        let decision = evaluate(0, present(3), &config(100, 10, 1, 10), NEITHER);
        assert_eq!(
            decision.down,
            Some(Action::Hold {
                reason: HoldReason::DownCooldown
            })
        );
        assert!(!decision.record_down);
    }

    #[test]
    fn quiet_depth_between_thresholds_does_nothing() {
        let decision = evaluate(50, present(3), &config(100, 10, 1, 10), BOTH);
        assert_eq!(decision.up, None);
        assert_eq!(decision.down, None);
        assert!(!decision.record_up);
        assert!(!decision.record_down);
    }

    #[test]
    fn overlapping_thresholds_fire_both_directions() {
        // depth 150 is >= up threshold 100 and <= down threshold 200.
        let decision = evaluate(150, present(5), &config(100, 200, 1, 10), BOTH);
        assert_eq!(decision.up, Some(Action::ScaleUp { target: 6 }));
        assert_eq!(decision.down, Some(Action::ScaleDown { target: 4 }));
        assert!(decision.record_up);
        assert!(decision.record_down);
    }

    #[test]
    fn repeated_evaluation_at_exhausted_bounds_is_stable() {
        let config = config(100, 10, 1, 10);
        for _ in 0..5 {
            let decision = evaluate(0, present(1), &config, BOTH);
            assert_eq!(
                decision.down,
                Some(Action::Hold {
                    reason: HoldReason::MinReached
                })
            );
        }
    }
}
