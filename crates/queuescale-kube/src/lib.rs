//! queuescale-kube: the Kubernetes side of the autoscaler.
//!
//! Implements [`queuescale_engine::WorkloadHandle`] against the apps/v1
//! Deployment API: lookup by label selector, create from a YAML manifest
//! on bootstrap, merge-patch of `spec.replicas` on scale.

pub mod manifest;
pub mod workload;

pub use manifest::load_manifest;
pub use workload::KubeWorkload;
