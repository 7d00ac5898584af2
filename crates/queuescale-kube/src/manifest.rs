//! Bootstrap manifest loading.

use std::fs;
use std::path::Path;

use k8s_openapi::api::apps::v1::Deployment;

use queuescale_engine::{ScaleError, ScaleResult};

/// Load the bootstrap Deployment manifest from a YAML file.
///
/// Read once at startup; the parsed manifest is passed through to the
/// create call unmodified.
pub fn load_manifest(path: &Path) -> ScaleResult<Deployment> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ScaleError::Manifest(format!("reading {}: {e}", path.display())))?;
    serde_yaml::from_str(&raw)
        .map_err(|e| ScaleError::Manifest(format!("parsing {}: {e}", path.display())))
}
