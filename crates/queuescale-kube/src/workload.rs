//! Deployment handle over the Kubernetes API.

use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{Api, ListParams, Patch, PatchParams, PostParams};
use kube::Client;
use tracing::{debug, info};

use queuescale_engine::{ScaleError, ScaleResult, WorkloadHandle, WorkloadState};

/// Handle to one Deployment, identified by its `app=<name>` label within
/// a namespace.
pub struct KubeWorkload {
    api: Api<Deployment>,
    name: String,
    manifest: Deployment,
}

impl KubeWorkload {
    /// Wrap an existing client.
    pub fn new(
        client: Client,
        namespace: &str,
        name: impl Into<String>,
        manifest: Deployment,
    ) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
            name: name.into(),
            manifest,
        }
    }

    /// Build a client from the ambient environment (in-cluster service
    /// account or local kubeconfig) and wrap it.
    pub async fn try_default(
        namespace: &str,
        name: impl Into<String>,
        manifest: Deployment,
    ) -> ScaleResult<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| ScaleError::Config(format!("kubernetes client: {e}")))?;
        Ok(Self::new(client, namespace, name, manifest))
    }
}

impl WorkloadHandle for KubeWorkload {
    async fn current_state(&self) -> ScaleResult<WorkloadState> {
        let selector = format!("app={}", self.name);
        let params = ListParams::default().labels(&selector);
        let deployments = self
            .api
            .list(&params)
            .await
            .map_err(|e| ScaleError::LookupFailed(e.to_string()))?;

        if deployments.items.len() > 1 {
            debug!(
                selector = %selector,
                matches = deployments.items.len(),
                "label selector matched several deployments, using the first"
            );
        }

        Ok(match deployments.items.first() {
            None => WorkloadState::Absent,
            Some(deployment) => WorkloadState::Present {
                replicas: replica_count(deployment),
            },
        })
    }

    async fn bootstrap(&self) -> ScaleResult<()> {
        let created = self
            .api
            .create(&PostParams::default(), &self.manifest)
            .await
            .map_err(|e| ScaleError::BootstrapFailed(e.to_string()))?;
        info!(
            deployment = created.metadata.name.as_deref().unwrap_or(&self.name),
            "deployment created"
        );
        Ok(())
    }

    async fn set_replicas(&self, replicas: i32) -> ScaleResult<()> {
        let patch = serde_json::json!({
            "spec": {
                "replicas": replicas,
            }
        });
        self.api
            .patch(&self.name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| ScaleError::UpdateFailed(e.to_string()))?;
        debug!(deployment = %self.name, replicas, "deployment patched");
        Ok(())
    }
}

/// Configured replica count of a deployment, defaulting to 0 when the
/// spec leaves it unset.
fn replica_count(deployment: &Deployment) -> i32 {
    deployment
        .spec
        .as_ref()
        .and_then(|spec| spec.replicas)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::DeploymentSpec;

    fn deployment_with(replicas: Option<i32>) -> Deployment {
        Deployment {
            spec: Some(DeploymentSpec {
                replicas,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn replica_count_reads_the_spec() {
        assert_eq!(replica_count(&deployment_with(Some(4))), 4);
    }

    #[test]
    fn unset_replicas_count_as_zero() {
        assert_eq!(replica_count(&deployment_with(None)), 0);
        assert_eq!(replica_count(&Deployment::default()), 0);
    }
}
