//! queuescaled: the autoscaler daemon.
//!
//! Wires the SQS depth source and the Kubernetes workload handle into the
//! poll loop and runs it until Ctrl-C. Every option can also be supplied
//! through its environment variable, which is how the daemon is usually
//! configured when it runs in-cluster.
//!
//! # Usage
//!
//! ```text
//! queuescaled \
//!     --queue-url https://sqs.eu-west-1.amazonaws.com/123456789/jobs \
//!     --deployment worker \
//!     --manifest /etc/queuescale/deployment.yaml \
//!     --scale-up-messages 100 --scale-down-messages 10
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use queuescale_engine::{AutoscaleConfig, Poller};
use queuescale_kube::KubeWorkload;
use queuescale_sqs::SqsQueueDepth;

#[derive(Parser)]
#[command(name = "queuescaled", about = "SQS-driven Kubernetes deployment autoscaler")]
struct Cli {
    /// URL of the SQS queue whose depth drives scaling.
    #[arg(long, env = "SQS_QUEUE_URL")]
    queue_url: String,

    /// Namespace of the managed deployment.
    #[arg(long, env = "KUBERNETES_NAMESPACE", default_value = "default")]
    namespace: String,

    /// Deployment name; lookup matches the app=<name> label.
    #[arg(long, env = "KUBERNETES_DEPLOYMENT")]
    deployment: String,

    /// Path to the deployment manifest used for bootstrap.
    #[arg(long, env = "KUBERNETES_DEPLOYMENT_FILE")]
    manifest: PathBuf,

    /// Queue depth at or above which a scale-up is considered.
    #[arg(long, env = "SCALE_UP_MESSAGES", default_value = "100")]
    scale_up_messages: u64,

    /// Queue depth at or below which a scale-down is considered.
    #[arg(long, env = "SCALE_DOWN_MESSAGES", default_value = "10")]
    scale_down_messages: u64,

    /// Seconds that must pass between scale-up actions.
    #[arg(long, env = "SCALE_UP_COOL_DOWN", default_value = "30")]
    scale_up_cool_down: u64,

    /// Seconds that must pass between scale-down actions.
    #[arg(long, env = "SCALE_DOWN_COOL_DOWN", default_value = "30")]
    scale_down_cool_down: u64,

    /// Seconds between decision cycles.
    #[arg(long, env = "POLL_PERIOD", default_value = "5")]
    poll_period: u64,

    /// Lower replica bound.
    #[arg(long, env = "MIN_PODS", default_value = "1")]
    min_pods: i32,

    /// Upper replica bound.
    #[arg(long, env = "MAX_PODS", default_value = "10")]
    max_pods: i32,

    /// Seconds before an external call is abandoned for the cycle.
    #[arg(long, env = "CALL_TIMEOUT", default_value = "10")]
    call_timeout: u64,
}

impl Cli {
    fn into_config(self) -> AutoscaleConfig {
        AutoscaleConfig {
            queue_url: self.queue_url,
            namespace: self.namespace,
            deployment: self.deployment,
            manifest_path: self.manifest,
            scale_up_messages: self.scale_up_messages,
            scale_down_messages: self.scale_down_messages,
            scale_up_cooldown: Duration::from_secs(self.scale_up_cool_down),
            scale_down_cooldown: Duration::from_secs(self.scale_down_cool_down),
            poll_period: Duration::from_secs(self.poll_period),
            min_pods: self.min_pods,
            max_pods: self.max_pods,
            call_timeout: Duration::from_secs(self.call_timeout),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,queuescaled=debug,queuescale_engine=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.into_config();
    config.validate()?;

    let manifest = queuescale_kube::load_manifest(&config.manifest_path)?;
    let workload =
        KubeWorkload::try_default(&config.namespace, config.deployment.clone(), manifest).await?;
    let source = SqsQueueDepth::from_env(config.queue_url.clone()).await;

    // Graceful shutdown on Ctrl-C.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let mut poller = Poller::new(config, source, workload);
    poller.run(shutdown_rx).await;

    info!("queuescaled stopped");
    Ok(())
}
