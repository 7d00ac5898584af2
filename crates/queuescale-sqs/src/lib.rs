//! queuescale-sqs: queue depth from AWS SQS.
//!
//! Implements [`MetricSource`] with one `GetQueueAttributes` call per
//! cycle, reading `ApproximateNumberOfMessages`. Anything that keeps a
//! depth from being produced (API failure, missing attribute, value that
//! is not a number) surfaces as [`ScaleError::MetricUnavailable`].

use std::collections::HashMap;

use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client;
use tracing::debug;

use queuescale_engine::{MetricSource, ScaleError, ScaleResult};

/// SQS-backed queue-depth source.
pub struct SqsQueueDepth {
    client: Client,
    queue_url: String,
}

impl SqsQueueDepth {
    /// Wrap an existing SQS client.
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    /// Build a client from the ambient AWS environment (region, credentials
    /// chain) and wrap it.
    pub async fn from_env(queue_url: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), queue_url)
    }
}

impl MetricSource for SqsQueueDepth {
    async fn current_depth(&self) -> ScaleResult<u64> {
        let response = self
            .client
            .get_queue_attributes()
            .queue_url(&self.queue_url)
            .attribute_names(QueueAttributeName::ApproximateNumberOfMessages)
            .send()
            .await
            .map_err(|e| ScaleError::MetricUnavailable(e.to_string()))?;

        let depth = parse_depth(response.attributes())?;
        debug!(queue = %self.queue_url, depth, "queue depth read");
        Ok(depth)
    }
}

/// Extract and parse `ApproximateNumberOfMessages` from the attribute map.
fn parse_depth(attributes: Option<&HashMap<QueueAttributeName, String>>) -> ScaleResult<u64> {
    let raw = attributes
        .and_then(|attrs| attrs.get(&QueueAttributeName::ApproximateNumberOfMessages))
        .ok_or_else(|| {
            ScaleError::MetricUnavailable(
                "response is missing ApproximateNumberOfMessages".to_string(),
            )
        })?;

    raw.parse::<u64>().map_err(|e| {
        ScaleError::MetricUnavailable(format!("malformed message count {raw:?}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(value: &str) -> HashMap<QueueAttributeName, String> {
        HashMap::from([(
            QueueAttributeName::ApproximateNumberOfMessages,
            value.to_string(),
        )])
    }

    #[test]
    fn parses_a_plain_count() {
        let attrs = attrs("42");
        assert_eq!(parse_depth(Some(&attrs)).unwrap(), 42);
    }

    #[test]
    fn zero_depth_is_valid() {
        let attrs = attrs("0");
        assert_eq!(parse_depth(Some(&attrs)).unwrap(), 0);
    }

    #[test]
    fn missing_attribute_map_is_unavailable() {
        assert!(matches!(
            parse_depth(None),
            Err(ScaleError::MetricUnavailable(_))
        ));
    }

    #[test]
    fn missing_attribute_is_unavailable() {
        let empty = HashMap::new();
        assert!(matches!(
            parse_depth(Some(&empty)),
            Err(ScaleError::MetricUnavailable(_))
        ));
    }

    #[test]
    fn malformed_count_is_unavailable() {
        let attrs = attrs("not-a-number");
        let err = parse_depth(Some(&attrs)).unwrap_err();
        assert!(err.to_string().contains("not-a-number"));
    }

    #[test]
    fn negative_count_is_rejected() {
        let attrs = attrs("-3");
        assert!(parse_depth(Some(&attrs)).is_err());
    }
}
