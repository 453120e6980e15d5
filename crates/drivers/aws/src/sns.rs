//! SNS driver for [`NotificationPublisher`].

use async_trait::async_trait;
use aws_sdk_sns::Client;
use bulwark_ports::{NotificationPublisher, PortsError, PortsResult};

use crate::error::service_error;

/// [`NotificationPublisher`] over SNS topics.
#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    /// Wrap an SNS client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationPublisher for SnsPublisher {
    #[tracing::instrument(skip(self, message))]
    async fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> PortsResult<String> {
        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| service_error("sns", "Publish", e))?;

        output
            .message_id()
            .map(str::to_owned)
            .ok_or_else(|| PortsError::missing_field("Publish", "MessageId"))
    }
}
