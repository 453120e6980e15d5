//! Notification port.

use async_trait::async_trait;

use crate::PortsResult;

/// Publish/subscribe notification interface.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publish a message to a topic. Returns the provider's message id.
    async fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> PortsResult<String>;
}
