//! [`NotificationPublisher`] over the in-memory account.

use async_trait::async_trait;
use bulwark_ports::{NotificationPublisher, PortsResult};

use crate::MemoryAccount;
use crate::operation::{Call, Operation};
use crate::state::Publication;

#[async_trait]
impl NotificationPublisher for MemoryAccount {
    async fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> PortsResult<String> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::Publish, topic_arn))?;

        let message_id = format!("msg-{:08}", state.next("msg"));
        state.publications.push(Publication {
            topic_arn: topic_arn.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
            message_id: message_id.clone(),
        });
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publications_are_recorded() {
        let account = MemoryAccount::new();
        let id = account.publish("arn:test:topic", "subject", "{}").await.unwrap();
        assert_eq!(id, "msg-00000001");

        let published = account.publications();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].topic_arn, "arn:test:topic");
    }

    #[tokio::test]
    async fn injected_failure_publishes_nothing() {
        let account = MemoryAccount::new();
        account.fail(Operation::Publish);
        assert!(account.publish("arn:test:topic", "s", "m").await.is_err());
        assert!(account.publications().is_empty());
    }
}
