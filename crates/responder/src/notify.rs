//! Run summary notification.
//!
//! Publishing is best effort: a failure is logged and the response is
//! returned unchanged.

use std::sync::Arc;

use bulwark_ports::NotificationPublisher;
use chrono::Utc;
use serde::Serialize;

use crate::report::{IncidentRun, RunSummary};
use crate::tags;

/// Message body published to the notification topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationSummary {
    /// Run identifier.
    pub incident_id: String,
    /// Publication time, UTC ISO-8601.
    pub timestamp: String,
    /// Success and failure counts.
    #[serde(flatten)]
    pub counts: RunSummary,
}

impl NotificationSummary {
    /// Summarize a finished run as of `timestamp`.
    pub fn from_run(run: &IncidentRun, timestamp: impl Into<String>) -> Self {
        Self {
            incident_id: run.incident_id().to_owned(),
            timestamp: timestamp.into(),
            counts: run.summary(),
        }
    }

    /// Subject line for the published message.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Security Incident Response - {}", self.incident_id)
    }
}

/// What happened to the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// No topic was supplied.
    Skipped,
    /// Accepted by the topic.
    Published {
        /// Publisher-assigned message id.
        message_id: String,
    },
    /// Publishing failed; the cause went to the log.
    Failed,
}

/// Publishes a run summary to an optional topic.
pub struct Notifier {
    publisher: Arc<dyn NotificationPublisher>,
}

impl Notifier {
    /// Create a notifier over a publisher port.
    pub fn new(publisher: Arc<dyn NotificationPublisher>) -> Self {
        Self { publisher }
    }

    /// Publish the summary of `run` to `topic`, if one is given.
    #[tracing::instrument(skip(self, run), fields(incident_id = %run.incident_id()))]
    pub async fn notify(&self, topic: Option<&str>, run: &IncidentRun) -> NotificationOutcome {
        let Some(topic) = topic else {
            tracing::debug!("No notification topic supplied");
            return NotificationOutcome::Skipped;
        };

        let summary = NotificationSummary::from_run(run, tags::timestamp(Utc::now()));
        let message = match serde_json::to_string_pretty(&summary) {
            Ok(message) => message,
            Err(err) => {
                tracing::error!(error = %err, "Failed to encode notification");
                return NotificationOutcome::Failed;
            }
        };

        match self
            .publisher
            .publish(topic, &summary.subject(), &message)
            .await
        {
            Ok(message_id) => {
                tracing::info!(topic = %topic, message_id = %message_id, "Notification sent");
                NotificationOutcome::Published { message_id }
            }
            Err(err) => {
                tracing::error!(topic = %topic, error = %err, "Failed to send notification");
                NotificationOutcome::Failed
            }
        }
    }
}
