//! The response pass: isolation, then rotation, then notification.

use std::sync::Arc;
use std::time::Instant;

use bulwark_ports::{ComputeApi, IdentityApi, NotificationPublisher, SecretStore};

use crate::config::ResponderConfig;
use crate::error::ConfigError;
use crate::isolation::InstanceIsolator;
use crate::notify::{NotificationOutcome, Notifier};
use crate::report::{IncidentResponse, IncidentRun};
use crate::request::IncidentRequest;
use crate::rotation::CredentialRotator;

/// Runs one incident response pass over the wired ports.
///
/// The pass:
///
/// 1. Isolates every requested instance, in order
/// 2. Rotates every compromised credential, in order
/// 3. Publishes a summary if a topic was supplied
/// 4. Returns the always-200 response carrying every per-item result
///
/// Items are processed one at a time. A failed item never stops the pass.
pub struct IncidentResponder {
    isolator: InstanceIsolator,
    rotator: CredentialRotator,
    notifier: Notifier,
}

impl IncidentResponder {
    /// Start wiring a responder.
    #[must_use]
    pub fn builder() -> ResponderBuilder {
        ResponderBuilder::default()
    }

    /// Respond to one incident.
    ///
    /// `incident_id` identifies this invocation and is stamped on every
    /// resource the pass creates or touches.
    #[tracing::instrument(skip(self, request), fields(incident_id = %incident_id))]
    pub async fn respond(&self, incident_id: &str, request: &IncidentRequest) -> IncidentResponse {
        let started = Instant::now();
        let mut run = IncidentRun::new(incident_id);

        let instances = request.instance_targets();
        tracing::info!(count = instances.len(), "Starting instance isolation");
        for instance_id in instances {
            run.record_isolation(self.isolator.isolate(incident_id, instance_id).await);
        }

        let credentials = request.credential_targets();
        tracing::info!(count = credentials.len(), "Starting key rotation");
        for entry in &credentials {
            run.record_rotation(self.rotator.rotate(incident_id, entry).await);
        }

        if let NotificationOutcome::Failed = self
            .notifier
            .notify(request.notification_topic(), &run)
            .await
        {
            tracing::warn!("Run summary was not delivered");
        }

        let summary = run.summary();
        tracing::info!(
            instances_isolated = summary.instances_isolated,
            keys_rotated = summary.keys_rotated,
            failures = summary.failures,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Incident response complete"
        );

        run.into_response()
    }
}

/// Builder for [`IncidentResponder`].
///
/// Every port must be set; the configuration defaults to
/// [`ResponderConfig::default`].
#[derive(Default)]
pub struct ResponderBuilder {
    compute: Option<Arc<dyn ComputeApi>>,
    identity: Option<Arc<dyn IdentityApi>>,
    secrets: Option<Arc<dyn SecretStore>>,
    publisher: Option<Arc<dyn NotificationPublisher>>,
    config: ResponderConfig,
}

impl ResponderBuilder {
    /// Compute control plane used for isolation.
    #[must_use]
    pub fn compute(mut self, compute: Arc<dyn ComputeApi>) -> Self {
        self.compute = Some(compute);
        self
    }

    /// Identity control plane used for rotation.
    #[must_use]
    pub fn identity(mut self, identity: Arc<dyn IdentityApi>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Store for newly issued key material.
    #[must_use]
    pub fn secrets(mut self, secrets: Arc<dyn SecretStore>) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Topic publisher for run summaries.
    #[must_use]
    pub fn publisher(mut self, publisher: Arc<dyn NotificationPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Naming and limit settings.
    #[must_use]
    pub fn config(mut self, config: ResponderConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and assemble the responder.
    pub fn build(self) -> Result<IncidentResponder, ConfigError> {
        self.config.validate()?;

        let compute = self.compute.ok_or(ConfigError::MissingPort("compute"))?;
        let identity = self.identity.ok_or(ConfigError::MissingPort("identity"))?;
        let secrets = self.secrets.ok_or(ConfigError::MissingPort("secret store"))?;
        let publisher = self
            .publisher
            .ok_or(ConfigError::MissingPort("notification"))?;

        let config = Arc::new(self.config);
        Ok(IncidentResponder {
            isolator: InstanceIsolator::new(compute, Arc::clone(&config)),
            rotator: CredentialRotator::new(identity, secrets, config),
            notifier: Notifier::new(publisher),
        })
    }
}
