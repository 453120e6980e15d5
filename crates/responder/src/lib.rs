#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Bulwark Responder
//!
//! First response for compromised cloud instances and credentials.
//!
//! Given an [`IncidentRequest`], an [`IncidentResponder`]:
//! - isolates each instance behind a dedicated deny-all security group,
//!   protects it from termination and snapshots its volumes
//!   ([`InstanceIsolator`])
//! - deactivates each flagged access key, prunes the oldest inactive key at
//!   the per-user limit, issues a replacement and stores it as a secret
//!   ([`CredentialRotator`])
//! - returns an [`IncidentResponse`] with one result per item and
//!   optionally publishes a summary ([`Notifier`])
//!
//! Every external call goes through the port traits in `bulwark-ports`, so
//! the same pass runs against AWS or an in-memory account.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bulwark_responder::prelude::*;
//!
//! let responder = IncidentResponder::builder()
//!     .compute(compute)
//!     .identity(identity)
//!     .secrets(secrets)
//!     .publisher(publisher)
//!     .build()?;
//!
//! let request = IncidentRequest::from_json(event)?;
//! let response = responder.respond("run-1", &request).await;
//! ```

pub mod config;
pub mod error;
pub mod isolation;
pub mod notify;
pub mod report;
pub mod request;
pub mod responder;
pub mod rotation;
pub mod tags;
pub mod validation;

pub use config::ResponderConfig;
pub use error::{ConfigError, ResponseError};
pub use isolation::InstanceIsolator;
pub use notify::{NotificationOutcome, NotificationSummary, Notifier};
pub use report::{
    CredentialRotationResult, FailureIndicator, IncidentResponse, IncidentRun,
    InstanceIsolationResult, IsolationOutcome, RotationOutcome, RunSummary,
};
pub use request::{CompromisedUser, CredentialTarget, IncidentRequest};
pub use responder::{IncidentResponder, ResponderBuilder};
pub use rotation::CredentialRotator;
pub use validation::{AccessKeyId, Identifier, InstanceId, UserName};

/// Common imports for wiring and running a responder.
pub mod prelude {
    pub use crate::{
        ConfigError, IncidentRequest, IncidentResponder, IncidentResponse, ResponderConfig,
    };
}
