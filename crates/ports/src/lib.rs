#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Bulwark Ports
//!
//! Capability interfaces for the cloud control planes an incident response
//! pass talks to.
//!
//! This crate defines the **port** traits that backend drivers implement.
//! It follows the Ports & Drivers (hexagonal) architecture pattern:
//!
//! - [`ComputeApi`] -- instance isolation, tagging and forensic snapshots
//! - [`IdentityApi`] -- access key listing, deactivation, deletion and issuance
//! - [`SecretStore`] -- durable storage for freshly issued key material
//! - [`NotificationPublisher`] -- topic based responder notifications
//!
//! Each trait exposes only the operations the responder actually calls.
//! All traits are `async_trait` and object-safe, suitable for use as
//! `Arc<dyn Trait>` behind dependency injection.

pub mod compute;
pub mod error;
pub mod identity;
pub mod notify;
pub mod secrets;
pub mod tag;

pub use compute::{ComputeApi, IsolationGroupSpec, SnapshotSpec};
pub use error::PortsError;
pub use identity::{AccessKeyMetadata, AccessKeyStatus, IdentityApi, IssuedAccessKey};
pub use notify::NotificationPublisher;
pub use secrets::{SecretSpec, SecretStore};
pub use tag::ResourceTag;

/// Result alias used by every port method.
pub type PortsResult<T> = Result<T, PortsError>;
