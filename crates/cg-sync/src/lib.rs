//! CampusGate Access Sync
//!
//! Cross-platform synchronization between the campus Events System and
//! the physical Access System gating venue entry for non-member visitors:
//! - Organiser identity mapping (lazy, email-keyed)
//! - Per-event suppression policy (fest-covered capacity)
//! - Idempotent event/fest push keyed by correlation key
//! - Approval resolution against the Access System's human workflow
//! - Visitor pass issuance with deterministic verification references
//!
//! The whole subsystem is feature-flagged by configuration: without the
//! Access System endpoint and service credential every operation is a
//! typed no-op.

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod service;

pub use client::{AccessClient, AccessHandle, AccessStores};
pub use config::AccessConfig;
pub use error::{Result, SyncError};
pub use service::issuer::pass_verification_url;
pub use service::{ApprovalResolver, BackgroundSync, OrganiserMapper, PassIssuer, SuppressionPolicy, SyncGateway};
