//! Service Layer
//!
//! The five sync operations exposed to the Events System, plus the
//! explicit background submission channel for fire-and-forget pushes.
//! All services are stateless between calls; they hold only the typed
//! Access client.

pub mod background;
pub mod gateway;
pub mod issuer;
pub mod mapper;
pub mod policy;
pub mod resolver;

pub use background::{BackgroundSync, PushOutcome};
pub use gateway::SyncGateway;
pub use issuer::PassIssuer;
pub use mapper::OrganiserMapper;
pub use policy::SuppressionPolicy;
pub use resolver::ApprovalResolver;
