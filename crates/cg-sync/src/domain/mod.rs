//! Domain Models
//!
//! Entities held in the Access System store. The sync subsystem owns
//! organiser identities, sync requests, and visitor passes; approved
//! entries are created by the Access System's approval workflow and
//! only ever read here.

pub mod approved_entry;
pub mod organiser;
pub mod sync_request;
pub mod visitor_pass;

pub use approved_entry::*;
pub use organiser::*;
pub use sync_request::*;
pub use visitor_pass::*;

/// Source tag stamped on every record this subsystem writes
pub const SOURCE_TAG: &str = "campus-events";
