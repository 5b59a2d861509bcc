//! Shared types for the org chart hierarchy engine
//!
//! Contains the wire-level records exchanged with the persistence and
//! contact services. Engine-internal types (snapshots, view nodes, expanded
//! state) are kept in the `orgchart` crate.

pub mod types;
pub mod errors;
pub mod logging;
pub mod messages;

pub use types::*;
pub use errors::*;

pub use messages::{ChartDocument, ContactSearchResponse, SaveAck, SaveRequest};
