//! Organizational hierarchy engine
//!
//! Keeps a company's positions as a flat table with parent pointers, edits
//! it through pure operations that preserve the hierarchy invariants,
//! records every edit in a linear undo/redo history and renders the
//! current snapshot as a forest for display.
//!
//! Loading, saving and contact lookup sit behind the traits in [`traits`];
//! [`services`] holds file, in-memory and HTTP implementations of them.

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod services;
pub mod session;
pub mod traits;

// Re-export commonly used types
pub use config::SessionConfig;
pub use core::{ChartStats, ExpandedSet, HistoryController, NewPosition, OccupantResolver, PositionStore, PositionUpdate, SearchFilter, ViewNode};
pub use error::{HierarchyError, HierarchyResult};
pub use persistence::PersistenceAdapter;
pub use session::EditSession;
pub use traits::{ContactDirectory, PositionRepository};
