//! Core hierarchy logic
//!
//! Pure, synchronous building blocks with no I/O: the store, the mutator
//! operations, the history stack, the renderer and the read-side helpers
//! built on top of it.

pub mod history;
pub mod mutator;
pub mod occupant;
pub mod renderer;
pub mod search;
pub mod stats;
pub mod store;

pub use history::{HistoryController, HistorySnapshot};
pub use mutator::{NewPosition, PositionUpdate};
pub use occupant::OccupantResolver;
pub use renderer::{ExpandedSet, LevelStyle, Page, ViewNode, VisibleRow};
pub use search::SearchFilter;
pub use stats::ChartStats;
pub use store::{LevelViolation, PositionStore};
