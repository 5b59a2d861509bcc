//! Common test utilities and infrastructure
//!
//! Shared fixtures and helpers used by the unit and integration suites.

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
pub use helpers::{SessionBuilder, TestHelpers};
