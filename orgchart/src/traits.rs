//! Boundary trait definitions with mockall annotations for testing
//!
//! The hierarchy engine itself is synchronous. These traits are the only
//! places where it waits on something external: loading and saving the
//! flat position list, and looking up contacts to fill positions with.

use shared::{CompanyId, ContactSummary, Position, SaveAck};

use crate::error::HierarchyResult;

/// Remote store for a company's flattened position list
///
/// Saves are whole-chart and last-writer-wins; the engine never sends
/// partial or diff saves.
#[mockall::automock]
#[async_trait::async_trait]
pub trait PositionRepository: Send + Sync {
    /// Load the positions of a company
    ///
    /// # Returns
    /// Flat list whose order becomes the store's insertion order. A company
    /// without a stored chart yields an empty list.
    async fn load_positions(&self, company_id: &CompanyId) -> HierarchyResult<Vec<Position>>;

    /// Replace the stored chart of a company
    ///
    /// # Parameters
    /// - `company_id`: Owning company
    /// - `positions`: Every position of the current snapshot, in store order
    async fn save_positions(&self, company_id: &CompanyId, positions: &[Position]) -> HierarchyResult<SaveAck>;
}

/// Contact lookup service used to pick occupants
#[mockall::automock]
#[async_trait::async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Search contacts by name; results are returned in source order
    async fn search_contacts(&self, query: &str) -> HierarchyResult<Vec<ContactSummary>>;
}
