//! Bridge between a position repository and the in-memory store

use tracing::{debug, warn};

use shared::{CompanyId, SaveAck};

use crate::core::PositionStore;
use crate::error::HierarchyResult;
use crate::traits::PositionRepository;

/// Loads stores from and saves stores to a [`PositionRepository`]
pub struct PersistenceAdapter<R: PositionRepository> {
    repository: R,
}

impl<R: PositionRepository> PersistenceAdapter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Rehydrate a company's store
    ///
    /// The list order becomes the insertion order. Broken parent links,
    /// cycles, duplicate ids and contacts holding two positions are rejected
    /// with an integrity error. Level inversions are only logged.
    pub async fn load(&self, company_id: &CompanyId) -> HierarchyResult<PositionStore> {
        let positions = self.repository.load_positions(company_id).await?;
        let store = PositionStore::from_positions(positions)?;
        store.validate()?;

        for violation in store.level_violations() {
            warn!(
                "Level inversion in {company_id}: {} ({}) reports to {} ({})",
                violation.child,
                violation.child_level.label(),
                violation.parent,
                violation.parent_level.label()
            );
        }

        debug!("Loaded {} positions for {company_id}", store.len());
        Ok(store)
    }

    /// Save every position of `store`, in store order
    pub async fn save(&self, company_id: &CompanyId, store: &PositionStore) -> HierarchyResult<SaveAck> {
        let ack = self.repository.save_positions(company_id, store.all()).await?;
        debug!("Saved {} positions for {company_id}", ack.saved_positions);
        Ok(ack)
    }
}
