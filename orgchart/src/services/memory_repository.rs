//! In-memory position repository for embedding and tests

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shared::{CompanyId, Position, SaveAck};

use crate::error::HierarchyResult;
use crate::traits::PositionRepository;

#[derive(Default)]
pub struct InMemoryRepository {
    charts: Mutex<HashMap<CompanyId, Vec<Position>>>,
    save_count: Mutex<usize>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with one company's chart
    pub fn with_chart(company_id: CompanyId, positions: Vec<Position>) -> Self {
        let mut charts = HashMap::new();
        charts.insert(company_id, positions);
        Self {
            charts: Mutex::new(charts),
            save_count: Mutex::new(0),
        }
    }

    pub async fn stored(&self, company_id: &CompanyId) -> Option<Vec<Position>> {
        self.charts.lock().await.get(company_id).cloned()
    }

    pub async fn save_count(&self) -> usize {
        *self.save_count.lock().await
    }
}

#[async_trait]
impl PositionRepository for InMemoryRepository {
    async fn load_positions(&self, company_id: &CompanyId) -> HierarchyResult<Vec<Position>> {
        Ok(self.charts.lock().await.get(company_id).cloned().unwrap_or_default())
    }

    async fn save_positions(&self, company_id: &CompanyId, positions: &[Position]) -> HierarchyResult<SaveAck> {
        self.charts
            .lock()
            .await
            .insert(company_id.clone(), positions.to_vec());
        *self.save_count.lock().await += 1;
        Ok(SaveAck::now(positions.len()))
    }
}
