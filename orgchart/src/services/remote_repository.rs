//! HTTP position repository
//!
//! Talks to the application's org chart endpoint:
//! `GET {base}/api/companies/{id}/org-chart` returns a chart document and
//! `POST` to the same path replaces it with the full position list.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use shared::{ChartDocument, CompanyId, Position, SaveAck, SaveRequest};

use crate::error::{HierarchyError, HierarchyResult};
use crate::traits::PositionRepository;

/// Default chart name template; `{company}` is replaced by the company id
pub const DEFAULT_CHART_NAME_TEMPLATE: &str = "{company} Organization Chart";

pub struct RemoteRepository {
    client: reqwest::Client,
    base_url: String,
    chart_name_template: String,
}

impl RemoteRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            chart_name_template: DEFAULT_CHART_NAME_TEMPLATE.to_string(),
        }
    }

    pub fn with_chart_name_template(mut self, template: impl Into<String>) -> Self {
        self.chart_name_template = template.into();
        self
    }

    fn chart_url(&self, company_id: &CompanyId) -> String {
        format!(
            "{}/api/companies/{}/org-chart",
            self.base_url,
            urlencoding::encode(company_id.as_str())
        )
    }

    fn save_request(&self, company_id: &CompanyId, positions: &[Position]) -> SaveRequest {
        SaveRequest {
            positions: positions.to_vec(),
            chart_name: self.chart_name_template.replace("{company}", company_id.as_str()),
            chart_description: format!("Organizational structure for {company_id}"),
        }
    }
}

/// Map a non-success HTTP status to a persistence error
pub(crate) fn status_error(operation: &str, status: StatusCode) -> HierarchyError {
    HierarchyError::PersistenceError {
        operation: operation.to_string(),
        message: format!("server responded with {status}"),
    }
}

pub(crate) fn network_error(err: reqwest::Error) -> HierarchyError {
    HierarchyError::NetworkError { message: err.to_string() }
}

#[async_trait]
impl PositionRepository for RemoteRepository {
    async fn load_positions(&self, company_id: &CompanyId) -> HierarchyResult<Vec<Position>> {
        let url = self.chart_url(company_id);
        let response = self.client.get(&url).send().await.map_err(network_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("No chart stored for {company_id}, starting empty");
                Ok(Vec::new())
            }
            status if status.is_success() => {
                let document: ChartDocument = response.json().await.map_err(|e| HierarchyError::PersistenceError {
                    operation: "load".to_string(),
                    message: format!("malformed chart document: {e}"),
                })?;
                debug!("Fetched {} positions from {url}", document.positions.len());
                Ok(document.positions)
            }
            status => Err(status_error("load", status)),
        }
    }

    async fn save_positions(&self, company_id: &CompanyId, positions: &[Position]) -> HierarchyResult<SaveAck> {
        let url = self.chart_url(company_id);
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&self.save_request(company_id, positions))
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error("save", status));
        }

        // Servers that answer with an empty body still count as an ack
        let body = response.bytes().await.map_err(network_error)?;
        let ack = serde_json::from_slice::<SaveAck>(&body).unwrap_or_else(|_| SaveAck::now(positions.len()));
        debug!("Saved {} positions to {url}", ack.saved_positions);
        Ok(ack)
    }
}
