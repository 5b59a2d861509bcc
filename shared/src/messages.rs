//! Wire messages exchanged with the persistence and contact services

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CompanyId, ContactSummary, Position};

/// Stored org chart for one company
///
/// Used both as the load response body and as the on-disk document of the
/// file repository. The order of `positions` is the insertion order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ChartDocument {
    pub fn new(company_id: CompanyId, positions: Vec<Position>) -> Self {
        Self {
            company_id: Some(company_id),
            positions,
            chart_name: None,
            chart_description: None,
            updated_at: None,
        }
    }
}

/// Full-chart save request; there are no partial or diff saves
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub positions: Vec<Position>,
    pub chart_name: String,
    pub chart_description: String,
}

/// Acknowledgement returned by a successful save
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAck {
    pub saved_positions: usize,
    pub saved_at: DateTime<Utc>,
}

impl SaveAck {
    pub fn now(saved_positions: usize) -> Self {
        Self {
            saved_positions,
            saved_at: Utc::now(),
        }
    }
}

/// Response body of a contact directory search
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSearchResponse {
    #[serde(default)]
    pub contacts: Vec<ContactSummary>,
}
