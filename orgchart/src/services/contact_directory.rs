//! Contact directory implementations

use async_trait::async_trait;
use tracing::debug;

use shared::{ContactSearchResponse, ContactSummary};

use super::remote_repository::network_error;
use crate::error::{HierarchyError, HierarchyResult};
use crate::traits::ContactDirectory;

/// Fixed contact list, e.g. the contacts already attached to a company
///
/// Returns every contact in list order; narrowing by query is the
/// resolver's job.
#[derive(Debug, Clone, Default)]
pub struct StaticContactDirectory {
    contacts: Vec<ContactSummary>,
}

impl StaticContactDirectory {
    pub fn new(contacts: Vec<ContactSummary>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl ContactDirectory for StaticContactDirectory {
    async fn search_contacts(&self, _query: &str) -> HierarchyResult<Vec<ContactSummary>> {
        Ok(self.contacts.clone())
    }
}

/// Contact search over HTTP: `GET {base}/api/contacts?search=<query>`
pub struct RemoteContactDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteContactDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ContactDirectory for RemoteContactDirectory {
    async fn search_contacts(&self, query: &str) -> HierarchyResult<Vec<ContactSummary>> {
        let url = format!("{}/api/contacts", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("search", query)])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(HierarchyError::ContactLookupError {
                message: format!("server responded with {status}"),
            });
        }

        let body: ContactSearchResponse = response.json().await.map_err(|e| HierarchyError::ContactLookupError {
            message: format!("malformed contact response: {e}"),
        })?;
        debug!("Contact search {query:?} returned {} candidates", body.contacts.len());
        Ok(body.contacts)
    }
}
