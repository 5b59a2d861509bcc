//! File-backed position repository
//!
//! Keeps one JSON chart document per company under a data directory.
//! Saves are written to a temporary file first and renamed into place so a
//! crash never leaves a half-written chart behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use shared::{ChartDocument, CompanyId, Position, SaveAck};

use crate::error::{HierarchyError, HierarchyResult};
use crate::traits::PositionRepository;

/// Position repository storing `<data_dir>/<company>.json`
pub struct FileRepository {
    base_dir: PathBuf,
}

impl FileRepository {
    /// Create repository rooted at `./data`
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("./data"),
        }
    }

    /// Create with custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Chart file path for a company
    ///
    /// The id is percent-encoded, so distinct ids always map to distinct
    /// files and no id can leave the base directory.
    pub fn chart_path(&self, company_id: &CompanyId) -> HierarchyResult<PathBuf> {
        let file_stem = urlencoding::encode(company_id.as_str());
        if file_stem.trim_matches('.').is_empty() {
            return Err(HierarchyError::validation(format!(
                "company id {:?} can not be used as a file name",
                company_id.as_str()
            )));
        }
        Ok(self.base_dir.join(format!("{file_stem}.json")))
    }

    async fn write_temp(tmp_path: &Path, body: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(tmp_path).await?;
        file.write_all(body).await?;
        file.flush().await?;
        file.sync_all().await
    }

    /// Remove a leftover temp file; the original error is the one reported
    async fn discard_temp(tmp_path: &Path) {
        if let Err(err) = fs::remove_file(tmp_path).await {
            debug!("Could not remove {}: {err}", tmp_path.display());
        }
    }

    fn fs_error(operation: &str, path: &Path, err: std::io::Error) -> HierarchyError {
        HierarchyError::PersistenceError {
            operation: operation.to_string(),
            message: format!("{}: {err}", path.display()),
        }
    }
}

impl Default for FileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PositionRepository for FileRepository {
    async fn load_positions(&self, company_id: &CompanyId) -> HierarchyResult<Vec<Position>> {
        let path = self.chart_path(company_id)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No chart stored at {}, starting empty", path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(Self::fs_error("read_chart", &path, err)),
        };

        let document: ChartDocument = serde_json::from_str(&content)?;
        debug!("Read {} positions from {}", document.positions.len(), path.display());
        Ok(document.positions)
    }

    async fn save_positions(&self, company_id: &CompanyId, positions: &[Position]) -> HierarchyResult<SaveAck> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| Self::fs_error("create_data_dir", &self.base_dir, e))?;

        let mut document = ChartDocument::new(company_id.clone(), positions.to_vec());
        document.updated_at = Some(chrono::Utc::now());
        let body = serde_json::to_string_pretty(&document)?;

        let path = self.chart_path(company_id)?;
        let tmp_path = path.with_extension("json.tmp");
        if let Err(err) = Self::write_temp(&tmp_path, body.as_bytes()).await {
            Self::discard_temp(&tmp_path).await;
            return Err(Self::fs_error("write_temp_file", &tmp_path, err));
        }
        if let Err(err) = fs::rename(&tmp_path, &path).await {
            Self::discard_temp(&tmp_path).await;
            return Err(Self::fs_error("rename_chart", &path, err));
        }

        debug!("Wrote {} positions to {}", positions.len(), path.display());
        Ok(SaveAck::now(positions.len()))
    }
}
