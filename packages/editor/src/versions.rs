//! # Version Snapshots
//!
//! Named, numbered checkpoints of a page's default tree, kept by the
//! backend and independent of the undo/redo history.
//!
//! Unlike tree edits these calls are awaited: the host needs the new
//! version number, the version list, or the restored page.
//!
//! ```rust,ignore
//! let versions = VersionManager::new(gateway.clone());
//! if let Some(page) = core.active_page() {
//!     versions.save(&core.site().id, page, Some("before redesign".into())).await?;
//! }
//!
//! // later
//! let restored = versions.restore(&site_id, &page_id, &version_id).await?;
//! core.reload_page(restored); // no undo entry, history starts over
//! ```

use crate::errors::EditorError;
use crate::gateway::{GatewayError, PersistenceGateway};
use crate::model::{Page, PageVersion};
use std::sync::Arc;
use tracing::info;

pub struct VersionManager {
    gateway: Arc<dyn PersistenceGateway>,
}

impl VersionManager {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    /// Snapshot the page's default tree as its next version.
    ///
    /// The default tree is written first so the snapshot cannot miss local
    /// edits still queued in the outbox. Language overlays are never part
    /// of a version.
    pub async fn save(
        &self,
        site_id: &str,
        page: &Page,
        change_message: Option<String>,
    ) -> Result<PageVersion, EditorError> {
        let page_id = page.id.as_str();
        self.gateway
            .update_page_components(site_id, page_id, page.components.clone(), None)
            .await
            .map_err(EditorError::VersionSave)?;

        let version = self
            .gateway
            .save_version(page_id, change_message)
            .await
            .map_err(EditorError::VersionSave)?;

        info!(page_id, version = version.version_number, "Saved version");
        Ok(version)
    }

    /// All versions of a page, newest first
    pub async fn list(&self, page_id: &str) -> Result<Vec<PageVersion>, EditorError> {
        let mut versions = self
            .gateway
            .list_versions(page_id)
            .await
            .map_err(EditorError::VersionList)?;

        versions.sort_by(|a, b| b.version_number.cmp(&a.version_number));
        Ok(versions)
    }

    /// Make a version the page's current tree and return the refetched page
    pub async fn restore(
        &self,
        site_id: &str,
        page_id: &str,
        version_id: &str,
    ) -> Result<Page, EditorError> {
        self.gateway
            .restore_version(page_id, version_id)
            .await
            .map_err(EditorError::VersionRestore)?;

        let site = self
            .gateway
            .get_site(site_id)
            .await
            .map_err(EditorError::VersionRestore)?;

        let page = site
            .pages
            .into_iter()
            .find(|p| p.id == page_id)
            .ok_or_else(|| EditorError::VersionRestore(GatewayError::NotFound(page_id.to_string())))?;

        info!(page_id, version_id, "Restored version");
        Ok(page)
    }
}
