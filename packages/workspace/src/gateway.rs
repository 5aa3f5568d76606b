//! # In-process Persistence Gateway
//!
//! `MemoryGateway` stores everything in a `WorkspaceState` behind a tokio
//! lock and behaves like the remote backend: it assigns version numbers,
//! publish URLs and ids for duplicated sites.
//!
//! With a backing file the state is loaded on `open` and rewritten after
//! every successful mutation. Tests can make any operation fail with
//! `fail_on`.

use crate::state::WorkspaceState;
use async_trait::async_trait;
use pagewright_editor::{
    ComponentTree, GatewayError, Page, PageVersion, PersistenceGateway, PublishReceipt, Site,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

pub const DEFAULT_PUBLISH_BASE_URL: &str = "https://sites.pagewright.local";

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid workspace file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gateway operations, used to target injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetSite,
    UpdateSite,
    DeleteSite,
    DuplicateSite,
    AddPage,
    UpdatePage,
    DeletePage,
    ReorderPages,
    UpdatePageComponents,
    SaveVersion,
    ListVersions,
    RestoreVersion,
    PublishSite,
    UnpublishSite,
}

pub struct MemoryGateway {
    state: RwLock<WorkspaceState>,
    backing: Option<PathBuf>,
    publish_base_url: String,
    failures: Mutex<HashMap<Operation, GatewayError>>,
    calls: Mutex<Vec<Operation>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::from_state(WorkspaceState::new())
    }

    pub fn from_state(state: WorkspaceState) -> Self {
        Self {
            state: RwLock::new(state),
            backing: None,
            publish_base_url: DEFAULT_PUBLISH_BASE_URL.to_string(),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Open a file-backed gateway; a missing file starts empty
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let path = path.as_ref().to_path_buf();
        let state = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str(&content)?
        } else {
            WorkspaceState::new()
        };

        info!(path = %path.display(), sites = state.sites.len(), "Opened workspace");
        let mut gateway = Self::from_state(state);
        gateway.backing = Some(path);
        Ok(gateway)
    }

    pub fn with_publish_base_url(mut self, url: impl Into<String>) -> Self {
        self.publish_base_url = url.into();
        self
    }

    pub async fn insert_site(&self, site: Site) -> Result<(), WorkspaceError> {
        self.state.write().await.insert_site(site);
        self.flush().await
    }

    /// Copy of the whole stored state
    pub async fn snapshot(&self) -> WorkspaceState {
        self.state.read().await.clone()
    }

    /// Write the state to the backing file, if any
    pub async fn flush(&self) -> Result<(), WorkspaceError> {
        let Some(path) = &self.backing else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&*self.state.read().await)?;
        tokio::fs::write(path, content).await?;
        debug!(path = %path.display(), "Flushed workspace");
        Ok(())
    }

    /// Make every call to `operation` fail with `error` until cleared
    pub async fn fail_on(&self, operation: Operation, error: GatewayError) {
        self.failures.lock().await.insert(operation, error);
    }

    pub async fn clear_failures(&self) {
        self.failures.lock().await.clear();
    }

    /// Operations received so far, in arrival order
    pub async fn calls(&self) -> Vec<Operation> {
        self.calls.lock().await.clone()
    }

    async fn enter(&self, operation: Operation) -> Result<(), GatewayError> {
        self.calls.lock().await.push(operation);
        match self.failures.lock().await.get(&operation) {
            Some(error) => {
                warn!(?operation, %error, "Injected failure");
                Err(error.clone())
            }
            None => Ok(()),
        }
    }

    async fn mutate<T, F>(&self, operation: Operation, apply: F) -> Result<T, GatewayError>
    where
        F: FnOnce(&mut WorkspaceState) -> Result<T, GatewayError>,
    {
        self.enter(operation).await?;
        let value = apply(&mut *self.state.write().await)?;
        self.flush().await.map_err(|e| GatewayError::Server {
            status: 500,
            message: e.to_string(),
        })?;
        debug!(?operation, "Applied");
        Ok(value)
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn get_site(&self, site_id: &str) -> Result<Site, GatewayError> {
        self.enter(Operation::GetSite).await?;
        self.state.read().await.site(site_id).cloned()
    }

    async fn update_site(&self, site: Site) -> Result<Site, GatewayError> {
        self.mutate(Operation::UpdateSite, |state| state.update_site(site))
            .await
    }

    async fn delete_site(&self, site_id: &str) -> Result<(), GatewayError> {
        self.mutate(Operation::DeleteSite, |state| state.delete_site(site_id))
            .await
    }

    async fn duplicate_site(&self, site_id: &str) -> Result<Site, GatewayError> {
        self.mutate(Operation::DuplicateSite, |state| {
            state.duplicate_site(site_id, new_id(), new_id)
        })
        .await
    }

    async fn add_page(&self, site_id: &str, page: Page) -> Result<Page, GatewayError> {
        self.mutate(Operation::AddPage, |state| state.add_page(site_id, page))
            .await
    }

    async fn update_page(&self, site_id: &str, page: Page) -> Result<Page, GatewayError> {
        self.mutate(Operation::UpdatePage, |state| state.update_page(site_id, page))
            .await
    }

    async fn delete_page(&self, site_id: &str, page_id: &str) -> Result<(), GatewayError> {
        self.mutate(Operation::DeletePage, |state| state.delete_page(site_id, page_id))
            .await
    }

    async fn reorder_pages(&self, site_id: &str, page_ids: Vec<String>) -> Result<(), GatewayError> {
        self.mutate(Operation::ReorderPages, |state| {
            state.reorder_pages(site_id, &page_ids)
        })
        .await
    }

    async fn update_page_components(
        &self,
        site_id: &str,
        page_id: &str,
        components: ComponentTree,
        language: Option<String>,
    ) -> Result<(), GatewayError> {
        self.mutate(Operation::UpdatePageComponents, |state| {
            state.update_page_components(site_id, page_id, components, language)
        })
        .await
    }

    async fn save_version(
        &self,
        page_id: &str,
        change_message: Option<String>,
    ) -> Result<PageVersion, GatewayError> {
        self.mutate(Operation::SaveVersion, |state| {
            state.save_version(page_id, new_id(), change_message)
        })
        .await
    }

    async fn list_versions(&self, page_id: &str) -> Result<Vec<PageVersion>, GatewayError> {
        self.enter(Operation::ListVersions).await?;
        Ok(self.state.read().await.list_versions(page_id))
    }

    async fn restore_version(&self, page_id: &str, version_id: &str) -> Result<(), GatewayError> {
        self.mutate(Operation::RestoreVersion, |state| {
            state.restore_version(page_id, version_id)
        })
        .await
    }

    async fn publish_site(&self, site_id: &str) -> Result<PublishReceipt, GatewayError> {
        let base_url = self.publish_base_url.clone();
        self.mutate(Operation::PublishSite, |state| state.publish(site_id, &base_url))
            .await
    }

    async fn unpublish_site(&self, site_id: &str) -> Result<(), GatewayError> {
        self.mutate(Operation::UnpublishSite, |state| state.unpublish(site_id))
            .await
    }
}
