//! # Persistence Gateway
//!
//! Contract for the backend that durably stores sites, pages and versions.
//! The editor never talks to a transport directly; hosts plug in an
//! implementation (HTTP client, in-process store, test double).
//!
//! All methods are async and return a `GatewayError` on failure. Nothing in
//! the editor retries a failed call.

use crate::model::{ComponentTree, Page, PageVersion, Site};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Result of publishing a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub url: String,
    pub published_at: DateTime<Utc>,
}

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn get_site(&self, site_id: &str) -> Result<Site, GatewayError>;

    async fn update_site(&self, site: Site) -> Result<Site, GatewayError>;

    async fn delete_site(&self, site_id: &str) -> Result<(), GatewayError>;

    async fn duplicate_site(&self, site_id: &str) -> Result<Site, GatewayError>;

    async fn add_page(&self, site_id: &str, page: Page) -> Result<Page, GatewayError>;

    async fn update_page(&self, site_id: &str, page: Page) -> Result<Page, GatewayError>;

    async fn delete_page(&self, site_id: &str, page_id: &str) -> Result<(), GatewayError>;

    async fn reorder_pages(&self, site_id: &str, page_ids: Vec<String>) -> Result<(), GatewayError>;

    /// Narrow, frequent call made for every tree edit.
    ///
    /// `language` is `Some` only when the edit targets an existing overlay.
    async fn update_page_components(
        &self,
        site_id: &str,
        page_id: &str,
        components: ComponentTree,
        language: Option<String>,
    ) -> Result<(), GatewayError>;

    /// Snapshot the page's stored tree; the backend assigns `version_number`
    async fn save_version(
        &self,
        page_id: &str,
        change_message: Option<String>,
    ) -> Result<PageVersion, GatewayError>;

    async fn list_versions(&self, page_id: &str) -> Result<Vec<PageVersion>, GatewayError>;

    async fn restore_version(&self, page_id: &str, version_id: &str) -> Result<(), GatewayError>;

    async fn publish_site(&self, site_id: &str) -> Result<PublishReceipt, GatewayError>;

    async fn unpublish_site(&self, site_id: &str) -> Result<(), GatewayError>;
}
