//! Awaited site-level calls: publishing and whole-site lifecycle.
//!
//! Results come back to the host, which applies them to the core
//! (`EditorCore::apply_publish_state`, `EditorCore::replace_site`).

use crate::errors::EditorError;
use crate::gateway::{PersistenceGateway, PublishReceipt};
use crate::model::Site;
use std::sync::Arc;
use tracing::info;

pub struct SiteOperations {
    gateway: Arc<dyn PersistenceGateway>,
}

impl SiteOperations {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    pub async fn publish(&self, site_id: &str) -> Result<PublishReceipt, EditorError> {
        let receipt = self
            .gateway
            .publish_site(site_id)
            .await
            .map_err(EditorError::Publish)?;
        info!(site_id, url = %receipt.url, "Published site");
        Ok(receipt)
    }

    pub async fn unpublish(&self, site_id: &str) -> Result<(), EditorError> {
        self.gateway
            .unpublish_site(site_id)
            .await
            .map_err(EditorError::Publish)?;
        info!(site_id, "Unpublished site");
        Ok(())
    }

    pub async fn duplicate(&self, site_id: &str) -> Result<Site, EditorError> {
        let site = self
            .gateway
            .duplicate_site(site_id)
            .await
            .map_err(EditorError::SiteDuplicate)?;
        info!(site_id, new_site_id = %site.id, "Duplicated site");
        Ok(site)
    }

    pub async fn delete(&self, site_id: &str) -> Result<(), EditorError> {
        self.gateway
            .delete_site(site_id)
            .await
            .map_err(EditorError::SiteDelete)?;
        info!(site_id, "Deleted site");
        Ok(())
    }

    /// Fetch the authoritative copy of a site
    pub async fn fetch(&self, site_id: &str) -> Result<Site, EditorError> {
        self.gateway
            .get_site(site_id)
            .await
            .map_err(EditorError::SiteUpdate)
    }
}
