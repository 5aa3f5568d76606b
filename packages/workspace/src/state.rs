use chrono::Utc;
use pagewright_editor::{ComponentTree, GatewayError, Page, PageVersion, PublishReceipt, Site};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// Everything the backend stores, serialisable as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceState {
    #[serde(default)]
    pub sites: BTreeMap<String, Site>,

    /// Versions keyed by page id, in creation order
    #[serde(default)]
    pub versions: BTreeMap<String, Vec<PageVersion>>,

    /// Last version number handed out per page; never decreases
    #[serde(default)]
    version_counters: BTreeMap<String, u32>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_site(&mut self, site: Site) {
        self.sites.insert(site.id.clone(), site);
    }

    pub fn site(&self, site_id: &str) -> Result<&Site, GatewayError> {
        self.sites
            .get(site_id)
            .ok_or_else(|| GatewayError::NotFound(format!("site {}", site_id)))
    }

    fn site_mut(&mut self, site_id: &str) -> Result<&mut Site, GatewayError> {
        self.sites
            .get_mut(site_id)
            .ok_or_else(|| GatewayError::NotFound(format!("site {}", site_id)))
    }

    fn page_mut(&mut self, site_id: &str, page_id: &str) -> Result<&mut Page, GatewayError> {
        self.site_mut(site_id)?
            .page_mut(page_id)
            .ok_or_else(|| GatewayError::NotFound(format!("page {}", page_id)))
    }

    // Version calls only carry a page id
    fn find_page(&self, page_id: &str) -> Result<&Page, GatewayError> {
        self.sites
            .values()
            .find_map(|site| site.page(page_id))
            .ok_or_else(|| GatewayError::NotFound(format!("page {}", page_id)))
    }

    fn find_page_mut(&mut self, page_id: &str) -> Result<&mut Page, GatewayError> {
        self.sites
            .values_mut()
            .find_map(|site| site.page_mut(page_id))
            .ok_or_else(|| GatewayError::NotFound(format!("page {}", page_id)))
    }

    pub fn update_site(&mut self, site: Site) -> Result<Site, GatewayError> {
        let stored = self.site_mut(&site.id)?;
        *stored = site;
        Ok(stored.clone())
    }

    pub fn delete_site(&mut self, site_id: &str) -> Result<(), GatewayError> {
        let site = self
            .sites
            .remove(site_id)
            .ok_or_else(|| GatewayError::NotFound(format!("site {}", site_id)))?;
        for page in &site.pages {
            self.versions.remove(&page.id);
        }
        Ok(())
    }

    /// Copy a site under `new_id`. Pages get new ids; versions are not copied.
    pub fn duplicate_site(
        &mut self,
        site_id: &str,
        new_id: String,
        mut page_id: impl FnMut() -> String,
    ) -> Result<Site, GatewayError> {
        let mut copy = self.site(site_id)?.clone();
        copy.id = new_id;
        copy.name = format!("{} (copy)", copy.name);
        copy.slug = format!("{}-copy", copy.slug);
        copy.published = false;
        copy.published_url = None;
        copy.published_at = None;
        for page in &mut copy.pages {
            page.id = page_id();
        }

        self.insert_site(copy.clone());
        Ok(copy)
    }

    pub fn add_page(&mut self, site_id: &str, page: Page) -> Result<Page, GatewayError> {
        if self.find_page(&page.id).is_ok() {
            return Err(GatewayError::Rejected(format!("page {} already exists", page.id)));
        }
        self.site_mut(site_id)?.pages.push(page.clone());
        Ok(page)
    }

    pub fn update_page(&mut self, site_id: &str, page: Page) -> Result<Page, GatewayError> {
        let stored = self.page_mut(site_id, &page.id)?;
        *stored = page;
        Ok(stored.clone())
    }

    pub fn delete_page(&mut self, site_id: &str, page_id: &str) -> Result<(), GatewayError> {
        let site = self.site_mut(site_id)?;
        if site.page(page_id).is_none() {
            return Err(GatewayError::NotFound(format!("page {}", page_id)));
        }
        if site.pages.len() <= 1 {
            return Err(GatewayError::Rejected("a site must keep at least one page".into()));
        }
        site.pages.retain(|p| p.id != page_id);
        self.versions.remove(page_id);
        Ok(())
    }

    pub fn reorder_pages(&mut self, site_id: &str, page_ids: &[String]) -> Result<(), GatewayError> {
        let site = self.site_mut(site_id)?;
        let known: HashSet<&str> = site.pages.iter().map(|p| p.id.as_str()).collect();
        let given: HashSet<&str> = page_ids.iter().map(String::as_str).collect();
        if page_ids.len() != site.pages.len() || known != given {
            return Err(GatewayError::Rejected("page order must name every page once".into()));
        }

        for page in &mut site.pages {
            if let Some(position) = page_ids.iter().position(|id| *id == page.id) {
                page.order = position as u32;
            }
        }
        site.pages.sort_by_key(|p| p.order);
        Ok(())
    }

    pub fn update_page_components(
        &mut self,
        site_id: &str,
        page_id: &str,
        components: ComponentTree,
        language: Option<String>,
    ) -> Result<(), GatewayError> {
        let page = self.page_mut(site_id, page_id)?;
        match language {
            Some(language) => {
                page.translations.entry(language).or_default().components = components;
            }
            None => page.components = components,
        }
        Ok(())
    }

    /// Snapshot the stored default tree of a page
    pub fn save_version(
        &mut self,
        page_id: &str,
        version_id: String,
        change_message: Option<String>,
    ) -> Result<PageVersion, GatewayError> {
        let components = self.find_page(page_id)?.components.clone();

        let counter = self.version_counters.entry(page_id.to_string()).or_insert(0);
        *counter += 1;

        let version = PageVersion {
            id: version_id,
            page_id: page_id.to_string(),
            version_number: *counter,
            components,
            change_message,
            created_at: Utc::now(),
            created_by: None,
        };
        self.versions
            .entry(page_id.to_string())
            .or_default()
            .push(version.clone());
        Ok(version)
    }

    pub fn list_versions(&self, page_id: &str) -> Vec<PageVersion> {
        self.versions.get(page_id).cloned().unwrap_or_default()
    }

    pub fn restore_version(&mut self, page_id: &str, version_id: &str) -> Result<(), GatewayError> {
        let components = self
            .versions
            .get(page_id)
            .and_then(|versions| versions.iter().find(|v| v.id == version_id))
            .map(|v| v.components.clone())
            .ok_or_else(|| GatewayError::NotFound(format!("version {}", version_id)))?;

        self.find_page_mut(page_id)?.components = components;
        Ok(())
    }

    pub fn publish(&mut self, site_id: &str, base_url: &str) -> Result<PublishReceipt, GatewayError> {
        let site = self.site_mut(site_id)?;
        if site.pages.is_empty() {
            return Err(GatewayError::Rejected("cannot publish a site without pages".into()));
        }

        let receipt = PublishReceipt {
            url: format!("{}/{}", base_url.trim_end_matches('/'), site.slug),
            published_at: Utc::now(),
        };
        site.published = true;
        site.published_url = Some(receipt.url.clone());
        site.published_at = Some(receipt.published_at);
        Ok(receipt)
    }

    pub fn unpublish(&mut self, site_id: &str) -> Result<(), GatewayError> {
        self.site_mut(site_id)?.published = false;
        Ok(())
    }
}
