//! Shared fixtures for editor integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use pagewright_editor::{
    ComponentDefaults, ComponentNode, ComponentTree, EditorConfig, EditorCore, GatewayError,
    LanguageDescriptor, Outbox, Page, PageVersion, PersistRequest, PersistenceGateway,
    PublishReceipt, Site, StaticCatalog,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedReceiver;

pub fn catalog() -> StaticCatalog {
    let hero = ComponentDefaults {
        label: "Hero".into(),
        props: json!({ "title": "Welcome", "subtitle": "" })
            .as_object()
            .cloned()
            .unwrap(),
        ..Default::default()
    };
    let columns = ComponentDefaults {
        label: "Columns".into(),
        container: true,
        ..Default::default()
    };
    StaticCatalog::new()
        .with_kind("hero", hero)
        .with_kind("columns", columns)
        .with_kind("text", ComponentDefaults {
            label: "Text".into(),
            ..Default::default()
        })
}

pub fn node(id: &str, label: &str) -> ComponentNode {
    ComponentNode::new(id, "text", label)
}

pub fn site() -> Site {
    let mut home = Page::new("home", "Home", "home");
    home.is_home_page = true;
    home.components = vec![node("A", "Intro")];

    let mut about = Page::new("about", "About", "about");
    about.order = 1;
    about.components = vec![
        node("B", "Team"),
        ComponentNode::new("C", "columns", "Grid").with_children(vec![node("C1", "Left"), node("C2", "Right")]),
    ];

    Site {
        id: "site-1".into(),
        name: "Acme".into(),
        slug: "acme".into(),
        theme: Default::default(),
        pages: vec![home, about],
        published: false,
        published_url: None,
        published_at: None,
        default_language: "en".into(),
        languages: vec![
            LanguageDescriptor {
                code: "en".into(),
                name: "English".into(),
            },
            LanguageDescriptor {
                code: "fr".into(),
                name: "Français".into(),
            },
            LanguageDescriptor {
                code: "de".into(),
                name: "Deutsch".into(),
            },
        ],
    }
}

pub fn editor_for(site: Site) -> (EditorCore, UnboundedReceiver<PersistRequest>) {
    let (outbox, requests) = Outbox::channel();
    let core = EditorCore::new(site, Arc::new(catalog()), outbox, EditorConfig::default())
        .with_id_seed("t");
    (core, requests)
}

pub fn editor() -> (EditorCore, UnboundedReceiver<PersistRequest>) {
    editor_for(site())
}

pub fn drain(requests: &mut UnboundedReceiver<PersistRequest>) -> Vec<PersistRequest> {
    let mut out = Vec::new();
    while let Ok(request) = requests.try_recv() {
        out.push(request);
    }
    out
}

pub fn labels(tree: &[ComponentNode]) -> Vec<String> {
    tree.iter().map(|n| n.label.clone()).collect()
}

/// Gateway double that records calls and can be told to fail
#[derive(Default)]
pub struct RecordingGateway {
    pub site: Mutex<Option<Site>>,
    pub calls: Mutex<Vec<String>>,
    pub versions: Mutex<Vec<PageVersion>>,
    pub fail_with: Mutex<Option<GatewayError>>,
}

impl RecordingGateway {
    pub fn with_site(site: Site) -> Self {
        Self {
            site: Mutex::new(Some(site)),
            ..Default::default()
        }
    }

    pub fn fail(&self, error: GatewayError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, call: &str) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail_with.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn stored_site(&self) -> Result<Site, GatewayError> {
        self.site
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| GatewayError::NotFound("site".into()))
    }

    fn page_tree(&self, page_id: &str) -> ComponentTree {
        self.site
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|s| s.page(page_id).map(|p| p.components.clone()))
            .unwrap_or_default()
    }
}

#[async_trait]
impl PersistenceGateway for RecordingGateway {
    async fn get_site(&self, _site_id: &str) -> Result<Site, GatewayError> {
        self.enter("get_site")?;
        self.stored_site()
    }

    async fn update_site(&self, site: Site) -> Result<Site, GatewayError> {
        self.enter("update_site")?;
        *self.site.lock().unwrap() = Some(site.clone());
        Ok(site)
    }

    async fn delete_site(&self, _site_id: &str) -> Result<(), GatewayError> {
        self.enter("delete_site")
    }

    async fn duplicate_site(&self, _site_id: &str) -> Result<Site, GatewayError> {
        self.enter("duplicate_site")?;
        let mut copy = self.stored_site()?;
        copy.id = format!("{}-copy", copy.id);
        Ok(copy)
    }

    async fn add_page(&self, _site_id: &str, page: Page) -> Result<Page, GatewayError> {
        self.enter("add_page")?;
        Ok(page)
    }

    async fn update_page(&self, _site_id: &str, page: Page) -> Result<Page, GatewayError> {
        self.enter("update_page")?;
        Ok(page)
    }

    async fn delete_page(&self, _site_id: &str, _page_id: &str) -> Result<(), GatewayError> {
        self.enter("delete_page")
    }

    async fn reorder_pages(&self, _site_id: &str, _page_ids: Vec<String>) -> Result<(), GatewayError> {
        self.enter("reorder_pages")
    }

    async fn update_page_components(
        &self,
        _site_id: &str,
        page_id: &str,
        components: ComponentTree,
        language: Option<String>,
    ) -> Result<(), GatewayError> {
        self.enter("update_page_components")?;
        if let Some(site) = self.site.lock().unwrap().as_mut() {
            if let Some(page) = site.page_mut(page_id) {
                match language {
                    Some(language) => {
                        page.translations.entry(language).or_default().components = components
                    }
                    None => page.components = components,
                }
            }
        }
        Ok(())
    }

    async fn save_version(
        &self,
        page_id: &str,
        change_message: Option<String>,
    ) -> Result<PageVersion, GatewayError> {
        self.enter("save_version")?;
        let mut versions = self.versions.lock().unwrap();
        let number = versions.iter().filter(|v| v.page_id == page_id).count() as u32 + 1;
        let version = PageVersion {
            id: format!("v-{}", number),
            page_id: page_id.to_string(),
            version_number: number,
            components: self.page_tree(page_id),
            change_message,
            created_at: Utc::now(),
            created_by: None,
        };
        versions.push(version.clone());
        Ok(version)
    }

    async fn list_versions(&self, page_id: &str) -> Result<Vec<PageVersion>, GatewayError> {
        self.enter("list_versions")?;
        Ok(self
            .versions
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.page_id == page_id)
            .cloned()
            .collect())
    }

    async fn restore_version(&self, page_id: &str, version_id: &str) -> Result<(), GatewayError> {
        self.enter("restore_version")?;
        let components = self
            .versions
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == version_id && v.page_id == page_id)
            .map(|v| v.components.clone())
            .ok_or_else(|| GatewayError::NotFound(version_id.to_string()))?;
        if let Some(site) = self.site.lock().unwrap().as_mut() {
            if let Some(page) = site.page_mut(page_id) {
                page.components = components;
            }
        }
        Ok(())
    }

    async fn publish_site(&self, site_id: &str) -> Result<PublishReceipt, GatewayError> {
        self.enter("publish_site")?;
        Ok(PublishReceipt {
            url: format!("https://{}.example.test", site_id),
            published_at: Utc::now(),
        })
    }

    async fn unpublish_site(&self, _site_id: &str) -> Result<(), GatewayError> {
        self.enter("unpublish_site")
    }
}
