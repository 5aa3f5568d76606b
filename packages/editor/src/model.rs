//! # Data Model
//!
//! Sites, pages, language overlays and the component tree that the editor
//! mutates. Everything here is plain serde data: the wire shape matches the
//! backend's JSON (camelCase keys, `type` for a component's kind).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Free-form configuration record (component props, styles, theme).
pub type PropMap = Map<String, Value>;

/// Ordered sequence of root-level components for one page or overlay.
pub type ComponentTree = Vec<ComponentNode>;

/// One visual building block on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    /// Unique within the tree, never reassigned
    pub id: String,

    /// Catalog tag understood by the renderer (e.g. "hero", "columns")
    #[serde(rename = "type")]
    pub kind: String,

    /// Display name shown in the layers panel
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub props: PropMap,

    #[serde(default)]
    pub styles: PropMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationSettings>,

    /// Present only on container kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentNode>>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            label: label.into(),
            props: PropMap::new(),
            styles: PropMap::new(),
            animation: None,
            children: None,
        }
    }

    pub fn with_props(mut self, props: PropMap) -> Self {
        self.props = props;
        self
    }

    pub fn with_children(mut self, children: Vec<ComponentNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn children(&self) -> &[ComponentNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Entrance / hover effect settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,

    /// Delay in milliseconds
    #[serde(default)]
    pub delay: u32,

    #[serde(default)]
    pub repeat: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSettings {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,
}

/// Per-language alternate component tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageTranslation {
    #[serde(default)]
    pub components: ComponentTree,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub slug: String,

    #[serde(default)]
    pub components: ComponentTree,

    #[serde(default)]
    pub seo: SeoSettings,

    #[serde(default)]
    pub is_home_page: bool,

    #[serde(default)]
    pub order: u32,

    /// Keyed by language code
    #[serde(default)]
    pub translations: BTreeMap<String, PageTranslation>,
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            components: Vec::new(),
            seo: SeoSettings::default(),
            is_home_page: false,
            order: 0,
            translations: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDescriptor {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub slug: String,

    #[serde(default)]
    pub theme: PropMap,

    #[serde(default)]
    pub pages: Vec<Page>,

    #[serde(default)]
    pub published: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default = "default_language")]
    pub default_language: String,

    #[serde(default)]
    pub languages: Vec<LanguageDescriptor>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Site {
    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }
}

/// Durable, immutable checkpoint of a page's tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVersion {
    pub id: String,
    pub page_id: String,

    /// Assigned by the backend, monotonically increasing per page
    pub version_number: u32,

    pub components: ComponentTree,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_message: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Preview viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceView {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}
