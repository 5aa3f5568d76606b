//! Component defaults lookup.
//!
//! The renderer owns the catalog of component kinds; the editor only needs
//! the starting label, props and styles for a freshly added node.

use crate::model::PropMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefaults {
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub props: PropMap,

    #[serde(default)]
    pub styles: PropMap,

    /// Container kinds start with an empty child list
    #[serde(default)]
    pub container: bool,
}

pub trait ComponentCatalog: Send + Sync {
    fn defaults(&self, kind: &str) -> Option<ComponentDefaults>;
}

/// Catalog backed by a fixed map, usually loaded from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    kinds: HashMap<String, ComponentDefaults>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>, defaults: ComponentDefaults) -> Self {
        self.kinds.insert(kind.into(), defaults);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl ComponentCatalog for StaticCatalog {
    fn defaults(&self, kind: &str) -> Option<ComponentDefaults> {
        self.kinds.get(kind).cloned()
    }
}
