use anyhow::{Context, Result};
use pagewright_editor::{ComponentDefaults, EditorConfig, StaticCatalog};
use std::path::Path;

pub const DEFAULT_CATALOG_NAME: &str = "pagewright.catalog.json";

/// Editor config from `--config`, else from the site file's directory
pub fn load_config(site_path: &Path, explicit: Option<&Path>) -> Result<EditorConfig> {
    match explicit {
        Some(path) => EditorConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display())),
        None => {
            let dir = site_dir(site_path);
            EditorConfig::load(dir)
                .with_context(|| format!("Failed to read config in {}", dir.display()))
        }
    }
}

/// Component catalog from `--catalog`, else `pagewright.catalog.json` next
/// to the site file, else the built-in kinds
pub fn load_catalog(site_path: &Path, explicit: Option<&Path>) -> Result<StaticCatalog> {
    let candidate = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| site_dir(site_path).join(DEFAULT_CATALOG_NAME));

    if !candidate.exists() {
        if explicit.is_some() {
            anyhow::bail!("Catalog not found: {}", candidate.display());
        }
        return Ok(builtin_catalog());
    }

    let content = std::fs::read_to_string(&candidate)?;
    StaticCatalog::from_json(&content)
        .with_context(|| format!("Invalid catalog {}", candidate.display()))
}

fn site_dir(site_path: &Path) -> &Path {
    site_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

pub fn builtin_catalog() -> StaticCatalog {
    let kind = |label: &str, props: serde_json::Value, container: bool| ComponentDefaults {
        label: label.to_string(),
        props: props.as_object().cloned().unwrap_or_default(),
        styles: Default::default(),
        container,
    };

    StaticCatalog::new()
        .with_kind(
            "hero",
            kind("Hero", serde_json::json!({ "title": "Welcome", "subtitle": "" }), false),
        )
        .with_kind("heading", kind("Heading", serde_json::json!({ "text": "Heading", "level": 2 }), false))
        .with_kind("text", kind("Text", serde_json::json!({ "text": "" }), false))
        .with_kind("image", kind("Image", serde_json::json!({ "src": "", "alt": "" }), false))
        .with_kind("button", kind("Button", serde_json::json!({ "text": "Click me", "href": "#" }), false))
        .with_kind("section", kind("Section", serde_json::json!({}), true))
        .with_kind("columns", kind("Columns", serde_json::json!({ "count": 2 }), true))
}
