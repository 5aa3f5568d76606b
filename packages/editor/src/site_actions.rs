//! # Site Action Dispatcher
//!
//! Page and site level commands. Each one updates the in-memory site first
//! and then forwards the entire updated site to the gateway. A failed write
//! surfaces as a notice from the sync worker; the local change stays.

use crate::editor::EditorCore;
use crate::errors::EditorError;
use crate::gateway::PublishReceipt;
use crate::model::{Page, PageTranslation, PropMap, SeoSettings};
use crate::sync::PersistRequest;
use crate::tree;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

impl EditorCore {
    /// Append a page, persist, and make it active
    pub fn add_page(&mut self, page: Page) {
        let page_id = page.id.clone();
        self.site.pages.push(page);
        self.persist_site();
        info!(page_id = %page_id, "Added page");
        self.switch_page(&page_id);
    }

    /// Remove a page. The last remaining page cannot be deleted.
    pub fn delete_page(&mut self, page_id: &str) -> Result<(), EditorError> {
        if self.site.pages.len() <= 1 {
            warn!(page_id, "Refusing to delete the last page");
            return Err(EditorError::LastPage);
        }

        let Some(pos) = self.site.pages.iter().position(|p| p.id == page_id) else {
            return Ok(());
        };
        self.site.pages.remove(pos);
        self.persist_site();
        info!(page_id, "Deleted page");

        if self.session.active_page_id.as_deref() == Some(page_id) {
            if let Some(first) = self.site.pages.first().map(|p| p.id.clone()) {
                self.switch_page(&first);
            }
        }
        Ok(())
    }

    /// Copy a page with fresh component ids everywhere; returns the new page id
    pub fn duplicate_page(&mut self, page_id: &str) -> Option<String> {
        let original = self.site.page(page_id)?;
        let mut page = original.clone();

        page.id = self.page_ids.new_id();
        page.title = format!("{}{}", original.title, self.config.copy_suffix);
        page.slug = format!("{}{}", original.slug, self.config.slug_copy_suffix);
        page.is_home_page = false;
        page.order = self.site.pages.len() as u32;

        let mut mapping = HashMap::new();
        tree::remap_ids(&mut page.components, &mut mapping, &mut self.ids);
        for translation in page.translations.values_mut() {
            tree::remap_ids(&mut translation.components, &mut mapping, &mut self.ids);
        }

        let new_id = page.id.clone();
        self.site.pages.push(page);
        self.persist_site();
        info!(page_id, new_page_id = %new_id, "Duplicated page");
        self.switch_page(&new_id);
        Some(new_id)
    }

    pub fn rename_page(&mut self, page_id: &str, title: &str) {
        self.edit_page(page_id, |page| page.title = title.to_string());
    }

    pub fn change_slug(&mut self, page_id: &str, slug: &str) {
        self.edit_page(page_id, |page| page.slug = slug.to_string());
    }

    pub fn change_seo(&mut self, page_id: &str, seo: SeoSettings) {
        self.edit_page(page_id, |page| page.seo = seo);
    }

    pub fn change_theme(&mut self, theme: PropMap) {
        self.site.theme = theme;
        self.persist_site();
    }

    /// Make exactly one page the home page
    pub fn set_home_page(&mut self, page_id: &str) {
        if self.site.page(page_id).is_none() {
            return;
        }
        for page in &mut self.site.pages {
            page.is_home_page = page.id == page_id;
        }
        self.persist_site();
    }

    /// Reorder pages; `page_ids` must name every page exactly once
    pub fn reorder_pages(&mut self, page_ids: &[String]) -> Result<(), EditorError> {
        let known: HashSet<&str> = self.site.pages.iter().map(|p| p.id.as_str()).collect();
        let given: HashSet<&str> = page_ids.iter().map(String::as_str).collect();
        if page_ids.len() != self.site.pages.len() || given != known {
            return Err(EditorError::InvalidPageOrder);
        }

        let position: HashMap<&str, usize> = page_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        self.site
            .pages
            .sort_by_key(|p| position.get(p.id.as_str()).copied().unwrap_or(usize::MAX));
        for (i, page) in self.site.pages.iter_mut().enumerate() {
            page.order = i as u32;
        }

        self.outbox.send(PersistRequest::ReorderPages {
            site_id: self.site.id.clone(),
            page_ids: page_ids.to_vec(),
        });
        Ok(())
    }

    /// Seed a language overlay for a page from a copy of its default tree.
    ///
    /// Node ids are kept so the overlay lines up with the default tree. An
    /// existing overlay is left alone.
    pub fn create_translation(&mut self, page_id: &str, language: &str) -> Result<(), EditorError> {
        self.require_language(language)?;
        let Some(page) = self.site.page_mut(page_id) else {
            return Ok(());
        };
        if page.translations.contains_key(language) {
            return Ok(());
        }

        let components = page.components.clone();
        page.translations
            .insert(language.to_string(), PageTranslation { components });
        self.persist_site();
        info!(page_id, language, "Created translation");
        self.after_overlay_change(page_id, language);
        Ok(())
    }

    /// Drop a language overlay; that language falls back to the default tree
    pub fn remove_translation(&mut self, page_id: &str, language: &str) {
        let Some(page) = self.site.page_mut(page_id) else {
            return;
        };
        if page.translations.remove(language).is_none() {
            return;
        }
        self.persist_site();
        info!(page_id, language, "Removed translation");
        self.after_overlay_change(page_id, language);
    }

    /// Record a publish / unpublish that the backend has confirmed
    pub fn apply_publish_state(&mut self, receipt: Option<PublishReceipt>) {
        match receipt {
            Some(receipt) => {
                self.site.published = true;
                self.site.published_url = Some(receipt.url);
                self.site.published_at = Some(receipt.published_at);
            }
            None => {
                self.site.published = false;
            }
        }
    }

    fn edit_page<F>(&mut self, page_id: &str, edit: F)
    where
        F: FnOnce(&mut Page),
    {
        let Some(page) = self.site.page_mut(page_id) else {
            return;
        };
        edit(page);
        self.persist_site();
    }

    fn require_language(&self, language: &str) -> Result<(), EditorError> {
        if self.site.languages.iter().any(|l| l.code == language) {
            Ok(())
        } else {
            Err(EditorError::UnknownLanguage(language.to_string()))
        }
    }

    /// The resolved tree changes under an active (page, language) pair
    fn after_overlay_change(&mut self, page_id: &str, language: &str) {
        let affects_active = self.session.active_page_id.as_deref() == Some(page_id)
            && self.session.active_language.as_deref() == Some(language);
        if affects_active {
            self.reset_history();
            let selected = self.session.selected_id.clone();
            self.session.selected_id = self.validated(selected.as_deref());
        }
    }
}
