//! # Editor Core
//!
//! The state container every command goes through. Handlers always read
//! the current site/session at call time; nothing is captured ahead of a
//! command.
//!
//! ## Commit path
//!
//! ```text
//! command ─▶ edit a copy of the resolved tree ─▶ commit(tree, track_history)
//!                                                  ├─ write into page / overlay
//!                                                  ├─ history.push (structural only)
//!                                                  └─ outbox: UpdatePageComponents
//! ```
//!
//! Component-tree operations live in `store.rs`, page/site operations in
//! `site_actions.rs`.

use crate::catalog::ComponentCatalog;
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::id_generator::IdGenerator;
use crate::model::{ComponentNode, ComponentTree, DeviceView, Page, Site};
use crate::overlay::{self, WriteTarget};
use crate::session::EditorSession;
use crate::sync::{Outbox, PersistRequest};
use crate::tree;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// What the host UI renders from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub components: ComponentTree,
    pub selected_id: Option<String>,
    pub device_view: DeviceView,
    pub active_page_id: Option<String>,
    pub active_language: Option<String>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub has_clipboard: bool,
    pub pending_continuous_edit: bool,
}

pub struct EditorCore {
    pub(crate) site: Site,
    pub(crate) session: EditorSession,
    pub(crate) config: EditorConfig,
    pub(crate) ids: IdGenerator,
    pub(crate) page_ids: IdGenerator,
    pub(crate) catalog: Arc<dyn ComponentCatalog>,
    pub(crate) outbox: Outbox,
}

impl EditorCore {
    /// Open `site`, activating its home page (or the first page)
    pub fn new(
        site: Site,
        catalog: Arc<dyn ComponentCatalog>,
        outbox: Outbox,
        config: EditorConfig,
    ) -> Self {
        let initial_page = site
            .pages
            .iter()
            .find(|p| p.is_home_page)
            .or_else(|| site.pages.first());
        let active_page_id = initial_page.map(|p| p.id.clone());
        let initial_tree = initial_page.map(|p| p.components.clone()).unwrap_or_default();

        let session = EditorSession::new(
            active_page_id,
            initial_tree,
            config.history_limit,
            config.default_device,
        );
        let ids = IdGenerator::new(&config.id_prefix);
        let page_ids = IdGenerator::from_seed("page", ids.seed().to_string());

        info!(site_id = %site.id, pages = site.pages.len(), "Opened site");

        Self {
            site,
            session,
            config,
            ids,
            page_ids,
            catalog,
            outbox,
        }
    }

    /// Replace the id generators (deterministic ids in tests)
    pub fn with_id_seed(mut self, seed: &str) -> Self {
        self.ids = IdGenerator::from_seed(&self.config.id_prefix, seed);
        self.page_ids = IdGenerator::from_seed("page", seed);
        self
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.site.page(page_id)
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.session
            .active_page_id
            .as_deref()
            .and_then(|id| self.site.page(id))
    }

    /// Tree resolved for the active (page, language) pair
    pub fn components(&self) -> &[ComponentNode] {
        match self.active_page() {
            Some(page) => overlay::resolve(page, self.session.active_language.as_deref()).0,
            None => &[],
        }
    }

    pub fn write_target(&self) -> WriteTarget {
        match self.active_page() {
            Some(page) => overlay::write_target(page, self.session.active_language.as_deref()),
            None => WriteTarget::Default,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.session.selected_id.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        self.session.history.can_undo() || self.session.pending_continuous_edit
    }

    pub fn can_redo(&self) -> bool {
        self.session.history.can_redo()
    }

    pub fn view(&self) -> EditorView {
        EditorView {
            components: self.components().to_vec(),
            selected_id: self.session.selected_id.clone(),
            device_view: self.session.device_view,
            active_page_id: self.session.active_page_id.clone(),
            active_language: self.session.active_language.clone(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            has_clipboard: self.session.clipboard.has_content(),
            pending_continuous_edit: self.session.pending_continuous_edit,
        }
    }

    pub fn set_device_view(&mut self, device: DeviceView) {
        self.session.device_view = device;
    }

    /// Store `tree` as the live tree and forward it to the gateway.
    ///
    /// Only structural edits pass `track_history = true`.
    pub(crate) fn commit(&mut self, tree: ComponentTree, track_history: bool) -> Result<(), EditorError> {
        let page_id = self
            .session
            .active_page_id
            .clone()
            .ok_or(EditorError::NoActivePage)?;
        let language = self.session.active_language.clone();
        let page = self.site.page_mut(&page_id).ok_or(EditorError::NoActivePage)?;

        let target = overlay::write_target(page, language.as_deref());
        *overlay::tree_mut(page, &target) = tree.clone();

        debug!(
            page_id = %page_id,
            language = ?target.language(),
            track_history,
            "Committed component tree"
        );

        let persist_language = target.language().map(str::to_string);
        if track_history {
            let outgoing = self.session.selected_id.clone();
            self.session.history.push(tree.clone(), outgoing);
            self.session.pending_continuous_edit = false;
        }

        self.outbox.send(PersistRequest::UpdatePageComponents {
            site_id: self.site.id.clone(),
            page_id,
            components: tree,
            language: persist_language,
        });
        Ok(())
    }

    /// Forward the whole site to the gateway
    pub(crate) fn persist_site(&self) {
        self.outbox.send(PersistRequest::UpdateSite {
            site: self.site.clone(),
        });
    }

    /// Fold an unrecorded props/styles/animation edit into history
    pub fn flush_pending_edit(&mut self) {
        if !self.session.pending_continuous_edit {
            return;
        }

        let tree = self.components().to_vec();
        let outgoing = self.session.selected_id.clone();
        self.session.history.push(tree, outgoing);
        self.session.pending_continuous_edit = false;
        debug!("Recorded pending continuous edit");
    }

    /// Select a node in the resolved tree; unknown ids clear the selection
    pub fn set_selection(&mut self, id: Option<&str>) {
        self.flush_pending_edit();
        self.session.selected_id = self.validated(id);
    }

    pub(crate) fn validated(&self, id: Option<&str>) -> Option<String> {
        id.filter(|id| tree::contains(self.components(), id))
            .map(str::to_string)
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        self.flush_pending_edit();

        let outgoing = self.session.selected_id.clone();
        let entry = self
            .session
            .history
            .undo(outgoing)
            .cloned()
            .ok_or(EditorError::NothingToUndo)?;

        self.commit(entry.tree, false)?;
        self.session.selected_id = self.validated(entry.selection.as_deref());
        debug!(cursor = self.session.history.cursor(), "Undo");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditorError> {
        self.flush_pending_edit();

        let outgoing = self.session.selected_id.clone();
        let entry = self
            .session
            .history
            .redo(outgoing)
            .cloned()
            .ok_or(EditorError::NothingToRedo)?;

        self.commit(entry.tree, false)?;
        self.session.selected_id = self.validated(entry.selection.as_deref());
        debug!(cursor = self.session.history.cursor(), "Redo");
        Ok(())
    }

    /// Activate another page; unknown ids are ignored
    pub fn switch_page(&mut self, page_id: &str) {
        if self.site.page(page_id).is_none() {
            return;
        }

        self.session.active_page_id = Some(page_id.to_string());
        self.session.selected_id = None;
        self.reset_history();
        info!(page_id, "Switched page");
    }

    /// Change the edited language; `None` (or the site default) edits the
    /// default tree.
    ///
    /// Codes not listed in `site.languages` are rejected with
    /// `UnknownLanguage`; language, history and selection stay as they were.
    pub fn switch_language(&mut self, language: Option<&str>) -> Result<(), EditorError> {
        let language = match language {
            Some(code) if code == self.site.default_language => None,
            Some(code) if !self.site.languages.iter().any(|l| l.code == code) => {
                return Err(EditorError::UnknownLanguage(code.to_string()));
            }
            other => other.map(str::to_string),
        };

        self.session.active_language = language;
        self.reset_history();
        let selected = self.session.selected_id.clone();
        self.session.selected_id = self.validated(selected.as_deref());
        info!(language = ?self.session.active_language, "Switched language");
        Ok(())
    }

    /// History is scoped to one (page, language) pair
    pub(crate) fn reset_history(&mut self) {
        let tree = self.components().to_vec();
        self.session.history.reset(tree);
        self.session.pending_continuous_edit = false;
    }

    /// Take a server-authoritative page (e.g. after a version restore) as if
    /// freshly loaded. No history entry is created.
    pub fn reload_page(&mut self, page: Page) {
        let page_id = page.id.clone();
        match self.site.page_mut(&page_id) {
            Some(existing) => *existing = page,
            None => self.site.pages.push(page),
        }

        if self.session.active_page_id.as_deref() == Some(page_id.as_str()) {
            self.reset_history();
            let selected = self.session.selected_id.clone();
            self.session.selected_id = self.validated(selected.as_deref());
        }
        info!(page_id = %page_id, "Reloaded page");
    }

    /// Replace the whole site with a fresh copy from the backend
    pub fn replace_site(&mut self, site: Site) {
        self.site = site;

        let active_exists = self
            .session
            .active_page_id
            .as_deref()
            .is_some_and(|id| self.site.page(id).is_some());
        if !active_exists {
            self.session.active_page_id = self.site.pages.first().map(|p| p.id.clone());
        }

        self.reset_history();
        let selected = self.session.selected_id.clone();
        self.session.selected_id = self.validated(selected.as_deref());
        info!(site_id = %self.site.id, "Reloaded site");
    }
}
