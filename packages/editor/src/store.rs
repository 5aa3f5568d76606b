//! # Component Tree Store
//!
//! Component-level commands on `EditorCore`. Every command edits a copy of
//! the resolved tree and hands it to `commit`.
//!
//! - Structural edits (add, insert, remove, duplicate, move, reorder, paste)
//!   are recorded in history immediately.
//! - Continuous edits (props, styles, animation) are persisted right away but
//!   only recorded in history on the next selection change, flush, undo or
//!   structural edit. A burst of keystrokes on one component is one undo step.
//!
//! Ids that no longer exist are treated as "no match": the command does
//! nothing and reports success.

use crate::editor::EditorCore;
use crate::errors::EditorError;
use crate::model::{AnimationSettings, ComponentNode, PropMap};
use crate::tree::{self, MoveDirection, MoveOutcome};
use tracing::{debug, warn};

impl EditorCore {
    fn new_node(&mut self, kind: &str) -> ComponentNode {
        let defaults = self.catalog.defaults(kind).unwrap_or_else(|| {
            warn!(kind, "Unknown component kind, using empty defaults");
            Default::default()
        });

        let label = if defaults.label.is_empty() {
            kind.to_string()
        } else {
            defaults.label
        };

        ComponentNode {
            id: self.ids.new_id(),
            kind: kind.to_string(),
            label,
            props: defaults.props,
            styles: defaults.styles,
            animation: None,
            children: defaults.container.then(Vec::new),
        }
    }

    /// Insert after the selection (same sibling list), or append to the root
    fn place_after_selection(&self, tree: &mut Vec<ComponentNode>, node: ComponentNode) {
        let node = match self.session.selected_id.as_deref() {
            Some(anchor) => match tree::insert_after(tree, anchor, node) {
                Ok(()) => return,
                Err(node) => node,
            },
            None => node,
        };
        tree.push(node);
    }

    fn commit_and_select(&mut self, tree: Vec<ComponentNode>, id: String) -> Result<String, EditorError> {
        self.commit(tree, true)?;
        self.session.selected_id = Some(id.clone());
        Ok(id)
    }

    /// Add a catalog component after the selection; returns the new id
    pub fn add(&mut self, kind: &str) -> Result<String, EditorError> {
        self.require_page()?;
        let node = self.new_node(kind);
        let id = node.id.clone();

        let mut tree = self.components().to_vec();
        self.place_after_selection(&mut tree, node);
        debug!(kind, id = %id, "Added component");
        self.commit_and_select(tree, id)
    }

    /// Add a catalog component at a root-level index (clamped to the list)
    pub fn insert_at(&mut self, kind: &str, index: usize) -> Result<String, EditorError> {
        self.require_page()?;
        let node = self.new_node(kind);
        let id = node.id.clone();

        let mut tree = self.components().to_vec();
        let index = index.min(tree.len());
        tree.insert(index, node);
        debug!(kind, id = %id, index, "Inserted component");
        self.commit_and_select(tree, id)
    }

    /// Append a fully formed node (e.g. from a block library).
    ///
    /// The whole subtree gets fresh ids, so an id seen earlier in the session
    /// (even one since deleted) is never reused.
    pub fn insert(&mut self, mut node: ComponentNode) -> Result<String, EditorError> {
        self.require_page()?;
        let mut tree = self.components().to_vec();

        tree::regenerate_ids(&mut node, &mut self.ids);
        let id = node.id.clone();
        tree.push(node);
        debug!(id = %id, "Inserted node");
        self.commit_and_select(tree, id)
    }

    /// Delete a node and its subtree
    pub fn remove(&mut self, id: &str) -> Result<(), EditorError> {
        self.require_page()?;
        let mut tree = self.components().to_vec();
        let Some(removed) = tree::remove(&mut tree, id) else {
            return Ok(());
        };

        self.commit(tree, true)?;

        let selection_removed = self
            .session
            .selected_id
            .as_deref()
            .is_some_and(|sel| tree::contains(std::slice::from_ref(&removed), sel));
        if selection_removed {
            self.session.selected_id = None;
        }
        debug!(id, "Removed component");
        Ok(())
    }

    /// Clone a node with fresh ids throughout and place it after the original
    pub fn duplicate(&mut self, id: &str) -> Result<Option<String>, EditorError> {
        self.require_page()?;
        let mut tree = self.components().to_vec();
        let Some(original) = tree::find(&tree, id) else {
            return Ok(None);
        };

        let mut clone = original.clone();
        tree::regenerate_ids(&mut clone, &mut self.ids);
        clone.label.push_str(&self.config.copy_suffix);
        let clone_id = clone.id.clone();

        if tree::insert_after(&mut tree, id, clone).is_err() {
            return Ok(None);
        }
        debug!(id, clone_id = %clone_id, "Duplicated component");
        self.commit_and_select(tree, clone_id).map(Some)
    }

    /// Swap a node with its previous/next sibling
    pub fn move_component(&mut self, id: &str, direction: MoveDirection) -> Result<(), EditorError> {
        self.require_page()?;
        let mut tree = self.components().to_vec();

        match tree::move_sibling(&mut tree, id, direction) {
            MoveOutcome::Moved => self.commit(tree, true),
            MoveOutcome::AtBoundary => Err(EditorError::AtListBoundary(id.to_string())),
            MoveOutcome::NotFound => Ok(()),
        }
    }

    /// Move `active_id` into the slot currently held by `over_id`
    pub fn reorder(&mut self, active_id: &str, over_id: &str) -> Result<(), EditorError> {
        self.require_page()?;
        let mut tree = self.components().to_vec();

        if tree::reorder(&mut tree, active_id, over_id) {
            self.commit(tree, true)?;
        }
        Ok(())
    }

    /// Shallow-merge `partial` into the node's props
    pub fn update_props(&mut self, id: &str, partial: PropMap) -> Result<(), EditorError> {
        self.continuous_edit(id, |node| node.props.extend(partial))
    }

    /// Shallow-merge `partial` into the node's styles
    pub fn update_styles(&mut self, id: &str, partial: PropMap) -> Result<(), EditorError> {
        self.continuous_edit(id, |node| node.styles.extend(partial))
    }

    /// Replace the node's animation settings wholesale
    pub fn update_animation(
        &mut self,
        id: &str,
        animation: Option<AnimationSettings>,
    ) -> Result<(), EditorError> {
        self.continuous_edit(id, |node| node.animation = animation)
    }

    fn continuous_edit<F>(&mut self, id: &str, edit: F) -> Result<(), EditorError>
    where
        F: FnOnce(&mut ComponentNode),
    {
        self.require_page()?;
        let mut tree = self.components().to_vec();
        let Some(node) = tree::find_mut(&mut tree, id) else {
            return Ok(());
        };
        edit(node);

        self.commit(tree, false)?;
        self.session.pending_continuous_edit = true;
        Ok(())
    }

    /// Put a copy of the node in the clipboard, replacing what was there
    pub fn copy(&mut self, id: &str) {
        if let Some(node) = tree::find(self.components(), id) {
            let node = node.clone();
            self.session.clipboard.copy(&node);
            debug!(id, "Copied component");
        }
    }

    /// Insert the clipboard contents with fresh ids after the selection
    pub fn paste(&mut self) -> Result<String, EditorError> {
        self.require_page()?;
        let node = self
            .session
            .clipboard
            .paste_copy(&mut self.ids, &self.config.paste_suffix)
            .ok_or(EditorError::EmptyClipboard)?;
        let id = node.id.clone();

        let mut tree = self.components().to_vec();
        self.place_after_selection(&mut tree, node);
        debug!(id = %id, "Pasted component");
        self.commit_and_select(tree, id)
    }

    fn require_page(&self) -> Result<(), EditorError> {
        match self.active_page() {
            Some(_) => Ok(()),
            None => Err(EditorError::NoActivePage),
        }
    }
}
