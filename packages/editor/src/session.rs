//! # Editor Session
//!
//! Transient state of one running editor. Nothing here is persisted.

use crate::clipboard::Clipboard;
use crate::history::History;
use crate::model::{ComponentTree, DeviceView};

#[derive(Debug)]
pub struct EditorSession {
    pub active_page_id: Option<String>,

    /// `None` means the default (untranslated) tree is authoritative
    pub active_language: Option<String>,

    /// Always references a node in the resolved tree, or is `None`
    pub selected_id: Option<String>,

    pub device_view: DeviceView,

    pub clipboard: Clipboard,

    pub history: History,

    /// A props/styles/animation change has not been recorded in `history` yet
    pub pending_continuous_edit: bool,
}

impl EditorSession {
    pub fn new(
        active_page_id: Option<String>,
        initial_tree: ComponentTree,
        history_limit: usize,
        device_view: DeviceView,
    ) -> Self {
        Self {
            active_page_id,
            active_language: None,
            selected_id: None,
            device_view,
            clipboard: Clipboard::new(),
            history: History::with_max_levels(initial_tree, history_limit),
            pending_continuous_edit: false,
        }
    }
}
