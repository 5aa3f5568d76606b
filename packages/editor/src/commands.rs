//! # Editor Commands
//!
//! The synchronous command surface as data. Hosts that receive commands
//! over a wire (or replay them from a script) deserialize an
//! `EditorCommand` and hand it to `EditorCore::execute`.

use crate::editor::EditorCore;
use crate::errors::EditorError;
use crate::model::{AnimationSettings, ComponentNode, DeviceView, Page, PropMap, SeoSettings};
use crate::tree::MoveDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditorCommand {
    Add {
        kind: String,
    },
    InsertAt {
        kind: String,
        index: usize,
    },
    Insert {
        node: ComponentNode,
    },
    Remove {
        id: String,
    },
    Duplicate {
        id: String,
    },
    Move {
        id: String,
        direction: MoveDirection,
    },
    Reorder {
        active_id: String,
        over_id: String,
    },
    UpdateProps {
        id: String,
        props: PropMap,
    },
    UpdateStyles {
        id: String,
        styles: PropMap,
    },
    UpdateAnimation {
        id: String,
        #[serde(default)]
        animation: Option<AnimationSettings>,
    },
    Select {
        #[serde(default)]
        id: Option<String>,
    },
    FlushEdit,
    Undo,
    Redo,
    Copy {
        id: String,
    },
    Paste,
    SwitchPage {
        page_id: String,
    },
    SwitchLanguage {
        #[serde(default)]
        language: Option<String>,
    },
    SetDevice {
        device: DeviceView,
    },
    AddPage {
        page: Page,
    },
    DeletePage {
        page_id: String,
    },
    DuplicatePage {
        page_id: String,
    },
    RenamePage {
        page_id: String,
        title: String,
    },
    ChangeSlug {
        page_id: String,
        slug: String,
    },
    ChangeSeo {
        page_id: String,
        seo: SeoSettings,
    },
    ChangeTheme {
        theme: PropMap,
    },
    SetHomePage {
        page_id: String,
    },
    ReorderPages {
        page_ids: Vec<String>,
    },
    CreateTranslation {
        page_id: String,
        language: String,
    },
    RemoveTranslation {
        page_id: String,
        language: String,
    },
}

impl EditorCore {
    /// Run one command. Returns the id of a created component or page.
    pub fn execute(&mut self, command: EditorCommand) -> Result<Option<String>, EditorError> {
        match command {
            EditorCommand::Add { kind } => self.add(&kind).map(Some),
            EditorCommand::InsertAt { kind, index } => self.insert_at(&kind, index).map(Some),
            EditorCommand::Insert { node } => self.insert(node).map(Some),
            EditorCommand::Remove { id } => self.remove(&id).map(|_| None),
            EditorCommand::Duplicate { id } => self.duplicate(&id),
            EditorCommand::Move { id, direction } => {
                self.move_component(&id, direction).map(|_| None)
            }
            EditorCommand::Reorder { active_id, over_id } => {
                self.reorder(&active_id, &over_id).map(|_| None)
            }
            EditorCommand::UpdateProps { id, props } => self.update_props(&id, props).map(|_| None),
            EditorCommand::UpdateStyles { id, styles } => {
                self.update_styles(&id, styles).map(|_| None)
            }
            EditorCommand::UpdateAnimation { id, animation } => {
                self.update_animation(&id, animation).map(|_| None)
            }
            EditorCommand::Select { id } => {
                self.set_selection(id.as_deref());
                Ok(None)
            }
            EditorCommand::FlushEdit => {
                self.flush_pending_edit();
                Ok(None)
            }
            EditorCommand::Undo => self.undo().map(|_| None),
            EditorCommand::Redo => self.redo().map(|_| None),
            EditorCommand::Copy { id } => {
                self.copy(&id);
                Ok(None)
            }
            EditorCommand::Paste => self.paste().map(Some),
            EditorCommand::SwitchPage { page_id } => {
                self.switch_page(&page_id);
                Ok(None)
            }
            EditorCommand::SwitchLanguage { language } => {
                self.switch_language(language.as_deref()).map(|_| None)
            }
            EditorCommand::SetDevice { device } => {
                self.set_device_view(device);
                Ok(None)
            }
            EditorCommand::AddPage { page } => {
                let id = page.id.clone();
                self.add_page(page);
                Ok(Some(id))
            }
            EditorCommand::DeletePage { page_id } => self.delete_page(&page_id).map(|_| None),
            EditorCommand::DuplicatePage { page_id } => Ok(self.duplicate_page(&page_id)),
            EditorCommand::RenamePage { page_id, title } => {
                self.rename_page(&page_id, &title);
                Ok(None)
            }
            EditorCommand::ChangeSlug { page_id, slug } => {
                self.change_slug(&page_id, &slug);
                Ok(None)
            }
            EditorCommand::ChangeSeo { page_id, seo } => {
                self.change_seo(&page_id, seo);
                Ok(None)
            }
            EditorCommand::ChangeTheme { theme } => {
                self.change_theme(theme);
                Ok(None)
            }
            EditorCommand::SetHomePage { page_id } => {
                self.set_home_page(&page_id);
                Ok(None)
            }
            EditorCommand::ReorderPages { page_ids } => self.reorder_pages(&page_ids).map(|_| None),
            EditorCommand::CreateTranslation { page_id, language } => {
                self.create_translation(&page_id, &language).map(|_| None)
            }
            EditorCommand::RemoveTranslation { page_id, language } => {
                self.remove_translation(&page_id, &language);
                Ok(None)
            }
        }
    }
}
