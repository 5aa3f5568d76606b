//! Error types for the editor

use crate::gateway::GatewayError;
use thiserror::Error;

/// How a failure is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-fatal notice, state left unchanged
    Validation,
    /// Remote call failed, optimistic local state is kept
    Persistence,
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("Cannot delete the last page of a site")]
    LastPage,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Component {0} is already at the edge of its list")]
    AtListBoundary(String),

    #[error("No page is active")]
    NoActivePage,

    #[error("Language {0} is not configured for this site")]
    UnknownLanguage(String),

    #[error("Page order must list every page exactly once")]
    InvalidPageOrder,

    #[error("Failed to save site: {0}")]
    SiteUpdate(#[source] GatewayError),

    #[error("Failed to save page components: {0}")]
    ComponentSync(#[source] GatewayError),

    #[error("Failed to save version: {0}")]
    VersionSave(#[source] GatewayError),

    #[error("Failed to load versions: {0}")]
    VersionList(#[source] GatewayError),

    #[error("Failed to restore version: {0}")]
    VersionRestore(#[source] GatewayError),

    #[error("Failed to change publish state: {0}")]
    Publish(#[source] GatewayError),

    #[error("Failed to duplicate site: {0}")]
    SiteDuplicate(#[source] GatewayError),

    #[error("Failed to delete site: {0}")]
    SiteDelete(#[source] GatewayError),
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::EmptyClipboard
            | EditorError::LastPage
            | EditorError::NothingToUndo
            | EditorError::NothingToRedo
            | EditorError::AtListBoundary(_)
            | EditorError::NoActivePage
            | EditorError::UnknownLanguage(_)
            | EditorError::InvalidPageOrder => ErrorKind::Validation,

            EditorError::SiteUpdate(_)
            | EditorError::ComponentSync(_)
            | EditorError::VersionSave(_)
            | EditorError::VersionList(_)
            | EditorError::VersionRestore(_)
            | EditorError::Publish(_)
            | EditorError::SiteDuplicate(_)
            | EditorError::SiteDelete(_) => ErrorKind::Persistence,
        }
    }
}
