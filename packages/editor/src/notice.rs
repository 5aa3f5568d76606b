use crate::errors::{EditorError, ErrorKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Which subsystem produced a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeSource {
    Components,
    Site,
    Pages,
    Versions,
    Publishing,
}

/// User-facing message emitted for background persistence results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub source: NoticeSource,
    pub message: String,
}

impl Notice {
    pub fn error(source: NoticeSource, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            source,
            message: message.into(),
        }
    }

    pub fn warning(source: NoticeSource, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            source,
            message: message.into(),
        }
    }
}

impl From<&EditorError> for Notice {
    fn from(error: &EditorError) -> Self {
        let source = match error {
            EditorError::EmptyClipboard
            | EditorError::NothingToUndo
            | EditorError::NothingToRedo
            | EditorError::AtListBoundary(_)
            | EditorError::ComponentSync(_) => NoticeSource::Components,
            EditorError::LastPage | EditorError::NoActivePage | EditorError::InvalidPageOrder => {
                NoticeSource::Pages
            }
            EditorError::UnknownLanguage(_)
            | EditorError::SiteUpdate(_)
            | EditorError::SiteDuplicate(_)
            | EditorError::SiteDelete(_) => NoticeSource::Site,
            EditorError::VersionSave(_)
            | EditorError::VersionList(_)
            | EditorError::VersionRestore(_) => NoticeSource::Versions,
            EditorError::Publish(_) => NoticeSource::Publishing,
        };

        match error.kind() {
            ErrorKind::Validation => Notice::warning(source, error.to_string()),
            ErrorKind::Persistence => Notice::error(source, error.to_string()),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}/{:?}] {}", self.level, self.source, self.message)
    }
}
