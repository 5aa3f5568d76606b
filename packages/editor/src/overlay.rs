//! # Language Overlay Resolver
//!
//! Decides which component tree a (page, language) pair reads from and
//! writes to:
//!
//! | active language | overlay exists | tree used            |
//! |-----------------|----------------|----------------------|
//! | none            | n/a            | `page.components`    |
//! | `xx`            | yes            | `translations[xx]`   |
//! | `xx`            | no             | `page.components`    |
//!
//! Editing a language that has no overlay writes into the default tree.
//! No overlay is created implicitly; see `EditorCore::create_translation`.

use crate::model::{ComponentNode, ComponentTree, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteTarget {
    Default,
    Overlay(String),
}

impl WriteTarget {
    /// Language to pass to the gateway when persisting this tree
    pub fn language(&self) -> Option<&str> {
        match self {
            WriteTarget::Default => None,
            WriteTarget::Overlay(language) => Some(language),
        }
    }
}

pub fn write_target(page: &Page, language: Option<&str>) -> WriteTarget {
    match language {
        Some(language) if page.translations.contains_key(language) => {
            WriteTarget::Overlay(language.to_string())
        }
        _ => WriteTarget::Default,
    }
}

/// Resolve the tree that is authoritative for `language` on `page`
pub fn resolve<'a>(page: &'a Page, language: Option<&str>) -> (&'a [ComponentNode], WriteTarget) {
    let target = write_target(page, language);
    let tree = match target.language().and_then(|l| page.translations.get(l)) {
        Some(translation) => &translation.components,
        None => &page.components,
    };
    (tree, target)
}

/// Mutable access to the tree a write target names
pub fn tree_mut<'a>(page: &'a mut Page, target: &WriteTarget) -> &'a mut ComponentTree {
    match target {
        WriteTarget::Default => &mut page.components,
        WriteTarget::Overlay(language) => match page.translations.get_mut(language) {
            Some(translation) => &mut translation.components,
            None => &mut page.components,
        },
    }
}
