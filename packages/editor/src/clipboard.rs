use crate::id_generator::IdGenerator;
use crate::model::ComponentNode;
use crate::tree;

/// Single-slot component clipboard
///
/// The slot keeps the copied node verbatim, ids included. Fresh ids are
/// only minted when the contents are pasted.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Option<ComponentNode>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a deep copy of `node`
    pub fn copy(&mut self, node: &ComponentNode) {
        self.slot = Some(node.clone());
    }

    pub fn contents(&self) -> Option<&ComponentNode> {
        self.slot.as_ref()
    }

    pub fn has_content(&self) -> bool {
        self.slot.is_some()
    }

    /// Produce an insertable copy of the slot with every id regenerated.
    ///
    /// The slot itself is left untouched so the same contents can be pasted
    /// any number of times.
    pub fn paste_copy(&self, ids: &mut IdGenerator, label_suffix: &str) -> Option<ComponentNode> {
        let mut node = self.slot.clone()?;
        tree::regenerate_ids(&mut node, ids);
        node.label.push_str(label_suffix);
        Some(node)
    }
}
