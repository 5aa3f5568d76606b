//! # Component Tree Utilities
//!
//! Free functions over `[ComponentNode]` that search and restructure nested
//! sibling lists. Ids are compared by value; a missing id is never an error
//! here, callers decide what "not found" means.

use crate::id_generator::IdGenerator;
use crate::model::ComponentNode;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Direction for swapping a node with its neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    AtBoundary,
    NotFound,
}

pub fn find<'a>(tree: &'a [ComponentNode], id: &str) -> Option<&'a ComponentNode> {
    for node in tree {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(node.children(), id) {
            return Some(found);
        }
    }
    None
}

pub fn find_mut<'a>(tree: &'a mut [ComponentNode], id: &str) -> Option<&'a mut ComponentNode> {
    for node in tree.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn contains(tree: &[ComponentNode], id: &str) -> bool {
    find(tree, id).is_some()
}

/// Find the sibling list holding `id` and the node's position within it
pub fn locate_mut<'a>(
    list: &'a mut Vec<ComponentNode>,
    id: &str,
) -> Option<(&'a mut Vec<ComponentNode>, usize)> {
    if let Some(pos) = list.iter().position(|n| n.id == id) {
        return Some((list, pos));
    }

    for node in list.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = locate_mut(children, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Remove a node (and its subtree) wherever it occurs
pub fn remove(tree: &mut Vec<ComponentNode>, id: &str) -> Option<ComponentNode> {
    let (list, pos) = locate_mut(tree, id)?;
    Some(list.remove(pos))
}

/// Insert `node` right after `anchor_id` in the anchor's sibling list.
///
/// Returns the node back when the anchor is not in the tree.
pub fn insert_after(
    tree: &mut Vec<ComponentNode>,
    anchor_id: &str,
    node: ComponentNode,
) -> Result<(), ComponentNode> {
    match locate_mut(tree, anchor_id) {
        Some((list, pos)) => {
            list.insert(pos + 1, node);
            Ok(())
        }
        None => Err(node),
    }
}

/// Swap a node with its previous/next sibling
pub fn move_sibling(tree: &mut Vec<ComponentNode>, id: &str, direction: MoveDirection) -> MoveOutcome {
    let Some((list, pos)) = locate_mut(tree, id) else {
        return MoveOutcome::NotFound;
    };

    let target = match direction {
        MoveDirection::Up if pos > 0 => pos - 1,
        MoveDirection::Down if pos + 1 < list.len() => pos + 1,
        _ => return MoveOutcome::AtBoundary,
    };

    list.swap(pos, target);
    MoveOutcome::Moved
}

/// Move `active_id` to the position currently held by `over_id`.
///
/// Within one sibling list this is an array move (remove then insert at the
/// old index of `over_id`), not a swap. Across lists the node lands in front
/// of `over_id`. Returns false when nothing changed.
pub fn reorder(tree: &mut Vec<ComponentNode>, active_id: &str, over_id: &str) -> bool {
    if active_id == over_id || !contains(tree, active_id) || !contains(tree, over_id) {
        return false;
    }

    // Dropping a container onto its own descendant would detach the subtree
    if let Some(active) = find(tree, active_id) {
        if contains(active.children(), over_id) {
            return false;
        }
    }

    let same_list = match locate_mut(tree, active_id) {
        Some((list, _)) => list.iter().any(|n| n.id == over_id),
        None => false,
    };

    if same_list {
        if let Some((list, from)) = locate_mut(tree, active_id) {
            if let Some(to) = list.iter().position(|n| n.id == over_id) {
                let node = list.remove(from);
                list.insert(to, node);
                return true;
            }
        }
        return false;
    }

    let Some(node) = remove(tree, active_id) else {
        return false;
    };
    match locate_mut(tree, over_id) {
        Some((list, to)) => {
            list.insert(to, node);
            true
        }
        None => false,
    }
}

/// Depth-first list of every id in the tree
pub fn collect_ids(tree: &[ComponentNode]) -> Vec<String> {
    let mut ids = Vec::new();
    collect_into(tree, &mut ids);
    ids
}

fn collect_into(tree: &[ComponentNode], ids: &mut Vec<String>) {
    for node in tree {
        ids.push(node.id.clone());
        collect_into(node.children(), ids);
    }
}

pub fn has_unique_ids(tree: &[ComponentNode]) -> bool {
    let mut seen = HashSet::new();
    collect_ids(tree).into_iter().all(|id| seen.insert(id))
}

/// Give the node and every descendant a fresh id
pub fn regenerate_ids(node: &mut ComponentNode, ids: &mut IdGenerator) {
    node.id = ids.new_id();
    if let Some(children) = node.children.as_mut() {
        for child in children {
            regenerate_ids(child, ids);
        }
    }
}

/// Rewrite ids through `mapping`, minting fresh ids for ones not seen yet.
///
/// Sharing one mapping across a page's default tree and its overlays keeps
/// corresponding nodes aligned after a copy.
pub fn remap_ids(
    tree: &mut [ComponentNode],
    mapping: &mut HashMap<String, String>,
    ids: &mut IdGenerator,
) {
    for node in tree.iter_mut() {
        let fresh = mapping
            .entry(node.id.clone())
            .or_insert_with(|| ids.new_id())
            .clone();
        node.id = fresh;
        if let Some(children) = node.children.as_mut() {
            remap_ids(children, mapping, ids);
        }
    }
}
