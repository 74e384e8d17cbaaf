//! Flat path listing to nested hierarchy.
//!
//! Two passes over the input (index by path, attach to parent) followed by an
//! explicit-stack assembly, so deep trees never recurse.

use repograph_core::{EntryKind, FileCategory, HierarchyNode, NodeType, PathEntry};
use std::collections::HashMap;

/// Build the rooted hierarchy from a flat listing.
///
/// Entries may arrive in any order. Sibling and root order follow the first
/// appearance of each path. A duplicate path replaces the earlier record
/// (last write wins) but keeps the earlier position. An entry whose parent
/// path is missing, or whose parent record is a file, becomes a root.
pub fn normalize(entries: &[PathEntry]) -> Vec<HierarchyNode> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
    let mut records: Vec<&PathEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match index.get(entry.path.as_str()) {
            Some(&slot) => {
                tracing::warn!(
                    "Duplicate path {:?} in listing, keeping the last record",
                    entry.path
                );
                records[slot] = entry;
            }
            None => {
                index.insert(entry.path.as_str(), records.len());
                records.push(entry);
            }
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    let mut promoted = 0usize;

    for (slot, entry) in records.iter().enumerate() {
        let Some(parent_path) = entry.parent_path() else {
            roots.push(slot);
            continue;
        };

        match index.get(parent_path) {
            Some(&parent_slot) if records[parent_slot].kind == EntryKind::Directory => {
                children[parent_slot].push(slot);
            }
            Some(_) => {
                tracing::debug!(
                    "Parent of {:?} is a file record, promoting to root level",
                    entry.path
                );
                promoted += 1;
                roots.push(slot);
            }
            None => {
                tracing::debug!(
                    "Parent {:?} of {:?} missing from listing, promoting to root level",
                    parent_path,
                    entry.path
                );
                promoted += 1;
                roots.push(slot);
            }
        }
    }

    // Pre-order visitation: reversing it yields every node after all of its
    // descendants, so children can be moved into their parent in one sweep.
    let mut order = Vec::with_capacity(records.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(slot) = stack.pop() {
        order.push(slot);
        stack.extend(children[slot].iter().rev().copied());
    }

    let mut built: Vec<Option<HierarchyNode>> = vec![None; records.len()];
    for &slot in order.iter().rev() {
        let mut node = make_node(records[slot]);
        node.children = children[slot]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[slot] = Some(node);
    }

    let result: Vec<HierarchyNode> = roots
        .iter()
        .filter_map(|&slot| built[slot].take())
        .collect();

    tracing::debug!(
        "Normalized {} entries ({} unique) into {} roots, {} promoted",
        entries.len(),
        records.len(),
        result.len(),
        promoted
    );

    result
}

fn make_node(entry: &PathEntry) -> HierarchyNode {
    let name = entry.name().to_string();
    let (node_type, size) = match entry.kind {
        EntryKind::Directory => (NodeType::Directory, 0),
        EntryKind::File => (
            NodeType::File(FileCategory::from_file_name(&name)),
            entry.size.unwrap_or(0),
        ),
    };

    HierarchyNode {
        name,
        path: entry.path.clone(),
        node_type,
        size,
        children: Vec::new(),
        used_in: None,
    }
}

/// Iterative depth-first search for the node with the given path.
pub fn find_node<'a>(roots: &'a [HierarchyNode], path: &str) -> Option<&'a HierarchyNode> {
    let mut stack: Vec<&HierarchyNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.path == path {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}

/// Total number of hierarchy nodes.
pub fn count_nodes(roots: &[HierarchyNode]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&HierarchyNode> = roots.iter().collect();
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children.iter());
    }
    count
}
