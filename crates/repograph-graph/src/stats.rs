//! Repository statistics derived from a normalized tree.

use repograph_core::HierarchyNode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub file_count: usize,
    pub dir_count: usize,
    pub total_size: u64,
}

fn pre_order(roots: &[HierarchyNode]) -> impl Iterator<Item = &HierarchyNode> {
    let mut stack: Vec<&HierarchyNode> = roots.iter().rev().collect();
    std::iter::from_fn(move || {
        let node = stack.pop()?;
        stack.extend(node.children.iter().rev());
        Some(node)
    })
}

/// Unique lowercase file extensions in first-seen pre-order.
pub fn extract_file_types(roots: &[HierarchyNode]) -> Vec<String> {
    let mut seen = HashSet::new();
    pre_order(roots)
        .filter_map(|node| node.extension())
        .map(str::to_lowercase)
        .filter(|ext| seen.insert(ext.clone()))
        .collect()
}

pub fn count_entries(roots: &[HierarchyNode]) -> TreeStats {
    pre_order(roots).fold(TreeStats::default(), |mut stats, node| {
        if node.is_directory() {
            stats.dir_count += 1;
        } else {
            stats.file_count += 1;
            stats.total_size += node.size;
        }
        stats
    })
}

/// Placeholder import analysis: every script file maps to an empty list.
pub fn analyze_dependencies(roots: &[HierarchyNode]) -> BTreeMap<String, Vec<String>> {
    pre_order(roots)
        .filter(|node| node.category().is_some_and(|category| category.is_script()))
        .map(|node| (node.path.clone(), Vec::new()))
        .collect()
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size, base 1024. `1536` formats as `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exponent = 0usize;
    let mut scaled = bytes;
    while scaled >= 1024 && exponent < SIZE_UNITS.len() - 1 {
        scaled /= 1024;
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let mut text = format!("{:.2}", value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    format!("{} {}", text, SIZE_UNITS[exponent])
}
