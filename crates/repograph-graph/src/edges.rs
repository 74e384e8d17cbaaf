//! Edge synthesis.
//!
//! Edges are derived from the `parent_id` links the planner recorded, and are
//! only emitted when both endpoints exist in the node set being published.

use crate::graph::{ArrowMarker, GraphEdge, GraphNode, MarkerKind};
use crate::style::resolve_edge_style;
use repograph_core::{Theme, ViewMode};
use std::collections::HashSet;

pub fn edge_id(source: &str, target: &str) -> String {
    format!("e-{}-{}", source, target)
}

fn marker(mode: ViewMode) -> ArrowMarker {
    match mode {
        ViewMode::Structure => ArrowMarker {
            kind: MarkerKind::ArrowClosed,
            width: Some(15.0),
            height: Some(15.0),
        },
        ViewMode::Dependencies => ArrowMarker {
            kind: MarkerKind::ArrowClosed,
            width: None,
            height: None,
        },
    }
}

/// One edge per node with a parent: parent to child in structure mode, hub to
/// category in dependency mode. Edge style mirrors the target's selection.
pub fn synthesize_edges(nodes: &[GraphNode], mode: ViewMode, theme: Theme) -> Vec<GraphEdge> {
    let ids: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let arrowhead = marker(mode);

    nodes
        .iter()
        .filter_map(|node| {
            let source = node.parent_id.as_deref()?;
            if !ids.contains(source) {
                tracing::warn!(
                    "Parent {:?} of node {:?} not in node set, no edge",
                    source,
                    node.id
                );
                return None;
            }
            Some(GraphEdge {
                id: edge_id(source, &node.id),
                source: source.to_string(),
                target: node.id.clone(),
                style: resolve_edge_style(mode, node.kind, node.category, node.selected, theme),
                arrowhead,
            })
        })
        .collect()
}
