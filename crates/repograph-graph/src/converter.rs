//! Flat node/link listing for consumers that do their own layout.

use repograph_core::{HierarchyNode, NodeType, RepositoryData};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// 0 for root-level entries
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    pub nodes: Vec<FlatNode>,
    pub links: Vec<FlatLink>,
}

/// Pre-order flat nodes with depth, plus one link per dependency pair.
pub fn to_visualization_data(data: &RepositoryData) -> VisualizationData {
    let mut nodes = Vec::new();
    let mut stack: Vec<(&HierarchyNode, usize)> =
        data.structure.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, level)) = stack.pop() {
        nodes.push(FlatNode {
            id: node.path.clone(),
            name: node.name.clone(),
            node_type: node.node_type,
            level,
        });
        stack.extend(node.children.iter().rev().map(|child| (child, level + 1)));
    }

    let links = data
        .dependencies
        .iter()
        .flat_map(|(source, targets)| {
            targets.iter().map(move |target| FlatLink {
                source: source.clone(),
                target: target.clone(),
            })
        })
        .collect();

    VisualizationData { nodes, links }
}
