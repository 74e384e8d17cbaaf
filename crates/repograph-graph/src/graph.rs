use crate::style::{EdgeStyle, NodeStyle};
use repograph_core::{FileCategory, Theme, ViewMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphNodeKind {
    /// Synthetic repository node of the structure view
    Root,
    /// Synthetic repository node of the dependency view
    Hub,
    Directory,
    #[serde(rename = "file-category")]
    File,
    DependencyCategory,
}

impl GraphNodeKind {
    pub fn is_synthetic(&self) -> bool {
        matches!(
            self,
            GraphNodeKind::Root | GraphNodeKind::Hub | GraphNodeKind::DependencyCategory
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f32,
    /// Only the hub has a fixed height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// A positioned node before style resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: String,
    pub parent_id: Option<String>,
    pub label: String,
    pub kind: GraphNodeKind,
    pub category: Option<FileCategory>,
    pub depth: u32,
    pub position: Vec2,
    pub size: NodeSize,
    pub selected: bool,
}

impl PlacedNode {
    pub fn into_graph_node(self, style: NodeStyle) -> GraphNode {
        GraphNode {
            id: self.id,
            parent_id: self.parent_id,
            label: self.label,
            kind: self.kind,
            category: self.category,
            depth: self.depth,
            position: self.position,
            size: self.size,
            style,
            selected: self.selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Hierarchy path, extension, or a reserved synthetic id. Stable across passes.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub label: String,
    pub kind: GraphNodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FileCategory>,
    pub depth: u32,
    pub position: Vec2,
    pub size: NodeSize,
    pub style: NodeStyle,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    ArrowClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowMarker {
    pub kind: MarkerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub style: EdgeStyle,
    pub arrowhead: ArrowMarker,
}

/// One published (nodes, edges) set. Replaced wholesale on every recompute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub revision: u64,
    pub mode: ViewMode,
    pub theme: Theme,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphSnapshot {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge_to(&self, target: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|edge| edge.target == target)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
