pub mod controller;
pub mod converter;
pub mod edges;
pub mod graph;
pub mod layout;
pub mod normalizer;
pub mod repository;
pub mod stats;
pub mod style;
pub mod usage;

pub use controller::{ControllerState, GraphViewController, NodeActivatedCallback, ViewState};
pub use converter::{FlatLink, FlatNode, VisualizationData, to_visualization_data};
pub use edges::{edge_id, synthesize_edges};
pub use graph::{
    ArrowMarker, GraphEdge, GraphNode, GraphNodeKind, GraphSnapshot, MarkerKind, NodeSize,
    PlacedNode, Vec2,
};
pub use layout::{HUB_ID, LayoutConfig, Layouter, ROOT_ID};
pub use normalizer::{count_nodes, find_node, normalize};
pub use repository::build_repository;
pub use stats::{TreeStats, analyze_dependencies, count_entries, extract_file_types, format_file_size};
pub use style::{
    Color, EdgeStyle, NodeShape, NodeStyle, StyleResolver, category_color, resolve_edge_style,
    resolve_node_style,
};
pub use usage::UsageResolver;
