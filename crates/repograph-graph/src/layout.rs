//! Geometry planner.
//!
//! Structure mode fans every node's children out symmetrically underneath it.
//! Dependency mode distributes extension categories around a hub. Both passes
//! are closed-form: no relaxation, no randomness, so the same input always
//! yields the same positions.

use crate::graph::{GraphNodeKind, NodeSize, PlacedNode, Vec2};
use repograph_core::{FileCategory, HierarchyNode, RepositoryData, ViewMode, extension_of};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const ROOT_ID: &str = "root";
pub const HUB_ID: &str = "main";

/// Tunable layout constants. Defaults reproduce the stock look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub root_anchor: Vec2,
    pub level_spacing: f32,
    /// Lower bound of the depth-0 sibling spacing
    pub min_base_spacing: f32,
    /// Numerator of the density term: base = density / sqrt(count / 2)
    pub density_spacing: f32,
    pub depth_decrement: f32,
    /// Sibling spacing never shrinks below this
    pub min_sibling_spacing: f32,
    pub char_width_factor: f32,
    pub root_font_size: f32,
    pub root_padding: f32,
    pub node_font_size: f32,
    pub node_padding: f32,
    pub hub_center: Vec2,
    pub min_radius: f32,
    pub radius_base: f32,
    pub radius_per_category: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_anchor: Vec2::new(250.0, 0.0),
            level_spacing: 100.0,
            min_base_spacing: 150.0,
            density_spacing: 800.0,
            depth_decrement: 10.0,
            min_sibling_spacing: 40.0,
            char_width_factor: 0.6,
            root_font_size: 16.0,
            root_padding: 24.0,
            node_font_size: 12.0,
            node_padding: 16.0,
            hub_center: Vec2::new(250.0, 250.0),
            min_radius: 250.0,
            radius_base: 100.0,
            radius_per_category: 10.0,
        }
    }
}

impl LayoutConfig {
    /// Monospace width approximation of a label.
    pub fn text_width(&self, label: &str, font_size: f32, padding: f32) -> f32 {
        let chars = label.chars().count() as f32;
        (chars * font_size * self.char_width_factor + 2.0 * padding).ceil()
    }

    pub fn root_width(&self, label: &str) -> f32 {
        self.text_width(label, self.root_font_size, self.root_padding)
    }

    pub fn node_width(&self, label: &str) -> f32 {
        self.text_width(label, self.node_font_size, self.node_padding)
    }

    /// Depth-0 sibling spacing for a tree of `node_count` nodes. Denser trees pack tighter.
    pub fn base_spacing(&self, node_count: usize) -> f32 {
        let density = (node_count as f32 / 2.0).sqrt().max(1.0);
        (self.density_spacing / density).max(self.min_base_spacing)
    }

    /// Sibling spacing among children at `level` (0 for the root's children).
    pub fn spacing_at(&self, base: f32, level: u32) -> f32 {
        (base - level as f32 * self.depth_decrement).max(self.min_sibling_spacing)
    }

    /// Circle radius for `category_count` categories, non-decreasing in the count.
    pub fn dependency_radius(&self, category_count: usize) -> f32 {
        (self.radius_base + self.radius_per_category * category_count as f32).max(self.min_radius)
    }

    /// Angle in degrees of the `index`th of `count` categories.
    pub fn category_angle(index: usize, count: usize) -> f32 {
        if count == 0 {
            0.0
        } else {
            index as f32 / count as f32 * 360.0
        }
    }
}

/// First id among `base`, `base~1`, `base~2`, ... that `taken` rejects.
pub fn reserved_id(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let mut n = 1usize;
    loop {
        let candidate = format!("{}~{}", base, n);
        if !taken(&candidate) {
            tracing::debug!(
                "Synthetic id {:?} collides with input, using {:?}",
                base,
                candidate
            );
            return candidate;
        }
        n += 1;
    }
}

/// Lowercase, dot-stripped, de-duplicated extension list (first occurrence wins).
pub fn unique_categories(categories: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(categories.len());
    for raw in categories {
        let ext = raw.trim().trim_start_matches('.').to_lowercase();
        if ext.is_empty() {
            continue;
        }
        if seen.insert(ext.clone()) {
            result.push(ext);
        }
    }
    result
}

/// Lowercased extension of the last segment of `path`.
fn selected_extension(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    extension_of(name).map(str::to_lowercase)
}

struct Frame<'a> {
    node: &'a HierarchyNode,
    parent_id: &'a str,
    parent_x: f32,
    depth: u32,
    index: usize,
    count: usize,
}

/// Push frames for the not-yet-seen entries of `siblings`, last first so they
/// pop in input order.
fn schedule<'a>(
    stack: &mut Vec<Frame<'a>>,
    seen: &mut HashSet<&'a str>,
    siblings: &'a [HierarchyNode],
    parent_id: &'a str,
    parent_x: f32,
    depth: u32,
) {
    let unique: Vec<&HierarchyNode> = siblings
        .iter()
        .filter(|node| {
            let fresh = seen.insert(node.path.as_str());
            if !fresh {
                tracing::warn!("Path {:?} appears twice in hierarchy, skipping", node.path);
            }
            fresh
        })
        .collect();

    let count = unique.len();
    stack.extend(
        unique
            .into_iter()
            .enumerate()
            .rev()
            .map(|(index, node)| Frame {
                node,
                parent_id,
                parent_x,
                depth,
                index,
                count,
            }),
    );
}

pub struct Layouter {
    config: LayoutConfig,
}

impl Default for Layouter {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl Layouter {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out the repository in the given mode.
    pub fn layout(
        &self,
        mode: ViewMode,
        data: &RepositoryData,
        selection: Option<&str>,
    ) -> Vec<PlacedNode> {
        let label = data.display_name();
        match mode {
            ViewMode::Structure => self.layout_tree(&data.structure, &label, selection),
            ViewMode::Dependencies => self.layout_dependencies(&label, &data.file_types, selection),
        }
    }

    /// Structure mode: synthetic root plus one node per hierarchy entry, in pre-order.
    pub fn layout_tree(
        &self,
        roots: &[HierarchyNode],
        root_label: &str,
        selection: Option<&str>,
    ) -> Vec<PlacedNode> {
        let mut paths: HashSet<&str> = HashSet::new();
        let mut pending: Vec<&HierarchyNode> = roots.iter().collect();
        while let Some(node) = pending.pop() {
            paths.insert(node.path.as_str());
            pending.extend(node.children.iter());
        }

        let root_id = reserved_id(ROOT_ID, |id| paths.contains(id));
        let base = self.config.base_spacing(paths.len());
        let anchor = self.config.root_anchor;

        let mut placed = Vec::with_capacity(paths.len() + 1);
        placed.push(PlacedNode {
            id: root_id.clone(),
            parent_id: None,
            label: root_label.to_string(),
            kind: GraphNodeKind::Root,
            category: None,
            depth: 0,
            position: anchor,
            size: NodeSize {
                width: self.config.root_width(root_label),
                height: None,
            },
            selected: false,
        });

        // Paths are claimed when a node is scheduled, so siblings are indexed
        // over the entries that will actually be placed.
        let mut seen: HashSet<&str> = HashSet::with_capacity(paths.len());
        let mut stack: Vec<Frame<'_>> = Vec::new();
        schedule(&mut stack, &mut seen, roots, root_id.as_str(), anchor.x, 1);

        while let Some(frame) = stack.pop() {
            let node = frame.node;
            let spacing = self.config.spacing_at(base, frame.depth - 1);
            let offset = frame.index as f32 - (frame.count as f32 - 1.0) / 2.0;
            let x = frame.parent_x + offset * spacing;
            let y = anchor.y + frame.depth as f32 * self.config.level_spacing;

            let kind = if node.is_directory() {
                GraphNodeKind::Directory
            } else {
                GraphNodeKind::File
            };

            placed.push(PlacedNode {
                id: node.path.clone(),
                parent_id: Some(frame.parent_id.to_string()),
                label: node.name.clone(),
                kind,
                category: node.category(),
                depth: frame.depth,
                position: Vec2::new(x, y),
                size: NodeSize {
                    width: self.config.node_width(&node.name),
                    height: None,
                },
                selected: selection == Some(node.path.as_str()),
            });

            schedule(
                &mut stack,
                &mut seen,
                &node.children,
                node.path.as_str(),
                x,
                frame.depth + 1,
            );
        }

        tracing::debug!(
            "Structure layout: {} nodes, base spacing {:.1}",
            placed.len(),
            base
        );
        placed
    }

    /// Dependency mode: hub at the circle center, one node per distinct category.
    pub fn layout_dependencies(
        &self,
        hub_label: &str,
        categories: &[String],
        selection: Option<&str>,
    ) -> Vec<PlacedNode> {
        let categories = unique_categories(categories);
        let hub_id = reserved_id(HUB_ID, |id| categories.iter().any(|ext| ext == id));
        let center = self.config.hub_center;
        let radius = self.config.dependency_radius(categories.len());
        let selected_ext = selection.and_then(selected_extension);

        let hub_width = self.config.root_width(hub_label);
        let mut placed = Vec::with_capacity(categories.len() + 1);
        placed.push(PlacedNode {
            id: hub_id.clone(),
            parent_id: None,
            label: hub_label.to_string(),
            kind: GraphNodeKind::Hub,
            category: None,
            depth: 0,
            position: center,
            size: NodeSize {
                width: hub_width,
                height: Some(hub_width),
            },
            selected: false,
        });

        let count = categories.len();
        for (index, ext) in categories.into_iter().enumerate() {
            let angle = LayoutConfig::category_angle(index, count).to_radians();
            let label = format!(".{}", ext);
            let width = self.config.node_width(&label);
            let selected = selected_ext.as_deref() == Some(ext.as_str());
            placed.push(PlacedNode {
                category: Some(FileCategory::from_extension(&ext)),
                id: ext,
                parent_id: Some(hub_id.clone()),
                label,
                kind: GraphNodeKind::DependencyCategory,
                depth: 1,
                position: Vec2::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ),
                size: NodeSize {
                    width,
                    height: None,
                },
                selected,
            });
        }

        tracing::debug!(
            "Dependency layout: {} categories, radius {:.1}",
            count,
            radius
        );
        placed
    }
}
