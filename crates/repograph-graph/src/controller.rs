//! Graph view controller.
//!
//! Owns the view state and runs the layout, style and edge pipeline on every
//! change. A recompute builds a complete snapshot and swaps the shared `Arc`,
//! so a reader holding the previous snapshot never sees a half-built graph.

use crate::edges::synthesize_edges;
use crate::graph::{GraphNode, GraphSnapshot};
use crate::layout::{LayoutConfig, Layouter};
use crate::normalizer::{count_nodes, find_node};
use crate::stats::{count_entries, extract_file_types};
use crate::style::StyleResolver;
use repograph_core::{HierarchyNode, RepoIdentity, RepositoryData, Theme, ViewMode};
use repograph_events::{Event, EventBus, SelectionOrigin};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type NodeActivatedCallback = Box<dyn FnMut(&HierarchyNode)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Ready,
    /// Set by the external loader; the engine itself never fails
    Error(String),
}

/// Everything the user can change about the view, in one serializable place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub mode: ViewMode,
    pub selection: Option<String>,
    pub theme: Theme,
    pub repository: Option<RepoIdentity>,
}

pub struct GraphViewController {
    state: ControllerState,
    view: ViewState,
    data: Option<RepositoryData>,
    layouter: Layouter,
    snapshot: Arc<GraphSnapshot>,
    revision: u64,
    on_node_activated: Option<NodeActivatedCallback>,
    event_bus: Option<EventBus>,
}

impl Default for GraphViewController {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl GraphViewController {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            state: ControllerState::Uninitialized,
            view: ViewState::default(),
            data: None,
            layouter: Layouter::new(config),
            snapshot: Arc::new(GraphSnapshot::default()),
            revision: 0,
            on_node_activated: None,
            event_bus: None,
        }
    }

    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn set_on_node_activated(&mut self, callback: impl FnMut(&HierarchyNode) + 'static) {
        self.on_node_activated = Some(Box::new(callback));
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn data(&self) -> Option<&RepositoryData> {
        self.data.as_ref()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<GraphSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn selected_node(&self) -> Option<&HierarchyNode> {
        let data = self.data.as_ref()?;
        find_node(&data.structure, self.view.selection.as_deref()?)
    }

    /// Take in repository data. A different repository resets mode and
    /// selection; reloading the same one keeps both if the selection still resolves.
    pub fn load(&mut self, data: RepositoryData) {
        let identity = data.identity();
        if self.view.repository.as_ref() != Some(&identity) {
            self.view.mode = ViewMode::default();
            self.view.selection = None;
        } else if let Some(path) = self.view.selection.as_deref()
            && find_node(&data.structure, path).is_none()
        {
            tracing::debug!("Selection {:?} not in reloaded tree, clearing", path);
            self.view.selection = None;
        }

        let entry_count = count_nodes(&data.structure);
        tracing::info!("Loaded {} ({} entries)", identity, entry_count);

        self.view.repository = Some(identity.clone());
        self.data = Some(data);
        self.state = ControllerState::Ready;
        self.emit(Event::RepositoryLoaded {
            identity,
            entry_count,
        });
        self.recompute();
    }

    /// Swap the hierarchy of the loaded repository. File types and counts are
    /// re-derived from the new tree.
    pub fn replace_tree(&mut self, structure: Vec<HierarchyNode>) {
        let Some(data) = self.data.as_mut() else {
            tracing::warn!("replace_tree called before any repository was loaded");
            return;
        };

        let stats = count_entries(&structure);
        data.file_types = extract_file_types(&structure);
        data.file_count = Some(stats.file_count);
        data.dir_count = Some(stats.dir_count);
        data.structure = structure;

        if let Some(path) = self.view.selection.as_deref()
            && find_node(&data.structure, path).is_none()
        {
            tracing::debug!("Selection {:?} no longer present, clearing", path);
            self.view.selection = None;
        }

        let entry_count = count_nodes(&data.structure);
        self.state = ControllerState::Ready;
        self.emit(Event::TreeReplaced { entry_count });
        self.recompute();
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.view.mode == mode {
            return;
        }
        self.view.mode = mode;
        self.emit(Event::ModeChanged { mode });
        self.recompute();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.view.theme == theme {
            return;
        }
        self.view.theme = theme;
        self.emit(Event::ThemeChanged { theme });
        self.recompute();
    }

    pub fn set_layout_config(&mut self, config: LayoutConfig) {
        self.layouter = Layouter::new(config);
        self.recompute();
    }

    /// Programmatic selection. A path absent from the tree counts as no selection.
    pub fn select(&mut self, path: Option<String>) {
        let resolved = match (path, self.data.as_ref()) {
            (Some(path), Some(data)) if find_node(&data.structure, &path).is_some() => Some(path),
            (Some(path), _) => {
                tracing::debug!("Selection {:?} does not resolve, treating as none", path);
                None
            }
            (None, _) => None,
        };

        if self.view.selection == resolved {
            return;
        }
        self.view.selection = resolved.clone();
        self.emit(Event::SelectionChanged {
            path: resolved,
            origin: SelectionOrigin::External,
        });
        self.recompute();
    }

    /// Handle a click on a published node. Returns `true` when the id resolved
    /// to a hierarchy entry; synthetic and unknown ids are a no-op.
    pub fn activate_node(&mut self, id: &str) -> bool {
        if self.state != ControllerState::Ready {
            return false;
        }
        if self
            .snapshot
            .node(id)
            .is_some_and(|node| node.kind.is_synthetic())
        {
            tracing::trace!("Ignoring activation of synthetic node {:?}", id);
            return false;
        }

        let Some(node) = self
            .data
            .as_ref()
            .and_then(|data| find_node(&data.structure, id))
            .cloned()
        else {
            return false;
        };

        tracing::info!("Activating node {:?}", node.path);
        let changed = self.view.selection.as_deref() != Some(node.path.as_str());
        if changed {
            self.view.selection = Some(node.path.clone());
            self.recompute();
        }

        if let Some(mut callback) = self.on_node_activated.take() {
            callback(&node);
            self.on_node_activated = Some(callback);
        }

        self.emit(Event::NodeActivated {
            path: node.path.clone(),
        });
        if changed {
            self.emit(Event::SelectionChanged {
                path: Some(node.path),
                origin: SelectionOrigin::Graph,
            });
        }
        true
    }

    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::error!("Repository load failed: {}", reason);
        self.state = ControllerState::Error(reason.clone());
        self.emit(Event::LoadFailed { reason });
    }

    /// Drop data, view state and callback, publishing an empty snapshot.
    pub fn teardown(&mut self) {
        self.state = ControllerState::Uninitialized;
        self.view = ViewState {
            theme: self.view.theme,
            ..ViewState::default()
        };
        self.data = None;
        self.on_node_activated = None;
        self.revision += 1;
        self.snapshot = Arc::new(GraphSnapshot {
            revision: self.revision,
            theme: self.view.theme,
            ..GraphSnapshot::default()
        });
        self.emit(Event::ViewTornDown);
    }

    fn recompute(&mut self) {
        let Some(data) = self.data.as_ref() else {
            return;
        };

        let mode = self.view.mode;
        let theme = self.view.theme;
        let styles = StyleResolver::new(theme);

        let nodes: Vec<GraphNode> = self
            .layouter
            .layout(mode, data, self.view.selection.as_deref())
            .into_iter()
            .map(|placed| {
                let style = styles.node_style(placed.kind, placed.category, placed.selected);
                placed.into_graph_node(style)
            })
            .collect();
        let edges = synthesize_edges(&nodes, mode, theme);

        self.revision += 1;
        let node_count = nodes.len();
        let edge_count = edges.len();
        self.snapshot = Arc::new(GraphSnapshot {
            revision: self.revision,
            mode,
            theme,
            nodes,
            edges,
        });

        tracing::debug!(
            "Published revision {} ({:?}): {} nodes, {} edges",
            self.revision,
            mode,
            node_count,
            edge_count
        );
        self.emit(Event::GraphPublished {
            revision: self.revision,
            mode,
            node_count,
            edge_count,
        });
    }

    fn emit(&self, event: Event) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}
