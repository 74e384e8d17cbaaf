use repograph_core::{FileCategory, NodeType, PathEntry, ViewMode};
use repograph_graph::{
    GraphNodeKind, GraphViewController, Layouter, UsageResolver, build_repository, find_node,
    normalize, synthesize_edges,
};
use std::collections::BTreeMap;

fn scenario_a_entries() -> Vec<PathEntry> {
    vec![
        PathEntry::directory("src"),
        PathEntry::file("src/a.ts"),
        PathEntry::file("src/b.js"),
    ]
}

#[test]
fn nested_directory_with_typed_children() {
    let roots = normalize(&scenario_a_entries());
    assert_eq!(roots.len(), 1);

    let src = &roots[0];
    assert_eq!(src.path, "src");
    assert_eq!(src.node_type, NodeType::Directory);
    assert_eq!(src.children.len(), 2);
    assert_eq!(
        src.children[0].node_type,
        NodeType::File(FileCategory::Typescript)
    );
    assert_eq!(
        src.children[1].node_type,
        NodeType::File(FileCategory::Javascript)
    );

    let nodes = Layouter::default().layout_tree(&roots, "acme/app", None);
    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[0].kind, GraphNodeKind::Root);

    let src_node = nodes.iter().find(|n| n.id == "src").unwrap();
    assert_eq!(src_node.depth, 1);
    let children: Vec<_> = nodes.iter().filter(|n| n.depth == 2).collect();
    assert_eq!(children.len(), 2);
    let left = src_node.position.x - children[0].position.x;
    let right = children[1].position.x - src_node.position.x;
    assert!(left > 0.0);
    assert!((left - right).abs() < 1e-3);
}

#[test]
fn dependency_hub_with_three_categories() {
    let categories = vec!["ts".to_string(), "js".to_string(), "md".to_string()];
    let nodes = Layouter::default().layout_dependencies("acme/app", &categories, None);
    assert_eq!(nodes.len(), 4);

    let hub = &nodes[0];
    assert_eq!(hub.kind, GraphNodeKind::Hub);

    let expected_angles = [0.0f32, 120.0, 240.0];
    for (node, expected) in nodes[1..].iter().zip(expected_angles) {
        assert_eq!(node.kind, GraphNodeKind::DependencyCategory);
        let dx = node.position.x - hub.position.x;
        let dy = node.position.y - hub.position.y;
        assert!(((dx * dx + dy * dy).sqrt() - 250.0).abs() < 1e-2);

        let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
        let diff = (angle - expected).abs();
        assert!(diff < 1e-2 || (360.0 - diff) < 1e-2, "angle {}", angle);
    }
}

#[test]
fn selection_emphasis_follows_selected_path() {
    let entries = vec![
        PathEntry::directory("src"),
        PathEntry::file("src/index.ts"),
        PathEntry::file("src/util.ts"),
        PathEntry::file("notes.txt"),
    ];
    let mut mapping = BTreeMap::new();
    mapping.insert(
        "src/util.ts".to_string(),
        vec!["src/index.ts".to_string()],
    );
    let data = build_repository("acme", "app", &entries, &UsageResolver::Provided(mapping));
    assert!(
        find_node(&data.structure, "src/util.ts")
            .and_then(|n| n.used_in.as_ref())
            .is_some()
    );

    let mut controller = GraphViewController::default();
    controller.load(data);

    controller.select(Some("src/util.ts".into()));
    let snapshot = controller.snapshot();
    assert!(snapshot.node("src/util.ts").unwrap().selected);
    assert_eq!(snapshot.edge_to("src/util.ts").unwrap().style.width, 2.0);

    controller.select(Some("notes.txt".into()));
    let snapshot = controller.snapshot();
    assert!(!snapshot.node("src/util.ts").unwrap().selected);
    assert_eq!(snapshot.edge_to("src/util.ts").unwrap().style.width, 1.0);
    assert!(snapshot.node("notes.txt").unwrap().selected);
}

#[test]
fn missing_intermediate_directory_promotes_to_root() {
    let entries = vec![PathEntry::directory("a"), PathEntry::file("a/b/c.txt")];
    let roots = normalize(&entries);

    assert_eq!(roots.len(), 2);
    let orphan = find_node(&roots, "a/b/c.txt").unwrap();
    assert_eq!(orphan.name, "c.txt");
    assert_eq!(orphan.node_type, NodeType::File(FileCategory::Text));
    assert!(roots.iter().any(|r| r.path == "a/b/c.txt"));

    let nodes = Layouter::default().layout_tree(&roots, "r", None);
    let placed = nodes.iter().find(|n| n.id == "a/b/c.txt").unwrap();
    assert_eq!(placed.depth, 1);
    assert_eq!(placed.parent_id.as_deref(), Some("root"));
}

#[test]
fn empty_listing_renders_root_only() {
    let data = build_repository("acme", "empty", &[], &UsageResolver::None);
    let mut controller = GraphViewController::default();
    controller.load(data);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.mode, ViewMode::Structure);
    assert_eq!(snapshot.nodes.len(), 1);
    assert_eq!(snapshot.nodes[0].kind, GraphNodeKind::Root);
    assert!(snapshot.edges.is_empty());

    controller.set_mode(ViewMode::Dependencies);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.nodes.len(), 1);
    assert_eq!(snapshot.nodes[0].kind, GraphNodeKind::Hub);
    assert!(synthesize_edges(&snapshot.nodes, ViewMode::Dependencies, snapshot.theme).is_empty());
}

#[test]
fn snapshot_round_trips_through_json() {
    let data = build_repository("acme", "app", &scenario_a_entries(), &UsageResolver::None);
    let mut controller = GraphViewController::default();
    controller.load(data);

    let snapshot = controller.snapshot();
    let json = serde_json::to_string(&*snapshot).unwrap();
    let parsed: repograph_graph::GraphSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, *snapshot);
}
