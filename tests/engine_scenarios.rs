use eframe::egui::{Pos2, pos2, vec2};
use proptest::prelude::*;

use roadmap_graph::engine::layout::run_layout;
use roadmap_graph::engine::particles::{DEFAULT_BURST, PARTICLE_LIFE};
use roadmap_graph::engine::render::palette::EdgeStyle;
use roadmap_graph::engine::{
    DrawCommand, EdgeKind, EdgeSeed, GraphDataset, GraphSession, GraphStore, LayoutConfig,
    NodeCategory, NodeData, NodeSeed, NodeStatus, SurfaceConfig,
};
use roadmap_graph::project::{build_dataset, sample_project};

fn chain(design_status: NodeStatus) -> GraphDataset {
    let node = |id: &str, title: &str, status| NodeSeed {
        id: id.to_owned(),
        data: NodeData::new(title, NodeCategory::Planning).with_status(status),
        position: None,
    };
    let edge = |source: &str, target: &str| EdgeSeed {
        source_id: source.to_owned(),
        target_id: target.to_owned(),
        weight: 1.0,
        kind: EdgeKind::Dependency,
        animated: true,
    };

    GraphDataset {
        nodes: vec![
            node("discovery", "Discovery", NodeStatus::Completed),
            node("design", "Design", design_status),
            node("build", "Build", NodeStatus::Blocked),
        ],
        edges: vec![edge("discovery", "design"), edge("design", "build")],
    }
}

fn edge_line<'a>(
    commands: &'a [DrawCommand],
    from: Pos2,
    to: Pos2,
) -> Option<&'a DrawCommand> {
    commands.iter().find(|command| {
        matches!(command, DrawCommand::Line { from: f, to: t, .. } if *f == from && *t == to)
    })
}

fn session_for(dataset: GraphDataset) -> GraphSession {
    GraphSession::new(
        dataset,
        SurfaceConfig::default(),
        LayoutConfig::default(),
        3,
    )
}

#[test]
fn only_edges_out_of_completed_phases_flow() {
    let mut session = session_for(chain(NodeStatus::InProgress));
    let discovery = session.graph().node("discovery").unwrap().position;
    let design = session.graph().node("design").unwrap().position;
    let build = session.graph().node("build").unwrap().position;

    let commands = session.frame(0.016).to_vec();

    let Some(DrawCommand::Line { stroke, dash, .. }) = edge_line(&commands, discovery, design)
    else {
        panic!("discovery -> design edge was not drawn");
    };
    assert_eq!(*stroke, EdgeStyle::Flowing.stroke());
    assert!(dash.is_some());

    let Some(DrawCommand::Line { stroke, dash, .. }) = edge_line(&commands, design, build) else {
        panic!("design -> build edge was not drawn");
    };
    assert_eq!(*stroke, EdgeStyle::Inactive.stroke());
    assert!(dash.is_none());
}

#[test]
fn completing_a_phase_starts_its_outgoing_flow() {
    let mut session = session_for(chain(NodeStatus::InProgress));
    session.rebuild(chain(NodeStatus::Completed));

    let design = session.graph().node("design").unwrap().position;
    let build = session.graph().node("build").unwrap().position;
    let commands = session.frame(0.016).to_vec();

    let Some(DrawCommand::Line { stroke, dash, .. }) = edge_line(&commands, design, build) else {
        panic!("design -> build edge was not drawn");
    };
    assert_eq!(*stroke, EdgeStyle::Flowing.stroke());
    assert!(dash.is_some());
}

#[test]
fn dragged_node_ignores_layout_until_released() {
    let mut session = session_for(chain(NodeStatus::InProgress));
    let start = session.graph().node("build").unwrap().position;

    assert_eq!(session.pointer_down(start).as_deref(), Some("build"));
    let target = pos2(480.0, 330.0);
    session.pointer_move(target);
    session.relayout();

    let node = session.graph().node("build").unwrap();
    assert_eq!(node.position, target);
    assert!(node.is_pinned());

    session.pointer_up();
    let node = session.graph().node("build").unwrap();
    assert!(!node.is_pinned());
    assert_eq!(node.position, target);
    assert_eq!(
        session.selection().map(|node| node.id.as_str()),
        Some("build")
    );

    session.relayout();
    assert_ne!(session.graph().node("build").unwrap().position, target);
}

#[test]
fn clicking_a_node_off_centre_does_not_move_it() {
    let mut session = session_for(chain(NodeStatus::InProgress));
    let start = session.graph().node("design").unwrap().position;
    let grip = start + vec2(12.0, -8.0);

    assert_eq!(session.pointer_down(grip).as_deref(), Some("design"));
    session.pointer_move(grip);
    session.pointer_up();
    session.click(grip);

    let resting = session.graph().node("design").unwrap().position;
    assert!((resting - start).length() < 1e-3);

    session.pointer_down(grip);
    session.pointer_move(pos2(500.0, 350.0) + vec2(12.0, -8.0));
    session.pointer_up();
    let dropped = session.graph().node("design").unwrap().position;
    assert!((dropped - pos2(500.0, 350.0)).length() < 1e-3);
}

#[test]
fn completed_click_bursts_then_clears() {
    let mut session = session_for(chain(NodeStatus::InProgress));
    let discovery = session.graph().node("discovery").unwrap().position;

    session.click(discovery);
    assert_eq!(session.particles().particles().len(), DEFAULT_BURST);

    for _ in 0..PARTICLE_LIFE {
        session.frame(0.016);
    }
    assert!(session.particles().is_empty());
}

#[test]
fn sample_project_has_a_full_critical_path() {
    let surface = SurfaceConfig::default();
    let dataset = build_dataset(&sample_project(), surface.size());
    let session = GraphSession::new(dataset, surface, LayoutConfig::default(), 11);

    let stats = session.stats();
    assert_eq!(stats.node_count, 9);
    assert_eq!(stats.critical_path.first().map(String::as_str), Some("discovery"));
    assert_eq!(stats.critical_path.last().map(String::as_str), Some("deployment"));
    assert!(stats.critical_path.iter().any(|id| id == "backend-api"));

    let path = session.shortest_path("discovery", "deployment");
    assert_eq!(path.first().map(String::as_str), Some("discovery"));
    assert_eq!(path.last().map(String::as_str), Some("deployment"));
}

#[test]
fn layout_is_deterministic_for_a_seed() {
    let surface = SurfaceConfig::default();
    let positions = |seed| {
        let session = GraphSession::new(chain(NodeStatus::InProgress), surface.clone(), LayoutConfig::default(), seed);
        session
            .graph()
            .nodes()
            .iter()
            .map(|node| node.position)
            .collect::<Vec<_>>()
    };
    assert_eq!(positions(5), positions(5));
}

proptest! {
    #[test]
    fn layout_keeps_every_node_inside_the_surface(
        points in prop::collection::vec((-500.0f32..2000.0, -500.0f32..2000.0), 2..12),
        width in 100.0f32..1500.0,
        height in 100.0f32..1500.0,
        iterations in 1usize..60,
        seed in any::<u64>(),
    ) {
        let bounds = vec2(width, height);
        let mut graph = GraphStore::new(bounds, seed);
        for (index, (x, y)) in points.iter().enumerate() {
            graph.add_node(
                format!("n{index}"),
                NodeData::new(format!("Node {index}"), NodeCategory::ALL[index % NodeCategory::ALL.len()]),
                Some(pos2(*x, *y)),
            );
        }
        for index in 1..points.len() {
            graph
                .add_edge(&format!("n{}", index - 1), &format!("n{index}"), 1.0, EdgeKind::Dependency)
                .unwrap();
        }

        let config = LayoutConfig { iterations, ..LayoutConfig::default() };
        prop_assert_eq!(run_layout(&mut graph, &config), iterations);

        for node in graph.nodes() {
            prop_assert!(node.position.x.is_finite() && node.position.y.is_finite());
            prop_assert!(node.position.x >= node.radius - 1e-3);
            prop_assert!(node.position.x <= width - node.radius + 1e-3);
            prop_assert!(node.position.y >= node.radius - 1e-3);
            prop_assert!(node.position.y <= height - node.radius + 1e-3);
        }
    }

    #[test]
    fn drags_never_leave_the_surface(x in -3000.0f32..3000.0, y in -3000.0f32..3000.0) {
        let mut session = session_for(chain(NodeStatus::InProgress));
        let start = session.graph().node("design").unwrap().position;
        session.pointer_down(start);
        session.pointer_move(pos2(x, y));

        let surface = session.surface().size();
        let node = session.graph().node("design").unwrap();
        prop_assert!(node.position.x >= node.radius && node.position.x <= surface.x - node.radius);
        prop_assert!(node.position.y >= node.radius && node.position.y <= surface.y - node.radius);
    }
}
