use std::collections::HashMap;

use eframe::egui::{Color32, Pos2, Vec2, pos2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub type NodeId = String;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("edge {source_id} -> {target_id} references unknown node '{missing}'")]
    UnknownNode {
        source_id: NodeId,
        target_id: NodeId,
        missing: NodeId,
    },
    #[error("edge {source_id} -> {target_id} has invalid weight {weight}")]
    InvalidWeight {
        source_id: NodeId,
        target_id: NodeId,
        weight: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    Completed,
    InProgress,
    Blocked,
    Delayed,
    Upcoming,
}

impl NodeStatus {
    pub const ALL: [Self; 5] = [
        Self::Completed,
        Self::InProgress,
        Self::Blocked,
        Self::Delayed,
        Self::Upcoming,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::Blocked => "blocked",
            Self::Delayed => "delayed",
            Self::Upcoming => "upcoming",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Dependency,
    Parallel,
    Conditional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeCategory {
    Planning,
    Frontend,
    Backend,
    Database,
    Mobile,
    Infrastructure,
    Quality,
    Release,
}

impl NodeCategory {
    pub const ALL: [Self; 8] = [
        Self::Planning,
        Self::Frontend,
        Self::Backend,
        Self::Database,
        Self::Mobile,
        Self::Infrastructure,
        Self::Quality,
        Self::Release,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Database => "Database",
            Self::Mobile => "Mobile",
            Self::Infrastructure => "Infrastructure",
            Self::Quality => "Quality",
            Self::Release => "Release",
        }
    }
}

pub fn base_radius(category: NodeCategory, priority: Priority) -> f32 {
    let category_radius = match category {
        NodeCategory::Planning | NodeCategory::Release => 36.0,
        NodeCategory::Backend | NodeCategory::Frontend | NodeCategory::Mobile => 32.0,
        NodeCategory::Database | NodeCategory::Infrastructure => 30.0,
        NodeCategory::Quality => 28.0,
    };
    let priority_bump = match priority {
        Priority::Low => 0.0,
        Priority::Medium => 1.0,
        Priority::High => 2.5,
        Priority::Critical => 4.0,
    };
    category_radius + priority_bump
}

#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuturePhase {
    pub title: String,
    pub description: String,
    pub estimated_duration: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeData {
    pub title: String,
    pub category: NodeCategory,
    pub status: NodeStatus,
    pub priority: Priority,
    pub completion: f32,
    pub tasks: Vec<Task>,
    pub estimated_hours: f32,
    pub actual_hours: f32,
    pub color: Color32,
    pub future_phases: Vec<FuturePhase>,
    pub phase_order: usize,
}

impl NodeData {
    pub fn new(title: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            title: title.into(),
            category,
            status: NodeStatus::Upcoming,
            priority: Priority::Medium,
            completion: 0.0,
            tasks: Vec::new(),
            estimated_hours: 0.0,
            actual_hours: 0.0,
            color: Color32::from_rgb(120, 140, 170),
            future_phases: Vec::new(),
            phase_order: 0,
        }
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_completion(mut self, completion: f32) -> Self {
        self.completion = completion.clamp(0.0, 100.0);
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub data: NodeData,
    pub position: Pos2,
    pub velocity: Vec2,
    pub fx: Option<f32>,
    pub fy: Option<f32>,
    pub radius: f32,
}

impl GraphNode {
    pub fn completed_tasks(&self) -> usize {
        self.data.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn total_tasks(&self) -> usize {
        self.data.tasks.len()
    }

    /// Completion percentage. Derived from the task list whenever it is non-empty.
    pub fn completion(&self) -> f32 {
        let total = self.total_tasks();
        if total == 0 {
            return self.data.completion.clamp(0.0, 100.0);
        }
        (self.completed_tasks() as f32 / total as f32) * 100.0
    }

    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }

    pub fn pin(&mut self, at: Pos2) {
        self.position = at;
        self.fx = Some(at.x);
        self.fy = Some(at.y);
    }

    pub fn unpin(&mut self) {
        self.fx = None;
        self.fy = None;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub weight: f32,
    pub kind: EdgeKind,
    pub animated: bool,
}

#[derive(Clone, Debug)]
pub struct NodeSeed {
    pub id: NodeId,
    pub data: NodeData,
    pub position: Option<Pos2>,
}

#[derive(Clone, Debug)]
pub struct EdgeSeed {
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub weight: f32,
    pub kind: EdgeKind,
    pub animated: bool,
}

#[derive(Clone, Debug, Default)]
pub struct GraphDataset {
    pub nodes: Vec<NodeSeed>,
    pub edges: Vec<EdgeSeed>,
}

/// Clamps a node centre into `[radius, extent - radius]` on both axes.
///
/// A surface narrower than the node's diameter centres the node on that axis.
pub fn clamp_to_bounds(position: Pos2, radius: f32, bounds: Vec2) -> Pos2 {
    pos2(
        clamp_axis(position.x, radius, bounds.x),
        clamp_axis(position.y, radius, bounds.y),
    )
}

fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    let min = radius;
    let max = extent - radius;
    if max < min {
        return extent * 0.5;
    }
    if value.is_nan() {
        return (min + max) * 0.5;
    }
    value.clamp(min, max)
}

pub struct GraphStore {
    nodes: Vec<GraphNode>,
    index_by_id: HashMap<NodeId, usize>,
    edges: Vec<GraphEdge>,
    bounds: Vec2,
    rng: StdRng,
}

impl GraphStore {
    pub fn new(bounds: Vec2, seed: u64) -> Self {
        Self {
            nodes: Vec::new(),
            index_by_id: HashMap::new(),
            edges: Vec::new(),
            bounds,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_dataset(dataset: GraphDataset, bounds: Vec2, seed: u64) -> Self {
        let mut store = Self::new(bounds, seed);
        for seed in dataset.nodes {
            store.add_node(seed.id, seed.data, seed.position);
        }

        let mut rejected = 0usize;
        for seed in dataset.edges {
            match store.add_edge(&seed.source_id, &seed.target_id, seed.weight, seed.kind) {
                Ok(edge) => edge.animated = seed.animated,
                Err(error) => {
                    rejected += 1;
                    log::debug!("skipping edge: {error}");
                }
            }
        }

        log::info!(
            "built graph with {} nodes, {} edges ({rejected} rejected)",
            store.nodes.len(),
            store.edges.len()
        );
        store
    }

    /// Inserts a node, replacing any node with the same id in place.
    ///
    /// Without an explicit position the node is placed at a random point inside
    /// the current bounds.
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        data: NodeData,
        position: Option<Pos2>,
    ) -> &mut GraphNode {
        let id = id.into();
        let radius = base_radius(data.category, data.priority);
        let position = match position {
            Some(position) => position,
            None => self.random_position(radius),
        };

        let node = GraphNode {
            id: id.clone(),
            data,
            position,
            velocity: Vec2::ZERO,
            fx: None,
            fy: None,
            radius,
        };

        let index = match self.index_by_id.get(&id).copied() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                let index = self.nodes.len() - 1;
                self.index_by_id.insert(id, index);
                index
            }
        };

        &mut self.nodes[index]
    }

    /// Adds an edge between two existing nodes. Nothing is stored on failure.
    pub fn add_edge(
        &mut self,
        source_id: &str,
        target_id: &str,
        weight: f32,
        kind: EdgeKind,
    ) -> Result<&mut GraphEdge, GraphError> {
        for id in [source_id, target_id] {
            if !self.index_by_id.contains_key(id) {
                return Err(GraphError::UnknownNode {
                    source_id: source_id.to_owned(),
                    target_id: target_id.to_owned(),
                    missing: id.to_owned(),
                });
            }
        }

        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                source_id: source_id.to_owned(),
                target_id: target_id.to_owned(),
                weight,
            });
        }

        self.edges.push(GraphEdge {
            source_id: source_id.to_owned(),
            target_id: target_id.to_owned(),
            weight,
            kind,
            animated: kind == EdgeKind::Dependency,
        });
        let last = self.edges.len() - 1;
        Ok(&mut self.edges[last])
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        let index = self.index_by_id.get(id).copied()?;
        self.nodes.get_mut(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [GraphNode] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Vec2) {
        if self.bounds == bounds {
            return;
        }
        self.bounds = bounds;
        for node in &mut self.nodes {
            node.position = clamp_to_bounds(node.position, node.radius, bounds);
            if node.fx.is_some() {
                node.fx = Some(node.position.x);
            }
            if node.fy.is_some() {
                node.fy = Some(node.position.y);
            }
        }
    }

    fn random_position(&mut self, radius: f32) -> Pos2 {
        let x = random_axis(&mut self.rng, radius, self.bounds.x);
        let y = random_axis(&mut self.rng, radius, self.bounds.y);
        pos2(x, y)
    }
}

fn random_axis(rng: &mut StdRng, radius: f32, extent: f32) -> f32 {
    if extent - radius <= radius {
        return extent * 0.5;
    }
    rng.gen_range(radius..=(extent - radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    fn store() -> GraphStore {
        GraphStore::new(vec2(800.0, 600.0), 7)
    }

    fn task(title: &str, completed: bool) -> Task {
        Task {
            title: title.to_owned(),
            completed,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn add_edge_rejects_unknown_endpoint_without_mutation() {
        let mut graph = store();
        graph.add_node("a", NodeData::new("A", NodeCategory::Planning), None);

        let result = graph.add_edge("a", "b", 1.0, EdgeKind::Dependency);

        assert!(matches!(
            result,
            Err(GraphError::UnknownNode { ref missing, .. }) if missing == "b"
        ));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn add_edge_rejects_negative_weight() {
        let mut graph = store();
        graph.add_node("a", NodeData::new("A", NodeCategory::Planning), None);
        graph.add_node("b", NodeData::new("B", NodeCategory::Planning), None);

        assert!(graph.add_edge("a", "b", -2.0, EdgeKind::Parallel).is_err());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn add_node_overwrites_existing_id_in_place() {
        let mut graph = store();
        graph.add_node("a", NodeData::new("First", NodeCategory::Planning), None);
        graph.add_node("b", NodeData::new("B", NodeCategory::Planning), None);
        graph.add_node(
            "a",
            NodeData::new("Second", NodeCategory::Quality),
            Some(pos2(50.0, 60.0)),
        );

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.index_of("a"), Some(0));
        let node = graph.node("a").unwrap();
        assert_eq!(node.data.title, "Second");
        assert_eq!(node.position, pos2(50.0, 60.0));
    }

    #[test]
    fn random_placement_stays_inside_bounds() {
        let mut graph = store();
        for index in 0..40 {
            graph.add_node(
                format!("n{index}"),
                NodeData::new("N", NodeCategory::Backend),
                None,
            );
        }

        for node in graph.nodes() {
            assert!(node.position.x >= node.radius && node.position.x <= 800.0 - node.radius);
            assert!(node.position.y >= node.radius && node.position.y <= 600.0 - node.radius);
        }
    }

    #[test]
    fn completion_is_derived_from_tasks_when_present() {
        let mut graph = store();
        let data = NodeData::new("Build", NodeCategory::Backend)
            .with_completion(90.0)
            .with_tasks(vec![task("a", true), task("b", false), task("c", false), task("d", true)]);
        let node = graph.add_node("build", data, None);

        assert_eq!(node.completion(), 50.0);
        assert_eq!(node.completed_tasks(), 2);
        assert_eq!(node.total_tasks(), 4);
    }

    #[test]
    fn completion_falls_back_to_stored_value_without_tasks() {
        let mut graph = store();
        let node = graph.add_node(
            "design",
            NodeData::new("Design", NodeCategory::Planning).with_completion(35.0),
            None,
        );
        assert_eq!(node.completion(), 35.0);
    }

    #[test]
    fn clamp_centres_nodes_on_undersized_surfaces() {
        let clamped = clamp_to_bounds(pos2(5.0, 500.0), 40.0, vec2(60.0, 300.0));
        assert_eq!(clamped, pos2(30.0, 260.0));
    }

    #[test]
    fn shrinking_bounds_reclamps_nodes() {
        let mut graph = store();
        graph.add_node(
            "a",
            NodeData::new("A", NodeCategory::Quality).with_priority(Priority::Low),
            Some(pos2(700.0, 500.0)),
        );
        graph.set_bounds(vec2(400.0, 300.0));

        let node = graph.node("a").unwrap();
        assert_eq!(node.position, pos2(400.0 - 28.0, 300.0 - 28.0));
    }
}
