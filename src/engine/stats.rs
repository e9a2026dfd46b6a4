use super::graph::{GraphStore, NodeId, NodeStatus};
use super::paths::critical_path;

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectStats {
    pub node_count: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_percent: f32,
    pub estimated_hours: f32,
    pub actual_hours: f32,
    pub status_counts: [(NodeStatus, usize); 5],
    pub critical_path: Vec<NodeId>,
}

impl ProjectStats {
    pub fn compute(graph: &GraphStore) -> Self {
        let nodes = graph.nodes();
        let total_tasks = nodes.iter().map(|node| node.total_tasks()).sum::<usize>();
        let completed_tasks = nodes.iter().map(|node| node.completed_tasks()).sum::<usize>();

        let completion_percent = if total_tasks > 0 {
            completed_tasks as f32 / total_tasks as f32 * 100.0
        } else if nodes.is_empty() {
            0.0
        } else {
            nodes.iter().map(|node| node.completion()).sum::<f32>() / nodes.len() as f32
        };

        let status_counts = NodeStatus::ALL.map(|status| {
            let count = nodes.iter().filter(|node| node.data.status == status).count();
            (status, count)
        });

        Self {
            node_count: nodes.len(),
            total_tasks,
            completed_tasks,
            completion_percent,
            estimated_hours: nodes.iter().map(|node| node.data.estimated_hours).sum(),
            actual_hours: nodes.iter().map(|node| node.data.actual_hours).sum(),
            status_counts,
            critical_path: critical_path(graph),
        }
    }

    pub fn count(&self, status: NodeStatus) -> usize {
        self.status_counts
            .iter()
            .find(|(candidate, _)| *candidate == status)
            .map_or(0, |(_, count)| *count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::graph::{EdgeKind, NodeCategory, NodeData, Priority, Task};
    use eframe::egui::vec2;

    fn task(completed: bool) -> Task {
        Task {
            title: "t".to_owned(),
            completed,
            priority: Priority::Low,
        }
    }

    #[test]
    fn task_counts_drive_completion() {
        let mut graph = GraphStore::new(vec2(600.0, 600.0), 0);
        let mut a = NodeData::new("A", NodeCategory::Planning)
            .with_status(NodeStatus::Completed)
            .with_tasks(vec![task(true), task(true)]);
        a.estimated_hours = 10.0;
        a.actual_hours = 12.0;
        let mut b = NodeData::new("B", NodeCategory::Backend).with_tasks(vec![task(false), task(true)]);
        b.estimated_hours = 30.0;
        b.actual_hours = 5.0;
        graph.add_node("a", a, None);
        graph.add_node("b", b, None);
        graph.add_edge("a", "b", 1.0, EdgeKind::Dependency).unwrap();

        let stats = ProjectStats::compute(&graph);

        assert_eq!(stats.total_tasks, 4);
        assert_eq!(stats.completed_tasks, 3);
        assert_eq!(stats.completion_percent, 75.0);
        assert_eq!(stats.estimated_hours, 40.0);
        assert_eq!(stats.actual_hours, 17.0);
        assert_eq!(stats.count(NodeStatus::Completed), 1);
        assert_eq!(stats.count(NodeStatus::Upcoming), 1);
        assert_eq!(stats.critical_path, vec!["a", "b"]);
    }

    #[test]
    fn without_tasks_completion_is_the_node_average() {
        let mut graph = GraphStore::new(vec2(600.0, 600.0), 0);
        graph.add_node("a", NodeData::new("A", NodeCategory::Planning).with_completion(100.0), None);
        graph.add_node("b", NodeData::new("B", NodeCategory::Planning).with_completion(20.0), None);

        assert_eq!(ProjectStats::compute(&graph).completion_percent, 60.0);
    }

    #[test]
    fn empty_graph_has_zeroed_stats() {
        let graph = GraphStore::new(vec2(600.0, 600.0), 0);
        let stats = ProjectStats::compute(&graph);
        assert_eq!(stats.completion_percent, 0.0);
        assert!(stats.critical_path.is_empty());
    }
}
