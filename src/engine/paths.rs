use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::graph::{EdgeKind, GraphStore, NodeId};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Frontier {
    distance: f32,
    index: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on distance, lower index first on ties.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra over the undirected reading of the edge list.
///
/// Returns an empty path when either id is unknown or the target cannot be
/// reached. `start == end` yields the single-node path.
pub fn shortest_path(graph: &GraphStore, start_id: &str, end_id: &str) -> Vec<NodeId> {
    let (Some(start), Some(end)) = (graph.index_of(start_id), graph.index_of(end_id)) else {
        return Vec::new();
    };
    if start == end {
        return vec![start_id.to_owned()];
    }

    let adjacency = undirected_adjacency(graph);
    let n = graph.len();
    let mut distance = vec![f32::INFINITY; n];
    let mut previous = vec![usize::MAX; n];
    let mut visited = vec![false; n];
    let mut heap = BinaryHeap::from([Frontier {
        distance: 0.0,
        index: start,
    }]);
    distance[start] = 0.0;

    while let Some(Frontier {
        distance: current_distance,
        index: current,
    }) = heap.pop()
    {
        if visited[current] {
            continue;
        }
        visited[current] = true;
        if current == end {
            break;
        }

        for &(next, weight) in &adjacency[current] {
            if visited[next] {
                continue;
            }
            let candidate = current_distance + weight;
            if candidate < distance[next] {
                distance[next] = candidate;
                previous[next] = current;
                heap.push(Frontier {
                    distance: candidate,
                    index: next,
                });
            }
        }
    }

    if !visited[end] {
        return Vec::new();
    }

    let mut path = vec![end];
    let mut cursor = end;
    while cursor != start {
        let prev = previous[cursor];
        if prev == usize::MAX {
            return Vec::new();
        }
        path.push(prev);
        cursor = prev;
    }

    path.reverse();
    let nodes = graph.nodes();
    path.into_iter().map(|index| nodes[index].id.clone()).collect()
}

fn undirected_adjacency(graph: &GraphStore) -> Vec<Vec<(usize, f32)>> {
    let mut adjacency = vec![Vec::new(); graph.len()];
    for edge in graph.edges() {
        let (Some(source), Some(target)) =
            (graph.index_of(&edge.source_id), graph.index_of(&edge.target_id))
        else {
            continue;
        };
        adjacency[source].push((target, edge.weight));
        adjacency[target].push((source, edge.weight));
    }
    adjacency
}

/// Longest chain of estimated hours through dependency and conditional edges.
///
/// Parallel edges impose no ordering. Nodes sitting on a cycle never reach a
/// zero in-degree and are left out.
pub fn critical_path(graph: &GraphStore) -> Vec<NodeId> {
    let n = graph.len();
    if n == 0 {
        return Vec::new();
    }

    let mut outgoing = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];
    for edge in graph.edges() {
        if edge.kind == EdgeKind::Parallel {
            continue;
        }
        let (Some(source), Some(target)) =
            (graph.index_of(&edge.source_id), graph.index_of(&edge.target_id))
        else {
            continue;
        };
        if source == target {
            continue;
        }
        outgoing[source].push(target);
        in_degree[target] += 1;
    }

    let nodes = graph.nodes();
    let cost = |index: usize| nodes[index].data.estimated_hours.max(0.0);

    let mut order = Vec::with_capacity(n);
    let mut ready = (0..n).filter(|&index| in_degree[index] == 0).collect::<Vec<_>>();
    ready.reverse();
    while let Some(index) = ready.pop() {
        order.push(index);
        for &next in &outgoing[index] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(next);
            }
        }
    }

    let mut best = vec![f32::NEG_INFINITY; n];
    let mut previous = vec![usize::MAX; n];
    for &index in &order {
        if best[index] == f32::NEG_INFINITY {
            best[index] = cost(index);
        }
        for &next in &outgoing[index] {
            let candidate = best[index] + cost(next);
            if candidate > best[next] {
                best[next] = candidate;
                previous[next] = index;
            }
        }
    }

    let Some(&tail) = order
        .iter()
        .max_by(|&&a, &&b| best[a].total_cmp(&best[b]).then_with(|| b.cmp(&a)))
    else {
        return Vec::new();
    };

    let mut path = vec![tail];
    let mut cursor = tail;
    while previous[cursor] != usize::MAX {
        cursor = previous[cursor];
        path.push(cursor);
    }
    path.reverse();
    path.into_iter().map(|index| nodes[index].id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::graph::{NodeCategory, NodeData};
    use eframe::egui::vec2;

    fn graph_with(ids: &[&str]) -> GraphStore {
        let mut graph = GraphStore::new(vec2(800.0, 600.0), 3);
        for id in ids {
            graph.add_node(*id, NodeData::new(*id, NodeCategory::Planning), None);
        }
        graph
    }

    #[test]
    fn prefers_cheaper_two_hop_route() {
        let mut graph = graph_with(&["A", "B", "C"]);
        graph.add_edge("A", "B", 1.0, EdgeKind::Dependency).unwrap();
        graph.add_edge("B", "C", 1.0, EdgeKind::Dependency).unwrap();
        graph.add_edge("A", "C", 5.0, EdgeKind::Dependency).unwrap();

        assert_eq!(shortest_path(&graph, "A", "C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn edges_are_traversed_in_both_directions() {
        let mut graph = graph_with(&["A", "B", "C"]);
        graph.add_edge("B", "A", 1.0, EdgeKind::Dependency).unwrap();
        graph.add_edge("C", "B", 1.0, EdgeKind::Dependency).unwrap();

        assert_eq!(shortest_path(&graph, "A", "C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn isolated_target_yields_empty_path() {
        let mut graph = graph_with(&["A", "B", "Z"]);
        graph.add_edge("A", "B", 1.0, EdgeKind::Dependency).unwrap();

        assert!(shortest_path(&graph, "A", "Z").is_empty());
    }

    #[test]
    fn unknown_endpoint_yields_empty_path() {
        let graph = graph_with(&["A"]);
        assert!(shortest_path(&graph, "A", "missing").is_empty());
        assert!(shortest_path(&graph, "missing", "A").is_empty());
    }

    #[test]
    fn start_equal_to_end_is_a_zero_length_path() {
        let graph = graph_with(&["A"]);
        assert_eq!(shortest_path(&graph, "A", "A"), vec!["A"]);
    }

    #[test]
    fn critical_path_follows_most_expensive_chain() {
        let mut graph = graph_with(&["start", "quick", "slow", "end"]);
        for (id, hours) in [("start", 8.0), ("quick", 4.0), ("slow", 40.0), ("end", 10.0)] {
            graph.node_mut(id).unwrap().data.estimated_hours = hours;
        }
        graph.add_edge("start", "quick", 1.0, EdgeKind::Dependency).unwrap();
        graph.add_edge("start", "slow", 1.0, EdgeKind::Dependency).unwrap();
        graph.add_edge("quick", "end", 1.0, EdgeKind::Dependency).unwrap();
        graph.add_edge("slow", "end", 1.0, EdgeKind::Conditional).unwrap();

        assert_eq!(critical_path(&graph), vec!["start", "slow", "end"]);
    }

    #[test]
    fn parallel_edges_do_not_extend_the_critical_path() {
        let mut graph = graph_with(&["a", "b"]);
        graph.node_mut("a").unwrap().data.estimated_hours = 5.0;
        graph.node_mut("b").unwrap().data.estimated_hours = 3.0;
        graph.add_edge("a", "b", 1.0, EdgeKind::Parallel).unwrap();

        assert_eq!(critical_path(&graph), vec!["a"]);
    }

    #[test]
    fn critical_path_of_empty_graph_is_empty() {
        let graph = graph_with(&[]);
        assert!(critical_path(&graph).is_empty());
    }
}
