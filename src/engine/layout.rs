//! Bulk force-directed layout.
//!
//! Runs synchronously to convergence on graph construction or an explicit
//! re-layout request. The per-frame loop never calls into this module.

use std::time::Instant;

use eframe::egui::Vec2;

use super::config::LayoutConfig;
use super::graph::{GraphStore, clamp_to_bounds};

pub fn run_layout(graph: &mut GraphStore, config: &LayoutConfig) -> usize {
    let started = Instant::now();
    let edges = resolve_edges(graph);

    let mut executed = 0usize;
    if graph.len() > 1 {
        for iteration in 0..config.iterations {
            step_with_edges(graph, &edges, config, config.alpha_at(iteration));
            executed += 1;
        }
    }

    log::debug!(
        "layout pass over {} nodes ran {executed} iterations in {:?}",
        graph.len(),
        started.elapsed()
    );
    executed
}

pub fn step(graph: &mut GraphStore, config: &LayoutConfig, alpha: f32) {
    let edges = resolve_edges(graph);
    step_with_edges(graph, &edges, config, alpha);
}

fn resolve_edges(graph: &GraphStore) -> Vec<(usize, usize, f32)> {
    graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let source = graph.index_of(&edge.source_id)?;
            let target = graph.index_of(&edge.target_id)?;
            (source != target).then_some((source, target, edge.weight))
        })
        .collect()
}

fn step_with_edges(
    graph: &mut GraphStore,
    edges: &[(usize, usize, f32)],
    config: &LayoutConfig,
    alpha: f32,
) {
    let bounds = graph.bounds();
    let nodes = graph.nodes_mut();
    let n = nodes.len();
    if n < 2 {
        return;
    }

    for node in nodes.iter_mut() {
        node.velocity = Vec2::ZERO;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let delta = nodes[j].position - nodes[i].position;
            let mut distance = delta.length();
            if distance == 0.0 {
                distance = 1.0;
            }
            let direction = if delta.length_sq() > 0.0 {
                delta / distance
            } else {
                Vec2::X
            };

            let force = config.repulsion * alpha / distance;
            nodes[i].velocity += direction * force;
            nodes[j].velocity -= direction * force;
        }
    }

    for &(source, target, weight) in edges {
        let delta = nodes[target].position - nodes[source].position;
        let distance = delta.length();
        if distance == 0.0 {
            continue;
        }
        let direction = delta / distance;

        let force = distance * config.attraction * weight * alpha;
        nodes[source].velocity += direction * force;
        nodes[target].velocity -= direction * force;
    }

    for node in nodes.iter_mut() {
        let mut next = node.position + node.velocity;
        if let Some(fx) = node.fx {
            next.x = fx;
        }
        if let Some(fy) = node.fy {
            next.y = fy;
        }

        let clamped = clamp_to_bounds(next, node.radius, bounds);
        node.position.x = if node.fx.is_some() { next.x } else { clamped.x };
        node.position.y = if node.fy.is_some() { next.y } else { clamped.y };
    }
}
