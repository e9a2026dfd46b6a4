use eframe::egui::{Pos2, Vec2};

use super::config::SurfaceConfig;
use super::graph::{GraphNode, GraphStore, NodeId, NodeStatus, clamp_to_bounds};
use super::particles::{DEFAULT_BURST, ParticleSystem};
use super::render::geometry::rendered_radius;

pub const HIT_TOLERANCE: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
    Grabbing,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub selected: Option<NodeId>,
    pub hovered: Option<NodeId>,
    pub dragged: Option<NodeId>,
    pub dragging: bool,
    pub grab_offset: Vec2,
}

impl InteractionState {
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered.as_deref() == Some(id)
    }

    pub fn cursor(&self) -> CursorStyle {
        if self.dragging {
            CursorStyle::Grabbing
        } else if self.hovered.is_some() {
            CursorStyle::Pointer
        } else {
            CursorStyle::Default
        }
    }

    /// Topmost visible node under `point`.
    ///
    /// Nodes are drawn in insertion order, so overlapping hits resolve to the
    /// last-inserted node.
    pub fn hit_test<'g>(
        &self,
        graph: &'g GraphStore,
        surface: &SurfaceConfig,
        time: f32,
        point: Pos2,
    ) -> Option<&'g GraphNode> {
        graph.nodes().iter().rev().find(|node| {
            if !surface.shows_category(node.data.category) {
                return false;
            }
            let radius = rendered_radius(
                node,
                time,
                self.is_hovered(&node.id),
                self.is_selected(&node.id),
            );
            node.position.distance(point) <= radius + HIT_TOLERANCE
        })
    }

    pub fn pointer_down(
        &mut self,
        graph: &mut GraphStore,
        surface: &SurfaceConfig,
        time: f32,
        point: Pos2,
    ) -> Option<NodeId> {
        let Some(id) = self
            .hit_test(graph, surface, time, point)
            .map(|node| node.id.clone())
        else {
            self.select(None);
            return None;
        };

        if let Some(node) = graph.node_mut(&id) {
            let at = node.position;
            node.pin(at);
            self.grab_offset = at - point;
        }
        self.dragging = true;
        self.dragged = Some(id.clone());
        self.select(Some(id.clone()));
        Some(id)
    }

    pub fn pointer_move(
        &mut self,
        graph: &mut GraphStore,
        surface: &SurfaceConfig,
        time: f32,
        point: Pos2,
    ) -> CursorStyle {
        if self.dragging {
            let bounds = graph.bounds();
            if let Some(node) = self.dragged.as_deref().and_then(|id| graph.node_mut(id)) {
                let at = clamp_to_bounds(point + self.grab_offset, node.radius, bounds);
                node.pin(at);
            }
            return CursorStyle::Grabbing;
        }

        self.hovered = self
            .hit_test(graph, surface, time, point)
            .map(|node| node.id.clone());
        self.cursor()
    }

    pub fn pointer_up(&mut self, graph: &mut GraphStore) {
        if let Some(node) = self.dragged.take().and_then(|id| graph.node_mut(&id)) {
            node.unpin();
        }
        self.dragging = false;
        self.grab_offset = Vec2::ZERO;
    }

    pub fn pointer_leave(&mut self, graph: &mut GraphStore) {
        self.pointer_up(graph);
        self.hovered = None;
    }

    pub fn click(
        &mut self,
        graph: &GraphStore,
        surface: &SurfaceConfig,
        time: f32,
        point: Pos2,
        particles: &mut ParticleSystem,
    ) -> Option<NodeId> {
        let Some(node) = self.hit_test(graph, surface, time, point) else {
            self.select(None);
            return None;
        };

        if node.data.status == NodeStatus::Completed {
            particles.spawn(node.position, DEFAULT_BURST);
        }
        let id = node.id.clone();
        self.select(Some(id.clone()));
        Some(id)
    }

    pub fn select(&mut self, selected: Option<NodeId>) {
        if self.selected != selected {
            log::debug!("selection changed to {selected:?}");
            self.selected = selected;
        }
    }

    pub fn retain_known(&mut self, graph: &GraphStore) {
        for slot in [&mut self.selected, &mut self.hovered, &mut self.dragged] {
            if slot.as_deref().is_some_and(|id| graph.node(id).is_none()) {
                *slot = None;
            }
        }
        if self.dragged.is_none() {
            self.dragging = false;
        }
    }
}
