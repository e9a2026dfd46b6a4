use eframe::egui::{Pos2, Vec2};

use super::config::{LayoutConfig, SurfaceConfig};
use super::graph::{GraphDataset, GraphNode, GraphStore, NodeId};
use super::interaction::{CursorStyle, InteractionState};
use super::layout::run_layout;
use super::particles::ParticleSystem;
use super::paths::shortest_path;
use super::render::{DrawCommand, FrameInput, render_frame};
use super::search::SearchCache;
use super::stats::ProjectStats;

pub struct GraphSession {
    graph: GraphStore,
    layout: LayoutConfig,
    interaction: InteractionState,
    particles: ParticleSystem,
    surface: SurfaceConfig,
    search: SearchCache,
    commands: Vec<DrawCommand>,
    time: f32,
    revision: u64,
    seed: u64,
}

impl GraphSession {
    pub fn new(
        dataset: GraphDataset,
        surface: SurfaceConfig,
        layout: LayoutConfig,
        seed: u64,
    ) -> Self {
        let graph = GraphStore::from_dataset(dataset, surface.size(), seed);
        let mut session = Self {
            graph,
            layout,
            interaction: InteractionState::default(),
            particles: ParticleSystem::new(seed.wrapping_add(1)),
            surface,
            search: SearchCache::default(),
            commands: Vec::new(),
            time: 0.0,
            revision: 1,
            seed,
        };
        session.relayout();
        session
    }

    pub fn rebuild(&mut self, dataset: GraphDataset) {
        self.graph = GraphStore::from_dataset(dataset, self.surface.size(), self.seed);
        self.revision = self.revision.wrapping_add(1);
        self.interaction.retain_known(&self.graph);
        self.particles.clear();
        self.relayout();
    }

    pub fn relayout(&mut self) -> usize {
        run_layout(&mut self.graph, &self.layout)
    }

    pub fn resize(&mut self, size: Vec2) {
        self.surface.width = size.x;
        self.surface.height = size.y;
        self.graph.set_bounds(size);
    }

    pub fn frame(&mut self, delta_seconds: f32) -> &[DrawCommand] {
        if self.surface.animating {
            self.time += delta_seconds.max(0.0);
        }

        let search_matches = self
            .search
            .matches(&self.graph, self.revision, &self.surface.search);
        render_frame(
            &mut self.commands,
            &FrameInput {
                graph: &self.graph,
                interaction: &self.interaction,
                particles: self.particles.particles(),
                surface: &self.surface,
                time: self.time,
                search_matches,
            },
        );
        self.particles.tick();

        &self.commands
    }

    pub fn pointer_down(&mut self, point: Pos2) -> Option<NodeId> {
        self.interaction
            .pointer_down(&mut self.graph, &self.surface, self.time, point)
    }

    pub fn pointer_move(&mut self, point: Pos2) -> CursorStyle {
        self.interaction
            .pointer_move(&mut self.graph, &self.surface, self.time, point)
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up(&mut self.graph);
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave(&mut self.graph);
    }

    pub fn click(&mut self, point: Pos2) -> Option<NodeId> {
        self.interaction.click(
            &self.graph,
            &self.surface,
            self.time,
            point,
            &mut self.particles,
        )
    }

    pub fn select(&mut self, id: Option<NodeId>) {
        let id = id.filter(|id| self.graph.node(id).is_some());
        self.interaction.select(id);
    }

    pub fn selection(&self) -> Option<&GraphNode> {
        self.interaction
            .selected
            .as_deref()
            .and_then(|id| self.graph.node(id))
    }

    pub fn stats(&self) -> ProjectStats {
        ProjectStats::compute(&self.graph)
    }

    pub fn shortest_path(&self, start_id: &str, end_id: &str) -> Vec<NodeId> {
        shortest_path(&self.graph, start_id, end_id)
    }

    pub fn needs_repaint(&self) -> bool {
        self.surface.animating || !self.particles.is_empty() || self.interaction.dragging
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut SurfaceConfig {
        &mut self.surface
    }

    pub fn layout_config_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}
