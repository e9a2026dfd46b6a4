use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{Vec2, vec2};
use serde::Deserialize;

use super::graph::NodeCategory;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub iterations: usize,
    pub alpha: f32,
    pub alpha_decay: f32,
    pub repulsion: f32,
    pub attraction: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 120,
            alpha: 0.1,
            alpha_decay: 0.0228,
            repulsion: -1200.0,
            attraction: 0.01,
        }
    }
}

impl LayoutConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read layout config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid layout config JSON in {}", path.display()))
    }

    /// Cooling factor for iteration `i`: `alpha * (1 - alpha_decay)^i`.
    pub fn alpha_at(&self, iteration: usize) -> f32 {
        self.alpha * (1.0 - self.alpha_decay.clamp(0.0, 1.0)).powi(iteration as i32)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Standard,
    Timeline,
    Completion,
}

impl ViewMode {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Timeline, Self::Completion];

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Timeline => "Timeline",
            Self::Completion => "Completion",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    pub width: f32,
    pub height: f32,
    pub fullscreen: bool,
    pub animating: bool,
    pub category_filter: Option<BTreeSet<NodeCategory>>,
    pub search: String,
    pub view_mode: ViewMode,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            fullscreen: false,
            animating: true,
            category_filter: None,
            search: String::new(),
            view_mode: ViewMode::Standard,
        }
    }
}

impl SurfaceConfig {
    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn shows_category(&self, category: NodeCategory) -> bool {
        self.category_filter
            .as_ref()
            .is_none_or(|allowed| allowed.contains(&category))
    }

    pub fn toggle_category(&mut self, category: NodeCategory) {
        let allowed = self
            .category_filter
            .get_or_insert_with(|| NodeCategory::ALL.into_iter().collect());
        if !allowed.remove(&category) {
            allowed.insert(category);
        }
        if allowed.len() == NodeCategory::ALL.len() {
            self.category_filter = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_decays_geometrically() {
        let config = LayoutConfig {
            alpha: 0.5,
            alpha_decay: 0.5,
            ..LayoutConfig::default()
        };
        assert_eq!(config.alpha_at(0), 0.5);
        assert_eq!(config.alpha_at(2), 0.125);
    }

    #[test]
    fn partial_layout_json_keeps_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"iterations": 40}"#).unwrap();
        assert_eq!(config.iterations, 40);
        assert_eq!(config.alpha, LayoutConfig::default().alpha);
    }

    #[test]
    fn toggling_every_category_back_clears_the_filter() {
        let mut surface = SurfaceConfig::default();
        surface.toggle_category(NodeCategory::Database);
        assert!(!surface.shows_category(NodeCategory::Database));
        assert!(surface.shows_category(NodeCategory::Backend));

        surface.toggle_category(NodeCategory::Database);
        assert!(surface.category_filter.is_none());
    }
}
