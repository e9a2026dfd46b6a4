use eframe::egui::{Color32, Stroke};

use crate::engine::graph::{NodeCategory, NodeStatus};

pub const BACKGROUND_TOP: Color32 = Color32::from_rgb(15, 23, 42);
pub const BACKGROUND_BOTTOM: Color32 = Color32::from_rgb(30, 41, 59);
pub const GRID_LINE: Color32 = Color32::from_rgba_premultiplied(13, 15, 18, 22);
pub const NODE_OUTLINE: Color32 = Color32::from_rgba_premultiplied(8, 10, 14, 200);
pub const SELECTION_HALO: Color32 = Color32::from_rgb(250, 204, 21);
pub const HOVER_HALO: Color32 = Color32::from_rgb(191, 219, 254);
pub const COMPLETION_RING: Color32 = Color32::from_rgb(52, 211, 153);
pub const PRIORITY_BADGE: Color32 = Color32::from_rgb(239, 68, 68);
pub const TASK_BADGE: Color32 = Color32::from_rgb(30, 41, 59);
pub const LABEL: Color32 = Color32::from_gray(241);
pub const LABEL_DIMMED: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 64);
pub const TIMELINE_AXIS: Color32 = Color32::from_rgb(100, 116, 139);

const FLOW_EDGE: Color32 = Color32::from_rgb(52, 211, 153);
const HIGHLIGHT_EDGE: Color32 = Color32::from_rgb(96, 165, 250);
const INACTIVE_EDGE: Color32 = Color32::from_rgba_premultiplied(55, 64, 76, 140);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeStyle {
    Flowing,
    Highlighted,
    Inactive,
}

impl EdgeStyle {
    pub fn stroke(self) -> Stroke {
        match self {
            Self::Flowing => Stroke::new(2.5, FLOW_EDGE),
            Self::Highlighted => Stroke::new(3.0, HIGHLIGHT_EDGE),
            Self::Inactive => Stroke::new(1.8, INACTIVE_EDGE),
        }
    }
}

pub fn status_gradient(status: NodeStatus) -> (Color32, Color32) {
    match status {
        NodeStatus::Completed => (Color32::from_rgb(110, 231, 183), Color32::from_rgb(5, 150, 105)),
        NodeStatus::InProgress => (Color32::from_rgb(147, 197, 253), Color32::from_rgb(37, 99, 235)),
        NodeStatus::Blocked => (Color32::from_rgb(252, 165, 165), Color32::from_rgb(220, 38, 38)),
        NodeStatus::Delayed => (Color32::from_rgb(253, 224, 71), Color32::from_rgb(217, 119, 6)),
        NodeStatus::Upcoming => (Color32::from_rgb(203, 213, 225), Color32::from_rgb(71, 85, 105)),
    }
}

pub fn completion_gradient(completion: f32) -> (Color32, Color32) {
    let t = (completion / 100.0).clamp(0.0, 1.0);
    let rim = blend_color(Color32::from_rgb(220, 38, 38), Color32::from_rgb(5, 150, 105), t);
    (blend_color(rim, Color32::WHITE, 0.45), rim)
}

pub fn category_color(category: NodeCategory) -> Color32 {
    match category {
        NodeCategory::Planning => Color32::from_rgb(167, 139, 250),
        NodeCategory::Frontend => Color32::from_rgb(56, 189, 248),
        NodeCategory::Backend => Color32::from_rgb(251, 146, 60),
        NodeCategory::Database => Color32::from_rgb(250, 204, 21),
        NodeCategory::Mobile => Color32::from_rgb(244, 114, 182),
        NodeCategory::Infrastructure => Color32::from_rgb(148, 163, 184),
        NodeCategory::Quality => Color32::from_rgb(74, 222, 128),
        NodeCategory::Release => Color32::from_rgb(248, 113, 113),
    }
}

pub fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}
