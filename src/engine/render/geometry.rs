use eframe::egui::{Pos2, Vec2, vec2};

use crate::engine::graph::GraphNode;

pub const HOVER_GROWTH: f32 = 4.0;
pub const SELECTION_GROWTH: f32 = 6.0;
pub const ARROW_MARGIN: f32 = 4.0;
pub const ARROW_LENGTH: f32 = 11.0;
pub const ARROW_HALF_WIDTH: f32 = 5.5;
pub const GRID_STEP: f32 = 40.0;
const GRID_DRIFT_PER_SECOND: f32 = 8.0;
const PULSE_AMPLITUDE: f32 = 1.5;

pub fn rendered_radius(node: &GraphNode, time: f32, hovered: bool, selected: bool) -> f32 {
    let phase = time * 2.0 + (node.position.x + node.position.y) * 0.01;
    let pulse = phase.sin() * PULSE_AMPLITUDE;
    let growth = if selected {
        SELECTION_GROWTH
    } else if hovered {
        HOVER_GROWTH
    } else {
        0.0
    };
    (node.radius + pulse + growth).max(1.0)
}

pub fn arrowhead(source: Pos2, target: Pos2, target_radius: f32) -> Option<[Pos2; 3]> {
    let delta = target - source;
    let length = delta.length();
    if length <= f32::EPSILON {
        return None;
    }

    let angle = delta.y.atan2(delta.x);
    let direction = Vec2::angled(angle);
    let normal = vec2(-direction.y, direction.x);
    let tip = target - direction * (target_radius + ARROW_MARGIN);
    let back = tip - direction * ARROW_LENGTH;

    Some([
        tip,
        back + normal * ARROW_HALF_WIDTH,
        back - normal * ARROW_HALF_WIDTH,
    ])
}

pub fn split_title(title: &str) -> (&str, Option<&str>) {
    let title = title.trim();
    match title.split_once(char::is_whitespace) {
        Some((first, rest)) if !rest.trim().is_empty() => (first, Some(rest.trim())),
        _ => (title, None),
    }
}

pub fn grid_offset(time: f32) -> f32 {
    (time * GRID_DRIFT_PER_SECOND).rem_euclid(GRID_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::graph::{GraphStore, NodeCategory, NodeData};
    use eframe::egui::pos2;

    #[test]
    fn arrow_tip_sits_outside_target_radius() {
        let tip = arrowhead(pos2(0.0, 0.0), pos2(100.0, 0.0), 30.0).unwrap()[0];
        assert!((tip.x - (100.0 - 30.0 - ARROW_MARGIN)).abs() < 1e-4);
        assert!(tip.y.abs() < 1e-4);
    }

    #[test]
    fn coincident_endpoints_have_no_arrow() {
        assert!(arrowhead(pos2(5.0, 5.0), pos2(5.0, 5.0), 10.0).is_none());
    }

    #[test]
    fn titles_split_on_first_space() {
        assert_eq!(split_title("Backend API Layer"), ("Backend", Some("API Layer")));
        assert_eq!(split_title("Discovery"), ("Discovery", None));
    }

    #[test]
    fn selection_enlarges_more_than_hover() {
        let mut graph = GraphStore::new(vec2(500.0, 500.0), 0);
        let node = graph
            .add_node("n", NodeData::new("N", NodeCategory::Backend), Some(pos2(0.0, 0.0)))
            .clone();
        let base = rendered_radius(&node, 0.0, false, false);
        assert_eq!(base, node.radius);
        assert_eq!(rendered_radius(&node, 0.0, true, false), base + HOVER_GROWTH);
        assert_eq!(rendered_radius(&node, 0.0, false, true), base + SELECTION_GROWTH);
    }

    #[test]
    fn grid_offset_wraps_within_one_step() {
        for time in [0.0, 3.3, 120.0, 9_999.0] {
            let offset = grid_offset(time);
            assert!((0.0..GRID_STEP).contains(&offset));
        }
    }
}
