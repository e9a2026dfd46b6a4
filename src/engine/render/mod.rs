pub mod geometry;
pub mod palette;

use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, Pos2, Rect, Stroke, pos2, vec2};

use super::config::{SurfaceConfig, ViewMode};
use super::graph::{EdgeKind, GraphEdge, GraphNode, GraphStore, NodeStatus, Priority};
use super::interaction::InteractionState;
use super::particles::Particle;
use geometry::{GRID_STEP, arrowhead, grid_offset, rendered_radius, split_title};
use palette::EdgeStyle;

const FLOW_DASH: f32 = 10.0;
const FLOW_GAP: f32 = 6.0;
const FLOW_SPEED: f32 = 30.0;
const CONDITIONAL_DASH: f32 = 4.0;
const RING_GAP: f32 = 5.0;
const RING_WIDTH: f32 = 4.0;
const BADGE_RADIUS: f32 = 9.0;
const TASK_BADGE_RADIUS: f32 = 12.0;
const TITLE_SIZE: f32 = 12.0;
const DETAIL_SIZE: f32 = 10.0;
const TIMELINE_MARGIN: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    Solid(Color32),
    VerticalGradient { top: Color32, bottom: Color32 },
    RadialGradient { inner: Color32, outer: Color32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    pub length: f32,
    pub gap: f32,
    pub offset: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Fill,
    },
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
        dash: Option<Dash>,
    },
    Triangle {
        points: [Pos2; 3],
        fill: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Fill,
    },
    Arc {
        center: Pos2,
        radius: f32,
        start_angle: f32,
        sweep: f32,
        stroke: Stroke,
        round_caps: bool,
    },
    Text {
        pos: Pos2,
        text: String,
        size: f32,
        color: Color32,
        anchor: Align2,
    },
}

pub struct FrameInput<'a> {
    pub graph: &'a GraphStore,
    pub interaction: &'a InteractionState,
    pub particles: &'a [Particle],
    pub surface: &'a SurfaceConfig,
    pub time: f32,
    pub search_matches: Option<&'a HashSet<usize>>,
}

/// Clears `out` and fills it with this frame's draw commands.
///
/// A surface without area yields no commands.
pub fn render_frame(out: &mut Vec<DrawCommand>, input: &FrameInput<'_>) {
    out.clear();
    if !input.surface.has_area() {
        return;
    }

    draw_background(out, input.surface, input.time);
    if input.surface.view_mode == ViewMode::Timeline {
        draw_timeline_axis(out, input);
    }
    draw_edges(out, input);
    draw_nodes(out, input);
    draw_particles(out, input.particles);
}

pub fn edge_style(edge: &GraphEdge, source: &GraphNode, interaction: &InteractionState) -> EdgeStyle {
    if edge.animated && source.data.status == NodeStatus::Completed {
        EdgeStyle::Flowing
    } else if interaction.is_selected(&edge.source_id) || interaction.is_selected(&edge.target_id) {
        EdgeStyle::Highlighted
    } else {
        EdgeStyle::Inactive
    }
}

fn draw_background(out: &mut Vec<DrawCommand>, surface: &SurfaceConfig, time: f32) {
    let rect = Rect::from_min_size(Pos2::ZERO, surface.size());
    out.push(DrawCommand::Rect {
        rect,
        fill: Fill::VerticalGradient {
            top: palette::BACKGROUND_TOP,
            bottom: palette::BACKGROUND_BOTTOM,
        },
    });

    let offset = grid_offset(time);
    let stroke = Stroke::new(1.0, palette::GRID_LINE);

    let mut x = offset;
    while x < rect.right() {
        out.push(DrawCommand::Line {
            from: pos2(x, rect.top()),
            to: pos2(x, rect.bottom()),
            stroke,
            dash: None,
        });
        x += GRID_STEP;
    }

    let mut y = offset;
    while y < rect.bottom() {
        out.push(DrawCommand::Line {
            from: pos2(rect.left(), y),
            to: pos2(rect.right(), y),
            stroke,
            dash: None,
        });
        y += GRID_STEP;
    }
}

fn draw_timeline_axis(out: &mut Vec<DrawCommand>, input: &FrameInput<'_>) {
    let surface = input.surface;
    let baseline = surface.height - TIMELINE_MARGIN;
    let stroke = Stroke::new(1.5, palette::TIMELINE_AXIS);
    out.push(DrawCommand::Line {
        from: pos2(TIMELINE_MARGIN, baseline),
        to: pos2(surface.width - TIMELINE_MARGIN, baseline),
        stroke,
        dash: None,
    });

    for node in visible_nodes(input) {
        out.push(DrawCommand::Line {
            from: pos2(node.position.x, baseline - 6.0),
            to: pos2(node.position.x, baseline + 6.0),
            stroke,
            dash: None,
        });
    }
}

fn visible_nodes<'a>(input: &'a FrameInput<'_>) -> impl Iterator<Item = &'a GraphNode> + 'a {
    let surface = input.surface;
    input
        .graph
        .nodes()
        .iter()
        .filter(move |node| surface.shows_category(node.data.category))
}

fn draw_edges(out: &mut Vec<DrawCommand>, input: &FrameInput<'_>) {
    let graph = input.graph;
    let surface = input.surface;
    let dash_offset = -(input.time * FLOW_SPEED) % (FLOW_DASH + FLOW_GAP);

    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.node(&edge.source_id), graph.node(&edge.target_id))
        else {
            continue;
        };
        if !surface.shows_category(source.data.category)
            || !surface.shows_category(target.data.category)
        {
            continue;
        }

        let style = edge_style(edge, source, input.interaction);
        let stroke = style.stroke();
        let dash = match (style, edge.kind) {
            (EdgeStyle::Flowing, _) => Some(Dash {
                length: FLOW_DASH,
                gap: FLOW_GAP,
                offset: dash_offset,
            }),
            (_, EdgeKind::Conditional) => Some(Dash {
                length: CONDITIONAL_DASH,
                gap: CONDITIONAL_DASH,
                offset: 0.0,
            }),
            _ => None,
        };

        out.push(DrawCommand::Line {
            from: source.position,
            to: target.position,
            stroke,
            dash,
        });

        if edge.kind == EdgeKind::Parallel {
            continue;
        }
        let target_radius = rendered_radius(
            target,
            input.time,
            input.interaction.is_hovered(&target.id),
            input.interaction.is_selected(&target.id),
        );
        if let Some(points) = arrowhead(source.position, target.position, target_radius) {
            out.push(DrawCommand::Triangle {
                points,
                fill: stroke.color,
            });
        }
    }
}

fn draw_nodes(out: &mut Vec<DrawCommand>, input: &FrameInput<'_>) {
    let view_mode = input.surface.view_mode;

    for (index, node) in input.graph.nodes().iter().enumerate() {
        if !input.surface.shows_category(node.data.category) {
            continue;
        }

        let center = node.position;
        let hovered = input.interaction.is_hovered(&node.id);
        let selected = input.interaction.is_selected(&node.id);
        let radius = rendered_radius(node, input.time, hovered, selected);
        let completion = node.completion();

        if selected || hovered {
            let halo = if selected {
                palette::SELECTION_HALO
            } else {
                palette::HOVER_HALO
            };
            out.push(DrawCommand::Arc {
                center,
                radius: radius + 2.0,
                start_angle: 0.0,
                sweep: TAU,
                stroke: Stroke::new(2.0, halo),
                round_caps: false,
            });
        }

        let (inner, outer) = match view_mode {
            ViewMode::Completion => palette::completion_gradient(completion),
            ViewMode::Standard | ViewMode::Timeline => palette::status_gradient(node.data.status),
        };
        out.push(DrawCommand::Circle {
            center,
            radius,
            fill: Fill::RadialGradient { inner, outer },
        });
        out.push(DrawCommand::Arc {
            center,
            radius,
            start_angle: 0.0,
            sweep: TAU,
            stroke: Stroke::new(1.0, palette::NODE_OUTLINE),
            round_caps: false,
        });

        if completion > 0.0 && completion < 100.0 {
            out.push(DrawCommand::Arc {
                center,
                radius: radius + RING_GAP,
                start_angle: -FRAC_PI_2,
                sweep: TAU * completion / 100.0,
                stroke: Stroke::new(RING_WIDTH, palette::COMPLETION_RING),
                round_caps: true,
            });
        }

        let corner = radius * std::f32::consts::FRAC_1_SQRT_2;
        if node.data.priority == Priority::Critical {
            let badge = center + vec2(corner, -corner);
            out.push(DrawCommand::Circle {
                center: badge,
                radius: BADGE_RADIUS,
                fill: Fill::Solid(palette::PRIORITY_BADGE),
            });
            out.push(DrawCommand::Text {
                pos: badge,
                text: "!".to_owned(),
                size: DETAIL_SIZE + 2.0,
                color: Color32::WHITE,
                anchor: Align2::CENTER_CENTER,
            });
        }

        if node.total_tasks() > 0 {
            let badge = center + vec2(corner, corner);
            out.push(DrawCommand::Circle {
                center: badge,
                radius: TASK_BADGE_RADIUS,
                fill: Fill::Solid(palette::TASK_BADGE),
            });
            out.push(DrawCommand::Text {
                pos: badge,
                text: format!("{}/{}", node.completed_tasks(), node.total_tasks()),
                size: DETAIL_SIZE - 1.0,
                color: palette::LABEL,
                anchor: Align2::CENTER_CENTER,
            });
        }

        let label_color = match input.search_matches {
            Some(matches) if !matches.contains(&index) => palette::LABEL_DIMMED,
            _ => palette::LABEL,
        };
        push_title(out, &node.data.title, center, label_color);

        let detail = match view_mode {
            ViewMode::Standard => None,
            ViewMode::Completion => Some(format!("{completion:.0}%")),
            ViewMode::Timeline => Some(format!(
                "#{} · {:.0}h/{:.0}h",
                node.data.phase_order + 1,
                node.data.actual_hours,
                node.data.estimated_hours
            )),
        };
        if let Some(text) = detail {
            out.push(DrawCommand::Text {
                pos: center + vec2(0.0, radius + RING_GAP + RING_WIDTH + 4.0),
                text,
                size: DETAIL_SIZE,
                color: label_color,
                anchor: Align2::CENTER_TOP,
            });
        }
    }
}

fn push_title(out: &mut Vec<DrawCommand>, title: &str, center: Pos2, color: Color32) {
    match split_title(title) {
        (single, None) => out.push(DrawCommand::Text {
            pos: center,
            text: single.to_owned(),
            size: TITLE_SIZE,
            color,
            anchor: Align2::CENTER_CENTER,
        }),
        (first, Some(second)) => {
            let half_line = TITLE_SIZE * 0.6;
            for (line, offset) in [(first, -half_line), (second, half_line)] {
                out.push(DrawCommand::Text {
                    pos: center + vec2(0.0, offset),
                    text: line.to_owned(),
                    size: TITLE_SIZE,
                    color,
                    anchor: Align2::CENTER_CENTER,
                });
            }
        }
    }
}

fn draw_particles(out: &mut Vec<DrawCommand>, particles: &[Particle]) {
    for particle in particles {
        out.push(DrawCommand::Circle {
            center: particle.position,
            radius: particle.size,
            fill: Fill::Solid(particle.color.gamma_multiply(particle.opacity())),
        });
    }
}
