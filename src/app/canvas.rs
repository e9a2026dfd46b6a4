use std::f32::consts::TAU;

use eframe::egui::{
    self, Color32, CursorIcon, FontId, Mesh, Painter, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2,
};

use crate::engine::render::{DrawCommand, Fill};
use crate::engine::CursorStyle;

use super::ViewModel;

const MAX_FRAME_SECONDS: f32 = 0.1;

impl ViewModel {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        // Minimized windows report an empty canvas; keep the last real size.
        if rect.width() >= 1.0
            && rect.height() >= 1.0
            && (rect.size() - self.session.surface().size()).length_sq() > 0.25
        {
            self.session.resize(rect.size());
        }
        let origin = rect.min.to_vec2();

        let (pressed, released, pointer, delta_seconds) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.interact_pos(),
                input.stable_dt.min(MAX_FRAME_SECONDS),
            )
        });

        let dragging = self.session.interaction().dragging;
        match pointer.map(|pos| (pos, rect.contains(pos))) {
            Some((pos, inside)) if inside || dragging => {
                let local = pos - origin;
                if pressed && inside {
                    self.session.pointer_down(local);
                }
                let cursor = self.session.pointer_move(local);
                ui.ctx().set_cursor_icon(cursor_icon(cursor));
            }
            _ => self.session.pointer_leave(),
        }
        if released {
            self.session.pointer_up();
        }
        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.session.click(pos - origin);
        }

        let painter = ui.painter_at(rect);
        for command in self.session.frame(delta_seconds) {
            paint_command(&painter, origin, command);
        }
    }
}

fn cursor_icon(style: CursorStyle) -> CursorIcon {
    match style {
        CursorStyle::Default => CursorIcon::Default,
        CursorStyle::Pointer => CursorIcon::PointingHand,
        CursorStyle::Grabbing => CursorIcon::Grabbing,
    }
}

fn paint_command(painter: &Painter, origin: Vec2, command: &DrawCommand) {
    match command {
        DrawCommand::Rect { rect, fill } => paint_rect(painter, rect.translate(origin), *fill),
        DrawCommand::Line {
            from,
            to,
            stroke,
            dash,
        } => {
            let points = [*from + origin, *to + origin];
            match dash {
                Some(dash) => painter.extend(Shape::dashed_line_with_offset(
                    &points,
                    *stroke,
                    &[dash.length],
                    &[dash.gap],
                    dash.offset,
                )),
                None => {
                    painter.line_segment(points, *stroke);
                }
            }
        }
        DrawCommand::Triangle { points, fill } => {
            painter.add(Shape::convex_polygon(
                points.iter().map(|point| *point + origin).collect(),
                *fill,
                Stroke::NONE,
            ));
        }
        DrawCommand::Circle {
            center,
            radius,
            fill,
        } => paint_circle(painter, *center + origin, *radius, *fill),
        DrawCommand::Arc {
            center,
            radius,
            start_angle,
            sweep,
            stroke,
            round_caps,
        } => {
            let center = *center + origin;
            if sweep.abs() >= TAU - f32::EPSILON && !round_caps {
                painter.circle_stroke(center, *radius, *stroke);
                return;
            }
            let points = arc_points(center, *radius, *start_angle, *sweep);
            if *round_caps {
                let cap = stroke.width * 0.5;
                for end in [points.first(), points.last()].into_iter().flatten() {
                    painter.circle_filled(*end, cap, stroke.color);
                }
            }
            painter.add(Shape::line(points, *stroke));
        }
        DrawCommand::Text {
            pos,
            text,
            size,
            color,
            anchor,
        } => {
            painter.text(
                *pos + origin,
                *anchor,
                text.as_str(),
                FontId::proportional(*size),
                *color,
            );
        }
    }
}

fn paint_rect(painter: &Painter, rect: Rect, fill: Fill) {
    let (top, bottom) = match fill {
        Fill::Solid(color) => {
            painter.rect_filled(rect, 0.0, color);
            return;
        }
        Fill::VerticalGradient { top, bottom } => (top, bottom),
        Fill::RadialGradient { inner, outer } => (inner, outer),
    };

    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(Shape::mesh(mesh));
}

fn paint_circle(painter: &Painter, center: Pos2, radius: f32, fill: Fill) {
    let color_at = |point: Pos2| -> Color32 {
        match fill {
            Fill::Solid(color) => color,
            Fill::RadialGradient { outer, .. } => outer,
            Fill::VerticalGradient { top, bottom } => {
                let t = ((point.y - (center.y - radius)) / (radius * 2.0)).clamp(0.0, 1.0);
                top.lerp_to_gamma(bottom, t)
            }
        }
    };
    let centre_color = match fill {
        Fill::Solid(color) => {
            painter.circle_filled(center, radius, color);
            return;
        }
        Fill::RadialGradient { inner, .. } => inner,
        Fill::VerticalGradient { .. } => color_at(center),
    };

    let rim = arc_points(center, radius, 0.0, TAU);
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, centre_color);
    for point in &rim {
        mesh.colored_vertex(*point, color_at(*point));
    }
    let count = rim.len() as u32;
    for index in 1..count {
        mesh.add_triangle(0, index, index + 1);
    }
    painter.add(Shape::mesh(mesh));
}

fn arc_points(center: Pos2, radius: f32, start_angle: f32, sweep: f32) -> Vec<Pos2> {
    let segments = ((sweep.abs() * radius / 4.0).ceil() as usize).clamp(8, 128);
    (0..=segments)
        .map(|step| {
            let angle = start_angle + sweep * step as f32 / segments as f32;
            center + egui::vec2(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn arc_points_cover_both_ends() {
        let points = arc_points(pos2(0.0, 0.0), 10.0, 0.0, TAU / 4.0);
        let first = points[0];
        let last = points[points.len() - 1];
        assert!((first - pos2(10.0, 0.0)).length() < 1e-4);
        assert!((last - pos2(0.0, 10.0)).length() < 1e-4);
        assert!(points.len() >= 9);
    }
}
