use eframe::egui::{self, RichText, Sense, Ui, vec2};

use crate::engine::render::palette::{category_color, dim_color, status_gradient};
use crate::engine::{LayoutConfig, NodeCategory, NodeStatus, ViewMode};

use super::super::ViewModel;

fn swatch(ui: &mut Ui, color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 6.0, color);
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("View Controls");
        ui.separator();
        ui.add_space(4.0);

        let surface = self.session.surface_mut();

        ui.label("Search phases")
            .on_hover_text("Fuzzy-match phase titles; labels of other phases are dimmed.");
        ui.text_edit_singleline(&mut surface.search);

        ui.separator();
        ui.horizontal_wrapped(|ui| {
            for mode in ViewMode::ALL {
                ui.selectable_value(&mut surface.view_mode, mode, mode.label());
            }
        });

        ui.separator();
        ui.checkbox(&mut surface.animating, "Animate")
            .on_hover_text("Pause to freeze pulsing, flowing edges and the drifting grid.");
        ui.checkbox(&mut surface.fullscreen, "Fullscreen");

        ui.separator();
        ui.label(RichText::new("Categories").strong());
        for category in NodeCategory::ALL {
            let shown = surface.shows_category(category);
            ui.horizontal(|ui| {
                let color = category_color(category);
                swatch(ui, if shown { color } else { dim_color(color, 0.35) });
                let mut checked = shown;
                if ui.checkbox(&mut checked, category.label()).changed() {
                    surface.toggle_category(category);
                }
            });
        }

        ui.separator();
        ui.label(RichText::new("Status").strong());
        for status in NodeStatus::ALL {
            ui.horizontal(|ui| {
                swatch(ui, status_gradient(status).1);
                ui.label(status.label());
            });
        }

        ui.separator();
        ui.collapsing("Layout tuning", |ui| {
            let layout = self.session.layout_config_mut();
            ui.add(egui::Slider::new(&mut layout.iterations, 10..=600).text("Iterations"))
                .on_hover_text("Number of simulation steps in one layout pass.");
            ui.add(
                egui::Slider::new(&mut layout.alpha, 0.01..=1.0)
                    .text("Alpha")
                    .clamping(egui::SliderClamping::Always),
            );
            ui.add(
                egui::Slider::new(&mut layout.alpha_decay, 0.0..=0.2)
                    .text("Alpha decay")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("How quickly the simulation cools between steps.");
            ui.add(
                egui::Slider::new(&mut layout.repulsion, -5000.0..=-50.0)
                    .text("Repulsion")
                    .clamping(egui::SliderClamping::Always),
            );
            ui.add(
                egui::Slider::new(&mut layout.attraction, 0.001..=0.1)
                    .logarithmic(true)
                    .text("Attraction")
                    .clamping(egui::SliderClamping::Always),
            );
            if ui.button("Reset defaults").clicked() {
                *layout = LayoutConfig::default();
            }
        });

        if ui
            .button("Re-layout")
            .on_hover_text("Run a full layout pass with the current parameters.")
            .clicked()
        {
            let iterations = self.session.relayout();
            log::info!("re-layout finished after {iterations} iterations");
        }
    }
}
