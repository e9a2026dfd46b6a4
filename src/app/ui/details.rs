use eframe::egui::{self, RichText, Ui};

use crate::engine::NodeId;
use crate::util::format_hours;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        egui::ScrollArea::vertical()
            .id_salt("details_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.draw_selection(ui);
                ui.separator();
                self.draw_project_summary(ui);
            });
    }

    fn draw_selection(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(node) = self.session.selection() else {
            ui.label("Select a phase on the canvas or in the list below.");
            return;
        };

        let selected_id = node.id.clone();
        ui.label(RichText::new(node.data.title.as_str()).strong().color(node.data.color));
        ui.small(format!(
            "{} · {} priority",
            node.data.category.label(),
            node.data.priority.label()
        ));
        ui.add_space(6.0);

        ui.label(format!("Status: {}", node.data.status.label()));
        ui.add(
            egui::ProgressBar::new(node.completion() / 100.0)
                .show_percentage()
                .desired_width(220.0),
        );
        ui.label(format!(
            "Hours: {} spent of {} estimated",
            format_hours(node.data.actual_hours),
            format_hours(node.data.estimated_hours)
        ));

        if !node.data.tasks.is_empty() {
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "Tasks ({}/{})",
                    node.completed_tasks(),
                    node.total_tasks()
                ))
                .strong(),
            );
            for task in &node.data.tasks {
                let mark = if task.completed { "[x]" } else { "[ ]" };
                ui.label(format!("{mark} {}", task.title));
            }
        }

        if !node.data.future_phases.is_empty() {
            ui.separator();
            ui.label(RichText::new("Next up").strong());
            for phase in &node.data.future_phases {
                ui.label(format!("{} ({})", phase.title, phase.estimated_duration))
                    .on_hover_text(phase.description.as_str());
            }
        }

        ui.separator();
        self.draw_path_finder(ui, &selected_id);
    }

    fn draw_path_finder(&mut self, ui: &mut Ui, selected_id: &str) {
        let graph = self.session.graph();
        let title_of = |id: &str| {
            graph
                .node(id)
                .map_or_else(|| id.to_owned(), |node| node.data.title.clone())
        };

        let current = self
            .path_target
            .as_deref()
            .map_or_else(|| "choose a phase".to_owned(), title_of);
        let mut target = self.path_target.clone();
        egui::ComboBox::from_label("Path to")
            .selected_text(current)
            .show_ui(ui, |ui| {
                for node in graph.nodes().iter().filter(|node| node.id != selected_id) {
                    ui.selectable_value(&mut target, Some(node.id.clone()), node.data.title.as_str());
                }
            });

        if let Some(target_id) = target.as_deref() {
            let path = self.session.shortest_path(selected_id, target_id);
            if path.is_empty() {
                ui.label("No connection between these phases.");
            } else {
                let hops = path.iter().map(|id| title_of(id)).collect::<Vec<_>>();
                ui.label(hops.join(" → "));
            }
        }
        self.path_target = target;
    }

    fn draw_project_summary(&mut self, ui: &mut Ui) {
        let stats = self.session.stats();

        ui.heading("Project");
        if let Some(description) = &self.record.description {
            ui.label(description.as_str());
        }
        ui.add_space(4.0);
        ui.add(
            egui::ProgressBar::new(stats.completion_percent / 100.0)
                .show_percentage()
                .desired_width(220.0),
        );
        ui.label(format!(
            "Tasks: {}/{} done",
            stats.completed_tasks, stats.total_tasks
        ));
        ui.label(format!(
            "Hours: {} spent of {} estimated",
            format_hours(stats.actual_hours),
            format_hours(stats.estimated_hours)
        ));
        for (status, count) in stats.status_counts {
            if count > 0 {
                ui.label(format!("{}: {count}", status.label()));
            }
        }

        let graph = self.session.graph();
        if !stats.critical_path.is_empty() {
            ui.separator();
            ui.label(RichText::new("Critical path").strong())
                .on_hover_text("Longest chain of prerequisites by estimated hours.");
            let titles = stats
                .critical_path
                .iter()
                .filter_map(|id| graph.node(id).map(|node| node.data.title.as_str()))
                .collect::<Vec<_>>();
            ui.label(titles.join(" → "));
        }

        ui.separator();
        ui.label(RichText::new("Phases").strong());
        let mut clicked: Option<NodeId> = None;
        for node in graph.nodes() {
            let label = format!("{}  ({:.0}%)", node.data.title, node.completion());
            if ui.link(label).clicked() {
                clicked = Some(node.id.clone());
            }
        }
        if let Some(id) = clicked {
            self.session.select(Some(id));
        }
    }
}
