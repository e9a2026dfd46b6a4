use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Align, Context, Layout, ViewportCommand};

use crate::engine::{GraphSession, LayoutConfig, NodeId, SurfaceConfig};
use crate::project::{ProjectRecord, build_dataset, load_project};

mod canvas;
mod ui;

#[derive(Clone, Debug)]
pub struct LaunchOptions {
    pub project_path: Option<PathBuf>,
    pub project_id: Option<String>,
    pub layout: LayoutConfig,
    pub surface: SurfaceConfig,
    pub seed: u64,
}

pub struct RoadmapApp {
    options: LaunchOptions,
    state: AppState,
    reload_rx: Option<Receiver<Result<ProjectRecord, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<ProjectRecord, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    record: ProjectRecord,
    session: GraphSession,
    path_target: Option<NodeId>,
    fullscreen_applied: bool,
}

impl RoadmapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: LaunchOptions) -> Self {
        let state = Self::start_load(&options);
        Self {
            options,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(options: &LaunchOptions) -> Receiver<Result<ProjectRecord, String>> {
        let (tx, rx) = mpsc::channel();
        let path = options.project_path.clone();
        let project_id = options.project_id.clone();

        thread::spawn(move || {
            let result = load_project(path.as_deref(), project_id.as_deref())
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(options: &LaunchOptions) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(options),
        }
    }
}

impl eframe::App for RoadmapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(record)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            record,
                            &self.options,
                        ))));
                    }
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading project...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load project");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(&self.options));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(&self.options));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(record)) => model.replace_project(record),
                        Ok(Err(error)) => transition = Some(AppState::Error(error)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(record: ProjectRecord, options: &LaunchOptions) -> Self {
        let dataset = build_dataset(&record, options.surface.size());
        let session = GraphSession::new(
            dataset,
            options.surface.clone(),
            options.layout,
            options.seed,
        );
        Self {
            record,
            session,
            path_target: None,
            fullscreen_applied: options.surface.fullscreen,
        }
    }

    fn replace_project(&mut self, record: ProjectRecord) {
        let dataset = build_dataset(&record, self.session.surface().size());
        self.session.rebuild(dataset);
        if self
            .path_target
            .as_deref()
            .is_some_and(|id| self.session.graph().node(id).is_none())
        {
            self.path_target = None;
        }
        self.record = record;
    }

    fn show(&mut self, ctx: &Context, reload_requested: &mut bool, is_reloading: bool) {
        let fullscreen = self.session.surface().fullscreen;
        if fullscreen != self.fullscreen_applied {
            ctx.send_viewport_cmd(ViewportCommand::Fullscreen(fullscreen));
            self.fullscreen_applied = fullscreen;
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(self.record.title.as_str());
                    ui.separator();
                    ui.label(format!("status: {}", self.record.status.label()));
                    ui.label(format!("progress: {:.0}%", self.record.progress));
                    ui.label(format!("phases: {}", self.session.graph().len()));
                    ui.label(format!("links: {}", self.session.graph().edges().len()));
                    let reload_button =
                        ui.add_enabled(!is_reloading, egui::Button::new("Reload project"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if is_reloading {
                            ui.spinner();
                        }
                        ui.label(self.record.id.as_str());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_canvas(ui));

        if self.session.needs_repaint() {
            ctx.request_repaint();
        }
    }
}
