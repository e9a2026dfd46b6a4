use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Pos2, Vec2, pos2};

use crate::engine::graph::{
    EdgeKind, EdgeSeed, FuturePhase, GraphDataset, NodeCategory, NodeData, NodeSeed, NodeStatus,
    Priority, Task, base_radius, clamp_to_bounds,
};
use crate::engine::render::palette::category_color;
use crate::util::{slugify, stable_pair};

use super::record::{ProjectRecord, ProjectStatus};

const RING_FRACTION: f32 = 0.35;
const RING_JITTER: f32 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TechFamily {
    Database,
    Frontend,
    Backend,
    Mobile,
    Infrastructure,
}

fn tech_family(name: &str) -> Option<TechFamily> {
    let family = match name.trim().to_ascii_lowercase().as_str() {
        "postgresql" | "postgres" | "mysql" | "mariadb" | "sqlite" | "mongodb" | "redis"
        | "supabase" | "firebase" | "dynamodb" => TechFamily::Database,
        "react native" | "flutter" | "swift" | "swiftui" | "kotlin" | "ionic" | "expo" => {
            TechFamily::Mobile
        }
        "react" | "vue" | "vue.js" | "angular" | "svelte" | "next.js" | "nuxt" | "solidjs"
        | "tailwind" | "html" | "css" => TechFamily::Frontend,
        "node.js" | "node" | "express" | "django" | "flask" | "fastapi" | "rails" | "spring"
        | "go" | "rust" | "axum" | "actix" | "laravel" | "graphql" => TechFamily::Backend,
        "aws" | "gcp" | "azure" | "docker" | "kubernetes" | "terraform" | "vercel" | "netlify"
        | "heroku" => TechFamily::Infrastructure,
        _ => return None,
    };
    Some(family)
}

struct PhaseTemplate {
    title: &'static str,
    category: NodeCategory,
    priority: Priority,
    estimated_hours: f32,
    tasks: &'static [&'static str],
}

const DISCOVERY: PhaseTemplate = PhaseTemplate {
    title: "Discovery",
    category: NodeCategory::Planning,
    priority: Priority::High,
    estimated_hours: 16.0,
    tasks: &["Stakeholder interviews", "Define scope", "Success metrics"],
};

const DESIGN: PhaseTemplate = PhaseTemplate {
    title: "Design",
    category: NodeCategory::Planning,
    priority: Priority::High,
    estimated_hours: 24.0,
    tasks: &["Wireframes", "Architecture review", "Design sign-off"],
};

const DATABASE: PhaseTemplate = PhaseTemplate {
    title: "Database",
    category: NodeCategory::Database,
    priority: Priority::High,
    estimated_hours: 20.0,
    tasks: &["Schema design", "Migrations", "Seed data"],
};

const FRONTEND: PhaseTemplate = PhaseTemplate {
    title: "Frontend",
    category: NodeCategory::Frontend,
    priority: Priority::Medium,
    estimated_hours: 40.0,
    tasks: &[
        "Component library",
        "Routing",
        "State management",
        "Responsive layout",
    ],
};

const BACKEND: PhaseTemplate = PhaseTemplate {
    title: "Backend API",
    category: NodeCategory::Backend,
    priority: Priority::Critical,
    estimated_hours: 40.0,
    tasks: &["API contract", "Authentication", "Core endpoints", "Error handling"],
};

const MOBILE: PhaseTemplate = PhaseTemplate {
    title: "Mobile App",
    category: NodeCategory::Mobile,
    priority: Priority::Medium,
    estimated_hours: 48.0,
    tasks: &["Navigation shell", "Offline storage", "Store listing"],
};

const INFRASTRUCTURE: PhaseTemplate = PhaseTemplate {
    title: "Infrastructure",
    category: NodeCategory::Infrastructure,
    priority: Priority::Medium,
    estimated_hours: 16.0,
    tasks: &["CI pipeline", "Environments", "Monitoring"],
};

const TESTING: PhaseTemplate = PhaseTemplate {
    title: "Testing",
    category: NodeCategory::Quality,
    priority: Priority::High,
    estimated_hours: 24.0,
    tasks: &["Unit tests", "Integration tests", "QA pass"],
};

const DEPLOYMENT: PhaseTemplate = PhaseTemplate {
    title: "Deployment",
    category: NodeCategory::Release,
    priority: Priority::Critical,
    estimated_hours: 8.0,
    tasks: &["Release checklist", "Production deploy"],
};

/// Prerequisite pairs by template title. Pairs naming a phase the project did
/// not generate are dropped when the graph is built.
const PREREQUISITES: &[(&str, &str, EdgeKind, f32)] = &[
    ("Discovery", "Design", EdgeKind::Dependency, 1.0),
    ("Design", "Database", EdgeKind::Dependency, 1.0),
    ("Design", "Frontend", EdgeKind::Dependency, 1.0),
    ("Design", "Backend API", EdgeKind::Dependency, 1.0),
    ("Design", "Mobile App", EdgeKind::Dependency, 1.0),
    ("Database", "Backend API", EdgeKind::Dependency, 1.0),
    ("Backend API", "Frontend", EdgeKind::Dependency, 1.0),
    ("Backend API", "Mobile App", EdgeKind::Dependency, 1.0),
    ("Database", "Infrastructure", EdgeKind::Parallel, 0.5),
    ("Design", "Testing", EdgeKind::Conditional, 2.0),
    ("Frontend", "Testing", EdgeKind::Dependency, 1.0),
    ("Backend API", "Testing", EdgeKind::Dependency, 1.0),
    ("Mobile App", "Testing", EdgeKind::Dependency, 1.0),
    ("Infrastructure", "Deployment", EdgeKind::Dependency, 1.0),
    ("Mobile App", "Deployment", EdgeKind::Conditional, 1.5),
    ("Testing", "Deployment", EdgeKind::Dependency, 1.0),
];

fn phases_for(record: &ProjectRecord) -> Vec<(&'static PhaseTemplate, String)> {
    let families = record
        .technologies
        .iter()
        .filter_map(|name| tech_family(name).map(|family| (family, name.trim())))
        .collect::<Vec<_>>();
    let first = |wanted: TechFamily| {
        families
            .iter()
            .find(|(family, _)| *family == wanted)
            .map(|(_, name)| *name)
    };

    let mut phases = vec![
        (&DISCOVERY, DISCOVERY.title.to_owned()),
        (&DESIGN, DESIGN.title.to_owned()),
    ];
    if first(TechFamily::Database).is_some() {
        phases.push((&DATABASE, DATABASE.title.to_owned()));
    }
    if let Some(name) = first(TechFamily::Frontend) {
        phases.push((&FRONTEND, name.to_owned()));
    }
    if first(TechFamily::Backend).is_some() {
        phases.push((&BACKEND, BACKEND.title.to_owned()));
    }
    if first(TechFamily::Mobile).is_some() {
        phases.push((&MOBILE, MOBILE.title.to_owned()));
    }
    if first(TechFamily::Infrastructure).is_some() {
        phases.push((&INFRASTRUCTURE, INFRASTRUCTURE.title.to_owned()));
    }
    phases.push((&TESTING, TESTING.title.to_owned()));
    phases.push((&DEPLOYMENT, DEPLOYMENT.title.to_owned()));
    phases
}

fn phase_progress(progress: f32, index: usize, count: usize) -> f32 {
    let share = 100.0 / count.max(1) as f32;
    ((progress - index as f32 * share) / share * 100.0).clamp(0.0, 100.0)
}

/// Tasks ticked off for a phase at `progress`. Partly done phases always show
/// at least one finished task and at least one open one.
fn done_tasks(progress: f32, total: usize) -> usize {
    if progress >= 100.0 {
        return total;
    }
    if progress <= 0.0 || total == 0 {
        return 0;
    }
    let done = ((progress / 100.0) * total as f32).floor() as usize;
    done.clamp(1, total.saturating_sub(1).max(1))
}

fn phase_node(template: &PhaseTemplate, title: String, order: usize, progress: f32) -> NodeData {
    let total = template.tasks.len();
    let done = done_tasks(progress, total);
    let tasks = template
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| Task {
            title: (*task).to_owned(),
            completed: index < done,
            priority: template.priority,
        })
        .collect();

    let status = if progress >= 100.0 {
        NodeStatus::Completed
    } else if progress > 0.0 {
        NodeStatus::InProgress
    } else {
        NodeStatus::Upcoming
    };

    let mut data = NodeData::new(title, template.category)
        .with_status(status)
        .with_priority(template.priority)
        .with_completion(done as f32 / total.max(1) as f32 * 100.0)
        .with_tasks(tasks);
    data.estimated_hours = template.estimated_hours;
    data.actual_hours = (template.estimated_hours * progress / 100.0 * 2.0).round() / 2.0;
    data.color = category_color(template.category);
    data.phase_order = order;
    data
}

fn post_launch_phases() -> Vec<FuturePhase> {
    vec![
        FuturePhase {
            title: "Post-launch monitoring".to_owned(),
            description: "Watch error rates and performance after release.".to_owned(),
            estimated_duration: "2 weeks".to_owned(),
        },
        FuturePhase {
            title: "Feature iteration".to_owned(),
            description: "Prioritise feedback collected from the first users.".to_owned(),
            estimated_duration: "1 month".to_owned(),
        },
    ]
}

fn ring_position(id: &str, index: usize, count: usize, radius: f32, bounds: Vec2) -> Pos2 {
    let centre = (bounds * 0.5).to_pos2();
    let ring = bounds.min_elem() * RING_FRACTION;
    let angle = -FRAC_PI_2 + TAU * index as f32 / count.max(1) as f32;
    let (jx, jy) = stable_pair(id);
    let at = pos2(
        centre.x + angle.cos() * ring + jx * RING_JITTER,
        centre.y + angle.sin() * ring + jy * RING_JITTER,
    );
    clamp_to_bounds(at, radius, bounds)
}

pub fn build_dataset(record: &ProjectRecord, bounds: Vec2) -> GraphDataset {
    let progress = match record.status {
        ProjectStatus::Completed => 100.0,
        _ => record.progress.clamp(0.0, 100.0),
    };

    let phases = phases_for(record);
    let count = phases.len();
    let mut ids_by_template = HashMap::with_capacity(count);

    let mut nodes = phases
        .into_iter()
        .enumerate()
        .map(|(order, (template, title))| {
            let id = slugify(&title);
            ids_by_template.insert(template.title, id.clone());
            let mut data = phase_node(template, title, order, phase_progress(progress, order, count));
            if template.title == DEPLOYMENT.title {
                data.future_phases = post_launch_phases();
            }
            let radius = base_radius(data.category, data.priority);
            NodeSeed {
                position: Some(ring_position(&id, order, count, radius, bounds)),
                id,
                data,
            }
        })
        .collect::<Vec<_>>();

    let stalled = match record.status {
        ProjectStatus::Blocked => Some(NodeStatus::Blocked),
        ProjectStatus::OnHold => Some(NodeStatus::Delayed),
        _ => None,
    };
    if let Some(stalled) = stalled {
        if let Some(node) = nodes
            .iter_mut()
            .find(|node| node.data.status != NodeStatus::Completed)
        {
            node.data.status = stalled;
        }
    }

    let resolve = |title: &str| {
        ids_by_template
            .get(title)
            .cloned()
            .unwrap_or_else(|| slugify(title))
    };
    let edges = PREREQUISITES
        .iter()
        .map(|&(source, target, kind, weight)| EdgeSeed {
            source_id: resolve(source),
            target_id: resolve(target),
            weight,
            kind,
            animated: kind == EdgeKind::Dependency,
        })
        .collect();

    log::debug!(
        "adapted project {} into {count} phases at {progress:.0}% overall",
        record.id
    );

    GraphDataset { nodes, edges }
}
