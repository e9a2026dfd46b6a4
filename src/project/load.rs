use std::path::Path;

use anyhow::{Context, Result, anyhow};

use super::record::{OneOrMany, ProjectRecord};
use super::sample::sample_project;

pub fn parse_projects(raw: &str) -> Result<Vec<ProjectRecord>> {
    let parsed: OneOrMany =
        serde_json::from_str(raw).context("expected a project object or an array of projects")?;
    Ok(parsed.into_vec())
}

/// Loads the project to visualize.
///
/// Without a path the built-in sample is used. With several records in the file,
/// `project_id` picks one; otherwise the first record wins.
pub fn load_project(path: Option<&Path>, project_id: Option<&str>) -> Result<ProjectRecord> {
    let records = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read project file {}", path.display()))?;
            parse_projects(&raw)
                .with_context(|| format!("failed to parse project file {}", path.display()))?
        }
        None => vec![sample_project()],
    };

    select_project(records, project_id)
}

fn select_project(records: Vec<ProjectRecord>, project_id: Option<&str>) -> Result<ProjectRecord> {
    let available = records.len();
    let mut records = records.into_iter();
    let selected = match project_id {
        Some(wanted) => records.find(|record| record.id == wanted).ok_or_else(|| {
            anyhow!("no project with id {wanted:?} among {available} record(s)")
        })?,
        None => records
            .next()
            .ok_or_else(|| anyhow!("project file contains no records"))?,
    };

    log::info!("loaded project {:?} ({})", selected.title, selected.id);
    Ok(selected)
}
