use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    OnHold,
    Blocked,
    Completed,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Active => "Active",
            Self::OnHold => "On hold",
            Self::Blocked => "Blocked",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub progress: f32,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum OneOrMany {
    One(ProjectRecord),
    Many(Vec<ProjectRecord>),
}

impl OneOrMany {
    pub(super) fn into_vec(self) -> Vec<ProjectRecord> {
        match self {
            Self::One(record) => vec![record],
            Self::Many(records) => records,
        }
    }
}
