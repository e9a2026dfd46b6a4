use super::record::{ProjectRecord, ProjectStatus};

pub fn sample_project() -> ProjectRecord {
    ProjectRecord {
        id: "sample-storefront".to_owned(),
        title: "Storefront Relaunch".to_owned(),
        status: ProjectStatus::Active,
        progress: 46.0,
        technologies: [
            "React",
            "Node.js",
            "PostgreSQL",
            "Docker",
            "AWS",
            "React Native",
        ]
        .map(str::to_owned)
        .to_vec(),
        description: Some(
            "Rebuild of the customer storefront with a shared API and a companion mobile app."
                .to_owned(),
        ),
    }
}
