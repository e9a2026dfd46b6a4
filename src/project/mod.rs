mod adapter;
mod load;
mod record;
mod sample;

pub use adapter::build_dataset;
pub use load::{load_project, parse_projects};
pub use record::{ProjectRecord, ProjectStatus};
pub use sample::sample_project;
