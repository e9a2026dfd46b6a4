pub mod app;
pub mod engine;
pub mod project;
pub mod util;
