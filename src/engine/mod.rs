pub mod config;
pub mod graph;
pub mod interaction;
pub mod layout;
pub mod particles;
pub mod paths;
pub mod render;
pub mod search;
pub mod session;
pub mod stats;

pub use config::{LayoutConfig, SurfaceConfig, ViewMode};
pub use graph::{
    EdgeKind, EdgeSeed, GraphDataset, GraphEdge, GraphError, GraphNode, GraphStore, NodeCategory,
    NodeData, NodeId, NodeSeed, NodeStatus, Priority,
};
pub use interaction::{CursorStyle, InteractionState};
pub use render::{DrawCommand, FrameInput, render_frame};
pub use session::GraphSession;
pub use stats::ProjectStats;
