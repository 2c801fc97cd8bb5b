pub(crate) mod context;
pub(crate) mod filter_graph;
pub(crate) mod pipeline;
pub(crate) mod pipeline_error;
pub(crate) mod render_options;
pub(crate) mod steps;

pub use context::{ProcessingContext, ScratchDir};
pub use filter_graph::{FilterGraph, FilterNode};
pub use pipeline::Pipeline;
pub use pipeline_error::PipelineError;
pub use render_options::RenderOptions;
pub use steps::{default_profile, TransformStep};
