mod errors;
mod orchestrator;
mod preparation;
mod reader;
mod retry;
mod skip_policy;

pub use errors::PipelineError;
pub use orchestrator::{ChunkOrchestrator, RunReport};
pub use retry::LoggingRetryObserver;
