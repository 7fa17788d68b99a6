pub mod clean;
pub mod pipeline;

pub use clean::clean;
pub use pipeline::Orchestrator;
