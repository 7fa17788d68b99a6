pub mod config;
pub mod configure;
pub mod environment;
pub mod errors;
pub mod logging;
pub mod make;
pub mod orchestrator;
pub mod probe;
pub mod runner;
pub mod stage;
pub mod ui;

pub use config::{CLASSIC_DOCS_ARCH, Config};
pub use errors::DocsError;
pub use orchestrator::Orchestrator;
pub use stage::{Stage, classic_docs_subdirs};
