//! Command resolution, redirection handling, and pipeline execution: the
//! bridge between parsed `Command`s and the host OS.

pub mod command_resolution;
pub mod errors;
pub mod executable;
pub mod pipeline_execution;
pub mod redirections;

pub use errors::ShellError;
pub use pipeline_execution::run_pipeline;
