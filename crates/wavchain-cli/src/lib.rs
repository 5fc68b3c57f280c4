//! wavchain CLI library.
//!
//! This crate wires the configuration language and the audio core together:
//! the [`Pipeline`] orchestrator, the [`ProcessorError`] taxonomy with its
//! exit codes, the help text and the run report printed by the `wavchain`
//! binary.

pub mod error;
pub mod help;
pub mod pipeline;
pub mod report;

pub use error::{ErrorKind, ProcessorError, ProcessorResult};
pub use pipeline::Pipeline;
pub use report::PipelineReport;
