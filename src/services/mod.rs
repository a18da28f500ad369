//! External service interactions
//!
//! This module contains services for interacting with external systems:
//! - Generator command construction
//! - Background job execution
//! - System clipboard

pub mod clipboard;
pub mod generator;
pub mod job_runner;

pub use clipboard::copy_to_clipboard;
pub use generator::build_generator_command;
pub use job_runner::JobRunner;
