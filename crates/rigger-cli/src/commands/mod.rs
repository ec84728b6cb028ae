//! Command implementations for the Rigger CLI.
//!
//! - [`assemble`] - Assemble and emit the pipeline configuration
//! - [`check`] - Validate the environment and summarize the project layout

pub mod assemble;
pub mod check;
pub(crate) mod utils;

pub use assemble::execute as assemble_execute;
pub use check::execute as check_execute;
