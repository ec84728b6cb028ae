//! Rigger CLI - assembles bundler pipeline configurations for web applications.
//!
//! This crate exposes the `rigger` command-line interface on top of
//! [`rigger_config`]. It loads a project's environment, assembles the pipeline
//! configuration for the requested mode, and either writes it out as JSON or
//! summarizes it.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - `assemble` and `check`
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages for the terminal

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
