//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

pub mod completions;
pub mod schemas;
pub mod validate;

pub use completions::handle_completions;
pub use schemas::handle_schemas;
pub use validate::handle_validate;
