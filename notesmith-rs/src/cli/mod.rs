//! CLI command implementations.

pub mod args;
pub mod output;

pub mod append;
pub mod content;
pub mod create;
pub mod daily;
pub mod delete;
pub mod get;
pub mod list;
pub mod patch;
pub mod search;

pub use args::{Cli, Commands};
pub use output::Output;
