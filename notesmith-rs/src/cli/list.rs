//! List command implementation.

use crate::cli::args::ListArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::vault::Vault;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub notes: Vec<String>,
    pub total: usize,
}

pub fn run(vault: &Vault, args: &ListArgs, output: &Output) -> Result<()> {
    let prefix = args
        .path
        .as_deref()
        .map(|p| PathBuf::from(p.trim().trim_end_matches('/')));

    let notes: Vec<String> = vault
        .list_notes(prefix.as_deref())?
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect();

    let response = ListResponse {
        total: notes.len(),
        notes,
    };
    output.print(&response)
}
