//! Search command implementation.

use crate::cli::args::SearchArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::search::{SearchOptions, SearchResult};
use crate::vault::Vault;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total: usize,
}

pub fn run(vault: &Vault, args: &SearchArgs, output: &Output) -> Result<()> {
    let defaults = vault.config().search;
    let options = SearchOptions {
        max_results: args.max_results.unwrap_or(defaults.max_results),
        context_length: args.context_length.unwrap_or(defaults.context_length),
        ..defaults
    };

    let results = vault.search(&args.query, &options)?;
    let response = SearchResponse {
        query: args.query.clone(),
        total: results.len(),
        results,
    };
    output.print(&response)
}
