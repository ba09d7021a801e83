//! Append command implementation.

use crate::cli::args::AppendArgs;
use crate::cli::content::require_content;
use crate::cli::output::{ModifyResponse, Output};
use crate::error::Result;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &AppendArgs, output: &Output) -> Result<()> {
    let path = vault.normalize_note_path(&args.path)?;
    let content = require_content(&args.source)?;

    vault.append_note(&path, &content)?;
    output.print(&ModifyResponse::new(&path, "Content appended"))
}
