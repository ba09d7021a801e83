//! Create command implementation.

use crate::cli::args::CreateArgs;
use crate::cli::content::read_input_content;
use crate::cli::output::{ModifyResponse, Output};
use crate::error::Result;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &CreateArgs, output: &Output) -> Result<()> {
    let path = vault.normalize_note_path(&args.path)?;
    let content = read_input_content(&args.source)?.unwrap_or_default();

    vault.create_note(&path, &content, args.force)?;
    output.print(&ModifyResponse::new(&path, "Note created"))
}
