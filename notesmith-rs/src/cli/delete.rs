//! Delete command implementation.

use crate::cli::args::DeleteArgs;
use crate::cli::output::{ModifyResponse, Output};
use crate::error::Result;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &DeleteArgs, output: &Output) -> Result<()> {
    let path = vault.normalize_note_path(&args.path)?;
    vault.delete_note(&path)?;
    output.print(&ModifyResponse::new(&path, "Note deleted"))
}
