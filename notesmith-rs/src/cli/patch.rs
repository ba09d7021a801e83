//! Patch command implementation.

use crate::cli::args::PatchArgs;
use crate::cli::content::require_content;
use crate::cli::output::{DryRunResponse, ModifyResponse, Output};
use crate::error::{NoteError, Result};
use crate::patch::PatchTarget;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &PatchArgs, output: &Output) -> Result<()> {
    let path = vault.normalize_note_path(&args.path)?;
    let (kind, raw_target) = args
        .target()
        .ok_or_else(|| NoteError::InvalidTarget("no target given".to_string()))?;
    let target = PatchTarget::parse(kind, raw_target, &args.delimiter)?;
    let content = require_content(&args.source)?;

    if args.dry_run {
        let preview = vault.preview_patch(&path, &target, args.operation, &content)?;
        let response = DryRunResponse {
            action: format!("{} {}", args.operation, target),
            path: path.to_string_lossy().to_string(),
            content: preview,
        };
        output.info("Dry run: note not modified");
        return output.print(&response);
    }

    vault.patch_note(&path, &target, args.operation, &content)?;
    let message = format!("Applied {} to {}", args.operation, target);
    output.print(&ModifyResponse::new(&path, message))
}
