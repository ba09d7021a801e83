//! Periodic note command implementation.

use crate::cli::args::DailyArgs;
use crate::cli::content::require_content;
use crate::cli::output::{ModifyResponse, Output};
use crate::error::Result;
use crate::periodic::parse_date;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &DailyArgs, output: &Output) -> Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let content = require_content(&args.source)?;

    let note = vault.append_periodic(args.period, date, &content)?;
    let message = format!("Appended to {} note", args.period);
    output.print(&ModifyResponse::new(&note.path, message))
}
