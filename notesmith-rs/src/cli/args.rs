//! CLI argument definitions using clap.

use crate::patch::{DEFAULT_HEADING_DELIMITER, PatchOperation, TargetKind};
use crate::periodic::Period;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notesmith")]
#[command(author, version, about = "Read, search and surgically edit a folder of markdown notes", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides $NOTESMITH_VAULT and the config file)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search note contents
    Search(SearchArgs),

    /// Show a note with its parsed structure
    Get(GetArgs),

    /// List notes in the vault or a folder
    List(ListArgs),

    /// Create a note
    Create(CreateArgs),

    /// Append content to the end of a note (creates it when missing)
    Append(AppendArgs),

    /// Edit a note under a heading, at a block, or on a frontmatter field
    Patch(PatchArgs),

    /// Append to a periodic note (creates it when missing)
    Daily(DailyArgs),

    /// Delete a note
    Delete(DeleteArgs),
}

/// Where a command reads its payload from.
#[derive(Args, Debug, Clone, Default)]
#[group(id = "source", multiple = false)]
pub struct ContentArgs {
    /// Content given inline (`\n` is unescaped)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Read content from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Read content from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

// === Search ===

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to search for (case-insensitive)
    pub query: String,

    /// Maximum number of results (config default when omitted)
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Snippet width in characters (config default when omitted)
    #[arg(short = 'c', long)]
    pub context_length: Option<usize>,
}

// === Get ===

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Path to the note (relative to vault, `.md` optional)
    pub path: String,

    /// Omit the note content
    #[arg(short, long)]
    pub metadata_only: bool,

    /// Truncate content to this many characters
    #[arg(long)]
    pub max_chars: Option<usize>,
}

// === List ===

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Folder to list (vault root when omitted)
    pub path: Option<String>,
}

// === Create ===

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Path for the new note (relative to vault)
    pub path: String,

    #[command(flatten)]
    pub source: ContentArgs,

    /// Overwrite an existing note
    #[arg(long)]
    pub force: bool,
}

// === Append ===

#[derive(Parser, Debug)]
pub struct AppendArgs {
    /// Path to the note (relative to vault)
    pub path: String,

    #[command(flatten)]
    pub source: ContentArgs,
}

// === Patch ===

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["heading", "frontmatter", "block"])))]
pub struct PatchArgs {
    /// Path to the note (relative to vault)
    pub path: String,

    /// Heading path, e.g. "Project::Tasks"
    #[arg(long)]
    pub heading: Option<String>,

    /// Frontmatter key
    #[arg(long)]
    pub frontmatter: Option<String>,

    /// Block id (with or without the leading ^)
    #[arg(long)]
    pub block: Option<String>,

    /// How to apply the content
    #[arg(short, long, value_enum, default_value = "append")]
    pub operation: PatchOperation,

    /// Separator between heading names
    #[arg(long, default_value = DEFAULT_HEADING_DELIMITER)]
    pub delimiter: String,

    #[command(flatten)]
    pub source: ContentArgs,

    /// Print the patched note instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl PatchArgs {
    /// The target kind and raw target string chosen on the command line.
    pub fn target(&self) -> Option<(TargetKind, &str)> {
        if let Some(h) = &self.heading {
            Some((TargetKind::Heading, h))
        } else if let Some(f) = &self.frontmatter {
            Some((TargetKind::Frontmatter, f))
        } else {
            self.block.as_deref().map(|b| (TargetKind::Block, b))
        }
    }
}

// === Daily ===

#[derive(Parser, Debug)]
pub struct DailyArgs {
    /// Date as YYYY-MM-DD (today when omitted)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Which periodic note to write to
    #[arg(short, long, value_enum, default_value = "daily")]
    pub period: Period,

    #[command(flatten)]
    pub source: ContentArgs,
}

// === Delete ===

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Path to the note to delete
    pub path: String,
}
