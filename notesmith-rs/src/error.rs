//! Error types and exit codes for notesmith.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const NOTE_ALREADY_EXISTS: i32 = 3;
    pub const TARGET_NOT_FOUND: i32 = 4;
    pub const MALFORMED_INPUT: i32 = 5;
}

/// Broad classification of a [`NoteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The note or the patch target does not exist.
    NotFound,
    /// The input (document, target, path, date) cannot be used as given.
    Malformed,
    /// The operation collides with existing state.
    Conflict,
    /// Storage or serialization failure.
    Io,
    /// Configuration is missing or invalid.
    Config,
}

/// Main error type for notesmith operations.
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Note already exists: {0}")]
    NoteAlreadyExists(PathBuf),

    #[error("Heading not found: {0}")]
    HeadingNotFound(String),

    #[error("Block not found: ^{0}")]
    BlockNotFound(String),

    #[error("Frontmatter field not found: {0}")]
    FrontmatterFieldNotFound(String),

    #[error("Note has no frontmatter block")]
    FrontmatterNotFound,

    #[error("Frontmatter opening fence is never closed")]
    UnterminatedFrontmatterFence,

    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Invalid patch target: {0}")]
    InvalidTarget(String),

    #[error("Cannot {operation} {target}: {reason}")]
    InvalidOperation {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("Invalid note path: {0}")]
    InvalidPath(PathBuf),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No content provided")]
    NoContentProvided,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Note is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl NoteError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NoteError::NoteNotFound(_)
            | NoteError::HeadingNotFound(_)
            | NoteError::BlockNotFound(_)
            | NoteError::FrontmatterFieldNotFound(_)
            | NoteError::FrontmatterNotFound
            | NoteError::TemplateNotFound(_) => ErrorKind::NotFound,
            NoteError::UnterminatedFrontmatterFence
            | NoteError::InvalidTarget(_)
            | NoteError::InvalidOperation { .. }
            | NoteError::InvalidPath(_)
            | NoteError::InvalidDate(_)
            | NoteError::NoContentProvided
            | NoteError::Utf8(_) => ErrorKind::Malformed,
            NoteError::NoteAlreadyExists(_) => ErrorKind::Conflict,
            NoteError::VaultNotFound(_)
            | NoteError::ConfigError(_)
            | NoteError::InvalidConfig(_) => ErrorKind::Config,
            NoteError::Io(_)
            | NoteError::Yaml(_)
            | NoteError::Json(_)
            | NoteError::TomlParse(_)
            | NoteError::TomlSerialize(_)
            | NoteError::GlobPattern(_) => ErrorKind::Io,
        }
    }

    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            NoteError::NoteNotFound(_) => exit_code::NOTE_NOT_FOUND,
            NoteError::NoteAlreadyExists(_) => exit_code::NOTE_ALREADY_EXISTS,
            _ => match self.kind() {
                ErrorKind::NotFound => exit_code::TARGET_NOT_FOUND,
                ErrorKind::Malformed => exit_code::MALFORMED_INPUT,
                _ => exit_code::GENERAL_ERROR,
            },
        }
    }

    pub(crate) fn invalid_operation(
        operation: impl std::fmt::Display,
        target: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        NoteError::InvalidOperation {
            operation: operation.to_string(),
            target: target.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for notesmith operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    NoteNotFound,
    NoteAlreadyExists,
    TargetNotFound,
    MalformedInput,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::NoteNotFound => exit_code::NOTE_NOT_FOUND,
            ExitCode::NoteAlreadyExists => exit_code::NOTE_ALREADY_EXISTS,
            ExitCode::TargetNotFound => exit_code::TARGET_NOT_FOUND,
            ExitCode::MalformedInput => exit_code::MALFORMED_INPUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds() {
        assert_eq!(
            NoteError::HeadingNotFound("A::B".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(NoteError::BlockNotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(NoteError::FrontmatterNotFound.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            NoteError::NoteNotFound(PathBuf::from("a.md")).exit_code(),
            exit_code::NOTE_NOT_FOUND
        );
        assert_eq!(
            NoteError::BlockNotFound("x".into()).exit_code(),
            exit_code::TARGET_NOT_FOUND
        );
        assert_eq!(
            NoteError::UnterminatedFrontmatterFence.exit_code(),
            exit_code::MALFORMED_INPUT
        );
        assert_eq!(
            NoteError::ConfigError("nope".into()).exit_code(),
            exit_code::GENERAL_ERROR
        );
    }

    #[test]
    fn test_invalid_operation_message() {
        let err = NoteError::invalid_operation("prepend", "frontmatter field 'status'", "not supported");
        assert_eq!(
            err.to_string(),
            "Cannot prepend frontmatter field 'status': not supported"
        );
    }
}
