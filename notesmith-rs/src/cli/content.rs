//! Reading command payloads.

use crate::cli::args::ContentArgs;
use crate::error::{NoteError, Result};
use std::io::{self, Read};

/// Read the payload from `--content`, `--file` or `--stdin`, if any was given.
pub fn read_input_content(source: &ContentArgs) -> Result<Option<String>> {
    if let Some(content) = &source.content {
        // Unescape newlines
        Ok(Some(content.replace("\\n", "\n")))
    } else if let Some(path) = &source.file {
        Ok(Some(std::fs::read_to_string(path)?))
    } else if source.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(Some(buffer))
    } else {
        Ok(None)
    }
}

/// Like [`read_input_content`], but a payload is mandatory.
pub fn require_content(source: &ContentArgs) -> Result<String> {
    read_input_content(source)?.ok_or(NoteError::NoContentProvided)
}
