//! Periodic (daily, weekly, ...) note naming.

use crate::error::{NoteError, Result};
use crate::storage::validate_relative_path;
use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Granularity of a periodic note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    /// Filename pattern used when none is configured.
    ///
    /// `%Q` stands for the calendar quarter (1-4).
    pub fn default_format(self) -> &'static str {
        match self {
            Period::Daily => "%Y-%m-%d",
            Period::Weekly => "%G-W%V",
            Period::Monthly => "%Y-%m",
            Period::Quarterly => "%Y-Q%Q",
            Period::Yearly => "%Y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
        };
        f.write_str(name)
    }
}

/// Naming convention for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodSettings {
    /// Folder relative to the vault root (vault root when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,
    /// strftime pattern for the file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Note used as the initial body of a new periodic note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

/// Settings for every period, as found under `[periodic]` in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodicConfig {
    pub daily: PeriodSettings,
    pub weekly: PeriodSettings,
    pub monthly: PeriodSettings,
    pub quarterly: PeriodSettings,
    pub yearly: PeriodSettings,
}

impl PeriodicConfig {
    pub fn settings(&self, period: Period) -> &PeriodSettings {
        match period {
            Period::Daily => &self.daily,
            Period::Weekly => &self.weekly,
            Period::Monthly => &self.monthly,
            Period::Quarterly => &self.quarterly,
            Period::Yearly => &self.yearly,
        }
    }
}

/// Format `date` with a strftime pattern that may also contain `%Q`.
pub fn format_period_date(format: &str, date: NaiveDate) -> Result<String> {
    let quarter = date.month0() / 3 + 1;
    let pattern = format.replace("%Q", &quarter.to_string());

    if pattern.trim().is_empty() {
        return Err(NoteError::InvalidConfig("empty periodic note format".to_string()));
    }
    if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
        return Err(NoteError::InvalidConfig(format!(
            "invalid periodic note format '{}'",
            format
        )));
    }

    Ok(date.format(&pattern).to_string())
}

/// Vault-relative path of the periodic note for `date`.
pub fn resolve_periodic_path(
    settings: &PeriodSettings,
    period: Period,
    date: NaiveDate,
) -> Result<PathBuf> {
    let format = settings
        .format
        .as_deref()
        .unwrap_or_else(|| period.default_format());
    let name = format_period_date(format, date)?;

    let path = match &settings.folder {
        Some(folder) => folder.join(format!("{}.md", name)),
        None => PathBuf::from(format!("{}.md", name)),
    };
    validate_relative_path(&path)?;
    Ok(path)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| NoteError::InvalidDate(value.to_string()))
}

/// Fill `{{date}}` and `{{title}}` in a template body.
pub fn render_template(template: &str, path: &Path, date: NaiveDate) -> String {
    let title = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    template
        .replace("{{date}}", &date.format("%Y-%m-%d").to_string())
        .replace("{{title}}", title)
}
