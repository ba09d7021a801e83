//! Configuration file handling.
//!
//! The config file is TOML, read from `$NOTESMITH_CONFIG` or
//! `<config dir>/notesmith/config.toml`. A missing file means defaults.
//!
//! ```toml
//! vault = "~/Notes"
//!
//! [search]
//! max_results = 20
//!
//! [periodic.daily]
//! folder = "Journal"
//! template = "Templates/Daily"
//! ```

use crate::error::{NoteError, Result};
use crate::periodic::PeriodicConfig;
use crate::search::SearchOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "NOTESMITH_CONFIG";
/// Environment variable naming the vault directory.
pub const VAULT_ENV: &str = "NOTESMITH_VAULT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default vault directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,

    /// Search defaults.
    pub search: SearchOptions,

    /// Periodic note naming.
    pub periodic: PeriodicConfig,
}

impl Config {
    /// Load the config from its default location.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the config from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
            .map_err(|e| NoteError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Parse config TOML.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `$NOTESMITH_CONFIG`, else `<config dir>/notesmith/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("notesmith").join("config.toml"))
    }

    /// Pick the vault directory: `--vault`, then `$NOTESMITH_VAULT`, then the config file.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        let env_vault = std::env::var_os(VAULT_ENV).map(PathBuf::from);
        self.resolve_vault_path_from(cli_vault, env_vault.as_deref())
    }

    fn resolve_vault_path_from(&self, cli_vault: Option<&Path>, env_vault: Option<&Path>) -> Result<PathBuf> {
        let chosen = cli_vault
            .or(env_vault)
            .or(self.vault.as_deref())
            .ok_or_else(|| {
                NoteError::ConfigError(format!(
                    "no vault configured; pass --vault, set {} or add `vault` to the config file",
                    VAULT_ENV
                ))
            })?;
        Ok(expand_tilde(chosen))
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periodic::Period;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.search.context_length, 100);
        assert_eq!(config.search.max_snippets, 3);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
vault = "/data/notes"

[search]
max_results = 5

[periodic.weekly]
folder = "Weekly"
format = "%Y week %V"
template = "Templates/Week"
"#,
        )
        .unwrap();

        assert_eq!(config.vault, Some(PathBuf::from("/data/notes")));
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.context_length, 100);
        let weekly = config.periodic.settings(Period::Weekly);
        assert_eq!(weekly.folder, Some(PathBuf::from("Weekly")));
        assert_eq!(weekly.format.as_deref(), Some("%Y week %V"));
        assert_eq!(config.periodic.settings(Period::Daily).folder, None);
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(Config::parse("vault = ["), Err(NoteError::TomlParse(_))));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("none.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\nmax_results = \"many\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(NoteError::ConfigError(_))));
    }

    #[test]
    fn test_vault_precedence() {
        let config = Config {
            vault: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let cli = Path::new("/from/cli");
        let env = Path::new("/from/env");

        assert_eq!(
            config.resolve_vault_path_from(Some(cli), Some(env)).unwrap(),
            PathBuf::from("/from/cli")
        );
        assert_eq!(
            config.resolve_vault_path_from(None, Some(env)).unwrap(),
            PathBuf::from("/from/env")
        );
        assert_eq!(
            config.resolve_vault_path_from(None, None).unwrap(),
            PathBuf::from("/from/config")
        );
        assert!(matches!(
            Config::default().resolve_vault_path_from(None, None),
            Err(NoteError::ConfigError(_))
        ));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde(Path::new("~/notes"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("notes"));
        }
        assert_eq!(expand_tilde(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
