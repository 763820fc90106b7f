//! Configuration loading and discovery for `iconbake.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{IconConfig, ProgressFormat};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "iconbake.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse iconbake.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Clean the output directory first
    pub clean: Option<bool>,
    /// Drop armor trim variants
    pub skip_trim_variants: Option<bool>,
    /// Fail the run on any isolated failure
    pub strict: Option<bool>,
    /// Progress output format
    pub progress: Option<ProgressFormat>,
    /// Use colors on the console
    pub color: Option<bool>,
}

/// Find `iconbake.toml` by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for iconbake.toml
/// 2. Check XDG_CONFIG_HOME/iconbake/iconbake.toml (or ~/.config/iconbake/iconbake.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find `iconbake.toml` in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("iconbake").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find `iconbake.toml` by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file and fails if it cannot be
/// read. Otherwise uses [`find_config`]; when nothing is found the default
/// configuration is returned.
pub fn load_config(path: Option<&Path>) -> Result<IconConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("Loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(IconConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<IconConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: IconConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut IconConfig, overrides: &CliOverrides) {
    if let Some(clean) = overrides.clean {
        config.output.clean = clean;
    }
    if let Some(skip) = overrides.skip_trim_variants {
        config.filter.skip_trim_variants = skip;
    }
    if let Some(strict) = overrides.strict {
        config.render.strict = strict;
    }
    if let Some(format) = overrides.progress {
        config.progress.format = format;
    }
    if let Some(color) = overrides.color {
        config.progress.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_from_walks_up() {
        let temp = TempDir::new().expect("should create temp dir");
        let nested = temp.path().join("a/b/c");
        fs::create_dir_all(&nested).expect("should create nested dirs");
        File::create(temp.path().join(CONFIG_FILE_NAME)).expect("should create config file");

        let found = find_config_from(nested).expect("should find config");
        assert_eq!(found, temp.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_find_config_from_prefers_nearest() {
        let temp = TempDir::new().expect("should create temp dir");
        let nested = temp.path().join("project");
        fs::create_dir_all(&nested).expect("should create nested dir");
        File::create(temp.path().join(CONFIG_FILE_NAME)).expect("should create outer config");
        File::create(nested.join(CONFIG_FILE_NAME)).expect("should create inner config");

        assert_eq!(find_config_from(nested.clone()), Some(nested.join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(b"[output]\nclean = true\n")
            .expect("should write config content");

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert!(config.output.clean);
        assert!(config.filter.skip_trim_variants);
    }

    #[test]
    fn test_load_config_missing_explicit_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(b"this is not valid toml {{{")
            .expect("should write invalid config");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_merge_cli_overrides_only_set_values() {
        let mut config = IconConfig::default();
        config.output.clean = true;

        let overrides = CliOverrides {
            strict: Some(true),
            progress: Some(ProgressFormat::Json),
            ..Default::default()
        };
        merge_cli_overrides(&mut config, &overrides);

        assert!(config.render.strict);
        assert!(config.output.clean);
        assert_eq!(config.progress.format, ProgressFormat::Json);
        assert!(config.progress.color);
    }

    #[test]
    fn test_merge_cli_overrides_disable_filter() {
        let mut config = IconConfig::default();
        let overrides = CliOverrides {
            skip_trim_variants: Some(false),
            color: Some(false),
            clean: Some(true),
            ..Default::default()
        };
        merge_cli_overrides(&mut config, &overrides);

        assert!(!config.filter.skip_trim_variants);
        assert!(!config.progress.color);
        assert!(config.output.clean);
    }
}
