//! Configuration schema types for `iconbake.toml`
//!
//! Every section and key is optional; missing values fall back to defaults.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Progress output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProgressFormat {
    /// In-place progress bar on stderr
    #[default]
    Console,
    /// One JSON object per event on stderr
    Json,
    /// No progress output
    None,
}

/// Render section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Exit with an error when any name failed to render
    #[serde(default)]
    pub strict: bool,
}

/// Output section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Remove existing PNGs from the output directory before rendering
    #[serde(default)]
    pub clean: bool,
}

/// Name filter section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Drop armor trim variants from the item list
    #[serde(default = "default_true")]
    pub skip_trim_variants: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { skip_trim_variants: true }
    }
}

/// Progress section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressConfig {
    /// Output format
    #[serde(default)]
    pub format: ProgressFormat,
    /// Use ANSI colors on the console
    #[serde(default = "default_true")]
    pub color: bool,
    /// Number of failed names listed in the final summary
    #[serde(default = "default_max_failures")]
    pub max_failures: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { format: ProgressFormat::default(), color: true, max_failures: default_max_failures() }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_failures() -> usize {
    20
}

/// Root of `iconbake.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconConfig {
    /// Render settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Name filter settings
    #[serde(default)]
    pub filter: FilterConfig,
    /// Progress settings
    #[serde(default)]
    pub progress: ProgressConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: IconConfig = toml::from_str("").unwrap();
        assert!(!config.render.strict);
        assert!(!config.output.clean);
        assert!(config.filter.skip_trim_variants);
        assert_eq!(config.progress.format, ProgressFormat::Console);
        assert!(config.progress.color);
        assert_eq!(config.progress.max_failures, 20);
    }

    #[test]
    fn test_full_config() {
        let config: IconConfig = toml::from_str(
            r#"
[render]
strict = true

[output]
clean = true

[filter]
skip_trim_variants = false

[progress]
format = "json"
color = false
max_failures = 5
"#,
        )
        .unwrap();

        assert!(config.render.strict);
        assert!(config.output.clean);
        assert!(!config.filter.skip_trim_variants);
        assert_eq!(config.progress.format, ProgressFormat::Json);
        assert!(!config.progress.color);
        assert_eq!(config.progress.max_failures, 5);
    }

    #[test]
    fn test_unknown_progress_format_rejected() {
        let result: Result<IconConfig, _> = toml::from_str("[progress]\nformat = \"fancy\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<IconConfig, _> = toml::from_str("[output]\nclaen = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_matches_empty_file() {
        let parsed: IconConfig = toml::from_str("").unwrap();
        let default = IconConfig::default();
        assert_eq!(parsed.filter.skip_trim_variants, default.filter.skip_trim_variants);
        assert_eq!(parsed.progress.max_failures, default.progress.max_failures);
    }
}
