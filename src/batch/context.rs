//! Batch context containing paths and settings for a run.

use crate::config::IconConfig;
use crate::renderer::RenderOptions;
use std::path::{Path, PathBuf};

/// Batch context containing everything a run needs besides the renderer.
#[derive(Debug, Clone)]
pub struct BatchContext {
    /// Asset data directory the renderer was loaded from
    data_dir: PathBuf,
    /// Directory receiving one PNG per name
    output_dir: PathBuf,
    /// Options passed to every render call
    options: RenderOptions,
    /// Whether to remove existing PNGs from the output directory first
    clean: bool,
    /// Whether to drop armor trim variants from the item list
    skip_trim_variants: bool,
    /// Whether isolated failures should fail the run
    strict: bool,
}

impl BatchContext {
    /// Create a new batch context with default settings.
    ///
    /// # Arguments
    /// - `data_dir` - The asset data directory
    /// - `output_dir` - The output directory
    /// - `size` - Width and height of every rendered image
    pub fn new(data_dir: PathBuf, output_dir: PathBuf, size: u32) -> Self {
        Self {
            data_dir,
            output_dir,
            options: RenderOptions::new(size),
            clean: false,
            skip_trim_variants: true,
            strict: false,
        }
    }

    /// Create a batch context with settings taken from a loaded config.
    pub fn from_config(config: &IconConfig, data_dir: PathBuf, output_dir: PathBuf, size: u32) -> Self {
        Self::new(data_dir, output_dir, size)
            .with_clean(config.output.clean)
            .with_skip_trim_variants(config.filter.skip_trim_variants)
            .with_strict(config.render.strict)
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Get the render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Whether the output directory is cleaned before rendering.
    pub fn is_clean(&self) -> bool {
        self.clean
    }

    /// Whether armor trim variants are filtered out.
    pub fn skips_trim_variants(&self) -> bool {
        self.skip_trim_variants
    }

    /// Whether strict mode is enabled.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Set clean mode.
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Set whether trim variants are filtered.
    pub fn with_skip_trim_variants(mut self, skip: bool) -> Self {
        self.skip_trim_variants = skip;
        self
    }

    /// Set strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
