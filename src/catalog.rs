//! Name catalog discovery.
//!
//! Collects everything the batch needs to know before rendering: the item and
//! block names the renderer knows, and the armor trim materials present in the
//! asset data.

use crate::renderer::Renderer;
use glob::{glob, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filename (without extension) of the shared trim palette, which is not a material.
pub const TRIM_PALETTE_SENTINEL: &str = "trim_palette";

/// Set of armor trim material identifiers, e.g. `quartz`, `copper`.
pub type TrimMaterialSet = BTreeSet<String>;

/// Error during catalog discovery.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// A directory path could not be turned into a glob pattern
    #[error("Invalid glob pattern '{0}': {1}")]
    InvalidPattern(String, #[source] glob::PatternError),
}

/// Raw names and trim materials discovered for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCatalog {
    /// Item names in renderer order (casing and duplicates preserved)
    pub items: Vec<String>,
    /// Block names in renderer order (casing and duplicates preserved)
    pub blocks: Vec<String>,
    /// Trim materials found under `textures/trims/color_palettes`
    pub trim_materials: TrimMaterialSet,
}

impl NameCatalog {
    /// Query the renderer for known names and scan `data_dir` for trim materials.
    pub fn build<R: Renderer + ?Sized>(
        renderer: &R,
        data_dir: &Path,
    ) -> Result<Self, CatalogError> {
        let items = renderer.known_item_names();
        let blocks = renderer.known_block_names();
        let trim_materials = discover_trim_materials(data_dir)?;

        log::info!("Found {} known items and {} known blocks", items.len(), blocks.len());
        log::info!("Loaded {} trim materials from assets", trim_materials.len());

        Ok(Self { items, blocks, trim_materials })
    }
}

/// Directory holding one palette PNG per trim material.
pub fn trim_palettes_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("textures").join("trims").join("color_palettes")
}

/// Discover trim materials from the palette PNGs in `data_dir`.
///
/// A missing palette directory yields an empty set.
pub fn discover_trim_materials(data_dir: &Path) -> Result<TrimMaterialSet, CatalogError> {
    let materials = png_stems(&trim_palettes_dir(data_dir))?
        .into_iter()
        .filter(|name| name != TRIM_PALETTE_SENTINEL)
        .collect();
    Ok(materials)
}

/// List the file stems of all `*.png` files directly inside `dir`, sorted.
///
/// Returns an empty list when `dir` does not exist.
pub(crate) fn png_stems(dir: &Path) -> Result<Vec<String>, CatalogError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = format!("{}/*.png", Pattern::escape(&dir.to_string_lossy()));
    let paths = glob(&pattern).map_err(|e| CatalogError::InvalidPattern(pattern.clone(), e))?;

    let mut stems = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if !path.is_file() {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    stems.push(stem.to_string());
                }
            }
            Err(e) => {
                // Log but continue on unreadable entries
                log::warn!("Error reading path: {}", e);
            }
        }
    }

    stems.sort();
    Ok(stems)
}
