//! Armor trim variant detection.
//!
//! Armor trims are composed at use time from a base armor piece and a trim
//! overlay, so the per-material item names (`netherite_helmet_quartz_trim`)
//! are never pre-rendered. A name is a trim variant iff it ends with
//! `{armor}_{material}_trim` for a known armor type and a discovered material.

use crate::catalog::TrimMaterialSet;

/// Armor pieces that can carry a trim.
pub const ARMOR_TYPES: [&str; 4] = ["helmet", "chestplate", "leggings", "boots"];

const TRIM_SUFFIX: &str = "_trim";

/// Predicate over item names backed by a fixed set of trim materials.
#[derive(Debug, Clone, Default)]
pub struct TrimVariantFilter {
    materials: TrimMaterialSet,
}

impl TrimVariantFilter {
    /// Create a filter for the given materials.
    pub fn new(materials: TrimMaterialSet) -> Self {
        Self { materials }
    }

    /// Check if `name` is an armor trim variant.
    ///
    /// Always false when no materials were discovered, so a bare `_trim`
    /// suffix is never enough on its own.
    pub fn is_armor_trim_variant(&self, name: &str) -> bool {
        if self.materials.is_empty() {
            return false;
        }
        let Some(stem) = name.strip_suffix(TRIM_SUFFIX) else {
            return false;
        };

        ARMOR_TYPES.iter().any(|armor| {
            self.materials.iter().any(|material| {
                stem.strip_suffix(material.as_str())
                    .and_then(|rest| rest.strip_suffix('_'))
                    .is_some_and(|rest| rest.ends_with(armor))
            })
        })
    }

    /// Keep only the items that are not trim variants, preserving order.
    pub fn filter_items(&self, items: &[String]) -> Vec<String> {
        items.iter().filter(|item| !self.is_armor_trim_variant(item)).cloned().collect()
    }
}
