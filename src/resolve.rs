//! Name resolution: merge, deduplicate and order render targets.

use crate::catalog::NameCatalog;
use crate::trim::TrimVariantFilter;
use std::cmp::Ordering;
use std::collections::HashSet;

/// The final ordered list of names to render.
///
/// No two names are equal under case-insensitive comparison, and the list is
/// sorted with [`compare_names`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedNames {
    names: Vec<String>,
    filtered_count: usize,
}

impl ResolvedNames {
    /// Resolve a catalog, optionally removing armor trim variants from its items.
    pub fn from_catalog(catalog: &NameCatalog, skip_trim_variants: bool) -> Self {
        let filtered_items = if skip_trim_variants {
            TrimVariantFilter::new(catalog.trim_materials.clone()).filter_items(&catalog.items)
        } else {
            catalog.items.clone()
        };
        resolve_names(&catalog.items, filtered_items, &catalog.blocks)
    }

    /// Resolved names in render order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of items removed by the trim filter.
    pub fn filtered_count(&self) -> usize {
        self.filtered_count
    }

    /// Number of names to render.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Merge filtered items with all blocks, deduplicate case-insensitively and sort.
///
/// The first occurrence of each case-insensitive name is kept. `original_items`
/// is only used to compute how many items the filter removed.
pub fn resolve_names(
    original_items: &[String],
    filtered_items: Vec<String>,
    blocks: &[String],
) -> ResolvedNames {
    let filtered_count = original_items.len().saturating_sub(filtered_items.len());

    let mut seen = HashSet::new();
    let mut names: Vec<String> = filtered_items
        .into_iter()
        .chain(blocks.iter().cloned())
        .filter(|name| seen.insert(fold_case(name)))
        .collect();
    names.sort_by(|a, b| compare_names(a, b));

    ResolvedNames { names, filtered_count }
}

/// Case-insensitive ordinal ordering.
///
/// Names that differ only in case are ordered by their raw code points so the
/// result is total and reproducible.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a).cmp(&folded(b)).then_with(|| a.cmp(b))
}

fn fold_case(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}
