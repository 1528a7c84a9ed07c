//! Item catalog loader.

use std::path::Path;

use hearth_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalogFile {
    pub items: Vec<ItemDefinition>,
}

/// Loader for the item catalog from RON files.
pub struct ItemCatalogLoader;

impl ItemCatalogLoader {
    /// Load an item catalog from a RON file. Duplicate names are
    /// rejected: the catalog is the identity space for items.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let file: ItemCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        let mut seen = std::collections::HashSet::new();
        for def in &file.items {
            if !seen.insert(def.name.clone()) {
                anyhow::bail!("Duplicate item name in catalog: {}", def.name);
            }
        }
        Ok(ItemCatalog::new(file.items))
    }
}
