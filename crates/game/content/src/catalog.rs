//! In-memory item catalog implementing the core's oracle trait.

use std::collections::HashMap;

use hearth_core::{ItemDefinition, ItemOracle};

/// Name-indexed item catalog. Built once at startup and never mutated;
/// both the server and every client hold the same catalog.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<String, ItemDefinition>,
}

impl ItemCatalog {
    pub fn new(definitions: Vec<ItemDefinition>) -> Self {
        let items = definitions
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn resolve(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.get(name)
    }
}
