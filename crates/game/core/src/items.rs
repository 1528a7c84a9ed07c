//! Item definitions and the read-only catalog oracle.
//!
//! Definitions are immutable: inventories reference items by stable name
//! and resolve data through [`ItemOracle`] at the point of use. The
//! catalog itself is loaded by `hearth-content` and treated as an
//! external collaborator here.

use crate::state::Rgba;

/// Slot category an item occupies when equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    /// Close-range weapon.
    Melee,
    /// Projectile weapon.
    Ranged,
    Armor,
    Trinket,
    Consumable,
}

impl ItemCategory {
    /// Melee and ranged weapons share one exclusive equip slot.
    #[inline]
    pub fn is_weapon(self) -> bool {
        matches!(self, ItemCategory::Melee | ItemCategory::Ranged)
    }
}

/// Projectile archetype spawned by a ranged weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectileKind {
    Arrow,
    Bolt,
    Spark,
}

/// Immutable catalog entry resolved by stable name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    /// Stable identity used on the wire and in inventories.
    pub name: String,
    /// Human-readable name shown in pickup notifications.
    pub display_name: String,
    /// Icon asset reference handed to the display collaborator.
    pub icon: String,
    pub category: ItemCategory,
    /// Tint applied to the equipped visual attachment.
    pub tint: Rgba,
    /// Damage dealt per hit. Meaningful for weapons only.
    pub damage: i32,
    /// Projectile spawned on a ranged attack. `None` on a ranged weapon
    /// means the weapon fires nothing, degrading gracefully.
    pub projectile: Option<ProjectileKind>,
}

impl ItemDefinition {
    pub fn weapon(
        name: impl Into<String>,
        display_name: impl Into<String>,
        category: ItemCategory,
        damage: i32,
    ) -> Self {
        let name = name.into();
        Self {
            icon: format!("icons/{name}"),
            name,
            display_name: display_name.into(),
            category,
            tint: Rgba::WHITE,
            damage,
            projectile: None,
        }
    }

    pub fn ranged(
        name: impl Into<String>,
        display_name: impl Into<String>,
        damage: i32,
        projectile: ProjectileKind,
    ) -> Self {
        Self {
            projectile: Some(projectile),
            ..Self::weapon(name, display_name, ItemCategory::Ranged, damage)
        }
    }

    pub fn wearable(
        name: impl Into<String>,
        display_name: impl Into<String>,
        category: ItemCategory,
    ) -> Self {
        let name = name.into();
        Self {
            icon: format!("icons/{name}"),
            name,
            display_name: display_name.into(),
            category,
            tint: Rgba::WHITE,
            damage: 0,
            projectile: None,
        }
    }

    pub fn with_tint(mut self, tint: Rgba) -> Self {
        self.tint = tint;
        self
    }
}

/// Pure lookup into the static item catalog.
pub trait ItemOracle: Send + Sync {
    /// Resolves a definition by stable name. `None` for unknown names;
    /// callers degrade to a no-op rather than failing.
    fn resolve(&self, name: &str) -> Option<&ItemDefinition>;
}

/// Minimal in-memory oracle for unit tests across the workspace.
pub mod testing {
    use super::{ItemDefinition, ItemOracle};

    pub struct StubCatalog {
        items: Vec<ItemDefinition>,
    }

    impl StubCatalog {
        pub fn new(items: Vec<ItemDefinition>) -> Self {
            Self { items }
        }
    }

    impl ItemOracle for StubCatalog {
        fn resolve(&self, name: &str) -> Option<&ItemDefinition> {
            self.items.iter().find(|item| item.name == name)
        }
    }
}
