//! Bounded item storage and equip-slot exclusivity rules.
//!
//! Wire operations are keyed by [`ItemInstanceId`], never by position, so
//! a broadcast applied twice (or against a replica that already processed
//! it) degrades to a no-op instead of corrupting the collection.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::items::{ItemCategory, ItemOracle};

/// Stable identity of one carried item copy, allocated by the server and
/// never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInstanceId(pub u32);

/// One carried copy of a catalog item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInstance {
    pub id: ItemInstanceId,
    /// Catalog name; definition data is resolved through [`ItemOracle`].
    pub name: String,
}

impl ItemInstance {
    pub fn new(id: ItemInstanceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Result of removing a carried instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedInstance {
    pub instance: ItemInstance,
    /// True if the removal left the equipped set without this item.
    pub unequipped: bool,
    /// When another carried copy of the same item existed, the equipped
    /// entry was transferred to it instead of being dropped.
    pub reassigned_to: Option<ItemInstanceId>,
}

/// Carried items plus the equipped subset for one actor.
///
/// Invariant: every id in `equipped` refers to an instance in `carried`,
/// and `equipped` holds at most one item per non-weapon category and at
/// most one weapon across the melee/ranged categories combined.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    pub carried: ArrayVec<ItemInstance, { GameConfig::MAX_CARRIED }>,
    pub equipped: Vec<ItemInstanceId>,
}

impl InventoryState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn can_add(&self) -> bool {
        self.carried.len() < GameConfig::MAX_CARRIED
    }

    /// Appends an instance to `carried`. Returns false (and leaves state
    /// unchanged) when the inventory is full or the id is already present.
    pub fn add(&mut self, instance: ItemInstance) -> bool {
        if !self.can_add() || self.instance(instance.id).is_some() {
            return false;
        }
        self.carried.push(instance);
        true
    }

    pub fn instance(&self, id: ItemInstanceId) -> Option<&ItemInstance> {
        self.carried.iter().find(|item| item.id == id)
    }

    /// First carried copy of the named item, if any.
    pub fn first_named(&self, name: &str) -> Option<&ItemInstance> {
        self.carried.iter().find(|item| item.name == name)
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.carried.iter().filter(|item| item.name == name).count()
    }

    pub fn is_equipped(&self, id: ItemInstanceId) -> bool {
        self.equipped.contains(&id)
    }

    /// Equipped instance of the given category, resolved through the
    /// catalog. Instances whose name no longer resolves are skipped.
    pub fn equipped_of_category(
        &self,
        category: ItemCategory,
        oracle: &dyn ItemOracle,
    ) -> Option<ItemInstanceId> {
        self.equipped.iter().copied().find(|id| {
            self.instance(*id)
                .and_then(|item| oracle.resolve(&item.name))
                .is_some_and(|def| def.category == category)
        })
    }

    /// Equips a carried instance, displacing whatever it excludes:
    /// weapons displace any equipped melee-or-ranged item, non-weapons
    /// displace the equipped item of the same category.
    ///
    /// Returns the displaced ids. Re-equipping an already equipped
    /// instance displaces nothing and adds no duplicate entry.
    pub fn equip(
        &mut self,
        id: ItemInstanceId,
        category: ItemCategory,
        oracle: &dyn ItemOracle,
    ) -> Vec<ItemInstanceId> {
        if self.instance(id).is_none() {
            return Vec::new();
        }
        let displaced: Vec<ItemInstanceId> = self
            .equipped
            .iter()
            .copied()
            .filter(|other| {
                *other != id
                    && self
                        .instance(*other)
                        .and_then(|item| oracle.resolve(&item.name))
                        .is_some_and(|def| {
                            if category.is_weapon() {
                                def.category.is_weapon()
                            } else {
                                def.category == category
                            }
                        })
            })
            .collect();
        self.equipped.retain(|other| !displaced.contains(other));
        if !self.equipped.contains(&id) {
            self.equipped.push(id);
        }
        displaced
    }

    pub fn unequip(&mut self, id: ItemInstanceId) -> bool {
        let before = self.equipped.len();
        self.equipped.retain(|other| *other != id);
        self.equipped.len() != before
    }

    /// Removes a carried instance by id.
    ///
    /// If the instance was equipped and another carried copy of the same
    /// item remains, the equipped entry is transferred to that copy;
    /// otherwise the item leaves the equipped set. Unknown ids are a
    /// no-op, which makes replayed drop broadcasts safe.
    pub fn remove(&mut self, id: ItemInstanceId) -> Option<RemovedInstance> {
        let index = self.carried.iter().position(|item| item.id == id)?;
        let instance = self.carried.remove(index);
        if !self.is_equipped(id) {
            return Some(RemovedInstance {
                instance,
                unequipped: false,
                reassigned_to: None,
            });
        }
        let replacement = self.first_named(&instance.name).map(|item| item.id);
        match replacement {
            Some(other) => {
                for slot in &mut self.equipped {
                    if *slot == id {
                        *slot = other;
                    }
                }
                Some(RemovedInstance {
                    instance,
                    unequipped: false,
                    reassigned_to: Some(other),
                })
            }
            None => {
                self.unequip(id);
                Some(RemovedInstance {
                    instance,
                    unequipped: true,
                    reassigned_to: None,
                })
            }
        }
    }

    /// Structural invariant check used by tests and debug assertions.
    pub fn invariants_hold(&self) -> bool {
        let all_carried = self
            .equipped
            .iter()
            .all(|id| self.instance(*id).is_some());
        let no_duplicates = self
            .equipped
            .iter()
            .enumerate()
            .all(|(i, id)| !self.equipped[..i].contains(id));
        all_carried && no_duplicates
    }
}
