//! Actor state and the mutation helpers shared by server and replicas.

use glam::Vec2;

use crate::config::GameConfig;
use crate::cooldown::CooldownGates;
use crate::items::{ItemCategory, ItemOracle};
use crate::state::inventory::{InventoryState, ItemInstance, ItemInstanceId, RemovedInstance};
use crate::state::{ClientId, EntityId};

/// Bounded resource pool with a current and maximum value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: i32,
    pub max: i32,
}

impl ResourceMeter {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Sets the current value clamped to `[0, max]`.
    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    pub fn deplete(&mut self, amount: i32) {
        self.set(self.current - amount);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }
}

/// The five customization indices chosen during character creation.
///
/// The body index spans the combined male+female body list; gender is
/// derived from it on demand and the raw index is never rewritten after
/// creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Appearance {
    pub body: u16,
    pub eyes: u16,
    pub hair: u16,
    pub hair_color: u16,
    pub class: u16,
}

/// Outcome of an equip applied to an actor, for attachment bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EquipEffect {
    /// Instances pushed out of the equipped set.
    pub displaced: Vec<ItemInstanceId>,
    /// True when the actor's active weapon changed (attachment swap).
    pub weapon_changed: bool,
}

/// Outcome of a drop applied to an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropEffect {
    pub removed: RemovedInstance,
    /// True when the drop destroyed the weapon attachment.
    pub weapon_removed: bool,
}

/// Server-owned state of one player character.
///
/// Clients hold a replica mutated only through replication messages; the
/// `apply_*` helpers below are the single implementation of inventory
/// mutation, run identically on both sides so shadow copies stay
/// structurally equal to the authority.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    /// Connection controlling this actor.
    pub owner: ClientId,
    /// Local co-op slot on the owning connection.
    pub controller_index: u8,
    pub appearance: Appearance,

    pub position: Vec2,
    /// Last movement direction, unit length. Attack direction snapping
    /// relies on this staying normalized.
    pub facing: Vec2,

    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub coins: i32,

    pub inventory: InventoryState,
    pub cooldowns: CooldownGates,
    /// Currently wielded weapon instance, the only channel through which
    /// combat learns damage and ranged capability.
    pub active_weapon: Option<ItemInstanceId>,
}

impl ActorState {
    pub fn new(
        id: EntityId,
        owner: ClientId,
        controller_index: u8,
        appearance: Appearance,
        position: Vec2,
    ) -> Self {
        Self {
            id,
            owner,
            controller_index,
            appearance,
            position,
            facing: Vec2::new(0.0, -1.0),
            health: ResourceMeter::full(GameConfig::starting_health(appearance.class)),
            mana: ResourceMeter::full(GameConfig::starting_mana(appearance.class)),
            coins: 0,
            inventory: InventoryState::empty(),
            cooldowns: CooldownGates::default(),
            active_weapon: None,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    /// Adds a carried instance. No-op (false) when full or duplicate.
    pub fn apply_add(&mut self, instance: ItemInstance) -> bool {
        self.inventory.add(instance)
    }

    /// Equips a carried instance, updating the active weapon if the item
    /// is one. Unknown names are a no-op.
    pub fn apply_equip(&mut self, id: ItemInstanceId, oracle: &dyn ItemOracle) -> EquipEffect {
        let Some(category) = self
            .inventory
            .instance(id)
            .and_then(|item| oracle.resolve(&item.name))
            .map(|def| def.category)
        else {
            return EquipEffect::default();
        };
        let displaced = self.inventory.equip(id, category, oracle);
        let weapon_changed = category.is_weapon() && self.active_weapon != Some(id);
        if category.is_weapon() {
            self.active_weapon = Some(id);
        }
        EquipEffect {
            displaced,
            weapon_changed,
        }
    }

    /// Drops a carried instance by id. Unknown ids are a no-op, so a
    /// replayed drop broadcast cannot corrupt the replica.
    pub fn apply_drop(&mut self, id: ItemInstanceId) -> Option<DropEffect> {
        let removed = self.inventory.remove(id)?;
        let mut weapon_removed = false;
        if self.active_weapon == Some(id) {
            match removed.reassigned_to {
                Some(other) => self.active_weapon = Some(other),
                None => {
                    self.active_weapon = None;
                    weapon_removed = true;
                }
            }
        }
        Some(DropEffect {
            removed,
            weapon_removed,
        })
    }

    /// Category of the active weapon, if it still resolves.
    pub fn weapon_category(&self, oracle: &dyn ItemOracle) -> Option<ItemCategory> {
        let id = self.active_weapon?;
        let instance = self.inventory.instance(id)?;
        oracle.resolve(&instance.name).map(|def| def.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemDefinition, ProjectileKind, testing::StubCatalog};

    fn catalog() -> StubCatalog {
        StubCatalog::new(vec![
            ItemDefinition::weapon("Sword", "Iron Sword", ItemCategory::Melee, 5),
            ItemDefinition::ranged("Bow", "Short Bow", 3, ProjectileKind::Arrow),
        ])
    }

    fn actor() -> ActorState {
        ActorState::new(
            EntityId(1),
            ClientId(0),
            0,
            Appearance::default(),
            Vec2::ZERO,
        )
    }

    #[test]
    fn meter_clamps_to_bounds() {
        let mut meter = ResourceMeter::full(100);
        meter.set(150);
        assert_eq!(meter.current, 100);
        meter.deplete(250);
        assert_eq!(meter.current, 0);
        assert!(meter.is_empty());
    }

    #[test]
    fn equipping_a_weapon_sets_the_active_weapon() {
        let catalog = catalog();
        let mut actor = actor();
        actor.apply_add(ItemInstance::new(ItemInstanceId(1), "Sword"));
        let effect = actor.apply_equip(ItemInstanceId(1), &catalog);
        assert!(effect.weapon_changed);
        assert_eq!(actor.active_weapon, Some(ItemInstanceId(1)));
        assert_eq!(actor.weapon_category(&catalog), Some(ItemCategory::Melee));
    }

    #[test]
    fn swapping_weapons_displaces_the_old_one() {
        let catalog = catalog();
        let mut actor = actor();
        actor.apply_add(ItemInstance::new(ItemInstanceId(1), "Sword"));
        actor.apply_add(ItemInstance::new(ItemInstanceId(2), "Bow"));
        actor.apply_equip(ItemInstanceId(1), &catalog);
        let effect = actor.apply_equip(ItemInstanceId(2), &catalog);
        assert_eq!(effect.displaced, vec![ItemInstanceId(1)]);
        assert_eq!(actor.active_weapon, Some(ItemInstanceId(2)));
    }

    #[test]
    fn dropping_the_wielded_weapon_clears_the_attachment() {
        let catalog = catalog();
        let mut actor = actor();
        actor.apply_add(ItemInstance::new(ItemInstanceId(1), "Sword"));
        actor.apply_equip(ItemInstanceId(1), &catalog);
        let effect = actor.apply_drop(ItemInstanceId(1)).unwrap();
        assert!(effect.weapon_removed);
        assert_eq!(actor.active_weapon, None);
        assert!(actor.inventory.carried.is_empty());
    }

    #[test]
    fn equip_of_unknown_item_is_a_no_op() {
        let catalog = catalog();
        let mut actor = actor();
        actor.apply_add(ItemInstance::new(ItemInstanceId(1), "Mystery"));
        let effect = actor.apply_equip(ItemInstanceId(1), &catalog);
        assert_eq!(effect, EquipEffect::default());
        assert!(actor.inventory.equipped.is_empty());
    }
}
