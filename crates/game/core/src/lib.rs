//! Deterministic replication and command-validation logic shared across
//! the authoritative server and client replicas.
//!
//! `hearth-core` defines the canonical rules (actor state, inventory
//! structure, cooldown gating, combat resolution, character creation) and
//! the wire message vocabulary ([`protocol`]). The server validates and
//! mutates through these APIs; clients run the identical mutation code
//! when applying broadcasts, which is what keeps shadow state structurally
//! in sync with the authority.
pub mod combat;
pub mod config;
pub mod cooldown;
pub mod creation;
pub mod items;
pub mod protocol;
pub mod state;

pub use combat::{
    AttackKind, RangedShot, melee_targets, plan_ranged_shot, snap_facing, weapon_damage,
};
pub use config::GameConfig;
pub use cooldown::{CooldownClass, CooldownGate, CooldownGates};
pub use creation::{
    CharacterParts, CreationError, CreationInput, CreationPreview, CreationRequest, CreationSeeds,
    CreationSequencer, CreationStage, PreviewEntry,
};
pub use items::{ItemCategory, ItemDefinition, ItemOracle, ProjectileKind};
pub use protocol::{
    ActionRequest, ActorField, Broadcast, DespawnReason, FieldUpdate, PickupAlert, Rejection,
    Request,
};
pub use state::actor::{DropEffect, EquipEffect};
pub use state::{
    ActorState, Appearance, ClientId, EntityId, GameTime, InventoryState, ItemInstance,
    ItemInstanceId, RemovedInstance, ResourceMeter, Rgba,
};
