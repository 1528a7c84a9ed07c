//! Wire message vocabulary.
//!
//! Two distinct asynchronous message kinds, never conflated:
//!
//! - [`Request`]: client-to-server, validated and freely rejectable. A
//!   request is not guaranteed to produce any broadcast.
//! - [`Broadcast`] / [`FieldUpdate`]: server-to-all-observers, assumed
//!   accepted and safe to apply more than once. Field updates are
//!   ordered per field only; no cross-field ordering is implied.

use glam::Vec2;

use crate::combat::AttackKind;
use crate::creation::{CreationError, CreationRequest};
use crate::items::ProjectileKind;
use crate::state::{Appearance, ClientId, EntityId, ItemInstance, ItemInstanceId, Rgba};

/// Client-to-server message. The issuing connection never blocks on a
/// reply; effects arrive later as replication traffic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Request {
    /// First message of a connection: the client's display name.
    Hello { name: String },
    /// One atomic creation request ending a client's creation cycle.
    SpawnCharacter(CreationRequest),
    /// An action on an existing character. The server verifies that the
    /// actor belongs to the requesting connection.
    Action {
        actor: EntityId,
        action: ActionRequest,
    },
    /// Client-authoritative transform stream. Movement itself is not
    /// validated; ownership and liveness are.
    UpdateTransform {
        actor: EntityId,
        position: Vec2,
        facing: Vec2,
    },
}

/// Actions a client may request for one of its characters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRequest {
    MeleeAttack,
    RangedAttack,
    /// Forwarded to whatever interactable the actor currently faces.
    Interact,
    /// Equip the first carried copy of the named item.
    EquipItem { item: String },
    /// Drop one carried instance, keyed by stable id rather than by
    /// position in the carried list.
    DropItem { instance: ItemInstanceId },
}

/// Replicated scalar field of one actor. Delivered at-least-once and in
/// set order per field; consumers keep their side effects idempotent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorField {
    Health(i32),
    MaxHealth(i32),
    Mana(i32),
    MaxMana(i32),
    Coins(i32),
}

/// One field change of one actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldUpdate {
    pub actor: EntityId,
    pub field: ActorField,
}

/// Why an actor left the world. The owning client reacts to
/// `Decomposed` by restarting its character-creation sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DespawnReason {
    Decomposed,
    Disconnected,
    Removed,
}

/// Pickup notification payload for the display collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupAlert {
    pub icon: String,
    pub display_name: String,
    pub tint: Rgba,
}

/// One-shot server-to-all-clients effect. Applying the same broadcast
/// twice must leave replicas structurally unchanged.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Broadcast {
    /// A connection introduced itself; observers map clients to names.
    ClientJoined { client: ClientId, name: String },
    ActorSpawned {
        actor: EntityId,
        owner: ClientId,
        controller_index: u8,
        appearance: Appearance,
        position: Vec2,
    },
    ActorDespawned {
        actor: EntityId,
        reason: DespawnReason,
    },
    ItemAdded {
        actor: EntityId,
        instance: ItemInstance,
        /// Present when the pickup should surface a notification.
        alert: Option<PickupAlert>,
    },
    ItemEquipped {
        actor: EntityId,
        instance: ItemInstanceId,
    },
    ItemDropped {
        actor: EntityId,
        instance: ItemInstanceId,
    },
    /// Transform echo for remote replicas. Last write wins.
    ActorMoved {
        actor: EntityId,
        position: Vec2,
        facing: Vec2,
    },
    /// Cosmetic swing/shoot cue for observer animations.
    AttackSwung {
        actor: EntityId,
        kind: AttackKind,
    },
    ProjectileSpawned {
        attacker: EntityId,
        kind: ProjectileKind,
        origin: Vec2,
        direction: Vec2,
    },
    ActorDied {
        actor: EntityId,
    },
}

/// Why the server refused a request. Policy rejections are silent
/// no-ops on the wire; this surfaces only to server logs and tests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("actor is dead")]
    ActorDead,
    #[error("cooldown has not elapsed")]
    CooldownActive,
    #[error("no such actor")]
    NoSuchActor,
    #[error("actor is not owned by the requesting client")]
    NotOwner,
    #[error("unknown item name")]
    UnknownItem,
    #[error("inventory is full")]
    InventoryFull,
    #[error("no carried instance with that id")]
    NoSuchInstance,
    #[error("no ranged weapon equipped")]
    NoRangedWeapon,
    #[error("nothing to interact with")]
    NoInteractable,
    #[error("malformed creation request: {0}")]
    InvalidCreation(#[from] CreationError),
}
