//! Server-side attack resolution primitives.
//!
//! These are pure functions over actor state so the server can compute
//! the canonical hit outcome and tests can drive them without any async
//! plumbing. The requesting client never resolves hits itself.

use glam::Vec2;

use crate::config::GameConfig;
use crate::items::{ItemCategory, ItemOracle, ProjectileKind};
use crate::state::{ActorState, EntityId};

/// Attack class carried in swing broadcasts and cooldown selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackKind {
    Melee,
    Ranged,
}

/// Snaps a facing vector to axis-aligned unit components: each component
/// is zeroed below 0.5 magnitude, otherwise reduced to its sign.
///
/// For a normalized facing vector at least one component is >= sqrt(2)/2,
/// so the result is never the zero vector.
pub fn snap_facing(facing: Vec2) -> Vec2 {
    Vec2::new(
        if facing.x.abs() < 0.5 {
            0.0
        } else {
            facing.x.signum()
        },
        if facing.y.abs() < 0.5 {
            0.0
        } else {
            facing.y.signum()
        },
    )
}

/// Damage the actor deals per melee hit: the active weapon's damage, or
/// the unarmed fallback when nothing (or an unresolvable item) is held.
pub fn weapon_damage(actor: &ActorState, oracle: &dyn ItemOracle) -> i32 {
    actor
        .active_weapon
        .and_then(|id| actor.inventory.instance(id))
        .and_then(|item| oracle.resolve(&item.name))
        .map(|def| def.damage)
        .unwrap_or(GameConfig::UNARMED_DAMAGE)
}

/// Resolves a melee sweep: every entity within [`GameConfig::MELEE_RADIUS`]
/// of a point one reach-unit along the attacker's snapped facing is hit,
/// excluding the attacker itself.
pub fn melee_targets<'a>(
    attacker: &ActorState,
    entities: impl Iterator<Item = (EntityId, Vec2)> + 'a,
) -> Vec<EntityId> {
    let center = attacker.position + snap_facing(attacker.facing) * GameConfig::MELEE_REACH;
    entities
        .filter(|(id, _)| *id != attacker.id)
        .filter(|(_, position)| position.distance(center) <= GameConfig::MELEE_RADIUS)
        .map(|(id, _)| id)
        .collect()
}

/// Fully resolved ranged shot ready to hand to the world-spawn
/// collaborator. Projectile flight and collision live outside this core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangedShot {
    pub kind: ProjectileKind,
    pub origin: Vec2,
    pub direction: Vec2,
}

/// Plans a ranged shot for the actor, or `None` when no ranged weapon is
/// equipped or the weapon defines no projectile.
pub fn plan_ranged_shot(actor: &ActorState, oracle: &dyn ItemOracle) -> Option<RangedShot> {
    let def = actor
        .active_weapon
        .and_then(|id| actor.inventory.instance(id))
        .and_then(|item| oracle.resolve(&item.name))?;
    if def.category != ItemCategory::Ranged {
        return None;
    }
    let kind = def.projectile?;
    Some(RangedShot {
        kind,
        origin: actor.position + Vec2::new(0.0, GameConfig::PROJECTILE_SPAWN_OFFSET_Y),
        direction: snap_facing(actor.facing),
    })
}
