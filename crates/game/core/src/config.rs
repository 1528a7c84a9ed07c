/// Gameplay tuning constants shared by server validation and client-side
/// optimistic timing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Seconds between accepted melee attacks.
    pub melee_cooldown: f64,
    /// Seconds between accepted ranged attacks.
    pub ranged_cooldown: f64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of carried items per actor.
    pub const MAX_CARRIED: usize = 12;

    // ===== combat =====
    /// Damage dealt with no weapon equipped.
    pub const UNARMED_DAMAGE: i32 = 1;
    /// Melee hit-test circle radius in world units.
    pub const MELEE_RADIUS: f32 = 0.5;
    /// Distance from the attacker to the center of the melee hit-test.
    pub const MELEE_REACH: f32 = 0.5;
    /// Vertical offset applied to a spawned projectile's origin.
    pub const PROJECTILE_SPAWN_OFFSET_Y: f32 = 0.35;
    /// Seconds the client waits after the attack edge before sending the
    /// request, matched to the swing timing of the attack animation.
    pub const ATTACK_REQUEST_LEAD: f64 = 0.25;

    // ===== lifecycle =====
    /// Seconds between death and the corpse releasing its carried items.
    pub const DECOMPOSITION_DELAY: f64 = 1.0;
    /// Maximum random offset applied to dropped pickups so stacks do not
    /// perfectly overlap.
    pub const DROP_SCATTER: f32 = 0.5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MELEE_COOLDOWN: f64 = 0.35;
    pub const DEFAULT_RANGED_COOLDOWN: f64 = 0.35;

    pub fn new() -> Self {
        Self {
            melee_cooldown: Self::DEFAULT_MELEE_COOLDOWN,
            ranged_cooldown: Self::DEFAULT_RANGED_COOLDOWN,
        }
    }

    /// Starting health for a freshly created character of the given class.
    pub fn starting_health(_class_index: u16) -> i32 {
        100
    }

    /// Starting mana for a freshly created character of the given class.
    pub fn starting_mana(_class_index: u16) -> i32 {
        100
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
