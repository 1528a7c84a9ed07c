//! Time gates that throttle attack actions per actor.

use crate::state::GameTime;

/// Attack classes with independent cooldowns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CooldownClass {
    Melee,
    Ranged,
}

/// Earliest future time at which a new action of one class is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownGate {
    next_eligible: GameTime,
}

impl CooldownGate {
    /// Accepts an action iff `now` has reached the gate, advancing it by
    /// `duration`. On rejection the gate is left unchanged; the caller
    /// must not execute the action.
    pub fn try_accept(&mut self, now: GameTime, duration: f64) -> bool {
        if now < self.next_eligible {
            return false;
        }
        self.next_eligible = now + duration;
        true
    }

    pub fn next_eligible(&self) -> GameTime {
        self.next_eligible
    }
}

/// The per-actor pair of independent attack gates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownGates {
    melee: CooldownGate,
    ranged: CooldownGate,
}

impl CooldownGates {
    pub fn gate(&self, class: CooldownClass) -> &CooldownGate {
        match class {
            CooldownClass::Melee => &self.melee,
            CooldownClass::Ranged => &self.ranged,
        }
    }

    pub fn gate_mut(&mut self, class: CooldownClass) -> &mut CooldownGate {
        match class {
            CooldownClass::Melee => &mut self.melee,
            CooldownClass::Ranged => &mut self.ranged,
        }
    }
}
