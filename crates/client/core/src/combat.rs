//! Optimistic attack timing.
//!
//! The swing animation starts the moment the button is pressed; the
//! request goes out a fixed lead later so the server-side hit lines up
//! with the animation's contact frame. The local cooldown gates mirror
//! the server's and only suppress requests that would be rejected
//! anyway; the server gate remains the one that counts.

use hearth_core::{AttackKind, CooldownClass, CooldownGates, GameConfig, GameTime};

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingAttack {
    kind: AttackKind,
    send_at: GameTime,
}

/// Per-player attack driver: local cooldown mirror plus the delayed
/// request slot. One attack can be in flight at a time.
#[derive(Debug, Default)]
pub struct AttackDriver {
    gates: CooldownGates,
    pending: Option<PendingAttack>,
}

impl AttackDriver {
    /// Tries to begin an attack. True means the caller should start the
    /// animation now; the request follows from [`AttackDriver::poll`].
    pub fn try_start(&mut self, now: GameTime, kind: AttackKind, config: &GameConfig) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let (class, cooldown) = match kind {
            AttackKind::Melee => (CooldownClass::Melee, config.melee_cooldown),
            AttackKind::Ranged => (CooldownClass::Ranged, config.ranged_cooldown),
        };
        if !self.gates.gate_mut(class).try_accept(now, cooldown) {
            return false;
        }
        self.pending = Some(PendingAttack {
            kind,
            send_at: now + GameConfig::ATTACK_REQUEST_LEAD,
        });
        true
    }

    /// Returns the attack whose lead has elapsed, at most once.
    pub fn poll(&mut self, now: GameTime) -> Option<AttackKind> {
        let pending = self.pending?;
        if now >= pending.send_at {
            self.pending = None;
            Some(pending.kind)
        } else {
            None
        }
    }

    /// Drops any queued request, e.g. when the actor died mid-swing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
