//! Display collaborator seam.
//!
//! The replica layer never draws anything; it reports changes through
//! this trait and the embedding frontend decides what a health bar or a
//! pickup toast looks like. Every method has a no-op default so a
//! frontend implements only what it renders.

use hearth_core::protocol::{DespawnReason, PickupAlert};
use hearth_core::{AttackKind, EntityId};

pub trait HudPresenter: Send + Sync {
    /// An actor became visible, labeled with its owner's display name.
    fn actor_appeared(&self, _actor: EntityId, _name: &str) {}

    fn actor_died(&self, _actor: EntityId) {}

    fn actor_gone(&self, _actor: EntityId, _reason: DespawnReason) {}

    /// Fires only when the value changed, never on redelivery.
    fn health_changed(&self, _actor: EntityId, _current: i32, _max: i32) {}

    fn mana_changed(&self, _actor: EntityId, _current: i32, _max: i32) {}

    fn coins_changed(&self, _actor: EntityId, _coins: i32) {}

    /// Carried or equipped set changed; the panel re-renders from the
    /// replica, it is never patched incrementally.
    fn inventory_changed(&self, _actor: EntityId) {}

    /// Pickup toast for the locally owned actor.
    fn show_alert(&self, _alert: &PickupAlert) {}

    /// Swing or shoot animation cue for any visible actor.
    fn attack_cue(&self, _actor: EntityId, _kind: AttackKind) {}
}

/// Presenter that renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl HudPresenter for NullPresenter {}

/// Recording presenter for tests across the workspace.
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    pub enum HudCall {
        Appeared(EntityId, String),
        Died(EntityId),
        Gone(EntityId, DespawnReason),
        Health(EntityId, i32, i32),
        Mana(EntityId, i32, i32),
        Coins(EntityId, i32),
        Inventory(EntityId),
        Alert(String),
        Attack(EntityId, AttackKind),
    }

    #[derive(Debug, Default)]
    pub struct RecordingPresenter {
        pub calls: Mutex<Vec<HudCall>>,
    }

    impl RecordingPresenter {
        pub fn calls(&self) -> Vec<HudCall> {
            self.calls.lock().expect("presenter lock").clone()
        }

        pub fn count(&self, matches: impl Fn(&HudCall) -> bool) -> usize {
            self.calls().iter().filter(|call| matches(call)).count()
        }

        fn record(&self, call: HudCall) {
            self.calls.lock().expect("presenter lock").push(call);
        }
    }

    impl HudPresenter for RecordingPresenter {
        fn actor_appeared(&self, actor: EntityId, name: &str) {
            self.record(HudCall::Appeared(actor, name.to_string()));
        }
        fn actor_died(&self, actor: EntityId) {
            self.record(HudCall::Died(actor));
        }
        fn actor_gone(&self, actor: EntityId, reason: DespawnReason) {
            self.record(HudCall::Gone(actor, reason));
        }
        fn health_changed(&self, actor: EntityId, current: i32, max: i32) {
            self.record(HudCall::Health(actor, current, max));
        }
        fn mana_changed(&self, actor: EntityId, current: i32, max: i32) {
            self.record(HudCall::Mana(actor, current, max));
        }
        fn coins_changed(&self, actor: EntityId, coins: i32) {
            self.record(HudCall::Coins(actor, coins));
        }
        fn inventory_changed(&self, actor: EntityId) {
            self.record(HudCall::Inventory(actor));
        }
        fn show_alert(&self, alert: &PickupAlert) {
            self.record(HudCall::Alert(alert.display_name.clone()));
        }
        fn attack_cue(&self, actor: EntityId, kind: AttackKind) {
            self.record(HudCall::Attack(actor, kind));
        }
    }
}
