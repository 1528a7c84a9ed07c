//! Client-side replicas of server-owned actor state.
//!
//! Replication traffic is at-least-once: every application path in this
//! module is a no-op when it would not change the replica, so duplicate
//! delivery never fires a presenter callback twice.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use hearth_core::protocol::{ActorField, Broadcast, DespawnReason, FieldUpdate};
use hearth_core::{ActorState, ClientId, EntityId, ItemOracle};

use crate::presenter::HudPresenter;

/// One-way replicated cell. The server writes, the client observes;
/// [`SyncField::set`] reports whether the value actually changed so
/// display side effects run once per change, not once per delivery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncField<T> {
    value: T,
}

impl<T: Copy + PartialEq> SyncField<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Overwrites the cell. True when the stored value changed.
    #[must_use]
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }
}

/// Shadow of one server-side actor.
///
/// Structural state (inventory, equipment, transform) lives in the same
/// [`ActorState`] the server uses, mutated through the same helpers, so
/// a replica that applied every broadcast matches the server exactly.
/// The scalar HUD fields sit in [`SyncField`] cells on top.
#[derive(Clone, Debug)]
pub struct ActorReplica {
    pub state: ActorState,
    pub health: SyncField<i32>,
    pub max_health: SyncField<i32>,
    pub mana: SyncField<i32>,
    pub max_mana: SyncField<i32>,
    pub coins: SyncField<i32>,
    /// Latched by the death broadcast. A health field update alone does
    /// not set it, so the death cue fires regardless of which of the
    /// two topics delivered first.
    died: bool,
}

impl ActorReplica {
    fn from_state(state: ActorState) -> Self {
        Self {
            health: SyncField::new(state.health.current),
            max_health: SyncField::new(state.health.max),
            mana: SyncField::new(state.mana.current),
            max_mana: SyncField::new(state.mana.max),
            coins: SyncField::new(state.coins),
            died: false,
            state,
        }
    }
}

/// A signal the embedding session must act on; replicas themselves never
/// issue requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalSignal {
    /// The locally owned actor decomposed; creation starts over.
    RestartCreation,
}

/// All replicas one client observes, plus the client-name directory.
pub struct ClientWorld {
    local_client: ClientId,
    actors: HashMap<EntityId, ActorReplica>,
    names: HashMap<ClientId, String>,
    catalog: Arc<dyn ItemOracle>,
    presenter: Arc<dyn HudPresenter>,
}

impl ClientWorld {
    pub fn new(
        local_client: ClientId,
        catalog: Arc<dyn ItemOracle>,
        presenter: Arc<dyn HudPresenter>,
    ) -> Self {
        Self {
            local_client,
            actors: HashMap::new(),
            names: HashMap::new(),
            catalog,
            presenter,
        }
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorReplica> {
        self.actors.get(&id)
    }

    pub fn catalog(&self) -> &dyn ItemOracle {
        &*self.catalog
    }

    pub fn presenter(&self) -> &dyn HudPresenter {
        &*self.presenter
    }

    pub fn client_name(&self, client: ClientId) -> Option<&str> {
        self.names.get(&client).map(String::as_str)
    }

    /// The locally owned actor with the given controller index, if one
    /// is currently spawned.
    pub fn local_actor(&self, controller_index: u8) -> Option<EntityId> {
        self.actors
            .values()
            .find(|replica| {
                replica.state.owner == self.local_client
                    && replica.state.controller_index == controller_index
            })
            .map(|replica| replica.state.id)
    }

    fn is_local(&self, id: EntityId) -> bool {
        self.actors
            .get(&id)
            .is_some_and(|replica| replica.state.owner == self.local_client)
    }

    /// Applies one replicated field write. Unknown actors are skipped;
    /// their spawn broadcast has simply not arrived yet on this topic.
    pub fn apply_field(&mut self, update: FieldUpdate) {
        let Some(replica) = self.actors.get_mut(&update.actor) else {
            trace!(actor = %update.actor, "field update for unknown actor");
            return;
        };
        let actor = update.actor;
        match update.field {
            ActorField::Health(value) => {
                if replica.health.set(value) {
                    replica.state.health.current = value;
                    let max = replica.max_health.get();
                    self.presenter.health_changed(actor, value, max);
                }
            }
            ActorField::MaxHealth(value) => {
                if replica.max_health.set(value) {
                    replica.state.health.max = value;
                    let current = replica.health.get();
                    self.presenter.health_changed(actor, current, value);
                }
            }
            ActorField::Mana(value) => {
                if replica.mana.set(value) {
                    replica.state.mana.current = value;
                    let max = replica.max_mana.get();
                    self.presenter.mana_changed(actor, value, max);
                }
            }
            ActorField::MaxMana(value) => {
                if replica.max_mana.set(value) {
                    replica.state.mana.max = value;
                    let current = replica.mana.get();
                    self.presenter.mana_changed(actor, current, value);
                }
            }
            ActorField::Coins(value) => {
                if replica.coins.set(value) {
                    replica.state.coins = value;
                    self.presenter.coins_changed(actor, value);
                }
            }
        }
    }

    /// Applies one broadcast effect. Always safe to call twice with the
    /// same broadcast.
    pub fn apply_broadcast(&mut self, broadcast: Broadcast) -> Option<LocalSignal> {
        match broadcast {
            Broadcast::ClientJoined { client, name } => {
                self.names.insert(client, name);
            }
            Broadcast::ActorSpawned {
                actor,
                owner,
                controller_index,
                appearance,
                position,
            } => {
                if self.actors.contains_key(&actor) {
                    return None;
                }
                // Same constructor the server uses, so the replica
                // starts structurally identical.
                let state =
                    ActorState::new(actor, owner, controller_index, appearance, position);
                self.actors.insert(actor, ActorReplica::from_state(state));
                let name = self
                    .names
                    .get(&owner)
                    .cloned()
                    .unwrap_or_else(|| "Player".to_string());
                debug!(%actor, %owner, name, "actor replica created");
                self.presenter.actor_appeared(actor, &name);
            }
            Broadcast::ActorMoved {
                actor,
                position,
                facing,
            } => {
                if let Some(replica) = self.actors.get_mut(&actor) {
                    replica.state.position = position;
                    replica.state.facing = facing;
                }
            }
            Broadcast::ItemAdded {
                actor,
                instance,
                alert,
            } => {
                let local = self.is_local(actor);
                if let Some(replica) = self.actors.get_mut(&actor) {
                    // Duplicate instance ids are rejected inside, which
                    // makes redelivery harmless.
                    if replica.state.apply_add(instance) {
                        self.presenter.inventory_changed(actor);
                        if local {
                            if let Some(alert) = alert {
                                self.presenter.show_alert(&alert);
                            }
                        }
                    }
                }
            }
            Broadcast::ItemEquipped { actor, instance } => {
                if let Some(replica) = self.actors.get_mut(&actor) {
                    replica.state.apply_equip(instance, &*self.catalog);
                    self.presenter.inventory_changed(actor);
                }
            }
            Broadcast::ItemDropped { actor, instance } => {
                if let Some(replica) = self.actors.get_mut(&actor) {
                    if replica.state.apply_drop(instance).is_some() {
                        self.presenter.inventory_changed(actor);
                    }
                }
            }
            Broadcast::AttackSwung { actor, kind } => {
                // Locally owned actors already played the cue
                // optimistically when the button was pressed.
                if !self.is_local(actor) {
                    self.presenter.attack_cue(actor, kind);
                }
            }
            Broadcast::ProjectileSpawned { .. } => {
                // The projectile entity replicates through the world
                // layer; nothing to track per actor.
            }
            Broadcast::ActorDied { actor } => {
                if let Some(replica) = self.actors.get_mut(&actor) {
                    if !replica.died {
                        replica.died = true;
                        if replica.health.set(0) {
                            replica.state.health.current = 0;
                        }
                        self.presenter.actor_died(actor);
                    }
                }
            }
            Broadcast::ActorDespawned { actor, reason } => {
                let was_local = self.is_local(actor);
                if self.actors.remove(&actor).is_some() {
                    self.presenter.actor_gone(actor, reason);
                    if was_local && reason == DespawnReason::Decomposed {
                        return Some(LocalSignal::RestartCreation);
                    }
                }
            }
        }
        None
    }
}
