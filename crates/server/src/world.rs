//! The authoritative session world.
//!
//! `ServerWorld` is the single mutator of actor state. It validates
//! every incoming request, applies accepted mutations through the shared
//! `hearth-core` helpers, and queues the replication traffic observers
//! need. Rejections are silent no-ops on the wire; they surface here
//! only as a [`Rejection`] for logs and tests.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use hearth_core::protocol::{
    ActionRequest, ActorField, Broadcast, DespawnReason, FieldUpdate, PickupAlert, Rejection,
    Request,
};
use hearth_core::{
    ActorState, Appearance, AttackKind, CharacterParts, ClientId, CooldownClass, CreationRequest,
    EntityId, GameConfig, GameTime, ItemInstance, ItemInstanceId, ItemOracle,
    melee_targets, plan_ranged_shot, weapon_damage,
};

use crate::collab::{InteractionHost, WorldSpawner};
use crate::events::Event;
use crate::tasks::{TaskKind, TaskQueue};

/// Server-side world state for one gameplay session.
pub struct ServerWorld {
    config: GameConfig,
    parts: CharacterParts,
    catalog: Arc<dyn ItemOracle>,
    spawner: Arc<dyn WorldSpawner>,
    interactions: Arc<dyn InteractionHost>,

    actors: HashMap<EntityId, ActorState>,
    client_names: HashMap<ClientId, String>,
    next_entity: u32,
    next_instance: u32,

    clock: GameTime,
    spawn_point: Vec2,
    tasks: TaskQueue,
    outbox: Vec<Event>,
    rng: StdRng,
}

impl ServerWorld {
    pub fn new(
        config: GameConfig,
        parts: CharacterParts,
        catalog: Arc<dyn ItemOracle>,
        spawner: Arc<dyn WorldSpawner>,
        interactions: Arc<dyn InteractionHost>,
    ) -> Self {
        Self {
            config,
            parts,
            catalog,
            spawner,
            interactions,
            actors: HashMap::new(),
            client_names: HashMap::new(),
            next_entity: 1,
            next_instance: 1,
            clock: GameTime::ZERO,
            spawn_point: Vec2::ZERO,
            tasks: TaskQueue::default(),
            outbox: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixes the RNG seed; drop jitter becomes deterministic for tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_spawn_point(mut self, spawn_point: Vec2) -> Self {
        self.spawn_point = spawn_point;
        self
    }

    pub fn clock(&self) -> GameTime {
        self.clock
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Replication traffic queued since the last drain, in emission
    /// order. The session worker publishes this onto the event bus.
    pub fn drain_outbox(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.outbox)
    }

    /// Advances the authoritative clock and runs every scheduled task
    /// that came due. Time never moves backwards.
    pub fn advance_clock(&mut self, now: GameTime) {
        debug_assert!(now >= self.clock);
        self.clock = now;
        for task in self.tasks.drain_due(now) {
            match task.kind {
                TaskKind::Decompose => self.decompose(task.actor),
            }
        }
    }

    /// Entry point for every client-to-server message.
    pub fn handle_request(&mut self, client: ClientId, request: Request) -> Result<(), Rejection> {
        let outcome = match request {
            Request::Hello { name } => {
                self.register_client(client, name);
                Ok(())
            }
            Request::SpawnCharacter(creation) => {
                self.spawn_character(client, creation).map(|_| ())
            }
            Request::Action { actor, action } => self.handle_action(client, actor, action),
            Request::UpdateTransform {
                actor,
                position,
                facing,
            } => self.update_transform(client, actor, position, facing),
        };
        if let Err(rejection) = &outcome {
            debug!(%client, %rejection, "request rejected");
        }
        outcome
    }

    /// Records a connection's display name and announces it.
    pub fn register_client(&mut self, client: ClientId, name: String) {
        info!(%client, name, "client registered");
        self.client_names.insert(client, name.clone());
        self.emit(Broadcast::ClientJoined { client, name });
    }

    pub fn client_name(&self, client: ClientId) -> Option<&str> {
        self.client_names.get(&client).map(String::as_str)
    }

    /// Applies a client-authoritative transform sample. A zero facing
    /// vector keeps the previous facing; facing stays normalized.
    pub fn update_transform(
        &mut self,
        client: ClientId,
        actor: EntityId,
        position: Vec2,
        facing: Vec2,
    ) -> Result<(), Rejection> {
        let state = self.actors.get_mut(&actor).ok_or(Rejection::NoSuchActor)?;
        if state.owner != client {
            return Err(Rejection::NotOwner);
        }
        if !state.is_alive() {
            return Err(Rejection::ActorDead);
        }
        state.position = position;
        if let Some(facing) = facing.try_normalize() {
            state.facing = facing;
        }
        let facing = state.facing;
        self.emit(Broadcast::ActorMoved {
            actor,
            position,
            facing,
        });
        Ok(())
    }

    /// Validates a creation request and instantiates the character.
    ///
    /// The client-side sequencer already clamps indices, but that logic
    /// is advisory; the bounds check here is the one that counts.
    pub fn spawn_character(
        &mut self,
        client: ClientId,
        creation: CreationRequest,
    ) -> Result<EntityId, Rejection> {
        self.parts.validate(&creation)?;
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        let appearance = Appearance {
            body: creation.body,
            eyes: creation.eyes,
            hair: creation.hair,
            hair_color: creation.hair_color,
            class: creation.class,
        };
        let actor = ActorState::new(
            id,
            client,
            creation.controller_index,
            appearance,
            self.spawn_point,
        );
        let position = actor.position;
        self.actors.insert(id, actor);
        info!(%client, actor = %id, class = creation.class, "character spawned");
        self.emit(Broadcast::ActorSpawned {
            actor: id,
            owner: client,
            controller_index: creation.controller_index,
            appearance,
            position,
        });
        Ok(id)
    }

    fn handle_action(
        &mut self,
        client: ClientId,
        actor: EntityId,
        action: ActionRequest,
    ) -> Result<(), Rejection> {
        let owner = self
            .actors
            .get(&actor)
            .ok_or(Rejection::NoSuchActor)?
            .owner;
        if owner != client {
            return Err(Rejection::NotOwner);
        }
        match action {
            ActionRequest::MeleeAttack => self.melee_attack(actor),
            ActionRequest::RangedAttack => self.ranged_attack(actor),
            ActionRequest::Interact => self.interact(actor),
            ActionRequest::EquipItem { item } => self.equip_item(actor, &item),
            ActionRequest::DropItem { instance } => self.drop_item(actor, instance),
        }
    }

    /// Resolves a melee swing: cooldown-gated, canonical hit outcome
    /// computed here and nowhere else.
    pub fn melee_attack(&mut self, id: EntityId) -> Result<(), Rejection> {
        let melee_cooldown = self.config.melee_cooldown;
        let clock = self.clock;
        let attacker = {
            let actor = self.actors.get_mut(&id).ok_or(Rejection::NoSuchActor)?;
            if !actor.is_alive() {
                return Err(Rejection::ActorDead);
            }
            if !actor
                .cooldowns
                .gate_mut(CooldownClass::Melee)
                .try_accept(clock, melee_cooldown)
            {
                return Err(Rejection::CooldownActive);
            }
            actor.clone()
        };
        let damage = weapon_damage(&attacker, &*self.catalog);
        let targets = melee_targets(
            &attacker,
            self.actors.values().map(|actor| (actor.id, actor.position)),
        );
        self.emit(Broadcast::AttackSwung {
            actor: id,
            kind: AttackKind::Melee,
        });
        debug!(actor = %id, damage, hits = targets.len(), "melee swing");
        for target in targets {
            self.damage_actor(target, damage);
        }
        Ok(())
    }

    /// Spawns one projectile along the attacker's snapped facing.
    /// Requires an equipped ranged weapon; the projectile's flight is
    /// owned by the world, not by this session.
    pub fn ranged_attack(&mut self, id: EntityId) -> Result<(), Rejection> {
        let ranged_cooldown = self.config.ranged_cooldown;
        let clock = self.clock;
        let shot = {
            let actor = self.actors.get_mut(&id).ok_or(Rejection::NoSuchActor)?;
            if !actor.is_alive() {
                return Err(Rejection::ActorDead);
            }
            let shot =
                plan_ranged_shot(actor, &*self.catalog).ok_or(Rejection::NoRangedWeapon)?;
            if !actor
                .cooldowns
                .gate_mut(CooldownClass::Ranged)
                .try_accept(clock, ranged_cooldown)
            {
                return Err(Rejection::CooldownActive);
            }
            shot
        };
        self.spawner
            .spawn_projectile(shot.kind, shot.origin, shot.direction);
        self.emit(Broadcast::ProjectileSpawned {
            attacker: id,
            kind: shot.kind,
            origin: shot.origin,
            direction: shot.direction,
        });
        self.emit(Broadcast::AttackSwung {
            actor: id,
            kind: AttackKind::Ranged,
        });
        debug!(actor = %id, kind = %shot.kind, "projectile spawned");
        Ok(())
    }

    fn interact(&mut self, id: EntityId) -> Result<(), Rejection> {
        let actor = self.actors.get(&id).ok_or(Rejection::NoSuchActor)?;
        if !actor.is_alive() {
            return Err(Rejection::ActorDead);
        }
        if self.interactions.interact(id) {
            Ok(())
        } else {
            Err(Rejection::NoInteractable)
        }
    }

    /// Adds one instance of the named item to an actor's inventory.
    /// Called when the world reports a pickup collection, or by grants.
    pub fn add_item(
        &mut self,
        id: EntityId,
        name: &str,
        alert: bool,
    ) -> Result<ItemInstanceId, Rejection> {
        let (instance, alert_payload) = {
            let def = self.catalog.resolve(name).ok_or(Rejection::UnknownItem)?;
            let actor = self.actors.get_mut(&id).ok_or(Rejection::NoSuchActor)?;
            if !actor.inventory.can_add() {
                return Err(Rejection::InventoryFull);
            }
            let instance = ItemInstance::new(ItemInstanceId(self.next_instance), &def.name);
            self.next_instance += 1;
            // apply_add cannot fail after the can_add check; ids are fresh.
            actor.apply_add(instance.clone());
            let alert_payload = alert.then(|| PickupAlert {
                icon: def.icon.clone(),
                display_name: def.display_name.clone(),
                tint: def.tint,
            });
            (instance, alert_payload)
        };
        let instance_id = instance.id;
        self.emit(Broadcast::ItemAdded {
            actor: id,
            instance,
            alert: alert_payload,
        });
        Ok(instance_id)
    }

    /// Equips the first carried copy of the named item.
    pub fn equip_item(&mut self, id: EntityId, name: &str) -> Result<(), Rejection> {
        let instance = {
            let actor = self.actors.get(&id).ok_or(Rejection::NoSuchActor)?;
            if !actor.is_alive() {
                return Err(Rejection::ActorDead);
            }
            self.catalog.resolve(name).ok_or(Rejection::UnknownItem)?;
            actor
                .inventory
                .first_named(name)
                .map(|item| item.id)
                .ok_or(Rejection::NoSuchInstance)?
        };
        let catalog = Arc::clone(&self.catalog);
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.apply_equip(instance, &*catalog);
        }
        self.emit(Broadcast::ItemEquipped {
            actor: id,
            instance,
        });
        Ok(())
    }

    /// Drops a carried instance into the world near the actor.
    pub fn drop_item(&mut self, id: EntityId, instance: ItemInstanceId) -> Result<(), Rejection> {
        let (name, position) = {
            let actor = self.actors.get_mut(&id).ok_or(Rejection::NoSuchActor)?;
            if !actor.is_alive() {
                return Err(Rejection::ActorDead);
            }
            let effect = actor
                .apply_drop(instance)
                .ok_or(Rejection::NoSuchInstance)?;
            (effect.removed.instance.name, actor.position)
        };
        let scatter = self.scatter();
        self.spawner.spawn_pickup(&name, position + scatter);
        self.emit(Broadcast::ItemDropped {
            actor: id,
            instance,
        });
        Ok(())
    }

    /// Applies damage to an actor and runs the death transition when
    /// health reaches zero. Damage to the dead is ignored.
    pub fn damage_actor(&mut self, id: EntityId, damage: i32) {
        let (health, died) = {
            let Some(actor) = self.actors.get_mut(&id) else {
                return;
            };
            if !actor.is_alive() {
                return;
            }
            actor.health.deplete(damage);
            (actor.health.current, !actor.is_alive())
        };
        self.emit_field(id, ActorField::Health(health));
        if died {
            info!(actor = %id, "actor died");
            self.emit(Broadcast::ActorDied { actor: id });
            self.tasks.schedule(
                self.clock + GameConfig::DECOMPOSITION_DELAY,
                id,
                TaskKind::Decompose,
            );
        }
    }

    /// Sets an actor's mana, clamped by its meter. No death semantics.
    pub fn set_mana(&mut self, id: EntityId, value: i32) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.mana.set(value);
            let current = actor.mana.current;
            self.emit_field(id, ActorField::Mana(current));
        }
    }

    /// Adjusts an actor's coin purse.
    pub fn grant_coins(&mut self, id: EntityId, amount: i32) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.coins += amount;
            let coins = actor.coins;
            self.emit_field(id, ActorField::Coins(coins));
        }
    }

    /// Removes every actor owned by a connection that went away.
    pub fn disconnect(&mut self, client: ClientId) {
        self.client_names.remove(&client);
        let owned: Vec<EntityId> = self
            .actors
            .values()
            .filter(|actor| actor.owner == client)
            .map(|actor| actor.id)
            .collect();
        for id in owned {
            self.despawn(id, DespawnReason::Disconnected);
        }
    }

    /// The corpse releases its carried items as world pickups and the
    /// actor leaves the world, routing its owner back into creation.
    fn decompose(&mut self, id: EntityId) {
        let Some(actor) = self.actors.get(&id) else {
            return;
        };
        let position = actor.position;
        let carried: Vec<String> = actor
            .inventory
            .carried
            .iter()
            .map(|item| item.name.clone())
            .collect();
        for name in carried {
            let scatter = self.scatter();
            self.spawner.spawn_pickup(&name, position + scatter);
        }
        self.despawn(id, DespawnReason::Decomposed);
    }

    fn despawn(&mut self, id: EntityId, reason: DespawnReason) {
        if self.actors.remove(&id).is_some() {
            self.tasks.cancel_for(id);
            info!(actor = %id, ?reason, "actor despawned");
            self.emit(Broadcast::ActorDespawned { actor: id, reason });
        }
    }

    fn scatter(&mut self) -> Vec2 {
        let x = self.rng.gen_range(-1.0_f32..1.0);
        let y = self.rng.gen_range(-1.0_f32..1.0);
        Vec2::new(x, y) * GameConfig::DROP_SCATTER
    }

    fn emit(&mut self, broadcast: Broadcast) {
        self.outbox.push(Event::Effect(broadcast));
    }

    fn emit_field(&mut self, actor: EntityId, field: ActorField) {
        self.outbox.push(Event::Field(FieldUpdate { actor, field }));
    }
}
