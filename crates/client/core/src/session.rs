//! Local-player session logic.
//!
//! A [`ClientSession`] owns the replica world plus one state machine per
//! local controller (couch co-op shares one connection). Input comes in
//! as per-tick frames; everything going back to the server is queued as
//! [`Request`] values and drained by the transport layer.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use hearth_core::protocol::{ActionRequest, Broadcast, FieldUpdate, Request};
use hearth_core::{
    AttackKind, CharacterParts, ClientId, CreationInput, CreationPreview, CreationSeeds,
    CreationSequencer, EntityId, GameConfig, GameTime, ItemCategory, ItemInstanceId,
};

use crate::combat::AttackDriver;
use crate::input::{Button, InputFrame, MovementIntent};
use crate::replica::{ClientWorld, LocalSignal};

/// Where one local controller currently is in its play cycle.
#[derive(Clone, Debug)]
enum Phase {
    /// Driving the creation panel.
    Creating(CreationSequencer),
    /// Creation submitted; the spawn broadcast has not arrived yet.
    AwaitingSpawn,
    /// Controlling a live actor.
    Playing { actor: EntityId },
}

/// One local controller's state.
struct LocalPlayer {
    controller_index: u8,
    phase: Phase,
    attack: AttackDriver,
    inventory_open: bool,
    facing: Vec2,
    intent: MovementIntent,
}

impl LocalPlayer {
    fn actor(&self) -> Option<EntityId> {
        match self.phase {
            Phase::Playing { actor } => Some(actor),
            _ => None,
        }
    }
}

/// Client-side session: replicas plus local controllers.
pub struct ClientSession {
    client: ClientId,
    config: GameConfig,
    parts: CharacterParts,
    world: ClientWorld,
    players: Vec<LocalPlayer>,
    outbox: Vec<Request>,
    rng: StdRng,
}

impl ClientSession {
    pub fn new(
        client: ClientId,
        name: impl Into<String>,
        config: GameConfig,
        parts: CharacterParts,
        world: ClientWorld,
    ) -> Self {
        let mut session = Self {
            client,
            config,
            parts,
            world,
            players: Vec::new(),
            outbox: Vec::new(),
            rng: StdRng::from_entropy(),
        };
        session.outbox.push(Request::Hello { name: name.into() });
        session
    }

    /// Fixes the randomize seed; creation previews become deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn world(&self) -> &ClientWorld {
        &self.world
    }

    /// Requests queued since the last drain, in submission order.
    pub fn drain_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    /// Adds a local controller and opens its creation panel with a
    /// random male look.
    pub fn add_local_player(&mut self, controller_index: u8) {
        let sequencer = self.fresh_sequencer(controller_index);
        info!(controller_index, "local player joined, creation opened");
        self.players.push(LocalPlayer {
            controller_index,
            phase: Phase::Creating(sequencer),
            attack: AttackDriver::default(),
            inventory_open: false,
            facing: Vec2::new(0.0, -1.0),
            intent: MovementIntent::default(),
        });
    }

    fn fresh_sequencer(&mut self, controller_index: u8) -> CreationSequencer {
        let seeds = CreationSeeds {
            body: self.rng.gen_range(0..self.parts.num_male_bodies.max(1)),
            eyes: self.rng.gen_range(0..self.parts.male_eyes.len().max(1)),
            hair: self.rng.gen_range(0..self.parts.male_hair.len().max(1)),
            outfit: self.rng.gen_range(0..self.parts.male_outfits.len().max(1)),
        };
        CreationSequencer::start(controller_index, &self.parts, seeds)
    }

    fn player_mut(&mut self, controller_index: u8) -> Option<&mut LocalPlayer> {
        self.players
            .iter_mut()
            .find(|player| player.controller_index == controller_index)
    }

    /// Current creation panel contents for a controller, if it is in
    /// the creation phase.
    pub fn creation_preview(&self, controller_index: u8) -> Option<CreationPreview> {
        self.players
            .iter()
            .find(|player| player.controller_index == controller_index)
            .and_then(|player| match &player.phase {
                Phase::Creating(sequencer) => Some(sequencer.preview(&self.parts)),
                _ => None,
            })
    }

    /// What the movement layer should apply for a controller this tick.
    /// `None` until the controller has a live actor.
    pub fn movement_intent(&self, controller_index: u8) -> Option<MovementIntent> {
        self.players
            .iter()
            .find(|player| player.controller_index == controller_index)
            .filter(|player| player.actor().is_some())
            .map(|player| player.intent)
    }

    pub fn is_inventory_open(&self, controller_index: u8) -> bool {
        self.players
            .iter()
            .find(|player| player.controller_index == controller_index)
            .is_some_and(|player| player.inventory_open)
    }

    /// Feeds one input frame for one controller.
    pub fn handle_input(&mut self, now: GameTime, controller_index: u8, frame: &InputFrame) {
        let Some(index) = self
            .players
            .iter()
            .position(|player| player.controller_index == controller_index)
        else {
            return;
        };
        match &self.players[index].phase {
            Phase::Creating(_) => self.drive_creation(index, frame),
            Phase::AwaitingSpawn => {}
            Phase::Playing { actor } => {
                let actor = *actor;
                self.drive_play(now, index, actor, frame);
            }
        }
        self.flush_attacks(now);
    }

    fn drive_creation(&mut self, index: usize, frame: &InputFrame) {
        let inputs: Vec<CreationInput> = frame
            .edges
            .iter()
            .filter_map(|button| match button {
                Button::Previous => Some(CreationInput::Previous),
                Button::Next => Some(CreationInput::Next),
                Button::Confirm => Some(CreationInput::Confirm),
                _ => None,
            })
            .collect();
        for input in inputs {
            let finished = match &mut self.players[index].phase {
                Phase::Creating(sequencer) => sequencer.step(input, &self.parts),
                _ => return,
            };
            if let Some(request) = finished {
                debug!(
                    controller_index = self.players[index].controller_index,
                    "creation finished, requesting spawn"
                );
                self.outbox.push(Request::SpawnCharacter(request));
                self.players[index].phase = Phase::AwaitingSpawn;
            }
        }
    }

    fn drive_play(&mut self, now: GameTime, index: usize, actor: EntityId, frame: &InputFrame) {
        // Corpses take no input; the despawn broadcast routes the
        // controller back to creation shortly.
        let alive = self
            .world
            .actor(actor)
            .is_some_and(|replica| replica.state.is_alive());
        if !alive {
            self.players[index].intent = MovementIntent::default();
            return;
        }

        if frame.pressed(Button::ToggleInventory) {
            self.players[index].inventory_open = !self.players[index].inventory_open;
        }
        // An open inventory panel captures movement and attack input.
        if self.players[index].inventory_open {
            self.players[index].intent = MovementIntent::default();
            return;
        }

        self.players[index].intent = MovementIntent {
            direction: frame.movement,
            walk: frame.walk,
        };
        if let Some(direction) = frame.movement.try_normalize() {
            self.players[index].facing = direction;
        }

        if frame.pressed(Button::Interact) {
            self.outbox.push(Request::Action {
                actor,
                action: ActionRequest::Interact,
            });
        }

        if frame.pressed(Button::Attack) {
            // One physical button; the equipped weapon decides which
            // attack path fires.
            let kind = match self
                .world
                .actor(actor)
                .and_then(|replica| replica.state.weapon_category(self.world.catalog()))
            {
                Some(ItemCategory::Ranged) => AttackKind::Ranged,
                _ => AttackKind::Melee,
            };
            self.start_attack(now, index, actor, kind);
        }
    }

    fn start_attack(&mut self, now: GameTime, index: usize, actor: EntityId, kind: AttackKind) {
        if self.players[index].attack.try_start(now, kind, &self.config) {
            // Optimistic animation; the broadcast echo skips the local
            // actor so the cue fires once.
            self.world.presenter().attack_cue(actor, kind);
        }
    }

    /// Emits attack requests whose animation lead has elapsed.
    fn flush_attacks(&mut self, now: GameTime) {
        let mut due = Vec::new();
        for player in &mut self.players {
            if let Some(actor) = player.actor() {
                if let Some(kind) = player.attack.poll(now) {
                    due.push((actor, kind));
                }
            }
        }
        for (actor, kind) in due {
            let action = match kind {
                AttackKind::Melee => ActionRequest::MeleeAttack,
                AttackKind::Ranged => ActionRequest::RangedAttack,
            };
            self.outbox.push(Request::Action { actor, action });
        }
    }

    /// Reports the actor's position from the movement layer; queues a
    /// transform sample with the current input-derived facing.
    pub fn sync_transform(&mut self, controller_index: u8, position: Vec2) {
        let Some(player) = self.player_mut(controller_index) else {
            return;
        };
        let Some(actor) = player.actor() else {
            return;
        };
        let facing = player.facing;
        self.outbox.push(Request::UpdateTransform {
            actor,
            position,
            facing,
        });
    }

    /// Equips a named item from the open inventory panel.
    pub fn equip_item(&mut self, controller_index: u8, item: impl Into<String>) {
        let Some(player) = self.player_mut(controller_index) else {
            return;
        };
        if !player.inventory_open {
            return;
        }
        if let Some(actor) = player.actor() {
            self.outbox.push(Request::Action {
                actor,
                action: ActionRequest::EquipItem { item: item.into() },
            });
        }
    }

    /// Drops a carried instance from the open inventory panel.
    pub fn drop_item(&mut self, controller_index: u8, instance: ItemInstanceId) {
        let Some(player) = self.player_mut(controller_index) else {
            return;
        };
        if !player.inventory_open {
            return;
        }
        if let Some(actor) = player.actor() {
            self.outbox.push(Request::Action {
                actor,
                action: ActionRequest::DropItem { instance },
            });
        }
    }

    /// Applies one replicated field write.
    pub fn apply_field(&mut self, update: FieldUpdate) {
        self.world.apply_field(update);
    }

    /// Applies one broadcast effect, routing lifecycle transitions to
    /// the affected local controller.
    pub fn apply_broadcast(&mut self, broadcast: Broadcast) {
        // Capture routing facts the application below will erase.
        let spawned_local = match &broadcast {
            Broadcast::ActorSpawned {
                actor,
                owner,
                controller_index,
                ..
            } if *owner == self.client => Some((*actor, *controller_index)),
            _ => None,
        };
        let despawned_controller = match &broadcast {
            Broadcast::ActorDespawned { actor, .. } => self
                .world
                .actor(*actor)
                .map(|replica| replica.state.controller_index),
            _ => None,
        };

        let signal = self.world.apply_broadcast(broadcast);

        if let Some((actor, controller_index)) = spawned_local {
            if let Some(player) = self.player_mut(controller_index) {
                info!(controller_index, %actor, "local actor spawned");
                player.phase = Phase::Playing { actor };
                player.inventory_open = false;
            }
        }

        if signal == Some(LocalSignal::RestartCreation) {
            if let Some(controller_index) = despawned_controller {
                let sequencer = self.fresh_sequencer(controller_index);
                if let Some(player) = self.player_mut(controller_index) {
                    info!(controller_index, "local actor decomposed, creation restarts");
                    player.phase = Phase::Creating(sequencer);
                    player.attack.cancel();
                    player.inventory_open = false;
                    player.intent = MovementIntent::default();
                }
            }
        }
    }
}
