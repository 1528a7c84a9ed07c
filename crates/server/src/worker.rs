//! Session worker that owns the authoritative world.
//!
//! All mutation funnels through one task. Commands arrive on an mpsc
//! channel, replication traffic drains onto the [`EventBus`] after every
//! command, so observers see field updates and effects in the order the
//! world produced them.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use hearth_core::protocol::{Rejection, Request};
use hearth_core::{ActorState, ClientId, EntityId, GameTime, ItemInstanceId};

use crate::events::EventBus;
use crate::journal::EventJournal;
use crate::world::ServerWorld;

/// Commands accepted by the session worker.
pub enum Command {
    /// A client-submitted request, validated by the world.
    Submit {
        client: ClientId,
        request: Request,
        reply: oneshot::Sender<Result<(), Rejection>>,
    },
    /// World-side item grant (pickup collection, quest reward).
    AddItem {
        actor: EntityId,
        item: String,
        alert: bool,
        reply: oneshot::Sender<Result<ItemInstanceId, Rejection>>,
    },
    /// World-side damage (projectile impact, hazards).
    Damage { actor: EntityId, amount: i32 },
    /// Advances the authoritative clock, firing due scheduled tasks.
    Tick { now: GameTime },
    /// A client connection went away; its actors despawn.
    Disconnect { client: ClientId },
    /// Snapshot of one actor's server-side state.
    QueryActor {
        actor: EntityId,
        reply: oneshot::Sender<Option<ActorState>>,
    },
    Shutdown,
}

/// Owns the [`ServerWorld`] and processes commands until shutdown.
pub struct SessionWorker {
    world: ServerWorld,
    command_rx: mpsc::Receiver<Command>,
    bus: EventBus,
    journal: Option<EventJournal>,
}

impl SessionWorker {
    pub fn new(world: ServerWorld, command_rx: mpsc::Receiver<Command>, bus: EventBus) -> Self {
        Self {
            world,
            command_rx,
            bus,
            journal: None,
        }
    }

    /// Records every published event in emission order.
    pub fn with_journal(mut self, journal: EventJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub async fn run(mut self) {
        info!("session worker started");
        while let Some(command) = self.command_rx.recv().await {
            if self.handle_command(command) {
                break;
            }
            self.publish_outbox();
        }
        info!("session worker stopped");
    }

    /// Returns true when the worker should stop.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Submit {
                client,
                request,
                reply,
            } => {
                let outcome = self.world.handle_request(client, request);
                let _ = reply.send(outcome);
            }
            Command::AddItem {
                actor,
                item,
                alert,
                reply,
            } => {
                let outcome = self.world.add_item(actor, &item, alert);
                let _ = reply.send(outcome);
            }
            Command::Damage { actor, amount } => {
                self.world.damage_actor(actor, amount);
            }
            Command::Tick { now } => {
                self.world.advance_clock(now);
            }
            Command::Disconnect { client } => {
                self.world.disconnect(client);
            }
            Command::QueryActor { actor, reply } => {
                let _ = reply.send(self.world.actor(actor).cloned());
            }
            Command::Shutdown => return true,
        }
        false
    }

    fn publish_outbox(&mut self) {
        for event in self.world.drain_outbox() {
            debug!(topic = ?event.topic(), "publishing event");
            if let Some(journal) = &mut self.journal {
                if let Err(error) = journal.append(&event) {
                    warn!(%error, "journal append failed, disabling journal");
                    self.journal = None;
                }
            }
            self.bus.publish(event);
        }
    }
}
