//! Session orchestrator.
//!
//! Owns the background worker task and wires command and event channels.
//! [`SessionHandle`] is the cloneable facade clients and transport code
//! hold; the [`Session`] itself stays with whoever hosts the game loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use hearth_content::ItemCatalog;
use hearth_core::{CharacterParts, GameConfig};

use crate::collab::{InteractionHost, NullWorld, WorldSpawner};
use crate::events::EventBus;
use crate::handle::SessionHandle;
use crate::journal::EventJournal;
use crate::worker::SessionWorker;
use crate::world::ServerWorld;

/// Channel sizing for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub game_config: GameConfig,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            command_buffer_size: 64,
            event_buffer_size: 256,
        }
    }
}

/// A running gameplay session.
pub struct Session {
    handle: SessionHandle,
    worker: JoinHandle<()>,
}

impl Session {
    pub fn builder(parts: CharacterParts, catalog: ItemCatalog) -> SessionBuilder {
        SessionBuilder {
            config: SessionConfig::default(),
            parts,
            catalog,
            spawner: None,
            interactions: None,
            journal: None,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Waits for the worker to finish. Pair with
    /// [`SessionHandle::shutdown`] for an orderly stop.
    pub async fn join(self) -> Result<(), tokio::task::JoinError> {
        self.worker.await
    }
}

pub struct SessionBuilder {
    config: SessionConfig,
    parts: CharacterParts,
    catalog: ItemCatalog,
    spawner: Option<Arc<dyn WorldSpawner>>,
    interactions: Option<Arc<dyn InteractionHost>>,
    journal: Option<EventJournal>,
}

impl SessionBuilder {
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn spawner(mut self, spawner: Arc<dyn WorldSpawner>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    pub fn interactions(mut self, interactions: Arc<dyn InteractionHost>) -> Self {
        self.interactions = Some(interactions);
        self
    }

    pub fn journal(mut self, journal: EventJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Spawns the worker task and returns the running session.
    pub fn start(self) -> Session {
        let null_world = Arc::new(NullWorld);
        let spawner = self.spawner.unwrap_or_else(|| null_world.clone());
        let interactions = self
            .interactions
            .unwrap_or_else(|| null_world as Arc<dyn InteractionHost>);

        let world = ServerWorld::new(
            self.config.game_config,
            self.parts,
            Arc::new(self.catalog),
            spawner,
            interactions,
        );

        let bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let mut worker = SessionWorker::new(world, command_rx, bus.clone());
        if let Some(journal) = self.journal {
            worker = worker.with_journal(journal);
        }
        let worker = tokio::spawn(worker.run());

        Session {
            handle: SessionHandle::new(command_tx, bus),
            worker,
        }
    }
}
