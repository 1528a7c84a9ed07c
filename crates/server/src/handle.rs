use tokio::sync::{broadcast, mpsc, oneshot};

use hearth_core::protocol::{ActionRequest, Rejection, Request};
use hearth_core::{ActorState, ClientId, CreationRequest, EntityId, GameTime, ItemInstanceId};

use crate::error::{Result, SessionError};
use crate::events::{Event, EventBus, Topic};
use crate::worker::Command;

/// Cloneable facade over the session worker.
///
/// Each method submits one command and awaits the worker's reply.
/// Gameplay rejections come back as [`SessionError::Rejected`] so
/// callers can tell a refused action apart from a dead worker.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, bus: EventBus) -> Self {
        Self { command_tx, bus }
    }

    /// Introduces a connection with its display name.
    pub async fn hello(&self, client: ClientId, name: impl Into<String>) -> Result<()> {
        self.submit(client, Request::Hello { name: name.into() }).await
    }

    /// Forwards one client-authoritative transform sample.
    pub async fn update_transform(
        &self,
        client: ClientId,
        actor: EntityId,
        position: glam::Vec2,
        facing: glam::Vec2,
    ) -> Result<()> {
        self.submit(
            client,
            Request::UpdateTransform {
                actor,
                position,
                facing,
            },
        )
        .await
    }

    /// Submits a finished creation sequence; the world validates it.
    pub async fn spawn_character(
        &self,
        client: ClientId,
        creation: CreationRequest,
    ) -> Result<()> {
        self.submit(client, Request::SpawnCharacter(creation)).await
    }

    /// Submits a gameplay action for one of the client's actors.
    pub async fn action(
        &self,
        client: ClientId,
        actor: EntityId,
        action: ActionRequest,
    ) -> Result<()> {
        self.submit(client, Request::Action { actor, action }).await
    }

    /// Forwards one raw request, as a transport draining a client's
    /// outgoing queue does.
    pub async fn submit(&self, client: ClientId, request: Request) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Submit {
            client,
            request,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await??;
        Ok(())
    }

    /// Grants an item from the world side (pickup collection).
    pub async fn add_item(
        &self,
        actor: EntityId,
        item: impl Into<String>,
        alert: bool,
    ) -> Result<ItemInstanceId> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::AddItem {
            actor,
            item: item.into(),
            alert,
            reply: reply_tx,
        })
        .await?;
        Ok(reply_rx.await??)
    }

    /// Applies world-side damage (projectile impacts, hazards).
    pub async fn damage(&self, actor: EntityId, amount: i32) -> Result<()> {
        self.send(Command::Damage { actor, amount }).await
    }

    /// Advances the authoritative clock.
    pub async fn tick(&self, now: GameTime) -> Result<()> {
        self.send(Command::Tick { now }).await
    }

    /// Reports a client connection as gone.
    pub async fn disconnect(&self, client: ClientId) -> Result<()> {
        self.send(Command::Disconnect { client }).await
    }

    /// Fetches a snapshot of one actor, if it exists.
    pub async fn actor(&self, actor: EntityId) -> Result<Option<ActorState>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::QueryActor {
            actor,
            reply: reply_tx,
        })
        .await?;
        Ok(reply_rx.await?)
    }

    /// Asks the worker to stop after draining queued commands.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    /// Subscribes to one replication topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| SessionError::WorkerGone)
    }
}
