//! Client-side replicas and local-player logic.
//!
//! Nothing in this crate is authoritative: replicas shadow server state
//! by applying replication traffic, and local input only ever produces
//! [`hearth_core::protocol::Request`] values for the transport layer to
//! deliver. Rendering stays behind the [`HudPresenter`] seam.
//!
//! Modules by responsibility:
//! - [`replica`] applies field updates and broadcasts to shadow state
//! - [`session`] drives creation, input, and request emission
//! - [`combat`] times optimistic attacks against the local cooldown
//! - [`presenter`] is the display collaborator seam
//! - [`input`] defines the per-tick input frame

pub mod combat;
pub mod input;
pub mod presenter;
pub mod replica;
pub mod session;

pub use combat::AttackDriver;
pub use input::{Button, InputFrame, MovementIntent};
pub use presenter::{HudPresenter, NullPresenter};
pub use replica::{ActorReplica, ClientWorld, LocalSignal, SyncField};
pub use session::ClientSession;
