//! Authoritative session host.
//!
//! This crate owns the server side of the replication contract: a
//! single-writer world behind a command channel, topic-based event
//! fan-out, and a facade handle for transport code. Consumers start a
//! [`Session`] and talk to it through [`SessionHandle`].
//!
//! Modules by responsibility:
//! - [`world`] hosts the authoritative state and request validation
//! - [`session`] wires channels and owns the worker task
//! - [`events`] is the topic-based replication bus
//! - [`collab`] declares the world-side collaborator seams
//! - [`tasks`] schedules delayed world work against the session clock
//! - [`journal`] records published events for replay diagnostics

pub mod collab;
pub mod error;
pub mod events;
pub mod handle;
pub mod journal;
pub mod session;
pub mod tasks;
pub mod world;

mod worker;

pub use collab::{InteractionHost, NullWorld, WorldSpawner};
pub use error::{Result, SessionError};
pub use events::{Event, EventBus, Topic};
pub use handle::SessionHandle;
pub use journal::{EventJournal, JournalError};
pub use session::{Session, SessionBuilder, SessionConfig};
pub use world::ServerWorld;
