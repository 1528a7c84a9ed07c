//! Authoritative state representation for player characters.
//!
//! The server owns one [`ActorState`] per character; every client holds a
//! read-only replica mutated exclusively by applying replication messages.
//! Mutation helpers here are deliberately shared so both sides run the
//! same code.
pub mod actor;
pub mod inventory;

pub use actor::{ActorState, Appearance, ResourceMeter};
pub use inventory::{InventoryState, ItemInstance, ItemInstanceId, RemovedInstance};

use std::fmt;

/// Unique identifier for any entity tracked in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier for a connected client process (one per connection).
///
/// The host's client shares the server process but still gets its own id;
/// ownership checks never special-case colocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client {}", self.0)
    }
}

/// Monotonic session time in seconds.
///
/// The server clock is authoritative. Clients keep a local estimate used
/// only for optimistic animation timing, never for validation.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameTime(pub f64);

impl GameTime {
    pub const ZERO: Self = Self(0.0);

    pub fn new(seconds: f64) -> Self {
        Self(seconds)
    }

    pub fn seconds(self) -> f64 {
        self.0
    }
}

impl std::ops::Add<f64> for GameTime {
    type Output = GameTime;
    fn add(self, rhs: f64) -> GameTime {
        GameTime(self.0 + rhs)
    }
}

impl std::ops::Sub for GameTime {
    type Output = f64;
    fn sub(self, rhs: GameTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

/// 8-bit RGBA color used for item tints and hair colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}
