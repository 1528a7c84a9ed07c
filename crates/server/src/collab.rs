//! World collaborators injected into the session at construction time.
//!
//! The session never reaches into ambient global state; everything it
//! touches outside its own actors goes through these traits.

use glam::Vec2;

use hearth_core::{EntityId, ProjectileKind};

/// Fire-and-forget entity creation in the surrounding world.
pub trait WorldSpawner: Send + Sync {
    /// Spawns a pickup entity for the named item. The session never
    /// consumes a return value; the pickup's later collection re-enters
    /// through [`crate::world::ServerWorld::add_item`].
    fn spawn_pickup(&self, item: &str, position: Vec2);

    /// Spawns a projectile whose flight and collision are tracked by its
    /// own lifecycle, outside this core.
    fn spawn_projectile(&self, kind: ProjectileKind, origin: Vec2, direction: Vec2);
}

/// Receiver for interact requests, e.g. signs, doors, merchants.
pub trait InteractionHost: Send + Sync {
    /// Returns false when the actor currently faces nothing usable.
    fn interact(&self, actor: EntityId) -> bool;
}

/// Inert defaults for sessions without surrounding world systems.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWorld;

impl WorldSpawner for NullWorld {
    fn spawn_pickup(&self, _item: &str, _position: Vec2) {}
    fn spawn_projectile(&self, _kind: ProjectileKind, _origin: Vec2, _direction: Vec2) {}
}

impl InteractionHost for NullWorld {
    fn interact(&self, _actor: EntityId) -> bool {
        false
    }
}

/// Recording collaborators for tests across the workspace.
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum SpawnCall {
        Pickup { item: String, position: Vec2 },
        Projectile {
            kind: ProjectileKind,
            origin: Vec2,
            direction: Vec2,
        },
    }

    /// Records every spawn request for later assertions.
    #[derive(Debug, Default)]
    pub struct RecordingWorld {
        pub calls: Mutex<Vec<SpawnCall>>,
        pub interactable: bool,
    }

    impl RecordingWorld {
        pub fn with_interactable() -> Self {
            Self {
                interactable: true,
                ..Self::default()
            }
        }

        pub fn pickups(&self) -> Vec<(String, Vec2)> {
            self.calls
                .lock()
                .expect("recording lock")
                .iter()
                .filter_map(|call| match call {
                    SpawnCall::Pickup { item, position } => {
                        Some((item.clone(), *position))
                    }
                    _ => None,
                })
                .collect()
        }

        pub fn projectiles(&self) -> Vec<ProjectileKind> {
            self.calls
                .lock()
                .expect("recording lock")
                .iter()
                .filter_map(|call| match call {
                    SpawnCall::Projectile { kind, .. } => Some(*kind),
                    _ => None,
                })
                .collect()
        }
    }

    impl WorldSpawner for RecordingWorld {
        fn spawn_pickup(&self, item: &str, position: Vec2) {
            self.calls
                .lock()
                .expect("recording lock")
                .push(SpawnCall::Pickup {
                    item: item.to_string(),
                    position,
                });
        }

        fn spawn_projectile(&self, kind: ProjectileKind, origin: Vec2, direction: Vec2) {
            self.calls
                .lock()
                .expect("recording lock")
                .push(SpawnCall::Projectile {
                    kind,
                    origin,
                    direction,
                });
        }
    }

    impl InteractionHost for RecordingWorld {
        fn interact(&self, _actor: EntityId) -> bool {
            self.interactable
        }
    }
}
