//! Discrete input fed to the local player once per logical tick.

use glam::Vec2;

/// A button edge: pressed this tick, not held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// One physical attack button; the session picks melee or ranged
    /// from the equipped weapon.
    Attack,
    Interact,
    ToggleInventory,
    Confirm,
    Previous,
    Next,
}

/// Everything the local player consumed from input this tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Raw movement vector, not normalized. Zero means standing still.
    pub movement: Vec2,
    /// Walk modifier held; passed through to the movement layer.
    pub walk: bool,
    pub edges: Vec<Button>,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.edges.contains(&button)
    }

    pub fn with_edge(mut self, button: Button) -> Self {
        self.edges.push(button);
        self
    }

    pub fn with_movement(mut self, movement: Vec2) -> Self {
        self.movement = movement;
        self
    }

    pub fn walking(mut self) -> Self {
        self.walk = true;
        self
    }
}

/// What the movement layer should do with one controller this tick.
/// Zeroed while the inventory panel captures input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementIntent {
    pub direction: Vec2,
    pub walk: bool,
}
