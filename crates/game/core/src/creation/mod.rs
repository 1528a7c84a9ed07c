//! Client-local character creation: customization catalogs and the
//! finite state machine that collects a player's choices.
//!
//! The sequencer is advisory: it keeps indices in range for a pleasant
//! UI, but the server re-validates every creation request against
//! [`CharacterParts`] and trusts nothing from the client.
mod parts;
mod sequencer;

pub use parts::{CharacterParts, CreationError};
pub use sequencer::{
    CreationInput, CreationPreview, CreationRequest, CreationSeeds, CreationSequencer,
    CreationStage, PreviewEntry,
};
