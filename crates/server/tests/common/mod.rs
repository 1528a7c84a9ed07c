//! Shared fixtures for session tests.

use std::sync::Arc;

use glam::Vec2;

use hearth_content::ItemCatalog;
use hearth_core::creation::CreationRequest;
use hearth_core::{CharacterParts, ClientId, GameConfig, ItemCategory, ItemDefinition, Rgba};
use hearth_server::collab::testing::RecordingWorld;
use hearth_server::ServerWorld;

pub const CLIENT: ClientId = ClientId(7);

pub fn parts() -> CharacterParts {
    let named = |prefix: &str, count: usize| -> Vec<Option<String>> {
        (0..count).map(|i| Some(format!("{prefix}_{i}"))).collect()
    };
    CharacterParts {
        bodies: named("body", 6),
        num_male_bodies: 3,
        male_eyes: named("m_eyes", 3),
        male_hair: named("m_hair", 4),
        male_outfits: named("m_outfit", 3),
        female_eyes: named("f_eyes", 3),
        female_hair: named("f_hair", 5),
        female_outfits: named("f_outfit", 3),
        hair_colors: vec![Rgba::WHITE, Rgba::new(120, 60, 20, 255)],
    }
}

pub fn catalog() -> ItemCatalog {
    ItemCatalog::new(definitions())
}

pub fn definitions() -> Vec<ItemDefinition> {
    use hearth_core::ProjectileKind;
    vec![
        ItemDefinition::weapon("sword", "Iron Sword", ItemCategory::Melee, 5),
        ItemDefinition::ranged("bow", "Short Bow", 3, ProjectileKind::Arrow),
        ItemDefinition::wearable("helm", "Leather Helm", ItemCategory::Armor),
        ItemDefinition::wearable("ring", "Copper Ring", ItemCategory::Trinket),
    ]
}

pub fn creation_request(controller_index: u8) -> CreationRequest {
    CreationRequest {
        controller_index,
        body: 0,
        eyes: 0,
        hair: 0,
        hair_color: 0,
        class: 1,
    }
}

/// A deterministic world with recording collaborators.
pub fn world() -> (ServerWorld, Arc<RecordingWorld>) {
    let recorder = Arc::new(RecordingWorld::with_interactable());
    let world = ServerWorld::new(
        GameConfig::default(),
        parts(),
        Arc::new(catalog()),
        recorder.clone(),
        recorder.clone(),
    )
    .with_seed(42)
    .with_spawn_point(Vec2::new(10.0, 10.0));
    (world, recorder)
}
