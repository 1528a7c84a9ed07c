//! Shared fixtures for client-side tests.
#![allow(dead_code)]

use std::sync::Arc;

use hearth_client::presenter::testing::RecordingPresenter;
use hearth_client::{ClientSession, ClientWorld};
use hearth_content::ItemCatalog;
use hearth_core::{
    CharacterParts, ClientId, GameConfig, ItemCategory, ItemDefinition, ProjectileKind, Rgba,
};

pub const LOCAL: ClientId = ClientId(1);
pub const REMOTE: ClientId = ClientId(2);

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
    ItemCatalog::new(vec![
        ItemDefinition::weapon("sword", "Iron Sword", ItemCategory::Melee, 5),
        ItemDefinition::ranged("bow", "Short Bow", 3, ProjectileKind::Arrow),
        ItemDefinition::wearable("helm", "Leather Helm", ItemCategory::Armor),
    ])
}

/// A session for one local controller with a recording presenter.
pub fn session() -> (ClientSession, Arc<RecordingPresenter>) {
    let presenter = Arc::new(RecordingPresenter::default());
    let world = ClientWorld::new(LOCAL, Arc::new(catalog()), presenter.clone());
    let mut session = ClientSession::new(
        LOCAL,
        "Alice",
        GameConfig::default(),
        parts(),
        world,
    )
    .with_seed(7);
    session.add_local_player(0);
    (session, presenter)
}
