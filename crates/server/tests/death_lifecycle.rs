//! Death, decomposition, and despawn through the authoritative world.

mod common;

use hearth_core::protocol::{ActorField, Broadcast, DespawnReason};
use hearth_core::{GameConfig, GameTime};
use hearth_server::Event;

use common::{creation_request, world, CLIENT};

#[test]
fn lethal_damage_kills_and_schedules_decomposition() {
    let (mut world, _) = world();
    let actor = world.spawn_character(CLIENT, creation_request(0)).unwrap();
    world.drain_outbox();

    world.damage_actor(actor, 150);

    let events = world.drain_outbox();
    // Overkill clamps to zero.
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Field(update) if update.field == ActorField::Health(0)
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Effect(Broadcast::ActorDied { actor: died }) if *died == actor
    )));

    // The corpse lingers until the decomposition delay elapses.
    assert!(world.actor(actor).is_some());
    world.advance_clock(GameTime::new(GameConfig::DECOMPOSITION_DELAY - 0.1));
    assert!(world.actor(actor).is_some());

    world.advance_clock(GameTime::new(GameConfig::DECOMPOSITION_DELAY));
    assert!(world.actor(actor).is_none());
    let events = world.drain_outbox();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Effect(Broadcast::ActorDespawned {
            reason: DespawnReason::Decomposed,
            ..
        })
    )));
}

#[test]
fn decomposition_scatters_the_carried_items() {
    let (mut world, recorder) = world();
    let actor = world.spawn_character(CLIENT, creation_request(0)).unwrap();
    world.add_item(actor, "sword", false).unwrap();
    world.add_item(actor, "helm", false).unwrap();

    world.damage_actor(actor, 100);
    world.advance_clock(GameTime::new(GameConfig::DECOMPOSITION_DELAY));

    let mut dropped: Vec<String> = recorder
        .pickups()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    dropped.sort();
    assert_eq!(dropped, vec!["helm".to_string(), "sword".to_string()]);
}

#[test]
fn damage_to_a_corpse_is_ignored() {
    let (mut world, _) = world();
    let actor = world.spawn_character(CLIENT, creation_request(0)).unwrap();
    world.damage_actor(actor, 100);
    world.drain_outbox();

    world.damage_actor(actor, 10);

    assert!(world.drain_outbox().is_empty());
    assert_eq!(world.actor(actor).unwrap().health.current, 0);
}

#[test]
fn disconnect_despawns_and_cancels_pending_decomposition() {
    let (mut world, recorder) = world();
    let actor = world.spawn_character(CLIENT, creation_request(0)).unwrap();
    world.add_item(actor, "sword", false).unwrap();
    world.damage_actor(actor, 100);
    world.drain_outbox();

    world.disconnect(CLIENT);

    let events = world.drain_outbox();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Effect(Broadcast::ActorDespawned {
            reason: DespawnReason::Disconnected,
            ..
        })
    )));
    assert!(world.actor(actor).is_none());

    // The scheduled decomposition is gone with the actor; no pickups
    // appear when its deadline passes.
    world.advance_clock(GameTime::new(5.0));
    assert!(recorder.pickups().is_empty());
    assert!(world.drain_outbox().is_empty());
}

#[test]
fn coins_and_mana_changes_replicate_as_field_updates() {
    let (mut world, _) = world();
    let actor = world.spawn_character(CLIENT, creation_request(0)).unwrap();
    world.drain_outbox();

    world.grant_coins(actor, 25);
    world.set_mana(actor, 40);

    let events = world.drain_outbox();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Field(update) if update.field == ActorField::Coins(25)
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Field(update) if update.field == ActorField::Mana(40)
    )));
}
