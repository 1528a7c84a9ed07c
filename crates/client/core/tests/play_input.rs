//! Input handling while controlling a live actor.

mod common;

use glam::Vec2;

use hearth_client::input::{Button, InputFrame, MovementIntent};
use hearth_client::presenter::testing::HudCall;
use hearth_client::ClientSession;
use hearth_core::protocol::{ActionRequest, Broadcast, Request};
use hearth_core::{
    Appearance, AttackKind, EntityId, GameConfig, GameTime, ItemInstance, ItemInstanceId,
};

use common::{session, LOCAL};

const ACTOR: EntityId = EntityId(3);

fn edge(button: Button) -> InputFrame {
    InputFrame::idle().with_edge(button)
}

/// A session whose controller 0 is already playing.
fn playing() -> (ClientSession, std::sync::Arc<hearth_client::presenter::testing::RecordingPresenter>)
{
    let (mut session, presenter) = session();
    for _ in 0..5 {
        session.handle_input(GameTime::ZERO, 0, &edge(Button::Confirm));
    }
    session.apply_broadcast(Broadcast::ActorSpawned {
        actor: ACTOR,
        owner: LOCAL,
        controller_index: 0,
        appearance: Appearance::default(),
        position: Vec2::ZERO,
    });
    session.drain_requests();
    (session, presenter)
}

fn give_bow(session: &mut ClientSession) {
    session.apply_broadcast(Broadcast::ItemAdded {
        actor: ACTOR,
        instance: ItemInstance::new(ItemInstanceId(1), "bow"),
        alert: None,
    });
    session.apply_broadcast(Broadcast::ItemEquipped {
        actor: ACTOR,
        instance: ItemInstanceId(1),
    });
}

#[test]
fn an_attack_press_cues_now_and_requests_after_the_lead() {
    let (mut session, presenter) = playing();

    session.handle_input(GameTime::ZERO, 0, &edge(Button::Attack));

    // The animation starts immediately.
    assert_eq!(
        presenter.count(|call| matches!(call, HudCall::Attack(_, AttackKind::Melee))),
        1
    );
    // The request waits for the animation lead.
    assert!(session.drain_requests().is_empty());

    session.handle_input(
        GameTime::new(GameConfig::ATTACK_REQUEST_LEAD),
        0,
        &InputFrame::idle(),
    );
    assert_eq!(
        session.drain_requests(),
        vec![Request::Action {
            actor: ACTOR,
            action: ActionRequest::MeleeAttack,
        }]
    );
}

#[test]
fn the_local_cooldown_swallows_spam_presses() {
    let (mut session, presenter) = playing();

    session.handle_input(GameTime::ZERO, 0, &edge(Button::Attack));
    session.handle_input(GameTime::new(0.1), 0, &edge(Button::Attack));
    session.handle_input(GameTime::new(0.2), 0, &edge(Button::Attack));
    session.handle_input(GameTime::new(1.0), 0, &InputFrame::idle());

    assert_eq!(
        presenter.count(|call| matches!(call, HudCall::Attack(..))),
        1
    );
    assert_eq!(session.drain_requests().len(), 1);
}

#[test]
fn the_equipped_weapon_picks_the_attack_path() {
    let (mut session, presenter) = playing();

    // Bare hands: the attack button swings melee.
    session.handle_input(GameTime::ZERO, 0, &edge(Button::Attack));
    session.handle_input(GameTime::new(1.0), 0, &InputFrame::idle());
    assert_eq!(
        session.drain_requests(),
        vec![Request::Action {
            actor: ACTOR,
            action: ActionRequest::MeleeAttack,
        }]
    );
    assert_eq!(
        presenter.count(|call| matches!(call, HudCall::Attack(_, AttackKind::Melee))),
        1
    );

    // With a bow wielded the same button always fires the ranged path,
    // never an unarmed swing.
    give_bow(&mut session);
    session.handle_input(GameTime::new(2.0), 0, &edge(Button::Attack));
    session.handle_input(GameTime::new(3.0), 0, &InputFrame::idle());
    assert_eq!(
        session.drain_requests(),
        vec![Request::Action {
            actor: ACTOR,
            action: ActionRequest::RangedAttack,
        }]
    );
    assert_eq!(
        presenter.count(|call| matches!(call, HudCall::Attack(_, AttackKind::Ranged))),
        1
    );
}

#[test]
fn an_open_inventory_panel_captures_play_input() {
    let (mut session, _) = playing();

    session.handle_input(GameTime::ZERO, 0, &edge(Button::ToggleInventory));
    assert!(session.is_inventory_open(0));

    // Attacks and movement are swallowed while the panel is open.
    session.handle_input(GameTime::new(0.1), 0, &edge(Button::Attack));
    session.handle_input(GameTime::new(1.0), 0, &InputFrame::idle());
    assert!(session.drain_requests().is_empty());

    // Equip and drop go out only from the open panel.
    session.equip_item(0, "sword");
    session.drop_item(0, ItemInstanceId(1));
    assert_eq!(session.drain_requests().len(), 2);

    session.handle_input(GameTime::new(1.1), 0, &edge(Button::ToggleInventory));
    assert!(!session.is_inventory_open(0));
    session.equip_item(0, "sword");
    assert!(session.drain_requests().is_empty());
}

#[test]
fn movement_sets_facing_on_the_outgoing_transform() {
    let (mut session, _) = playing();

    session.handle_input(
        GameTime::ZERO,
        0,
        &InputFrame::idle().with_movement(Vec2::new(2.0, 0.0)),
    );
    session.sync_transform(0, Vec2::new(1.5, 0.0));

    assert_eq!(
        session.drain_requests(),
        vec![Request::UpdateTransform {
            actor: ACTOR,
            position: Vec2::new(1.5, 0.0),
            facing: Vec2::new(1.0, 0.0),
        }]
    );
}

#[test]
fn movement_intent_passes_through_to_the_movement_layer() {
    let (mut session, _) = playing();

    session.handle_input(
        GameTime::ZERO,
        0,
        &InputFrame::idle()
            .with_movement(Vec2::new(0.0, 3.0))
            .walking(),
    );
    let intent = session.movement_intent(0).unwrap();
    assert_eq!(intent.direction, Vec2::new(0.0, 3.0));
    assert!(intent.walk);

    // The open panel zeroes the intent instead of leaking stale input.
    session.handle_input(GameTime::new(0.1), 0, &edge(Button::ToggleInventory));
    session.handle_input(
        GameTime::new(0.2),
        0,
        &InputFrame::idle().with_movement(Vec2::new(1.0, 0.0)),
    );
    assert_eq!(session.movement_intent(0), Some(MovementIntent::default()));
}

#[test]
fn a_corpse_ignores_input_until_it_despawns() {
    let (mut session, presenter) = playing();

    session.apply_broadcast(Broadcast::ActorDied { actor: ACTOR });
    let cues_after_death = presenter.count(|call| matches!(call, HudCall::Attack(..)));

    session.handle_input(
        GameTime::ZERO,
        0,
        &edge(Button::Attack).with_movement(Vec2::new(1.0, 0.0)),
    );
    session.handle_input(GameTime::new(0.1), 0, &edge(Button::Interact));
    session.handle_input(GameTime::new(1.0), 0, &InputFrame::idle());

    assert!(session.drain_requests().is_empty());
    assert_eq!(
        presenter.count(|call| matches!(call, HudCall::Attack(..))),
        cues_after_death
    );
    assert_eq!(session.movement_intent(0), Some(MovementIntent::default()));
}
