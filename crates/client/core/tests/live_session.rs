//! A client session driven against a live server worker: requests go
//! over the command channel, the replica is rebuilt from the event bus.

mod common;

use std::sync::Arc;

use hearth_client::input::{Button, InputFrame};
use hearth_client::presenter::testing::{HudCall, RecordingPresenter};
use hearth_client::{ClientSession, ClientWorld};
use hearth_core::protocol::Broadcast;
use hearth_core::{AttackKind, GameConfig, GameTime};
use hearth_server::{Event, Session, SessionHandle, Topic};

use common::{catalog, parts, LOCAL};

fn edge(button: Button) -> InputFrame {
    InputFrame::idle().with_edge(button)
}

async fn forward(handle: &SessionHandle, client: &mut ClientSession) {
    for request in client.drain_requests() {
        handle.submit(LOCAL, request).await.unwrap();
    }
}

async fn next_effect(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Broadcast {
    loop {
        match rx.recv().await.expect("event stream open") {
            Event::Effect(broadcast) => return broadcast,
            Event::Field(_) => unreachable!("field updates use the replication topic"),
        }
    }
}

#[tokio::test]
async fn the_replica_follows_the_live_event_stream() {
    let server = Session::builder(parts(), catalog()).start();
    let handle = server.handle();
    let mut effects = handle.subscribe(Topic::Effect);
    let mut replication = handle.subscribe(Topic::Replication);

    let presenter = Arc::new(RecordingPresenter::default());
    let world = ClientWorld::new(LOCAL, Arc::new(catalog()), presenter.clone());
    let mut client = ClientSession::new(LOCAL, "Alice", GameConfig::default(), parts(), world)
        .with_seed(7);
    client.add_local_player(0);

    // Hello plus the finished creation travel through the channel.
    for _ in 0..5 {
        client.handle_input(GameTime::ZERO, 0, &edge(Button::Confirm));
    }
    forward(&handle, &mut client).await;
    client.apply_broadcast(next_effect(&mut effects).await); // ClientJoined
    client.apply_broadcast(next_effect(&mut effects).await); // ActorSpawned

    let actor = client.world().local_actor(0).expect("local actor bound");
    assert_eq!(
        presenter.count(|call| matches!(call, HudCall::Appeared(_, name) if name == "Alice")),
        1
    );

    // The world grants a bow; the pickup toast reaches the local HUD.
    handle.add_item(actor, "bow", true).await.unwrap();
    client.apply_broadcast(next_effect(&mut effects).await);
    assert_eq!(presenter.count(|call| matches!(call, HudCall::Alert(_))), 1);

    // Equip from the open panel, then close it again.
    client.handle_input(GameTime::new(1.0), 0, &edge(Button::ToggleInventory));
    client.equip_item(0, "bow");
    forward(&handle, &mut client).await;
    client.apply_broadcast(next_effect(&mut effects).await);
    client.handle_input(GameTime::new(1.1), 0, &edge(Button::ToggleInventory));

    let replica = client.world().actor(actor).unwrap();
    assert!(replica.state.active_weapon.is_some());

    // One attack press fires the ranged path end to end.
    client.handle_input(GameTime::new(2.0), 0, &edge(Button::Attack));
    client.handle_input(
        GameTime::new(2.0 + GameConfig::ATTACK_REQUEST_LEAD),
        0,
        &InputFrame::idle(),
    );
    forward(&handle, &mut client).await;
    assert!(matches!(
        next_effect(&mut effects).await,
        Broadcast::ProjectileSpawned { .. }
    ));
    let swung = next_effect(&mut effects).await;
    assert!(matches!(
        swung,
        Broadcast::AttackSwung {
            kind: AttackKind::Ranged,
            ..
        }
    ));
    // The broadcast echo does not replay the optimistic local cue.
    client.apply_broadcast(swung);
    assert_eq!(
        presenter.count(|call| matches!(call, HudCall::Attack(..))),
        1
    );

    // World-side damage comes back as an ordered health field update.
    handle.damage(actor, 3).await.unwrap();
    match replication.recv().await.expect("event stream open") {
        Event::Field(update) => client.apply_field(update),
        Event::Effect(_) => unreachable!("effects use their own topic"),
    }
    assert_eq!(client.world().actor(actor).unwrap().health.get(), 97);

    handle.shutdown().await.unwrap();
    server.join().await.unwrap();
}
