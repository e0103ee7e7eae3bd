//! Snapshot persistence: the file repository, session resume, auto-save,
//! and fallback behavior on corrupt or foreign slots.

use std::sync::Arc;
use std::time::Duration;

use room_core::{
    AmbienceConfig, ElementConfig, ElementId, PlayerId, RoomConfig, RoomId, RoomSnapshot,
    RoomState, Timestamp, slot_key,
};
use room_runtime::{
    Event, FileSnapshotRepository, RoomEvent, RoomSession, SnapshotRepository, Topic,
};

fn element(id: &str, deps: &[&str]) -> ElementConfig {
    ElementConfig {
        id: ElementId::from(id),
        name: id.to_uppercase(),
        description: String::new(),
        dependencies: deps.iter().map(|d| ElementId::from(*d)).collect(),
        starts_unlocked: None,
        puzzle: None,
        rewards: Vec::new(),
    }
}

fn two_element_room() -> RoomConfig {
    RoomConfig {
        id: RoomId::from("lab"),
        name: "Laboratory".to_owned(),
        description: String::new(),
        elements: vec![element("a", &[]), element("b", &["a"])],
        ambience: AmbienceConfig::default(),
    }
}

#[test]
fn file_repository_round_trips_a_slot() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSnapshotRepository::new(dir.path()).unwrap();
    let config = two_element_room();
    let state = RoomState::initialize(&config, PlayerId::from("p1"));
    let snapshot = RoomSnapshot::capture(&state, Timestamp(7));

    let room = RoomId::from("lab");
    let player = PlayerId::from("p1");
    assert!(!repo.exists(&room, &player));

    repo.save(&snapshot).unwrap();
    assert!(repo.exists(&room, &player));
    assert!(dir
        .path()
        .join(format!("{}.json", slot_key(&room, &player)))
        .exists());

    let loaded = repo.load(&room, &player).unwrap().unwrap();
    assert_eq!(loaded, snapshot);

    repo.delete(&room, &player).unwrap();
    assert!(!repo.exists(&room, &player));
    assert!(repo.load(&room, &player).unwrap().is_none());
}

#[tokio::test]
async fn session_resumes_from_the_saved_slot() {
    let dir = tempfile::tempdir().unwrap();
    let repo: Arc<dyn SnapshotRepository> =
        Arc::new(FileSnapshotRepository::new(dir.path()).unwrap());
    let config = two_element_room();

    let session = RoomSession::builder()
        .with_room(config.clone())
        .with_player("p1")
        .with_repository(Arc::clone(&repo))
        .start()
        .await
        .unwrap();
    let handle = session.handle();
    handle.solve("a", vec![]).await.unwrap();
    handle.advance_clock(90).await.unwrap();
    handle.exit().await.unwrap();
    session.shutdown().await.unwrap();

    let resumed = RoomSession::builder()
        .with_room(config)
        .with_player("p1")
        .with_repository(repo)
        .start()
        .await
        .unwrap();
    let state = resumed.handle().state().await.unwrap();
    assert!(state.element(&ElementId::from("a")).unwrap().is_solved);
    assert!(state.element(&ElementId::from("b")).unwrap().is_unlocked);
    assert_eq!(state.time_elapsed_secs(), 90);
    assert_eq!(state.progress().percentage, 50.0);

    resumed.shutdown().await.unwrap();
}

#[tokio::test]
async fn corrupt_slot_falls_back_to_fresh_state() {
    let dir = tempfile::tempdir().unwrap();
    let room = RoomId::from("lab");
    let player = PlayerId::from("p1");
    std::fs::write(
        dir.path().join(format!("{}.json", slot_key(&room, &player))),
        b"not json at all",
    )
    .unwrap();

    let repo: Arc<dyn SnapshotRepository> =
        Arc::new(FileSnapshotRepository::new(dir.path()).unwrap());
    let session = RoomSession::builder()
        .with_room(two_element_room())
        .with_player("p1")
        .with_repository(repo)
        .start()
        .await
        .unwrap();

    let state = session.handle().state().await.unwrap();
    assert_eq!(state.solved_elements(), Vec::<ElementId>::new());
    assert_eq!(state.progress().percentage, 0.0);

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn autosave_writes_a_loadable_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let repo: Arc<dyn SnapshotRepository> =
        Arc::new(FileSnapshotRepository::new(dir.path()).unwrap());

    let session = RoomSession::builder()
        .with_room(two_element_room())
        .with_player("p1")
        .with_repository(Arc::clone(&repo))
        .with_autosave(Duration::from_millis(50))
        .start()
        .await
        .unwrap();
    session.handle().solve("a", vec![]).await.unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;

    let snapshot = repo
        .load(&RoomId::from("lab"), &PlayerId::from("p1"))
        .unwrap()
        .expect("autosave should have written the slot");
    assert!(snapshot
        .state
        .element(&ElementId::from("a"))
        .unwrap()
        .is_solved);

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn restoring_a_finished_run_does_not_refire_completion() {
    let dir = tempfile::tempdir().unwrap();
    let repo: Arc<dyn SnapshotRepository> =
        Arc::new(FileSnapshotRepository::new(dir.path()).unwrap());
    let config = two_element_room();

    let first = RoomSession::builder()
        .with_room(config.clone())
        .with_player("p1")
        .with_repository(Arc::clone(&repo))
        .start()
        .await
        .unwrap();
    first.handle().solve("a", vec![]).await.unwrap();
    first.handle().solve("b", vec![]).await.unwrap();
    first.handle().exit().await.unwrap();
    first.shutdown().await.unwrap();

    let resumed = RoomSession::builder()
        .with_room(config)
        .with_player("p1")
        .with_repository(repo)
        .start()
        .await
        .unwrap();
    let mut room_rx = resumed.subscribe(Topic::Room);

    // Mutations on an already-finished restored run stay quiet.
    resumed.handle().advance_clock(5).await.unwrap();
    let refired = std::iter::from_fn(|| room_rx.try_recv().ok())
        .filter(|event| matches!(event, Event::Room(RoomEvent::RoomCompleted(_))))
        .count();
    assert_eq!(refired, 0);

    resumed.shutdown().await.unwrap();
}
