//! End-to-end controller scenarios.

use scorekeeper::{
    Command, GameConfig, GameController, MemoryStore, Outcome, Palette, Phase, PlayerId, Snapshot, SnapshotStore,
    StoreError,
};

fn config() -> GameConfig {
    GameConfig::new().with_id_seed(2024)
}

fn new_game() -> GameController {
    GameController::new(config(), MemoryStore::new())
}

fn enter(game: &mut GameController<impl SnapshotStore>, digits: &str) {
    for ch in digits.chars() {
        game.digit(ch.to_digit(10).expect("digit") as u8);
    }
}

/// Store whose writes always fail.
#[derive(Default)]
struct BrokenStore {
    save_attempts: usize,
}

impl SnapshotStore for BrokenStore {
    fn load(&mut self) -> Result<Option<Snapshot>, StoreError> {
        Err(StoreError::Io {
            path: "broken".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
        })
    }

    fn save(&mut self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        self.save_attempts += 1;
        Err(StoreError::Io {
            path: "broken".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
        })
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: "broken".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
        })
    }
}

// =============================================================================
// Setup
// =============================================================================

#[test]
fn test_zero_players_cannot_start() {
    let mut game = new_game();
    assert!(!game.start_game());
    assert_eq!(game.phase(), Phase::Setup);
    assert!(!game.view().can_start);
}

#[test]
fn test_colors_follow_registration_order() {
    let mut game = new_game();
    let palette = Palette::default();
    let ids: Vec<PlayerId> = ["A", "B", "C"].iter().filter_map(|n| game.add_player(n)).collect();

    for (i, id) in ids.iter().enumerate() {
        assert_eq!(game.ledger().player(*id).unwrap().color(), &palette.color_for(i));
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_ann_and_bo_first_round() {
    let mut game = new_game();
    let palette = Palette::default();
    let ann = game.add_player("Ann").unwrap();
    let bo = game.add_player("Bo").unwrap();
    assert_eq!(game.ledger().player(ann).unwrap().color(), &palette.color_for(0));
    assert_eq!(game.ledger().player(bo).unwrap().color(), &palette.color_for(1));

    assert!(game.start_game());
    assert!(game.open_round_entry());
    assert_eq!(game.entry().unwrap().focus(), Some(ann));
    enter(&mut game, "30");
    assert!(game.confirm_and_advance());
    assert_eq!(game.entry().unwrap().focus(), Some(bo));

    let snapshot = game.commit().unwrap();

    assert_eq!(snapshot.players[0].scores, vec![30]);
    assert_eq!(snapshot.players[1].scores, vec![0]);
    assert_eq!(snapshot.round, 2);
    assert_eq!(game.phase(), Phase::Active);

    let ranking: Vec<_> = game.ledger().ranking().iter().map(|p| (p.name().to_string(), p.total())).collect();
    assert_eq!(ranking, vec![("Ann".to_string(), 30), ("Bo".to_string(), 0)]);
}

#[test]
fn test_reaching_goal_finishes_and_ranks_first() {
    let mut game = new_game();
    let _ann = game.add_player("Ann").unwrap();
    let bo = game.add_player("Bo").unwrap();
    game.start_game();

    game.open_round_entry();
    enter(&mut game, "40");
    game.focus(bo);
    enter(&mut game, "250");
    let snapshot = game.commit().unwrap();

    assert_eq!(snapshot.status, Phase::Finished);
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.ledger().ranking()[0].id(), bo);
    assert_eq!(game.view().ranking[0].name, "Bo");
}

#[test]
fn test_custom_goal() {
    let mut game = GameController::new(config().with_goal_score(50), MemoryStore::new());
    game.add_player("Solo");
    game.start_game();

    game.open_round_entry();
    enter(&mut game, "49");
    game.commit();
    assert_eq!(game.phase(), Phase::Active);

    game.open_round_entry();
    enter(&mut game, "1");
    game.commit();
    assert_eq!(game.phase(), Phase::Finished);
}

#[test]
fn test_digit_entry_rules() {
    let mut game = new_game();
    let ann = game.add_player("Ann").unwrap();
    game.start_game();
    game.open_round_entry();

    let staged = |game: &GameController| game.entry().unwrap().value(ann).unwrap().as_str().to_string();

    enter(&mut game, "50");
    assert_eq!(staged(&game), "50");

    game.clear();
    enter(&mut game, "0");
    enter(&mut game, "7");
    assert_eq!(staged(&game), "7");

    game.clear();
    enter(&mut game, "123456");
    assert_eq!(staged(&game), "12345");
}

#[test]
fn test_round_counter_only_moves_on_commit() {
    let mut game = new_game();
    game.add_player("Ann");
    game.add_player("Bo");
    game.start_game();

    game.open_round_entry();
    enter(&mut game, "5");
    game.cancel_entry();
    assert_eq!(game.ledger().round(), 1);

    for expected in 2..6 {
        game.open_round_entry();
        enter(&mut game, "3");
        game.commit();
        assert_eq!(game.ledger().round(), expected);
        for p in game.ledger().players().iter() {
            assert_eq!(p.rounds_played() as u32, game.ledger().round() - 1);
        }
    }
}

#[test]
fn test_finished_game_is_frozen() {
    let mut game = new_game();
    game.add_player("Ann");
    game.start_game();
    game.open_round_entry();
    enter(&mut game, "300");
    game.commit();

    assert_eq!(game.apply(Command::OpenRoundEntry), Outcome::Ignored);
    assert_eq!(game.apply(Command::Commit), Outcome::Ignored);
    assert_eq!(game.apply(Command::AddPlayer { name: "Late".into() }), Outcome::Ignored);
    assert_eq!(game.ledger().round(), 2);
}

#[test]
fn test_reset_then_new_game() {
    let mut game = new_game();
    game.add_player("Ann");
    game.start_game();
    game.open_round_entry();
    enter(&mut game, "300");
    game.commit();

    game.reset();
    assert_eq!(game.phase(), Phase::Setup);
    assert!(game.ledger().is_empty());
    assert!(!game.store().has_snapshot());

    let cy = game.add_player("Cy").unwrap();
    assert!(game.start_game());
    assert_eq!(game.ledger().player(cy).unwrap().color(), &Palette::default().color_for(0));
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_restore_resumes_game() {
    let mut game = new_game();
    game.add_player("Ann");
    game.add_player("Bo");
    game.start_game();
    game.open_round_entry();
    enter(&mut game, "12");
    game.commit();
    let before = game.snapshot();

    let store = MemoryStore::with_snapshot(&before).unwrap();
    let resumed = GameController::restore(config(), store);

    assert_eq!(resumed.snapshot(), before);
    assert_eq!(resumed.phase(), Phase::Active);
    assert!(!resumed.is_entry_open());
}

#[test]
fn test_restore_drops_open_entry() {
    let mut game = new_game();
    game.add_player("Ann");
    game.start_game();
    game.open_round_entry();
    enter(&mut game, "77");

    let store = MemoryStore::with_snapshot(&game.snapshot()).unwrap();
    let resumed = GameController::restore(config(), store);

    assert!(!resumed.is_entry_open());
    assert_eq!(resumed.ledger().round(), 1);
}

#[test]
fn test_restore_from_empty_store() {
    let game = GameController::restore(config(), MemoryStore::new());
    assert_eq!(game.phase(), Phase::Setup);
    assert!(game.ledger().is_empty());
}

#[test]
fn test_broken_store_never_blocks_play() {
    let mut game = GameController::restore(config(), BrokenStore::default());
    assert_eq!(game.phase(), Phase::Setup);

    game.add_player("Ann");
    game.start_game();
    game.open_round_entry();
    enter(&mut game, "250");
    let snapshot = game.commit().unwrap();

    assert_eq!(snapshot.status, Phase::Finished);
    assert_eq!(game.store().save_attempts, 3);

    game.reset();
    assert_eq!(game.phase(), Phase::Setup);
}

#[test]
fn test_commands_from_json() {
    let mut game = new_game();
    let script = r#"[
        {"op": "add_player", "name": "Ann"},
        {"op": "add_player", "name": "Bo"},
        {"op": "start_game"},
        {"op": "open_round_entry"},
        {"op": "digit", "digit": 9},
        {"op": "confirm_and_advance"},
        {"op": "digit", "digit": 4},
        {"op": "commit"}
    ]"#;
    let commands: Vec<Command> = serde_json::from_str(script).unwrap();

    let outcomes: Vec<Outcome> = commands.into_iter().map(|c| game.apply(c)).collect();

    assert!(outcomes.iter().all(Outcome::is_applied));
    let totals: Vec<_> = game.ledger().players().iter().map(|p| p.total()).collect();
    assert_eq!(totals, vec![9, 4]);
}
