//! Property tests for ledger and controller invariants.

use proptest::prelude::*;
use scorekeeper::{GameConfig, GameController, GameRng, MemoryStore, Palette, Phase, ScoreLedger, Snapshot};

/// Arbitrary staged text: digits, signs, junk and blanks.
fn staged_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[0-9]{1,5}",
        "-[0-9]{1,4}",
        "[a-z0-9 ]{0,6}",
    ]
}

fn check_invariants(ledger: &ScoreLedger) {
    for player in ledger.players().iter() {
        assert_eq!(player.total(), player.scores().iter().sum::<i64>());
        assert_eq!(player.rounds_played() as u32, ledger.round() - 1);
    }
}

proptest! {
    #[test]
    fn totals_match_scores_after_every_round(
        players in 1usize..7,
        rounds in prop::collection::vec(prop::collection::vec(staged_text(), 0..8), 0..12),
    ) {
        let palette = Palette::default();
        let mut ledger = ScoreLedger::new(GameRng::new(1));
        let ids: Vec<_> = (0..players)
            .filter_map(|i| ledger.add_player(&format!("P{}", i), &palette))
            .collect();

        for texts in &rounds {
            let staged = ids.iter().copied().zip(texts.iter().map(String::as_str));
            let committed = ledger.record_round(staged);
            prop_assert_eq!(committed.len(), players);
            check_invariants(&ledger);
        }
        prop_assert_eq!(ledger.round() as usize, rounds.len() + 1);
    }

    #[test]
    fn ranking_is_sorted_and_stable(
        scores in prop::collection::vec(-50i64..300, 1..10),
    ) {
        let palette = Palette::default();
        let mut ledger = ScoreLedger::new(GameRng::new(5));
        let ids: Vec<_> = (0..scores.len())
            .filter_map(|i| ledger.add_player(&format!("P{}", i), &palette))
            .collect();
        let texts: Vec<String> = scores.iter().map(|s| s.to_string()).collect();
        ledger.record_round(ids.iter().copied().zip(texts.iter().map(String::as_str)));

        let ranking = ledger.ranking();
        for pair in ranking.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.total() >= b.total());
            if a.total() == b.total() {
                prop_assert!(ledger.position(a.id()) < ledger.position(b.id()));
            }
        }
    }

    #[test]
    fn snapshot_round_trip_is_lossless(
        players in 1usize..9,
        rounds in prop::collection::vec(prop::collection::vec(0u8..10, 0..4), 0..6),
        finish in any::<bool>(),
    ) {
        let goal = if finish { 1 } else { i64::MAX };
        let mut game = GameController::new(
            GameConfig::new().with_id_seed(11).with_goal_score(goal),
            MemoryStore::new(),
        );
        for i in 0..players {
            game.add_player(&format!("P{}", i));
        }
        game.start_game();
        for digits in &rounds {
            if game.phase() != Phase::Active {
                break;
            }
            game.open_round_entry();
            for d in digits {
                game.digit(*d);
                game.confirm_and_advance();
            }
            game.commit();
        }

        let snapshot = game.snapshot();
        let json = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        let bytes = Snapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(&json, &snapshot);
        prop_assert_eq!(&bytes, &snapshot);

        let store = MemoryStore::with_snapshot(&snapshot).unwrap();
        let resumed = GameController::restore(GameConfig::new().with_goal_score(goal), store);
        prop_assert_eq!(resumed.snapshot(), snapshot);
        check_invariants(resumed.ledger());
    }
}
