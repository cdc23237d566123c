//! Шоудаун: победа фолдом, выплата потов, дележ, выход в setup.

use poker_betting::api::build_stats;
use poker_betting::domain::{Chips, Stage};
use poker_betting::engine::{BettingEngine, EngineError, HandEventKind, PlayerActionKind};

use poker_betting::engine::PlayerActionKind::{AllIn, Call, Check, Fold, Raise};

fn engine_with(names: &[&str]) -> BettingEngine {
    let mut engine = BettingEngine::default();
    for name in names {
        engine.add_player(name).unwrap();
    }
    engine
}

fn stacks(engine: &BettingEngine) -> Vec<u64> {
    engine.players().iter().map(|p| p.stack.0).collect()
}

fn play(engine: &mut BettingEngine, script: &[PlayerActionKind]) {
    for action in script {
        engine.apply_action(action.clone()).unwrap();
    }
}

/// Ann – дилер (1000), Bob и Cid – блайнды по 10 фишек, все в all-in.
/// Итог: пот #0 = 30 (все трое), пот #1 = 20 (только Ann).
fn side_pot_showdown() -> BettingEngine {
    let mut engine = engine_with(&["Ann", "Bob", "Cid"]);
    engine.set_stack(1, Chips(10)).unwrap();
    engine.set_stack(2, Chips(10)).unwrap();
    engine.start_hand().unwrap();
    play(&mut engine, &[Raise(Chips(30)), AllIn]);
    assert_eq!(engine.stage(), Stage::Showdown);
    engine
}

/// Три игрока доигрывают до шоудауна, Bob сфолдил на префлопе. Банк 25.
fn odd_pot_showdown() -> BettingEngine {
    let mut engine = engine_with(&["Ann", "Bob", "Cid"]);
    engine.start_hand().unwrap();
    play(&mut engine, &[Call, Fold, Check]);
    play(&mut engine, &[Check, Check, Check, Check, Check, Check]);
    assert_eq!(engine.stage(), Stage::Showdown);
    assert_eq!(engine.pot_total(), Chips(25));
    engine
}

#[test]
fn everyone_folds_mid_street_winner_takes_pot() {
    let mut engine = engine_with(&["Ann", "Bob", "Cid"]);
    engine.start_hand().unwrap();
    play(&mut engine, &[Call, Call, Check]);
    assert_eq!(engine.stage(), Stage::Flop);

    play(&mut engine, &[Raise(Chips(20)), Fold]);
    let view = engine.apply_action(Fold).unwrap();

    assert_eq!(view.stage, Stage::Showdown);
    assert_eq!(view.pot, Chips::ZERO);
    assert!(view.side_pots.is_empty());
    assert_eq!(view.active_player, None);
    assert_eq!(stacks(&engine), vec![990, 1_020, 990]);

    let bob = &engine.players()[1];
    assert_eq!(bob.stats.pots_won, 1);
    assert_eq!(bob.stats.chips_won, Chips(50));
    let stats = build_stats(&engine);
    assert_eq!(stats[1].net, 20);
    assert_eq!(stats[0].net, -10);

    assert!(engine.history().events.iter().any(|e| matches!(
        &e.kind,
        HandEventKind::PotAwarded { player, amount, pot_index: None }
            if player == "Bob" && *amount == Chips(50)
    )));
    assert!(matches!(
        engine.history().last(),
        Some(HandEventKind::HandFinished { hand_number: 1 })
    ));
}

#[test]
fn award_is_only_allowed_at_showdown() {
    let mut engine = engine_with(&["Ann", "Bob"]);
    engine.start_hand().unwrap();

    assert_eq!(
        engine.award_pot("Ann", None),
        Err(EngineError::NotAtShowdown {
            stage: Stage::Preflop
        })
    );
}

#[test]
fn award_whole_pot_to_single_winner() {
    let mut engine = odd_pot_showdown();

    let view = engine.award_pot("Cid", None).unwrap();

    assert_eq!(view.pot, Chips::ZERO);
    assert!(view.side_pots.is_empty());
    assert_eq!(stacks(&engine), vec![990, 995, 1_015]);
    assert_eq!(engine.award_pot("Cid", None), Err(EngineError::NoPotToAward));
}

#[test]
fn side_pot_requires_eligible_winner() {
    let mut engine = side_pot_showdown();
    let before = engine.clone();

    assert_eq!(
        engine.award_pot("Bob", Some(1)),
        Err(EngineError::IneligibleWinner {
            name: "Bob".to_string(),
            pot_index: 1
        })
    );
    assert_eq!(engine.award_pot("Bob", Some(7)), Err(EngineError::NoPotToAward));
    assert_eq!(
        engine.award_pot("Zed", None),
        Err(EngineError::PlayerNotFound("Zed".to_string()))
    );
    assert_eq!(engine, before);
}

#[test]
fn side_pots_are_awarded_one_by_one() {
    let mut engine = side_pot_showdown();

    // Главный пот – Bob; пот удаляется, оставшийся сдвигается на индекс 0.
    let view = engine.award_pot("Bob", Some(0)).unwrap();
    assert_eq!(view.pot, Chips(20));
    assert_eq!(view.side_pots.len(), 1);
    assert_eq!(view.side_pots[0].eligible_players, vec!["Ann".to_string()]);
    assert_eq!(engine.players()[1].stack, Chips(30));

    let view = engine.award_pot("Ann", Some(0)).unwrap();
    assert_eq!(view.pot, Chips::ZERO);
    assert_eq!(stacks(&engine), vec![990, 30, 0]);

    // Банк пуст – можно начинать следующую раздачу (Cid без фишек пропускает).
    let view = engine.start_new_hand().unwrap();
    assert_eq!(view.stage, Stage::Preflop);
    assert!(engine.players()[2].folded);
}

#[test]
fn split_pot_gives_odd_chip_in_listed_order() {
    let mut engine = odd_pot_showdown();

    engine.split_pot(&["Cid", "Ann"], None).unwrap();

    assert_eq!(stacks(&engine), vec![1_002, 995, 1_003]);
    assert_eq!(engine.pot_total(), Chips::ZERO);
}

#[test]
fn split_pot_ignores_duplicate_winners() {
    let mut engine = odd_pot_showdown();

    engine
        .split_pot(&["Ann".to_string(), "Ann".to_string(), "Cid".to_string()], None)
        .unwrap();

    assert_eq!(stacks(&engine), vec![1_003, 995, 1_002]);
}

#[test]
fn split_pot_validates_winners() {
    let mut engine = side_pot_showdown();
    let before = engine.clone();

    assert_eq!(engine.split_pot::<&str>(&[], None), Err(EngineError::NoWinners));
    assert_eq!(
        engine.split_pot(&["Ann", "Zed"], None),
        Err(EngineError::PlayerNotFound("Zed".to_string()))
    );
    assert_eq!(
        engine.split_pot(&["Ann", "Cid"], Some(1)),
        Err(EngineError::IneligibleWinner {
            name: "Cid".to_string(),
            pot_index: 1
        })
    );
    assert_eq!(engine, before);

    engine.split_pot(&["Bob", "Cid", "Ann"], Some(0)).unwrap();
    assert_eq!(stacks(&engine), vec![980, 10, 10]);
    assert_eq!(engine.pot_total(), Chips(20));
}

#[test]
fn reset_stacks_returns_everyone_to_starting_stack() {
    let mut engine = odd_pot_showdown();
    engine.award_pot("Cid", None).unwrap();
    engine.start_new_hand().unwrap();

    let view = engine.reset_stacks_and_setup();

    assert_eq!(view.stage, Stage::Setup);
    assert_eq!(view.dealer_index, 0);
    assert_eq!(view.pot, Chips::ZERO);
    assert_eq!(view.small_blind_index, None);
    assert_eq!(stacks(&engine), vec![1_000, 1_000, 1_000]);
    assert!(engine
        .players()
        .iter()
        .all(|p| p.stats.hands_played == 0 && p.bet.is_zero() && !p.folded));
}

#[test]
fn return_to_setup_keeps_stacks_and_drops_pot() {
    let mut engine = engine_with(&["Ann", "Bob", "Cid"]);
    engine.start_hand().unwrap();
    play(&mut engine, &[Call, Fold, Check]);
    assert_eq!(stacks(&engine), vec![990, 995, 990]);

    let view = engine.return_to_setup_preserving_stacks();

    assert_eq!(view.stage, Stage::Setup);
    assert_eq!(view.pot, Chips::ZERO);
    // Кнопка осталась на месте.
    assert_eq!(view.dealer_index, 0);
    // Сфолдивший блайнд не возвращается никому.
    assert_eq!(stacks(&engine), vec![990, 995, 990]);
    assert!(engine.players().iter().all(|p| p.contributed.is_zero() && !p.folded));
    assert_eq!(engine.players()[1].stats.total_bet, Chips(5));
    assert!(matches!(
        engine.history().last(),
        Some(HandEventKind::PotDiscarded { amount }) if *amount == Chips(25)
    ));
}

#[test]
fn return_to_setup_from_setup_changes_nothing() {
    let mut engine = engine_with(&["Ann", "Bob"]);
    let before = engine.clone();

    engine.return_to_setup_preserving_stacks();

    assert_eq!(engine, before);
}

#[test]
fn return_to_setup_keeps_awarded_chips() {
    let mut engine = side_pot_showdown();
    engine.award_pot("Bob", Some(0)).unwrap();

    let view = engine.return_to_setup_preserving_stacks();

    // Невыплаченный остаток сгорает, выплаченное остаётся у Bob.
    assert_eq!(view.stage, Stage::Setup);
    assert_eq!(view.pot, Chips::ZERO);
    assert_eq!(stacks(&engine), vec![970, 30, 0]);
    assert!(engine.players().iter().all(|p| !p.folded));
}

#[test]
fn split_pot_finishes_hand_once() {
    let mut engine = engine_with(&["Ann", "Bob", "Cid"]);
    engine.start_hand().unwrap();
    play(&mut engine, &[Call, Call, Check]);
    play(&mut engine, &[Check, Check, Check, Check, Check, Check, Check, Check, Check]);
    assert_eq!(engine.stage(), Stage::Showdown);
    assert_eq!(engine.pot_total(), Chips(30));

    engine.split_pot(&["Ann", "Bob", "Cid"], None).unwrap();

    let events = &engine.history().events;
    let awarded = events
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::PotAwarded { .. }))
        .count();
    let finished = events
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::HandFinished { .. }))
        .count();
    assert_eq!(awarded, 3);
    assert_eq!(finished, 1);
    assert!(matches!(
        engine.history().last(),
        Some(HandEventKind::HandFinished { hand_number: 1 })
    ));
    assert_eq!(stacks(&engine), vec![1_000, 1_000, 1_000]);
}

#[test]
fn side_pot_awards_finish_hand_only_after_last_pot() {
    let mut engine = side_pot_showdown();

    engine.award_pot("Bob", Some(0)).unwrap();
    assert!(!engine
        .history()
        .events
        .iter()
        .any(|e| matches!(e.kind, HandEventKind::HandFinished { .. })));

    engine.award_pot("Ann", None).unwrap();
    let finished = engine
        .history()
        .events
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::HandFinished { .. }))
        .count();
    assert_eq!(finished, 1);
}
