// tests/engine_stress_tests.rs
//
// Стресс-тесты: случайные боты гоняют много раздач подряд.
//
// 1) random_hands_conserve_chips
//    - 6 игроков, 300 раздач, детерминированный seed.
//    - После каждого действия: стеки + банк = константа, ставка покрывает все ставки.
//
// 2) side_pots_always_match_contributions
//    - На каждом шоудауне сумма потов равна сумме вкладов.
//
// 3) same_seed_same_session
//    - Два прогона с одним seed дают одинаковое состояние.

use poker_betting::domain::{Chips, Stage};
use poker_betting::engine::BettingEngine;
use poker_betting::infra::{pick_random_action, DeterministicRng, RandomSource};

const MAX_STEPS: usize = 1_000;

fn seated_engine(players: usize) -> BettingEngine {
    let mut engine = BettingEngine::default();
    for i in 0..players {
        engine.add_player(&format!("P{}", i + 1)).unwrap();
    }
    engine
}

fn chips_on_table(engine: &BettingEngine) -> Chips {
    engine.table().total_stacks() + engine.pot_total()
}

/// Одна раздача ботами; потом случайные претенденты забирают поты.
fn play_hand(engine: &mut BettingEngine, rng: &mut DeterministicRng, expected: Chips) {
    engine.start_new_hand().unwrap();

    let mut steps = 0;
    while let Some(action) = pick_random_action(engine, rng) {
        engine.apply_action(action).unwrap();
        steps += 1;
        assert!(steps < MAX_STEPS, "раздача не закончилась");

        assert_eq!(chips_on_table(engine), expected);
        let current = engine.current_bet();
        assert!(engine
            .players()
            .iter()
            .filter(|p| !p.folded)
            .all(|p| p.bet <= current));
    }

    assert_eq!(engine.stage(), Stage::Showdown);

    if !engine.pot_total().is_zero() {
        let contributed = engine.table().total_contributed();
        let pots: Chips = engine.side_pots().iter().map(|p| p.amount).sum();
        assert_eq!(pots, contributed);
        assert_eq!(engine.pot_total(), contributed);
    }

    while !engine.side_pots().is_empty() {
        let pot = &engine.side_pots()[0];
        let winner = pot.eligible_players[rng.next_index(pot.eligible_players.len())].clone();
        engine.award_pot(&winner, Some(0)).unwrap();
    }

    assert!(engine.pot_total().is_zero());
    assert_eq!(chips_on_table(engine), expected);
}

fn run_session(seed: u64, hands: usize) -> BettingEngine {
    let mut rng = DeterministicRng::from_seed(seed);
    let mut engine = seated_engine(6);
    let expected = chips_on_table(&engine);

    for _ in 0..hands {
        if engine.table().funded_count() < 2 {
            engine.reset_stacks_and_setup();
        }
        play_hand(&mut engine, &mut rng, expected);
    }

    engine
}

#[test]
fn random_hands_conserve_chips() {
    let engine = run_session(7, 300);
    assert_eq!(chips_on_table(&engine), Chips(6_000));
    assert_eq!(engine.diagnostics().fallback_completions, 0);
}

#[test]
fn side_pots_always_match_contributions() {
    for seed in 0..10 {
        run_session(seed, 50);
    }
}

#[test]
fn same_seed_same_session() {
    let a = run_session(42, 100);
    let b = run_session(42, 100);
    assert_eq!(a, b);
}
