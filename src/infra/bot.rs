//! Простой бот: случайное допустимое действие для активного игрока.
//! Используется в стресс-тесте и в dev-CLI.

use crate::domain::Chips;
use crate::engine::{BettingEngine, PlayerActionKind};
use crate::infra::rng::RandomSource;

/// Выбрать случайное действие, которое движок гарантированно примет.
///
/// `None` – сейчас никто не ходит (setup или шоудаун).
pub fn pick_random_action(engine: &BettingEngine, rng: &mut impl RandomSource) -> Option<PlayerActionKind> {
    let seat = engine.active_player()?;
    let player = engine.players().get(seat)?;

    let current_bet = engine.current_bet();
    let to_call = player.to_call(current_bet);
    let max_bet = player.bet + player.stack;

    let mut options = Vec::with_capacity(4);
    if to_call.is_zero() {
        options.push(PlayerActionKind::Check);
    } else {
        options.push(PlayerActionKind::Fold);
        options.push(PlayerActionKind::Call);
    }

    // Рейз: от текущей ставки + BB до всего стека.
    let min_raise = current_bet + engine.config().big_blind;
    if max_bet > min_raise {
        let amount = rng.next_in_range(min_raise.0, max_bet.0);
        options.push(PlayerActionKind::Raise(Chips(amount)));
    }

    // All-in редко, чтобы раздачи не заканчивались на первой улице.
    if rng.next_index(8) == 0 {
        options.push(PlayerActionKind::AllIn);
    }

    let idx = rng.next_index(options.len());
    Some(options.swap_remove(idx))
}
