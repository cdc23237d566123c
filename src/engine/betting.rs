use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Player, SeatIndex, Stage};

/// Состояние раунда ставок (на конкретной стадии).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingRound {
    pub stage: Stage,
    /// Текущая целевая ставка, до которой должны дотянуться игроки.
    pub current_bet: Chips,
    /// Чей сейчас ход. None вне раунда ставок (setup / showdown).
    pub active_player: Option<SeatIndex>,
}

impl BettingRound {
    pub fn new(stage: Stage, current_bet: Chips) -> Self {
        Self {
            stage,
            current_bet,
            active_player: None,
        }
    }

    pub fn setup() -> Self {
        Self::new(Stage::Setup, Chips::ZERO)
    }

    /// Обновить состояние после raise (или all-in выше текущей ставки).
    pub fn on_raise(&mut self, new_bet: Chips) {
        self.current_bet = new_bet;
    }
}

/// Раунд завершён, если каждый не сфолдивший игрок либо в all-in,
/// либо уже действовал и уравнял текущую ставку.
pub fn is_round_complete(players: &[Player], current_bet: Chips) -> bool {
    players
        .iter()
        .filter(|p| !p.folded)
        .all(|p| p.stack.is_zero() || p.is_settled(current_bet))
}

/// Рейз снова открывает торговлю: все остальные активные игроки
/// (не fold, не all-in) должны действовать ещё раз.
pub fn reopen_action(players: &mut [Player], raiser: SeatIndex) {
    for (seat, p) in players.iter_mut().enumerate() {
        if seat == raiser {
            p.has_acted = true;
        } else if p.can_act() {
            p.has_acted = false;
        }
    }
}
