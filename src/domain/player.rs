use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Статистика игрока за сессию (между двумя `reset_stacks_and_setup`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStats {
    /// Сколько раздач игрок начал с фишками.
    pub hands_played: u32,
    /// Сколько всего фишек поставлено (включая блайнды).
    pub total_bet: Chips,
    /// Сколько банков (или долей банка) выиграно.
    pub pots_won: u32,
    /// Сколько фишек получено из банков.
    pub chips_won: Chips,
    /// Сколько фишек игроку выдано на старте и при ручной правке стека.
    pub buy_in: Chips,
}

impl PlayerStats {
    pub fn new(buy_in: Chips) -> Self {
        Self {
            buy_in,
            ..Self::default()
        }
    }

    /// Средняя сумма ставок за раздачу (0, если раздач не было).
    pub fn average_bet(&self) -> Chips {
        if self.hands_played == 0 {
            Chips::ZERO
        } else {
            Chips(self.total_bet.0 / self.hands_played as u64)
        }
    }
}

/// Игрок за столом.
///
/// `bet` – ставка в текущем раунде ставок, `contributed` – всё,
/// что игрок внёс в банк за раздачу (по этим суммам считаются side pots).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub stack: Chips,
    pub bet: Chips,
    pub contributed: Chips,
    pub folded: bool,
    pub has_acted: bool,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: Chips) -> Self {
        Self {
            name: name.into(),
            stack,
            bet: Chips::ZERO,
            contributed: Chips::ZERO,
            folded: false,
            has_acted: false,
            stats: PlayerStats::new(stack),
        }
    }

    /// В раздаче, но фишек больше нет.
    pub fn is_all_in(&self) -> bool {
        !self.folded && self.stack.is_zero()
    }

    /// Может ли игрок ещё делать ставки в этой раздаче.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.stack.is_zero()
    }

    /// Сколько нужно доплатить, чтобы уравнять `current_bet`.
    pub fn to_call(&self, current_bet: Chips) -> Chips {
        current_bet.saturating_sub(self.bet)
    }

    /// Сходил и уравнял – больше действий в раунде не требуется.
    pub fn is_settled(&self, current_bet: Chips) -> bool {
        self.has_acted && self.bet == current_bet
    }

    /// Взять из стека не более `amount` и положить в ставку.
    /// Возвращает реально внесённую сумму (меньше `amount` при all-in).
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        self.bet += real;
        self.contributed += real;
        self.stats.total_bet += real;
        real
    }

    /// Сброс перед новой раздачей. Игрок без фишек раздачу пропускает.
    pub fn reset_for_hand(&mut self) {
        self.bet = Chips::ZERO;
        self.contributed = Chips::ZERO;
        self.has_acted = false;
        self.folded = self.stack.is_zero();
    }

    /// Сброс перед новым раундом ставок (folded и стек сохраняются).
    pub fn reset_for_round(&mut self) {
        self.bet = Chips::ZERO;
        self.has_acted = false;
    }

    /// Ручная правка стека в setup: разница уходит в buy-in,
    /// чтобы чистый результат не "прыгал".
    pub fn set_stack(&mut self, amount: Chips) {
        if amount >= self.stack {
            self.stats.buy_in += amount - self.stack;
        } else {
            self.stats.buy_in -= self.stack - amount;
        }
        self.stack = amount;
    }

    /// Выигрыш относительно buy-in (может быть отрицательным).
    pub fn net_position(&self) -> i64 {
        self.stack.signed_diff(self.stats.buy_in)
    }
}
