use core::fmt;

use serde::{Deserialize, Serialize};

/// Стадия раздачи. Переходы строго линейные:
/// Setup → Preflop → Flop → Turn → River → Showdown.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Рассадка игроков и настройка блайндов.
    #[default]
    Setup,
    Preflop,
    Flop,
    Turn,
    River,
    /// Ставки закончены, банк ждёт распределения.
    Showdown,
}

impl Stage {
    /// Следующая стадия. Showdown – терминальная (новая раздача идёт через start_hand).
    pub fn next(self) -> Stage {
        match self {
            Stage::Setup => Stage::Preflop,
            Stage::Preflop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River | Stage::Showdown => Stage::Showdown,
        }
    }

    /// Идёт ли на этой стадии раунд ставок.
    pub fn is_betting_round(self) -> bool {
        matches!(self, Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Setup => "SETUP",
            Stage::Preflop => "PREFLOP",
            Stage::Flop => "FLOP",
            Stage::Turn => "TURN",
            Stage::River => "RIVER",
            Stage::Showdown => "SHOWDOWN",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
