use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::player::Player;

/// Индекс места за столом (позиция в `Table::players`).
pub type SeatIndex = usize;

/// Ошибки конфигурации стола.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Блайнды должны быть положительными (SB={small}, BB={big})")]
    InvalidBlinds { small: Chips, big: Chips },

    #[error("Стартовый стек должен быть положительным")]
    ZeroStartingStack,

    #[error("Некорректный JSON конфига: {0}")]
    Json(#[from] serde_json::Error),
}

/// Конфиг стола: блайнды и стартовый стек новых игроков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Сколько фишек получает новый игрок (и все игроки после сброса стеков).
    pub starting_stack: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: Chips(5),
            big_blind: Chips(10),
            starting_stack: Chips(1000),
        }
    }
}

impl TableConfig {
    pub fn new(small_blind: Chips, big_blind: Chips, starting_stack: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
            starting_stack,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_blinds(self.small_blind, self.big_blind)?;
        if self.starting_stack.is_zero() {
            return Err(ConfigError::ZeroStartingStack);
        }
        Ok(())
    }

    /// Загрузить конфиг из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}

/// Оба блайнда должны быть > 0. Соотношение SB/BB не навязываем.
pub fn validate_blinds(small: Chips, big: Chips) -> Result<(), ConfigError> {
    if small.is_zero() || big.is_zero() {
        return Err(ConfigError::InvalidBlinds { small, big });
    }
    Ok(())
}

/// Стол: упорядоченные места, кнопка дилера и позиции блайндов текущей раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub config: TableConfig,

    /// Игроки в порядке посадки. Удаление места сдвигает последующие индексы.
    pub players: Vec<Player>,

    pub dealer_index: SeatIndex,

    /// Позиции блайндов – выставляются при старте раздачи.
    pub small_blind_index: Option<SeatIndex>,
    pub big_blind_index: Option<SeatIndex>,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            players: Vec::new(),
            dealer_index: 0,
            small_blind_index: None,
            big_blind_index: None,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<SeatIndex> {
        let name = name.trim();
        self.players.iter().position(|p| p.name == name)
    }

    /// Игроки с фишками – только они участвуют в следующей раздаче.
    pub fn funded_count(&self) -> usize {
        self.players.iter().filter(|p| !p.stack.is_zero()).count()
    }

    /// Не сфолдившие игроки (включая all-in).
    pub fn in_hand_count(&self) -> usize {
        self.players.iter().filter(|p| !p.folded).count()
    }

    /// Игроки, которые ещё могут ставить (не fold и не all-in).
    pub fn actionable_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    pub fn total_contributed(&self) -> Chips {
        self.players.iter().map(|p| p.contributed).sum()
    }

    pub fn total_stacks(&self) -> Chips {
        self.players.iter().map(|p| p.stack).sum()
    }
}
