use thiserror::Error;

use crate::domain::{Chips, SeatIndex, Stage};

/// Почему конкретное действие игрока отклонено.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidActionReason {
    #[error("сейчас нет раунда ставок (стадия {stage})")]
    NoBettingRound { stage: Stage },

    #[error("сейчас ход {active}, а не {name}")]
    NotPlayersTurn { name: String, active: String },

    #[error("игрок {name} сфолдил или в all-in и не может действовать")]
    PlayerCannotAct { name: String },

    #[error("нельзя check – нужно доплатить {to_call}")]
    CannotCheck { to_call: Chips },

    #[error("рейз до {amount} должен быть больше текущей ставки {current_bet}")]
    RaiseNotAboveCurrentBet { amount: Chips, current_bet: Chips },

    #[error("недостаточно фишек: нужно {required}, в стеке {available} (используйте all-in)")]
    InsufficientChips { required: Chips, available: Chips },

    #[error("all-in невозможен: стек пуст")]
    NoChipsLeft,

    #[error("для рейза нужна сумма")]
    MissingAmount,

    #[error("неизвестное действие: {0}")]
    UnknownAction(String),
}

/// Ошибки движка ставок.
///
/// Любая ошибка возвращается до изменения состояния: после `Err`
/// движок остаётся ровно таким, каким был до вызова.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Недопустимое действие: {0}")]
    InvalidAction(InvalidActionReason),

    #[error("Для раздачи нужно минимум 2 игрока с фишками (сейчас {funded})")]
    InsufficientPlayers { funded: usize },

    #[error("Игрок {name} не может претендовать на банк #{pot_index}")]
    IneligibleWinner { name: String, pot_index: usize },

    #[error("Нет банка для распределения")]
    NoPotToAward,

    #[error("Игрок {0} не найден за столом")]
    PlayerNotFound(String),

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Игрок с именем {0} уже сидит за столом")]
    DuplicatePlayerName(String),

    #[error("Имя игрока не может быть пустым")]
    EmptyPlayerName,

    #[error("Блайнды должны быть положительными (SB={small}, BB={big})")]
    InvalidBlinds { small: Chips, big: Chips },

    #[error("Операция доступна только в setup (сейчас {stage})")]
    NotInSetup { stage: Stage },

    #[error("Раздача уже идёт (стадия {stage})")]
    HandInProgress { stage: Stage },

    #[error("Распределение банка доступно только на шоудауне (сейчас {stage})")]
    NotAtShowdown { stage: Stage },

    #[error("В банке остались нераспределённые фишки: {amount}")]
    PotNotAwarded { amount: Chips },

    #[error("Не указан ни один победитель")]
    NoWinners,
}

impl From<InvalidActionReason> for EngineError {
    fn from(reason: InvalidActionReason) -> Self {
        EngineError::InvalidAction(reason)
    }
}
