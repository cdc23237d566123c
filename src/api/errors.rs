use serde::{Deserialize, Serialize};

use crate::domain::ConfigError;
use crate::engine::{EngineError, InvalidActionReason};

/// Ошибки внешнего API (то, что отдаём UI).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Действие игрока отклонено – ход не меняется.
    InvalidAction(String),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),

    /// Игрок не найден за столом.
    PlayerNotFound(String),

    /// Ошибка распределения банка.
    PotError(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::InvalidAction(InvalidActionReason::UnknownAction(_))
            | EngineError::InvalidAction(InvalidActionReason::MissingAmount) => {
                ApiError::BadRequest(message)
            }
            EngineError::InvalidAction(_) => ApiError::InvalidAction(message),
            EngineError::PlayerNotFound(_) => ApiError::PlayerNotFound(message),
            EngineError::IneligibleWinner { .. }
            | EngineError::NoPotToAward
            | EngineError::NoWinners => ApiError::PotError(message),
            _ => ApiError::InvalidCommand(message),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
