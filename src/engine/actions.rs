use serde::{Deserialize, Serialize};

use crate::domain::Chips;
use crate::engine::errors::{EngineError, InvalidActionReason};

/// Тип действия игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    /// Уравнять. Если фишек не хватает – all-in на весь стек.
    Call,
    /// Рейз до указанной ИТОГОВОЙ ставки в раунде (не прибавка).
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl PlayerActionKind {
    /// Разобрать намерение из UI: "fold" / "check" / "call" / "raise" + сумма / "all-in".
    pub fn from_intent(action: &str, amount: Option<Chips>) -> Result<Self, EngineError> {
        let kind = match action.trim().to_ascii_lowercase().as_str() {
            "fold" => PlayerActionKind::Fold,
            "check" => PlayerActionKind::Check,
            "call" => PlayerActionKind::Call,
            "raise" | "bet" => {
                let amount = amount.ok_or(InvalidActionReason::MissingAmount)?;
                PlayerActionKind::Raise(amount)
            }
            "all-in" | "allin" | "all_in" => PlayerActionKind::AllIn,
            other => return Err(InvalidActionReason::UnknownAction(other.to_string()).into()),
        };
        Ok(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerActionKind::Fold => "fold",
            PlayerActionKind::Check => "check",
            PlayerActionKind::Call => "call",
            PlayerActionKind::Raise(_) => "raise",
            PlayerActionKind::AllIn => "all-in",
        }
    }
}

/// Действие, которое UI отправляет в движок.
///
/// Действует всегда активный игрок. Если `actor` указан, движок
/// дополнительно проверяет, что это именно его ход.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    pub actor: Option<String>,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(kind: PlayerActionKind) -> Self {
        Self { actor: None, kind }
    }

    pub fn by(actor: impl Into<String>, kind: PlayerActionKind) -> Self {
        Self {
            actor: Some(actor.into()),
            kind,
        }
    }
}

impl From<PlayerActionKind> for PlayerAction {
    fn from(kind: PlayerActionKind) -> Self {
        PlayerAction::new(kind)
    }
}
