use crate::domain::Player;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingRound;
use crate::engine::errors::{EngineError, InvalidActionReason};

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Вызывается до любых изменений: если здесь `Ok`, применение действия
/// уже не может упасть.
pub fn validate_action(
    player: &Player,
    action: &PlayerActionKind,
    round: &BettingRound,
) -> Result<(), EngineError> {
    if !round.stage.is_betting_round() {
        return Err(InvalidActionReason::NoBettingRound { stage: round.stage }.into());
    }

    if !player.can_act() {
        return Err(InvalidActionReason::PlayerCannotAct {
            name: player.name.clone(),
        }
        .into());
    }

    let to_call = player.to_call(round.current_bet);

    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(())
            } else {
                Err(InvalidActionReason::CannotCheck { to_call }.into())
            }
        }

        // Нехватка фишек на call – это all-in call, не ошибка.
        PlayerActionKind::Call => Ok(()),

        PlayerActionKind::Raise(total_bet) => {
            if *total_bet <= round.current_bet {
                return Err(InvalidActionReason::RaiseNotAboveCurrentBet {
                    amount: *total_bet,
                    current_bet: round.current_bet,
                }
                .into());
            }

            let required = *total_bet - player.bet;
            if required > player.stack {
                return Err(InvalidActionReason::InsufficientChips {
                    required,
                    available: player.stack,
                }
                .into());
            }

            Ok(())
        }

        PlayerActionKind::AllIn => {
            if player.stack.is_zero() {
                return Err(InvalidActionReason::NoChipsLeft.into());
            }
            Ok(())
        }
    }
}
