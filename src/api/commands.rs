use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::{ChipSet, Chips, SeatIndex};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::BettingEngine;

use super::dto::{CommandResponse, TableViewDto};
use super::errors::ApiError;

/// Команда верхнего уровня: всё, что UI может попросить у движка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Посадить игрока (только в setup).
    AddPlayer { name: String },

    /// Убрать игрока с места (только в setup).
    RemovePlayer { seat_index: SeatIndex },

    /// Выставить стек вручную.
    SetStack { seat_index: SeatIndex, amount: Chips },

    /// Выставить стек по пересчитанным фишкам.
    SetStackFromChips { seat_index: SeatIndex, chips: ChipSet },

    /// Поменять блайнды.
    ConfigureBlinds { small_blind: Chips, big_blind: Chips },

    /// Раздача с текущей кнопкой.
    StartHand,

    /// Кнопка переходит дальше, затем новая раздача.
    StartNewHand,

    /// Действие активного игрока.
    Action(ActionCommand),

    /// Отдать банк (или сайд-пот) победителю.
    AwardPot {
        winner: String,
        pot_index: Option<usize>,
    },

    /// Поделить банк (или сайд-пот).
    SplitPot {
        winners: Vec<String>,
        pot_index: Option<usize>,
    },

    /// Вернуть всем стартовый стек и выйти в setup.
    ResetStacksAndSetup,

    /// Выйти в setup, сохранив стеки.
    ReturnToSetup,
}

/// Действие игрока в том виде, в каком его шлёт UI: строка + опциональная сумма.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionCommand {
    /// Кто жмёт кнопку. Если не указан – действует активный игрок.
    #[serde(default)]
    pub player: Option<String>,
    /// "fold" / "check" / "call" / "raise" / "all-in".
    pub action: String,
    /// Для raise – итоговая ставка в раунде.
    #[serde(default)]
    pub amount: Option<Chips>,
}

impl ActionCommand {
    pub fn into_action(self) -> Result<PlayerAction, ApiError> {
        let kind = PlayerActionKind::from_intent(&self.action, self.amount)?;
        Ok(PlayerAction {
            actor: self.player,
            kind,
        })
    }
}

/// Выполнить команду над движком.
pub fn execute(engine: &mut BettingEngine, command: Command) -> Result<CommandResponse, ApiError> {
    debug!("Команда: {:?}", command);

    let snapshot = match command {
        Command::AddPlayer { name } => {
            let seat_index = engine.add_player(&name)?;
            return Ok(CommandResponse::PlayerAdded { seat_index });
        }
        Command::RemovePlayer { seat_index } => {
            engine.remove_player(seat_index)?;
            engine.snapshot()
        }
        Command::SetStack { seat_index, amount } => {
            engine.set_stack(seat_index, amount)?;
            engine.snapshot()
        }
        Command::SetStackFromChips { seat_index, chips } => {
            engine.set_stack_from_chips(seat_index, &chips)?;
            engine.snapshot()
        }
        Command::ConfigureBlinds {
            small_blind,
            big_blind,
        } => {
            engine.configure_blinds(small_blind, big_blind)?;
            engine.snapshot()
        }
        Command::StartHand => engine.start_hand()?,
        Command::StartNewHand => engine.start_new_hand()?,
        Command::Action(cmd) => engine.apply_action(cmd.into_action()?)?,
        Command::AwardPot { winner, pot_index } => engine.award_pot(&winner, pot_index)?,
        Command::SplitPot { winners, pot_index } => engine.split_pot(&winners, pot_index)?,
        Command::ResetStacksAndSetup => engine.reset_stacks_and_setup(),
        Command::ReturnToSetup => engine.return_to_setup_preserving_stacks(),
    };

    Ok(CommandResponse::TableState(TableViewDto::from(snapshot)))
}

/// Команда в JSON → ответ в JSON. Битый JSON отдаётся как `BadRequest`.
pub fn execute_json(engine: &mut BettingEngine, raw: &str) -> Result<String, ApiError> {
    let command: Command = serde_json::from_str(raw)?;
    let response = execute(engine, command)?;
    Ok(serde_json::to_string(&response)?)
}
