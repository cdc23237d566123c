//! Движок раунда ставок: действия, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `BettingEngine`
//! Основные операции:
//!   - `start_hand` / `start_new_hand` – запустить раздачу (с ротацией кнопки или без)
//!   - `apply_action` – применить действие активного игрока
//!   - `award_pot` / `split_pot` – распределить банк на шоудауне
//!
//! Каждая операция раздачи возвращает `TableSnapshot`; DTO для UI строит `api`.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod side_pots;
pub mod snapshot;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::{EngineError, InvalidActionReason};
pub use game_loop::{BettingEngine, EngineDiagnostics};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::{split_evenly, Pot};
pub use side_pots::{compute_side_pots, Contribution, ContributionRange, SidePot};
pub use snapshot::{SeatSnapshot, TableSnapshot};
