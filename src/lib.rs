//! Движок ставок для офлайн-покера: стол, блайнды, раунды ставок,
//! сайд-поты и распределение банка. Карты и оценка рук остаются
//! за пределами движка – победителя называет ведущий.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;

pub use domain::{Chips, Stage, TableConfig};
pub use engine::{BettingEngine, EngineError, PlayerAction, PlayerActionKind};
