//! Доменная модель: фишки, игроки, стол, стадии раздачи.

pub mod chip_set;
pub mod chips;
pub mod player;
pub mod stage;
pub mod table;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Chips и т.п.
pub use chip_set::*;
pub use chips::*;
pub use player::*;
pub use stage::*;
pub use table::*;
