use serde::{Deserialize, Serialize};

use crate::domain::{ChipSet, Chips, SeatIndex, Stage};
use crate::engine::hand_history::HandEvent;
use crate::engine::side_pots::SidePot;
use crate::engine::snapshot::{SeatSnapshot, TableSnapshot};

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerViewDto {
    pub seat_index: SeatIndex,
    pub name: String,
    pub stack: Chips,
    /// Ставка в текущем раунде.
    pub bet: Chips,
    /// Всё, что внесено в банк за раздачу.
    pub contributed: Chips,
    pub folded: bool,
    pub is_all_in: bool,
    pub has_acted: bool,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    pub is_active: bool,
    /// Раскладка стека по цветам для отображения фишек.
    pub chips: ChipSet,
}

/// DTO стола – всё, что нужно UI, чтобы нарисовать текущее состояние.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub stage: Stage,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub starting_stack: Chips,
    pub current_bet: Chips,
    pub pot: Chips,
    pub side_pots: Vec<SidePot>,
    pub dealer_index: SeatIndex,
    pub small_blind_index: Option<SeatIndex>,
    pub big_blind_index: Option<SeatIndex>,
    /// Чей ход (если идёт раунд ставок).
    pub active_player: Option<SeatIndex>,
    pub players: Vec<PlayerViewDto>,
    pub hand_number: u64,
    /// Все фишки на столе: стеки + банк.
    pub total_chips: Chips,
}

impl TableViewDto {
    pub fn player(&self, name: &str) -> Option<&PlayerViewDto> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn active_player_name(&self) -> Option<&str> {
        self.active_player
            .and_then(|seat| self.players.get(seat))
            .map(|p| p.name.as_str())
    }
}

impl From<SeatSnapshot> for PlayerViewDto {
    fn from(seat: SeatSnapshot) -> Self {
        Self {
            chips: ChipSet::from_amount(seat.stack),
            seat_index: seat.seat_index,
            name: seat.name,
            stack: seat.stack,
            bet: seat.bet,
            contributed: seat.contributed,
            folded: seat.folded,
            is_all_in: seat.is_all_in,
            has_acted: seat.has_acted,
            is_dealer: seat.is_dealer,
            is_small_blind: seat.is_small_blind,
            is_big_blind: seat.is_big_blind,
            is_active: seat.is_active,
        }
    }
}

impl From<TableSnapshot> for TableViewDto {
    fn from(snapshot: TableSnapshot) -> Self {
        Self {
            stage: snapshot.stage,
            small_blind: snapshot.small_blind,
            big_blind: snapshot.big_blind,
            starting_stack: snapshot.starting_stack,
            current_bet: snapshot.current_bet,
            pot: snapshot.pot,
            side_pots: snapshot.side_pots,
            dealer_index: snapshot.dealer_index,
            small_blind_index: snapshot.small_blind_index,
            big_blind_index: snapshot.big_blind_index,
            active_player: snapshot.active_player,
            players: snapshot.players.into_iter().map(PlayerViewDto::from).collect(),
            hand_number: snapshot.hand_number,
            total_chips: snapshot.total_chips,
        }
    }
}

/// Статистика игрока за сессию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStatsDto {
    pub name: String,
    pub hands_played: u32,
    pub total_bet: Chips,
    pub average_bet: Chips,
    pub pots_won: u32,
    pub chips_won: Chips,
    pub buy_in: Chips,
    pub stack: Chips,
    /// Стек минус buy-in.
    pub net: i64,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Игрок посажен на место.
    PlayerAdded { seat_index: SeatIndex },

    /// Вернуть обновлённое состояние стола.
    TableState(TableViewDto),
}

/// DTO истории текущей раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistoryDto {
    pub hand_number: u64,
    pub events: Vec<HandEvent>,
}
