use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex, Stage};
use crate::engine::game_loop::BettingEngine;
use crate::engine::side_pots::SidePot;

/// Состояние одного места после операции.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSnapshot {
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
}

/// Снимок стола, который движок отдаёт после каждой операции.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
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
    pub active_player: Option<SeatIndex>,
    pub players: Vec<SeatSnapshot>,
    pub hand_number: u64,
    /// Стеки + банк.
    pub total_chips: Chips,
}

impl TableSnapshot {
    pub fn player(&self, name: &str) -> Option<&SeatSnapshot> {
        self.players.iter().find(|s| s.name == name)
    }

    pub fn active_player_name(&self) -> Option<&str> {
        self.active_player
            .and_then(|seat| self.players.get(seat))
            .map(|s| s.name.as_str())
    }
}

pub(crate) fn take_snapshot(engine: &BettingEngine) -> TableSnapshot {
    let table = engine.table();
    let active = engine.active_player();

    let players = table
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| SeatSnapshot {
            seat_index: seat,
            name: p.name.clone(),
            stack: p.stack,
            bet: p.bet,
            contributed: p.contributed,
            folded: p.folded,
            // Пропускающий раздачу с нулевым стеком – не all-in.
            is_all_in: p.is_all_in() && !p.contributed.is_zero(),
            has_acted: p.has_acted,
            is_dealer: seat == table.dealer_index && !table.is_empty(),
            is_small_blind: table.small_blind_index == Some(seat),
            is_big_blind: table.big_blind_index == Some(seat),
            is_active: active == Some(seat),
        })
        .collect();

    TableSnapshot {
        stage: engine.stage(),
        small_blind: table.config.small_blind,
        big_blind: table.config.big_blind,
        starting_stack: table.config.starting_stack,
        current_bet: engine.current_bet(),
        pot: engine.pot_total(),
        side_pots: engine.side_pots().to_vec(),
        dealer_index: table.dealer_index,
        small_blind_index: table.small_blind_index,
        big_blind_index: table.big_blind_index,
        active_player: active,
        players,
        hand_number: engine.hands_started(),
        total_chips: table.total_stacks() + engine.pot_total(),
    }
}
