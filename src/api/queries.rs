use serde::{Deserialize, Serialize};

use crate::engine::BettingEngine;

use super::dto::{HandHistoryDto, PlayerStatsDto, TableViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Получить состояние стола.
    GetTable,

    /// История текущей раздачи.
    GetHistory,

    /// Статистика игроков за сессию.
    GetStats,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Table(TableViewDto),
    History(HandHistoryDto),
    Stats(Vec<PlayerStatsDto>),
}

pub fn query(engine: &BettingEngine, query: &Query) -> QueryResponse {
    match query {
        Query::GetTable => QueryResponse::Table(build_table_view(engine)),
        Query::GetHistory => QueryResponse::History(HandHistoryDto {
            hand_number: engine.hands_started(),
            events: engine.history().events.clone(),
        }),
        Query::GetStats => QueryResponse::Stats(build_stats(engine)),
    }
}

/// Сформировать DTO стола из состояния движка.
pub fn build_table_view(engine: &BettingEngine) -> TableViewDto {
    TableViewDto::from(engine.snapshot())
}

/// Собрать статистику игроков.
pub fn build_stats(engine: &BettingEngine) -> Vec<PlayerStatsDto> {
    engine
        .players()
        .iter()
        .map(|p| PlayerStatsDto {
            name: p.name.clone(),
            hands_played: p.stats.hands_played,
            total_bet: p.stats.total_bet,
            average_bet: p.stats.average_bet(),
            pots_won: p.stats.pots_won,
            chips_won: p.stats.chips_won,
            buy_in: p.stats.buy_in,
            stack: p.stack,
            net: p.net_position(),
        })
        .collect()
}
