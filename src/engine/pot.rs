use serde::{Deserialize, Serialize};

use crate::domain::Chips;
use crate::engine::side_pots::SidePot;

/// Банк раздачи: общая сумма и (после завершения раунда) разбивка на сайд-поты.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
    pub side_pots: Vec<SidePot>,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_zero()
    }

    /// Забрать весь остаток банка (все сайд-поты вместе).
    pub fn take_all(&mut self) -> Chips {
        let amount = self.total;
        self.reset();
        amount
    }

    /// Забрать один сайд-пот по индексу.
    pub fn take_side_pot(&mut self, index: usize) -> Option<SidePot> {
        if index >= self.side_pots.len() {
            return None;
        }
        let pot = self.side_pots.remove(index);
        self.total -= pot.amount;
        Some(pot)
    }

    pub fn reset(&mut self) {
        self.total = Chips::ZERO;
        self.side_pots.clear();
    }
}

/// Поделить сумму поровну. Лишние фишки раздаются по одной
/// в порядке перечисления победителей.
pub fn split_evenly(amount: Chips, winners: usize) -> Vec<Chips> {
    if winners == 0 {
        return Vec::new();
    }

    let share = amount.0 / winners as u64;
    let mut remainder = amount.0 % winners as u64;

    (0..winners)
        .map(|_| {
            let mut prize = share;
            if remainder > 0 {
                prize += 1;
                remainder -= 1;
            }
            Chips(prize)
        })
        .collect()
}
