use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Stage};
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        hand_number: u64,
        dealer: String,
        small_blind: String,
        big_blind: String,
    },

    /// Блайнд поставлен (возможно, неполный – all-in).
    BlindPosted {
        player: String,
        amount: Chips,
        all_in: bool,
    },

    /// Действие игрока.
    PlayerActed {
        player: String,
        action: PlayerActionKind,
        /// Сколько фишек реально ушло в банк этим действием.
        paid: Chips,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Переход на новую стадию.
    StageChanged { stage: Stage },

    /// Пересчитаны сайд-поты.
    SidePotsComputed { pots: usize, total: Chips },

    /// Выплата банка (или его части).
    PotAwarded {
        player: String,
        amount: Chips,
        pot_index: Option<usize>,
    },

    /// Раздача прервана, нераспределённый банк сгорел.
    PotDiscarded { amount: Chips },

    /// Банк распределён полностью.
    HandFinished { hand_number: u64 },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// История текущей раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&HandEventKind> {
        self.events.last().map(|e| &e.kind)
    }
}
