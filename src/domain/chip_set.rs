use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Цвет (номинал) физической фишки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChipColor {
    /// $1
    White,
    /// $5
    Red,
    /// $10
    Blue,
    /// $25
    Green,
    /// $100
    Black,
}

impl ChipColor {
    /// От старшего номинала к младшему – порядок для жадного разложения.
    pub const DESCENDING: [ChipColor; 5] = [
        ChipColor::Black,
        ChipColor::Green,
        ChipColor::Blue,
        ChipColor::Red,
        ChipColor::White,
    ];

    pub fn value(self) -> Chips {
        match self {
            ChipColor::White => Chips(1),
            ChipColor::Red => Chips(5),
            ChipColor::Blue => Chips(10),
            ChipColor::Green => Chips(25),
            ChipColor::Black => Chips(100),
        }
    }
}

/// Набор физических фишек игрока (сколько штук каждого цвета).
///
/// Нужен, когда стек пересчитывают "руками" по фишкам на столе:
/// `BettingEngine::set_stack_from_chips` берёт `total()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChipSet {
    pub white: u32,
    pub red: u32,
    pub blue: u32,
    pub green: u32,
    pub black: u32,
}

impl ChipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, color: ChipColor) -> u32 {
        match color {
            ChipColor::White => self.white,
            ChipColor::Red => self.red,
            ChipColor::Blue => self.blue,
            ChipColor::Green => self.green,
            ChipColor::Black => self.black,
        }
    }

    fn count_mut(&mut self, color: ChipColor) -> &mut u32 {
        match color {
            ChipColor::White => &mut self.white,
            ChipColor::Red => &mut self.red,
            ChipColor::Blue => &mut self.blue,
            ChipColor::Green => &mut self.green,
            ChipColor::Black => &mut self.black,
        }
    }

    /// Добавить/убрать фишки одного цвета. Количество не уходит ниже нуля.
    pub fn adjust(&mut self, color: ChipColor, delta: i64) {
        let slot = self.count_mut(color);
        let next = (*slot as i64 + delta).clamp(0, u32::MAX as i64);
        *slot = next as u32;
    }

    /// Суммарная стоимость набора.
    pub fn total(&self) -> Chips {
        ChipColor::DESCENDING
            .iter()
            .map(|&color| color.value().times(self.count(color) as usize))
            .sum()
    }

    /// Разложить сумму на минимальное число фишек (жадно, от старшего номинала).
    pub fn from_amount(amount: Chips) -> Self {
        let mut rest = amount.0;
        let mut set = ChipSet::new();
        for color in ChipColor::DESCENDING {
            let value = color.value().0;
            let n = rest / value;
            *set.count_mut(color) = n.min(u32::MAX as u64) as u32;
            rest -= n * value;
        }
        set
    }
}
