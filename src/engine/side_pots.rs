use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Player};

/// Диапазон вкладов, который покрывает пот: (from, to].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributionRange {
    pub from: Chips,
    pub to: Chips,
}

/// Сайд-пот: часть банка, на которую претендуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_players: Vec<String>,
    pub contribution_range: ContributionRange,
}

impl SidePot {
    pub fn is_eligible(&self, name: &str) -> bool {
        self.eligible_players.iter().any(|p| p == name)
    }
}

/// Вклад одного игрока в банк за раздачу.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub name: String,
    pub amount: Chips,
    pub folded: bool,
}

impl Contribution {
    pub fn new(name: impl Into<String>, amount: Chips, folded: bool) -> Self {
        Self {
            name: name.into(),
            amount,
            folded,
        }
    }

    pub fn from_player(player: &Player) -> Self {
        Self::new(player.name.clone(), player.contributed, player.folded)
    }
}

/// Посчитать сайд-поты из сумм, которые внесли игроки.
///
/// Фишки сфолдивших остаются в банке и заполняют все уровни до их вклада,
/// но претендовать на банк сфолдивший не может. Поты идут от младшего
/// уровня к старшему, сумма потов всегда равна сумме вкладов.
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<SidePot> {
    let total: Chips = contributions.iter().map(|c| c.amount).sum();
    if total.is_zero() {
        return Vec::new();
    }

    let live: Vec<&Contribution> = contributions
        .iter()
        .filter(|c| !c.folded && !c.amount.is_zero())
        .collect();

    if live.len() <= 1 {
        let top = live.first().map(|c| c.amount).unwrap_or(total);
        return vec![SidePot {
            amount: total,
            eligible_players: live.iter().map(|c| c.name.clone()).collect(),
            contribution_range: ContributionRange {
                from: Chips::ZERO,
                to: top,
            },
        }];
    }

    // Уровни – различные вклады живых игроков, по возрастанию.
    let mut levels: Vec<Chips> = live.iter().map(|c| c.amount).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots = Vec::with_capacity(levels.len());
    let mut prev_level = Chips::ZERO;

    for &level in &levels {
        let amount: Chips = contributions
            .iter()
            .map(|c| c.amount.min(level) - c.amount.min(prev_level))
            .sum();

        let eligible_players = live
            .iter()
            .filter(|c| c.amount >= level)
            .map(|c| c.name.clone())
            .collect();

        pots.push(SidePot {
            amount,
            eligible_players,
            contribution_range: ContributionRange {
                from: prev_level,
                to: level,
            },
        });

        prev_level = level;
    }

    // Фишки сфолдивших выше старшего живого уровня достаются верхнему поту.
    let overflow: Chips = contributions
        .iter()
        .map(|c| c.amount.saturating_sub(prev_level))
        .sum();
    if let Some(top) = pots.last_mut() {
        top.amount += overflow;
    }

    pots
}
