use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::{
    validate_blinds, ChipSet, Chips, ConfigError, Player, PlayerStats, SeatIndex, Stage, Table,
    TableConfig,
};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::{is_round_complete, reopen_action, BettingRound};
use crate::engine::errors::{EngineError, InvalidActionReason};
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{blind_seats, first_actor_from, next_actor, next_dealer, next_funded_seat};
use crate::engine::pot::{split_evenly, Pot};
use crate::engine::side_pots::{compute_side_pots, Contribution, SidePot};
use crate::engine::snapshot::{take_snapshot, TableSnapshot};
use crate::engine::validation::validate_action;

/// Счётчики ситуаций, которые при корректных инвариантах не должны возникать.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineDiagnostics {
    /// Сколько раз поиск следующего игрока никого не нашёл
    /// и раунд был закрыт принудительно.
    pub fallback_completions: u32,
}

/// Движок раунда ставок: единственный владелец стола, банка и стадии.
///
/// Все изменения идут через методы `&mut self`; наружу отдаются только
/// снимки (`snapshot()`). Любой метод либо полностью применяется, либо
/// возвращает ошибку, не трогая состояние.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingEngine {
    pub(crate) table: Table,
    pub(crate) round: BettingRound,
    pub(crate) pot: Pot,
    pub(crate) history: HandHistory,
    pub(crate) diagnostics: EngineDiagnostics,
    /// Сколько раздач начато за сессию.
    pub(crate) hands_started: u64,
}

impl Default for BettingEngine {
    fn default() -> Self {
        Self::with_valid_config(TableConfig::default())
    }
}

impl BettingEngine {
    /// Создать движок с проверкой конфига.
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: TableConfig) -> Self {
        Self {
            table: Table::new(config),
            round: BettingRound::setup(),
            pot: Pot::new(),
            history: HandHistory::new(),
            diagnostics: EngineDiagnostics::default(),
            hands_started: 0,
        }
    }

    // ---------------------------------------------------------------------
    // Чтение состояния
    // ---------------------------------------------------------------------

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn players(&self) -> &[Player] {
        &self.table.players
    }

    pub fn config(&self) -> &TableConfig {
        &self.table.config
    }

    pub fn stage(&self) -> Stage {
        self.round.stage
    }

    pub fn current_bet(&self) -> Chips {
        self.round.current_bet
    }

    pub fn active_player(&self) -> Option<SeatIndex> {
        self.round.active_player
    }

    pub fn pot_total(&self) -> Chips {
        self.pot.total
    }

    pub fn side_pots(&self) -> &[SidePot] {
        &self.pot.side_pots
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    pub fn diagnostics(&self) -> EngineDiagnostics {
        self.diagnostics
    }

    pub fn hands_started(&self) -> u64 {
        self.hands_started
    }

    /// Выполнены ли условия завершения текущего раунда. Чистая проверка, ничего не меняет.
    pub fn is_round_complete(&self) -> bool {
        self.round.stage.is_betting_round()
            && is_round_complete(&self.table.players, self.round.current_bet)
    }

    /// Снимок стола; его же возвращают все операции раздачи.
    pub fn snapshot(&self) -> TableSnapshot {
        take_snapshot(self)
    }

    // ---------------------------------------------------------------------
    // Setup
    // ---------------------------------------------------------------------

    fn ensure_setup(&self) -> Result<(), EngineError> {
        if self.round.stage != Stage::Setup {
            return Err(EngineError::NotInSetup {
                stage: self.round.stage,
            });
        }
        Ok(())
    }

    fn ensure_seat(&self, seat: SeatIndex) -> Result<(), EngineError> {
        if seat >= self.table.len() {
            return Err(EngineError::InvalidSeat(seat));
        }
        Ok(())
    }

    /// Посадить игрока со стартовым стеком. Возвращает его место.
    pub fn add_player(&mut self, name: &str) -> Result<SeatIndex, EngineError> {
        self.ensure_setup()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::EmptyPlayerName);
        }
        if self.table.index_of(name).is_some() {
            return Err(EngineError::DuplicatePlayerName(name.to_string()));
        }

        let stack = self.table.config.starting_stack;
        self.table.players.push(Player::new(name, stack));
        debug!("Игрок {} сел за стол со стеком {}", name, stack);

        Ok(self.table.len() - 1)
    }

    /// Убрать игрока. Кнопка дилера сдвигается, если удалён дилер или место перед ним.
    pub fn remove_player(&mut self, seat: SeatIndex) -> Result<Player, EngineError> {
        self.ensure_setup()?;
        self.ensure_seat(seat)?;

        let removed = self.table.players.remove(seat);

        let dealer = self.table.dealer_index;
        if seat <= dealer {
            self.table.dealer_index = dealer.saturating_sub(1);
        }
        let len = self.table.len();
        if len > 0 && self.table.dealer_index >= len {
            self.table.dealer_index = len - 1;
        }

        debug!("Игрок {} покинул стол", removed.name);
        Ok(removed)
    }

    pub fn set_stack(&mut self, seat: SeatIndex, amount: Chips) -> Result<(), EngineError> {
        self.ensure_setup()?;
        self.ensure_seat(seat)?;
        self.table.players[seat].set_stack(amount);
        Ok(())
    }

    /// Выставить стек по пересчитанным физическим фишкам.
    pub fn set_stack_from_chips(&mut self, seat: SeatIndex, chips: &ChipSet) -> Result<(), EngineError> {
        self.set_stack(seat, chips.total())
    }

    pub fn configure_blinds(&mut self, small: Chips, big: Chips) -> Result<(), EngineError> {
        self.ensure_setup()?;
        validate_blinds(small, big).map_err(|_| EngineError::InvalidBlinds { small, big })?;
        self.table.config.small_blind = small;
        self.table.config.big_blind = big;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Жизненный цикл раздачи
    // ---------------------------------------------------------------------

    fn ensure_can_start(&self) -> Result<(), EngineError> {
        if !matches!(self.round.stage, Stage::Setup | Stage::Showdown) {
            return Err(EngineError::HandInProgress {
                stage: self.round.stage,
            });
        }
        if !self.pot.is_empty() {
            return Err(EngineError::PotNotAwarded {
                amount: self.pot.total,
            });
        }
        let funded = self.table.funded_count();
        if funded < 2 {
            return Err(EngineError::InsufficientPlayers { funded });
        }
        Ok(())
    }

    /// Начать раздачу с текущей кнопкой дилера.
    pub fn start_hand(&mut self) -> Result<TableSnapshot, EngineError> {
        self.ensure_can_start()?;
        let funded = self.table.funded_count();
        let dealer = next_funded_seat(&self.table.players, self.table.dealer_index, true)
            .ok_or(EngineError::InsufficientPlayers { funded })?;
        self.begin_hand(dealer)?;
        Ok(self.snapshot())
    }

    /// Передвинуть кнопку на следующего игрока с фишками и начать раздачу.
    /// Блайнды ставятся в этом же вызове.
    pub fn start_new_hand(&mut self) -> Result<TableSnapshot, EngineError> {
        self.ensure_can_start()?;
        let funded = self.table.funded_count();
        let dealer = next_dealer(&self.table.players, self.table.dealer_index)
            .ok_or(EngineError::InsufficientPlayers { funded })?;
        self.begin_hand(dealer)?;
        Ok(self.snapshot())
    }

    fn begin_hand(&mut self, dealer: SeatIndex) -> Result<(), EngineError> {
        let (sb, bb) = blind_seats(&self.table.players, dealer).ok_or(
            EngineError::InsufficientPlayers {
                funded: self.table.funded_count(),
            },
        )?;

        self.table.dealer_index = dealer;
        self.table.small_blind_index = Some(sb);
        self.table.big_blind_index = Some(bb);

        for p in self.table.players.iter_mut() {
            p.reset_for_hand();
            if !p.folded {
                p.stats.hands_played += 1;
            }
        }

        self.pot = Pot::new();
        self.history = HandHistory::new();
        self.hands_started += 1;

        self.history.push(HandEventKind::HandStarted {
            hand_number: self.hands_started,
            dealer: self.table.players[dealer].name.clone(),
            small_blind: self.table.players[sb].name.clone(),
            big_blind: self.table.players[bb].name.clone(),
        });

        let sb_paid = self.post_blind(sb, self.table.config.small_blind);
        let bb_paid = self.post_blind(bb, self.table.config.big_blind);

        // Короткий блайнд не должен завышать ставку для колла.
        self.round = BettingRound::new(Stage::Preflop, sb_paid.max(bb_paid));
        self.round.active_player = Some(bb);
        self.history.push(HandEventKind::StageChanged {
            stage: Stage::Preflop,
        });

        info!(
            "Раздача #{}: дилер {}, SB {} ({}), BB {} ({}), банк {}",
            self.hands_started,
            self.table.players[dealer].name,
            self.table.players[sb].name,
            sb_paid,
            self.table.players[bb].name,
            bb_paid,
            self.pot.total
        );

        // Первым ходит следующий за BB; если ходить некому – раунд закрывается сразу.
        self.advance_or_complete();
        Ok(())
    }

    fn post_blind(&mut self, seat: SeatIndex, amount: Chips) -> Chips {
        let player = &mut self.table.players[seat];
        let paid = player.commit(amount);
        self.pot.add(paid);
        self.history.push(HandEventKind::BlindPosted {
            player: player.name.clone(),
            amount: paid,
            all_in: player.stack.is_zero(),
        });
        paid
    }

    /// Применить действие активного игрока и вернуть новое состояние.
    pub fn apply_action(&mut self, action: impl Into<PlayerAction>) -> Result<TableSnapshot, EngineError> {
        let action = action.into();
        let seat = self.resolve_actor(&action)?;
        validate_action(&self.table.players[seat], &action.kind, &self.round)?;

        self.execute(seat, &action.kind);
        self.advance_or_complete();

        Ok(self.snapshot())
    }

    fn resolve_actor(&self, action: &PlayerAction) -> Result<SeatIndex, EngineError> {
        let stage = self.round.stage;
        let active = match self.round.active_player {
            Some(seat) if stage.is_betting_round() => seat,
            _ => return Err(InvalidActionReason::NoBettingRound { stage }.into()),
        };

        if let Some(name) = &action.actor {
            let seat = self
                .table
                .index_of(name)
                .ok_or_else(|| EngineError::PlayerNotFound(name.clone()))?;
            let player = &self.table.players[seat];
            if !player.can_act() {
                return Err(InvalidActionReason::PlayerCannotAct {
                    name: player.name.clone(),
                }
                .into());
            }
            if seat != active {
                return Err(InvalidActionReason::NotPlayersTurn {
                    name: player.name.clone(),
                    active: self.table.players[active].name.clone(),
                }
                .into());
            }
        }

        Ok(active)
    }

    /// Применение уже провалидированного действия.
    fn execute(&mut self, seat: SeatIndex, kind: &PlayerActionKind) {
        let current_bet = self.round.current_bet;
        let player = &mut self.table.players[seat];

        let mut raised_to = None;
        let paid = match kind {
            PlayerActionKind::Fold => {
                player.folded = true;
                player.has_acted = true;
                Chips::ZERO
            }
            PlayerActionKind::Check => {
                player.has_acted = true;
                Chips::ZERO
            }
            PlayerActionKind::Call => {
                let to_call = player.to_call(current_bet);
                player.has_acted = true;
                player.commit(to_call)
            }
            PlayerActionKind::Raise(total_bet) => {
                let paid = player.commit(*total_bet - player.bet);
                raised_to = Some(player.bet);
                paid
            }
            PlayerActionKind::AllIn => {
                let paid = player.commit(player.stack);
                if player.bet > current_bet {
                    raised_to = Some(player.bet);
                } else {
                    player.has_acted = true;
                }
                paid
            }
        };

        self.pot.add(paid);
        let name = player.name.clone();
        let new_stack = player.stack;

        if let Some(new_bet) = raised_to {
            self.round.on_raise(new_bet);
            reopen_action(&mut self.table.players, seat);
        }

        debug!(
            "{}: {} (внесено {}, стек {}, банк {}, ставка {})",
            name,
            kind.name(),
            paid,
            new_stack,
            self.pot.total,
            self.round.current_bet
        );

        self.history.push(HandEventKind::PlayerActed {
            player: name,
            action: kind.clone(),
            paid,
            new_stack,
            pot_after: self.pot.total,
        });
    }

    /// После каждого действия: победа фолдом, завершение раунда
    /// или передача хода. Повторный вызов на том же состоянии ничего не списывает.
    fn advance_or_complete(&mut self) {
        if !self.round.stage.is_betting_round() {
            return;
        }

        if self.table.in_hand_count() <= 1 {
            self.finish_by_fold();
            return;
        }

        if is_round_complete(&self.table.players, self.round.current_bet) {
            self.complete_round();
            return;
        }

        self.move_to_next_actor();
    }

    fn move_to_next_actor(&mut self) {
        let from = self.round.active_player.unwrap_or(self.table.dealer_index);
        match next_actor(&self.table.players, from, self.round.current_bet) {
            Some(seat) => self.round.active_player = Some(seat),
            None => {
                warn!(
                    "Не найден игрок для хода на стадии {} (ставка {}), раунд закрыт принудительно",
                    self.round.stage, self.round.current_bet
                );
                self.diagnostics.fallback_completions += 1;
                self.complete_round();
            }
        }
    }

    /// Раунд ставок завершён: пересчёт сайд-потов и переход на следующую стадию.
    fn complete_round(&mut self) {
        self.refresh_side_pots();

        if self.table.in_hand_count() <= 1 {
            self.finish_by_fold();
            return;
        }

        loop {
            let next = self.round.stage.next();
            for p in self.table.players.iter_mut() {
                p.reset_for_round();
            }
            self.round = BettingRound::new(next, Chips::ZERO);
            self.history.push(HandEventKind::StageChanged { stage: next });

            if next == Stage::Showdown {
                info!(
                    "Шоудаун: банк {} в {} пот(ах)",
                    self.pot.total,
                    self.pot.side_pots.len()
                );
                return;
            }

            // Ставить могут меньше двух игроков – торговли нет, доезжаем до шоудауна.
            if self.table.actionable_count() >= 2 {
                let start = (self.table.dealer_index + 1) % self.table.len();
                self.round.active_player = first_actor_from(&self.table.players, start);
                info!("Стадия {}: первым ходит место {:?}", next, self.round.active_player);
                return;
            }

            debug!("Стадия {} пропущена: ставить некому", next);
        }
    }

    fn refresh_side_pots(&mut self) {
        let contributions: Vec<Contribution> = self
            .table
            .players
            .iter()
            .map(Contribution::from_player)
            .collect();
        self.pot.side_pots = compute_side_pots(&contributions);
        self.history.push(HandEventKind::SidePotsComputed {
            pots: self.pot.side_pots.len(),
            total: self.pot.side_pots.iter().map(|p| p.amount).sum(),
        });
    }

    /// Остался один игрок: он забирает весь банк, раздача сразу уходит в шоудаун.
    fn finish_by_fold(&mut self) {
        self.refresh_side_pots();
        self.round.stage = Stage::Showdown;
        self.round.active_player = None;
        self.history.push(HandEventKind::StageChanged {
            stage: Stage::Showdown,
        });

        let winner = self.table.players.iter().position(|p| !p.folded);
        if let Some(seat) = winner {
            let amount = self.pot.take_all();
            info!(
                "{} забирает {} – остальные сфолдили",
                self.table.players[seat].name, amount
            );
            self.credit(seat, amount, None);
        }
        self.finish_if_paid_out();
    }

    // ---------------------------------------------------------------------
    // Шоудаун: распределение банка
    // ---------------------------------------------------------------------

    fn ensure_showdown(&self) -> Result<(), EngineError> {
        if self.round.stage != Stage::Showdown {
            return Err(EngineError::NotAtShowdown {
                stage: self.round.stage,
            });
        }
        Ok(())
    }

    fn seat_of(&self, name: &str) -> Result<SeatIndex, EngineError> {
        self.table
            .index_of(name)
            .ok_or_else(|| EngineError::PlayerNotFound(name.trim().to_string()))
    }

    /// Отдать банк победителю.
    ///
    /// С индексом – конкретный сайд-пот (победитель должен на него претендовать).
    /// Без индекса – весь остаток банка без проверок.
    pub fn award_pot(&mut self, winner: &str, pot_index: Option<usize>) -> Result<TableSnapshot, EngineError> {
        self.ensure_showdown()?;
        let seat = self.seat_of(winner)?;

        let amount = match pot_index {
            Some(index) => {
                self.check_eligible(seat, index)?;
                self.pot
                    .take_side_pot(index)
                    .map(|pot| pot.amount)
                    .ok_or(EngineError::NoPotToAward)?
            }
            None => {
                if self.pot.is_empty() {
                    return Err(EngineError::NoPotToAward);
                }
                self.pot.take_all()
            }
        };

        info!("{} получает {}", self.table.players[seat].name, amount);
        self.credit(seat, amount, pot_index);
        self.finish_if_paid_out();
        Ok(self.snapshot())
    }

    /// Разделить банк (или один сайд-пот) между несколькими победителями.
    pub fn split_pot<S: AsRef<str>>(
        &mut self,
        winners: &[S],
        pot_index: Option<usize>,
    ) -> Result<TableSnapshot, EngineError> {
        self.ensure_showdown()?;

        let mut seats: Vec<SeatIndex> = Vec::with_capacity(winners.len());
        for name in winners {
            let seat = self.seat_of(name.as_ref())?;
            if !seats.contains(&seat) {
                seats.push(seat);
            }
        }
        if seats.is_empty() {
            return Err(EngineError::NoWinners);
        }

        let amount = match pot_index {
            Some(index) => {
                for &seat in &seats {
                    self.check_eligible(seat, index)?;
                }
                self.pot
                    .take_side_pot(index)
                    .map(|pot| pot.amount)
                    .ok_or(EngineError::NoPotToAward)?
            }
            None => {
                if self.pot.is_empty() {
                    return Err(EngineError::NoPotToAward);
                }
                self.pot.take_all()
            }
        };

        for (seat, prize) in seats.iter().zip(split_evenly(amount, seats.len())) {
            self.credit(*seat, prize, pot_index);
        }
        info!("Банк {} разделён между {} игроками", amount, seats.len());
        self.finish_if_paid_out();
        Ok(self.snapshot())
    }

    fn check_eligible(&self, seat: SeatIndex, pot_index: usize) -> Result<(), EngineError> {
        let pot = self
            .pot
            .side_pots
            .get(pot_index)
            .ok_or(EngineError::NoPotToAward)?;
        let name = &self.table.players[seat].name;
        if !pot.is_eligible(name) {
            return Err(EngineError::IneligibleWinner {
                name: name.clone(),
                pot_index,
            });
        }
        Ok(())
    }

    fn credit(&mut self, seat: SeatIndex, amount: Chips, pot_index: Option<usize>) {
        let player = &mut self.table.players[seat];
        player.stack += amount;
        player.stats.pots_won += 1;
        player.stats.chips_won += amount;

        self.history.push(HandEventKind::PotAwarded {
            player: player.name.clone(),
            amount,
            pot_index,
        });
    }

    /// Раздача закончена, когда в банке ничего не осталось.
    fn finish_if_paid_out(&mut self) {
        if self.pot.is_empty() {
            self.history.push(HandEventKind::HandFinished {
                hand_number: self.hands_started,
            });
        }
    }

    // ---------------------------------------------------------------------
    // Возврат в меню
    // ---------------------------------------------------------------------

    /// Все стеки – снова стартовые, кнопка на первом месте, статистика обнулена.
    pub fn reset_stacks_and_setup(&mut self) -> TableSnapshot {
        let starting_stack = self.table.config.starting_stack;
        for p in self.table.players.iter_mut() {
            p.stack = starting_stack;
            p.stats = PlayerStats::new(starting_stack);
        }
        self.table.dealer_index = 0;
        self.enter_setup();
        info!("Стеки сброшены до {}", starting_stack);
        self.snapshot()
    }

    /// Выйти в setup, сохранив стеки и кнопку.
    ///
    /// Стеки остаются как есть: внесённое в банк не возвращается,
    /// нераспределённый остаток сгорает.
    pub fn return_to_setup_preserving_stacks(&mut self) -> TableSnapshot {
        if !self.pot.is_empty() {
            let amount = self.pot.total;
            self.history.push(HandEventKind::PotDiscarded { amount });
            warn!("Раздача прервана, нераспределённый банк {} сгорает", amount);
        }

        self.enter_setup();
        self.snapshot()
    }

    fn enter_setup(&mut self) {
        for p in self.table.players.iter_mut() {
            p.reset_for_round();
            p.contributed = Chips::ZERO;
            p.folded = false;
        }
        self.round = BettingRound::setup();
        self.pot.reset();
        self.table.small_blind_index = None;
        self.table.big_blind_index = None;
    }
}
