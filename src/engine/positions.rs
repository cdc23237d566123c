use crate::domain::{Chips, Player, SeatIndex};

/// Найти следующее место с фишками по кругу (включая/исключая start).
/// Просматриваем не больше N мест.
pub fn next_funded_seat(players: &[Player], start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    scan_from(players, start, include_start, |p| !p.stack.is_zero())
}

/// Первое место по кругу, начиная с `start` (включительно), где игрок может ставить.
pub fn first_actor_from(players: &[Player], start: SeatIndex) -> Option<SeatIndex> {
    scan_from(players, start, true, Player::can_act)
}

/// Следующий игрок, которому нужно действовать: не fold, не all-in
/// и ещё не "сходил и уравнял". Поиск ограничен N местами; `None`
/// означает, что действовать некому.
pub fn next_actor(players: &[Player], from: SeatIndex, current_bet: Chips) -> Option<SeatIndex> {
    scan_from(players, from, false, |p| p.can_act() && !p.is_settled(current_bet))
}

/// Позиции малого и большого блайнда для дилера `dealer`.
///
/// Участвуют только места с фишками. Хедз-ап: дилер ставит малый блайнд.
pub fn blind_seats(players: &[Player], dealer: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let funded = players.iter().filter(|p| !p.stack.is_zero()).count();
    if funded < 2 {
        return None;
    }

    if funded == 2 {
        let sb = next_funded_seat(players, dealer, true)?;
        let bb = next_funded_seat(players, sb, false)?;
        return Some((sb, bb));
    }

    let sb = next_funded_seat(players, dealer, false)?;
    let bb = next_funded_seat(players, sb, false)?;
    Some((sb, bb))
}

/// Предложить следующую позицию дилера: следующее место с фишками.
pub fn next_dealer(players: &[Player], dealer: SeatIndex) -> Option<SeatIndex> {
    next_funded_seat(players, dealer, false)
}

fn scan_from(
    players: &[Player],
    start: SeatIndex,
    include_start: bool,
    pred: impl Fn(&Player) -> bool,
) -> Option<SeatIndex> {
    let n = players.len();
    if n == 0 {
        return None;
    }

    let mut idx = start % n;
    if !include_start {
        idx = (idx + 1) % n;
    }

    for _ in 0..n {
        if pred(&players[idx]) {
            return Some(idx);
        }
        idx = (idx + 1) % n;
    }

    None
}
