use std::collections::HashMap;

use htc_betting::{BettingState, ForcedBet, RoundInit};
use htc_cards::Deck;
use htc_core::{Chips, CoreError, ErrorKind, SeatId};

use crate::state::{HoldemState, Phase};

/// `START_HAND` (spec §4.D "Hand start").
pub fn start_hand(state: &HoldemState) -> Result<HoldemState, CoreError> {
    if !matches!(state.phase, Phase::Lobby | Phase::HandEnd) {
        return Err(CoreError::new(
            ErrorKind::WrongPhase,
            "START_HAND is only legal from lobby or hand_end",
        ));
    }
    if state.seats_with_positive_stack() < 2 {
        return Err(CoreError::new(
            ErrorKind::InsufficientPlayers,
            "at least 2 seats with a positive stack are required to start a hand",
        ));
    }

    let is_first_hand = state.hand_number == 0;
    let dealer_seat = if is_first_hand {
        state
            .seats
            .iter()
            .find(|s| s.stack > 0)
            .map(|s| s.seat_index)
            .unwrap_or(0)
    } else {
        let n = state.seats.len();
        (1..=n)
            .map(|offset| (state.dealer_seat + offset) % n)
            .find(|&id| state.seats[id].stack > 0)
            .unwrap_or(state.dealer_seat)
    };

    let mut next = state.clone();
    next.hand_number = state.hand_number + 1;
    next.dealer_seat = dealer_seat;
    for seat in next.seats.iter_mut() {
        seat.folded = false;
        seat.all_in = false;
        seat.in_hand = seat.stack > 0;
        seat.is_dealer = seat.seat_index == dealer_seat;
        seat.hole_cards = None;
    }

    next.deck = match &next.test_deck {
        Some(preset) => Deck::preset(preset.clone()),
        None => Deck::shuffled(next.seed, next.hand_number),
    };
    next.board.clear();
    next.showdown = None;
    next.cumulative_contribution = HashMap::new();
    next.action_log = Vec::new();
    next.synced_betting_log_len = 0;

    deal_hole_cards(&mut next);
    let entry = format!("hand {} dealt, dealer seat {}", next.hand_number, next.dealer_seat);
    next.action_log.push(entry.clone());
    setup_preflop(&mut next);
    next.phase = Phase::Preflop;
    log::info!("[holdem] {entry}");
    Ok(next)
}

/// Two passes around the table, one hole card per seat per pass (spec
/// §4.D step 5), not a per-seat pair-at-a-time deal — the pass order is
/// what makes a given (seed, handNumber) reproduce an identical deal.
fn deal_hole_cards(state: &mut HoldemState) {
    let in_hand: Vec<SeatId> = state.seats.iter().filter(|s| s.in_hand).map(|s| s.id).collect();
    let mut first = HashMap::new();
    for &id in &in_hand {
        if let Some(card) = state.deck.draw() {
            first.insert(id, card);
        }
    }
    let mut second = HashMap::new();
    for &id in &in_hand {
        if let Some(card) = state.deck.draw() {
            second.insert(id, card);
        }
    }
    for &id in &in_hand {
        if let (Some(&a), Some(&b)) = (first.get(&id), second.get(&id)) {
            state.seats[id].hole_cards = Some((a, b));
        }
    }
}

/// Small blind / big blind / first-to-act (spec §4.D "Preflop setup"),
/// with an explicit heads-up branch rather than relying on the
/// degeneracy of the general rotation formula (spec §9).
fn setup_preflop(state: &mut HoldemState) {
    let in_hand: Vec<SeatId> = state.seats.iter().filter(|s| s.in_hand).map(|s| s.id).collect();

    let (sb_seat, bb_seat, first_to_act) = if in_hand.len() == 2 {
        let other = in_hand.iter().copied().find(|&id| id != state.dealer_seat).unwrap();
        (state.dealer_seat, other, state.dealer_seat)
    } else {
        let rotation = state.rotation_from(state.dealer_seat);
        let sb = rotation[0];
        let bb = rotation[1];
        let first = rotation.get(2).copied().unwrap_or(rotation[0]);
        (sb, bb, first)
    };

    let seats: Vec<(SeatId, Chips)> = state
        .rotation_starting_at(first_to_act)
        .into_iter()
        .map(|id| (id, state.seats[id].stack))
        .collect();

    let init = RoundInit {
        seats,
        forced: vec![
            ForcedBet { seat: sb_seat, amount: state.small_blind },
            ForcedBet { seat: bb_seat, amount: state.big_blind },
        ],
        first_to_act: Some(first_to_act),
        min_open_bet: state.big_blind,
        street: "preflop".into(),
    };
    state.betting = Some(BettingState::new(init));
    state.synced_betting_log_len = 0;
    sync_from_betting(state);
}

/// First-to-act / min-open-bet for a fresh postflop round (spec §4.D
/// "Postflop setup"). No forced bets.
pub fn setup_postflop(state: &mut HoldemState, street: &str) {
    let first_to_act = state
        .rotation_from(state.dealer_seat)
        .into_iter()
        .find(|&id| !state.seats[id].folded && state.seats[id].stack > 0);

    let seats: Vec<(SeatId, Chips)> = match first_to_act {
        Some(start) => state
            .rotation_starting_at(start)
            .into_iter()
            .filter(|&id| !state.seats[id].folded)
            .map(|id| (id, state.seats[id].stack))
            .collect(),
        None => Vec::new(),
    };

    let init = RoundInit {
        seats,
        forced: Vec::new(),
        first_to_act,
        min_open_bet: state.big_blind,
        street: street.into(),
    };
    state.betting = Some(BettingState::new(init));
    state.synced_betting_log_len = 0;
    sync_from_betting(state);
}

pub fn deal_flop(state: &mut HoldemState) {
    for _ in 0..3 {
        if let Some(card) = state.deck.draw() {
            state.board.push(card);
        }
    }
}

pub fn deal_one(state: &mut HoldemState) {
    if let Some(card) = state.deck.draw() {
        state.board.push(card);
    }
}

/// Folds hand-wide `cumulative_contribution`, seat `stack`/`all_in`
/// flags, and the betting round's newly appended `action_log` entries
/// into `HoldemState` (spec §4.D "Contribution accounting"; §3's
/// `action_log` is kept up to date the same way). Run after every
/// betting-engine action and every new round's forced bets.
pub fn sync_from_betting(state: &mut HoldemState) {
    let (views, log, street) = match &state.betting {
        Some(betting) => (betting.seats(), betting.action_log().to_vec(), betting.street().to_string()),
        None => return,
    };
    for view in views {
        let delta = view.total_contribution - *state.cumulative_contribution.get(&view.id).unwrap_or(&0);
        if delta != 0 {
            *state.cumulative_contribution.entry(view.id).or_insert(0) += delta;
        }
        let seat = &mut state.seats[view.id];
        seat.stack = view.stack;
        seat.all_in = view.all_in;
        if view.folded {
            seat.folded = true;
        }
    }
    if log.len() > state.synced_betting_log_len {
        for entry in &log[state.synced_betting_log_len..] {
            state.action_log.push(format!("[{street}] {entry}"));
        }
        state.synced_betting_log_len = log.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::create_lobby_state;
    use crate::options::HoldemOptions;

    #[test]
    fn start_hand_deals_two_cards_each_and_leaves_46_in_deck() {
        let state = create_lobby_state(3, HoldemOptions { seed: 42, ..HoldemOptions::default() });
        let dealt = start_hand(&state).unwrap();
        assert_eq!(dealt.phase, Phase::Preflop);
        for seat in &dealt.seats {
            assert!(seat.hole_cards.is_some());
        }
        assert_eq!(dealt.deck.remaining(), 52 - 3 * 2);
    }

    #[test]
    fn start_hand_records_a_dealt_entry_in_the_action_log() {
        let state = create_lobby_state(3, HoldemOptions { seed: 42, ..HoldemOptions::default() });
        let dealt = start_hand(&state).unwrap();
        assert_eq!(dealt.action_log.len(), 1);
        assert!(dealt.action_log[0].contains("hand 1 dealt"));
    }

    #[test]
    fn betting_actions_append_to_the_hand_wide_action_log() {
        let state = create_lobby_state(2, HoldemOptions { seed: 7, small_blind: 5, big_blind: 10, ..HoldemOptions::default() });
        let dealt = start_hand(&state).unwrap();
        let entries_after_deal = dealt.action_log.len();
        let actor = dealt.betting.as_ref().unwrap().active_player().unwrap();
        let mut after_call = dealt.clone();
        after_call.betting.as_mut().unwrap().apply(actor, htc_betting::Action::Call).unwrap();
        sync_from_betting(&mut after_call);
        assert_eq!(after_call.action_log.len(), entries_after_deal + 1);
        assert!(after_call.action_log.last().unwrap().contains("call"));
    }

    #[test]
    fn heads_up_dealer_posts_small_blind_and_acts_first() {
        let state = create_lobby_state(2, HoldemOptions { seed: 7, small_blind: 5, big_blind: 10, ..HoldemOptions::default() });
        let dealt = start_hand(&state).unwrap();
        let betting = dealt.betting.as_ref().unwrap();
        assert_eq!(betting.active_player(), Some(dealt.dealer_seat));
    }

    #[test]
    fn insufficient_players_is_rejected() {
        let mut state = create_lobby_state(2, HoldemOptions::default());
        state.seats[1].stack = 0;
        let err = start_hand(&state).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InsufficientPlayers);
    }
}
