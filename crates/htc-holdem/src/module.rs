use std::collections::HashMap;

use htc_betting::Action;
use htc_cards::Deck;
use htc_contract::{GameModule, RawAction};
use htc_core::{CoreError, ErrorKind, SeatId};

use crate::dealing::{deal_flop, deal_one, setup_postflop, start_hand};
use crate::options::HoldemOptions;
use crate::showdown::run_showdown;
use crate::state::{HoldemState, Phase, Seat, ShowdownResult};
use crate::views::{player_view, public_view, PlayerView, PublicView};

/// `createInitialState` (spec §4.D / §6.1). Seat identity is simply the
/// seat's table position, `0..players.len()`, per spec §3's "stable
/// identifier, seat index".
pub fn create_initial_state(players: &[SeatId], options: HoldemOptions) -> Result<HoldemState, CoreError> {
    if players.len() < 2 {
        return Err(CoreError::new(ErrorKind::InsufficientPlayers, "a table needs at least 2 seats"));
    }
    let seats = (0..players.len())
        .map(|i| Seat {
            id: i,
            seat_index: i,
            stack: options.initial_stack,
            folded: false,
            all_in: false,
            is_dealer: i == 0,
            in_hand: false,
            hole_cards: None,
        })
        .collect();
    Ok(HoldemState {
        phase: Phase::Lobby,
        seed: options.seed,
        hand_number: 0,
        seats,
        deck: Deck::shuffled(options.seed, 0),
        board: Vec::new(),
        dealer_seat: 0,
        small_blind: options.small_blind,
        big_blind: options.big_blind,
        betting: None,
        cumulative_contribution: HashMap::new(),
        action_log: Vec::new(),
        showdown: None,
        test_deck: options.test_deck,
        synced_betting_log_len: 0,
    })
}

/// `applyAction` (spec §4.D "Action translation").
pub fn apply_action(state: &HoldemState, player: SeatId, action: RawAction) -> Result<HoldemState, CoreError> {
    match action.kind.as_str() {
        "START_HAND" => start_hand(state),
        "ADVANCE_PHASE" => advance_phase(state),
        "fold" => apply_betting(state, player, Action::Fold),
        "check" => apply_betting(state, player, Action::Check),
        "call" => apply_betting(state, player, Action::Call),
        "bet" => {
            let amount = action
                .int_field("amount")
                .ok_or_else(|| CoreError::new(ErrorKind::InvalidAmount, "bet requires an integer \"amount\""))?;
            if amount <= 0 {
                return Err(CoreError::new(ErrorKind::InvalidAmount, "bet amount must be positive"));
            }
            apply_betting(state, player, Action::Bet(amount))
        }
        "raise" => {
            let to_amount = action
                .int_field("toAmount")
                .ok_or_else(|| CoreError::new(ErrorKind::InvalidAmount, "raise requires an integer \"toAmount\""))?;
            if to_amount <= 0 {
                return Err(CoreError::new(ErrorKind::InvalidAmount, "raise toAmount must be positive"));
            }
            apply_betting(state, player, Action::Raise(to_amount))
        }
        "all_in" => apply_betting(state, player, Action::AllIn),
        other => Err(CoreError::new(ErrorKind::UnknownAction, format!("unrecognized action type {other:?}"))),
    }
}

fn apply_betting(state: &HoldemState, player: SeatId, action: Action) -> Result<HoldemState, CoreError> {
    if !matches!(state.phase, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River) {
        return Err(CoreError::new(ErrorKind::WrongPhase, "no betting round is open in this phase"));
    }
    let mut next = state.clone();
    let mut betting = next
        .betting
        .take()
        .ok_or_else(|| CoreError::new(ErrorKind::WrongPhase, "no betting round is open"))?;
    betting.apply(player, action)?;
    next.betting = Some(betting);
    crate::dealing::sync_from_betting(&mut next);
    log::debug!("[holdem] seat {player}: {action}");
    Ok(next)
}

/// `ADVANCE_PHASE`: deals the next street and opens a new betting round,
/// or runs the showdown from the river (spec §4.D phase machine). Legal
/// only once the current round has closed.
fn advance_phase(state: &HoldemState) -> Result<HoldemState, CoreError> {
    if !matches!(state.phase, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River) {
        return Err(CoreError::new(
            ErrorKind::WrongPhase,
            "ADVANCE_PHASE is only legal while a betting round is open or has closed",
        ));
    }
    let closed = state.betting.as_ref().map(|b| b.round_closed()).unwrap_or(false);
    if !closed {
        return Err(CoreError::new(ErrorKind::WrongPhase, "the current betting round has not closed yet"));
    }

    let mut next = state.clone();
    if next.non_folded_in_hand() <= 1 {
        run_showdown(&mut next);
        return Ok(next);
    }

    match next.phase {
        Phase::Preflop => {
            deal_flop(&mut next);
            setup_postflop(&mut next, "flop");
            next.phase = Phase::Flop;
        }
        Phase::Flop => {
            deal_one(&mut next);
            setup_postflop(&mut next, "turn");
            next.phase = Phase::Turn;
        }
        Phase::Turn => {
            deal_one(&mut next);
            setup_postflop(&mut next, "river");
            next.phase = Phase::River;
        }
        Phase::River => {
            run_showdown(&mut next);
        }
        _ => unreachable!("guarded above"),
    }
    Ok(next)
}

pub fn is_game_over(state: &HoldemState) -> bool {
    state.seats_with_positive_stack() <= 1
}

pub fn result(state: &HoldemState) -> Option<ShowdownResult> {
    state.showdown.clone()
}

/// The zero-sized [`GameModule`] implementation the table mediator drives.
pub struct HoldemModule;

impl GameModule for HoldemModule {
    type State = HoldemState;
    type PublicView = PublicView;
    type PlayerView = PlayerView;
    type Options = HoldemOptions;
    type Result = ShowdownResult;

    fn create_initial_state(players: &[SeatId], options: Self::Options) -> Result<Self::State, CoreError> {
        create_initial_state(players, options)
    }

    fn apply_action(state: &Self::State, player: SeatId, action: RawAction) -> Result<Self::State, CoreError> {
        apply_action(state, player, action)
    }

    fn public_view(state: &Self::State) -> Self::PublicView {
        public_view(state)
    }

    fn player_view(state: &Self::State, player: SeatId) -> Self::PlayerView {
        player_view(state, player)
    }

    fn is_game_over(state: &Self::State) -> bool {
        is_game_over(state)
    }

    fn result(state: &Self::State) -> Option<Self::Result> {
        result(state)
    }
}

#[cfg(test)]
pub fn create_lobby_state(n: usize, options: HoldemOptions) -> HoldemState {
    let players: Vec<SeatId> = (0..n).collect();
    create_initial_state(&players, options).expect("valid lobby state")
}
