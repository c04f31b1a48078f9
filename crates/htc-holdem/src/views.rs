use htc_betting::{LegalActions, Pot};
use htc_cards::Card;
use htc_core::{Chips, HandNumber, SeatId};
use serde::{Deserialize, Serialize};

use crate::state::{HoldemState, Phase};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSeatView {
    pub id: SeatId,
    pub seat_index: usize,
    pub stack: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub is_dealer: bool,
    pub in_hand: bool,
}

/// The shared-display projection. Never contains hole cards or deck
/// order (spec §3 invariant 5, §4.D "PublicView").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicView {
    pub phase: Phase,
    pub hand_number: HandNumber,
    pub board: Vec<Card>,
    pub seats: Vec<PublicSeatView>,
    pub pots: Vec<Pot>,
    pub active_player_id: Option<SeatId>,
    pub action_log: Vec<String>,
}

/// The per-seat projection: everything in `PublicView` plus that seat's
/// own hole cards and its currently legal actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub public: PublicView,
    pub hole_cards: Option<(Card, Card)>,
    pub available_actions: Option<LegalActions>,
}

pub fn public_view(state: &HoldemState) -> PublicView {
    PublicView {
        phase: state.phase,
        hand_number: state.hand_number,
        board: state.board.clone(),
        seats: state
            .seats
            .iter()
            .map(|s| PublicSeatView {
                id: s.id,
                seat_index: s.seat_index,
                stack: s.stack,
                folded: s.folded,
                all_in: s.all_in,
                is_dealer: s.is_dealer,
                in_hand: s.in_hand,
            })
            .collect(),
        pots: state.pots(),
        active_player_id: state.betting.as_ref().and_then(|b| b.active_player()),
        action_log: state.action_log.clone(),
    }
}

pub fn player_view(state: &HoldemState, seat_id: SeatId) -> PlayerView {
    let hole_cards = state.seats.get(seat_id).and_then(|s| s.hole_cards);
    let available_actions = state.betting.as_ref().map(|b| b.legal_actions(seat_id));
    PlayerView {
        public: public_view(state),
        hole_cards,
        available_actions,
    }
}
