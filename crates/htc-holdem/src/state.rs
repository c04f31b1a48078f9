use std::collections::HashMap;

use htc_betting::BettingState;
use htc_cards::{Card, Deck, HandScore};
use htc_core::{Chips, HandNumber, SeatId};
use serde::{Deserialize, Serialize};

/// Spec §3's full phase enum. `HandStart` and `Showdown` are named here
/// for data-model completeness but are never an observable resting
/// state: spec §4.D transitions through both "immediately", and nothing
/// but computation happens in either, so `start_hand`/`run_showdown`
/// land directly on `Preflop`/`HandEnd` without a caller ever seeing a
/// state paused in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Lobby,
    HandStart,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    HandEnd,
}

impl Phase {
    pub fn street_label(self) -> &'static str {
        match self {
            Phase::Preflop => "preflop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            _ => "",
        }
    }
}

/// A seat's hand-wide state, persisted across streets (distinct from
/// `htc_betting::Seat`, which only tracks one betting round).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub seat_index: usize,
    pub stack: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub is_dealer: bool,
    pub in_hand: bool,
    pub hole_cards: Option<(Card, Card)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowdownResult {
    /// Winners across every pot layer, deduplicated, in seat order.
    pub winners: Vec<SeatId>,
    pub awarded: HashMap<SeatId, Chips>,
    pub scores: HashMap<SeatId, HandScore>,
    pub summary: String,
}

/// The hold'em game's full state (spec §3 `HoldemState`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldemState {
    pub phase: Phase,
    pub seed: u64,
    pub hand_number: HandNumber,
    pub seats: Vec<Seat>,
    pub deck: Deck,
    pub board: Vec<Card>,
    pub dealer_seat: SeatId,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub betting: Option<BettingState>,
    /// Per-hand cumulative contribution per seat, reset at every hand
    /// start; the authoritative source pots are rebuilt from (spec
    /// §4.D "Contribution accounting").
    pub cumulative_contribution: HashMap<SeatId, Chips>,
    pub action_log: Vec<String>,
    pub showdown: Option<ShowdownResult>,
    /// Whether the deck is a deterministic preset, carried so every new
    /// hand re-deals from the same preset rather than shuffling.
    pub test_deck: Option<Vec<Card>>,
    /// How many of the current `BettingState`'s `action_log` entries have
    /// already been folded into `action_log` above. Reset to 0 whenever a
    /// fresh `BettingState` replaces the old one (spec §4.D "Contribution
    /// accounting" does this for `cumulative_contribution`; this is the
    /// same bookkeeping applied to the action log).
    pub synced_betting_log_len: usize,
}

impl HoldemState {
    pub fn seat(&self, id: SeatId) -> &Seat {
        &self.seats[id]
    }

    pub fn seat_mut(&mut self, id: SeatId) -> &mut Seat {
        &mut self.seats[id]
    }

    pub fn table_size(&self) -> usize {
        self.seats.len()
    }

    pub fn non_folded_in_hand(&self) -> usize {
        self.seats.iter().filter(|s| s.in_hand && !s.folded).count()
    }

    pub fn seats_with_positive_stack(&self) -> usize {
        self.seats.iter().filter(|s| s.stack > 0).count()
    }

    /// Pots rebuilt from hand-wide cumulative contributions + fold
    /// flags — well-defined even mid-hand, across street transitions.
    pub fn pots(&self) -> Vec<htc_betting::Pot> {
        let contributions: Vec<htc_betting::Contribution> = self
            .seats
            .iter()
            .filter(|s| s.in_hand)
            .map(|s| htc_betting::Contribution {
                seat: s.id,
                amount: *self.cumulative_contribution.get(&s.id).unwrap_or(&0),
                folded: s.folded,
            })
            .collect();
        htc_betting::pots_from_contributions(&contributions)
    }

    /// Seats in rotation order starting right after `start`, wrapping
    /// all the way around back through `start` itself, restricted to
    /// seats with `in_hand = true`.
    pub fn rotation_from(&self, start: SeatId) -> Vec<SeatId> {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (start + offset) % n)
            .filter(|&id| self.seats[id].in_hand)
            .collect()
    }

    /// Seats in rotation order starting *at* `start` (inclusive),
    /// wrapping all the way around, restricted to `in_hand = true`.
    pub fn rotation_starting_at(&self, start: SeatId) -> Vec<SeatId> {
        let n = self.seats.len();
        (0..n)
            .map(|offset| (start + offset) % n)
            .filter(|&id| self.seats[id].in_hand)
            .collect()
    }
}
