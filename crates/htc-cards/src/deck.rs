use super::card::Card;
use super::rank::Rank;
use super::rng::Rng;
use super::suit::Suit;

/// The 52-card deck, optionally pre-shuffled, consumed from the front.
///
/// Built in a fixed canonical order (rank-major, suit-minor) and then
/// Fisher-Yates shuffled using [`Rng`], iterating `i` from `n-1` down to
/// `1` and swapping with `rng.next_int(i + 1)` — matching spec §4.A
/// exactly so a given `(seed, handNumber)` always yields the same order.
///
/// A preset deck (test-only) skips the shuffle and is consumed verbatim.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the 52 cards in canonical order, unshuffled.
    fn canonical() -> Vec<Card> {
        Rank::ALL
            .iter()
            .flat_map(|&rank| Suit::ALL.iter().map(move |&suit| Card::from((rank, suit))))
            .collect()
    }

    /// Builds a fresh deck and shuffles it with an `Rng` seeded from
    /// `seed + hand_number`, per spec §4.A.
    pub fn shuffled(seed: u64, hand_number: u64) -> Self {
        let mut cards = Self::canonical();
        let mut rng = Rng::new(seed.wrapping_add(hand_number));
        let n = cards.len();
        for i in (1..n).rev() {
            let j = rng.next_int(i + 1);
            cards.swap(i, j);
        }
        Self { cards }
    }

    /// A deck that is a preset, ordered sequence of cards. No shuffle is
    /// performed; cards are consumed in the supplied order. Test-only,
    /// but the type itself doesn't enforce that — the caller (the
    /// hold'em module, via `HoldemOptions::test_deck`) does.
    pub fn preset(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Number of cards remaining.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Draws the next card from the front of the deck, if any remain.
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }
}
