use htc_cards::Card;
use htc_core::Chips;
use serde::{Deserialize, Serialize};

/// Configuration for `createInitialState` (spec §4.D).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldemOptions {
    pub seed: u64,
    pub initial_stack: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Deterministic deck for tests; disables shuffling when present.
    pub test_deck: Option<Vec<Card>>,
}

impl Default for HoldemOptions {
    fn default() -> Self {
        Self {
            seed: 1,
            initial_stack: 1000,
            small_blind: 5,
            big_blind: 10,
            test_deck: None,
        }
    }
}
