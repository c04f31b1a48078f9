//! The `GameModule` contract (spec §4.F / §6.1): the narrow, synchronous
//! surface a table mediator talks to, so other games can reuse the same
//! mediator and transport plumbing later without either side knowing
//! the other's internals.

use htc_core::{CoreError, SeatId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A wire-format action: a type tag plus an optional numeric/structured
/// payload. Recognized tags are module-specific (spec §6.1 lists hold'em's:
/// `START_HAND`, `ADVANCE_PHASE`, `fold`, `check`, `call`, `bet`, `raise`,
/// `all_in`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Option<Value>,
}

impl RawAction {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    pub fn with_amount(kind: impl Into<String>, amount: i64) -> Self {
        Self {
            kind: kind.into(),
            payload: Some(serde_json::json!({ "amount": amount })),
        }
    }

    /// A `raise` action targeting `to_amount` (a total, not a delta) —
    /// the `raise` type's payload field is `toAmount`, not `amount`.
    pub fn raise_to(to_amount: i64) -> Self {
        Self {
            kind: "raise".into(),
            payload: Some(serde_json::json!({ "toAmount": to_amount })),
        }
    }

    /// Extracts an integer field from the payload, if present.
    pub fn int_field(&self, field: &str) -> Option<i64> {
        self.payload.as_ref()?.get(field)?.as_i64()
    }
}

/// A synchronous, pure game engine the mediator drives.
///
/// Every operation is a pure function of its inputs: no I/O, no interior
/// mutability observable across calls. `apply_action` returns a new
/// state rather than mutating in place, so the mediator can commit the
/// replacement atomically (spec §5).
pub trait GameModule {
    type State: Clone;
    type PublicView;
    type PlayerView;
    type Options;
    type Result;

    fn create_initial_state(players: &[SeatId], options: Self::Options) -> Result<Self::State, CoreError>;
    fn apply_action(state: &Self::State, player: SeatId, action: RawAction) -> Result<Self::State, CoreError>;
    fn public_view(state: &Self::State) -> Self::PublicView;
    fn player_view(state: &Self::State, player: SeatId) -> Self::PlayerView;
    fn is_game_over(state: &Self::State) -> bool;
    fn result(state: &Self::State) -> Option<Self::Result>;
}
