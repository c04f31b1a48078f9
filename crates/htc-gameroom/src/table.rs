use std::sync::Arc;

use htc_cards::Card;
use htc_core::{CoreError, ErrorKind, HandNumber, SeatId};
use htc_holdem::{GameModule, HoldemModule, HoldemOptions, HoldemState, Phase, PlayerView, PublicView, RawAction, ShowdownResult};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::transport::Transport;

/// Opaque table identifier (spec §6.2 `tableId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub Uuid);

impl TableId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TableId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A durable record of one completed hand, supplementing the spec's
/// in-memory `actionLog` with something an external store would
/// actually persist for replay (SPEC_FULL §3, grounded in
/// `gameroom/src/records` / `rbp-records`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_number: HandNumber,
    pub board: Vec<Card>,
    pub action_log: Vec<String>,
    pub showdown: Option<ShowdownResult>,
}

/// One logical table (spec §4.E). Owns the `HoldemState`, is the sole
/// mutator, and serializes every `applyAction` behind a `tokio::sync::
/// Mutex` — held across the `.await` points in `publish`, so no two
/// mutations for this table ever interleave (spec §5 "single-threaded
/// cooperative per table").
pub struct Table {
    id: TableId,
    seated: Vec<SeatId>,
    state: Mutex<HoldemState>,
    history: Mutex<Vec<HandRecord>>,
    transport: Arc<dyn Transport>,
}

impl Table {
    pub fn new(
        id: TableId,
        seated: Vec<SeatId>,
        options: HoldemOptions,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        let state = HoldemModule::create_initial_state(&seated, options)?;
        Ok(Self {
            id,
            seated,
            state: Mutex::new(state),
            history: Mutex::new(Vec::new()),
            transport,
        })
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn seated(&self) -> &[SeatId] {
        &self.seated
    }

    /// Validates membership, applies the action, and — on success —
    /// publishes fresh views to the transport. On failure, state is
    /// untouched and nothing is published (spec §6.2).
    ///
    /// If the action just closed the current betting round, the table
    /// auto-issues the follow-up `ADVANCE_PHASE` meta-action on the
    /// caller's behalf (and again, if that in turn closes an
    /// already-settled round, e.g. everyone all-in) so a caller who only
    /// ever submits player actions sees the street advance immediately,
    /// matching spec §8's S2/S4 scenarios without requiring a second
    /// round trip. A caller talking to `HoldemModule` directly still must
    /// call `ADVANCE_PHASE` itself; this auto-advance is purely a
    /// mediator-layer convenience, mirroring the teacher's `Room::run()`
    /// loop auto-dealing through a `Turn::Chance` step.
    pub async fn apply_action(&self, player: SeatId, action: RawAction) -> Result<(), CoreError> {
        if !self.seated.contains(&player) {
            return Err(CoreError::new(ErrorKind::NotSeated, format!("seat {player} is not seated at this table")));
        }
        let mut state = self.state.lock().await;
        let was_hand_end = state.phase == Phase::HandEnd;
        let mut next = HoldemModule::apply_action(&state, player, action)?;
        while matches!(next.phase, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River)
            && next.betting.as_ref().map(|b| b.round_closed()).unwrap_or(false)
        {
            next = HoldemModule::apply_action(&next, player, RawAction::new("ADVANCE_PHASE"))?;
        }
        if !was_hand_end && next.phase == Phase::HandEnd {
            self.record_hand(&next).await;
        }
        *state = next;
        self.publish(&state).await;
        Ok(())
    }

    async fn record_hand(&self, state: &HoldemState) {
        let record = HandRecord {
            hand_number: state.hand_number,
            board: state.board.clone(),
            action_log: state.action_log.clone(),
            showdown: state.showdown.clone(),
        };
        self.history.lock().await.push(record);
    }

    /// Non-mutating: the same views the last successful mutation
    /// published (spec §4.E "Idempotent queries").
    pub async fn current_views(&self) -> (PublicView, Vec<(SeatId, PlayerView)>) {
        let state = self.state.lock().await;
        self.views_of(&state)
    }

    pub async fn history(&self) -> Vec<HandRecord> {
        self.history.lock().await.clone()
    }

    fn views_of(&self, state: &HoldemState) -> (PublicView, Vec<(SeatId, PlayerView)>) {
        let public = HoldemModule::public_view(state);
        let players = self.seated.iter().map(|&p| (p, HoldemModule::player_view(state, p))).collect();
        (public, players)
    }

    async fn publish(&self, state: &HoldemState) {
        let (public, players) = self.views_of(state);
        self.transport.publish_public(self.id, public).await;
        for (player, view) in players {
            self.transport.publish_player(self.id, player, view).await;
        }
        log::debug!("[table {}] published views after hand {}", self.id, state.hand_number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::NullTransport;

    fn table(n: usize) -> Table {
        Table::new(TableId::new(), (0..n).collect(), HoldemOptions::default(), Arc::new(NullTransport)).unwrap()
    }

    #[tokio::test]
    async fn action_from_unseated_player_is_rejected() {
        let t = table(2);
        let err = t.apply_action(5, RawAction::new("check")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotSeated);
    }

    #[tokio::test]
    async fn successful_start_hand_publishes_and_is_queryable() {
        let t = table(2);
        t.apply_action(0, RawAction::new("START_HAND")).await.unwrap();
        let (public, players) = t.current_views().await;
        assert_eq!(public.phase, Phase::Preflop);
        assert_eq!(players.len(), 2);
        assert!(players[0].1.hole_cards.is_some());
    }

    #[tokio::test]
    async fn closing_a_round_auto_advances_the_street() {
        let t = table(2);
        t.apply_action(0, RawAction::new("START_HAND")).await.unwrap();
        let (public, _) = t.current_views().await;
        let first = public.active_player_id.unwrap();
        t.apply_action(first, RawAction::new("call")).await.unwrap();
        let (public, _) = t.current_views().await;
        let second = public.active_player_id.unwrap();
        // No explicit ADVANCE_PHASE call: the mediator issues it for us.
        t.apply_action(second, RawAction::new("check")).await.unwrap();
        let (public, _) = t.current_views().await;
        assert_eq!(public.phase, Phase::Flop);
        assert_eq!(public.board.len(), 3);
    }

    #[tokio::test]
    async fn failed_action_does_not_mutate_state() {
        let t = table(2);
        t.apply_action(0, RawAction::new("START_HAND")).await.unwrap();
        let (before, _) = t.current_views().await;
        let _ = t.apply_action(0, RawAction::new("dance")).await;
        let (after, _) = t.current_views().await;
        assert_eq!(before.phase, after.phase);
        assert_eq!(before.hand_number, after.hand_number);
    }
}
