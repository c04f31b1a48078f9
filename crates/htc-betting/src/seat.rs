use htc_core::{Chips, SeatId};

/// A seat's wagering state within one betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub folded: bool,
    pub all_in: bool,
    pub stack: Chips,
    pub round_contribution: Chips,
    pub total_contribution: Chips,
    pub has_acted: bool,
    /// Whether this seat may still raise. Cleared for seats that have
    /// already acted at the current bet level when a later raise is an
    /// under-minimum all-in (spec §4.C / §9: "no reopening"); restored
    /// for every active seat whenever a full bet or raise reopens the
    /// round.
    pub may_raise: bool,
}

impl Seat {
    pub fn new(id: SeatId, stack: Chips) -> Self {
        Self {
            id,
            folded: false,
            all_in: false,
            stack,
            round_contribution: 0,
            total_contribution: 0,
            has_acted: false,
            may_raise: true,
        }
    }

    /// A seat needs action iff it's not folded, not all-in, has chips
    /// behind, and either hasn't matched the current bet or hasn't
    /// acted yet this round (spec §4.C).
    pub fn needs_action(&self, current_bet: Chips) -> bool {
        !self.folded
            && !self.all_in
            && self.stack > 0
            && (self.round_contribution < current_bet || !self.has_acted)
    }

    /// A seat that cannot act gates nothing: it's already done for the
    /// round once folded, all-in, or out of chips.
    pub fn is_settled(&self) -> bool {
        self.folded || self.all_in || self.stack == 0
    }
}

/// Read-only view of a seat's wagering state, exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeatView {
    pub id: SeatId,
    pub folded: bool,
    pub all_in: bool,
    pub stack: Chips,
    pub round_contribution: Chips,
    pub total_contribution: Chips,
}

impl From<&Seat> for SeatView {
    fn from(s: &Seat) -> Self {
        Self {
            id: s.id,
            folded: s.folded,
            all_in: s.all_in,
            stack: s.stack,
            round_contribution: s.round_contribution,
            total_contribution: s.total_contribution,
        }
    }
}
