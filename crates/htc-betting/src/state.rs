use super::action::Action;
use super::pot::{pots_from_contributions, Contribution, Pot};
use super::seat::{Seat, SeatView};
use htc_core::{Chips, CoreError, ErrorKind, SeatId};

/// A forced contribution posted at round start (small/big blind, ante),
/// applied in listed order and capped at the posting seat's stack.
#[derive(Debug, Clone, Copy)]
pub struct ForcedBet {
    pub seat: SeatId,
    pub amount: Chips,
}

/// Everything needed to open a betting round (spec §4.C "Inputs at
/// round creation").
pub struct RoundInit {
    /// Seats in turn-rotation order, with their current stacks.
    pub seats: Vec<(SeatId, Chips)>,
    pub forced: Vec<ForcedBet>,
    pub first_to_act: Option<SeatId>,
    pub min_open_bet: Chips,
    /// A label for the round (e.g. "preflop"); purely informational —
    /// the engine attaches no meaning to it. See spec §9: the betting
    /// engine stays cardless, so this is the one place a caller's
    /// game-specific vocabulary leaks in, as inert bookkeeping only.
    pub street: String,
}

/// The generic wagering state machine for one betting round.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BettingState {
    street: String,
    order: Vec<SeatId>,
    seats: Vec<Seat>,
    active: Option<SeatId>,
    current_bet: Chips,
    min_raise_increment: Chips,
    min_open_bet: Chips,
    round_closed: bool,
    action_log: Vec<String>,
}

/// Legal actions and numeric bounds for one seat, right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct LegalActions {
    pub can_fold: bool,
    pub can_check: bool,
    pub can_call: bool,
    pub can_bet: bool,
    pub can_raise: bool,
    pub can_all_in: bool,
    pub call_amount: Chips,
    pub min_bet: Chips,
    pub min_raise_to: Chips,
}

impl BettingState {
    pub fn new(init: RoundInit) -> Self {
        let mut seats: Vec<Seat> = init
            .seats
            .iter()
            .map(|&(id, stack)| Seat::new(id, stack))
            .collect();

        for forced in &init.forced {
            if let Some(seat) = seats.iter_mut().find(|s| s.id == forced.seat) {
                let amount = forced.amount.min(seat.stack);
                seat.stack -= amount;
                seat.round_contribution += amount;
                seat.total_contribution += amount;
                if seat.stack == 0 {
                    seat.all_in = true;
                }
            }
        }

        let current_bet = seats.iter().map(|s| s.round_contribution).max().unwrap_or(0);
        let min_raise_increment = init.min_open_bet.max(current_bet);

        let order: Vec<SeatId> = init.seats.iter().map(|&(id, _)| id).collect();
        let first_valid = init
            .first_to_act
            .filter(|id| seats.iter().any(|s| s.id == *id && s.needs_action(current_bet)));
        let active = first_valid.or_else(|| {
            order
                .iter()
                .copied()
                .find(|id| seats.iter().find(|s| s.id == *id).unwrap().needs_action(current_bet))
        });

        let mut state = Self {
            street: init.street,
            order,
            seats,
            active,
            current_bet,
            min_raise_increment,
            min_open_bet: init.min_open_bet,
            round_closed: false,
            action_log: Vec::new(),
        };
        state.close_if_done();
        state
    }

    pub fn street(&self) -> &str {
        &self.street
    }
    pub fn active_player(&self) -> Option<SeatId> {
        self.active
    }
    pub fn round_closed(&self) -> bool {
        self.round_closed
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn min_raise_increment(&self) -> Chips {
        self.min_raise_increment
    }
    pub fn action_log(&self) -> &[String] {
        &self.action_log
    }
    pub fn seats(&self) -> Vec<SeatView> {
        self.seats.iter().map(SeatView::from).collect()
    }
    pub fn seat(&self, id: SeatId) -> Option<SeatView> {
        self.seats.iter().find(|s| s.id == id).map(SeatView::from)
    }

    /// Side pots built from this round's `total_contribution` (spec
    /// §4.C "Pot construction").
    pub fn pots(&self) -> Vec<Pot> {
        let contributions: Vec<Contribution> = self
            .seats
            .iter()
            .map(|s| Contribution {
                seat: s.id,
                amount: s.total_contribution,
                folded: s.folded,
            })
            .collect();
        pots_from_contributions(&contributions)
    }

    pub fn call_amount(&self, id: SeatId) -> Chips {
        self.seats
            .iter()
            .find(|s| s.id == id)
            .map(|s| (self.current_bet - s.round_contribution).max(0))
            .unwrap_or(0)
    }

    /// Legal actions for `id`, right now. Every flag is false unless
    /// `id` is the current actor in an open round.
    pub fn legal_actions(&self, id: SeatId) -> LegalActions {
        if self.round_closed || self.active != Some(id) {
            return LegalActions::default();
        }
        let seat = match self.seats.iter().find(|s| s.id == id) {
            Some(s) => s,
            None => return LegalActions::default(),
        };
        let call_amount = (self.current_bet - seat.round_contribution).max(0);
        let can_raise_to_more_than_current =
            seat.round_contribution + seat.stack > self.current_bet;
        LegalActions {
            can_fold: true,
            can_check: call_amount == 0,
            can_call: call_amount > 0 && seat.stack > 0,
            can_bet: self.current_bet == 0 && seat.stack > 0,
            can_raise: self.current_bet > 0 && can_raise_to_more_than_current && seat.may_raise,
            can_all_in: seat.stack > 0,
            call_amount,
            min_bet: self.min_open_bet.max(self.min_raise_increment),
            min_raise_to: self.current_bet + self.min_raise_increment,
        }
    }

    /// Applies `action` on behalf of `id`. Fails without mutating state
    /// if `id` isn't the current actor, the round is closed, or the
    /// action isn't legal.
    pub fn apply(&mut self, id: SeatId, action: Action) -> Result<(), CoreError> {
        if self.round_closed {
            return Err(CoreError::new(ErrorKind::RoundClosed, "betting round has closed"));
        }
        if self.active != Some(id) {
            return Err(CoreError::new(ErrorKind::NotYourTurn, format!("it is not seat {id}'s turn")));
        }

        match action {
            Action::Fold => self.do_fold(id),
            Action::Check => self.do_check(id)?,
            Action::Call => self.do_call(id)?,
            Action::Bet(amount) => self.do_bet(id, amount)?,
            Action::Raise(to) => self.do_raise(id, to)?,
            Action::AllIn => self.do_all_in(id)?,
        }
        self.action_log.push(format!("seat {id}: {action}"));
        Ok(())
    }

    fn seat_mut(&mut self, id: SeatId) -> &mut Seat {
        self.seats.iter_mut().find(|s| s.id == id).expect("active seat must exist")
    }

    fn do_fold(&mut self, id: SeatId) {
        let seat = self.seat_mut(id);
        seat.folded = true;
        seat.has_acted = true;
        self.advance(id);
    }

    fn do_check(&mut self, id: SeatId) -> Result<(), CoreError> {
        let call_amount = self.call_amount(id);
        if call_amount != 0 {
            return Err(CoreError::new(
                ErrorKind::IllegalAction,
                format!("Cannot check: facing a bet of {call_amount}"),
            ));
        }
        let seat = self.seat_mut(id);
        seat.has_acted = true;
        self.advance(id);
        Ok(())
    }

    fn do_call(&mut self, id: SeatId) -> Result<(), CoreError> {
        let call_amount = self.call_amount(id);
        if call_amount <= 0 {
            return Err(CoreError::new(ErrorKind::IllegalAction, "Cannot call: nothing to call"));
        }
        let seat = self.seat_mut(id);
        let pay = call_amount.min(seat.stack);
        seat.stack -= pay;
        seat.round_contribution += pay;
        seat.total_contribution += pay;
        if seat.stack == 0 {
            seat.all_in = true;
        }
        seat.has_acted = true;
        self.advance(id);
        Ok(())
    }

    fn do_bet(&mut self, id: SeatId, amount: Chips) -> Result<(), CoreError> {
        if amount <= 0 {
            return Err(CoreError::new(ErrorKind::InvalidAmount, "bet amount must be positive"));
        }
        if self.current_bet != 0 {
            return Err(CoreError::new(ErrorKind::IllegalAction, "Cannot bet: a bet is already open"));
        }
        let seat_stack = self.seats.iter().find(|s| s.id == id).unwrap().stack;
        if amount > seat_stack {
            return Err(CoreError::new(ErrorKind::IllegalAction, "Cannot bet more than your stack"));
        }
        let is_all_in = amount == seat_stack;
        let min_required = self.min_open_bet.max(self.min_raise_increment);
        if !is_all_in && amount < min_required {
            return Err(CoreError::new(
                ErrorKind::IllegalAction,
                format!("Bet must be at least {min_required}"),
            ));
        }

        let full = amount >= min_required;
        {
            let seat = self.seat_mut(id);
            seat.stack -= amount;
            seat.round_contribution += amount;
            seat.total_contribution += amount;
            if seat.stack == 0 {
                seat.all_in = true;
            }
            seat.has_acted = true;
        }
        self.current_bet = amount;
        if full {
            self.min_raise_increment = amount;
            self.reopen(id);
        }
        self.advance(id);
        Ok(())
    }

    fn do_raise(&mut self, id: SeatId, to_amount: Chips) -> Result<(), CoreError> {
        if self.current_bet == 0 {
            return Err(CoreError::new(ErrorKind::IllegalAction, "Cannot raise: no bet to raise"));
        }
        if to_amount <= self.current_bet {
            return Err(CoreError::new(
                ErrorKind::InvalidAmount,
                format!("raise target {to_amount} must exceed the current bet of {}", self.current_bet),
            ));
        }
        let (round_contribution, stack) = {
            let seat = self.seats.iter().find(|s| s.id == id).unwrap();
            (seat.round_contribution, seat.stack)
        };
        let additional = to_amount - round_contribution;
        if additional > stack {
            return Err(CoreError::new(ErrorKind::IllegalAction, "Cannot raise more than your stack"));
        }
        let is_all_in = additional == stack;
        let raise_increment = to_amount - self.current_bet;
        let full = raise_increment >= self.min_raise_increment;
        if !full && !is_all_in {
            return Err(CoreError::new(
                ErrorKind::IllegalAction,
                format!("Raise must increase the bet by at least {}", self.min_raise_increment),
            ));
        }

        {
            let seat = self.seat_mut(id);
            seat.stack -= additional;
            seat.round_contribution = to_amount;
            seat.total_contribution += additional;
            if seat.stack == 0 {
                seat.all_in = true;
            }
            seat.has_acted = true;
        }
        self.current_bet = to_amount;
        if full {
            self.min_raise_increment = raise_increment;
            self.reopen(id);
        } else {
            // Under-minimum all-in raise: caps re-raising for every seat
            // that has already acted at this bet level, without
            // reopening anyone (spec §9).
            for seat in self.seats.iter_mut() {
                if seat.id != id && seat.has_acted && !seat.is_settled() {
                    seat.may_raise = false;
                }
            }
        }
        self.advance(id);
        Ok(())
    }

    fn do_all_in(&mut self, id: SeatId) -> Result<(), CoreError> {
        let seat = self.seats.iter().find(|s| s.id == id).unwrap();
        let (round_contribution, stack) = (seat.round_contribution, seat.stack);
        if self.current_bet == 0 {
            self.do_bet(id, stack)
        } else if round_contribution + stack <= self.current_bet {
            self.do_call(id)
        } else {
            self.do_raise(id, round_contribution + stack)
        }
    }

    /// Resets `has_acted` for every seat that can still act (reopening
    /// the right to re-raise), except the actor who just made the full
    /// bet/raise. Settled seats (folded/all-in/no stack) are marked
    /// `has_acted = true` so they never gate round closure.
    fn reopen(&mut self, actor: SeatId) {
        for seat in self.seats.iter_mut() {
            if seat.id == actor {
                seat.has_acted = true;
            } else if seat.is_settled() {
                seat.has_acted = true;
            } else {
                seat.has_acted = false;
                seat.may_raise = true;
            }
        }
    }

    fn advance(&mut self, last_actor: SeatId) {
        if self.close_if_done() {
            return;
        }
        let start = self.order.iter().position(|&id| id == last_actor).unwrap_or(0);
        let n = self.order.len();
        let next = (1..=n)
            .map(|offset| self.order[(start + offset) % n])
            .find(|&id| self.seats.iter().find(|s| s.id == id).unwrap().needs_action(self.current_bet));
        match next {
            Some(id) => self.active = Some(id),
            None => {
                self.round_closed = true;
                self.active = None;
            }
        }
    }

    /// Closes the round immediately if at most one non-folded seat
    /// remains, or no non-folded seat can still act (everyone all-in).
    /// Returns whether it closed.
    fn close_if_done(&mut self) -> bool {
        let non_folded = self.seats.iter().filter(|s| !s.folded).count();
        let anyone_can_act = self.seats.iter().any(|s| s.needs_action(self.current_bet));
        if non_folded <= 1 || !anyone_can_act {
            self.round_closed = true;
            self.active = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init(seats: &[(SeatId, Chips)], min_open_bet: Chips) -> BettingState {
        BettingState::new(RoundInit {
            seats: seats.to_vec(),
            forced: Vec::new(),
            first_to_act: Some(seats[0].0),
            min_open_bet,
            street: "flop".into(),
        })
    }

    #[test]
    fn check_around_closes_round() {
        let mut s = init(&[(0, 100), (1, 100), (2, 100)], 10);
        assert_eq!(s.active_player(), Some(0));
        s.apply(0, Action::Check).unwrap();
        s.apply(1, Action::Check).unwrap();
        s.apply(2, Action::Check).unwrap();
        assert!(s.round_closed());
        assert_eq!(s.active_player(), None);
    }

    #[test]
    fn check_facing_a_bet_is_illegal() {
        let mut s = init(&[(0, 100), (1, 100)], 10);
        s.apply(0, Action::Bet(20)).unwrap();
        let err = s.apply(1, Action::Check).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllegalAction);
        assert!(err.message.contains("Cannot check"));
    }

    #[test]
    fn not_your_turn_is_rejected() {
        let mut s = init(&[(0, 100), (1, 100)], 10);
        let err = s.apply(1, Action::Check).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotYourTurn);
    }

    #[test]
    fn full_raise_reopens_action_for_prior_caller() {
        let mut s = init(&[(0, 500), (1, 500), (2, 500)], 10);
        s.apply(0, Action::Bet(50)).unwrap();
        s.apply(1, Action::Call).unwrap();
        s.apply(2, Action::Raise(150)).unwrap(); // full raise: +100 >= min_raise_increment(50)
        // seat 0 should be reopened (has to act again)
        assert_eq!(s.active_player(), Some(0));
    }

    #[test]
    fn under_min_all_in_raise_does_not_reopen_prior_caller() {
        // seat 2 has only 70 chips: a raise to 50+20=70 is under the min raise (50).
        let mut s = init(&[(0, 500), (1, 500), (2, 70)], 10);
        s.apply(0, Action::Bet(50)).unwrap();
        s.apply(1, Action::Call).unwrap();
        s.apply(2, Action::AllIn).unwrap(); // raises to 70, increment only 20 < 50
        // seat 0 already called the original 50 and should NOT be reopened to re-raise,
        // but still owes the extra 20 to call the new top, so is next to act.
        assert_eq!(s.active_player(), Some(0));
        let legal = s.legal_actions(0);
        assert!(legal.can_call);
        assert!(!legal.can_raise, "short all-in raise must not reopen a full re-raise option");
    }

    #[test]
    fn side_pots_built_from_total_contribution() {
        let mut s = init(&[(0, 20), (1, 60), (2, 100)], 10);
        s.apply(0, Action::AllIn).unwrap(); // bet 20 (all-in, current_bet was 0)
        s.apply(1, Action::Call).unwrap();
        s.apply(2, Action::Call).unwrap();
        let pots = s.pots();
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 60);
    }

    #[test]
    fn heads_up_round_closes_when_one_folds() {
        let mut s = init(&[(0, 100), (1, 100)], 10);
        s.apply(0, Action::Fold).unwrap();
        assert!(s.round_closed());
    }

    #[test]
    fn forced_bets_post_in_order_and_set_current_bet() {
        let s = BettingState::new(RoundInit {
            seats: vec![(0, 100), (1, 100), (2, 100)],
            forced: vec![
                ForcedBet { seat: 0, amount: 5 },
                ForcedBet { seat: 1, amount: 10 },
            ],
            first_to_act: Some(2),
            min_open_bet: 10,
            street: "preflop".into(),
        });
        assert_eq!(s.current_bet(), 10);
        assert_eq!(s.call_amount(0), 10);
        assert_eq!(s.call_amount(2), 10);
    }

    #[test]
    fn forced_bet_capped_at_stack_marks_all_in() {
        let s = BettingState::new(RoundInit {
            seats: vec![(0, 5), (1, 100)],
            forced: vec![
                ForcedBet { seat: 0, amount: 10 },
                ForcedBet { seat: 1, amount: 10 },
            ],
            first_to_act: Some(1),
            min_open_bet: 10,
            street: "preflop".into(),
        });
        let seat0 = s.seat(0).unwrap();
        assert_eq!(seat0.stack, 0);
        assert!(seat0.all_in);
        assert_eq!(seat0.round_contribution, 5);
    }
}
