//! End-to-end scenarios against the public `GameModule` surface only —
//! no internal helpers, the same surface a table mediator calls through.

use htc_cards::Card;
use htc_holdem::{GameModule, HoldemModule, HoldemOptions, Phase, RawAction};

fn start(players: usize, options: HoldemOptions) -> htc_holdem::HoldemState {
    let ids: Vec<usize> = (0..players).collect();
    let state = HoldemModule::create_initial_state(&ids, options).unwrap();
    HoldemModule::apply_action(&state, 0, RawAction::new("START_HAND")).unwrap()
}

/// Deal sizes: seed=42, three players, after START_HAND everyone has two
/// hole cards and the deck has 46 cards left.
#[test]
fn deal_sizes_after_start_hand() {
    let dealt = start(3, HoldemOptions { seed: 42, ..HoldemOptions::default() });
    assert_eq!(dealt.phase, Phase::Preflop);
    for seat in &dealt.seats {
        assert!(seat.hole_cards.is_some());
    }
    assert_eq!(dealt.deck.remaining(), 46);
}

/// Heads-up phase progression: call then check closes preflop; advancing
/// deals exactly three board cards.
#[test]
fn heads_up_call_check_reaches_flop() {
    let dealt = start(2, HoldemOptions { seed: 7, small_blind: 5, big_blind: 10, ..HoldemOptions::default() });
    let first = dealt.betting.as_ref().unwrap().active_player().unwrap();
    let after_call = HoldemModule::apply_action(&dealt, first, RawAction::new("call")).unwrap();
    let second = after_call.betting.as_ref().unwrap().active_player().unwrap();
    let after_check = HoldemModule::apply_action(&after_call, second, RawAction::new("check")).unwrap();
    assert!(after_check.betting.as_ref().unwrap().round_closed());
    let flop = HoldemModule::apply_action(&after_check, first, RawAction::new("ADVANCE_PHASE")).unwrap();
    assert_eq!(flop.phase, Phase::Flop);
    assert_eq!(flop.board.len(), 3);
}

/// Showdown award: heads-up, preset deck puts p1 on AA vs p2 on a weak
/// offsuit hand; check down every remaining street, p1 wins it all.
#[test]
fn showdown_award_goes_to_the_better_hand() {
    let test_deck = Card::parse("Ah2hAc3hKdKs4d5d6d").unwrap();
    let options = HoldemOptions {
        seed: 1,
        small_blind: 5,
        big_blind: 10,
        test_deck: Some(test_deck),
        ..HoldemOptions::default()
    };
    let mut state = start(2, options);

    let first = state.betting.as_ref().unwrap().active_player().unwrap();
    state = HoldemModule::apply_action(&state, first, RawAction::new("call")).unwrap();
    let second = state.betting.as_ref().unwrap().active_player().unwrap();
    state = HoldemModule::apply_action(&state, second, RawAction::new("check")).unwrap();
    state = HoldemModule::apply_action(&state, first, RawAction::new("ADVANCE_PHASE")).unwrap();
    assert_eq!(state.phase, Phase::Flop);
    assert_eq!(state.board.len(), 3);

    // Flop, turn, river: check through each street.
    for expected_phase in [Phase::Turn, Phase::River] {
        let actor = state.betting.as_ref().unwrap().active_player().unwrap();
        state = HoldemModule::apply_action(&state, actor, RawAction::new("check")).unwrap();
        let actor2 = state.betting.as_ref().unwrap().active_player().unwrap();
        state = HoldemModule::apply_action(&state, actor2, RawAction::new("check")).unwrap();
        state = HoldemModule::apply_action(&state, actor, RawAction::new("ADVANCE_PHASE")).unwrap();
        assert_eq!(state.phase, expected_phase);
    }
    // River: one more check/check, then showdown.
    let actor = state.betting.as_ref().unwrap().active_player().unwrap();
    state = HoldemModule::apply_action(&state, actor, RawAction::new("check")).unwrap();
    let actor2 = state.betting.as_ref().unwrap().active_player().unwrap();
    state = HoldemModule::apply_action(&state, actor2, RawAction::new("check")).unwrap();
    state = HoldemModule::apply_action(&state, actor, RawAction::new("ADVANCE_PHASE")).unwrap();

    assert_eq!(state.phase, Phase::HandEnd);
    let showdown = state.showdown.as_ref().unwrap();
    assert_eq!(showdown.winners, vec![0]);
    assert!(state.seats[0].stack > state.seats[1].stack);
}

/// Side pots: three stacks of 20/60/100, all-in preflop creates two
/// layered pots; the short stack's AA takes the main pot, the 60-stack
/// loses the side pot to the 100-stack's KK.
#[test]
fn side_pots_split_into_layers() {
    let test_deck = Card::parse("Ah2hKhAc3hKc4d5s9cJd2d").unwrap();
    let options = HoldemOptions { seed: 1, small_blind: 5, big_blind: 10, test_deck: Some(test_deck), ..HoldemOptions::default() };
    let ids = vec![0usize, 1, 2];
    let mut state = HoldemModule::create_initial_state(&ids, options).unwrap();
    state.seats[0].stack = 20;
    state.seats[1].stack = 60;
    state.seats[2].stack = 100;
    state = HoldemModule::apply_action(&state, 0, RawAction::new("START_HAND")).unwrap();

    // Preflop: seat0 (dealer, 3-handed UTG) all-in, seat1 calls, seat2 calls.
    let first = state.betting.as_ref().unwrap().active_player().unwrap();
    state = HoldemModule::apply_action(&state, first, RawAction::new("all_in")).unwrap();
    let second = state.betting.as_ref().unwrap().active_player().unwrap();
    state = HoldemModule::apply_action(&state, second, RawAction::new("call")).unwrap();
    let third = state.betting.as_ref().unwrap().active_player().unwrap();
    state = HoldemModule::apply_action(&state, third, RawAction::new("call")).unwrap();
    assert!(state.betting.as_ref().unwrap().round_closed());

    state = HoldemModule::apply_action(&state, first, RawAction::new("ADVANCE_PHASE")).unwrap();
    assert_eq!(state.phase, Phase::Flop);

    // Postflop: seat1 bets 20, seat2 calls; seat0 has no chips and never acts.
    let actor = state.betting.as_ref().unwrap().active_player().unwrap();
    state = HoldemModule::apply_action(&state, actor, RawAction::with_amount("bet", 20)).unwrap();
    let actor2 = state.betting.as_ref().unwrap().active_player().unwrap();
    state = HoldemModule::apply_action(&state, actor2, RawAction::new("call")).unwrap();
    state = HoldemModule::apply_action(&state, actor, RawAction::new("ADVANCE_PHASE")).unwrap();
    assert_eq!(state.phase, Phase::Turn);

    // Turn and river: check through, no further contributions.
    for expected in [Phase::River, Phase::HandEnd] {
        let a = state.betting.as_ref().unwrap().active_player().unwrap();
        state = HoldemModule::apply_action(&state, a, RawAction::new("check")).unwrap();
        let b = state.betting.as_ref().unwrap().active_player().unwrap();
        state = HoldemModule::apply_action(&state, b, RawAction::new("check")).unwrap();
        state = HoldemModule::apply_action(&state, a, RawAction::new("ADVANCE_PHASE")).unwrap();
        assert_eq!(state.phase, expected);
    }

    assert_eq!(state.phase, Phase::HandEnd);
    let pots_at_showdown = state.showdown.as_ref().unwrap();
    assert!(pots_at_showdown.winners.contains(&0));
    assert!(state.seats[0].stack > 20);
    assert!(state.seats[1].stack >= 0);
    assert!(state.seats[2].stack >= 0);
    let total: i64 = state.seats.iter().map(|s| s.stack).sum();
    assert_eq!(total, 180);
}

/// A full postflop raise reopens action for a seat that already called,
/// even three-handed with a fold in between (spec §4.C "reopening").
#[test]
fn full_raise_reopens_action_for_a_prior_caller_three_handed() {
    let dealt = start(3, HoldemOptions { seed: 3, small_blind: 5, big_blind: 10, ..HoldemOptions::default() });
    // Check everyone through preflop to reach the flop without contention.
    let mut state = dealt;
    loop {
        let actor = match state.betting.as_ref().unwrap().active_player() {
            Some(a) => a,
            None => break,
        };
        let call_amount = state.betting.as_ref().unwrap().call_amount(actor);
        let action = if call_amount > 0 { RawAction::new("call") } else { RawAction::new("check") };
        state = HoldemModule::apply_action(&state, actor, action).unwrap();
    }
    let flop = HoldemModule::apply_action(&state, 0, RawAction::new("ADVANCE_PHASE")).unwrap();
    assert_eq!(flop.phase, Phase::Flop);

    let a = flop.betting.as_ref().unwrap().active_player().unwrap();
    let after_bet = HoldemModule::apply_action(&flop, a, RawAction::with_amount("bet", 20)).unwrap();
    let b = after_bet.betting.as_ref().unwrap().active_player().unwrap();
    let after_call = HoldemModule::apply_action(&after_bet, b, RawAction::new("call")).unwrap();
    let c = after_call.betting.as_ref().unwrap().active_player().unwrap();

    let after_raise = HoldemModule::apply_action(&after_call, c, RawAction::raise_to(80)).unwrap();
    // Seat `b` already called the original 20; a full raise to 80 (+60,
    // well above the 20 minimum increment) must reopen action for them.
    assert_eq!(after_raise.betting.as_ref().unwrap().active_player(), Some(a));
    let legal = after_raise.betting.as_ref().unwrap().legal_actions(a);
    assert!(legal.can_raise, "a full raise must reopen re-raising for a seat that already called");
    assert_eq!(legal.call_amount, 80 - 20);
}

/// Illegal check: facing an open bet, checking is rejected and state is
/// left unchanged.
#[test]
fn illegal_check_facing_a_bet_is_rejected() {
    let dealt = start(2, HoldemOptions { seed: 7, small_blind: 5, big_blind: 10, ..HoldemOptions::default() });
    let active = dealt.betting.as_ref().unwrap().active_player().unwrap();
    let err = HoldemModule::apply_action(&dealt, active, RawAction::new("check")).unwrap_err();
    assert_eq!(err.kind, htc_core::ErrorKind::IllegalAction);
    assert!(err.message.contains("Cannot check"));
}
