use std::collections::HashMap;

use htc_cards::Evaluator;
use htc_core::{Chips, SeatId};

use crate::state::{HoldemState, Phase, ShowdownResult};

/// Computes the showdown and credits winners' stacks, transitioning
/// straight to `hand_end` (spec §4.D "Showdown" — there is no separately
/// observable resting `showdown` phase, since nothing but computation
/// happens there).
pub fn run_showdown(state: &mut HoldemState) {
    let pots = state.pots();
    let mut awarded: HashMap<SeatId, Chips> = HashMap::new();
    let mut scores: HashMap<SeatId, htc_cards::HandScore> = HashMap::new();

    for pot in &pots {
        if pot.eligible.is_empty() {
            continue;
        }
        let winners: Vec<SeatId> = if pot.eligible.len() == 1 {
            pot.eligible.clone()
        } else {
            let mut scored: Vec<(SeatId, htc_cards::HandScore)> = Vec::new();
            for &seat_id in &pot.eligible {
                let seat = state.seat(seat_id);
                let (a, b) = seat.hole_cards.expect("eligible seat must have hole cards at showdown");
                let mut cards = vec![a, b];
                cards.extend(state.board.iter().copied());
                let score = Evaluator::evaluate(&cards).expect("board is fully dealt at a genuine showdown");
                scores.insert(seat_id, score.clone());
                scored.push((seat_id, score));
            }
            let best = scored.iter().map(|(_, s)| s).max().cloned().expect("at least one contender");
            scored.into_iter().filter(|(_, s)| *s == best).map(|(id, _)| id).collect()
        };

        let k = winners.len() as Chips;
        let share = pot.amount / k;
        let bonus = pot.amount % k;
        let mut ordered = winners.clone();
        ordered.sort_unstable();
        for (i, &seat_id) in ordered.iter().enumerate() {
            let amount = share + if (i as Chips) < bonus { 1 } else { 0 };
            *awarded.entry(seat_id).or_insert(0) += amount;
        }
    }

    for (&seat_id, &amount) in &awarded {
        state.seats[seat_id].stack += amount;
    }

    let mut winners: Vec<SeatId> = awarded.keys().copied().collect();
    winners.sort_unstable();
    let summary = if winners.len() == 1 {
        format!("seat {} wins {} chips", winners[0], awarded.values().sum::<Chips>())
    } else {
        format!("pot split between seats {winners:?}")
    };

    state.action_log.push(format!("showdown: {summary}"));
    state.showdown = Some(ShowdownResult { winners, awarded, scores, summary });
    state.phase = Phase::HandEnd;
    state.betting = None;
}
