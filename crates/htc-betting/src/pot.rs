use htc_core::{Chips, SeatId};

/// One seat's total contribution for a pot-construction pass, and
/// whether they've folded (folded seats stay liable for their chips but
/// are never eligible to win them back).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Contribution {
    pub seat: SeatId,
    pub amount: Chips,
    pub folded: bool,
}

/// One layer of the pot: an amount and the seats eligible to win it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<SeatId>,
}

/// Builds side pots from per-seat contributions (spec §4.C).
///
/// Repeatedly finds the smallest positive remaining contribution `L`
/// across seats that still have chips in, emits a layer of `L` times
/// the number of such seats (eligibility = those seats minus any
/// folded), and subtracts `L` from each, until nothing remains.
pub fn pots_from_contributions(contributions: &[Contribution]) -> Vec<Pot> {
    let mut remaining: Vec<Contribution> = contributions
        .iter()
        .copied()
        .filter(|c| c.amount > 0)
        .collect();
    let mut pots = Vec::new();

    while let Some(layer) = remaining.iter().map(|c| c.amount).min() {
        if layer <= 0 {
            break;
        }
        let contributors: Vec<&Contribution> = remaining.iter().filter(|c| c.amount > 0).collect();
        let amount = layer * contributors.len() as Chips;
        let eligible = contributors
            .iter()
            .filter(|c| !c.folded)
            .map(|c| c.seat)
            .collect();
        pots.push(Pot { amount, eligible });
        for c in remaining.iter_mut() {
            if c.amount > 0 {
                c.amount -= layer;
            }
        }
        remaining.retain(|c| c.amount > 0);
        if remaining.is_empty() {
            break;
        }
    }
    pots
}
