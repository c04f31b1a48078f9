use super::card::Card;
use super::rank::Rank;
use htc_core::ErrorKind;

/// Hand category, declared weakest to strongest so the derived [`Ord`]
/// on [`HandScore`] matches spec §4.B's category ordinal exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Category {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

/// A fully evaluated 5-card hand: a [`Category`] plus a tie-break vector
/// of rank values (descending significance). Ordering is lexicographic
/// on `(category, tiebreak)`, which the `derive`d [`Ord`] gives for free
/// since `Category` is compared before `Vec<u8>` field-by-field, and
/// `Vec<u8>` already orders lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct HandScore {
    category: Category,
    tiebreak: Vec<u8>,
}

impl HandScore {
    pub fn category(&self) -> Category {
        self.category
    }
    pub fn tiebreak(&self) -> &[u8] {
        &self.tiebreak
    }
}

/// Ranks the best 5-card hand out of 5..7 cards.
///
/// For 5 cards, evaluates directly. For 6 or 7, evaluates every 5-card
/// subset and keeps the lexicographic maximum — spec §4.B's "evaluate
/// all 5-subsets" rule.
pub struct Evaluator;

impl Evaluator {
    pub fn evaluate(cards: &[Card]) -> Result<HandScore, ErrorKind> {
        if !(5..=7).contains(&cards.len()) {
            return Err(ErrorKind::InvalidInput);
        }
        Ok(combinations(cards, 5)
            .into_iter()
            .map(|five| score_five(&five))
            .max()
            .expect("at least one 5-card combination exists"))
    }
}

/// All k-length combinations of `items`, as owned `Vec`s. Used here to
/// enumerate the 5-card subsets of a 6 or 7 card hand; `items.len()`
/// is always small (<=7) so no bit-twiddling shortcut is warranted.
fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn go<T: Clone>(items: &[T], k: usize, start: usize, current: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..items.len() {
            current.push(items[i].clone());
            go(items, k, i + 1, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    go(items, k, 0, &mut Vec::new(), &mut out);
    out
}

/// Scores exactly 5 cards.
fn score_five(cards: &[Card]) -> HandScore {
    debug_assert_eq!(cards.len(), 5);
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.windows(2).all(|w| w[0].suit() == w[1].suit());
    let straight_high = straight_high(&ranks);

    if is_flush {
        if let Some(high) = straight_high {
            return HandScore {
                category: Category::StraightFlush,
                tiebreak: vec![high],
            };
        }
    }

    let groups = group_by_count(&ranks);
    // groups: Vec<(count, rank)> sorted by (count desc, rank desc)

    match groups.as_slice() {
        [(4, quad), (1, kicker)] => HandScore {
            category: Category::FourOfAKind,
            tiebreak: vec![*quad, *kicker],
        },
        [(3, trip), (2, pair)] => HandScore {
            category: Category::FullHouse,
            tiebreak: vec![*trip, *pair],
        },
        _ if is_flush => HandScore {
            category: Category::Flush,
            tiebreak: ranks.clone(),
        },
        _ if straight_high.is_some() => HandScore {
            category: Category::Straight,
            tiebreak: vec![straight_high.unwrap()],
        },
        [(3, trip), (1, k1), (1, k2)] => HandScore {
            category: Category::ThreeOfAKind,
            tiebreak: vec![*trip, *k1, *k2],
        },
        [(2, hi), (2, lo), (1, kicker)] => HandScore {
            category: Category::TwoPair,
            tiebreak: vec![*hi, *lo, *kicker],
        },
        [(2, pair), (1, k1), (1, k2), (1, k3)] => HandScore {
            category: Category::Pair,
            tiebreak: vec![*pair, *k1, *k2, *k3],
        },
        _ => HandScore {
            category: Category::HighCard,
            tiebreak: ranks.clone(),
        },
    }
}

/// Groups ranks by multiplicity, sorted by `(count desc, rank desc)` —
/// the order every category match arm above relies on.
fn group_by_count(ranks_desc: &[u8]) -> Vec<(u8, u8)> {
    let mut counts: Vec<(u8, u8)> = Vec::new();
    for &r in ranks_desc {
        match counts.iter_mut().find(|(_, rank)| *rank == r) {
            Some((count, _)) => *count += 1,
            None => counts.push((1, r)),
        }
    }
    counts.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    counts
}

/// The straight's high card, if the 5 ranks form a straight. Accepts the
/// wheel (A-2-3-4-5) as the lowest straight, scoring it as high-card 5
/// per spec §4.B.
fn straight_high(ranks_desc: &[u8]) -> Option<u8> {
    let mut unique: Vec<u8> = ranks_desc.to_vec();
    unique.dedup();
    if unique.len() != 5 {
        return None;
    }
    if unique[0] - unique[4] == 4 {
        return Some(unique[0]);
    }
    // wheel: A,5,4,3,2 sorted desc is [14,5,4,3,2]
    if unique == [Rank::ACE.value(), 5, 4, 3, 2] {
        return Some(5);
    }
    None
}
