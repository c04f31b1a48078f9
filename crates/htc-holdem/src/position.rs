//! Display-only seat naming (button/blinds/under-the-gun/hijack/cutoff).
//! Never consulted by the phase machine or betting setup — those compute
//! small blind / big blind / first-to-act directly from seat rotation.

use htc_core::SeatId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionName {
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun(usize),
    Hijack,
    Cutoff,
}

impl PositionName {
    /// `seat`'s position at a `table_size`-seat table with `dealer` on the
    /// button. In heads-up, the button also posts the small blind — this
    /// reports `Button` for that seat; callers needing "is this seat
    /// posting the small blind" should ask the hold'em setup directly
    /// rather than pattern-match this enum.
    pub fn from_seat(seat: SeatId, dealer: SeatId, table_size: usize) -> Self {
        let n = table_size;
        let offset = (seat + n - dealer) % n;
        match offset {
            0 => PositionName::Button,
            1 if n == 2 => PositionName::BigBlind,
            1 => PositionName::SmallBlind,
            2 => PositionName::BigBlind,
            o if n >= 4 && o == n - 1 => PositionName::Cutoff,
            o if n >= 6 && o == n - 2 => PositionName::Hijack,
            o => PositionName::UnderTheGun(o - 3),
        }
    }
}

impl std::fmt::Display for PositionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionName::Button => write!(f, "BTN"),
            PositionName::SmallBlind => write!(f, "SB"),
            PositionName::BigBlind => write!(f, "BB"),
            PositionName::UnderTheGun(0) => write!(f, "UTG"),
            PositionName::UnderTheGun(k) => write!(f, "UTG+{k}"),
            PositionName::Hijack => write!(f, "HJ"),
            PositionName::Cutoff => write!(f, "CO"),
        }
    }
}
