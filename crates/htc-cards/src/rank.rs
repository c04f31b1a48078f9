/// Card rank, ordinal 2..14 with Ace high (the wheel straight is handled
/// specially by the evaluator, not by this type).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const TWO: Rank = Rank(2);
    pub const ACE: Rank = Rank(14);

    /// All 13 ranks, ascending.
    pub const ALL: [Rank; 13] = [
        Rank(2),
        Rank(3),
        Rank(4),
        Rank(5),
        Rank(6),
        Rank(7),
        Rank(8),
        Rank(9),
        Rank(10),
        Rank(11),
        Rank(12),
        Rank(13),
        Rank(14),
    ];

    /// Ordinal value, 2..=14.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Rank {
    fn from(n: u8) -> Self {
        debug_assert!((2..=14).contains(&n), "rank out of range: {n}");
        Self(n)
    }
}

impl From<Rank> for u8 {
    fn from(r: Rank) -> Self {
        r.0
    }
}

impl TryFrom<&str> for Rank {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_uppercase().as_str() {
            "2" => Ok(Rank(2)),
            "3" => Ok(Rank(3)),
            "4" => Ok(Rank(4)),
            "5" => Ok(Rank(5)),
            "6" => Ok(Rank(6)),
            "7" => Ok(Rank(7)),
            "8" => Ok(Rank(8)),
            "9" => Ok(Rank(9)),
            "T" => Ok(Rank(10)),
            "J" => Ok(Rank(11)),
            "Q" => Ok(Rank(12)),
            "K" => Ok(Rank(13)),
            "A" => Ok(Rank(14)),
            other => Err(format!("invalid rank: {other}")),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self.0 {
            2..=9 => (b'0' + self.0) as char,
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            14 => 'A',
            _ => unreachable!(),
        };
        write!(f, "{c}")
    }
}
