use super::rank::Rank;
use super::suit::Suit;

/// A playing card: a `(rank, suit)` pair.
///
/// # Parsing
///
/// Cards parse from two-character notations like `"As"` (ace of spades)
/// or `"Tc"` (ten of clubs). Use [`Card::parse`] for a concatenated run.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        if s.len() != 2 {
            return Err(format!("card must be 2 characters, got {s:?}"));
        }
        let rank = Rank::try_from(&s[0..1])?;
        let suit = Suit::try_from(&s[1..2])?;
        Ok(Card::from((rank, suit)))
    }
}

impl Card {
    /// Parses a whitespace-ignored run of two-character card notations.
    pub fn parse(s: &str) -> Result<Vec<Self>, String> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<Vec<_>>()
            .chunks(2)
            .map(|pair| pair.iter().collect::<String>())
            .map(|pair| Self::try_from(pair.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display() {
        let card = Card::try_from("Th").unwrap();
        assert_eq!(card.to_string(), "Th");
    }

    #[test]
    fn parses_concatenated_run() {
        let cards = Card::parse("AhKhQhJhTh").unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].rank(), Rank::ACE);
    }

    #[test]
    fn rejects_bad_length() {
        assert!(Card::try_from("A").is_err());
    }
}
