/// Tags every recoverable failure the core can produce (spec §7).
///
/// None of these propagate as panics: every fallible operation in
/// `htc-betting`, `htc-holdem`, and `htc-gameroom` returns a `Result`
/// whose `Err` carries one of these kinds plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Action from a player id not seated at the table.
    NotSeated,
    /// Action from a seat that is not the current actor.
    NotYourTurn,
    /// Non-positive or non-integer bet/raise amount.
    InvalidAmount,
    /// Action is syntactically valid but not legal in the current state
    /// (check when facing a bet, bet when one already exists, under-min
    /// raise with chips remaining, and similar).
    IllegalAction,
    /// `START_HAND` attempted with fewer than two positive-stack seats.
    InsufficientPlayers,
    /// Action attempted in a phase that does not accept it.
    WrongPhase,
    /// Action submitted after the betting round already closed.
    RoundClosed,
    /// Action `type` tag not recognized.
    UnknownAction,
    /// Evaluator called with a card count outside `5..=7`. Indicates a
    /// programming error in the caller; the evaluator itself never
    /// recovers from it silently.
    InvalidInput,
    /// The table lock could not be acquired before an external
    /// request's deadline.
    Busy,
    /// No open table exists for the given table id.
    TableNotFound,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotSeated => "not seated",
            Self::NotYourTurn => "not your turn",
            Self::InvalidAmount => "invalid amount",
            Self::IllegalAction => "illegal action",
            Self::InsufficientPlayers => "insufficient players",
            Self::WrongPhase => "wrong phase",
            Self::RoundClosed => "round closed",
            Self::UnknownAction => "unknown action",
            Self::InvalidInput => "invalid input",
            Self::Busy => "busy",
            Self::TableNotFound => "table not found",
        };
        write!(f, "{}", label)
    }
}

/// A domain failure: an [`ErrorKind`] plus a message describing the
/// specific violation (e.g. "Cannot check: facing a bet of 20").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let e = CoreError::new(ErrorKind::IllegalAction, "Cannot check: facing a bet of 20");
        assert_eq!(e.to_string(), "illegal action: Cannot check: facing a bet of 20");
    }
}
