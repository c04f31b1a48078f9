use htc_core::Chips;

/// A wagering decision. Cardless by design — see spec §9's "generic
/// betting engine boundary".
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Open a bet of `amount` when no one has bet this round yet.
    Bet(Chips),
    /// Raise the round's current bet to `to_amount` (a total, not a delta).
    Raise(Chips),
    /// Sugar: resolves to `Bet`, `Call`, or `Raise` depending on state.
    AllIn,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Bet(n) => write!(f, "bet {n}"),
            Action::Raise(n) => write!(f, "raise to {n}"),
            Action::AllIn => write!(f, "all_in"),
        }
    }
}
