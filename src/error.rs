use crate::cards::category::Category;
use crate::HandRank;

/// Everything that can go wrong while configuring or running a table.
///
/// Configuration and parsing problems surface at construction; runtime
/// problems surface from `reset` and `step`. None of these are recoverable
/// in place: the caller either fixes the configuration or resets the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("incorrect {what} distribution, expected list of length {expected}, got length {got}")]
    InvalidConfig {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid rank {got}, expected one of 23456789TJQKA")]
    InvalidRank { got: String },
    #[error("invalid suit {got}, expected one of SHDC")]
    InvalidSuit { got: String },
    #[error("evaluation for {got} card hands is not supported, expected between 1 and 5")]
    InvalidHandSize { got: usize },
    #[error("invalid hand rank, expected 0 <= rank <= {max}, got {got}")]
    InvalidHandRank { got: HandRank, max: HandRank },
    #[error("invalid order {got:?}, must be a permutation of the nine hand categories")]
    InvalidOrder { got: Vec<Category> },
    #[error("not enough players have chips, reset with reset_stacks = true")]
    TooFewActivePlayers,
    #[error("table must be reset before stepping")]
    TableReset,
}
