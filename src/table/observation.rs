use crate::cards::card::Card;
use crate::Chips;
use serde::Serialize;

/// One history entry: who acted, how many chips went in, and whether the
/// bet carried fold intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub bet: Chips,
    pub folded: bool,
}

/// The full observable state after any `reset` or `step`. Hole cards for
/// every seat are included; a caller presenting the table to one seat is
/// responsible for redacting the others.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    /// seat to act, or `None` once the hand has ended
    pub action: Option<usize>,
    pub active: Vec<bool>,
    pub button: usize,
    pub call: Chips,
    pub community_cards: Vec<Card>,
    pub hole_cards: Vec<Vec<Card>>,
    pub max_raise: Chips,
    pub min_raise: Chips,
    pub pot: Chips,
    pub stacks: Vec<Chips>,
    pub street_commits: Vec<Chips>,
}

/// Render-facing snapshot of the table, stable at any point in the hand.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub action: Option<usize>,
    pub active: Vec<bool>,
    pub all_in: Vec<bool>,
    pub button: usize,
    pub community_cards: Vec<Card>,
    pub done: bool,
    pub hole_cards: Vec<Vec<Card>>,
    pub pot: Chips,
    pub payouts: Vec<Chips>,
    pub prev_action: Option<ActionRecord>,
    pub stacks: Vec<Chips>,
    pub street_commits: Vec<Chips>,
}
