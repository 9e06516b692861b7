use super::card::Card;
use super::category::Category;
use super::lookup::LookupTable;
use crate::HandRank;
use itertools::Itertools;
use std::fmt::Display;
use std::fmt::Formatter;

/// Scores hole plus community cards against a lookup table by trying
/// every legal way to pick `cards_for_hand` cards and keeping the best
/// (lowest) rank. Omaha-style games pin a mandatory number of hole cards
/// into every combination.
pub struct Evaluator {
    table: LookupTable,
    cards_for_hand: usize,
    mandatory_hole_cards: usize,
}

impl Evaluator {
    pub fn new(
        suits: usize,
        ranks: usize,
        cards_for_hand: usize,
        mandatory_hole_cards: usize,
        low_end_straight: bool,
        order: Option<&[Category]>,
    ) -> Result<Self, crate::Error> {
        if cards_for_hand < 1 || cards_for_hand > 5 {
            return Err(crate::Error::InvalidHandSize {
                got: cards_for_hand,
            });
        }
        Ok(Self {
            table: LookupTable::new(suits, ranks, cards_for_hand, low_end_straight, order)?,
            cards_for_hand,
            mandatory_hole_cards,
        })
    }

    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    /// Best rank over every legal combination. With nothing to combine
    /// the result stays at `max_rank`, the "no hand" sentinel.
    pub fn evaluate(&self, hole_cards: &[Card], community_cards: &[Card]) -> HandRank {
        let mut minimum = self.table.max_rank();
        if self.mandatory_hole_cards > 0 {
            let from_community = self.cards_for_hand - self.mandatory_hole_cards.min(self.cards_for_hand);
            let community = community_cards
                .iter()
                .copied()
                .combinations(from_community)
                .collect::<Vec<_>>();
            for hole in hole_cards
                .iter()
                .copied()
                .combinations(self.mandatory_hole_cards)
            {
                for comm in &community {
                    let mut cards = hole.clone();
                    cards.extend(comm);
                    minimum = minimum.min(self.table.lookup(&cards));
                }
            }
        } else {
            let pool = hole_cards
                .iter()
                .chain(community_cards.iter())
                .copied()
                .collect::<Vec<_>>();
            for cards in pool.into_iter().combinations(self.cards_for_hand) {
                minimum = minimum.min(self.table.lookup(&cards));
            }
        }
        minimum
    }

    /// Category owning a rank. The `max_rank` sentinel reports as the
    /// worst surviving category; anything beyond it is out of range.
    pub fn category(&self, rank: HandRank) -> Result<Category, crate::Error> {
        let entry = match rank > self.table.max_rank() {
            true => None,
            false => self
                .table
                .ranked()
                .iter()
                .find(|e| rank < e.cumulative)
                .or(self.table.ranked().last()),
        };
        entry
            .map(|e| e.category)
            .ok_or(crate::Error::InvalidHandRank {
                got: rank,
                max: self.table.max_rank(),
            })
    }
}

/// surviving categories best to worst with their deal frequencies
impl Display for Evaluator {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let total = self.table.ranked().iter().map(|e| e.suited).sum::<u64>() as f64;
        let ranks = self
            .table
            .ranked()
            .iter()
            .map(|e| format!("{} ({:.4}%)", e.category, 100.0 * e.suited as f64 / total))
            .join(" > ");
        write!(f, "{}", ranks)
    }
}
