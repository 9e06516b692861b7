use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// An ordered draw source over a `ranks x suits` window of the full
/// 52-card deck. Shrinking the rank dimension keeps the top ranks, so a
/// three-rank deck holds queens, kings and aces.
///
/// A deck can be tricked for deterministic play: a fixed prefix is pinned
/// to the top and only the complement is shuffled. The prefix survives
/// reshuffles and even `untrick`, so a later `trick(None, ..)` restores it.
#[derive(Debug, Clone)]
pub struct Deck {
    num_suits: usize,
    num_ranks: usize,
    full: Vec<Card>,
    cards: Vec<Card>,
    rng: SmallRng,
    tricked: bool,
    top: Vec<usize>,
    rest: Vec<usize>,
}

impl Deck {
    pub fn new(num_suits: usize, num_ranks: usize) -> Result<Self, crate::Error> {
        Self::with_rng(num_suits, num_ranks, SmallRng::from_os_rng())
    }

    /// deterministic deck for reproducible games and tests
    pub fn seeded(num_suits: usize, num_ranks: usize, seed: u64) -> Result<Self, crate::Error> {
        Self::with_rng(num_suits, num_ranks, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(num_suits: usize, num_ranks: usize, rng: SmallRng) -> Result<Self, crate::Error> {
        if num_ranks < 1 || num_ranks > Rank::COUNT {
            return Err(crate::Error::InvalidRank {
                got: num_ranks.to_string(),
            });
        }
        if num_suits < 1 || num_suits > Suit::COUNT {
            return Err(crate::Error::InvalidSuit {
                got: num_suits.to_string(),
            });
        }
        let low = Rank::lowest(num_ranks) as u8;
        let full = (low..Rank::COUNT as u8)
            .map(Rank::from)
            .flat_map(|rank| {
                Suit::ALL
                    .into_iter()
                    .take(num_suits)
                    .map(move |suit| Card::new(rank, suit))
            })
            .collect::<Vec<Card>>();
        let mut deck = Self {
            num_suits,
            num_ranks,
            full,
            cards: Vec::new(),
            rng,
            tricked: false,
            top: Vec::new(),
            rest: Vec::new(),
        };
        deck.shuffle();
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draws up to `n` cards from the top. Never fails: an exhausted deck
    /// simply yields fewer cards.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Restores the draw order from the full deck. A tricked deck keeps
    /// its pinned prefix and shuffles only the complement.
    pub fn shuffle(&mut self) -> &mut Self {
        if self.tricked && !self.top.is_empty() {
            let mut rest = self.rest.iter().map(|&i| self.full[i]).collect::<Vec<_>>();
            rest.shuffle(&mut self.rng);
            self.cards = self.top.iter().map(|&i| self.full[i]).collect();
            self.cards.extend(rest);
        } else {
            self.cards = self.full.clone();
            self.cards.shuffle(&mut self.rng);
        }
        self
    }

    /// Pins `top_cards` to the top of the deck. Passing `None` re-applies
    /// the previously recorded prefix, or degenerates to a plain shuffle
    /// when none was ever recorded.
    pub fn trick(
        &mut self,
        top_cards: Option<&[Card]>,
        shuffle: bool,
    ) -> Result<&mut Self, crate::Error> {
        match top_cards {
            None if self.top.is_empty() => {
                self.tricked = false;
                return Ok(self.shuffle());
            }
            None => {}
            Some(cards) => {
                self.top = cards
                    .iter()
                    .map(|card| self.position(card))
                    .collect::<Result<Vec<usize>, crate::Error>>()?;
                self.rest = (0..self.full.len())
                    .filter(|i| !self.top.contains(i))
                    .collect();
            }
        }
        self.tricked = true;
        if shuffle {
            self.shuffle();
        }
        Ok(self)
    }

    /// Stops pinning the prefix without forgetting it.
    pub fn untrick(&mut self) -> &mut Self {
        self.tricked = false;
        self
    }

    fn position(&self, card: &Card) -> Result<usize, crate::Error> {
        match self.full.iter().position(|c| c == card) {
            Some(i) => Ok(i),
            None if (card.rank() as usize) < Rank::COUNT - self.num_ranks => {
                Err(crate::Error::InvalidRank {
                    got: card.rank().to_string(),
                })
            }
            None => Err(crate::Error::InvalidSuit {
                got: card.suit().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(names: &[&str]) -> Vec<Card> {
        names.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn draw_exhausts_gracefully() {
        let mut deck = Deck::seeded(2, 3, 0).unwrap();
        assert_eq!(deck.len(), 6);
        assert_eq!(deck.draw(1).len(), 1);
        assert_eq!(deck.draw(3).len(), 3);
        assert_eq!(deck.draw(4).len(), 2);
        assert_eq!(deck.draw(1).len(), 0);
    }

    #[test]
    fn window_keeps_top_ranks() {
        let mut deck = Deck::seeded(2, 3, 0).unwrap();
        let drawn = deck.draw(6);
        assert!(drawn.iter().all(|c| c.rank() >= Rank::Queen));
        assert!(drawn
            .iter()
            .all(|c| matches!(c.suit(), Suit::Spade | Suit::Heart)));
    }

    #[test]
    fn trick_pins_prefix_across_shuffles() {
        let top = cards(&["Ah", "2s"]);
        let mut deck = Deck::seeded(4, 13, 42).unwrap();
        deck.trick(Some(&top), true).unwrap();
        assert_eq!(deck.draw(2), top);
        deck.shuffle();
        assert_eq!(deck.draw(2), top);
        deck.untrick().shuffle();
        assert_ne!(deck.draw(2), top);
    }

    #[test]
    fn trick_none_restores_prefix() {
        let top = cards(&["Qs", "Ks"]);
        let mut deck = Deck::seeded(2, 3, 7).unwrap();
        deck.trick(Some(&top), true).unwrap();
        deck.untrick();
        deck.trick(None, true).unwrap();
        assert_eq!(deck.draw(2), top);
    }

    #[test]
    fn trick_rejects_cards_outside_window() {
        let mut deck = Deck::seeded(2, 3, 7).unwrap();
        let outside = cards(&["2s"]);
        assert!(matches!(
            deck.trick(Some(&outside), true),
            Err(crate::Error::InvalidRank { .. })
        ));
        let offsuit = cards(&["Qd"]);
        assert!(matches!(
            deck.trick(Some(&offsuit), true),
            Err(crate::Error::InvalidSuit { .. })
        ));
    }

    #[test]
    fn dimensions_validated() {
        assert!(matches!(
            Deck::new(2, 14),
            Err(crate::Error::InvalidRank { .. })
        ));
        assert!(matches!(
            Deck::new(0, 13),
            Err(crate::Error::InvalidSuit { .. })
        ));
        assert!(matches!(
            Deck::new(2, 0),
            Err(crate::Error::InvalidRank { .. })
        ));
        assert!(matches!(
            Deck::new(5, 13),
            Err(crate::Error::InvalidSuit { .. })
        ));
    }
}
