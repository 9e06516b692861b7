use super::stakes::RaiseCap;
use super::stakes::RaiseSize;
use super::stakes::Schedule;
use crate::cards::category::Category;
use crate::Chips;

/// Everything that defines a game: seats, streets, forced bets, sizing
/// regime, deck shape and showdown rules. Scalar fields expand to every
/// seat or street when the table is built.
#[derive(Debug, Clone)]
pub struct Config {
    pub num_players: usize,
    pub num_streets: usize,
    pub blinds: Schedule<Chips>,
    pub antes: Schedule<Chips>,
    pub raise_sizes: Schedule<RaiseSize>,
    pub num_raises: Schedule<RaiseCap>,
    pub num_suits: usize,
    pub num_ranks: usize,
    pub num_hole_cards: usize,
    pub num_community_cards: Schedule<usize>,
    pub num_cards_for_hand: usize,
    pub mandatory_num_hole_cards: usize,
    pub start_stack: Chips,
    pub low_end_straight: bool,
    pub order: Option<Vec<Category>>,
}

/// order used by short-deck games: flushes outrank full houses
fn short_deck_order() -> Vec<Category> {
    vec![
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::Flush,
        Category::FullHouse,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::Pair,
        Category::HighCard,
    ]
}

/// blinds measured from the first poster: small blind, big blind, rest
/// nothing
fn small_big_blinds(seats: usize) -> Schedule<Chips> {
    let mut blinds = vec![0; seats];
    blinds[0] = 1;
    blinds[1] = 2;
    Schedule::PerSeat(blinds)
}

impl Config {
    /// two-player Leduc hold'em: ante-only, two streets, six-card deck
    pub fn leduc() -> Self {
        Self {
            num_players: 2,
            num_streets: 2,
            blinds: Schedule::Flat(0),
            antes: Schedule::Flat(1),
            raise_sizes: Schedule::Flat(RaiseSize::Fixed(2)),
            num_raises: Schedule::Flat(RaiseCap::Fixed(2)),
            num_suits: 2,
            num_ranks: 3,
            num_hole_cards: 1,
            num_community_cards: Schedule::PerSeat(vec![0, 1]),
            num_cards_for_hand: 2,
            mandatory_num_hole_cards: 0,
            start_stack: 10,
            low_end_straight: true,
            order: None,
        }
    }

    /// three-player Kuhn poker: one street, one-suit four-card deck
    pub fn kuhn() -> Self {
        Self {
            num_players: 3,
            num_streets: 1,
            blinds: Schedule::Flat(0),
            antes: Schedule::Flat(1),
            raise_sizes: Schedule::PerSeat(vec![RaiseSize::Fixed(1)]),
            num_raises: Schedule::PerSeat(vec![RaiseCap::Fixed(1)]),
            num_suits: 1,
            num_ranks: 4,
            num_hole_cards: 1,
            num_community_cards: Schedule::PerSeat(vec![0]),
            num_cards_for_hand: 1,
            mandatory_num_hole_cards: 0,
            start_stack: 10,
            low_end_straight: true,
            order: None,
        }
    }

    /// 1-2 fixed-limit hold'em with small/big bets of 2/4
    pub fn limit_holdem(seats: usize) -> Self {
        Self {
            raise_sizes: Schedule::PerSeat(vec![
                RaiseSize::Fixed(2),
                RaiseSize::Fixed(2),
                RaiseSize::Fixed(4),
                RaiseSize::Fixed(4),
            ]),
            num_raises: Schedule::PerSeat(vec![
                RaiseCap::Fixed(3),
                RaiseCap::Fixed(4),
                RaiseCap::Fixed(4),
                RaiseCap::Fixed(4),
            ]),
            ..Self::no_limit_holdem(seats)
        }
    }

    /// 1-2 no-limit hold'em
    pub fn no_limit_holdem(seats: usize) -> Self {
        Self {
            num_players: seats,
            num_streets: 4,
            blinds: small_big_blinds(seats),
            antes: Schedule::Flat(0),
            raise_sizes: Schedule::Flat(RaiseSize::NoLimit),
            num_raises: Schedule::Flat(RaiseCap::Unlimited),
            num_suits: 4,
            num_ranks: 13,
            num_hole_cards: 2,
            num_community_cards: Schedule::PerSeat(vec![0, 3, 1, 1]),
            num_cards_for_hand: 5,
            mandatory_num_hole_cards: 0,
            start_stack: 200,
            low_end_straight: true,
            order: None,
        }
    }

    /// 2-4 no-limit hold'em, nine seats, with a big-blind ante
    pub fn no_limit_holdem_bb_ante() -> Self {
        let mut antes = vec![0; 9];
        antes[1] = 1;
        let mut blinds = vec![0; 9];
        blinds[0] = 2;
        blinds[1] = 4;
        Self {
            blinds: Schedule::PerSeat(blinds),
            antes: Schedule::PerSeat(antes),
            ..Self::no_limit_holdem(9)
        }
    }

    /// 1-2 pot-limit Omaha: four hole cards, two of them mandatory
    pub fn pot_limit_omaha(seats: usize) -> Self {
        Self {
            raise_sizes: Schedule::Flat(RaiseSize::Pot),
            num_hole_cards: 4,
            mandatory_num_hole_cards: 2,
            ..Self::no_limit_holdem(seats)
        }
    }

    /// 1-2 no-limit short-deck hold'em: nine ranks, flush over full house
    pub fn short_deck(seats: usize) -> Self {
        Self {
            num_ranks: 9,
            order: Some(short_deck_order()),
            ..Self::no_limit_holdem(seats)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_well_formed() {
        for config in [
            Config::leduc(),
            Config::kuhn(),
            Config::limit_holdem(2),
            Config::limit_holdem(6),
            Config::limit_holdem(9),
            Config::no_limit_holdem(2),
            Config::no_limit_holdem(6),
            Config::no_limit_holdem(9),
            Config::no_limit_holdem_bb_ante(),
            Config::pot_limit_omaha(2),
            Config::pot_limit_omaha(6),
            Config::pot_limit_omaha(9),
            Config::short_deck(2),
            Config::short_deck(6),
            Config::short_deck(9),
        ] {
            assert!(crate::Dealer::new(config).is_ok());
        }
    }

    #[test]
    fn short_deck_uses_nine_ranks() {
        let config = Config::short_deck(6);
        assert_eq!(config.num_ranks, 9);
        let order = config.order.unwrap();
        let flush = order.iter().position(|&c| c == Category::Flush).unwrap();
        let full = order.iter().position(|&c| c == Category::FullHouse).unwrap();
        assert!(flush < full);
    }
}
