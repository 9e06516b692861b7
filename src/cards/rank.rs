use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const COUNT: usize = 13;

    /// prime for each rank, deuce = 2 through ace = 41.
    /// products over these are unique per rank multiset, which is what
    /// makes the lookup table work.
    pub const PRIMES: [u64; Self::COUNT] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

    pub fn prime(&self) -> u64 {
        Self::PRIMES[*self as usize]
    }

    pub fn lowest(n_ranks: usize) -> Self {
        Self::from((Self::COUNT - n_ranks) as u8)
    }
}

impl From<u8> for Rank {
    fn from(n: u8) -> Rank {
        match n {
            0 => Rank::Two,
            1 => Rank::Three,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            12 => Rank::Ace,
            _ => panic!("invalid rank index"),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = crate::Error;
    fn try_from(c: char) -> std::result::Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(crate::Error::InvalidRank { got: c.to_string() }),
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Two => "2",
                Rank::Three => "3",
                Rank::Four => "4",
                Rank::Five => "5",
                Rank::Six => "6",
                Rank::Seven => "7",
                Rank::Eight => "8",
                Rank::Nine => "9",
                Rank::Ten => "T",
                Rank::Jack => "J",
                Rank::Queen => "Q",
                Rank::King => "K",
                Rank::Ace => "A",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Rank::try_from('t').unwrap(), Rank::Ten);
        assert_eq!(Rank::try_from('A').unwrap(), Rank::Ace);
        assert!(Rank::try_from('1').is_err());
    }

    #[test]
    fn lowest_of_window() {
        assert_eq!(Rank::lowest(13), Rank::Two);
        assert_eq!(Rank::lowest(9), Rank::Six);
        assert_eq!(Rank::lowest(3), Rank::Queen);
    }
}
