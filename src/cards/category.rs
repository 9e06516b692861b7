use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// The nine hand classes. Default ranking is by rarity for the configured
/// deck; short-deck games pass a custom order instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    Pair,
    HighCard,
}

impl Category {
    pub const COUNT: usize = 9;
    pub const ALL: [Category; Self::COUNT] = [
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::Pair,
        Category::HighCard,
    ];

    /// stable two-letter tag
    pub fn tag(&self) -> &'static str {
        match self {
            Category::StraightFlush => "sf",
            Category::FourOfAKind => "fk",
            Category::FullHouse => "fh",
            Category::Flush => "fl",
            Category::Straight => "st",
            Category::ThreeOfAKind => "tk",
            Category::TwoPair => "tp",
            Category::Pair => "pa",
            Category::HighCard => "hc",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::StraightFlush => "straight flush",
            Category::FourOfAKind => "four of a kind",
            Category::FullHouse => "full house",
            Category::Flush => "flush",
            Category::Straight => "straight",
            Category::ThreeOfAKind => "three of a kind",
            Category::TwoPair => "two pair",
            Category::Pair => "pair",
            Category::HighCard => "high card",
        }
    }
}

impl FromStr for Category {
    type Err = crate::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.tag() == s)
            .ok_or(crate::Error::InvalidOrder { got: Vec::new() })
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl serde::Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.tag().parse::<Category>().unwrap(), category);
        }
        assert!("xx".parse::<Category>().is_err());
    }
}
