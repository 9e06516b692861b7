use super::card::Card;
use super::category::Category;
use super::rank::Rank;
use crate::HandRank;
use itertools::Itertools;
use std::collections::HashMap;

/// Census and rank range for one surviving hand category.
///
/// `suited` counts every concrete deal of the class and only decides the
/// rarity ordering; `unsuited` counts the equivalence classes the table
/// actually distinguishes. The class occupies ranks
/// `[first_rank, cumulative)` in the global rank space.
#[derive(Debug, Clone, Copy)]
pub struct CategoryEntry {
    pub category: Category,
    pub suited: u64,
    pub unsuited: u64,
    pub first_rank: HandRank,
    pub cumulative: HandRank,
}

/// Maps prime products of card codes to global hand ranks, lower is
/// better. Flush-candidate hands key the suited map by the product over
/// their rank bits; everything else keys the unsuited map by the product
/// over card primes. Built once per (suits, ranks, hand size, low-ace,
/// order) configuration and immutable afterwards.
pub struct LookupTable {
    entries: Vec<CategoryEntry>,
    suited: HashMap<u64, HandRank>,
    unsuited: HashMap<u64, HandRank>,
    flush_ranked: bool,
    max_rank: HandRank,
}

impl LookupTable {
    pub fn new(
        suits: usize,
        ranks: usize,
        cards_for_hand: usize,
        low_end_straight: bool,
        order: Option<&[Category]>,
    ) -> Result<Self, crate::Error> {
        let order = Self::ordering(suits, ranks, cards_for_hand, low_end_straight, order)?;
        let entries = Self::rank_ranges(&order);
        let max_rank = entries.last().map(|e| e.cumulative).unwrap_or(0);
        let flush_ranked = entries.iter().any(|e| e.category == Category::Flush);
        let mut table = Self {
            entries,
            suited: HashMap::new(),
            unsuited: HashMap::new(),
            flush_ranked,
            max_rank,
        };
        table.populate(ranks, cards_for_hand, low_end_straight);
        Ok(table)
    }

    /// The total number of hand classes; every valid rank is below this.
    pub fn max_rank(&self) -> HandRank {
        self.max_rank
    }

    /// Surviving categories, best first.
    pub fn ranked(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn entry(&self, category: Category) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// Global rank of exactly `cards_for_hand` cards. A miss means the
    /// cards do not belong to this table's deck, which is a programmer
    /// error.
    pub fn lookup(&self, cards: &[Card]) -> HandRank {
        let all_one_suit = cards.iter().fold(0xF000u32, |a, c| a & c.code()) != 0;
        if all_one_suit {
            let bits = cards.iter().fold(0u32, |a, c| a | c.code()) >> 16;
            let key = Self::prime_product_from_bits(bits as u16);
            let table = match self.flush_ranked {
                true => &self.suited,
                false => &self.unsuited,
            };
            *table.get(&key).expect("suited hand in lookup table")
        } else {
            let key = cards.iter().map(Card::prime).product::<u64>();
            *self.unsuited.get(&key).expect("unsuited hand in lookup table")
        }
    }

    pub fn prime_product_from_bits(bits: u16) -> u64 {
        Rank::PRIMES
            .iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << i) != 0)
            .map(|(_, &p)| p)
            .product()
    }

    //

    /// Categories in rank order with their censuses, rarest first unless
    /// an explicit order is given. Ties in the suited census break on the
    /// category name.
    fn ordering(
        suits: usize,
        ranks: usize,
        cards_for_hand: usize,
        low_end_straight: bool,
        order: Option<&[Category]>,
    ) -> Result<Vec<(Category, u64, u64)>, crate::Error> {
        let census = Category::ALL
            .map(|c| {
                let (s, u) = Self::census(c, suits, ranks, cards_for_hand, low_end_straight);
                (c, s, u)
            })
            .to_vec();
        match order {
            None => {
                let mut census = census;
                census.sort_by_key(|&(c, s, _)| (s, c.name()));
                Ok(census)
            }
            Some(order) => {
                let permutation = order.len() == Category::COUNT
                    && Category::ALL.iter().all(|c| order.contains(c));
                if !permutation {
                    return Err(crate::Error::InvalidOrder {
                        got: order.to_vec(),
                    });
                }
                Ok(order
                    .iter()
                    .map(|&c| census[Category::ALL.iter().position(|&a| a == c).unwrap()])
                    .collect())
            }
        }
    }

    fn rank_ranges(order: &[(Category, u64, u64)]) -> Vec<CategoryEntry> {
        let mut entries = Vec::new();
        let mut cumulative = 0u64;
        for &(category, suited, unsuited) in order {
            if unsuited == 0 {
                continue;
            }
            let first_rank = cumulative as HandRank;
            cumulative += unsuited;
            entries.push(CategoryEntry {
                category,
                suited,
                unsuited,
                first_rank,
                cumulative: cumulative as HandRank,
            });
        }
        entries
    }

    /// (suited, unsuited) census for one category. Non-positive counts
    /// mean the category cannot occur in this deck and is omitted.
    fn census(
        category: Category,
        suits: usize,
        ranks: usize,
        cards_for_hand: usize,
        low_end_straight: bool,
    ) -> (u64, u64) {
        let s = suits as u64;
        let r = ranks as i64;
        let h = cards_for_hand as i64;
        let low = low_end_straight as i64;
        let straights = (r - (h - 1) + low).max(0) as u64;
        match category {
            Category::StraightFlush => {
                if h < 3 || s < 2 {
                    return (0, 0);
                }
                let u = straights;
                (u.max(u * s), u)
            }
            Category::FourOfAKind => {
                if h < 4 || s < 4 {
                    return (0, 0);
                }
                let u = ncr(r, 1) * ncr(r - 1, h - 4);
                (u.max(u * s.pow((h - 4) as u32)), u)
            }
            Category::FullHouse => {
                if h < 5 || s < 3 {
                    return (0, 0);
                }
                let u = ncr(r, 1) * ncr(r - 1, 1) * ncr(r - 2, h - 5);
                let suit_choices = ncr(s as i64, 3) * ncr(s as i64, 2) * s.pow((h - 5) as u32);
                (u.max(u * suit_choices), u)
            }
            Category::Flush => {
                if h < 3 || s < 2 {
                    return (0, 0);
                }
                let u = ncr(r, h).saturating_sub(straights);
                (u.max(u * s), u)
            }
            Category::Straight => {
                if h < 3 {
                    return (0, 0);
                }
                let u = straights;
                let straight_flushes = if s > 1 { u * s } else { 0 };
                let suited = match s < 2 {
                    true => u,
                    false => u.max((u * s.pow(h as u32)).saturating_sub(straight_flushes)),
                };
                (suited, u)
            }
            Category::ThreeOfAKind => {
                if h < 3 || s < 3 {
                    return (0, 0);
                }
                let u = ncr(r, 1) * ncr(r - 1, h - 3);
                let suit_choices = ncr(s as i64, 3) * ncr(s as i64, 3).pow((h - 3) as u32);
                (u.max(u * suit_choices), u)
            }
            Category::TwoPair => {
                if h < 4 || s < 2 {
                    return (0, 0);
                }
                let u = ncr(r, 2) * ncr(r - 2, h - 4);
                let suit_choices = ncr(s as i64, 2).pow(2) * s.pow((h - 4) as u32);
                (u.max(u * suit_choices), u)
            }
            Category::Pair => {
                if h < 2 || s < 2 {
                    return (0, 0);
                }
                let u = ncr(r, 1) * ncr(r - 1, h - 2);
                let suit_choices = ncr(s as i64, 2) * s.pow((h - 2) as u32);
                (u.max(u * suit_choices), u)
            }
            Category::HighCard => {
                let straights = if h > 2 { straights } else { 0 };
                let u = ncr(r, h).saturating_sub(straights);
                let suited = match s < 2 {
                    true => u,
                    false => u.max(u * (s.pow(h as u32) - s)),
                };
                (suited, u)
            }
        }
    }

    //

    fn populate(&mut self, ranks: usize, cards_for_hand: usize, low_end_straight: bool) {
        let wants_straights = [Category::StraightFlush, Category::Straight]
            .iter()
            .any(|&c| self.entry(c).is_some());
        let wants_flushes = [Category::Flush, Category::HighCard]
            .iter()
            .any(|&c| self.entry(c).is_some());
        let straights = match wants_straights {
            true => Self::straight_bits(ranks, cards_for_hand, low_end_straight),
            false => Vec::new(),
        };
        let flushes = match wants_flushes {
            true => Self::flush_bits(ranks, cards_for_hand, &straights),
            false => Vec::new(),
        };
        self.insert_bits(Category::StraightFlush, &straights, true);
        self.insert_bits(Category::Flush, &flushes, true);
        self.insert_bits(Category::Straight, &straights, false);
        self.insert_bits(Category::HighCard, &flushes, false);
        self.insert_multiples(Category::FourOfAKind, ranks, cards_for_hand, &[4]);
        self.insert_multiples(Category::FullHouse, ranks, cards_for_hand, &[3, 2]);
        self.insert_multiples(Category::ThreeOfAKind, ranks, cards_for_hand, &[3]);
        self.insert_multiples(Category::TwoPair, ranks, cards_for_hand, &[2, 2]);
        self.insert_multiples(Category::Pair, ranks, cards_for_hand, &[2]);
    }

    /// Rank-bit patterns of every straight, best first. The window of
    /// `cards_for_hand` consecutive bits slides down from the ace; the
    /// ace-low straight, when allowed, comes last.
    fn straight_bits(ranks: usize, cards_for_hand: usize, low_end_straight: bool) -> Vec<u16> {
        let h = cards_for_hand;
        let mut bits = Vec::new();
        let mut mask = (((1u32 << h) - 1) << (Rank::COUNT - h)) as u16;
        for _ in 0..(ranks + 1).saturating_sub(h) {
            bits.push(mask);
            mask >>= 1;
        }
        if low_end_straight {
            let ace = 1u16 << (Rank::COUNT - 1);
            let tail = ((1u16 << (h - 1)) - 1) << (Rank::COUNT - ranks);
            bits.push(ace | tail);
        }
        bits
    }

    /// Rank-bit patterns of every non-straight `cards_for_hand` subset of
    /// the rank window, best first.
    fn flush_bits(ranks: usize, cards_for_hand: usize, straights: &[u16]) -> Vec<u16> {
        let mut bits = Vec::new();
        let mut pattern = (1u32 << cards_for_hand) - 1;
        for _ in 0..ncr(ranks as i64, cards_for_hand as i64) {
            let mask = (pattern << (Rank::COUNT - ranks)) as u16;
            if !straights.contains(&mask) {
                bits.push(mask);
            }
            pattern = next_bit_permutation(pattern);
        }
        bits.reverse();
        bits
    }

    fn insert_bits(&mut self, category: Category, bits: &[u16], suited: bool) {
        let Some(entry) = self.entry(category).copied() else {
            return;
        };
        assert!(bits.len() as u64 == entry.unsuited);
        let table = match suited {
            true => &mut self.suited,
            false => &mut self.unsuited,
        };
        for (i, &mask) in bits.iter().enumerate() {
            let key = Self::prime_product_from_bits(mask);
            table.insert(key, entry.first_rank + i as HandRank);
        }
    }

    /// Hands built around repeated ranks. Primary ranks run ace-down; for
    /// each arrangement every kicker choice follows in lexicographic
    /// order over the remaining (descending) ranks.
    fn insert_multiples(
        &mut self,
        category: Category,
        ranks: usize,
        cards_for_hand: usize,
        multiplicities: &[usize],
    ) {
        let Some(entry) = self.entry(category).copied() else {
            return;
        };
        let backwards = (Rank::COUNT - ranks..Rank::COUNT).rev().collect::<Vec<_>>();
        let distinct = multiplicities.iter().unique().count() > 1;
        let arrangements: Vec<Vec<usize>> = match distinct {
            true => backwards
                .iter()
                .copied()
                .permutations(multiplicities.len())
                .collect(),
            false => backwards
                .iter()
                .copied()
                .combinations(multiplicities.len())
                .collect(),
        };
        let num_kickers = cards_for_hand - multiplicities.iter().sum::<usize>();
        let mut rank = entry.first_rank;
        for primary in arrangements {
            let base = primary
                .iter()
                .zip(multiplicities)
                .map(|(&r, &m)| Rank::PRIMES[r].pow(m as u32))
                .product::<u64>();
            if num_kickers == 0 {
                self.unsuited.insert(base, rank);
                rank += 1;
                continue;
            }
            let pool = backwards
                .iter()
                .copied()
                .filter(|r| !primary.contains(r))
                .collect::<Vec<_>>();
            for kickers in pool.into_iter().combinations(num_kickers) {
                let key = base * kickers.iter().map(|&r| Rank::PRIMES[r]).product::<u64>();
                self.unsuited.insert(key, rank);
                rank += 1;
            }
        }
        assert!(rank - entry.first_rank == entry.unsuited as HandRank);
    }
}

/// exact binomial coefficient, zero whenever the choice is impossible
fn ncr(n: i64, k: i64) -> u64 {
    if k == 0 {
        return 1;
    }
    if n < 0 || k < 0 || k > n {
        return 0;
    }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    (0..k).fold(1u64, |acc, i| acc * (n - i) / (i + 1))
}

/// Gosper's hack: next integer with the same popcount
fn next_bit_permutation(v: u32) -> u32 {
    let t = v | (v - 1);
    (t + 1) | (((!t & (t + 1)) - 1) >> (v.trailing_zeros() + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(names: &[&str]) -> Vec<Card> {
        names.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn binomials() {
        assert_eq!(ncr(13, 5), 1287);
        assert_eq!(ncr(52, 5), 2598960);
        assert_eq!(ncr(0, 1), 0);
        assert_eq!(ncr(-1, 0), 1);
        assert_eq!(ncr(4, 4), 1);
    }

    #[test]
    fn standard_census() {
        let table = LookupTable::new(4, 13, 5, true, None).unwrap();
        assert_eq!(table.max_rank(), 7462);
        let unsuited = |c: Category| table.entry(c).unwrap().unsuited;
        assert_eq!(unsuited(Category::StraightFlush), 10);
        assert_eq!(unsuited(Category::FourOfAKind), 156);
        assert_eq!(unsuited(Category::FullHouse), 156);
        assert_eq!(unsuited(Category::Flush), 1277);
        assert_eq!(unsuited(Category::Straight), 10);
        assert_eq!(unsuited(Category::ThreeOfAKind), 858);
        assert_eq!(unsuited(Category::TwoPair), 858);
        assert_eq!(unsuited(Category::Pair), 2860);
        assert_eq!(unsuited(Category::HighCard), 1277);
        let order = table.ranked().iter().map(|e| e.category).collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                Category::StraightFlush,
                Category::FourOfAKind,
                Category::FullHouse,
                Category::Flush,
                Category::Straight,
                Category::ThreeOfAKind,
                Category::TwoPair,
                Category::Pair,
                Category::HighCard,
            ]
        );
    }

    #[test]
    fn rank_ranges_are_contiguous() {
        let table = LookupTable::new(4, 13, 5, true, None).unwrap();
        let mut expected = 0;
        for entry in table.ranked() {
            assert_eq!(entry.first_rank, expected);
            assert_eq!(entry.cumulative, expected + entry.unsuited as HandRank);
            expected = entry.cumulative;
        }
        assert_eq!(expected, table.max_rank());
    }

    #[test]
    fn royal_flush_is_rank_zero() {
        let table = LookupTable::new(4, 13, 5, true, None).unwrap();
        assert_eq!(table.lookup(&cards(&["As", "Ks", "Qs", "Js", "Ts"])), 0);
        // the wheel is the worst straight flush
        assert_eq!(table.lookup(&cards(&["5h", "4h", "3h", "2h", "Ah"])), 9);
        // the worst hand in the deck
        assert_eq!(
            table.lookup(&cards(&["7s", "5h", "4d", "3c", "2s"])),
            table.max_rank() - 1
        );
    }

    #[test]
    fn straight_flush_beats_straight() {
        let table = LookupTable::new(4, 13, 5, true, None).unwrap();
        let straight_flush = table.lookup(&cards(&["9s", "8s", "7s", "6s", "5s"]));
        let straight = table.lookup(&cards(&["9s", "8h", "7s", "6s", "5s"]));
        assert!(straight_flush < straight);
    }

    #[test]
    fn leduc_table() {
        let table = LookupTable::new(2, 3, 2, true, None).unwrap();
        assert_eq!(table.max_rank(), 6);
        // pairs are rarer than high cards, ace down
        assert_eq!(table.lookup(&cards(&["As", "Ah"])), 0);
        assert_eq!(table.lookup(&cards(&["Ks", "Kh"])), 1);
        assert_eq!(table.lookup(&cards(&["Qs", "Qh"])), 2);
        assert_eq!(table.lookup(&cards(&["As", "Kh"])), 3);
        assert_eq!(table.lookup(&cards(&["As", "Qh"])), 4);
        assert_eq!(table.lookup(&cards(&["Ks", "Qh"])), 5);
        // suited high cards score the same as offsuit ones
        assert_eq!(table.lookup(&cards(&["Ks", "Qs"])), 5);
    }

    #[test]
    fn short_deck_order_lifts_flushes() {
        let order = "sf fk fl fh st tk tp pa hc"
            .split(' ')
            .map(|t| t.parse().unwrap())
            .collect::<Vec<Category>>();
        let table = LookupTable::new(4, 9, 5, true, Some(&order)).unwrap();
        let flush = table.entry(Category::Flush).unwrap();
        let full_house = table.entry(Category::FullHouse).unwrap();
        assert!(flush.cumulative <= full_house.first_rank);
    }

    #[test]
    fn order_must_be_permutation() {
        let not_a_permutation = [Category::StraightFlush; 9];
        assert!(matches!(
            LookupTable::new(4, 13, 5, true, Some(&not_a_permutation)),
            Err(crate::Error::InvalidOrder { .. })
        ));
        assert!(matches!(
            LookupTable::new(4, 13, 5, true, Some(&[Category::Flush])),
            Err(crate::Error::InvalidOrder { .. })
        ));
    }

    #[test]
    fn low_ace_toggle_changes_straight_count() {
        let with = LookupTable::new(4, 13, 5, true, None).unwrap();
        let without = LookupTable::new(4, 13, 5, false, None).unwrap();
        let straights = |t: &LookupTable| t.entry(Category::Straight).unwrap().unsuited;
        assert_eq!(straights(&with), 10);
        assert_eq!(straights(&without), 9);
    }
}
