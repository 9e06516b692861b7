use crate::Chips;
use crate::HandRank;

#[derive(Debug, Clone, Copy)]
struct Row {
    seat: usize,
    strength: HandRank,
    commit: Chips,
}

/// Ephemeral settlement of a finished hand. Seats are layered from the
/// strongest hand and smallest commitment outwards; every layer collects
/// a side pot capped by its own commitment and splits it among the seats
/// tied at that strength. Odd chips accumulate and land on the winning
/// seat closest after the button.
pub struct Showdown {
    rows: Vec<Row>,
    payouts: Vec<Chips>,
    button: usize,
    worst: HandRank,
}

impl Showdown {
    /// One `(seat, strength, commit)` entry per seat; folded seats carry
    /// the `worst` sentinel strength.
    pub fn new(entries: Vec<(usize, HandRank, Chips)>, button: usize, worst: HandRank) -> Self {
        let payouts = vec![0; entries.len()];
        let rows = entries
            .into_iter()
            .map(|(seat, strength, commit)| Row {
                seat,
                strength,
                commit,
            })
            .collect();
        Self {
            rows,
            payouts,
            button,
            worst,
        }
    }

    pub fn settle(mut self) -> Vec<Chips> {
        self.rows.sort_by_key(|r| (r.strength, r.commit));
        let mut pot = self.rows.iter().map(|r| r.commit).sum::<Chips>();
        let mut remainder = 0;
        for i in 0..self.rows.len() {
            let strength = self.rows[i].strength;
            let cap = self.rows[i].commit;
            let eligible = self
                .rows
                .iter()
                .filter(|r| r.strength == strength)
                .map(|r| r.seat)
                .collect::<Vec<usize>>();
            let mut split_pot = 0;
            for row in self.rows.iter_mut() {
                let cut = row.commit.min(cap);
                row.commit -= cut;
                split_pot += cut;
            }
            let share = split_pot / eligible.len() as Chips;
            remainder += split_pot % eligible.len() as Chips;
            for &seat in &eligible {
                self.payouts[seat] += share;
            }
            pot -= split_pot;
            self.rows[i].strength = self.worst;
            log::trace!("side pot {} split {} ways", split_pot, eligible.len());
            if pot == 0 {
                break;
            }
        }
        if remainder > 0 {
            let winner = self.first_winner_after_button();
            self.payouts[winner] += remainder;
        }
        self.payouts
    }

    fn first_winner_after_button(&self) -> usize {
        let n = self.payouts.len();
        let button = self.button;
        self.payouts
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > 0)
            .map(|(seat, _)| seat)
            .min_by_key(|&seat| if seat <= button { seat + n } else { seat })
            .expect("a positive payout exists alongside a remainder")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_hand_takes_the_pot() {
        let showdown = Showdown::new(vec![(0, 5, 10), (1, 3, 10), (2, 99, 4)], 0, 99);
        assert_eq!(showdown.settle(), vec![0, 24, 0]);
    }

    #[test]
    fn short_stack_winner_opens_a_side_pot() {
        // seat 1 is best but only covered 50; seat 0 wins the overage
        let showdown = Showdown::new(vec![(0, 10, 100), (1, 2, 50), (2, 30, 100)], 0, 99);
        assert_eq!(showdown.settle(), vec![100, 150, 0]);
    }

    #[test]
    fn tie_splits_and_remainder_lands_after_button() {
        let showdown = Showdown::new(vec![(0, 7, 5), (1, 7, 5), (2, 99, 3)], 0, 99);
        assert_eq!(showdown.settle(), vec![6, 7, 0]);
    }

    #[test]
    fn settlement_conserves_chips() {
        let entries = vec![(0, 4, 40), (1, 4, 25), (2, 9, 40), (3, 99, 10)];
        let total = entries.iter().map(|e| e.2).sum::<Chips>();
        let payouts = Showdown::new(entries, 2, 99).settle();
        assert_eq!(payouts.iter().sum::<Chips>(), total);
    }
}
