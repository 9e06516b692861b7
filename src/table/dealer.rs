use super::config::Config;
use super::observation::ActionRecord;
use super::observation::Observation;
use super::observation::Snapshot;
use super::showdown::Showdown;
use super::stakes::RaiseCap;
use super::stakes::RaiseSize;
use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::cards::evaluator::Evaluator;
use crate::Chips;

/// Runs one poker hand at a time for an arbitrary rule set: any number of
/// seats and streets, blind and ante schedules, fixed/pot/no-limit
/// sizing, raise caps and deck shapes. `reset` shuffles and posts,
/// `step` applies one bet and reports the observable state, per-seat
/// payoffs so far and per-seat terminal flags.
///
/// A dealer is single-threaded shared-mutable state; distinct dealers
/// are fully independent.
pub struct Dealer {
    num_players: usize,
    num_streets: usize,
    blinds: Vec<Chips>,
    antes: Vec<Chips>,
    raise_sizes: Vec<RaiseSize>,
    num_raises: Vec<RaiseCap>,
    num_hole_cards: usize,
    num_community_cards: Vec<usize>,
    start_stack: Chips,
    big_blind: Chips,
    deck: Deck,
    evaluator: Evaluator,
    action: Option<usize>,
    active: Vec<bool>,
    button: usize,
    community_cards: Vec<Card>,
    hole_cards: Vec<Vec<Card>>,
    history: Vec<ActionRecord>,
    largest_raise: Chips,
    pot: Chips,
    pot_commit: Vec<Chips>,
    stacks: Vec<Chips>,
    street: usize,
    street_commits: Vec<Chips>,
    street_option: Vec<bool>,
    street_raises: u32,
}

impl Dealer {
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        let deck = Deck::new(config.num_suits, config.num_ranks)?;
        Self::with_deck(config, deck)
    }

    /// deterministic dealer for reproducible games and tests
    pub fn seeded(config: Config, seed: u64) -> Result<Self, crate::Error> {
        let deck = Deck::seeded(config.num_suits, config.num_ranks, seed)?;
        Self::with_deck(config, deck)
    }

    fn with_deck(config: Config, deck: Deck) -> Result<Self, crate::Error> {
        if config.num_players < 2 {
            return Err(crate::Error::InvalidConfig {
                what: "player",
                expected: 2,
                got: config.num_players,
            });
        }
        if config.num_streets < 1 {
            return Err(crate::Error::InvalidConfig {
                what: "street",
                expected: 1,
                got: config.num_streets,
            });
        }
        let n = config.num_players;
        let blinds = config.blinds.expand("blind", n)?;
        let antes = config.antes.expand("ante", n)?;
        let raise_sizes = config.raise_sizes.expand("raise size", config.num_streets)?;
        let num_raises = config.num_raises.expand("number of raises", config.num_streets)?;
        let num_community_cards = config
            .num_community_cards
            .expand("community card", config.num_streets)?;
        let evaluator = Evaluator::new(
            config.num_suits,
            config.num_ranks,
            config.num_cards_for_hand,
            config.mandatory_num_hole_cards,
            config.low_end_straight,
            config.order.as_deref(),
        )?;
        let big_blind = blinds[1];
        Ok(Self {
            num_players: n,
            num_streets: config.num_streets,
            blinds,
            antes,
            raise_sizes,
            num_raises,
            num_hole_cards: config.num_hole_cards,
            num_community_cards,
            start_stack: config.start_stack,
            big_blind,
            deck,
            evaluator,
            action: None,
            active: vec![false; n],
            button: 0,
            community_cards: Vec::new(),
            hole_cards: Vec::new(),
            history: Vec::new(),
            largest_raise: 0,
            pot: 0,
            pot_commit: vec![0; n],
            stacks: vec![config.start_stack; n],
            street: 0,
            street_commits: vec![0; n],
            street_option: vec![false; n],
            street_raises: 0,
        })
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
    pub fn stacks(&self) -> &[Chips] {
        &self.stacks
    }
    /// table-setup hook: pre-shorten or top up seats between hands
    pub fn stacks_mut(&mut self) -> &mut [Chips] {
        &mut self.stacks
    }
    /// table-setup hook: trick the deck for deterministic deals
    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Starts a new hand: shuffles, deals, moves the button, posts antes
    /// then blinds, and hands the action to the first seat to act.
    pub fn reset(
        &mut self,
        reset_button: bool,
        reset_stacks: bool,
    ) -> Result<Observation, crate::Error> {
        if reset_stacks {
            self.active = vec![true; self.num_players];
            self.stacks = vec![self.start_stack; self.num_players];
        } else {
            self.active = self.stacks.iter().map(|&s| s > 0).collect();
            if self.active.iter().filter(|&&a| a).count() <= 1 {
                return Err(crate::Error::TooFewActivePlayers);
            }
        }
        self.button = match reset_button {
            true => 0,
            false => (self.button + 1) % self.num_players,
        };
        self.deck.shuffle();
        self.community_cards = self.deck.draw(self.num_community_cards[0]);
        self.history.clear();
        self.hole_cards = (0..self.num_players)
            .map(|_| self.deck.draw(self.num_hole_cards))
            .collect();
        self.largest_raise = self.big_blind;
        self.pot = 0;
        self.pot_commit = vec![0; self.num_players];
        self.street = 0;
        self.street_commits = vec![0; self.num_players];
        self.street_option = vec![false; self.num_players];
        self.street_raises = 0;
        // heads up the button posts the small blind and acts first
        self.action = Some(self.button);
        if self.num_players > 2 {
            self.move_action();
        }
        let antes = self.antes.clone();
        let blinds = self.blinds.clone();
        self.post(&antes, false);
        self.post(&blinds, true);
        self.move_action();
        self.move_action();
        Ok(self.observation())
    }

    /// Applies one bet for the seat holding the action. Negative bets
    /// carry fold intent; every bet is snapped to the nearest of fold,
    /// call, min raise or max raise, ties resolved pessimistically.
    /// Stepping a finished hand is a no-op until the table is reset.
    pub fn step(
        &mut self,
        bet: Chips,
    ) -> Result<(Observation, Vec<Chips>, Vec<bool>), crate::Error> {
        let Some(actor) = self.action else {
            if self.active.iter().any(|&a| a) {
                return Ok(self.output());
            }
            return Err(crate::Error::TableReset);
        };

        let fold = bet < 0;
        let (call, min_raise, max_raise) = self.bet_sizes(actor);
        let mut bet = Self::snap_bet(bet, call, min_raise, max_raise);

        // only fold when checking is not free
        if call > 0 && (bet < call || fold) {
            self.active[actor] = false;
            bet = 0;
        }

        // a full raise resets the bar and reopens the betting
        if bet > 0 && bet - call >= self.largest_raise {
            self.largest_raise = bet - call;
            self.street_raises += 1;
        }

        self.collect_bet(actor, bet);
        log::trace!("seat {} puts in {} (fold: {})", actor, bet, fold);
        self.history.push(ActionRecord {
            seat: actor,
            bet,
            folded: fold,
        });
        self.street_option[actor] = true;
        self.move_action();

        if self.all_agreed() {
            self.action = Some(self.button);
            self.move_action();
            // deal remaining streets in one go once nobody can act
            loop {
                self.street += 1;
                if self.street >= self.num_streets {
                    break;
                }
                let reveal = self.deck.draw(self.num_community_cards[self.street]);
                self.community_cards.extend(reveal);
                log::trace!("street {} dealt", self.street);
                let all_in = (0..self.num_players)
                    .filter(|&i| self.active[i] && self.stacks[i] == 0)
                    .count();
                let playing = self.active.iter().filter(|&&a| a).count();
                if playing - all_in > 1 {
                    break;
                }
            }
            self.street_commits = vec![0; self.num_players];
            self.street_option = self.active.iter().map(|&a| !a).collect();
            self.street_raises = 0;
        }

        Ok(self.output())
    }

    /// Render-facing view of the table, valid at any point in the hand.
    pub fn snapshot(&self) -> Snapshot {
        let done = self.done();
        Snapshot {
            action: self.action,
            active: self.active.clone(),
            all_in: (0..self.num_players)
                .map(|i| self.active[i] && self.stacks[i] == 0)
                .collect(),
            button: self.button,
            community_cards: self.community_cards.clone(),
            done: done.iter().all(|&d| d),
            hole_cards: self.hole_cards.clone(),
            pot: self.pot,
            payouts: self.outcome(),
            prev_action: self.history.last().copied(),
            stacks: self.stacks.clone(),
            street_commits: self.street_commits.clone(),
        }
    }

    //

    fn output(&mut self) -> (Observation, Vec<Chips>, Vec<bool>) {
        let done = self.done();
        let payouts = self.outcome();
        if done.iter().all(|&d| d) && self.action.is_some() {
            self.settle(&payouts);
            self.action = None;
        }
        (self.observation(), payouts, done)
    }

    /// Winners collect their share exactly once, at the transition to
    /// terminal. The per-seat credit `payout + pot_commit` is zero for
    /// folded seats and showdown losers.
    fn settle(&mut self, payouts: &[Chips]) {
        log::debug!("hand over, payouts {:?}", payouts);
        for (seat, &payout) in payouts.iter().enumerate() {
            self.stacks[seat] += payout + self.pot_commit[seat];
        }
    }

    fn observation(&self) -> Observation {
        let done = self.done().iter().all(|&d| d);
        let (action, call, min_raise, max_raise) = match done {
            true => (None, 0, 0, 0),
            false => {
                let actor = self.action.expect("a live hand has an actor");
                let (call, min_raise, max_raise) = self.bet_sizes(actor);
                (Some(actor), call, min_raise, max_raise)
            }
        };
        Observation {
            action,
            active: self.active.clone(),
            button: self.button,
            call,
            community_cards: self.community_cards.clone(),
            hole_cards: self.hole_cards.clone(),
            max_raise,
            min_raise,
            pot: self.pot,
            stacks: self.stacks.clone(),
            street_commits: self.street_commits.clone(),
        }
    }

    fn done(&self) -> Vec<bool> {
        let playing = self.active.iter().filter(|&&a| a).count();
        if self.street >= self.num_streets || playing <= 1 {
            return vec![true; self.num_players];
        }
        self.active.iter().map(|&a| !a).collect()
    }

    /// Net payoff per seat for the hand so far: folded seats are down
    /// their commitment, and a finished hand folds in the showdown
    /// winnings.
    fn outcome(&self) -> Vec<Chips> {
        let mut payouts = (0..self.num_players)
            .map(|i| match self.active[i] {
                true => 0,
                false => -self.pot_commit[i],
            })
            .collect::<Vec<Chips>>();
        let playing = self.active.iter().filter(|&&a| a).count();
        if playing == 1 {
            for i in 0..self.num_players {
                if self.active[i] {
                    payouts[i] += self.pot - self.pot_commit[i];
                }
            }
        } else if self.street >= self.num_streets {
            let winnings = self.eval_round();
            payouts = (0..self.num_players)
                .map(|i| winnings[i] - self.pot_commit[i])
                .collect();
        }
        payouts
    }

    fn eval_round(&self) -> Vec<Chips> {
        let worst = self.evaluator.table().max_rank() + 1;
        let entries = (0..self.num_players)
            .map(|seat| {
                let strength = match self.active[seat] {
                    true => self
                        .evaluator
                        .evaluate(&self.hole_cards[seat], &self.community_cards),
                    false => worst,
                };
                (seat, strength, self.pot_commit[seat])
            })
            .collect::<Vec<_>>();
        Showdown::new(entries, self.button, worst).settle()
    }

    /// Legal bet bounds for the actor on the current street: the call
    /// amount plus the minimum and maximum raise-to totals, all clipped
    /// by the actor's stack.
    fn bet_sizes(&self, actor: usize) -> (Chips, Chips, Chips) {
        let top = self.street_commits.iter().max().copied().unwrap_or(0);
        let call = top - self.street_commits[actor];
        let (mut min_raise, mut max_raise) = match self.raise_sizes[self.street] {
            RaiseSize::Fixed(size) => (size + call, size + call),
            RaiseSize::Pot => (
                self.big_blind.max(self.largest_raise + call),
                self.pot + 2 * call,
            ),
            RaiseSize::NoLimit => (
                self.big_blind.max(self.largest_raise + call),
                self.stacks[actor],
            ),
        };
        if !self.num_raises[self.street].allows(self.street_raises) {
            min_raise = 0;
            max_raise = 0;
        }
        // facing an incomplete all-in: the betting is not reopened, the
        // seat that made the last full raise may only call or fold
        if self.street_raises > 0 && call < self.largest_raise {
            min_raise = 0;
            max_raise = 0;
        }
        let call = call.min(self.stacks[actor]);
        let min_raise = min_raise.min(self.stacks[actor]);
        let max_raise = max_raise.min(self.stacks[actor]);
        (call, min_raise, max_raise)
    }

    /// Snaps to the nearest of fold, call, min raise, max raise; ties
    /// break toward the earlier (smaller) option.
    fn snap_bet(bet: Chips, call: Chips, min_raise: Chips, max_raise: Chips) -> Chips {
        let options = [0, call, min_raise, max_raise];
        let nearest = options
            .iter()
            .enumerate()
            .min_by_key(|&(_, &option)| (option - bet).abs())
            .map(|(i, _)| i)
            .expect("four options");
        match nearest {
            1 => call,
            2 | 3 => max_raise.min(min_raise.max(bet)),
            _ => 0,
        }
    }

    fn collect_bet(&mut self, actor: usize, bet: Chips) {
        let bet = bet.min(self.stacks[actor]);
        self.pot += bet;
        self.pot_commit[actor] += bet;
        self.street_commits[actor] += bet;
        self.stacks[actor] -= bet;
    }

    /// Forced contributions scheduled from the current action seat
    /// outwards. Antes are not street commits; blinds are.
    fn post(&mut self, bets: &[Chips], street_commit: bool) {
        let start = self.action.expect("posting happens with a live actor");
        for (i, &amount) in bets.iter().enumerate() {
            let seat = (start + i) % self.num_players;
            if !self.active[seat] || self.stacks[seat] == 0 {
                continue;
            }
            let amount = amount.min(self.stacks[seat]);
            if street_commit {
                self.street_commits[seat] += amount;
            }
            self.pot_commit[seat] += amount;
            self.pot += amount;
            self.stacks[seat] -= amount;
        }
    }

    /// Everyone has had the option and is either matched, all in, or out.
    fn all_agreed(&self) -> bool {
        if !self.street_option.iter().all(|&o| o) {
            return false;
        }
        let top = self.street_commits.iter().max().copied().unwrap_or(0);
        (0..self.num_players)
            .all(|i| self.street_commits[i] == top || self.stacks[i] == 0 || !self.active[i])
    }

    /// Hands the action to the next active seat; inactive seats passed
    /// over are marked as having had their option.
    fn move_action(&mut self) {
        let current = self.action.expect("rotation happens with a live actor");
        let mut next = current;
        for step in 1..=self.num_players {
            next = (current + step) % self.num_players;
            if self.active[next] {
                break;
            }
            self.street_option[next] = true;
        }
        self.action = Some(next);
    }
}
