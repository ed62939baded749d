//! Equity accumulation and results.
//!
//! Trials are folded into a [`Tally`] of raw counts. A worker owns its tally
//! exclusively; tallies from different workers are combined with
//! [`Tally::merge`]. [`Tally::finish`] consumes the tally and yields the
//! read-only [`Equities`], so a result can be normalized only once.

use std::fmt;
use std::ops::Index;

/// Pot shares are counted in units of 1/lcm(1..=23), so a k-way split adds an
/// exact integer for every k a deck allows (at most 23 players) and merging
/// tallies in any order gives the same result.
pub const SHARE_UNIT: u128 = 5_354_228_880;

/// Outcome of one participant in one trial.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Win,
    /// Tied for best with `ways - 1` others.
    Split { ways: u32 },
    Lose,
}

/// Raw per-participant counts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Counts {
    pub win: u64,
    pub lose: u64,
    pub split: u64,
    /// Pot shares won in [`SHARE_UNIT`]s: one unit per win, 1/k per k-way split.
    pub share: u128,
}

impl Counts {
    #[inline(always)]
    pub fn total(&self) -> u64 {
        self.win + self.lose + self.split
    }

    #[inline(always)]
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => {
                self.win += 1;
                self.share += SHARE_UNIT;
            }
            Outcome::Split { ways } => {
                self.split += 1;
                self.share += SHARE_UNIT / ways.max(1) as u128;
            }
            Outcome::Lose => self.lose += 1,
        }
    }

    #[inline]
    fn merge(&mut self, other: &Counts) {
        self.win += other.win;
        self.lose += other.lose;
        self.split += other.split;
        self.share += other.share;
    }
}

/// Counts for every participant over some number of trials.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tally {
    counts: Vec<Counts>,
    trials: u64,
}

impl Tally {
    pub fn new(participants: usize) -> Self {
        Self { counts: vec![Counts::default(); participants], trials: 0 }
    }

    /// Record one trial: `outcomes[i]` belongs to participant `i`.
    pub fn record(&mut self, outcomes: &[Outcome]) {
        debug_assert_eq!(outcomes.len(), self.counts.len());
        for (c, &o) in self.counts.iter_mut().zip(outcomes) {
            c.record(o);
        }
        self.trials += 1;
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        debug_assert_eq!(self.counts.len(), other.counts.len());
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            a.merge(b);
        }
        self.trials += other.trials;
        self
    }

    #[inline]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    #[inline]
    pub fn counts(&self) -> &[Counts] {
        &self.counts
    }

    /// Normalize against the trial count and pair each result with its participant.
    pub fn finish<P>(self, participants: Vec<P>) -> Equities<P> {
        debug_assert_eq!(participants.len(), self.counts.len());
        let trials = self.trials;
        let entries = participants
            .into_iter()
            .zip(self.counts)
            .map(|(p, c)| (p, Equity::from_counts(&c, trials)))
            .collect();
        Equities { entries }
    }
}

/// How often a participant wins, loses or splits, as decimals.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equity {
    win: f64,
    lose: f64,
    split: f64,
    share: f64,
    samples: u64,
}

impl Equity {
    fn from_counts(c: &Counts, trials: u64) -> Self {
        if trials == 0 {
            return Self { win: 0.0, lose: 0.0, split: 0.0, share: 0.0, samples: 0 };
        }
        let t = trials as f64;
        Self {
            win: c.win as f64 / t,
            lose: c.lose as f64 / t,
            split: c.split as f64 / t,
            share: (c.share as f64 / SHARE_UNIT as f64) / t,
            samples: trials,
        }
    }

    #[inline]
    pub fn win(&self) -> f64 {
        self.win
    }

    #[inline]
    pub fn lose(&self) -> f64 {
        self.lose
    }

    #[inline]
    pub fn split(&self) -> f64 {
        self.split
    }

    /// Expected share of the pot: wins plus each split divided among its winners.
    #[inline]
    pub fn equity(&self) -> f64 {
        self.share
    }

    #[inline]
    pub fn samples(&self) -> u64 {
        self.samples
    }
}

impl fmt::Display for Equity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[win={} lose={} split={}]", self.win, self.lose, self.split)
    }
}

/// Participants paired with their equity, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct Equities<P> {
    entries: Vec<(P, Equity)>,
}

impl<P> Equities<P> {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&P, &Equity)> {
        self.entries.iter().map(|(p, e)| (p, e))
    }

    pub fn into_vec(self) -> Vec<(P, Equity)> {
        self.entries
    }
}

impl<P: PartialEq> Equities<P> {
    /// Equity of the first participant equal to `participant`.
    pub fn get(&self, participant: &P) -> Option<&Equity> {
        self.entries.iter().find(|(p, _)| p == participant).map(|(_, e)| e)
    }
}

impl<P> Index<usize> for Equities<P> {
    type Output = Equity;

    fn index(&self, i: usize) -> &Equity {
        &self.entries[i].1
    }
}

impl<P> IntoIterator for Equities<P> {
    type Item = (P, Equity);
    type IntoIter = std::vec::IntoIter<(P, Equity)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
