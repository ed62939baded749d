//! One Monte Carlo trial: shuffle, deal the board to the river, rank, classify.

use rand::Rng;

use crate::board::Board;
use crate::config::EquityConfig;
use crate::deck::Deck;
use crate::equity::Outcome;
use crate::error::EquityError;
use crate::hand::Hand;

/// Classify ranks (lower is stronger) into per-participant outcomes.
///
/// A lone best rank wins; a best rank shared by `k` participants splits `k`
/// ways. Everyone else loses.
pub fn classify(ranks: &[u32], out: &mut Vec<Outcome>) {
    out.clear();
    let Some(&best) = ranks.iter().min() else {
        return;
    };
    let ways = ranks.iter().filter(|&&r| r == best).count() as u32;
    out.extend(ranks.iter().map(|&r| match (r == best, ways) {
        (false, _) => Outcome::Lose,
        (true, 1) => Outcome::Win,
        (true, ways) => Outcome::Split { ways },
    }));
}

/// Runs trials for a fixed config, reusing its buffers between trials.
/// Each worker owns one.
#[derive(Debug)]
pub struct Simulator<'a> {
    config: &'a EquityConfig,
    ranks: Vec<u32>,
    outcomes: Vec<Outcome>,
}

impl<'a> Simulator<'a> {
    pub fn new(config: &'a EquityConfig) -> Self {
        Self { config, ranks: Vec::new(), outcomes: Vec::new() }
    }

    /// Deal the rest of the board around `hands` and classify the showdown.
    /// `hands` must be card-disjoint from each other, the board and the dead cards.
    pub fn run<R: Rng + ?Sized>(&mut self, hands: &[Hand], rng: &mut R) -> Result<&[Outcome], EquityError> {
        let board = self.river(hands, rng)?;
        let evaluator = self.config.evaluator();
        self.ranks.clear();
        self.ranks.extend(hands.iter().map(|h| evaluator.rank(h, &board)));
        classify(&self.ranks, &mut self.outcomes);
        Ok(&self.outcomes)
    }

    /// A complete board drawn from a fresh shuffled deck with every known card removed.
    pub fn river<R: Rng + ?Sized>(&self, hands: &[Hand], rng: &mut R) -> Result<Board, EquityError> {
        let mut deck = Deck::shuffled(rng);
        for hand in hands {
            deck.pop_hand(hand);
        }
        deck.pop_all(self.config.dead_cards());
        deck.pop_all(self.config.board().cards());
        self.config.board().river(&mut deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardset::CardSet;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn classify_single_winner() {
        let mut out = Vec::new();
        classify(&[40, 10, 99], &mut out);
        assert_eq!(out, vec![Outcome::Lose, Outcome::Win, Outcome::Lose]);
    }

    #[test]
    fn classify_ties_are_exact() {
        let mut out = Vec::new();
        classify(&[10, 10, 11], &mut out);
        assert_eq!(out, vec![Outcome::Split { ways: 2 }, Outcome::Split { ways: 2 }, Outcome::Lose]);

        classify(&[7], &mut out);
        assert_eq!(out, vec![Outcome::Win]);

        classify(&[], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn three_way_split_on_a_royal_board() {
        let config = EquityConfig::builder()
            .board("AsKsQsJsTs".parse().unwrap())
            .sample_size(1)
            .build()
            .unwrap();
        let hands = [hand("2c3c"), hand("2d3d"), hand("2h3h")];
        let mut sim = Simulator::new(&config);
        let out = sim.run(&hands, &mut SmallRng::seed_from_u64(0)).unwrap();
        assert_eq!(out, &[Outcome::Split { ways: 3 }; 3]);
    }

    #[test]
    fn river_avoids_known_cards() {
        let config = EquityConfig::builder()
            .board("Ah7c".parse().unwrap())
            .dead_cards(["2s".parse().unwrap(), "3s".parse().unwrap()])
            .build()
            .unwrap();
        let hands = [hand("KdKh"), hand("QcJc")];
        let known = hands
            .iter()
            .fold(config.dead_cards().iter().copied().collect::<CardSet>(), |acc, h| acc.union(h.mask()));

        let sim = Simulator::new(&config);
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..200 {
            let board = sim.river(&hands, &mut rng).unwrap();
            assert_eq!(board.len(), 5);
            assert_eq!(&board.cards()[..2], config.board().cards());
            assert!(board.mask().is_disjoint(known));
        }
    }
}
