//! Calculation settings.
//!
//! An [`EquityConfig`] is built once and then only read. Calculations take
//! it by reference, so one config can drive any number of calls.
//!
//! ```ignore
//! let config = EquityConfig::builder()
//!     .sample_size(50_000)
//!     .board("AsKd7h".parse()?)
//!     .dead_card("2c".parse()?)
//!     .build()?;
//! ```

use std::sync::Arc;

use crate::board::Board;
use crate::card::Card;
use crate::cardset::CardSet;
use crate::error::EquityError;
use crate::evaluator::{DefaultEvaluator, Evaluator};

pub const DEFAULT_SAMPLE_SIZE: u32 = 25_000;

/// Sampler draws allowed per trial before a range calculation gives up.
pub const DEFAULT_MAX_SAMPLE_ATTEMPTS: u32 = 100_000;

#[derive(Clone, Debug)]
pub struct EquityConfig {
    sample_size: u32,
    evaluator: Arc<dyn Evaluator>,
    board: Board,
    dead: Vec<Card>,
    workers: Option<usize>,
    max_sample_attempts: u32,
    seed: Option<u64>,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            evaluator: Arc::new(DefaultEvaluator),
            board: Board::new(),
            dead: Vec::new(),
            workers: None,
            max_sample_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
            seed: None,
        }
    }
}

impl EquityConfig {
    pub fn builder() -> EquityConfigBuilder {
        EquityConfigBuilder::default()
    }

    /// Number of trials per calculation.
    #[inline]
    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    #[inline]
    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn dead_cards(&self) -> &[Card] {
        &self.dead
    }

    /// Board and dead cards together: nothing may be dealt from here.
    pub fn blocked(&self) -> CardSet {
        self.board.mask().union(CardSet::from_cards(self.dead.iter().copied()))
    }

    /// Worker thread count, `None` for the shared rayon pool.
    #[inline]
    pub fn workers(&self) -> Option<usize> {
        self.workers
    }

    #[inline]
    pub fn max_sample_attempts(&self) -> u32 {
        self.max_sample_attempts
    }

    /// Explicit master seed; when unset it is derived from the participants.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[derive(Debug, Default)]
pub struct EquityConfigBuilder {
    config: EquityConfig,
}

impl EquityConfigBuilder {
    pub fn sample_size(mut self, n: u32) -> Self {
        self.config.sample_size = n;
        self
    }

    pub fn evaluator<E: Evaluator + 'static>(mut self, evaluator: E) -> Self {
        self.config.evaluator = Arc::new(evaluator);
        self
    }

    pub fn board(mut self, board: Board) -> Self {
        self.config.board = board;
        self
    }

    /// Adds to the dead cards already set.
    pub fn dead_card(mut self, card: Card) -> Self {
        self.config.dead.push(card);
        self
    }

    pub fn dead_cards<I: IntoIterator<Item = Card>>(mut self, cards: I) -> Self {
        self.config.dead.extend(cards);
        self
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.config.workers = Some(n);
        self
    }

    pub fn max_sample_attempts(mut self, n: u32) -> Self {
        self.config.max_sample_attempts = n;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(mut self) -> Result<EquityConfig, EquityError> {
        let c = &mut self.config;
        if c.sample_size == 0 {
            return Err(EquityError::InvalidConfig("sample size must be positive"));
        }
        if c.workers == Some(0) {
            return Err(EquityError::InvalidConfig("worker count must be positive"));
        }
        if c.max_sample_attempts == 0 {
            return Err(EquityError::InvalidConfig("max sample attempts must be positive"));
        }

        // repeated dead cards are harmless; dead cards on the board are not
        c.dead.sort();
        c.dead.dedup();
        let board = c.board.mask();
        if let Some(&card) = c.dead.iter().find(|&&d| board.contains(d)) {
            return Err(EquityError::DuplicateCard(card));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = EquityConfig::builder().build().unwrap();
        assert_eq!(c.sample_size(), DEFAULT_SAMPLE_SIZE);
        assert!(c.board().is_empty());
        assert!(c.dead_cards().is_empty());
        assert_eq!(c.workers(), None);
        assert_eq!(c.seed(), None);
        assert_eq!(c.max_sample_attempts(), DEFAULT_MAX_SAMPLE_ATTEMPTS);
    }

    #[test]
    fn dead_cards_accumulate() {
        let c = EquityConfig::builder()
            .dead_card("2c".parse().unwrap())
            .dead_cards(["3d".parse().unwrap(), "2c".parse().unwrap()])
            .board("AsKsQs".parse().unwrap())
            .build()
            .unwrap();
        assert_eq!(c.dead_cards().len(), 2);
        assert_eq!(c.blocked().len(), 5);
    }

    #[test]
    fn rejects_invalid_settings() {
        assert!(matches!(
            EquityConfig::builder().sample_size(0).build(),
            Err(EquityError::InvalidConfig(_))
        ));
        assert!(matches!(
            EquityConfig::builder().workers(0).build(),
            Err(EquityError::InvalidConfig(_))
        ));
        assert!(matches!(
            EquityConfig::builder().max_sample_attempts(0).build(),
            Err(EquityError::InvalidConfig(_))
        ));
        let ace: Card = "As".parse().unwrap();
        assert_eq!(
            EquityConfig::builder()
                .board("AsKsQs".parse().unwrap())
                .dead_card(ace)
                .build()
                .unwrap_err(),
            EquityError::DuplicateCard(ace)
        );
    }
}
