//! Monte Carlo equity for Texas Hold'em hands and ranges.
//!
//! Build an [`EquityConfig`], then call [`calculate_hands`] or
//! [`calculate_ranges`]. Hand ranks come from an [`Evaluator`]; the bundled
//! [`DefaultEvaluator`] is a bitmask 7-card evaluator.

pub mod card;
pub mod cardset;
pub mod score;
pub mod evaluator;
pub mod hand;
pub mod board;
pub mod deck;
pub mod range;
pub mod error;
pub mod config;
pub mod equity;
pub mod sampler;
pub mod simulation;
pub mod calculator;

pub use card::{parse_cards, Card, Rank, Suit};
pub use cardset::{CardSet, MASK13};
pub use score::{Category, Score};
pub use evaluator::{evaluate, DefaultEvaluator, Evaluator};
pub use hand::Hand;
pub use board::{Board, Street};
pub use deck::Deck;
pub use range::Range;
pub use error::{EquityError, Result};
pub use config::{EquityConfig, EquityConfigBuilder, DEFAULT_MAX_SAMPLE_ATTEMPTS, DEFAULT_SAMPLE_SIZE};
pub use equity::{Counts, Equities, Equity, Outcome, Tally, SHARE_UNIT};
pub use sampler::{validate_hands, validate_ranges, Sampler, RESTART_AFTER};
pub use simulation::{classify, Simulator};
pub use calculator::{calculate_hands, calculate_ranges};
