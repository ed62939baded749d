//! Error types.

use thiserror::Error;

use crate::card::Card;

/// Everything an equity calculation can reject or fail with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquityError {
    /// Card text that is not a rank followed by a suit
    #[error("invalid card: {0:?}")]
    InvalidCard(String),

    /// Hand text that is not two distinct cards
    #[error("invalid hand: {0:?}")]
    InvalidHand(String),

    /// Malformed range text or weight
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The same card was used twice across hands, board and dead cards
    #[error("card {0} is used more than once")]
    DuplicateCard(Card),

    #[error("a board holds at most 5 cards, got {0}")]
    TooManyBoardCards(usize),

    #[error("no participants to calculate equity for")]
    NoParticipants,

    /// The deck cannot cover every hand plus the rest of the board
    #[error("not enough cards left to deal: need {needed}, have {available}")]
    NotEnoughCards { needed: usize, available: usize },

    #[error("range has no hands with a positive weight")]
    EmptyRange,

    /// No hand of one range is card-disjoint from any hand of the other
    #[error("ranges #{first} and #{second} cannot be dealt together: every pair of their hands shares a card")]
    RangeOverlap { first: usize, second: usize },

    /// Every hand of the range collides with the board or the dead cards
    #[error("range #{range} has no hand that avoids the board and dead cards")]
    RangeBlocked { range: usize },

    /// Rejection sampling did not find a card-disjoint deal in time
    #[error("no card-disjoint deal found for the ranges after {attempts} draws")]
    SamplerExhausted { attempts: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

#[cfg(feature = "parallel")]
impl From<rayon::ThreadPoolBuildError> for EquityError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        EquityError::ThreadPool(e.to_string())
    }
}

/// Result type alias for equity operations
pub type Result<T> = std::result::Result<T, EquityError>;
