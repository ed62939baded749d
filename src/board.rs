//! Community cards and streets.

use std::fmt;
use std::str::FromStr;

use crate::card::{parse_cards, Card};
use crate::cardset::CardSet;
use crate::deck::Deck;
use crate::error::EquityError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Number of community cards showing on this street.
    pub const fn cards(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub fn of(n: usize) -> Option<Street> {
        match n {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }
}

/// 0..=5 distinct community cards, in deal order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Card>", into = "Vec<Card>"))]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX_CARDS: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards<I: IntoIterator<Item = Card>>(iter: I) -> Result<Self, EquityError> {
        let cards: Vec<Card> = iter.into_iter().collect();
        if cards.len() > Self::MAX_CARDS {
            return Err(EquityError::TooManyBoardCards(cards.len()));
        }
        let mut seen = CardSet::new();
        for &c in &cards {
            if seen.insert(c) {
                return Err(EquityError::DuplicateCard(c));
            }
        }
        Ok(Self { cards })
    }

    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[inline]
    pub fn mask(&self) -> CardSet {
        CardSet::from_cards(self.cards.iter().copied())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still to come before the river.
    #[inline]
    pub fn missing(&self) -> usize {
        Self::MAX_CARDS.saturating_sub(self.cards.len())
    }

    /// The street this board is on, if the card count matches one.
    pub fn street(&self) -> Option<Street> {
        Street::of(self.cards.len())
    }

    /// Deal forward from `deck` until the board shows `street`. A board already
    /// past `street` comes back unchanged. The caller must have popped this
    /// board's cards from `deck`.
    pub fn convert(&self, street: Street, deck: &mut Deck) -> Result<Board, EquityError> {
        let mut cards = self.cards.clone();
        while cards.len() < street.cards() {
            let card = deck.deal().ok_or(EquityError::NotEnoughCards {
                needed: street.cards() - cards.len(),
                available: 0,
            })?;
            cards.push(card);
        }
        Ok(Board { cards })
    }

    #[inline]
    pub fn river(&self, deck: &mut Deck) -> Result<Board, EquityError> {
        self.convert(Street::River, deck)
    }
}

impl TryFrom<Vec<Card>> for Board {
    type Error = EquityError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Board::from_cards(cards)
    }
}

impl From<Board> for Vec<Card> {
    fn from(board: Board) -> Self {
        board.cards
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.cards {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_cards(parse_cards(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn parse_and_street() {
        let b: Board = "AsKdQh".parse().unwrap();
        assert_eq!(b.street(), Some(Street::Flop));
        assert_eq!(b.missing(), 2);
        assert_eq!(b.to_string(), "AsKdQh");
        assert_eq!(Board::new().street(), Some(Street::Preflop));
    }

    #[test]
    fn rejects_bad_boards() {
        assert!(matches!("AsKdQhJcTc9c".parse::<Board>(), Err(EquityError::TooManyBoardCards(6))));
        assert!(matches!("AsAs".parse::<Board>(), Err(EquityError::DuplicateCard(_))));

        let six = parse_cards("AsKdQhJcTc9c").unwrap();
        assert!(matches!(Board::try_from(six), Err(EquityError::TooManyBoardCards(6))));
    }

    #[test]
    fn ten_prefix_in_a_run() {
        let b: Board = "10hJs2c".parse().unwrap();
        assert_eq!(b.to_string(), "ThJs2c");
    }

    #[test]
    fn convert_deals_forward_to_river() {
        let mut rng = SmallRng::seed_from_u64(3);
        let flop: Board = "AsKdQh".parse().unwrap();
        let mut deck = Deck::shuffled(&mut rng);
        deck.pop_all(flop.cards());

        let turn = flop.convert(Street::Turn, &mut deck).unwrap();
        assert_eq!(turn.len(), 4);
        assert_eq!(&turn.cards()[..3], flop.cards());

        let river = turn.river(&mut deck).unwrap();
        assert_eq!(river.len(), 5);
        assert_eq!(river.mask().len(), 5);
        assert_eq!(deck.len(), 52 - 5);

        // already past the flop: unchanged
        assert_eq!(river.convert(Street::Flop, &mut deck).unwrap(), river);
    }
}
