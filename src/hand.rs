//! Two hole cards.

use std::fmt;
use std::str::FromStr;

use crate::card::{parse_cards, Card};
use crate::cardset::CardSet;
use crate::error::EquityError;

/// An immutable pair of distinct cards, stored higher id first so that
/// `AhKh` and `KhAh` are the same hand.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[Card; 2]", into = "[Card; 2]"))]
pub struct Hand {
    hi: Card,
    lo: Card,
}

impl Hand {
    pub fn new(a: Card, b: Card) -> Result<Self, EquityError> {
        if a == b {
            return Err(EquityError::InvalidHand(format!("{a}{b}")));
        }
        Ok(if a.id() > b.id() { Self { hi: a, lo: b } } else { Self { hi: b, lo: a } })
    }

    #[inline(always)]
    pub const fn cards(&self) -> [Card; 2] {
        [self.hi, self.lo]
    }

    #[inline(always)]
    pub const fn mask(&self) -> CardSet {
        CardSet::from_bits(self.hi.bit() | self.lo.bit())
    }

    #[inline(always)]
    pub const fn is_disjoint(&self, other: &Hand) -> bool {
        self.mask().is_disjoint(other.mask())
    }

    pub fn is_pair(&self) -> bool {
        self.hi.rank == self.lo.rank
    }

    pub fn is_suited(&self) -> bool {
        self.hi.suit == self.lo.suit
    }
}

impl TryFrom<[Card; 2]> for Hand {
    type Error = EquityError;

    fn try_from([a, b]: [Card; 2]) -> Result<Self, Self::Error> {
        Hand::new(a, b)
    }
}

impl From<Hand> for [Card; 2] {
    fn from(hand: Hand) -> Self {
        hand.cards()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.hi, self.lo)
    }
}

impl FromStr for Hand {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_cards(s)
            .map_err(|_| EquityError::InvalidHand(s.to_string()))?
            .as_slice()
        {
            &[a, b] => Hand::new(a, b),
            _ => Err(EquityError::InvalidHand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_does_not_matter() {
        let a: Hand = "AhKh".parse().unwrap();
        let b: Hand = "KhAh".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "AhKh");
        assert!(a.is_suited());
        assert!(!a.is_pair());
    }

    #[test]
    fn rejects_same_card_twice() {
        assert!("AhAh".parse::<Hand>().is_err());
        assert!("AhKhQh".parse::<Hand>().is_err());

        let ace: Card = "Ah".parse().unwrap();
        assert!(matches!(Hand::try_from([ace, ace]), Err(EquityError::InvalidHand(_))));
        assert_eq!("10hAh".parse::<Hand>().unwrap().to_string(), "AhTh");
    }

    #[test]
    fn disjointness() {
        let a: Hand = "AhKh".parse().unwrap();
        let b: Hand = "AhQd".parse().unwrap();
        let c: Hand = "2c2d".parse().unwrap();
        assert!(!a.is_disjoint(&b));
        assert!(a.is_disjoint(&c));
        assert_eq!(a.mask().len(), 2);
    }
}
