//! Card types (Suit/Rank/Card).
//!
//! Small enums and a small struct that compile down to integer operations.
//! Every card has a stable id in 0..52 (`suit * 13 + rank`), which is the
//! bit position used by [`CardSet`](crate::CardSet).

use std::fmt;
use std::str::FromStr;

use crate::error::EquityError;

/// A playing card suit.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[inline(always)]
    pub const fn idx(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn from_u8(x: u8) -> Suit {
        match x & 0x3 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// A playing card rank, stored as 0..12 (Two..Ace) so it lines up with a
/// 13-bit rank mask.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    #[inline(always)]
    pub const fn idx(self) -> u8 {
        self as u8
    }

    /// Convert 0..12 to a Rank (Two..Ace). Out of range input saturates to Ace.
    #[inline(always)]
    pub const fn from_u8(x: u8) -> Rank {
        match x {
            0 => Rank::Two,
            1 => Rank::Three,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            _ => Rank::Ace,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A card = suit + rank.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[inline(always)]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// suit = id / 13, rank = id % 13. Ids above 51 wrap onto Spades.
    #[inline(always)]
    pub const fn from_id(id: u8) -> Self {
        let suit = Suit::from_u8(id / 13);
        let rank = Rank::from_u8(id % 13);
        Self { suit, rank }
    }

    /// Inverse of [`Card::from_id`].
    #[inline(always)]
    pub const fn id(self) -> u8 {
        (self.suit as u8) * 13 + (self.rank as u8)
    }

    #[inline(always)]
    pub const fn bit(self) -> u64 {
        1u64 << self.id()
    }

    /// The 52 standard cards in id order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0u8..52).map(Card::from_id)
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id().cmp(&other.id())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = EquityError;

    /// Parses `"As"`, `"td"`, `"10h"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || EquityError::InvalidCard(s.to_string());
        if !s.is_ascii() {
            return Err(invalid());
        }
        let (rank, suit) = match s.len() {
            2 => (&s[..1], &s[1..]),
            3 if s.starts_with("10") => ("T", &s[2..]),
            _ => return Err(invalid()),
        };
        let rank = rank.chars().next().and_then(Rank::from_char).ok_or_else(invalid)?;
        let suit = suit.chars().next().and_then(Suit::from_char).ok_or_else(invalid)?;
        Ok(Card::new(suit, rank))
    }
}

/// Parse a run of concatenated cards such as `"AsKdQh"` or `"10hJs"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, EquityError> {
    let invalid = || EquityError::InvalidCard(s.to_string());
    let compact: String = s.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
    if !compact.is_ascii() {
        return Err(invalid());
    }
    let mut cards = Vec::with_capacity(compact.len() / 2);
    let mut rest = compact.as_str();
    while !rest.is_empty() {
        let len = if rest.starts_with("10") { 3 } else { 2 };
        let token = rest.get(..len).ok_or_else(invalid)?;
        cards.push(token.parse()?);
        rest = &rest[len..];
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip_covers_deck() {
        for id in 0u8..52 {
            assert_eq!(Card::from_id(id).id(), id);
        }
        assert_eq!(Card::all().count(), 52);
    }

    #[test]
    fn parse_and_display() {
        let c: Card = "As".parse().unwrap();
        assert_eq!(c, Card::new(Suit::Spades, Rank::Ace));
        assert_eq!(c.to_string(), "As");

        let t: Card = "10h".parse().unwrap();
        assert_eq!(t, Card::new(Suit::Hearts, Rank::Ten));
        assert_eq!("tD".parse::<Card>().unwrap(), Card::new(Suit::Diamonds, Rank::Ten));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("Ax".parse::<Card>().is_err());
        assert!("1s".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
        assert!(parse_cards("AsK").is_err());
    }

    #[test]
    fn parse_card_runs() {
        let cards = parse_cards("AsKd Qh").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2], Card::new(Suit::Hearts, Rank::Queen));

        let tens = parse_cards("10hJs 10c").unwrap();
        assert_eq!(
            tens,
            vec![
                Card::new(Suit::Hearts, Rank::Ten),
                Card::new(Suit::Spades, Rank::Jack),
                Card::new(Suit::Clubs, Rank::Ten),
            ]
        );
        assert!(parse_cards("10").is_err());
    }
}
