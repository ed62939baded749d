//! 52-bit card set, one bit per card id.
//!
//! Used for collision checks (hands, board, dead cards) and as the input of
//! the evaluator, which reads it back as a 4×13 suit/rank grid.

use crate::card::{Card, Suit};

pub const MASK13: u16 = (1u16 << 13) - 1;
const MASK52: u64 = (1u64 << 52) - 1;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct CardSet(u64);

impl CardSet {
    #[inline(always)]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline(always)]
    pub const fn full() -> Self {
        Self(MASK52)
    }

    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & MASK52)
    }

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn from_cards<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut s = Self::new();
        for c in iter {
            s.insert(c);
        }
        s
    }

    /// Returns true if the card was already present.
    #[inline(always)]
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = card.bit();
        let already = (self.0 & bit) != 0;
        self.0 |= bit;
        already
    }

    #[inline(always)]
    pub fn remove(&mut self, card: Card) {
        self.0 &= !card.bit();
    }

    #[inline(always)]
    pub const fn contains(self, card: Card) -> bool {
        (self.0 & card.bit()) != 0
    }

    #[inline(always)]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn union(self, other: CardSet) -> CardSet {
        CardSet(self.0 | other.0)
    }

    #[inline(always)]
    pub const fn intersection(self, other: CardSet) -> CardSet {
        CardSet(self.0 & other.0)
    }

    #[inline(always)]
    pub const fn is_disjoint(self, other: CardSet) -> bool {
        (self.0 & other.0) == 0
    }

    /// Lowest-id card in the set.
    #[inline]
    pub fn first(self) -> Option<Card> {
        if self.0 == 0 {
            None
        } else {
            Some(Card::from_id(self.0.trailing_zeros() as u8))
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Card> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let id = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Card::from_id(id))
        })
    }

    /// 13-bit rank mask of one suit.
    #[inline(always)]
    pub const fn suit_mask(self, suit: Suit) -> u16 {
        ((self.0 >> (suit as u64 * 13)) as u16) & MASK13
    }

    #[inline(always)]
    pub const fn suit_masks(self) -> [u16; 4] {
        [
            self.suit_mask(Suit::Clubs),
            self.suit_mask(Suit::Diamonds),
            self.suit_mask(Suit::Hearts),
            self.suit_mask(Suit::Spades),
        ]
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::from_cards(iter)
    }
}
