//! A shuffled deck owned by one trial.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::Card;
use crate::hand::Hand;

/// Undealt cards. Dealing pops from the back.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// All 52 cards in id order.
    pub fn new() -> Self {
        Self { cards: Card::all().collect() }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove a specific card. Returns false if it was already gone.
    pub fn pop(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(i) => {
                self.cards.swap_remove(i);
                true
            }
            None => false,
        }
    }

    pub fn pop_hand(&mut self, hand: &Hand) -> bool {
        let [a, b] = hand.cards();
        // both must run
        self.pop(a) & self.pop(b)
    }

    pub fn pop_all(&mut self, cards: &[Card]) {
        for &c in cards {
            self.pop(c);
        }
    }

    /// Next card off the top.
    #[inline]
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardset::CardSet;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn shuffled_deck_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        let deck = Deck::shuffled(&mut rng);
        assert_eq!(deck.len(), 52);
        assert_eq!(CardSet::from_cards(deck.cards.iter().copied()), CardSet::full());
    }

    #[test]
    fn same_seed_same_order() {
        let a = Deck::shuffled(&mut SmallRng::seed_from_u64(11));
        let b = Deck::shuffled(&mut SmallRng::seed_from_u64(11));
        assert_eq!(a.cards, b.cards);
    }

    #[test]
    fn pop_removes_cards() {
        let mut deck = Deck::new();
        let hand: Hand = "AhKh".parse().unwrap();
        assert!(deck.pop_hand(&hand));
        assert!(!deck.pop_hand(&hand));
        assert_eq!(deck.len(), 50);
        assert!(!deck.contains(hand.cards()[0]));

        let mut n = 0;
        while deck.deal().is_some() {
            n += 1;
        }
        assert_eq!(n, 50);
        assert!(deck.is_empty());
    }
}
