//! Hand evaluation.
//!
//! [`evaluate`] scores the best 5-card hand inside a [`CardSet`] of up to
//! seven cards: read the per-suit rank masks, derive the rank union and the
//! multiplicity masks, pick the best category, then pack kickers into a
//! [`Score`]. The [`Evaluator`] trait is the seam the equity engine ranks
//! hands through.

use std::fmt::Debug;

use crate::board::Board;
use crate::cardset::{CardSet, MASK13};
use crate::hand::Hand;
use crate::score::{Category, Score};

/// Ranks a hand on a board. Lower ranks are stronger; equal ranks split.
pub trait Evaluator: Send + Sync + Debug {
    fn rank(&self, hand: &Hand, board: &Board) -> u32;
}

/// Bit-mask evaluator over the 7 cards of hand + board.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DefaultEvaluator;

impl Evaluator for DefaultEvaluator {
    #[inline]
    fn rank(&self, hand: &Hand, board: &Board) -> u32 {
        evaluate(hand.mask().union(board.mask())).rank()
    }
}

#[inline(always)]
fn hibit(m: u16) -> Option<u8> {
    let m = m & MASK13;
    if m == 0 {
        None
    } else {
        Some(15 - m.leading_zeros() as u8)
    }
}

#[inline(always)]
fn bit(r: u8) -> u16 {
    1u16 << r
}

/// End rank of the highest 5-long run, the wheel (A2345) ending on the Five.
#[inline]
fn straight_end(mask: u16) -> Option<u8> {
    const WINDOW: u16 = 0b1_1111;
    const WHEEL: u16 = (1 << 12) | 0b1111;
    (0..=8u8)
        .rev()
        .find(|&lo| mask & (WINDOW << lo) == WINDOW << lo)
        .map(|lo| lo + 4)
        .or(if mask & WHEEL == WHEEL { Some(3) } else { None })
}

/// Highest `n` ranks of `mask`, most significant first, zero padded.
#[inline]
fn top_ranks(mut mask: u16, n: usize) -> [u8; 5] {
    let mut out = [0u8; 5];
    for slot in out.iter_mut().take(n) {
        match hibit(mask) {
            Some(r) => {
                *slot = r;
                mask &= !bit(r);
            }
            None => break,
        }
    }
    out
}

/// Score the best 5-card hand contained in `cards`.
pub fn evaluate(cards: CardSet) -> Score {
    let suits = cards.suit_masks();
    let [h0, h1, h2, h3] = suits;

    let ranks = h0 | h1 | h2 | h3;
    let ge2 = (h0 & h1) | (h0 & h2) | (h0 & h3) | (h1 & h2) | (h1 & h3) | (h2 & h3);
    let ge3 = (h0 & h1 & h2) | (h0 & h1 & h3) | (h0 & h2 & h3) | (h1 & h2 & h3);
    let ge4 = h0 & h1 & h2 & h3;

    let flush = suits.iter().copied().filter(|m| m.count_ones() >= 5).max_by_key(|&m| top_ranks(m, 5));

    if let Some(end) = suits
        .iter()
        .filter(|m| m.count_ones() >= 5)
        .filter_map(|&m| straight_end(m))
        .max()
    {
        return Score::pack(Category::StraightFlush, [end, 0, 0, 0, 0]);
    }

    if let Some(q) = hibit(ge4) {
        let k = hibit(ranks & !bit(q)).unwrap_or(0);
        return Score::pack(Category::Quads, [q, k, 0, 0, 0]);
    }

    // ge2 includes ranks held three times, so a second set of trips fills the pair slot.
    if let Some(t) = hibit(ge3) {
        if let Some(p) = hibit(ge2 & !bit(t)) {
            return Score::pack(Category::FullHouse, [t, p, 0, 0, 0]);
        }
    }

    if let Some(m) = flush {
        return Score::pack(Category::Flush, top_ranks(m, 5));
    }

    if let Some(end) = straight_end(ranks) {
        return Score::pack(Category::Straight, [end, 0, 0, 0, 0]);
    }

    if let Some(t) = hibit(ge3) {
        let k = top_ranks(ranks & !bit(t), 2);
        return Score::pack(Category::Trips, [t, k[0], k[1], 0, 0]);
    }

    if ge2.count_ones() >= 2 {
        let p = top_ranks(ge2, 2);
        let k = hibit(ranks & !(bit(p[0]) | bit(p[1]))).unwrap_or(0);
        return Score::pack(Category::TwoPair, [p[0], p[1], k, 0, 0]);
    }

    if let Some(p) = hibit(ge2) {
        let k = top_ranks(ranks & !bit(p), 3);
        return Score::pack(Category::OnePair, [p, k[0], k[1], k[2], 0]);
    }

    Score::pack(Category::HighCard, top_ranks(ranks, 5))
}
