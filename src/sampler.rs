//! Input validation and range sampling.
//!
//! Validation runs once per calculation, before any trial. Sampling runs once
//! per trial in range mode and picks one hand per range so that all picked
//! hands, the board and the dead cards are card-disjoint.

use log::trace;
use rand::Rng;

use crate::cardset::CardSet;
use crate::error::EquityError;
use crate::hand::Hand;
use crate::range::Range;

/// Consecutive rejections for one range before the partial deal is thrown away.
pub const RESTART_AFTER: u32 = 64;

/// Fixed hands must not share cards with each other or with `blocked`.
pub fn validate_hands(hands: &[Hand], blocked: CardSet) -> Result<(), EquityError> {
    let mut used = blocked;
    for hand in hands {
        if let Some(card) = used.intersection(hand.mask()).first() {
            return Err(EquityError::DuplicateCard(card));
        }
        used = used.union(hand.mask());
    }
    Ok(())
}

/// Every pair of ranges must have at least one card-disjoint pair of hands,
/// and every range at least one hand clear of `blocked`.
///
/// This is pairwise only: three ranges can pass and still have no joint deal.
/// The sampler's attempt bound covers that case.
pub fn validate_ranges(ranges: &[Range], blocked: CardSet) -> Result<(), EquityError> {
    for (i, a) in ranges.iter().enumerate() {
        if a.is_empty() {
            return Err(EquityError::EmptyRange);
        }
        for (j, b) in ranges.iter().enumerate().skip(i + 1) {
            if !can_deal_together(a, b) {
                return Err(EquityError::RangeOverlap { first: i, second: j });
            }
        }
        if !a.all().iter().any(|h| h.mask().is_disjoint(blocked)) {
            return Err(EquityError::RangeBlocked { range: i });
        }
    }
    Ok(())
}

fn can_deal_together(a: &Range, b: &Range) -> bool {
    // a card held by every hand of both ranges settles it at once
    let common = a
        .all()
        .iter()
        .chain(b.all())
        .fold(CardSet::full(), |acc, h| acc.intersection(h.mask()));
    if !common.is_empty() {
        return false;
    }
    a.all()
        .iter()
        .any(|ha| b.all().iter().any(|hb| ha.is_disjoint(hb)))
}

/// Rejection sampler for one trial's hands.
#[derive(Debug)]
pub struct Sampler<'a> {
    ranges: &'a [Range],
    blocked: CardSet,
    max_attempts: u32,
}

impl<'a> Sampler<'a> {
    pub fn new(ranges: &'a [Range], blocked: CardSet, max_attempts: u32) -> Self {
        Self { ranges, blocked, max_attempts }
    }

    /// Fill `out` with one hand per range, in range order.
    ///
    /// A candidate that collides is discarded. After [`RESTART_AFTER`]
    /// straight misses on one range the whole deal starts over, since earlier
    /// picks may have blocked every option. Gives up after `max_attempts`
    /// draws in total.
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut Vec<Hand>) -> Result<(), EquityError> {
        let mut attempts = 0u32;
        'restart: loop {
            out.clear();
            let mut used = self.blocked;
            for (i, range) in self.ranges.iter().enumerate() {
                let mut misses = 0u32;
                loop {
                    if attempts >= self.max_attempts {
                        return Err(EquityError::SamplerExhausted { attempts });
                    }
                    attempts += 1;

                    let hand = range.sample(rng);
                    if hand.mask().is_disjoint(used) {
                        used = used.union(hand.mask());
                        out.push(hand);
                        break;
                    }
                    misses += 1;
                    if misses >= RESTART_AFTER {
                        trace!("range #{i} missed {misses} times, restarting deal");
                        continue 'restart;
                    }
                }
            }
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn range(s: &str) -> Range {
        s.parse().unwrap()
    }

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn overlapping_hands_rejected() {
        let ak = hand("AhKh");
        assert_eq!(
            validate_hands(&[ak, ak], CardSet::new()),
            Err(EquityError::DuplicateCard("Kh".parse().unwrap()))
        );
        let board: Board = "Kh7c2d".parse().unwrap();
        assert!(matches!(validate_hands(&[ak], board.mask()), Err(EquityError::DuplicateCard(_))));
        assert!(validate_hands(&[ak, hand("QsQd")], board.mask()).is_err());
        assert!(validate_hands(&[hand("AsAd"), hand("QsQh")], board.mask()).is_ok());
    }

    #[test]
    fn ranges_sharing_a_card_everywhere_rejected() {
        let a = range("AsKs,AsKh");
        let b = range("AsQd,AsQc");
        assert_eq!(
            validate_ranges(&[a, b], CardSet::new()),
            Err(EquityError::RangeOverlap { first: 0, second: 1 })
        );
    }

    #[test]
    fn ranges_with_no_disjoint_pair_rejected() {
        // no single card is common to all four hands, yet every pairing collides
        let a = range("AsKs,AhKh");
        let b = range("AsKh,AhKs");
        assert!(matches!(
            validate_ranges(&[a, b], CardSet::new()),
            Err(EquityError::RangeOverlap { .. })
        ));
    }

    #[test]
    fn range_blocked_by_board() {
        let board: Board = "As7c2d".parse().unwrap();
        let ok = range("KK");
        let blocked = range("AsKs,AsQs");
        assert_eq!(
            validate_ranges(&[ok, blocked], board.mask()),
            Err(EquityError::RangeBlocked { range: 1 })
        );
    }

    #[test]
    fn usable_ranges_pass() {
        let rs = [range("AA,KK"), range("AKs"), range("QQ")];
        assert!(validate_ranges(&rs, CardSet::new()).is_ok());
    }

    #[test]
    fn dealt_hands_are_disjoint() {
        let rs = [range("AA,KK,AK"), range("AA,KK,AK"), range("AA,KK,AK")];
        let board: Board = "Ac7d2h".parse().unwrap();
        let dead = CardSet::from_cards(["Kd".parse().unwrap()]);
        let blocked = board.mask().union(dead);
        let sampler = Sampler::new(&rs, blocked, 10_000);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut out = Vec::new();
        for _ in 0..500 {
            sampler.deal(&mut rng, &mut out).unwrap();
            assert_eq!(out.len(), 3);
            let mut used = blocked;
            for (h, r) in out.iter().zip(&rs) {
                assert!(r.contains(h));
                assert!(h.mask().is_disjoint(used));
                used = used.union(h.mask());
            }
        }
    }

    #[test]
    fn infeasible_three_way_deal_is_bounded() {
        // any two of these can be dealt, all three cannot
        let r = range("AsKs,QhJh");
        let rs = [r.clone(), r.clone(), r];
        assert!(validate_ranges(&rs, CardSet::new()).is_ok());

        let sampler = Sampler::new(&rs, CardSet::new(), 500);
        let mut rng = SmallRng::seed_from_u64(2);
        let mut out = Vec::new();
        assert_eq!(
            sampler.deal(&mut rng, &mut out),
            Err(EquityError::SamplerExhausted { attempts: 500 })
        );
    }
}
