//! Weighted hand ranges.
//!
//! A range is a set of hands, each with a weight in (0, 1]. Sampling draws a
//! hand with probability proportional to its weight.
//!
//! Text form (comma separated, optional `:weight` suffix):
//! - `"AA"`   - pair, 6 combos
//! - `"AKs"`  - suited, 4 combos
//! - `"AKo"`  - offsuit, 12 combos
//! - `"AK"`   - suited and offsuit, 16 combos
//! - `"AsKs"` - one specific combo
//! - `"QQ:0.5,AKs"` - weighted entries

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::card::{Card, Rank, Suit};
use crate::error::EquityError;
use crate::hand::Hand;

#[derive(Clone, Debug)]
pub struct Range {
    hands: Vec<Hand>,
    weights: Vec<f32>,
    index: WeightedIndex<f32>,
}

impl Range {
    /// Build a range from weighted hands. A hand listed twice keeps its last
    /// weight; zero-weight hands are dropped.
    pub fn new<I: IntoIterator<Item = (Hand, f32)>>(entries: I) -> Result<Self, EquityError> {
        let mut combos = BTreeMap::new();
        for (hand, weight) in entries {
            if !(0.0..=1.0).contains(&weight) {
                return Err(EquityError::InvalidRange(format!("weight {weight} for {hand} is outside 0..=1")));
            }
            combos.insert(hand, weight);
        }
        let (hands, weights): (Vec<Hand>, Vec<f32>) = combos.into_iter().filter(|&(_, w)| w > 0.0).unzip();
        let index = WeightedIndex::new(weights.iter().copied()).map_err(|_| EquityError::EmptyRange)?;
        Ok(Self { hands, weights, index })
    }

    /// Every hand at weight 1.
    pub fn uniform<I: IntoIterator<Item = Hand>>(hands: I) -> Result<Self, EquityError> {
        Self::new(hands.into_iter().map(|h| (h, 1.0)))
    }

    /// Every hand this range can produce.
    #[inline]
    pub fn all(&self) -> &[Hand] {
        &self.hands
    }

    pub fn weight(&self, hand: &Hand) -> f32 {
        self.hands
            .binary_search(hand)
            .map(|i| self.weights[i])
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn contains(&self, hand: &Hand) -> bool {
        self.hands.binary_search(hand).is_ok()
    }

    /// Draw one hand, respecting weights.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Hand {
        self.hands[self.index.sample(rng)]
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.hands == other.hands && self.weights == other.weights
    }
}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hands.hash(state);
        for w in &self.weights {
            w.to_bits().hash(state);
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (h, w)) in self.hands.iter().zip(&self.weights).enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if *w < 1.0 {
                write!(f, "{h}:{w}")?;
            } else {
                write!(f, "{h}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Range {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (group, weight) = match part.split_once(':') {
                Some((g, w)) => {
                    let w: f32 = w
                        .trim()
                        .parse()
                        .map_err(|_| EquityError::InvalidRange(format!("invalid weight in {part:?}")))?;
                    (g.trim(), w)
                }
                None => (part, 1.0),
            };
            for hand in expand_group(group)? {
                entries.push((hand, weight));
            }
        }
        Range::new(entries)
    }
}

/// All combos named by one group such as `"AKs"` or `"AsKs"`.
fn expand_group(group: &str) -> Result<Vec<Hand>, EquityError> {
    let invalid = || EquityError::InvalidRange(format!("invalid hand group {group:?}"));
    let chars: Vec<char> = group.chars().collect();
    let rank = |c: char| Rank::from_char(c).ok_or_else(invalid);

    match chars.as_slice() {
        &[a, b] => {
            let (a, b) = (rank(a)?, rank(b)?);
            if a == b {
                pairs(a)
            } else {
                let mut v = suited(a, b)?;
                v.extend(offsuit(a, b)?);
                Ok(v)
            }
        }
        &[a, b, kind] => {
            let (a, b) = (rank(a)?, rank(b)?);
            if a == b {
                return Err(invalid());
            }
            match kind.to_ascii_lowercase() {
                's' => suited(a, b),
                'o' => offsuit(a, b),
                _ => Err(invalid()),
            }
        }
        // a literal combo, possibly with a `10` rank
        _ => Ok(vec![group.parse::<Hand>().map_err(|_| invalid())?]),
    }
}

fn pairs(r: Rank) -> Result<Vec<Hand>, EquityError> {
    let mut v = Vec::with_capacity(6);
    for (i, &s1) in Suit::ALL.iter().enumerate() {
        for &s2 in &Suit::ALL[i + 1..] {
            v.push(Hand::new(Card::new(s1, r), Card::new(s2, r))?);
        }
    }
    Ok(v)
}

fn suited(a: Rank, b: Rank) -> Result<Vec<Hand>, EquityError> {
    Suit::ALL
        .iter()
        .map(|&s| Hand::new(Card::new(s, a), Card::new(s, b)))
        .collect()
}

fn offsuit(a: Rank, b: Rank) -> Result<Vec<Hand>, EquityError> {
    let mut v = Vec::with_capacity(12);
    for &s1 in &Suit::ALL {
        for &s2 in Suit::ALL.iter().filter(|&&s2| s2 != s1) {
            v.push(Hand::new(Card::new(s1, a), Card::new(s2, b))?);
        }
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn combo_counts() {
        assert_eq!("AA".parse::<Range>().unwrap().len(), 6);
        assert_eq!("AKs".parse::<Range>().unwrap().len(), 4);
        assert_eq!("AKo".parse::<Range>().unwrap().len(), 12);
        assert_eq!("AK".parse::<Range>().unwrap().len(), 16);
        assert_eq!("AsKs".parse::<Range>().unwrap().len(), 1);
        assert_eq!("10s9s".parse::<Range>().unwrap().all(), &["Ts9s".parse::<Hand>().unwrap()]);
        assert_eq!("AA,KK,AKs".parse::<Range>().unwrap().len(), 16);
    }

    #[test]
    fn weights_and_duplicates() {
        let r: Range = "QQ:0.5,QcQd".parse().unwrap();
        assert_eq!(r.len(), 6);
        let qq: Hand = "QcQd".parse().unwrap();
        assert_eq!(r.weight(&qq), 1.0);
        assert_eq!(r.weight(&"QhQs".parse().unwrap()), 0.5);
        assert_eq!(r.weight(&"AhAs".parse().unwrap()), 0.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!("".parse::<Range>(), Err(EquityError::EmptyRange)));
        assert!(matches!("AA:0".parse::<Range>(), Err(EquityError::EmptyRange)));
        assert!("AA:1.5".parse::<Range>().is_err());
        assert!("AAs".parse::<Range>().is_err());
        assert!("AKx".parse::<Range>().is_err());
        assert!("XYZWV".parse::<Range>().is_err());
    }

    #[test]
    fn sampling_follows_weights() {
        let heavy: Hand = "AsAh".parse().unwrap();
        let light: Hand = "KsKh".parse().unwrap();
        let r = Range::new([(heavy, 1.0), (light, 0.25)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        let n = 20_000;
        let hits = (0..n).filter(|_| r.sample(&mut rng) == heavy).count();
        let p = hits as f64 / n as f64;
        assert!((p - 0.8).abs() < 0.02, "p = {p}");
    }

    #[test]
    fn sample_stays_in_range() {
        let r: Range = "AKs,QQ".parse().unwrap();
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..1000 {
            assert!(r.contains(&r.sample(&mut rng)));
        }
    }
}
