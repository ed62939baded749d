//! Packed u32 hand score.
//!
//! Layout:
//! bits 20..23 : category (0..8), higher is better
//! bits 16..19 : r0
//! bits 12..15 : r1
//! bits  8..11 : r2
//! bits  4..7  : r3
//! bits  0..3  : r4
//!
//! Each r* is a 4-bit rank index (0..12), most significant first. Unused slots are 0.
//! Two scores compare exactly like the hands they describe.

use std::fmt;

#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Score(pub u32);

/// Hand categories (higher is better).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl Category {
    const fn from_u8(x: u8) -> Category {
        match x {
            0 => Category::HighCard,
            1 => Category::OnePair,
            2 => Category::TwoPair,
            3 => Category::Trips,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::Quads,
            _ => Category::StraightFlush,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::Trips => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::Quads => "four of a kind",
            Category::StraightFlush => "straight flush",
        };
        f.write_str(name)
    }
}

impl Score {
    /// Upper bound of every packed score (a royal flush is well below it).
    pub const MAX: u32 = (1 << 24) - 1;

    #[inline(always)]
    pub fn pack(cat: Category, ranks: [u8; 5]) -> Score {
        Score(
            ((cat as u32) << 20)
                | (((ranks[0] & 0xF) as u32) << 16)
                | (((ranks[1] & 0xF) as u32) << 12)
                | (((ranks[2] & 0xF) as u32) << 8)
                | (((ranks[3] & 0xF) as u32) << 4)
                | ((ranks[4] & 0xF) as u32),
        )
    }

    #[inline(always)]
    pub const fn category(self) -> Category {
        Category::from_u8(((self.0 >> 20) & 0xF) as u8)
    }

    /// Rank slots, most significant first.
    #[inline]
    pub const fn ranks(self) -> [u8; 5] {
        let v = self.0;
        [
            ((v >> 16) & 0xF) as u8,
            ((v >> 12) & 0xF) as u8,
            ((v >> 8) & 0xF) as u8,
            ((v >> 4) & 0xF) as u8,
            (v & 0xF) as u8,
        ]
    }

    /// Showdown rank where lower is stronger.
    #[inline(always)]
    pub const fn rank(self) -> u32 {
        Self::MAX - self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack() {
        let s = Score::pack(Category::FullHouse, [10, 3, 0, 0, 0]);
        assert_eq!(s.category(), Category::FullHouse);
        assert_eq!(s.ranks(), [10, 3, 0, 0, 0]);
    }

    #[test]
    fn rank_inverts_order() {
        let flush = Score::pack(Category::Flush, [12, 9, 7, 3, 1]);
        let straight = Score::pack(Category::Straight, [12, 0, 0, 0, 0]);
        assert!(flush > straight);
        assert!(flush.rank() < straight.rank());
    }
}
