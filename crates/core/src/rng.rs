//! RNG module - 7-bag random piece generation
//!
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Draws from the bag until empty, then generates a new bag.
//!
//! Uses a small seeded LCG so runs are reproducible in tests and replays.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`.
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates, swapping from the end down to index 1
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag7 {
    bag: [PieceKind; 7],
    /// Index of the next pending piece; 7 means the bag is empty
    bag_index: usize,
    rng: SimpleRng,
}

impl Bag7 {
    /// Create an empty bag; the first draw shuffles a fresh permutation.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: 7,
            rng: SimpleRng::new(seed),
        }
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece, refilling first if the bag is empty
    pub fn next(&mut self) -> PieceKind {
        if self.bag_index >= 7 {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Kinds still waiting in the current bag, in draw order
    pub fn pending(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    /// Current RNG state, used to seed the bag of the following run
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Bag7 {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut a = SimpleRng::new(0);
        let mut b = SimpleRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_bag_starts_empty() {
        let bag = Bag7::new(1);
        assert!(bag.pending().is_empty());
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = Bag7::new(1);

        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(bag.next());
        }

        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
        assert!(bag.pending().is_empty());
    }

    #[test]
    fn test_pending_never_contains_duplicates() {
        let mut bag = Bag7::new(99);
        for _ in 0..30 {
            bag.next();
            let pending = bag.pending();
            for (i, a) in pending.iter().enumerate() {
                assert!(!pending[i + 1..].contains(a));
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Bag7::new(42);
        let mut b = Bag7::new(42);
        for _ in 0..21 {
            assert_eq!(a.next(), b.next());
        }
    }
}
