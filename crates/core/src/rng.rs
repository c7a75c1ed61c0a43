//! RNG module - piece sources
//!
//! A [`PieceSource`] supplies the sequence of upcoming piece kinds. Sessions
//! take one by injection so tests and replays can pin the sequence.
//!
//! - [`UniformSource`]: each draw picks one of the 7 kinds uniformly.
//! - [`BagSource`]: the "7-bag" randomizer; every shuffled bag of 7 contains
//!   each kind exactly once.
//! - [`SequenceSource`]: cycles a fixed list.
//!
//! Both random sources run on a small LCG so a seed reproduces the game.

use crate::types::PieceKind;

/// Supplier of upcoming piece kinds.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

impl<F> PieceSource for F
where
    F: FnMut() -> PieceKind,
{
    fn next_kind(&mut self) -> PieceKind {
        self()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() >> 16) * max) >> 16
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Uniform random selection among the 7 kinds.
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagSource {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl BagSource {
    pub fn new(seed: u32) -> Self {
        let mut source = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        source.refill_bag();
        source
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl PieceSource for BagSource {
    fn next_kind(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }
}

/// Cycles a fixed list of kinds forever.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl SequenceSource {
    /// An empty list cycles through all 7 kinds in color-id order.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds = PieceKind::ALL.to_vec();
        }
        Self { kinds, pos: 0 }
    }

    /// Parse a string of piece letters such as `"ITOS"`; unknown letters are skipped.
    pub fn from_letters(letters: &str) -> Self {
        Self::new(
            letters
                .chars()
                .filter_map(|ch| PieceKind::from_str(&ch.to_string())),
        )
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_uniform_source_produces_every_kind() {
        let mut source = UniformSource::new(99);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[(source.next_kind().color_id() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_bag_source_draws_all_seven() {
        let mut source = BagSource::new(1);
        for _ in 0..3 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| source.next_kind()).collect();
            drawn.sort_by_key(|k| k.color_id());
            assert_eq!(drawn, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_bag_source_refills() {
        let mut source = BagSource::new(1);
        assert_eq!(source.remaining().len(), 7);
        for _ in 0..7 {
            source.next_kind();
        }
        assert!(source.remaining().is_empty());
        source.next_kind();
        assert_eq!(source.remaining().len(), 6);
    }

    #[test]
    fn test_sequence_source_cycles() {
        let mut source = SequenceSource::from_letters("IOx");
        let drawn: Vec<PieceKind> = (0..5).map(|_| source.next_kind()).collect();
        assert_eq!(
            drawn,
            vec![PieceKind::I, PieceKind::O, PieceKind::I, PieceKind::O, PieceKind::I]
        );
    }

    #[test]
    fn test_closure_is_a_source() {
        let mut source = || PieceKind::Z;
        assert_eq!(source.next_kind(), PieceKind::Z);
    }
}
