//! Seeded pseudo-random source used to lay out mines.
//!
//! [`Lcg48`] is a 48-bit linear congruential generator (the `drand48` constants) with a
//! rejection-sampled bounded draw, so a given integer seed always produces the same
//! board, on every platform.

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// Largest bound accepted by [`Lcg48::next_below`].
pub const MAX_BOUND: usize = i32::max_value() as usize;

/// 48-bit linear congruential generator.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    /// Construct a generator from the given seed. The seed is scrambled with the
    /// multiplier so that small seeds don't start from a small state.
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance the state and return its top `bits` bits.
    fn next_bits(&mut self, bits: u32) -> u32 {
        debug_assert!(bits >= 1 && bits <= 32);
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        (self.state >> (48 - bits)) as u32
    }

    /// Draw a uniformly distributed `i32`.
    pub fn next_i32(&mut self) -> i32 {
        self.next_bits(32) as i32
    }

    /// Draw a uniformly distributed value in `[0, bound)`.
    /// Panics if `bound` is 0 or larger than [`MAX_BOUND`].
    pub fn next_below(&mut self, bound: usize) -> usize {
        assert!(
            bound > 0 && bound <= MAX_BOUND,
            "bound must be in [1, {}], got {}",
            MAX_BOUND,
            bound
        );
        let bound = bound as u32;
        let max = bound - 1;
        let mut r = self.next_bits(31);
        if bound & max == 0 {
            // Powers of two take the high bits, which are the most random ones.
            return ((u64::from(bound) * u64::from(r)) >> 31) as usize;
        }
        let mut u = r;
        loop {
            r = u % bound;
            // Reject draws from the final partial bucket so every residue is equally
            // likely.
            if u - r + max <= MAX_BOUND as u32 {
                return r as usize;
            }
            u = self.next_bits(31);
        }
    }
}

#[cfg(feature = "rng_gen")]
impl rand::RngCore for Lcg48 {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32)
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_bits(32)) << 32) | u64::from(self.next_bits(32))
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_bits(32).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(feature = "rng_gen")]
impl rand::SeedableRng for Lcg48 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from_le_bytes(seed))
    }

    /// Uses the value directly as the seed, so `seed_from_u64(n)` matches `new(n)`.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_draws_are_stable() {
        let mut rng = Lcg48::new(0);
        assert_eq!(rng.next_i32(), -1155484576);
        assert_eq!(rng.next_i32(), -723955400);
        assert_eq!(rng.next_i32(), 1033096058);

        assert_eq!(Lcg48::new(10).next_i32(), -1157793070);
    }

    #[test]
    fn bounded_draws_reject_partial_bucket() {
        let mut rng = Lcg48::new(-1157793070);
        let draws: Vec<_> = (0..8).map(|_| rng.next_below(5)).collect();
        assert_eq!(draws, vec![4, 3, 2, 4, 2, 3, 4, 4]);
    }

    #[test]
    fn bounded_draws_power_of_two() {
        let mut rng = Lcg48::new(42);
        let pow2: Vec<_> = (0..6).map(|_| rng.next_below(16)).collect();
        assert_eq!(pow2, vec![11, 0, 10, 0, 4, 15]);
        let other: Vec<_> = (0..4).map(|_| rng.next_below(30)).collect();
        assert_eq!(other, vec![5, 8, 19, 23]);
    }

    #[test]
    fn bounded_draws_stay_in_range() {
        let mut rng = Lcg48::new(12345);
        for bound in 1..50 {
            for _ in 0..100 {
                assert!(rng.next_below(bound) < bound);
            }
        }
    }

    #[test]
    #[should_panic]
    fn zero_bound_panics() {
        Lcg48::new(1).next_below(0);
    }

    #[cfg(feature = "rng_gen")]
    #[test]
    fn usable_as_rand_rng() {
        use rand::{Rng, RngCore, SeedableRng};

        let mut a = Lcg48::seed_from_u64(10);
        let mut b = Lcg48::new(10);
        assert_eq!(a.next_u32() as i32, b.next_i32());

        let mut buf = [0u8; 7];
        a.fill_bytes(&mut buf);
        let x: u8 = a.gen_range(0, 10);
        assert!(x < 10);
    }
}
