//! The seeded pseudo-random source behind maze generation.
//!
//! The exact sequence of draws is part of the maze format: mazes are shared by seed, so the same seed has
//! to produce the same maze on every platform and every release. The algorithm is therefore pinned here
//! rather than left to `rand`'s defaults, whose value stability is not guaranteed across versions.
//!
//! - generator: Marsaglia's XorShift128 (`rand_xorshift::XorShiftRng`).
//! - seeding: the 64 bit seed is expanded by two SplitMix64 steps into the 16 little endian seed bytes.
//! - `draw_index(n)`: `(next_u32() * n) >> 32`, computed in 64 bits.

use rand::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;

const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Clone, Debug)]
pub struct MazeRng {
    rng: XorShiftRng,
}

impl MazeRng {
    pub fn new(seed: u64) -> MazeRng {
        let mut state = seed;
        let mut seed_bytes = [0u8; 16];
        seed_bytes[..8].copy_from_slice(&splitmix64(&mut state).to_le_bytes());
        seed_bytes[8..].copy_from_slice(&splitmix64(&mut state).to_le_bytes());
        MazeRng { rng: XorShiftRng::from_seed(seed_bytes) }
    }

    pub fn from_signed_seed(seed: i64) -> MazeRng {
        MazeRng::new(seed_from_signed(seed))
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    /// Uniformly pick an index in `0..n`. `n` must be non zero.
    #[inline]
    pub fn draw_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0 && n <= u32::MAX as usize);
        ((u64::from(self.next_u32()) * n as u64) >> 32) as usize
    }
}

/// Signed seeds, as typed in by a user, are reinterpreted bit for bit.
#[inline]
pub fn seed_from_signed(seed: i64) -> u64 {
    seed as u64
}

#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(SPLITMIX_GAMMA);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
