//! Deterministic, stateless random numbers.
//!
//! Every roll derives its own seed from `(game_seed, nonce, actor, context)`,
//! so the only RNG state worth persisting is the game seed and the action
//! nonce already stored in [`crate::GameState`].

/// RNG oracle. Implementations must map equal seeds to equal outputs.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    fn index(&self, seed: u64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_u32(seed) as usize % len
    }

    /// Value in `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }
}

/// PCG-XSH-RR generator: one LCG step followed by a xorshift and a random
/// rotation of the high bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Roll contexts, so independent rolls within one action never share a seed.
pub mod context {
    pub const CONFUSED_STEP: u32 = 1;
    pub const DUNGEON_LAYOUT: u32 = 2;
}

/// Mixes the roll's inputs into a single seed.
///
/// `nonce` is the count of executed actions, so the same actor rolling in a
/// later turn always gets a fresh seed.
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor_id).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche (MurmurHash3 fmix64).
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
