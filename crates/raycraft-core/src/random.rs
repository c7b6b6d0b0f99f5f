//! 48-bit linear congruential generator.
//!
//! World and texture generation are only reproducible if this sequence is
//! reproduced bit for bit, so the recurrence, the initial scramble and the
//! bounded-draw rejection loop all follow the `java.util.Random` contract.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

static SEED_UNIQUIFIER: AtomicU64 = AtomicU64::new(8_682_522_807_148_012);

/// Deterministic pseudo-random source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Random {
    state: u64,
}

impl Random {
    /// Create a generator from a seed. Every 64-bit value is a valid seed.
    pub const fn new(seed: i64) -> Self {
        Self {
            state: scramble(seed),
        }
    }

    /// Create a generator seeded from the clock and a process-wide counter,
    /// so two generators created in the same instant still differ.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self::new((next_uniquifier() ^ nanos) as i64)
    }

    /// Reset the generator as if it had just been created with `seed`.
    pub fn set_seed(&mut self, seed: i64) {
        self.state = scramble(seed);
    }

    /// Advance the recurrence and return its top `bits` bits (1..=32).
    #[inline]
    pub fn next(&mut self, bits: u32) -> i32 {
        debug_assert!((1..=32).contains(&bits));
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(ADDEND)
            & MASK;
        (self.state >> (48 - bits)) as i32
    }

    /// Uniform over the full `i32` range.
    #[inline]
    pub fn next_int(&mut self) -> i32 {
        self.next(32)
    }

    /// Uniform over `0..bound`.
    ///
    /// # Panics
    /// Panics if `bound` is not positive.
    pub fn next_int_bounded(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be positive, got {bound}");

        let r = self.next(31);
        let m = bound - 1;
        if bound & m == 0 {
            return ((i64::from(bound) * i64::from(r)) >> 31) as i32;
        }

        let mut u = r;
        loop {
            let r = u % bound;
            // Draws from the truncated top of the range overflow and are rejected.
            if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                return r;
            }
            u = self.next(31);
        }
    }

    /// Uniform over `[0, 1)` with 24 bits of precision.
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        self.next(24) as f32 * FLOAT_UNIT
    }

    /// Uniform over the full `i64` range.
    pub fn next_long(&mut self) -> i64 {
        let high = i64::from(self.next(32));
        let low = i64::from(self.next(32));
        (high << 32).wrapping_add(low)
    }
}

const fn scramble(seed: i64) -> u64 {
    (seed as u64 ^ MULTIPLIER) & MASK
}

fn next_uniquifier() -> u64 {
    const STEP: u64 = 181_783_497_276_652_981;
    let mut current = SEED_UNIQUIFIER.load(Ordering::Relaxed);
    loop {
        let next = current.wrapping_mul(STEP);
        match SEED_UNIQUIFIER.compare_exchange_weak(
            current,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next,
            Err(actual) => current = actual,
        }
    }
}
