//! Layered 2D value noise.
//!
//! A fixed table of random values is interpolated with a cosine ease and
//! summed over four octaves, each at twice the frequency and half the
//! amplitude of the previous one. The table is filled from a fixed seed, so
//! the height field is identical across runs and machines.

use std::f32::consts::PI;

use crate::random::Random;

const TABLE_SEED: i64 = 18_295_169;
const TABLE_LEN: usize = 1024;

const OCTAVES: usize = 4;
const AMP_FALLOFF: f32 = 0.5;

const YWRAP_BITS: i32 = 4;
const YWRAP: i32 = 1 << YWRAP_BITS;

/// Smooth value noise over the plane.
#[derive(Clone)]
pub struct ValueNoise {
    table: Box<[f32; TABLE_LEN + 1]>,
}

impl ValueNoise {
    /// Build the noise table.
    pub fn new() -> Self {
        let mut rng = Random::new(TABLE_SEED);
        let mut table = Box::new([0.0; TABLE_LEN + 1]);
        for value in table.iter_mut() {
            *value = rng.next_float();
        }
        Self { table }
    }

    /// Sample the noise at `(x, y)`. The result lies in `[0, 1)`.
    ///
    /// The field is mirrored about both axes: negative inputs sample the
    /// same values as their absolute value.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let x = x.abs();
        let y = y.abs();

        let mut xi = x as i32;
        let mut yi = y as i32;
        let mut xf = x - xi as f32;
        let mut yf = y - yi as f32;

        let mut total = 0.0;
        let mut amplitude = 0.5;

        for _ in 0..OCTAVES {
            let offset = xi.wrapping_add(yi.wrapping_shl(YWRAP_BITS as u32));

            let rxf = scaled_cosine(xf);
            let ryf = scaled_cosine(yf);

            let mut n1 = self.at(offset);
            n1 += rxf * (self.at(offset.wrapping_add(1)) - n1);
            let mut n2 = self.at(offset.wrapping_add(YWRAP));
            n2 += rxf * (self.at(offset.wrapping_add(YWRAP + 1)) - n2);
            n1 += ryf * (n2 - n1);

            total += n1 * amplitude;
            amplitude *= AMP_FALLOFF;

            xi = xi.wrapping_shl(1);
            xf *= 2.0;
            yi = yi.wrapping_shl(1);
            yf *= 2.0;

            if xf >= 1.0 {
                xi += 1;
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi += 1;
                yf -= 1.0;
            }
        }

        total
    }

    #[inline]
    fn at(&self, offset: i32) -> f32 {
        self.table[offset.rem_euclid(TABLE_LEN as i32) as usize]
    }
}

impl Default for ValueNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValueNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueNoise").finish_non_exhaustive()
    }
}

#[inline]
fn scaled_cosine(i: f32) -> f32 {
    0.5 * (1.0 - (i * PI).cos())
}
