//! Dissolve: every pixel either takes the source or keeps the backdrop, chosen by a
//! pseudo-random draw against the source's effective coverage.
//!
//! Draws are reproducible per absolute row. A fixed table of row seeds is built once from
//! [`DISSOLVE_SEED`]; each row starts a fresh [`RowRng`] from its table entry and skips
//! one draw per pixel left of the region, so any tiling of an image yields identical
//! pixels.

use std::sync::OnceLock;

use rand::{RngCore, SeedableRng};

use crate::foundation::core::{ALPHA, CHANNELS, Roi, load_pixel};
use crate::kernels::{CompositeLaw, KernelParams};

/// Seed of the row-seed table.
pub const DISSOLVE_SEED: u32 = 314_159_265;
/// Number of row seeds; rows wrap modulo this size.
pub const DISSOLVE_TABLE_SIZE: usize = 4096;

const STATE_LEN: usize = 624;
const SHIFT_LEN: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// 32-bit Mersenne Twister producing the same stream as GLib's `GRand`.
#[derive(Clone)]
pub struct RowRng {
    state: [u32; STATE_LEN],
    index: usize,
}

impl std::fmt::Debug for RowRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowRng").field("index", &self.index).finish_non_exhaustive()
    }
}

impl RowRng {
    /// Generator seeded with a single 32-bit seed.
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; STATE_LEN];
        state[0] = seed;
        for i in 1..STATE_LEN {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self {
            state,
            index: STATE_LEN,
        }
    }

    fn twist(&mut self) {
        let mag = |y: u32| if y & 1 == 0 { 0 } else { MATRIX_A };
        for k in 0..STATE_LEN {
            let y = (self.state[k] & UPPER_MASK) | (self.state[(k + 1) % STATE_LEN] & LOWER_MASK);
            self.state[k] = self.state[(k + SHIFT_LEN) % STATE_LEN] ^ (y >> 1) ^ mag(y);
        }
        self.index = 0;
    }

    /// Uniform integer in `[begin, end)`, rejecting draws that would bias the modulo.
    ///
    /// Returns `begin` when the range is empty.
    pub fn int_range(&mut self, begin: i32, end: i32) -> i32 {
        if end <= begin {
            return begin;
        }
        let dist = end.wrapping_sub(begin) as u32;
        let max_value = if dist <= UPPER_MASK {
            let mut leftover = (UPPER_MASK % dist) * 2;
            if leftover >= dist {
                leftover -= dist;
            }
            u32::MAX - leftover
        } else {
            dist - 1
        };
        let mut draw = self.next_u32();
        while draw > max_value {
            draw = self.next_u32();
        }
        begin.wrapping_add((draw % dist) as i32)
    }
}

impl RngCore for RowRng {
    fn next_u32(&mut self) -> u32 {
        if self.index >= STATE_LEN {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        low | (high << 32)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for RowRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Table of per-row seeds shared by every dissolve call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DissolveSeedTable {
    seeds: Vec<u32>,
}

impl DissolveSeedTable {
    /// Table drawn from [`DISSOLVE_SEED`].
    pub fn new() -> Self {
        Self::with_seed(DISSOLVE_SEED)
    }

    /// Table drawn from an arbitrary seed.
    pub fn with_seed(seed: u32) -> Self {
        let mut rng = RowRng::new(seed);
        let seeds = (0..DISSOLVE_TABLE_SIZE).map(|_| rng.next_u32()).collect();
        Self { seeds }
    }

    /// Process-wide table, built on first use.
    pub fn global() -> &'static Self {
        static TABLE: OnceLock<DissolveSeedTable> = OnceLock::new();
        TABLE.get_or_init(Self::new)
    }

    /// Seed of absolute row `y`; negative rows wrap like positive ones.
    pub fn seed_for_row(&self, y: i32) -> u32 {
        let idx = y.rem_euclid(DISSOLVE_TABLE_SIZE as i32) as usize;
        self.seeds[idx]
    }

    /// Generator positioned at absolute pixel (`x`, `y`).
    pub fn row_rng(&self, x: i32, y: i32) -> RowRng {
        let mut rng = RowRng::new(self.seed_for_row(y));
        for _ in 0..x.max(0) {
            rng.next_u32();
        }
        rng
    }
}

impl Default for DissolveSeedTable {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn process(
    params: &KernelParams,
    seeds: &DissolveSeedTable,
    backdrop: &[f32],
    source: &[f32],
    mask: Option<&[f32]>,
    output: &mut [f32],
    roi: Roi,
) {
    let width = roi.width as usize;
    if width == 0 {
        return;
    }
    let law = params.law();
    let keeps_backdrop_alpha = matches!(law, CompositeLaw::Union | CompositeLaw::ClipToBackdrop);
    let opaque_source = matches!(law, CompositeLaw::Union | CompositeLaw::ClipToLayer);
    let row_len = width * CHANNELS;

    let rows = backdrop
        .chunks_exact(row_len)
        .zip(source.chunks_exact(row_len))
        .zip(output.chunks_exact_mut(row_len));
    for (row, ((b_row, s_row), o_row)) in rows.enumerate() {
        let y = roi.y.saturating_add(row as i32);
        let mut rng = seeds.row_rng(roi.x, y);
        let mask_row = mask.map(|m| &m[row * width..(row + 1) * width]);

        for (col, ((b, s), o)) in b_row
            .chunks_exact(CHANNELS)
            .zip(s_row.chunks_exact(CHANNELS))
            .zip(o_row.chunks_exact_mut(CHANNELS))
            .enumerate()
        {
            let b = load_pixel(b);
            let s = load_pixel(s);
            let m = mask_row.map_or(1.0, |m| m[col]);
            let value = s[ALPHA] * params.opacity * m * 255.0;
            let draw = rng.int_range(0, 255) as f32;

            let px = if draw >= value {
                let alpha = if keeps_backdrop_alpha { b[ALPHA] } else { 0.0 };
                [b[0], b[1], b[2], alpha]
            } else {
                let alpha = if opaque_source { 1.0 } else { b[ALPHA] };
                [s[0], s[1], s[2], alpha]
            };
            o.copy_from_slice(&px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/dissolve.rs"]
mod tests;
