//! Precise Q15 convolution: 64-bit accumulation over zero-padded scratch.
//!
//! The longer operand is copied into scratch 1 between two runs of `n_y - 1`
//! zeros, and the shorter operand is copied reversed into scratch 2. Every
//! output sample is then the same dot product,
//! `dst[n] = Σ padded[n + k] * reversed[k]`, so no phase logic is needed.

use super::by_length;
use crate::dsp::helpers::{dot_q15, dot_q15_paired, dual_mac, mac, read_pair, saturate_q15};
use crate::support::{copy_q15, fill_q15};

/// Convolve `a` with `b` into `dst[..a.len() + b.len() - 1]`.
///
/// Full precision: each output accumulates in an `i64` (33 guard bits), is
/// shifted right by 15 and saturated to `-32768..=32767`. It never wraps.
///
/// `scratch1` needs [`conv_scratch1_len`](super::conv_scratch1_len) samples
/// and `scratch2` needs [`conv_scratch2_len`](super::conv_scratch2_len).
/// Their previous contents are ignored and overwritten.
///
/// Nothing is written when either input is empty.
///
/// # Panics
///
/// Panics if `dst`, `scratch1` or `scratch2` is undersized.
pub fn convolve_precise(
    a: &[i16],
    b: &[i16],
    dst: &mut [i16],
    scratch1: &mut [i16],
    scratch2: &mut [i16],
) {
    let (x, y) = by_length(a, b);
    if y.is_empty() {
        return;
    }
    let (n_x, n_y) = (x.len(), y.len());
    let pad = n_y - 1;

    let padded = &mut scratch1[..n_x + 2 * pad];
    fill_q15(0, &mut padded[..pad]);
    copy_q15(x, &mut padded[pad..]);
    fill_q15(0, &mut padded[pad + n_x..]);

    let reversed = &mut scratch2[..n_y];
    for (r, &s) in reversed.iter_mut().rev().zip(y) {
        *r = s;
    }

    let dst = &mut dst[..n_x + n_y - 1];

    #[cfg(feature = "paired")]
    convolve_precise_paired(padded, reversed, dst);
    #[cfg(not(feature = "paired"))]
    convolve_precise_scalar(padded, reversed, dst);
}

/// Reference implementation: one dot product per output.
#[cfg_attr(feature = "paired", allow(dead_code))]
pub(crate) fn convolve_precise_scalar(padded: &[i16], reversed: &[i16], dst: &mut [i16]) {
    let taps = reversed.len();
    for (n, out) in dst.iter_mut().enumerate() {
        *out = saturate_q15(dot_q15(&padded[n..n + taps], reversed, 0i64));
    }
}

/// Paired implementation: four outputs per pass over `reversed`.
#[cfg_attr(not(feature = "paired"), allow(dead_code))]
pub(crate) fn convolve_precise_paired(padded: &[i16], reversed: &[i16], dst: &mut [i16]) {
    let taps = reversed.len();
    let blocks = dst.len() / 4;

    for block in 0..blocks {
        let n = 4 * block;
        let mut acc = [0i64; 4];
        let mut k = 0;
        while k + 1 < taps {
            let c = read_pair(reversed, k);
            for (j, sum) in acc.iter_mut().enumerate() {
                *sum = dual_mac(read_pair(padded, n + j + k), c, *sum);
            }
            k += 2;
        }
        if k < taps {
            let c = reversed[k];
            for (j, sum) in acc.iter_mut().enumerate() {
                *sum = mac(padded[n + j + k], c, *sum);
            }
        }
        for (j, &sum) in acc.iter().enumerate() {
            dst[n + j] = saturate_q15(sum);
        }
    }

    for n in 4 * blocks..dst.len() {
        dst[n] = saturate_q15(dot_q15_paired(&padded[n..n + taps], reversed, 0i64));
    }
}
