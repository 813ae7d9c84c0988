//! Fast Q15 convolution: 32-bit accumulation, no scratch buffers.
//!
//! `x` is the longer operand (length `n_x`), `y` the shorter (length `n_y`).
//! Output `n` is `Σ x[k] * y[n - k]` over the overlapping `k`. The output
//! range splits into three phases by the number of products per sample:
//!
//! ```text
//! ramp-up      n in 0 .. n_y-1            1, 2, .., n_y-1 products
//! steady state n in n_y-1 .. n_x          n_y products
//! ramp-down    n in n_x .. n_x+n_y-1      n_y-1, .., 1 products
//! ```
//!
//! The accumulator wraps on overflow. Wrapping addition is associative, so the
//! paired loops (which reorder the products) are bit-identical to the scalar
//! phase-by-phase loops.

use super::by_length;
use crate::dsp::helpers::{dual_mac, mac, read_pair, read_pair_rev, truncate_q15};

/// Convolve `a` with `b` into `dst[..a.len() + b.len() - 1]`.
///
/// Reduced precision: each output accumulates in an `i32` with one guard
/// bit, is shifted right by 15 and truncated to 16 bits without saturation.
/// Inputs whose products sum past the `i32` range wrap around; scale them
/// down by `log2(min(a.len(), b.len()))` bits to avoid that.
///
/// Nothing is written when either input is empty.
///
/// # Panics
///
/// Panics if `dst` is shorter than `a.len() + b.len() - 1`.
pub fn convolve_fast(a: &[i16], b: &[i16], dst: &mut [i16]) {
    let (x, y) = by_length(a, b);
    if y.is_empty() {
        return;
    }
    let dst = &mut dst[..x.len() + y.len() - 1];

    #[cfg(feature = "paired")]
    convolve_fast_paired(x, y, dst);
    #[cfg(not(feature = "paired"))]
    convolve_fast_scalar(x, y, dst);
}

/// Products `x[k] * y[n - k]` for `k in k0..k1`, one at a time.
#[inline]
fn taps(x: &[i16], y: &[i16], n: usize, k0: usize, k1: usize) -> i32 {
    (k0..k1).fold(0i32, |sum, k| mac(x[k], y[n - k], sum))
}

/// Same sum as [`taps`], two products per step.
#[inline]
fn taps_paired(x: &[i16], y: &[i16], n: usize, k0: usize, k1: usize) -> i32 {
    let mut sum = 0i32;
    let mut k = k0;
    while k + 1 < k1 {
        // (x[k], x[k+1]) against (y[n-k], y[n-k-1])
        sum = dual_mac(read_pair(x, k), read_pair_rev(y, n - k), sum);
        k += 2;
    }
    if k < k1 {
        sum = mac(x[k], y[n - k], sum);
    }
    sum
}

/// Reference implementation: one product per step, phase by phase.
#[cfg_attr(feature = "paired", allow(dead_code))]
pub(crate) fn convolve_fast_scalar(x: &[i16], y: &[i16], dst: &mut [i16]) {
    let (n_x, n_y) = (x.len(), y.len());

    // Ramp-up
    for n in 0..n_y - 1 {
        dst[n] = truncate_q15(taps(x, y, n, 0, n + 1));
    }

    // Steady state
    for n in n_y - 1..n_x {
        dst[n] = truncate_q15(taps(x, y, n, n + 1 - n_y, n + 1));
    }

    // Ramp-down
    for n in n_x..n_x + n_y - 1 {
        dst[n] = truncate_q15(taps(x, y, n, n + 1 - n_y, n_x));
    }
}

/// Paired implementation: 2-wide MACs, steady state in blocks of 4 outputs.
#[cfg_attr(not(feature = "paired"), allow(dead_code))]
pub(crate) fn convolve_fast_paired(x: &[i16], y: &[i16], dst: &mut [i16]) {
    let (n_x, n_y) = (x.len(), y.len());

    for n in 0..n_y - 1 {
        dst[n] = truncate_q15(taps_paired(x, y, n, 0, n + 1));
    }

    let steady = n_x + 1 - n_y;
    let blocks = steady / 4;
    for block in 0..blocks {
        let start = 4 * block;
        let acc = steady_block4(x, y, start);
        for (j, &sum) in acc.iter().enumerate() {
            dst[n_y - 1 + start + j] = truncate_q15(sum);
        }
    }
    for n in n_y - 1 + 4 * blocks..n_x {
        dst[n] = truncate_q15(taps_paired(x, y, n, n + 1 - n_y, n + 1));
    }

    for n in n_x..n_x + n_y - 1 {
        dst[n] = truncate_q15(taps_paired(x, y, n, n + 1 - n_y, n_x));
    }
}

/// Four consecutive steady-state outputs whose windows start at `x[start]`.
///
/// Each `y` pair is loaded once and applied to four overlapping `x` pairs;
/// the upper two `x` pairs carry over as the lower two of the next step.
#[inline]
fn steady_block4(x: &[i16], y: &[i16], start: usize) -> [i32; 4] {
    let n_y = y.len();
    let mut acc = [0i32; 4];

    if n_y >= 2 {
        let mut x0 = read_pair(x, start);
        let mut x1 = read_pair(x, start + 1);
        let mut k = 0;
        while k + 1 < n_y {
            let c = read_pair_rev(y, n_y - 1 - k);
            let x2 = read_pair(x, start + k + 2);
            let x3 = read_pair(x, start + k + 3);

            acc[0] = dual_mac(x0, c, acc[0]);
            acc[1] = dual_mac(x1, c, acc[1]);
            acc[2] = dual_mac(x2, c, acc[2]);
            acc[3] = dual_mac(x3, c, acc[3]);

            x0 = x2;
            x1 = x3;
            k += 2;
        }
    }

    if n_y % 2 == 1 {
        let k = n_y - 1;
        let c = y[0];
        for (j, sum) in acc.iter_mut().enumerate() {
            *sum = mac(x[start + j + k], c, *sum);
        }
    }
    acc
}
