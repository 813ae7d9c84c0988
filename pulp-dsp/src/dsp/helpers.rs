//! Q15 arithmetic primitives shared by every kernel.
//!
//! Saturation and overflow policy lives here and nowhere else: kernels finish
//! their accumulators through [`truncate_q15`] (fast, wrapping) or
//! [`saturate_q15`] (precise), and accumulate through [`mac`] / [`dual_mac`].

use super::intrinsics::{
    multiply_accumulate_16x16_dual, multiply_accumulate_16x16_dual_long,
    multiply_accumulate_16x16_dual_long_exchange, multiply_subtract_16x16_dual_long,
    pack_16b_16b, saturate16,
};
use crate::constants::{Q15_MAX, Q15_MIN, Q15_SHIFT};

/// Clamp `value` into `[low, high]`.
#[inline(always)]
pub fn clip<T: PartialOrd>(value: T, low: T, high: T) -> T {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

/// Wide accumulator for Q15 products.
///
/// `i32` is the "fast" accumulator: one guard bit, wraps on overflow.
/// `i64` is the "precise" accumulator: 33 guard bits, exact for any length a
/// `u16`-dimensioned kernel can produce.
pub trait Accumulator: Copy + Default {
    /// `self + a*b`.
    fn mac(self, a: i16, b: i16) -> Self;

    /// `self + x.lo*y.lo + x.hi*y.hi` on packed pairs.
    fn dual_mac(self, x: u32, y: u32) -> Self;
}

impl Accumulator for i32 {
    #[inline(always)]
    fn mac(self, a: i16, b: i16) -> Self {
        self.wrapping_add(a as i32 * b as i32)
    }

    #[inline(always)]
    fn dual_mac(self, x: u32, y: u32) -> Self {
        multiply_accumulate_16x16_dual(self, x, y)
    }
}

impl Accumulator for i64 {
    #[inline(always)]
    fn mac(self, a: i16, b: i16) -> Self {
        self + a as i64 * b as i64
    }

    #[inline(always)]
    fn dual_mac(self, x: u32, y: u32) -> Self {
        multiply_accumulate_16x16_dual_long(self, x, y)
    }
}

/// Multiply-accumulate `acc + a*b` in the precision of `A`.
#[inline(always)]
pub fn mac<A: Accumulator>(a: i16, b: i16, acc: A) -> A {
    acc.mac(a, b)
}

/// Paired multiply-accumulate `acc + x.lo*y.lo + x.hi*y.hi` in the precision of `A`.
#[inline(always)]
pub fn dual_mac<A: Accumulator>(x: u32, y: u32, acc: A) -> A {
    acc.dual_mac(x, y)
}

/// Complex product, real part: `acc + x.re*y.re - x.im*y.im`.
#[inline(always)]
pub fn cmplx_mac_re(x: u32, y: u32, acc: i64) -> i64 {
    multiply_subtract_16x16_dual_long(acc, x, y)
}

/// Complex product, imaginary part: `acc + x.re*y.im + x.im*y.re`.
#[inline(always)]
pub fn cmplx_mac_im(x: u32, y: u32, acc: i64) -> i64 {
    multiply_accumulate_16x16_dual_long_exchange(acc, x, y)
}

/// Pack `s[i]` (low half) and `s[i + 1]` (high half).
#[inline(always)]
pub fn read_pair(s: &[i16], i: usize) -> u32 {
    pack_16b_16b(s[i + 1] as i32, s[i] as i32)
}

/// Pack `s[i]` (low half) and `s[i - 1]` (high half), walking backwards.
#[inline(always)]
pub fn read_pair_rev(s: &[i16], i: usize) -> u32 {
    pack_16b_16b(s[i - 1] as i32, s[i] as i32)
}

/// Finish a fast accumulator: Q2.30 → Q1.15, keeping the low 16 bits.
///
/// No saturation: an accumulator that overflowed stays wrapped.
#[inline(always)]
pub fn truncate_q15(acc: i32) -> i16 {
    (acc >> Q15_SHIFT) as i16
}

/// Finish a precise accumulator: Q34.30 → Q1.15, saturated.
#[inline(always)]
pub fn saturate_q15(acc: i64) -> i16 {
    clip(acc >> Q15_SHIFT, Q15_MIN as i64, Q15_MAX as i64) as i16
}

/// Saturating addition of two Q15 values.
#[inline(always)]
pub fn saturating_add_q15(a: i16, b: i16) -> i16 {
    saturate16(a as i32 + b as i32)
}

/// Dot product, one product per step.
#[inline]
pub fn dot_q15<A: Accumulator>(x: &[i16], y: &[i16], acc: A) -> A {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y.iter()).fold(acc, |acc, (&a, &b)| mac(a, b, acc))
}

/// Dot product, two products per step plus a scalar tail.
///
/// Bit-identical to [`dot_q15`] for both accumulator widths.
#[inline]
pub fn dot_q15_paired<A: Accumulator>(x: &[i16], y: &[i16], mut acc: A) -> A {
    debug_assert_eq!(x.len(), y.len());
    let len = x.len().min(y.len());
    let mut i = 0;
    while i + 1 < len {
        acc = dual_mac(read_pair(x, i), read_pair(y, i), acc);
        i += 2;
    }
    if i < len {
        acc = mac(x[i], y[i], acc);
    }
    acc
}
