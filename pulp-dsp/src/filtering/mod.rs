//! Linear convolution of Q15 sequences.
//!
//! Two named kernels with different overflow policies:
//!
//! | Kernel | Accumulator | Finish | Scratch |
//! |--------|-------------|--------|---------|
//! | [`convolve_fast`] | `i32` (wraps) | `>> 15`, truncated | none |
//! | [`convolve_precise`] | `i64` | `>> 15`, saturated | two buffers |
//!
//! Both produce `a.len() + b.len() - 1` samples and are symmetric in their
//! operands. The shorter sequence always slides across the longer one.
//!
//! ## Scaling
//!
//! [`convolve_fast`] has a single guard bit. Scale the inputs down by
//! `log2(min(a.len(), b.len()))` bits to rule out wrap-around; in that regime
//! both kernels return identical samples.

mod conv_fast;
mod conv_precise;

pub use conv_fast::convolve_fast;
pub use conv_precise::convolve_precise;

/// Number of output samples for inputs of length `len_a` and `len_b`.
///
/// Zero when either input is empty.
pub const fn conv_output_len(len_a: usize, len_b: usize) -> usize {
    if len_a == 0 || len_b == 0 {
        0
    } else {
        len_a + len_b - 1
    }
}

/// Required length of the first [`convolve_precise`] scratch buffer:
/// `max(len_a, len_b) + 2 * min(len_a, len_b) - 2`.
pub const fn conv_scratch1_len(len_a: usize, len_b: usize) -> usize {
    let (long, short) = if len_a >= len_b { (len_a, len_b) } else { (len_b, len_a) };
    if short == 0 {
        0
    } else {
        long + 2 * short - 2
    }
}

/// Required length of the second [`convolve_precise`] scratch buffer:
/// `min(len_a, len_b)`.
pub const fn conv_scratch2_len(len_a: usize, len_b: usize) -> usize {
    if len_a < len_b {
        len_a
    } else {
        len_b
    }
}

/// Order operands as `(longer, shorter)`; `a` wins ties.
#[inline]
fn by_length<'a>(a: &'a [i16], b: &'a [i16]) -> (&'a [i16], &'a [i16]) {
    if a.len() >= b.len() {
        (a, b)
    } else {
        (b, a)
    }
}
