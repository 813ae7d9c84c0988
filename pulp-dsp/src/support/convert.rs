//! Fixed-point and floating-point format conversions.

use crate::constants::Q7_SHIFT;
use crate::dsp::intrinsics::signed_saturate_rshift;

/// Q15 → Q31: `dst[n] = src[n] << 16`. Exact.
pub fn q15_to_q31(src: &[i16], dst: &mut [i32]) {
    for (d, &s) in dst[..src.len()].iter_mut().zip(src) {
        *d = (s as i32) << 16;
    }
}

/// Q15 → Q7: `dst[n] = src[n] >> 8`, discarding the low byte.
pub fn q15_to_q7(src: &[i16], dst: &mut [i8]) {
    for (d, &s) in dst[..src.len()].iter_mut().zip(src) {
        *d = (s >> 8) as i8;
    }
}

/// Q7 → Q15: `dst[n] = src[n] << 8`. Exact.
pub fn q7_to_q15(src: &[i8], dst: &mut [i16]) {
    for (d, &s) in dst[..src.len()].iter_mut().zip(src) {
        *d = (s as i16) << 8;
    }
}

/// Q7 → `f32`: `dst[n] = src[n] / 128`.
pub fn q7_to_float(src: &[i8], dst: &mut [f32]) {
    const SCALE: f32 = 1.0 / (1u32 << Q7_SHIFT) as f32;
    for (d, &s) in dst[..src.len()].iter_mut().zip(src) {
        *d = s as f32 * SCALE;
    }
}

/// `f32` → Q7: `dst[n] = saturate(src[n] * 128)`.
///
/// Truncates toward zero unless the `rounding` feature is enabled, in which
/// case halves round away from zero. Out-of-range inputs saturate to
/// `-128..=127`.
pub fn float_to_q7(src: &[f32], dst: &mut [i8]) {
    const SCALE: f32 = (1u32 << Q7_SHIFT) as f32;
    for (d, &s) in dst[..src.len()].iter_mut().zip(src) {
        let scaled = s * SCALE;
        #[cfg(feature = "rounding")]
        let scaled = libm::roundf(scaled);
        #[cfg(not(feature = "rounding"))]
        let scaled = libm::truncf(scaled);
        *d = signed_saturate_rshift::<8, 0>(scaled as i32) as i8;
    }
}
