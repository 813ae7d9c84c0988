use crate::dsp::intrinsics::signed_saturate_rshift;

/// Q7 shift: left for positive `shift_bits` (saturating), arithmetic right
/// for negative `shift_bits`.
pub fn shift_q7(src: &[i8], shift_bits: i8, dst: &mut [i8]) {
    let dst = &mut dst[..src.len()];
    if shift_bits >= 0 {
        // Any non-zero Q7 value shifted by 8 is already out of range.
        let n = (shift_bits as u32).min(8);
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = signed_saturate_rshift::<8, 0>((s as i32) << n) as i8;
        }
    } else {
        let n = shift_bits.unsigned_abs().min(7) as u32;
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = s >> n;
        }
    }
}
