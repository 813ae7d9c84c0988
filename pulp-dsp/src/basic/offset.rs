use crate::dsp::helpers::saturating_add_q15;
#[cfg(feature = "paired")]
use crate::dsp::{helpers::read_pair, intrinsics::{pack_16b_16b, qadd16}};

/// Q15 offset: `dst[n] = saturate(src[n] + offset)`.
pub fn offset_q15(src: &[i16], offset: i16, dst: &mut [i16]) {
    let dst = &mut dst[..src.len()];

    #[cfg(feature = "paired")]
    let start = {
        let packed_offset = pack_16b_16b(offset as i32, offset as i32);
        let pairs = src.len() / 2;
        for i in 0..pairs {
            let sum = qadd16(read_pair(src, 2 * i), packed_offset);
            dst[2 * i] = sum as i16;
            dst[2 * i + 1] = (sum >> 16) as i16;
        }
        pairs * 2
    };
    #[cfg(not(feature = "paired"))]
    let start = 0;

    for (d, &s) in dst[start..].iter_mut().zip(&src[start..]) {
        *d = saturating_add_q15(s, offset);
    }
}
