//! DSP instruction wrappers with pure-Rust fallbacks.
//!
//! On `thumbv7em` targets (Cortex-M4/M7 with DSP extension), these compile to
//! single-cycle ARM instructions. On every other target (host tests, RISC-V
//! cores without the packed-SIMD extension) equivalent pure-Rust
//! implementations are used. Both forms are bit-identical, including wrap-around
//! of the 32-bit accumulating forms.
//!
//! Packed operands hold two Q15 values in one `u32`: the lower halfword is the
//! element at the lower address, the upper halfword the next one.

/// Signed saturate with arithmetic right shift.
///
/// Computes `saturate(val >> RSHIFT, -(2^(BITS-1))..2^(BITS-1)-1)`.
///
/// Maps to ARM `SSAT`. `BITS` and `RSHIFT` must be compile-time constants
/// because the ARM instruction requires immediate operands.
#[inline(always)]
pub fn signed_saturate_rshift<const BITS: u32, const RSHIFT: u32>(val: i32) -> i32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "ssat {out}, #{bits}, {val}, asr #{rshift}",
                out = out(reg) out,
                val = in(reg) val,
                bits = const BITS,
                rshift = const RSHIFT,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        let shifted = val >> RSHIFT;
        let max = (1i32 << (BITS - 1)) - 1;
        let min = -(1i32 << (BITS - 1));
        if shifted > max {
            max
        } else if shifted < min {
            min
        } else {
            shifted
        }
    }
}

/// Saturate an `i32` to `i16` range (`-32768..=32767`).
///
/// Maps to ARM `SSAT #16`.
#[inline(always)]
pub fn saturate16(val: i32) -> i16 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "ssat {out}, #16, {val}",
                out = out(reg) out,
                val = in(reg) val,
            );
        }
        out as i16
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        if val > 32767 {
            32767
        } else if val < -32768 {
            -32768
        } else {
            val as i16
        }
    }
}

/// Pack bottom 16 bits of `a` into top half, bottom 16 bits of `b` into bottom half.
///
/// Computes `(a[15:0] << 16) | b[15:0]`. Maps to ARM `PKHBT`.
#[inline(always)]
pub fn pack_16b_16b(a: i32, b: i32) -> u32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: u32;
        unsafe {
            core::arch::asm!(
                "pkhbt {out}, {b}, {a}, lsl #16",
                out = out(reg) out,
                a = in(reg) a,
                b = in(reg) b,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        ((a as u32) << 16) | (b as u32 & 0x0000FFFF)
    }
}

/// Saturating dual 16-bit addition.
///
/// Independently saturate-adds the top and bottom 16-bit halfwords.
/// Maps to ARM `QADD16`.
#[inline(always)]
pub fn qadd16(a: u32, b: u32) -> u32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: u32;
        unsafe {
            core::arch::asm!(
                "qadd16 {out}, {a}, {b}",
                out = out(reg) out,
                a = in(reg) a,
                b = in(reg) b,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        let a_lo = a as i16 as i32;
        let a_hi = (a >> 16) as i16 as i32;
        let b_lo = b as i16 as i32;
        let b_hi = (b >> 16) as i16 as i32;
        let lo = (a_lo + b_lo).clamp(-32768, 32767) as i16 as u16;
        let hi = (a_hi + b_hi).clamp(-32768, 32767) as i16 as u16;
        (hi as u32) << 16 | lo as u32
    }
}

/// Dual 16x16 multiply-accumulate, 32-bit accumulator.
///
/// Computes `sum + a[15:0]*b[15:0] + a[31:16]*b[31:16]`, wrapping on overflow.
/// Maps to ARM `SMLAD`.
#[inline(always)]
pub fn multiply_accumulate_16x16_dual(sum: i32, a: u32, b: u32) -> i32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "smlad {out}, {a}, {b}, {sum}",
                out = out(reg) out,
                a = in(reg) a,
                b = in(reg) b,
                sum = in(reg) sum,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        let lo = (a as i16 as i32) * (b as i16 as i32);
        let hi = ((a >> 16) as i16 as i32) * ((b >> 16) as i16 as i32);
        sum.wrapping_add(lo).wrapping_add(hi)
    }
}

/// Dual 16x16 multiply-accumulate, 64-bit accumulator.
///
/// Computes `sum + a[15:0]*b[15:0] + a[31:16]*b[31:16]`. Maps to ARM `SMLALD`.
#[inline(always)]
pub fn multiply_accumulate_16x16_dual_long(sum: i64, a: u32, b: u32) -> i64 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let mut lo = sum as u32;
        let mut hi = (sum >> 32) as u32;
        unsafe {
            core::arch::asm!(
                "smlald {lo}, {hi}, {a}, {b}",
                lo = inout(reg) lo,
                hi = inout(reg) hi,
                a = in(reg) a,
                b = in(reg) b,
            );
        }
        (((hi as u64) << 32) | lo as u64) as i64
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        let lo = (a as i16 as i64) * (b as i16 as i64);
        let hi = ((a >> 16) as i16 as i64) * ((b >> 16) as i16 as i64);
        sum + lo + hi
    }
}

/// Dual 16x16 multiply-subtract, 64-bit accumulator.
///
/// Computes `sum + a[15:0]*b[15:0] - a[31:16]*b[31:16]`. Maps to ARM `SMLSLD`.
#[inline(always)]
pub fn multiply_subtract_16x16_dual_long(sum: i64, a: u32, b: u32) -> i64 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let mut lo = sum as u32;
        let mut hi = (sum >> 32) as u32;
        unsafe {
            core::arch::asm!(
                "smlsld {lo}, {hi}, {a}, {b}",
                lo = inout(reg) lo,
                hi = inout(reg) hi,
                a = in(reg) a,
                b = in(reg) b,
            );
        }
        (((hi as u64) << 32) | lo as u64) as i64
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        let lo = (a as i16 as i64) * (b as i16 as i64);
        let hi = ((a >> 16) as i16 as i64) * ((b >> 16) as i16 as i64);
        sum + lo - hi
    }
}

/// Dual 16x16 multiply-accumulate with exchanged halfwords, 64-bit accumulator.
///
/// Computes `sum + a[15:0]*b[31:16] + a[31:16]*b[15:0]`. Maps to ARM `SMLALDX`.
#[inline(always)]
pub fn multiply_accumulate_16x16_dual_long_exchange(sum: i64, a: u32, b: u32) -> i64 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let mut lo = sum as u32;
        let mut hi = (sum >> 32) as u32;
        unsafe {
            core::arch::asm!(
                "smlaldx {lo}, {hi}, {a}, {b}",
                lo = inout(reg) lo,
                hi = inout(reg) hi,
                a = in(reg) a,
                b = in(reg) b,
            );
        }
        (((hi as u64) << 32) | lo as u64) as i64
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        let cross_lo = (a as i16 as i64) * ((b >> 16) as i16 as i64);
        let cross_hi = ((a >> 16) as i16 as i64) * (b as i16 as i64);
        sum + cross_lo + cross_hi
    }
}
