/// Fractional bits of a Q15 sample; also the shift that turns a Q2.30 product back into Q1.15.
pub const Q15_SHIFT: u32 = 15;

/// Largest Q15 value (≈ 0.99997).
pub const Q15_MAX: i16 = i16::MAX;

/// Smallest Q15 value (-1.0).
pub const Q15_MIN: i16 = i16::MIN;

/// Closest Q15 representation of 1.0.
pub const Q15_ONE: i16 = Q15_MAX;

/// Q15 representation of 0.5.
pub const Q15_HALF: i16 = 1 << 14;

/// Fractional bits of a Q7 sample.
pub const Q7_SHIFT: u32 = 7;
