/// Set every sample of `dst` to `value`.
pub fn fill_q15(value: i16, dst: &mut [i16]) {
    dst.fill(value);
}

/// Set every sample of `dst` to `value`.
pub fn fill_q7(value: i8, dst: &mut [i8]) {
    dst.fill(value);
}

/// Copy `src` into the first `src.len()` samples of `dst`.
///
/// # Panics
///
/// Panics if `dst` is shorter than `src`.
pub fn copy_q15(src: &[i16], dst: &mut [i16]) {
    dst[..src.len()].copy_from_slice(src);
}
