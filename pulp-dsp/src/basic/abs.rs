/// Q31 absolute value: `dst[n] = |src[n]|`.
///
/// `i32::MIN` (-1.0) saturates to `i32::MAX`.
pub fn abs_q31(src: &[i32], dst: &mut [i32]) {
    for (d, &s) in dst[..src.len()].iter_mut().zip(src) {
        *d = s.saturating_abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_q31_saturates_min() {
        let mut dst = [0i32; 4];
        abs_q31(&[-5, 5, 0, i32::MIN], &mut dst);
        assert_eq!(dst, [5, 5, 0, i32::MAX]);
    }
}
