/// Element-wise product: `dst[n] = a[n] * b[n]`.
///
/// # Panics
///
/// Panics if `b` or `dst` is shorter than `a`.
pub fn mult_f32(a: &[f32], b: &[f32], dst: &mut [f32]) {
    let b = &b[..a.len()];
    for ((d, &x), &y) in dst[..a.len()].iter_mut().zip(a).zip(b) {
        *d = x * y;
    }
}
