use super::{check_dims, MatrixQ15, MatrixQ15Mut};
use crate::dsp::helpers::{cmplx_mac_im, cmplx_mac_re, read_pair, saturate_q15};
use crate::error::Result;

/// Complex Q15 matrix product `dst = a × b`.
///
/// Elements are interleaved `(re, im)` pairs, so every backing slice holds
/// `2 * rows * cols` samples. The real and imaginary parts of each element
/// accumulate in separate `i64`s,
///
/// ```text
/// re = Σ (a.re * b.re - a.im * b.im)
/// im = Σ (a.re * b.im + a.im * b.re)
/// ```
///
/// and are shifted right by 15 and saturated. Unlike [`mat_mult_fast`]
/// (which truncates) the result never wraps.
///
/// `scratch` receives `bᵀ` and needs `2 * b.rows * b.cols` samples.
///
/// # Errors
///
/// [`DspError::SizeMismatch`](crate::DspError::SizeMismatch) on incompatible
/// dimensions; `dst` and `scratch` are untouched.
///
/// # Panics
///
/// Panics if a backing slice or `scratch` is shorter than required, before
/// anything is written.
///
/// [`mat_mult_fast`]: super::mat_mult_fast
pub fn mat_cmplx_mult(
    a: &MatrixQ15<'_>,
    b: &MatrixQ15<'_>,
    dst: &mut MatrixQ15Mut<'_>,
    scratch: &mut [i16],
) -> Result<()> {
    check_dims(a, b, dst)?;

    let (rows_b, cols_b) = (b.rows as usize, b.cols as usize);

    let a_data = &a.data[..2 * a.len()];
    let b_data = &b.data[..2 * b.len()];
    let out = &mut dst.data[..2 * a.rows as usize * cols_b];
    let bt = &mut scratch[..2 * b.len()];

    transpose_complex(b_data, rows_b, cols_b, bt);

    #[cfg(feature = "paired")]
    cmplx_mult_paired(a_data, bt, a.cols as usize, cols_b, out);
    #[cfg(not(feature = "paired"))]
    cmplx_mult_scalar(a_data, bt, a.cols as usize, cols_b, out);

    Ok(())
}

/// Transpose a matrix of `(re, im)` pairs, keeping each pair intact.
fn transpose_complex(src: &[i16], rows: usize, cols: usize, dst: &mut [i16]) {
    for r in 0..rows {
        for c in 0..cols {
            let from = 2 * (r * cols + c);
            let to = 2 * (c * rows + r);
            dst[to] = src[from];
            dst[to + 1] = src[from + 1];
        }
    }
}

/// One complex element per step, four real products.
#[cfg_attr(feature = "paired", allow(dead_code))]
pub(crate) fn cmplx_mult_scalar(
    a: &[i16],
    bt: &[i16],
    inner: usize,
    cols_b: usize,
    out: &mut [i16],
) {
    for (i, o) in out.chunks_exact_mut(2).enumerate() {
        let (r, c) = (i / cols_b, i % cols_b);
        let a_row = &a[2 * r * inner..2 * (r + 1) * inner];
        let bt_row = &bt[2 * c * inner..2 * (c + 1) * inner];

        let (mut re, mut im) = (0i64, 0i64);
        for (x, y) in a_row.chunks_exact(2).zip(bt_row.chunks_exact(2)) {
            let (ar, ai) = (x[0] as i64, x[1] as i64);
            let (br, bi) = (y[0] as i64, y[1] as i64);
            re += ar * br - ai * bi;
            im += ar * bi + ai * br;
        }
        o[0] = saturate_q15(re);
        o[1] = saturate_q15(im);
    }
}

/// One complex element per step as two paired MACs.
#[cfg_attr(not(feature = "paired"), allow(dead_code))]
pub(crate) fn cmplx_mult_paired(
    a: &[i16],
    bt: &[i16],
    inner: usize,
    cols_b: usize,
    out: &mut [i16],
) {
    for (i, o) in out.chunks_exact_mut(2).enumerate() {
        let (r, c) = (i / cols_b, i % cols_b);
        let a_row = &a[2 * r * inner..2 * (r + 1) * inner];
        let bt_row = &bt[2 * c * inner..2 * (c + 1) * inner];

        let (mut re, mut im) = (0i64, 0i64);
        for k in 0..inner {
            let x = read_pair(a_row, 2 * k);
            let y = read_pair(bt_row, 2 * k);
            re = cmplx_mac_re(x, y, re);
            im = cmplx_mac_im(x, y, im);
        }
        o[0] = saturate_q15(re);
        o[1] = saturate_q15(im);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Q15_HALF;
    use crate::error::DspError;
    use crate::matrix::mat_mult_fast;

    fn run(a: &MatrixQ15<'_>, b: &MatrixQ15<'_>, rows: u16, cols: u16, out: &mut [i16]) {
        let mut scratch = [0i16; 64];
        mat_cmplx_mult(a, b, &mut MatrixQ15Mut::new(rows, cols, out), &mut scratch).unwrap();
    }

    #[test]
    fn transpose_keeps_pairs() {
        // 2x2 of (re, im): [(1,2) (3,4); (5,6) (7,8)]
        let src = [1i16, 2, 3, 4, 5, 6, 7, 8];
        let mut dst = [0i16; 8];
        transpose_complex(&src, 2, 2, &mut dst);
        assert_eq!(dst, [1, 2, 5, 6, 3, 4, 7, 8]);
    }

    #[test]
    fn i_times_i_is_minus_one() {
        let a = [0, Q15_HALF];
        let b = [0, Q15_HALF];
        let mut out = [0i16; 2];
        run(&MatrixQ15::new(1, 1, &a), &MatrixQ15::new(1, 1, &b), 1, 1, &mut out);
        // (0.5i)^2 = -0.25
        assert_eq!(out, [-8192, 0]);
    }

    #[test]
    fn half_identity_halves_b() {
        let a = [Q15_HALF, 0, 0, 0, 0, 0, Q15_HALF, 0];
        let b = [100i16, -200, 300, -400, 500, 600, -700, 800, 32767, -32768, 2, 4];
        let mut out = [0i16; 12];
        run(&MatrixQ15::new(2, 2, &a), &MatrixQ15::new(2, 3, &b), 2, 3, &mut out);
        for (o, &x) in out.iter().zip(&b) {
            assert_eq!(*o, x >> 1);
        }
    }

    #[test]
    fn row_offsets_follow_inner_dimension() {
        // [(1,0) (2,0) (3,0); (4,0) (5,0) (6,0)] × [(1,0); (1,0); (1,0)], scaled
        let s: i16 = 1 << 10;
        let a = [s, 0, 2 * s, 0, 3 * s, 0, 4 * s, 0, 5 * s, 0, 6 * s, 0];
        let b = [Q15_HALF, 0, Q15_HALF, 0, Q15_HALF, 0];
        let mut out = [0i16; 4];
        run(&MatrixQ15::new(2, 3, &a), &MatrixQ15::new(3, 1, &b), 2, 1, &mut out);
        assert_eq!(out, [3 * s, 0, 15 * s / 2, 0]);
    }

    #[test]
    fn saturates_where_fast_real_wraps() {
        let full = [32767i16, 32767];
        let mut real = [0i16; 1];
        let mut scratch = [0i16; 4];
        mat_mult_fast(
            &MatrixQ15::new(1, 2, &full),
            &MatrixQ15::new(2, 1, &full),
            &mut MatrixQ15Mut::new(1, 1, &mut real),
            &mut scratch,
        )
        .unwrap();
        assert_eq!(real, [-4]);

        let full_c = [32767i16, 0, 32767, 0];
        let mut cmplx = [0i16; 2];
        run(&MatrixQ15::new(1, 2, &full_c), &MatrixQ15::new(2, 1, &full_c), 1, 1, &mut cmplx);
        assert_eq!(cmplx, [32767, 0]);

        let neg_i = [0i16, -32768, 0, -32768];
        run(&MatrixQ15::new(1, 2, &neg_i), &MatrixQ15::new(2, 1, &full_c), 1, 1, &mut cmplx);
        assert_eq!(cmplx, [0, -32768]);
    }

    #[test]
    fn paired_matches_scalar() {
        let mut state = 0x9e37_79b9u32;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as i16
        };
        for inner in 1..=5usize {
            let a: [i16; 30] = core::array::from_fn(|_| next());
            let bt: [i16; 40] = core::array::from_fn(|_| next());
            let (rows, cols) = (3, 4);
            let mut scalar = [0i16; 24];
            let mut paired = [0i16; 24];
            let (a, bt) = (&a[..2 * rows * inner], &bt[..2 * cols * inner]);
            cmplx_mult_scalar(a, bt, inner, cols, &mut scalar);
            cmplx_mult_paired(a, bt, inner, cols, &mut paired);
            assert_eq!(scalar, paired, "inner={inner}");
        }
    }

    #[test]
    fn size_mismatch_leaves_buffers_untouched() {
        let a = [1i16; 12];
        let b = [1i16; 8];
        let mut out = [7i16; 8];
        let mut scratch = [7i16; 8];
        let err = mat_cmplx_mult(
            &MatrixQ15::new(2, 3, &a),
            &MatrixQ15::new(2, 2, &b),
            &mut MatrixQ15Mut::new(2, 2, &mut out),
            &mut scratch,
        );
        assert!(matches!(err, Err(DspError::SizeMismatch { .. })));
        assert_eq!(out, [7; 8]);
        assert_eq!(scratch, [7; 8]);
    }

    #[test]
    #[should_panic]
    fn undersized_scratch_panics() {
        let a = [1i16; 4];
        let mut out = [0i16; 2];
        let mut scratch = [0i16; 3];
        let _ = mat_cmplx_mult(
            &MatrixQ15::new(1, 2, &a),
            &MatrixQ15::new(2, 1, &a),
            &mut MatrixQ15Mut::new(1, 1, &mut out),
            &mut scratch,
        );
    }
}
