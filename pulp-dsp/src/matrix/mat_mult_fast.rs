use super::{check_dims, MatrixQ15, MatrixQ15Mut};
use crate::dsp::helpers::truncate_q15;
#[cfg(not(feature = "paired"))]
use crate::dsp::helpers::dot_q15;
#[cfg(feature = "paired")]
use crate::dsp::helpers::dot_q15_paired;
use crate::error::Result;

/// Real Q15 matrix product `dst = a × b`, reduced precision.
///
/// Each element accumulates in an `i32` with one guard bit and is truncated
/// (not saturated) after the 15-bit shift. Products that sum past the `i32`
/// range wrap; scale `a` or `b` down by `log2(a.cols)` bits to avoid that.
///
/// `scratch` receives `bᵀ` and needs `b.rows * b.cols` samples.
///
/// # Errors
///
/// [`DspError::SizeMismatch`](crate::DspError::SizeMismatch) if
/// `a.cols != b.rows`, `a.rows != dst.rows` or `b.cols != dst.cols`.
/// `dst` and `scratch` are untouched in that case.
///
/// # Panics
///
/// Panics if a backing slice is shorter than its dimensions require or
/// `scratch` is undersized. The panic happens before anything is written.
pub fn mat_mult_fast(
    a: &MatrixQ15<'_>,
    b: &MatrixQ15<'_>,
    dst: &mut MatrixQ15Mut<'_>,
    scratch: &mut [i16],
) -> Result<()> {
    check_dims(a, b, dst)?;

    let inner = a.cols as usize;
    let (rows_b, cols_b) = (b.rows as usize, b.cols as usize);

    let a_data = &a.data[..a.len()];
    let b_data = &b.data[..b.len()];
    let out = &mut dst.data[..a.rows as usize * cols_b];
    let bt = &mut scratch[..b.len()];

    transpose(b_data, rows_b, cols_b, bt);

    if out.is_empty() {
        return Ok(());
    }
    if inner == 0 {
        out.fill(0);
        return Ok(());
    }

    for (a_row, out_row) in a_data.chunks_exact(inner).zip(out.chunks_exact_mut(cols_b)) {
        for (bt_row, o) in bt.chunks_exact(rows_b).zip(out_row.iter_mut()) {
            #[cfg(feature = "paired")]
            let sum = dot_q15_paired(a_row, bt_row, 0i32);
            #[cfg(not(feature = "paired"))]
            let sum = dot_q15(a_row, bt_row, 0i32);
            *o = truncate_q15(sum);
        }
    }
    Ok(())
}

/// `dst[c * rows + r] = src[r * cols + c]`.
fn transpose(src: &[i16], rows: usize, cols: usize, dst: &mut [i16]) {
    for (r, src_row) in src.chunks_exact(cols.max(1)).take(rows).enumerate() {
        for (c, &s) in src_row.iter().enumerate() {
            dst[c * rows + r] = s;
        }
    }
}
