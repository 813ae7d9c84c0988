//! Q15 matrix multiplication.
//!
//! Both kernels transpose `B` into a caller-provided scratch buffer so each
//! output element is a contiguous dot product of a row of `A` and a row of
//! `Bᵀ`.
//!
//! | Kernel | Elements | Accumulator | Finish | Scratch |
//! |--------|----------|-------------|--------|---------|
//! | [`mat_mult_fast`] | real | `i32` (wraps) | `>> 15`, truncated | `B.rows * B.cols` |
//! | [`mat_cmplx_mult`] | complex | `i64` ×2 | `>> 15`, saturated | `2 * B.rows * B.cols` |
//!
//! Dimensions are checked before anything is touched. A mismatch returns
//! [`DspError::SizeMismatch`] with `dst` and `scratch` unmodified.

mod mat_cmplx_mult;
mod mat_mult_fast;

pub use mat_cmplx_mult::mat_cmplx_mult;
pub use mat_mult_fast::mat_mult_fast;

use crate::error::{DspError, Result};

/// Read-only row-major Q15 matrix.
///
/// `data` holds `rows * cols` samples, or `2 * rows * cols` interleaved
/// `(re, im)` samples when used as a complex operand.
#[derive(Debug, Clone, Copy)]
pub struct MatrixQ15<'a> {
    pub rows: u16,
    pub cols: u16,
    pub data: &'a [i16],
}

/// Writable row-major Q15 matrix, the destination of a product.
#[derive(Debug)]
pub struct MatrixQ15Mut<'a> {
    pub rows: u16,
    pub cols: u16,
    pub data: &'a mut [i16],
}

impl<'a> MatrixQ15<'a> {
    /// Describe a `rows` x `cols` row-major matrix backed by `data`.
    pub const fn new(rows: u16, cols: u16, data: &'a [i16]) -> Self {
        Self { rows, cols, data }
    }

    /// Number of elements (`rows * cols`).
    #[inline]
    pub const fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> MatrixQ15Mut<'a> {
    /// Describe a writable `rows` x `cols` row-major matrix backed by `data`.
    pub fn new(rows: u16, cols: u16, data: &'a mut [i16]) -> Self {
        Self { rows, cols, data }
    }

    /// Number of elements (`rows * cols`).
    #[inline]
    pub const fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reborrow as a read-only matrix.
    pub fn as_ref(&self) -> MatrixQ15<'_> {
        MatrixQ15 {
            rows: self.rows,
            cols: self.cols,
            data: self.data,
        }
    }
}

/// `A.cols == B.rows`, `A.rows == dst.rows` and `B.cols == dst.cols`.
fn check_dims(a: &MatrixQ15<'_>, b: &MatrixQ15<'_>, dst: &MatrixQ15Mut<'_>) -> Result<()> {
    if a.cols != b.rows || a.rows != dst.rows || b.cols != dst.cols {
        return Err(DspError::SizeMismatch {
            a_rows: a.rows,
            a_cols: a.cols,
            b_rows: b.rows,
            b_cols: b.cols,
            dst_rows: dst.rows,
            dst_cols: dst.cols,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_dims_accepts_conformant_shapes() {
        let a = MatrixQ15::new(2, 3, &[0; 6]);
        let b = MatrixQ15::new(3, 4, &[0; 12]);
        let mut out = [0i16; 8];
        let dst = MatrixQ15Mut::new(2, 4, &mut out);
        assert_eq!(check_dims(&a, &b, &dst), Ok(()));
    }

    #[test]
    fn check_dims_reports_every_dimension() {
        let a = MatrixQ15::new(2, 3, &[0; 6]);
        let b = MatrixQ15::new(2, 2, &[0; 4]);
        let mut out = [0i16; 4];
        let dst = MatrixQ15Mut::new(2, 2, &mut out);
        assert_eq!(
            check_dims(&a, &b, &dst),
            Err(DspError::SizeMismatch {
                a_rows: 2,
                a_cols: 3,
                b_rows: 2,
                b_cols: 2,
                dst_rows: 2,
                dst_cols: 2,
            })
        );
    }

    #[test]
    fn check_dims_rejects_wrong_destination() {
        let a = MatrixQ15::new(2, 2, &[0; 4]);
        let b = MatrixQ15::new(2, 3, &[0; 6]);
        let mut out = [0i16; 6];
        assert!(check_dims(&a, &b, &MatrixQ15Mut::new(3, 2, &mut out)).is_err());
        assert!(check_dims(&a, &b, &MatrixQ15Mut::new(2, 2, &mut out)).is_err());
    }

    #[test]
    fn len_and_reborrow() {
        let mut out = [0i16; 6];
        let dst = MatrixQ15Mut::new(2, 3, &mut out);
        assert_eq!(dst.len(), 6);
        assert_eq!(dst.as_ref().cols, 3);
        assert!(MatrixQ15::new(0, 5, &[]).is_empty());
    }
}
