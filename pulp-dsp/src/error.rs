//! Kernel status reporting.

/// Errors returned by the matrix kernels.
///
/// The convolution kernels have no runtime error conditions; buffer sizing is
/// a caller contract enforced by slice bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DspError {
    /// Operand and destination dimensions are incompatible.
    ///
    /// Reported before any computation; nothing has been written.
    #[error(
        "matrix size mismatch: {a_rows}x{a_cols} * {b_rows}x{b_cols} -> {dst_rows}x{dst_cols}"
    )]
    SizeMismatch {
        a_rows: u16,
        a_cols: u16,
        b_rows: u16,
        b_cols: u16,
        dst_rows: u16,
        dst_cols: u16,
    },
}

/// Result alias for fallible kernels.
pub type Result<T> = core::result::Result<T, DspError>;
