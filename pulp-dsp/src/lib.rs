//! # pulp-dsp
//!
//! A `no_std`, zero-allocation library of Q15 fixed-point DSP kernels for
//! small cores with 2-wide 16-bit multiply-accumulate instructions, plus a
//! loader that boots such a core from a stimulus image over SPI.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Primitives | [`dsp`] | Saturation, paired MACs, accumulator finishing |
//! | Convolution | [`filtering`] | [`convolve_fast`](filtering::convolve_fast), [`convolve_precise`](filtering::convolve_precise) |
//! | Matrix | [`matrix`] | [`mat_mult_fast`](matrix::mat_mult_fast), [`mat_cmplx_mult`](matrix::mat_cmplx_mult) |
//! | Support | [`support`] | Fill, copy and format conversion |
//! | Basic | `basic` | Offset, shift, abs, multiply (feature-gated) |
//! | Loader | `loader` | SPI image loader and core control (feature-gated) |
//!
//! ## Quick start
//!
//! ```ignore
//! use pulp_dsp::filtering::{conv_output_len, convolve_fast};
//! use pulp_dsp::matrix::{mat_mult_fast, MatrixQ15, MatrixQ15Mut};
//!
//! let a = [4096i16, 8192, 12288];
//! let b = [16384i16, 16384];
//! let mut y = [0i16; conv_output_len(3, 2)];
//! convolve_fast(&a, &b, &mut y);
//!
//! let mut c = [0i16; 4];
//! let mut scratch = [0i16; 4];
//! mat_mult_fast(
//!     &MatrixQ15::new(2, 2, &[16384, 0, 0, 16384]),
//!     &MatrixQ15::new(2, 2, &[100, 200, 300, 400]),
//!     &mut MatrixQ15Mut::new(2, 2, &mut c),
//!     &mut scratch,
//! )?;
//! ```
//!
//! ## Precision
//!
//! Kernels named `fast` accumulate in `i32` with a single guard bit, wrap on
//! overflow and truncate the final `>> 15`. The precise convolution and the
//! complex matrix product accumulate in `i64` and saturate. Inputs to the
//! fast kernels should be pre-scaled by `log2` of the inner length.
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `paired` | yes | 2-wide MAC inner loops (bit-identical to the scalar loops) |
//! | `basic` | yes | Elementary vector operations |
//! | `loader` | yes | SPI loader (requires `embedded-hal`, `log`) |
//! | `rounding` | no | Round-to-nearest in `float_to_q7` instead of truncation |
//!
//! On `thumbv7em` targets with the `dsp` target feature the primitives lower
//! to `SMLAD`/`SMLALD`/`SMLSLD`/`SMLALDX`; elsewhere they are portable Rust.

#![no_std]

pub mod constants;
pub mod error;
pub mod dsp;
pub mod support;
pub mod filtering;
pub mod matrix;

#[cfg(feature = "basic")]
pub mod basic;

#[cfg(feature = "loader")]
pub mod loader;


pub use error::{DspError, Result};
