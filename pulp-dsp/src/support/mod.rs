//! Support routines: buffer preparation and format conversion.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`fill_q15`], [`fill_q7`] | Set every sample to a constant |
//! | [`copy_q15`] | Copy a sequence into the head of another buffer |
//! | [`q15_to_q31`], [`q15_to_q7`], [`q7_to_q15`] | Fixed-point format changes |
//! | [`q7_to_float`], [`float_to_q7`] | Fixed ↔ `f32` |
//!
//! Every routine processes `src.len()` samples and panics if the destination
//! is shorter.

mod fill;
mod convert;

pub use fill::{copy_q15, fill_q15, fill_q7};
pub use convert::{float_to_q7, q15_to_q31, q15_to_q7, q7_to_float, q7_to_q15};
