//! Fixed-point numeric primitives.
//!
//! - [`intrinsics`]: DSP instruction wrappers (`SSAT`, `SMLAD`, `SMLALD`, ...)
//! - [`helpers`]: clipping, multiply-accumulate and accumulator finishing

pub mod intrinsics;
pub mod helpers;
