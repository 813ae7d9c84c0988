//! Elementary vector operations.
//!
//! Each routine processes `src.len()` samples and panics if the destination
//! is shorter. Fixed-point routines saturate; none of them allocate.

mod abs;
mod mult;
mod offset;
mod shift;

pub use abs::abs_q31;
pub use mult::mult_f32;
pub use offset::offset_q15;
pub use shift::shift_q7;
