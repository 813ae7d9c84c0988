//! Coprocessor image loader.
//!
//! Transfers a text stimulus image into the coprocessor's memory over its SPI
//! load port, optionally reading every block back, then starts the core.
//!
//! # Feature gate
//!
//! This module is available when the `loader` feature is enabled (on by
//! default). It pulls in `embedded-hal` and `log`.

pub mod protocol;
mod spi_loader;
mod stimulus;

pub use spi_loader::SpiLoader;
pub use stimulus::{blocks, parse_stimulus, Blocks, StimulusEntry, StimulusError, MAX_LINE_LEN};

/// Errors raised while loading or controlling the coprocessor.
///
/// Generic over the SPI bus error `SpiE` and the pin error `PinE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoaderError<SpiE, PinE> {
    #[error("spi bus error: {0:?}")]
    Spi(SpiE),
    #[error("control pin error: {0:?}")]
    Pin(PinE),
    /// Line `line` (1-based) of the image is malformed.
    #[error("malformed stimulus entry on line {line}")]
    Parse { line: usize },
    #[error("stimulus image is empty")]
    Empty,
    #[error("stimulus image exceeds {capacity} entries")]
    TooManyEntries { capacity: usize },
    /// A byte read back differs from the byte written.
    #[error(
        "readback mismatch at {addr:#010x}+{offset}: expected {expected:#04x}, got {actual:#04x}"
    )]
    Verify {
        addr: u32,
        offset: usize,
        expected: u8,
        actual: u8,
    },
    /// Only control registers 0..=3 exist.
    #[error("no control register {index}")]
    InvalidRegister { index: u8 },
}

impl<SpiE, PinE> From<StimulusError> for LoaderError<SpiE, PinE> {
    fn from(err: StimulusError) -> Self {
        match err {
            StimulusError::Parse { line } => Self::Parse { line },
            StimulusError::Empty => Self::Empty,
            StimulusError::TooManyEntries { capacity } => Self::TooManyEntries { capacity },
        }
    }
}
