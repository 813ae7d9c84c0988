//! SPI loader driver.
//!
//! The driver is generic over any [`embedded_hal::spi::SpiDevice`] for the
//! load port and two [`embedded_hal::digital::OutputPin`]s for the core's
//! active-low reset and its fetch enable.
//!
//! # Example
//!
//! ```ignore
//! let mut entries = [StimulusEntry::default(); 4096];
//! let mut loader = SpiLoader::new(spi, reset_n, fetch_en);
//! loader.boot(include_str!("spi_stim.txt"), &mut entries)?;
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::protocol::{
    encode_header, encode_words, realign, CMD_READ, CMD_READ_REG, CMD_WRITE, FRAME_LEN,
    HEADER_LEN, MAX_BLOCK_WORDS, READ_PAYLOAD_OFFSET, REG_TRANSFER_LEN, REG_VALUE_OFFSET,
};
use super::stimulus::{blocks, parse_stimulus, StimulusEntry};
use super::LoaderError;

/// Loads stimulus images into the coprocessor and controls its reset and
/// fetch-enable lines.
pub struct SpiLoader<SPI, RST, FETCH> {
    spi: SPI,
    /// Active low.
    reset: RST,
    fetch_enable: FETCH,
    /// Read every block back after writing it.
    readback: bool,
    tx: [u8; FRAME_LEN],
    rx: [u8; FRAME_LEN],
}

impl<SPI, RST, FETCH> SpiLoader<SPI, RST, FETCH>
where
    SPI: SpiDevice,
    RST: OutputPin,
    FETCH: OutputPin<Error = RST::Error>,
{
    /// Create a loader with readback verification enabled.
    pub fn new(spi: SPI, reset: RST, fetch_enable: FETCH) -> Self {
        Self {
            spi,
            reset,
            fetch_enable,
            readback: true,
            tx: [0; FRAME_LEN],
            rx: [0; FRAME_LEN],
        }
    }

    /// Enable or disable readback verification of every block.
    pub fn with_readback(mut self, readback: bool) -> Self {
        self.readback = readback;
        self
    }

    /// Release the bus and pins.
    pub fn release(self) -> (SPI, RST, FETCH) {
        (self.spi, self.reset, self.fetch_enable)
    }

    // ── Core control ──────────────────────────────────────────────────

    /// Stop fetching and pulse reset. The core is left out of reset with
    /// fetch disabled.
    pub fn reset_core(&mut self) -> Result<(), LoaderError<SPI::Error, RST::Error>> {
        self.fetch_enable.set_low().map_err(LoaderError::Pin)?;
        self.reset.set_low().map_err(LoaderError::Pin)?;
        self.reset.set_high().map_err(LoaderError::Pin)?;
        log::info!("core has been reset");
        Ok(())
    }

    /// Raise fetch enable so the core starts executing.
    pub fn start_core(&mut self) -> Result<(), LoaderError<SPI::Error, RST::Error>> {
        self.fetch_enable.set_high().map_err(LoaderError::Pin)?;
        log::info!("core started");
        Ok(())
    }

    // ── Load port ─────────────────────────────────────────────────────

    /// Read control register `index` (0..=3).
    pub fn read_register(
        &mut self,
        index: u8,
    ) -> Result<u8, LoaderError<SPI::Error, RST::Error>> {
        let cmd = *CMD_READ_REG
            .get(index as usize)
            .ok_or(LoaderError::InvalidRegister { index })?;

        let tx = &mut self.tx[..REG_TRANSFER_LEN];
        tx.fill(0);
        tx[0] = cmd;
        let rx = &mut self.rx[..REG_TRANSFER_LEN];
        rx.fill(0);

        self.spi.transfer(rx, tx).map_err(LoaderError::Spi)?;
        let value = rx[REG_VALUE_OFFSET];
        log::debug!("register {} = {:#04x}", index, value);
        Ok(value)
    }

    /// Write one block of consecutive words starting at `block[0].addr`,
    /// then read it back if verification is enabled.
    ///
    /// Blocks longer than [`MAX_BLOCK_WORDS`] go out as several frames.
    pub fn write_block(
        &mut self,
        block: &[StimulusEntry],
    ) -> Result<(), LoaderError<SPI::Error, RST::Error>> {
        for frame in block.chunks(MAX_BLOCK_WORDS) {
            self.write_frame(frame)?;
        }
        Ok(())
    }

    fn write_frame(
        &mut self,
        block: &[StimulusEntry],
    ) -> Result<(), LoaderError<SPI::Error, RST::Error>> {
        let Some(first) = block.first() else {
            return Ok(());
        };
        let addr = first.addr;

        encode_header(&mut self.tx, CMD_WRITE, addr);
        let len = encode_words(block.iter().map(|e| e.data), &mut self.tx[HEADER_LEN..]);
        log::info!("sending block {:#010x} with {} words", addr, block.len());
        self.spi
            .write(&self.tx[..HEADER_LEN + len])
            .map_err(LoaderError::Spi)?;

        if self.readback {
            self.verify_block(addr, block, len)?;
        }
        Ok(())
    }

    fn verify_block(
        &mut self,
        addr: u32,
        block: &[StimulusEntry],
        len: usize,
    ) -> Result<(), LoaderError<SPI::Error, RST::Error>> {
        // One extra byte supplies the last payload bit after realignment.
        let total = READ_PAYLOAD_OFFSET + len + 1;
        let tx = &mut self.tx[..total];
        tx.fill(0);
        encode_header(tx, CMD_READ, addr);
        let rx = &mut self.rx[..total];
        rx.fill(0);

        self.spi.transfer(rx, tx).map_err(LoaderError::Spi)?;
        realign(rx);

        let mut expected = [0u8; 4];
        for (w, entry) in block.iter().enumerate() {
            encode_words([entry.data], &mut expected);
            let got = &rx[READ_PAYLOAD_OFFSET + 4 * w..][..4];
            if let Some(b) = (0..4).find(|&b| got[b] != expected[b]) {
                let offset = 4 * w + b;
                log::warn!(
                    "readback mismatch at {:#010x}+{}: expected {:#04x}, got {:#04x}",
                    addr,
                    offset,
                    expected[b],
                    got[b]
                );
                return Err(LoaderError::Verify {
                    addr,
                    offset,
                    expected: expected[b],
                    actual: got[b],
                });
            }
        }
        Ok(())
    }

    /// Send every entry, grouped into blocks. Returns the number of blocks.
    pub fn load(
        &mut self,
        entries: &[StimulusEntry],
    ) -> Result<usize, LoaderError<SPI::Error, RST::Error>> {
        let mut sent = 0;
        for block in blocks(entries) {
            self.write_block(block)?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Parse `image`, reset the core, load the image and start the core.
    ///
    /// `entries` is working storage for the parsed image. A malformed image
    /// is rejected before the core is touched.
    pub fn boot(
        &mut self,
        image: &str,
        entries: &mut [StimulusEntry],
    ) -> Result<(), LoaderError<SPI::Error, RST::Error>> {
        let count = parse_stimulus(image, entries)?;
        self.reset_core()?;
        let sent = self.load(&entries[..count])?;
        log::info!("loaded {} entries in {} blocks", count, sent);
        self.start_core()
    }
}
