//! SPI slave protocol of the coprocessor's debug/load port.
//!
//! ```text
//! write     0x02 A3 A2 A1 A0 D0 D1 ..                    (host → device)
//! readback  0x0B A3 A2 A1 A0 xx*8 | D0 D1 .. + 1 byte    (full duplex)
//! register  CMD  xx xx xx | V                            (full duplex)
//! ```
//!
//! Addresses are big-endian. Data words go out most-significant byte first.
//! Readback data arrives one bit late and starts at [`READ_PAYLOAD_OFFSET`].

/// Memory write command.
pub const CMD_WRITE: u8 = 0x02;

/// Memory read command (with 8 dummy bytes).
pub const CMD_READ: u8 = 0x0B;

/// Register read commands for control registers 0..=3.
pub const CMD_READ_REG: [u8; 4] = [0x05, 0x07, 0x21, 0x30];

/// Command byte plus 32-bit address.
pub const HEADER_LEN: usize = 5;

/// Dummy bytes clocked between the read header and the first data byte.
pub const READ_DUMMY_LEN: usize = 8;

/// Position of the first payload byte in a realigned readback buffer.
pub const READ_PAYLOAD_OFFSET: usize = HEADER_LEN + READ_DUMMY_LEN;

/// Register reads are 5-byte transfers with the value in the last byte.
pub const REG_TRANSFER_LEN: usize = 5;
pub const REG_VALUE_OFFSET: usize = 4;

/// Largest number of words sent in one write frame.
pub const MAX_BLOCK_WORDS: usize = 256;
pub const MAX_BLOCK_BYTES: usize = MAX_BLOCK_WORDS * 4;

/// Frame buffer size covering the largest readback transfer.
pub const FRAME_LEN: usize = READ_PAYLOAD_OFFSET + MAX_BLOCK_BYTES + 1;

/// Write `cmd` and the big-endian `addr` into `frame[..HEADER_LEN]`.
#[inline]
pub fn encode_header(frame: &mut [u8], cmd: u8, addr: u32) {
    frame[0] = cmd;
    frame[1..HEADER_LEN].copy_from_slice(&addr.to_be_bytes());
}

/// Serialize `words` MSB first into `out`. Returns the byte count.
pub fn encode_words(words: impl IntoIterator<Item = u32>, out: &mut [u8]) -> usize {
    let mut len = 0;
    for (word, chunk) in words.into_iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&word.to_be_bytes());
        len += 4;
    }
    len
}

/// Undo the one-bit lag of a readback: every byte takes the MSB of its
/// successor as its new LSB. The last byte only loses its MSB.
pub fn realign(buf: &mut [u8]) {
    for i in 0..buf.len().saturating_sub(1) {
        buf[i] = (buf[i] << 1) | (buf[i + 1] >> 7);
    }
    if let Some(last) = buf.last_mut() {
        *last <<= 1;
    }
}
