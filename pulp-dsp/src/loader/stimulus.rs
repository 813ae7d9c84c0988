//! Stimulus image parsing and block grouping.
//!
//! A stimulus image is text, one `AAAAAAAA_DDDDDDDD` entry per line (hex
//! address, hex data word). Entries at consecutive word addresses are sent
//! together as one block.

use super::protocol::MAX_BLOCK_WORDS;

/// Longest accepted line, excluding the newline.
pub const MAX_LINE_LEN: usize = 18;

/// One word of the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StimulusEntry {
    pub addr: u32,
    pub data: u32,
}

/// Why an image could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StimulusError {
    /// Line `line` (1-based) is too long or not `hex_hex`.
    #[error("malformed stimulus entry on line {line}")]
    Parse { line: usize },
    /// The image holds no entries.
    #[error("stimulus image is empty")]
    Empty,
    /// The image holds more entries than the buffer provided.
    #[error("stimulus image exceeds {capacity} entries")]
    TooManyEntries { capacity: usize },
}

/// Parse `text` into `entries`, returning the number of entries written.
///
/// Blank lines are skipped and a trailing `\r` is ignored.
pub fn parse_stimulus(text: &str, entries: &mut [StimulusEntry]) -> Result<usize, StimulusError> {
    let capacity = entries.len();
    let mut count = 0;
    for (idx, raw) in text.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }
        let entry = parse_line(line).ok_or(StimulusError::Parse { line: idx + 1 })?;
        let slot = entries
            .get_mut(count)
            .ok_or(StimulusError::TooManyEntries { capacity })?;
        *slot = entry;
        count += 1;
    }
    if count == 0 {
        return Err(StimulusError::Empty);
    }
    Ok(count)
}

fn parse_line(line: &str) -> Option<StimulusEntry> {
    if line.len() > MAX_LINE_LEN {
        return None;
    }
    let (addr, data) = line.trim().split_once('_')?;
    Some(StimulusEntry {
        addr: parse_hex(addr)?,
        data: parse_hex(data)?,
    })
}

fn parse_hex(field: &str) -> Option<u32> {
    if field.is_empty() || field.starts_with('+') {
        return None;
    }
    u32::from_str_radix(field, 16).ok()
}

/// Split `entries` into runs of consecutive word addresses, at most
/// [`MAX_BLOCK_WORDS`] long.
pub fn blocks(entries: &[StimulusEntry]) -> Blocks<'_> {
    Blocks { rest: entries }
}

/// Iterator returned by [`blocks`].
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    rest: &'a [StimulusEntry],
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a [StimulusEntry];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let mut len = 1;
        while len < self.rest.len()
            && len < MAX_BLOCK_WORDS
            && self.rest[len].addr == self.rest[len - 1].addr.wrapping_add(4)
        {
            len += 1;
        }
        let (block, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(addr: u32, data: u32) -> StimulusEntry {
        StimulusEntry { addr, data }
    }

    #[test]
    fn parses_entries_and_skips_blank_lines() {
        let text = "00000000_DEADBEEF\r\n\n00000004_0000_0001\n";
        let mut buf = [StimulusEntry::default(); 4];
        assert_eq!(parse_stimulus(text, &mut buf), Err(StimulusError::Parse { line: 3 }));

        let text = "00000000_DEADBEEF\r\n\n00000004_00000001\n";
        assert_eq!(parse_stimulus(text, &mut buf), Ok(2));
        assert_eq!(buf[..2], [entry(0, 0xDEAD_BEEF), entry(4, 1)]);
    }

    #[test]
    fn accepts_short_hex_fields() {
        let mut buf = [StimulusEntry::default(); 1];
        assert_eq!(parse_stimulus("1A_ff", &mut buf), Ok(1));
        assert_eq!(buf[0], entry(0x1A, 0xFF));
    }

    #[test]
    fn rejects_long_or_malformed_lines() {
        let mut buf = [StimulusEntry::default(); 2];
        let long = "000000000_00000000";
        assert_eq!(long.len(), 18);
        assert!(parse_stimulus(long, &mut buf).is_ok());
        assert_eq!(
            parse_stimulus("0000000000_00000000", &mut buf),
            Err(StimulusError::Parse { line: 1 })
        );
        assert_eq!(
            parse_stimulus("00000000 00000000", &mut buf),
            Err(StimulusError::Parse { line: 1 })
        );
        assert_eq!(parse_stimulus("_1", &mut buf), Err(StimulusError::Parse { line: 1 }));
        assert_eq!(parse_stimulus("0_xyz", &mut buf), Err(StimulusError::Parse { line: 1 }));
        assert_eq!(parse_stimulus("0_+1", &mut buf), Err(StimulusError::Parse { line: 1 }));
    }

    #[test]
    fn empty_image() {
        let mut buf = [StimulusEntry::default(); 2];
        assert_eq!(parse_stimulus("", &mut buf), Err(StimulusError::Empty));
        assert_eq!(parse_stimulus("\n \n", &mut buf), Err(StimulusError::Empty));
    }

    #[test]
    fn too_many_entries() {
        let mut buf = [StimulusEntry::default(); 2];
        assert_eq!(
            parse_stimulus("0_1\n4_2\n8_3\n", &mut buf),
            Err(StimulusError::TooManyEntries { capacity: 2 })
        );
        assert_eq!(parse_stimulus("0_1\n4_2\n", &mut buf), Ok(2));
    }

    #[test]
    fn groups_consecutive_addresses() {
        let entries = [
            entry(0x100, 1),
            entry(0x104, 2),
            entry(0x108, 3),
            entry(0x200, 4),
            entry(0x204, 5),
            entry(0x300, 6),
        ];
        let mut it = blocks(&entries);
        assert_eq!(it.next(), Some(&entries[0..3]));
        assert_eq!(it.next(), Some(&entries[3..5]));
        assert_eq!(it.next(), Some(&entries[5..6]));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn splits_long_runs() {
        let mut entries = [StimulusEntry::default(); 600];
        for (i, e) in entries.iter_mut().enumerate() {
            *e = entry(4 * i as u32, i as u32);
        }
        let lens: [usize; 3] = {
            let mut it = blocks(&entries).map(<[StimulusEntry]>::len);
            [it.next().unwrap(), it.next().unwrap(), it.next().unwrap()]
        };
        assert_eq!(lens, [256, 256, 88]);
        assert_eq!(blocks(&entries).count(), 3);
    }
}
