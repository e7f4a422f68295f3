//! LPC bitstream reader
//!
//! Encoded speech stores bits least-significant-bit-first within each byte.
//! Fields are extracted MSB-first, so the current byte is bit-reversed
//! before the field is shifted out; reads of up to 8 bits may straddle a
//! byte boundary.

/// Reverse the bit order in a byte (LSB-first to MSB-first)
///
/// Example: `0b1011_0010` -> `0b0100_1101`
#[inline]
pub fn rev(mut a: u8) -> u8 {
    a = (a >> 4) | (a << 4); // swap nibbles
    a = ((a & 0xCC) >> 2) | ((a & 0x33) << 2); // swap pairs
    ((a & 0xAA) >> 1) | ((a & 0x55) << 1) // swap adjacent
}

/// Cursor over an LSB-first packed bitstream
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    /// Bit position within the current byte (0..8)
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit of `data`
    pub fn new(data: &'a [u8]) -> Self {
        BitReader {
            data,
            byte_pos: 0,
            bit_pos: 0,
        }
    }

    /// Rewind to the start of the stream
    pub fn reset(&mut self) {
        self.byte_pos = 0;
        self.bit_pos = 0;
    }

    /// True if at least `bits` more bits remain
    pub fn has(&self, bits: u8) -> bool {
        self.byte_pos * 8 + self.bit_pos as usize + bits as usize <= self.data.len() * 8
    }

    /// Extract `bits` (1..=8) from the stream, advancing the cursor
    ///
    /// Bytes past the end of the payload read as zero, so an over-read
    /// yields a zero field instead of failing.
    pub fn read(&mut self, bits: u8) -> u8 {
        debug_assert!((1..=8).contains(&bits));

        // Reversed current byte in the upper half of a 16-bit window
        let current = self.data.get(self.byte_pos).copied().unwrap_or(0);
        let mut window = (rev(current) as u16) << 8;

        // Pull in the next byte when the read straddles the boundary
        if self.bit_pos + bits > 8 {
            let next = self.data.get(self.byte_pos + 1).copied().unwrap_or(0);
            window |= rev(next) as u16;
        }

        // Align the wanted field at the top of the window
        window <<= self.bit_pos;
        let value = (window >> (16 - bits)) as u8;

        self.bit_pos += bits;
        if self.bit_pos >= 8 {
            self.bit_pos -= 8;
            self.byte_pos += 1;
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rev() {
        assert_eq!(rev(0xB2), 0x4D);
        assert_eq!(rev(0x00), 0x00);
        assert_eq!(rev(0xFF), 0xFF);
        assert_eq!(rev(0x01), 0x80);
    }

    #[test]
    fn test_reads_are_msb_first_of_reversed_bytes() {
        // 0x0F stored LSB-first is 1111_0000 after reversal
        let data = [0x0Fu8];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(4), 0b1111);
        assert_eq!(reader.read(4), 0b0000);
    }

    #[test]
    fn test_read_straddles_byte_boundary() {
        // rev(0x0F)=0xF0, rev(0xF0)=0x0F: stream is 11110000 00001111
        let data = [0x0Fu8, 0xF0];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(6), 0b111100);
        // Next 6 bits cross into the second byte: 00 0000
        assert_eq!(reader.read(6), 0b000000);
        assert_eq!(reader.read(4), 0b1111);
    }

    #[test]
    fn test_has_accounting() {
        let data = [0xAAu8];
        let mut reader = BitReader::new(&data);
        assert!(reader.has(8));
        reader.read(5);
        assert!(reader.has(3));
        assert!(!reader.has(4));
    }

    #[test]
    fn test_over_read_yields_zero() {
        let data = [0xFFu8];
        let mut reader = BitReader::new(&data);
        reader.read(8);
        assert_eq!(reader.read(8), 0);
    }
}
