//! IMA ADPCM decoder
//!
//! Standard IMA/DVI ADPCM: one 4-bit code per sample, low nibble of each
//! byte first, 89-entry step table. The predictor is the output sample.

use crate::stream::AudioStream;

/// Standard IMA step-size table
const STEP_TABLE: [i32; 89] = [
    7, 8, 9, 10, 11, 12, 13, 14, 16, 17, 19, 21, 23, 25, 28, 31, 34, 37, 41, 45, 50, 55, 60, 66,
    73, 80, 88, 97, 107, 118, 130, 143, 157, 173, 190, 209, 230, 253, 279, 307, 337, 371, 408,
    449, 494, 544, 598, 658, 724, 796, 876, 963, 1060, 1166, 1282, 1411, 1552, 1707, 1878, 2066,
    2272, 2499, 2749, 3024, 3327, 3660, 4026, 4428, 4871, 5358, 5894, 6484, 7132, 7845, 8630,
    9493, 10442, 11487, 12635, 13899, 15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794,
    32767,
];

/// Standard IMA index-adjustment table
const INDEX_TABLE: [i8; 16] = [-1, -1, -1, -1, 2, 4, 6, 8, -1, -1, -1, -1, 2, 4, 6, 8];

/// Pull decoder for IMA ADPCM payloads
///
/// Two samples per payload byte: the low nibble decodes first, then the
/// high nibble, and only then does the byte cursor advance.
#[derive(Debug, Clone)]
pub struct ImaAdpcm<'a> {
    data: &'a [u8],
    /// Total number of nibble codes to decode
    sample_count: usize,
    /// Nibbles consumed so far
    consumed: usize,
    predictor: i16,
    /// Step size index (0..=88)
    step_index: usize,
}

impl<'a> ImaAdpcm<'a> {
    /// Create a decoder over a packed payload, decoding every nibble in it
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_sample_count(data, data.len() * 2)
    }

    /// Create a decoder limited to `samples` nibbles
    pub fn with_sample_count(data: &'a [u8], samples: usize) -> Self {
        ImaAdpcm {
            data,
            sample_count: samples.min(data.len() * 2),
            consumed: 0,
            predictor: 0,
            step_index: 0,
        }
    }

    fn decode_nibble(&mut self, nibble: u8) -> i16 {
        let step = STEP_TABLE[self.step_index];

        let mut diff = step >> 3;
        if nibble & 1 != 0 {
            diff += step >> 2;
        }
        if nibble & 2 != 0 {
            diff += step >> 1;
        }
        if nibble & 4 != 0 {
            diff += step;
        }
        if nibble & 8 != 0 {
            diff = -diff;
        }

        self.predictor = (self.predictor as i32 + diff).clamp(-32768, 32767) as i16;

        self.step_index =
            (self.step_index as i32 + INDEX_TABLE[(nibble & 0x0F) as usize] as i32).clamp(0, 88)
                as usize;

        self.predictor
    }
}

impl AudioStream for ImaAdpcm<'_> {
    fn reset(&mut self) {
        self.consumed = 0;
        self.predictor = 0;
        self.step_index = 0;
    }

    fn has_next(&self) -> bool {
        self.consumed < self.sample_count
    }

    fn next_sample(&mut self) -> i16 {
        if !self.has_next() {
            return 0;
        }

        let byte = self.data[self.consumed / 2];
        let nibble = if self.consumed % 2 == 0 {
            byte & 0x0F
        } else {
            byte >> 4
        };
        self.consumed += 1;

        self.decode_nibble(nibble)
    }
}
