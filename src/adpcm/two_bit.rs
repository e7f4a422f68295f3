//! 2-bit ADPCM decoder
//!
//! 4:1 compression against 8-bit source audio: each byte packs four 2-bit
//! codes, most-significant pair first. The predictor tracks the unsigned
//! 8-bit source directly and is widened to 16-bit PCM on output.

use crate::stream::AudioStream;

/// Step sizes, roughly logarithmic progression tuned for 8-bit audio
const STEP_TABLE: [i16; 16] = [2, 3, 4, 5, 6, 8, 10, 13, 16, 20, 25, 32, 40, 50, 63, 80];

/// Step-index adjustment per code: small deltas shrink the step,
/// large deltas grow it
const INDEX_TABLE: [i8; 4] = [-1, -1, 2, 2];

/// Pull decoder for 2-bit ADPCM payloads
///
/// The payload is borrowed; decode state lives entirely in the decoder and
/// resets to the neutral start state (predictor 128, step index 0).
#[derive(Debug, Clone)]
pub struct TwoBitAdpcm<'a> {
    data: &'a [u8],
    /// Total number of 2-bit codes to decode
    code_count: usize,
    /// Codes consumed so far
    consumed: usize,
    /// Predicted value, unsigned 8-bit midpoint-biased
    predictor: u8,
    /// Step size index (0..=15)
    step_index: usize,
}

impl<'a> TwoBitAdpcm<'a> {
    /// Create a decoder over a packed payload, decoding every code in it
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_sample_count(data, data.len() * 4)
    }

    /// Create a decoder limited to `samples` codes
    ///
    /// Used when the final payload byte is only partially filled. The limit
    /// is clamped to the number of codes the payload actually holds.
    pub fn with_sample_count(data: &'a [u8], samples: usize) -> Self {
        TwoBitAdpcm {
            data,
            code_count: samples.min(data.len() * 4),
            consumed: 0,
            predictor: 128,
            step_index: 0,
        }
    }
}

impl AudioStream for TwoBitAdpcm<'_> {
    fn reset(&mut self) {
        self.consumed = 0;
        self.predictor = 128;
        self.step_index = 0;
    }

    fn has_next(&self) -> bool {
        self.consumed < self.code_count
    }

    fn next_sample(&mut self) -> i16 {
        if !self.has_next() {
            return 0;
        }

        // Codes are packed [7:6][5:4][3:2][1:0], four per byte
        let byte = self.data[self.consumed / 4];
        let shift = 6 - (self.consumed % 4) * 2;
        let code = ((byte >> shift) & 0x03) as usize;
        self.consumed += 1;

        let step = STEP_TABLE[self.step_index] as i32;
        let delta = match code {
            0 => -step,
            1 => step,
            2 => -step * 2,
            _ => step * 2,
        };

        self.predictor = (self.predictor as i32 + delta).clamp(0, 255) as u8;

        self.step_index = (self.step_index as i32 + INDEX_TABLE[code] as i32).clamp(0, 15) as usize;

        // Map unsigned 8-bit (midpoint 128) onto the 16-bit signed range
        (self.predictor as i16 - 128) * 256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_vector_from_neutral_state() {
        // Hand-decoded against the reference tables:
        // 0xE4 = codes 3,2,1,0 / 0x1B = codes 0,1,2,3
        let payload = [0xE4u8, 0x1B];
        let mut decoder = TwoBitAdpcm::new(&payload);

        let expected: [i16; 8] = [1024, -1024, 512, -768, -1792, -1024, -2048, 0];
        for &want in &expected {
            assert!(decoder.has_next());
            assert_eq!(decoder.next_sample(), want);
        }
        assert!(!decoder.has_next());
    }

    #[test]
    fn test_state_stays_in_range() {
        // Worst-case all-up then all-down input
        let payload = [0xFFu8; 64]
            .iter()
            .chain([0x00u8; 64].iter())
            .copied()
            .collect::<Vec<_>>();
        let mut decoder = TwoBitAdpcm::new(&payload);

        while decoder.has_next() {
            decoder.next_sample();
            assert!(decoder.step_index <= 15);
            // predictor is u8, range holds by construction; check the
            // output mapping stays within the widened range
        }
        assert_eq!(decoder.next_sample(), 0);
    }

    #[test]
    fn test_past_end_returns_silence_without_state_change() {
        let payload = [0xE4u8];
        let mut decoder = TwoBitAdpcm::new(&payload);
        for _ in 0..4 {
            decoder.next_sample();
        }
        let predictor = decoder.predictor;
        let step_index = decoder.step_index;

        assert_eq!(decoder.next_sample(), 0);
        assert_eq!(decoder.predictor, predictor);
        assert_eq!(decoder.step_index, step_index);
    }

    #[test]
    fn test_reset_restores_neutral_state() {
        let payload = [0xE4u8, 0x1B];
        let mut decoder = TwoBitAdpcm::new(&payload);
        let first: Vec<i16> = (0..8).map(|_| decoder.next_sample()).collect();

        decoder.reset();
        let second: Vec<i16> = (0..8).map(|_| decoder.next_sample()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_count_limit() {
        let payload = [0xE4u8];
        let mut decoder = TwoBitAdpcm::with_sample_count(&payload, 3);
        assert_eq!(decoder.next_sample(), 1024);
        decoder.next_sample();
        decoder.next_sample();
        assert!(!decoder.has_next());

        // Limit larger than the payload clamps down
        let decoder = TwoBitAdpcm::with_sample_count(&payload, 100);
        assert_eq!(decoder.code_count, 4);
    }
}
