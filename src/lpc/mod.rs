//! LPC speech synthesis
//!
//! Emulates the TMS5220/TMS5100 family of speech chips: a compressed
//! bitstream of 25 ms frames carries energy, pitch and ten reflection
//! coefficients; per sample, a voiced chirp or LFSR noise excitation is
//! shaped by a 10-stage lattice filter modeling the vocal tract.
//!
//! All math is fixed-point with the exact shift amounts and intermediate
//! widths of the original chips; "equivalent" floating-point math would not
//! reproduce their output.

pub mod bitstream;
pub mod tables;

use crate::constants::SAMPLES_PER_FRAME;
use crate::stream::AudioStream;
use bitstream::BitReader;

/// Energy code marking a silence frame
const FRAME_SILENCE: u8 = 0x0;
/// Energy code marking the end of the utterance
const FRAME_STOP: u8 = 0xF;

/// Fixed-point shift for the 8-bit coefficients K3..K10
const K3_K10_SHIFT: u32 = 7;
/// Fixed-point shift for the 16-bit coefficients K1/K2
const K1_K2_SHIFT: u32 = 15;
/// Shift applied when scaling excitation by frame energy
const ENERGY_SHIFT: u32 = 8;
/// Scale from the filter's 10-bit range up to 16-bit output
const OUTPUT_SCALE_SHIFT: u32 = 6;
/// 15-bit Galois LFSR polynomial for unvoiced excitation
const NOISE_POLY: u16 = 0xB800;
/// Filter output clamp, signed 10-bit range
const OUTPUT_MAX: i16 = 511;
const OUTPUT_MIN: i16 = -512;

/// Emulated speech chip
///
/// Selects the coefficient table set and the pitch field width in the
/// frame encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChipVariant {
    /// TI TMS5220 (TI-99/4A and friends), 6-bit pitch encoding
    #[default]
    Tms5220,
    /// TI TMS5100 (Speak & Spell), 5-bit pitch encoding
    Tms5100,
}

impl ChipVariant {
    /// Coefficient table set for this chip
    #[inline]
    pub fn table_index(self) -> usize {
        match self {
            ChipVariant::Tms5220 => 0,
            ChipVariant::Tms5100 => 1,
        }
    }

    /// Width of the pitch field in bits
    #[inline]
    pub fn pitch_bits(self) -> u8 {
        match self {
            ChipVariant::Tms5220 => 6,
            ChipVariant::Tms5100 => 5,
        }
    }
}

/// LPC speech synthesizer
///
/// Feed it an encoded utterance with [`LpcSynth::say`], then pull samples
/// through the [`AudioStream`] interface. The stream ends when a stop frame
/// (energy code `0xF`) is decoded; past that point every sample is 0.
#[derive(Debug, Clone)]
pub struct LpcSynth<'a> {
    reader: BitReader<'a>,
    variant: ChipVariant,

    // Frame parameters, updated every 25 ms
    energy: u16,
    /// Pitch period; 0 selects unvoiced (noise) excitation
    period: u8,
    /// Reflection coefficients K1..K10; k[0..2] carry 16-bit precision,
    /// k[2..10] 8-bit, both widened here for the filter math
    k: [i32; 10],

    // Lattice filter delay line x0..x9
    x: [i16; 10],

    // Timing and excitation state
    sample_counter: u16,
    period_counter: u8,
    lfsr: u16,
    finished: bool,
}

impl<'a> LpcSynth<'a> {
    /// Create an idle synthesizer with no utterance loaded
    pub fn new() -> Self {
        let mut synth = LpcSynth {
            reader: BitReader::new(&[]),
            variant: ChipVariant::default(),
            energy: 0,
            period: 0,
            k: [0; 10],
            x: [0; 10],
            sample_counter: 0,
            period_counter: 0,
            lfsr: 1,
            finished: false,
        };
        synth.reset();
        synth
    }

    /// Start speaking an encoded utterance
    ///
    /// Resets all decode and filter state, selects the chip's coefficient
    /// tables and pitch width, and positions the bitstream at `data`.
    pub fn say(&mut self, data: &'a [u8], variant: ChipVariant) {
        self.reader = BitReader::new(data);
        self.variant = variant;
        self.reset();
    }

    /// Decode the next 25 ms frame header and parameters
    fn process_frame(&mut self) {
        // A header that would read past the payload ends the utterance;
        // the original hardware relies on an explicit stop frame instead
        if !self.reader.has(4) {
            self.stop();
            return;
        }

        let energy = self.reader.read(4);

        if energy == FRAME_SILENCE {
            // Rest frame, coefficients stay as they were
            self.energy = 0;
            self.period = 0;
        } else if energy == FRAME_STOP {
            self.stop();
        } else {
            let set = self.variant.table_index();
            self.energy = tables::ENERGY[set][energy as usize] as u16;

            let repeat = self.reader.read(1) != 0;
            let pitch = self.reader.read(self.variant.pitch_bits()) as usize;
            self.period = tables::PERIOD[set][pitch];

            if !repeat {
                // K1-K4 are always present in non-repeat frames
                self.k[0] = tables::K1[set][self.reader.read(5) as usize] as i16 as i32;
                self.k[1] = tables::K2[set][self.reader.read(5) as usize] as i16 as i32;
                self.k[2] = tables::K3[set][self.reader.read(4) as usize] as i8 as i32;
                self.k[3] = tables::K4[set][self.reader.read(4) as usize] as i8 as i32;

                if self.period != 0 {
                    // Voiced frame carries the full coefficient set
                    self.k[4] = tables::K5[set][self.reader.read(4) as usize] as i8 as i32;
                    self.k[5] = tables::K6[set][self.reader.read(4) as usize] as i8 as i32;
                    self.k[6] = tables::K7[set][self.reader.read(4) as usize] as i8 as i32;
                    self.k[7] = tables::K8[set][self.reader.read(3) as usize] as i8 as i32;
                    self.k[8] = tables::K9[set][self.reader.read(3) as usize] as i8 as i32;
                    self.k[9] = tables::K10[set][self.reader.read(3) as usize] as i8 as i32;
                } else {
                    self.zero_high_coefficients();
                }
            } else if self.period == 0 {
                // Coefficients from an earlier voiced frame must not leak
                // into an unvoiced repeat
                self.zero_high_coefficients();
            }
        }
    }

    fn zero_high_coefficients(&mut self) {
        for coefficient in &mut self.k[4..] {
            *coefficient = 0;
        }
    }

    /// Enter the terminal state: silence and no further decoding
    fn stop(&mut self) {
        self.energy = 0;
        self.k = [0; 10];
        self.finished = true;
    }

    /// Generate the excitation feeding the lattice filter
    fn excitation(&mut self) -> i32 {
        if self.period != 0 {
            // Voiced: step through the chirp at the current pitch position
            let idx = self.period_counter as usize;
            self.period_counter += 1;
            if self.period_counter >= self.period {
                self.period_counter = 0;
            }
            if idx < tables::CHIRP.len() {
                (tables::CHIRP[idx] as i8 as i32 * self.energy as i32) >> ENERGY_SHIFT
            } else {
                0
            }
        } else {
            // Unvoiced: 15-bit Galois LFSR selects +/- energy
            let feedback = self.lfsr & 1 != 0;
            self.lfsr = (self.lfsr >> 1) ^ if feedback { NOISE_POLY } else { 0 };
            if self.lfsr & 1 != 0 {
                self.energy as i32
            } else {
                -(self.energy as i32)
            }
        }
    }
}

impl Default for LpcSynth<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioStream for LpcSynth<'_> {
    fn reset(&mut self) {
        self.reader.reset();
        self.energy = 0;
        self.period = 0;
        self.k = [0; 10];
        self.x = [0; 10];
        self.period_counter = 0;
        self.lfsr = 1;
        self.finished = false;
        // Force a frame load on the first next_sample call so reset stays
        // free of bitstream side effects
        self.sample_counter = SAMPLES_PER_FRAME;
    }

    fn has_next(&self) -> bool {
        !self.finished
    }

    fn next_sample(&mut self) -> i16 {
        if self.sample_counter >= SAMPLES_PER_FRAME {
            self.process_frame();
            self.sample_counter = 0;
        }

        if self.finished {
            return 0;
        }

        self.sample_counter += 1;

        let mut u = [0i16; 11];
        u[10] = self.excitation() as i16;

        // Forward pass: subtract each stage's reflection from the state,
        // K1/K2 in 32-bit fixed point, K3..K10 in 16-bit
        for i in (0..10).rev() {
            let shift = if i < 2 { K1_K2_SHIFT } else { K3_K10_SHIFT };
            u[i] = (u[i + 1] as i32 - ((self.k[i] * self.x[i] as i32) >> shift)) as i16;
        }
        u[0] = u[0].clamp(OUTPUT_MIN, OUTPUT_MAX);

        // Reverse pass: propagate the new values back into the delay line
        for i in (1..10).rev() {
            let shift = if i - 1 < 2 { K1_K2_SHIFT } else { K3_K10_SHIFT };
            self.x[i] = (self.x[i - 1] as i32 + ((self.k[i - 1] * u[i - 1] as i32) >> shift)) as i16;
        }
        self.x[0] = u[0];

        // Scale the 10-bit filter output into the 16-bit range
        u[0] << OUTPUT_SCALE_SHIFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pack (value, width) fields into the LSB-first byte layout the
    /// synthesizer reads
    fn pack(fields: &[(u8, u8)]) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        let mut n = 0usize;
        for &(value, width) in fields {
            for b in (0..width).rev() {
                if n % 8 == 0 {
                    out.push(0);
                }
                out[n / 8] |= ((value >> b) & 1) << (n % 8);
                n += 1;
            }
        }
        out
    }

    #[test]
    fn test_stop_frame_is_terminal() {
        let data = pack(&[(FRAME_STOP, 4)]);
        let mut synth = LpcSynth::new();
        synth.say(&data, ChipVariant::Tms5220);

        assert!(synth.has_next());
        assert_eq!(synth.next_sample(), 0);
        assert!(!synth.has_next());
        for _ in 0..300 {
            assert_eq!(synth.next_sample(), 0);
        }
        assert_eq!(synth.k, [0; 10]);
    }

    #[test]
    fn test_silence_frame_keeps_coefficients_and_stream() {
        // One silence frame, then a stop
        let data = pack(&[(FRAME_SILENCE, 4), (FRAME_STOP, 4)]);
        let mut synth = LpcSynth::new();
        synth.say(&data, ChipVariant::Tms5220);

        for _ in 0..SAMPLES_PER_FRAME {
            assert_eq!(synth.next_sample(), 0);
            assert!(synth.has_next());
        }
        synth.next_sample();
        assert!(!synth.has_next());
    }

    #[test]
    fn test_unvoiced_frame_zeroes_high_coefficients() {
        // Normal frame, repeat=0, pitch index 0 => period 0 (unvoiced):
        // only K1..K4 are encoded, K5..K10 must end up zero
        let data = pack(&[
            (0x5, 4), // energy
            (0, 1),   // repeat
            (0, 6),   // pitch -> unvoiced
            (3, 5),   // K1
            (4, 5),   // K2
            (2, 4),   // K3
            (1, 4),   // K4
            (FRAME_STOP, 4),
        ]);
        let mut synth = LpcSynth::new();
        synth.say(&data, ChipVariant::Tms5220);
        synth.next_sample();

        assert_eq!(synth.period, 0);
        assert_eq!(&synth.k[4..], &[0; 6]);
        assert_eq!(synth.k[0], tables::K1[0][3] as i16 as i32);
        assert_eq!(synth.k[1], tables::K2[0][4] as i16 as i32);
    }

    #[test]
    fn test_unvoiced_repeat_does_not_leak_voiced_coefficients() {
        let data = pack(&[
            // Voiced frame with a full coefficient set
            (0x5, 4),
            (0, 1),
            (1, 6), // pitch index 1 -> voiced
            (0, 5),
            (0, 5),
            (0, 4),
            (0, 4),
            (1, 4), // K5
            (1, 4), // K6
            (1, 4), // K7
            (1, 3), // K8
            (1, 3), // K9
            (1, 3), // K10
            // Unvoiced repeat frame: no coefficients in the stream
            (0x5, 4),
            (1, 1),
            (0, 6),
            (FRAME_STOP, 4),
        ]);
        let mut synth = LpcSynth::new();
        synth.say(&data, ChipVariant::Tms5220);

        synth.next_sample();
        assert_ne!(synth.period, 0);
        assert_ne!(synth.k[4], 0);
        let k1_voiced = synth.k[0];

        // Burn through the rest of the voiced frame, then load the repeat
        for _ in 1..SAMPLES_PER_FRAME {
            synth.next_sample();
        }
        synth.next_sample();

        assert_eq!(synth.period, 0);
        assert_eq!(&synth.k[4..], &[0; 6]);
        // Repeat keeps the low coefficients
        assert_eq!(synth.k[0], k1_voiced);
    }

    #[test]
    fn test_unvoiced_output_is_nonzero_noise() {
        let data = pack(&[
            (0x8, 4),
            (0, 1),
            (0, 6),
            (23, 5), // K1 table midpoint (value 0)
            (0, 5),
            (0, 4),
            (0, 4),
            (FRAME_STOP, 4),
        ]);
        let mut synth = LpcSynth::new();
        synth.say(&data, ChipVariant::Tms5220);

        let samples: Vec<i16> = (0..SAMPLES_PER_FRAME).map(|_| synth.next_sample()).collect();
        assert!(samples.iter().any(|&s| s != 0));
    }

    #[test]
    fn test_exhausted_stream_without_stop_frame_finishes() {
        // Two voiced repeat frames (11 bits each) leave 2 padding bits in
        // the last byte; the reader runs dry at the third frame boundary
        // and the synthesizer stops without an explicit stop frame
        let data = pack(&[(0x5, 4), (1, 1), (1, 6), (0x5, 4), (1, 1), (1, 6)]);
        assert_eq!(data.len(), 3);
        let mut synth = LpcSynth::new();
        synth.say(&data, ChipVariant::Tms5220);

        for _ in 0..2 * SAMPLES_PER_FRAME {
            synth.next_sample();
        }
        assert!(synth.has_next());
        synth.next_sample();
        assert!(!synth.has_next());
    }

    #[test]
    fn test_empty_utterance_finishes_immediately() {
        let mut synth = LpcSynth::new();
        synth.say(&[], ChipVariant::Tms5220);
        assert_eq!(synth.next_sample(), 0);
        assert!(!synth.has_next());
    }

    #[test]
    fn test_variant_selects_pitch_width_and_tables() {
        // Same logical frame encoded for each chip: the TMS5100 reads one
        // pitch bit fewer and indexes table set 1
        let data5220 = pack(&[(0x3, 4), (0, 1), (0, 6), (0, 5), (0, 5), (0, 4), (0, 4), (FRAME_STOP, 4)]);
        let data5100 = pack(&[(0x3, 4), (0, 1), (0, 5), (0, 5), (0, 5), (0, 4), (0, 4), (FRAME_STOP, 4)]);

        let mut a = LpcSynth::new();
        a.say(&data5220, ChipVariant::Tms5220);
        a.next_sample();
        let mut b = LpcSynth::new();
        b.say(&data5100, ChipVariant::Tms5100);
        b.next_sample();

        assert_eq!(a.energy, tables::ENERGY[0][3] as u16);
        assert_eq!(b.energy, tables::ENERGY[1][3] as u16);
        assert_eq!(a.k[0], tables::K1[0][0] as i16 as i32);
        assert_eq!(b.k[0], tables::K1[1][0] as i16 as i32);
    }

    #[test]
    fn test_say_resets_between_utterances() {
        let data = pack(&[(0x5, 4), (0, 1), (0, 6), (3, 5), (4, 5), (2, 4), (1, 4), (FRAME_STOP, 4)]);
        let mut synth = LpcSynth::new();

        synth.say(&data, ChipVariant::Tms5220);
        let first: Vec<i16> = (0..64).map(|_| synth.next_sample()).collect();

        synth.say(&data, ChipVariant::Tms5220);
        let second: Vec<i16> = (0..64).map(|_| synth.next_sample()).collect();
        assert_eq!(first, second);
    }
}
