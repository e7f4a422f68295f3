//! Compressed sample decoders
//!
//! Two ADPCM codecs for playing back recorded audio from flash:
//! - [`TwoBitAdpcm`]: 4:1-compressed 8-bit codec, four codes per byte
//! - [`ImaAdpcm`]: standard IMA ADPCM, one nibble per sample
//!
//! Both are pull decoders implementing [`crate::stream::AudioStream`] with
//! fully clamped adaptation state; no input can drive them out of range.

mod ima;
mod two_bit;

pub use ima::ImaAdpcm;
pub use two_bit::TwoBitAdpcm;
