//! PWM audio engine for single-pin microcontroller sound
//!
//! Generates real-time audio on an 8-bit PWM output: plain tones, polyphonic
//! tunes from note-command tables, 2-bit and IMA ADPCM compressed samples,
//! and LPC speech synthesis compatible with the TMS5220/TMS5100 chips.
//! Everything in the sample path is fixed-point integer math at a fixed
//! 8 kHz rate, so the engine runs unchanged on a host or inside a
//! microcontroller tick interrupt.
//!
//! # Crate feature flags
//! - `adpcm` (default): 2-bit and IMA ADPCM sample decoders (`adpcm`)
//! - `speech` (default): TMS5220/TMS5100 LPC speech synthesizer (`lpc`)
//! - `mixer` (default): polyphonic note scheduler and square-wave mixer (`mixer`)
//! - `streaming` (opt-in): real-time host preview via rodio (`streaming`)
//! - `export` (opt-in): WAV rendering of engine output (`export`)
//!
//! # Quick start
//! ## Decode an ADPCM payload
//! ```
//! use pwmsynth::adpcm::ImaAdpcm;
//! use pwmsynth::stream::AudioStream;
//!
//! let payload = [0x17u8, 0x08];
//! let mut decoder = ImaAdpcm::new(&payload);
//! while decoder.has_next() {
//!     let _sample = decoder.next_sample();
//! }
//! ```
//!
//! ## Play a two-track tune
//! ```
//! use pwmsynth::mixer::{NoteCmd, PolyphonicMixer};
//!
//! let bass = [NoteCmd::from_freq_ms(130.81, 0, 2000)];
//! let lead = [
//!     NoteCmd::from_freq_ms(523.25, 0, 300),
//!     NoteCmd::from_freq_ms(659.25, 50, 300),
//! ];
//!
//! let mut mixer = PolyphonicMixer::new();
//! mixer.bind(0, &bass, 1);
//! mixer.bind(1, &lead, 1);
//! while !mixer.is_idle() {
//!     let _duty = mixer.tick();
//! }
//! ```
//!
//! ## Speak
//! ```no_run
//! use pwmsynth::lpc::{ChipVariant, LpcSynth};
//! use pwmsynth::stream::AudioStream;
//!
//! let data: &[u8] = &[/* LPC bitstream */];
//! let mut synth = LpcSynth::new();
//! synth.say(data, ChipVariant::Tms5220);
//! while synth.has_next() {
//!     let _sample = synth.next_sample();
//! }
//! ```

#![warn(missing_docs)]

pub mod constants;
pub mod player;
pub mod stream;

#[cfg(feature = "adpcm")]
pub mod adpcm; // Compressed sample decoders

#[cfg(feature = "speech")]
pub mod lpc; // LPC speech synthesis (TMS5220/TMS5100)

#[cfg(feature = "mixer")]
pub mod mixer; // Polyphonic note scheduler and square-wave mixer

#[cfg(feature = "streaming")]
pub mod streaming; // Real-time host preview

#[cfg(feature = "export")]
pub mod export; // WAV rendering

/// Error types for engine operations
///
/// The sample path itself never fails: indices and counters are defensively
/// clamped and end-of-stream reads return silence. These errors cover the
/// host-side surfaces only (audio device setup, export I/O, buffer sizing).
#[derive(thiserror::Error, Debug)]
pub enum PwmSynthError {
    /// IO error from filesystem or device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// Audio file writing error
    #[error("Audio file error: {0}")]
    AudioFileError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for PwmSynthError {
    fn from(msg: String) -> Self {
        PwmSynthError::Other(msg)
    }
}

impl From<&str> for PwmSynthError {
    fn from(msg: &str) -> Self {
        PwmSynthError::Other(msg.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, PwmSynthError>;

// Public API exports
pub use player::{MicrosClock, PwmSink, SamplePlayer, TickTimer};
pub use stream::AudioStream;

#[cfg(feature = "adpcm")]
pub use adpcm::{ImaAdpcm, TwoBitAdpcm};

#[cfg(feature = "speech")]
pub use lpc::{ChipVariant, LpcSynth};

#[cfg(feature = "mixer")]
pub use mixer::{NoteCmd, PolyphonicMixer};

#[cfg(feature = "streaming")]
pub use streaming::{AudioDevice, RingBuffer, StreamConfig};
