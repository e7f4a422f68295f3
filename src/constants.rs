//! Fixed engine parameters
//!
//! Sample rate, voice count and output bit depth are compile-time constants;
//! the whole engine is tuned around an 8 kHz tick feeding an 8-bit PWM duty
//! register behind a carrier in the tens of kHz.

/// Audio sample rate in Hz
pub const SAMPLE_RATE_HZ: u32 = 8_000;

/// One sample period in microseconds (125 at 8 kHz)
pub const SAMPLE_PERIOD_US: u32 = 1_000_000 / SAMPLE_RATE_HZ;

/// Number of polyphonic voices / tracks owned by the mixer
pub const MAX_VOICES: usize = 8;

/// Per-voice square-wave amplitude (0..127)
pub const VOICE_LEVEL: i8 = 40;

/// Symmetric soft-clip threshold applied to the mixed sum before biasing
pub const SOFTCLIP_LIMIT: i32 = 220;

/// Full-scale PWM duty value (8-bit resolution)
pub const PWM_STEPS: u8 = 255;

/// Mid-scale duty bias used to map signed samples onto the PWM range
pub const DUTY_BIAS: i32 = 128;

/// Output samples per LPC speech frame (25 ms at 8 kHz)
pub const SAMPLES_PER_FRAME: u16 = 200;

/// Free-running microsecond timebase width (16-bit hardware counter)
pub const TIMER_MASK: u32 = 0xFFFF;
