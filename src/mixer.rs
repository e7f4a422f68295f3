//! Polyphonic note scheduler and square-wave mixer
//!
//! Eight independent tracks, each stepping through a table of note commands
//! (delay, pitch period, duration in microseconds) and driving one
//! square-wave voice. One [`PolyphonicMixer::tick`] call advances every
//! track by one 125 µs sample period, mixes the active voices and returns
//! the next PWM duty value.
//!
//! Pitch comes from a 32-bit phase accumulator per voice: the top bit of the
//! phase selects the square-wave polarity, so frequency accuracy is limited
//! only by the increment rounding, not by the 8 kHz tick.

use crate::constants::{
    DUTY_BIAS, MAX_VOICES, PWM_STEPS, SAMPLE_PERIOD_US, SAMPLE_RATE_HZ, SOFTCLIP_LIMIT,
    VOICE_LEVEL,
};

/// One entry of a note table
///
/// A command means: wait `delay_us` after the previous command on this track
/// finished, then sound a square wave of `period_us` for `duration_us`.
/// A `period_us` of 0 is a rest, holding silence for the full duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteCmd {
    /// Silence before the note starts, in microseconds
    pub delay_us: u32,
    /// Square-wave period in microseconds; 0 for a rest
    pub period_us: u32,
    /// How long the note (or rest) holds, in microseconds
    pub duration_us: u32,
}

impl NoteCmd {
    /// Build a command from period and timings in microseconds
    pub const fn from_period_us(delay_us: u32, period_us: u32, duration_us: u32) -> Self {
        NoteCmd {
            delay_us,
            period_us,
            duration_us,
        }
    }

    /// A rest: silence held for `duration_us` after `delay_us`
    pub const fn rest(delay_us: u32, duration_us: u32) -> Self {
        Self::from_period_us(delay_us, 0, duration_us)
    }

    /// Build a command from a frequency in Hz and timings in milliseconds
    ///
    /// The usual way to write note tables by hand; `freq_hz <= 0` gives a
    /// rest.
    pub fn from_freq_ms(freq_hz: f64, delay_ms: u32, dur_ms: u32) -> Self {
        let period_us = if freq_hz > 0.0 {
            ((1_000_000.0 / freq_hz) + 0.5).max(1.0) as u32
        } else {
            0
        };
        NoteCmd {
            delay_us: delay_ms * 1_000,
            period_us,
            duration_us: dur_ms * 1_000,
        }
    }
}

/// One square-wave generator
#[derive(Debug, Clone, Copy, Default)]
struct Voice {
    phase: u32,
    phase_inc: u32,
    active: bool,
    amp: i8,
}

/// Playback cursor over one note table
#[derive(Debug, Clone, Copy)]
struct Track<'seq> {
    seq: &'seq [NoteCmd],
    idx: usize,
    /// Remaining silence before the current command starts, µs
    delay_left_us: i32,
    /// Remaining hold time of the sounding command, µs
    dur_left_us: i32,
    /// Period divisor, >= 1 (2 = one octave up)
    pitch_shift: u32,
    /// True while the track still has commands to play
    armed: bool,
}

impl Default for Track<'_> {
    fn default() -> Self {
        Track {
            seq: &[],
            idx: 0,
            delay_left_us: 0,
            dur_left_us: 0,
            pitch_shift: 1,
            armed: false,
        }
    }
}

/// Convert a square-wave period to a 32-bit phase increment per sample
///
/// Integer-exact: `(1e6 << 32) / (period_us * sample_rate)`, truncated the
/// way the accumulator hardware would.
#[inline]
fn period_us_to_phase_inc(period_us: u32) -> u32 {
    if period_us == 0 {
        return 0;
    }
    ((1_000_000u64 << 32) / (period_us as u64 * SAMPLE_RATE_HZ as u64)) as u32
}

/// Map the mixed voice sum onto the PWM duty range
///
/// Soft clip keeps a few simultaneous voices from hard-wrapping; the bias
/// centers the signal on the PWM midpoint.
#[inline]
fn mix_to_duty(sum: i32) -> u8 {
    let clipped = sum.clamp(-SOFTCLIP_LIMIT, SOFTCLIP_LIMIT);
    (clipped + DUTY_BIAS).clamp(0, PWM_STEPS as i32) as u8
}

/// Eight-track note scheduler and mixer
///
/// Track *i* always drives voice *i*. Bind note tables with
/// [`PolyphonicMixer::bind`], then call [`PolyphonicMixer::tick`] once per
/// sample period.
#[derive(Debug, Clone, Default)]
pub struct PolyphonicMixer<'seq> {
    voices: [Voice; MAX_VOICES],
    tracks: [Track<'seq>; MAX_VOICES],
}

impl<'seq> PolyphonicMixer<'seq> {
    /// Create a mixer with all tracks disarmed
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a note table to a track
    ///
    /// Out-of-range track numbers are ignored. An empty table leaves the
    /// track disarmed. `pitch_shift` divides every note period (2 plays the
    /// table an octave up); 0 is treated as 1.
    pub fn bind(&mut self, track: usize, seq: &'seq [NoteCmd], pitch_shift: u32) {
        let Some(slot) = self.tracks.get_mut(track) else {
            return;
        };
        slot.seq = seq;
        slot.idx = 0;
        slot.delay_left_us = seq.first().map_or(0, |cmd| cmd.delay_us as i32);
        slot.dur_left_us = 0;
        slot.pitch_shift = pitch_shift.max(1);
        slot.armed = !seq.is_empty();
        self.voices[track] = Voice::default();
    }

    /// Silence every voice immediately
    ///
    /// Running durations are cut short but the tracks stay armed, so
    /// ticking on resumes the schedule. A command cut off mid-flight has
    /// not been consumed (the cursor advances when a command *ends*), so
    /// it replays from its beginning on resume.
    pub fn all_off(&mut self) {
        for voice in &mut self.voices {
            voice.active = false;
            voice.amp = 0;
        }
        for track in &mut self.tracks {
            track.dur_left_us = 0;
        }
    }

    /// Disarm all tracks and silence all voices
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True once every track has played its table to the end
    pub fn is_idle(&self) -> bool {
        self.tracks.iter().all(|track| !track.armed)
    }

    /// Start the command under the track cursor
    fn start_command(&mut self, i: usize) {
        let track = &mut self.tracks[i];
        let cmd = track.seq[track.idx];
        track.dur_left_us = cmd.duration_us as i32;

        let period = if track.pitch_shift > 1 {
            cmd.period_us / track.pitch_shift
        } else {
            cmd.period_us
        };
        let inc = period_us_to_phase_inc(period);

        // A rest (or a period too short to represent) leaves the voice
        // silent while its duration countdown runs
        let voice = &mut self.voices[i];
        voice.phase = 0;
        voice.phase_inc = inc;
        voice.active = inc != 0;
        voice.amp = if inc != 0 { VOICE_LEVEL } else { 0 };

        if self.tracks[i].dur_left_us <= 0 {
            // Zero-length command, consume it right away
            self.finish_command(i);
        }
    }

    /// End the sounding command and queue up the next one
    fn finish_command(&mut self, i: usize) {
        self.voices[i].active = false;
        self.voices[i].amp = 0;

        let track = &mut self.tracks[i];
        track.dur_left_us = 0;
        track.idx += 1;
        if track.idx < track.seq.len() {
            track.delay_left_us = track.seq[track.idx].delay_us as i32;
        } else {
            track.armed = false;
        }
    }

    /// Advance one track by one sample period
    fn schedule(&mut self, i: usize) {
        if !self.tracks[i].armed {
            return;
        }

        let dt = SAMPLE_PERIOD_US as i32;
        let track = &mut self.tracks[i];

        if track.dur_left_us > 0 {
            track.dur_left_us -= dt;
            if track.dur_left_us <= 0 {
                self.finish_command(i);
            }
        } else if track.delay_left_us > 0 {
            track.delay_left_us -= dt;
            if track.delay_left_us <= 0 {
                self.start_command(i);
            }
        } else {
            // No pending delay (first command with delay 0, or resumed
            // after all_off)
            self.start_command(i);
        }
    }

    /// Run one sample period: schedule all tracks, mix, return the duty
    pub fn tick(&mut self) -> u8 {
        for i in 0..MAX_VOICES {
            self.schedule(i);
        }

        let mut sum = 0i32;
        for voice in &mut self.voices {
            if !voice.active {
                continue;
            }
            voice.phase = voice.phase.wrapping_add(voice.phase_inc);
            sum += if voice.phase & 0x8000_0000 != 0 {
                voice.amp as i32
            } else {
                -(voice.amp as i32)
            };
        }

        mix_to_duty(sum)
    }
}
