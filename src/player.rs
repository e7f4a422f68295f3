//! Sample-clock player
//!
//! Paces an [`AudioStream`] or the mixer at exactly 8 kHz against a
//! free-running microsecond counter and writes each sample to a PWM duty
//! register. The two hardware touch points are traits, so the same player
//! runs against real registers on a microcontroller or against fakes in
//! tests.
//!
//! The cadence is drift-free: when a tick is due the mark advances by
//! exactly one sample period rather than jumping to "now", so jitter in the
//! polling loop never accumulates into pitch error.

use crate::constants::{DUTY_BIAS, SAMPLE_PERIOD_US, TIMER_MASK};
use crate::stream::AudioStream;

#[cfg(feature = "mixer")]
use crate::mixer::PolyphonicMixer;

/// PWM output register
pub trait PwmSink {
    /// Latch a new duty value (0 = always low, 255 = always high)
    fn write_duty(&mut self, duty: u8);
}

/// Free-running microsecond timebase
///
/// Only the low 16 bits are meaningful; the counter is expected to wrap
/// like a hardware timer register.
pub trait MicrosClock {
    /// Current counter value in microseconds
    fn now_us(&self) -> u32;
}

/// Drift-free sample cadence against a wrapping 16-bit counter
#[derive(Debug, Clone, Copy)]
pub struct TickTimer {
    mark: u32,
}

impl TickTimer {
    /// Start the cadence at counter value `now_us`
    pub fn new(now_us: u32) -> Self {
        TickTimer {
            mark: now_us & TIMER_MASK,
        }
    }

    /// True once per elapsed sample period
    ///
    /// Wraparound-safe: masked subtraction handles the counter rolling over
    /// between polls. On a due tick the mark moves forward by exactly
    /// [`SAMPLE_PERIOD_US`], so a late poll catches up over the following
    /// calls instead of shifting the whole cadence.
    pub fn tick_due(&mut self, now_us: u32) -> bool {
        let elapsed = now_us.wrapping_sub(self.mark) & TIMER_MASK;
        if elapsed >= SAMPLE_PERIOD_US {
            self.mark = (self.mark + SAMPLE_PERIOD_US) & TIMER_MASK;
            true
        } else {
            false
        }
    }

    /// Restart the cadence at counter value `now_us`
    pub fn rearm(&mut self, now_us: u32) {
        self.mark = now_us & TIMER_MASK;
    }
}

/// Map a 16-bit signed sample onto the 8-bit PWM duty range
#[inline]
pub fn duty_from_sample(sample: i16) -> u8 {
    ((sample >> 8) as i32 + DUTY_BIAS) as u8
}

/// Plays engine output through a PWM register at the sample rate
///
/// Generic over the clock and sink so hosts and targets share the loop.
#[derive(Debug)]
pub struct SamplePlayer<C: MicrosClock, S: PwmSink> {
    clock: C,
    sink: S,
    timer: TickTimer,
}

impl<C: MicrosClock, S: PwmSink> SamplePlayer<C, S> {
    /// Create a player; the cadence starts at the clock's current value
    pub fn new(clock: C, sink: S) -> Self {
        let mark = clock.now_us();
        SamplePlayer {
            clock,
            sink,
            timer: TickTimer::new(mark),
        }
    }

    /// Poll once: emit the next stream sample if a tick is due
    ///
    /// Returns true when a sample was written. Callable from a polling loop
    /// or a timer interrupt alike.
    pub fn tick_stream(&mut self, stream: &mut impl AudioStream) -> bool {
        if !self.timer.tick_due(self.clock.now_us()) {
            return false;
        }
        self.sink.write_duty(duty_from_sample(stream.next_sample()));
        true
    }

    /// Play a stream to exhaustion, polling the clock
    pub fn play(&mut self, stream: &mut impl AudioStream) {
        self.timer.rearm(self.clock.now_us());
        while stream.has_next() {
            self.tick_stream(stream);
        }
    }

    /// Poll once: run one mixer tick if due and latch the resulting duty
    #[cfg(feature = "mixer")]
    pub fn tick_mixer(&mut self, mixer: &mut PolyphonicMixer) -> bool {
        if !self.timer.tick_due(self.clock.now_us()) {
            return false;
        }
        self.sink.write_duty(mixer.tick());
        true
    }

    /// Drive the mixer for a bounded number of sample ticks
    ///
    /// Stops early once the mixer goes idle. Returns the number of ticks
    /// actually played.
    #[cfg(feature = "mixer")]
    pub fn run_mixer_for(&mut self, mixer: &mut PolyphonicMixer, ticks: u32) -> u32 {
        self.timer.rearm(self.clock.now_us());
        let mut played = 0;
        while played < ticks && !mixer.is_idle() {
            if self.tick_mixer(mixer) {
                played += 1;
            }
        }
        played
    }

    /// The PWM sink, for inspection after a run
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counter advancing a fixed step on every poll
    struct SteppingClock {
        now: Cell<u32>,
        step: u32,
    }

    impl SteppingClock {
        fn new(start: u32, step: u32) -> Self {
            SteppingClock {
                now: Cell::new(start),
                step,
            }
        }
    }

    impl MicrosClock for SteppingClock {
        fn now_us(&self) -> u32 {
            let now = self.now.get();
            self.now.set(now.wrapping_add(self.step));
            now
        }
    }

    #[derive(Default)]
    struct VecSink {
        duties: Vec<u8>,
    }

    impl PwmSink for VecSink {
        fn write_duty(&mut self, duty: u8) {
            self.duties.push(duty);
        }
    }

    /// Fixed-length ramp stream for pacing tests
    struct Ramp {
        left: u32,
        value: i16,
    }

    impl AudioStream for Ramp {
        fn reset(&mut self) {}
        fn has_next(&self) -> bool {
            self.left > 0
        }
        fn next_sample(&mut self) -> i16 {
            self.left = self.left.saturating_sub(1);
            self.value = self.value.wrapping_add(256);
            self.value
        }
    }

    #[test]
    fn test_duty_from_sample_mapping() {
        assert_eq!(duty_from_sample(0), 128);
        assert_eq!(duty_from_sample(i16::MAX), 255);
        assert_eq!(duty_from_sample(i16::MIN), 0);
        assert_eq!(duty_from_sample(256), 129);
        assert_eq!(duty_from_sample(-256), 127);
    }

    #[test]
    fn test_tick_timer_cadence_is_drift_free() {
        // Polling every 50 µs: ticks land at a strict 125 µs average even
        // though no single poll hits a 125 µs boundary
        let mut timer = TickTimer::new(0);
        let mut due = 0;
        for poll in 1..=1_000u32 {
            if timer.tick_due(poll * 50) {
                due += 1;
            }
        }
        assert_eq!(due, 1_000 * 50 / SAMPLE_PERIOD_US);
    }

    #[test]
    fn test_tick_timer_wraps_with_the_counter() {
        let mut timer = TickTimer::new(0xFFB0);
        assert!(!timer.tick_due(0xFFF0));
        // Counter wrapped: 0x0030 is 128 µs after 0xFFB0
        assert!(timer.tick_due(0x0030));
        // Mark advanced by one period past the wrap point
        assert!(!timer.tick_due(0x0040));
        assert!(timer.tick_due(0x00B0));
    }

    #[test]
    fn test_late_poll_catches_up_without_shifting_cadence() {
        let mut timer = TickTimer::new(0);
        // One very late poll: three periods elapsed
        assert!(timer.tick_due(380));
        // The backlog drains on subsequent polls at the same counter value
        assert!(timer.tick_due(380));
        assert!(timer.tick_due(380));
        assert!(!timer.tick_due(380));
        // Cadence still anchored to t=0, not to the late poll
        assert!(timer.tick_due(500));
    }

    #[test]
    fn test_play_paces_stream_samples() {
        let clock = SteppingClock::new(0, 25);
        let mut player = SamplePlayer::new(clock, VecSink::default());
        let mut stream = Ramp {
            left: 100,
            value: 0,
        };

        player.play(&mut stream);
        assert_eq!(player.sink().duties.len(), 100);
        // Ramp of +256 per sample moves the duty up one step per tick
        assert_eq!(player.sink().duties[0], 129);
        assert_eq!(player.sink().duties[1], 130);
    }

    #[cfg(feature = "mixer")]
    #[test]
    fn test_run_mixer_stops_when_idle() {
        use crate::mixer::NoteCmd;

        let seq = [NoteCmd::from_period_us(0, 2_000, 5_000)];
        let mut mixer = PolyphonicMixer::new();
        mixer.bind(0, &seq, 1);

        let clock = SteppingClock::new(0, 125);
        let mut player = SamplePlayer::new(clock, VecSink::default());
        let played = player.run_mixer_for(&mut mixer, 10_000);

        // 40 sounding ticks plus the tick that retires the note
        assert_eq!(played, 41);
        assert!(mixer.is_idle());
        assert!(player.sink().duties.iter().any(|&d| d != 128));
    }
}
