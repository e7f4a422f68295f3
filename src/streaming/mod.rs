//! Real-time host preview
//!
//! Plays engine output on the host's sound card so tunes and samples can be
//! auditioned without flashing a target. A producer thread pushes samples
//! into a [`RingBuffer`]; rodio pulls them out on its playback thread via
//! [`AudioDevice`].
//!
//! The engine's 8-bit duty values are mapped to f32 in [-1, 1] with
//! [`duty_to_f32`] before they enter the buffer.

mod audio_device;

pub use audio_device::AudioDevice;

use crate::constants::{DUTY_BIAS, SAMPLE_RATE_HZ};
use crate::{PwmSynthError, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Host playback parameters
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    /// Playback rate in Hz
    pub sample_rate: u32,
    /// Channel count (the engine is mono)
    pub channels: u16,
    /// Ring buffer capacity in samples, rounded up to a power of two
    pub buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            sample_rate: SAMPLE_RATE_HZ,
            channels: 1,
            buffer_size: 4096,
        }
    }
}

/// Map a PWM duty value onto the [-1, 1] float range rodio expects
#[inline]
pub fn duty_to_f32(duty: u8) -> f32 {
    (duty as f32 - DUTY_BIAS as f32) / DUTY_BIAS as f32
}

/// Single-producer single-consumer sample buffer
///
/// Fixed capacity, power of two for cheap index masking. The storage sits
/// behind a `parking_lot::Mutex`; read and write positions are atomics so
/// `available_read` stays lock-free for backpressure checks.
#[derive(Debug)]
pub struct RingBuffer {
    buffer: Mutex<Vec<f32>>,
    write_pos: AtomicUsize,
    read_pos: AtomicUsize,
    capacity: usize,
    mask: usize,
}

impl RingBuffer {
    /// Largest allowed capacity (64 MB of f32 samples)
    const MAX_CAPACITY: usize = 64 * 1024 * 1024 / std::mem::size_of::<f32>();

    /// Create a buffer holding at least `requested` samples
    ///
    /// # Errors
    /// Rejects a zero capacity and anything above [`Self::MAX_CAPACITY`].
    pub fn new(requested: usize) -> Result<Self> {
        if requested == 0 {
            return Err(PwmSynthError::ConfigError(
                "ring buffer capacity must be greater than 0".into(),
            ));
        }

        let capacity = requested.next_power_of_two();
        if capacity > Self::MAX_CAPACITY {
            return Err(PwmSynthError::ConfigError(format!(
                "ring buffer capacity {capacity} exceeds maximum {}",
                Self::MAX_CAPACITY
            )));
        }

        Ok(RingBuffer {
            buffer: Mutex::new(vec![0.0; capacity]),
            write_pos: AtomicUsize::new(0),
            read_pos: AtomicUsize::new(0),
            capacity,
            mask: capacity - 1,
        })
    }

    /// Total capacity in samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples currently queued for the consumer
    pub fn available_read(&self) -> usize {
        let write = self.write_pos.load(Ordering::Acquire);
        let read = self.read_pos.load(Ordering::Acquire);
        if write >= read {
            write - read
        } else {
            self.capacity - (read - write)
        }
    }

    /// Push samples (producer side)
    ///
    /// Never blocks on a full buffer; returns how many samples were
    /// accepted so the producer can back off and retry.
    pub fn write(&self, samples: &[f32]) -> usize {
        let mut buf = self.buffer.lock();

        // Space is computed under the lock so the consumer can't race the
        // check; one slot stays unused to distinguish full from empty
        let write_pos = self.write_pos.load(Ordering::Acquire);
        let read_pos = self.read_pos.load(Ordering::Acquire);
        let free = if write_pos >= read_pos {
            self.capacity - (write_pos - read_pos) - 1
        } else {
            (read_pos - write_pos) - 1
        };

        let to_write = samples.len().min(free);
        if to_write == 0 {
            return 0;
        }

        let write_idx = write_pos & self.mask;
        if write_idx + to_write <= self.capacity {
            buf[write_idx..write_idx + to_write].copy_from_slice(&samples[..to_write]);
        } else {
            let first = self.capacity - write_idx;
            buf[write_idx..].copy_from_slice(&samples[..first]);
            buf[..to_write - first].copy_from_slice(&samples[first..to_write]);
        }

        drop(buf);
        self.write_pos
            .store(write_pos + to_write, Ordering::Release);
        to_write
    }

    /// Pop samples into `dest` (consumer side)
    ///
    /// Returns how many samples were copied; 0 means an underrun.
    pub fn read(&self, dest: &mut [f32]) -> usize {
        let buf = self.buffer.lock();

        let write_pos = self.write_pos.load(Ordering::Acquire);
        let read_pos = self.read_pos.load(Ordering::Acquire);
        let available = if write_pos >= read_pos {
            write_pos - read_pos
        } else {
            self.capacity - (read_pos - write_pos)
        };

        let to_read = dest.len().min(available);
        if to_read == 0 {
            return 0;
        }

        let read_idx = read_pos & self.mask;
        if read_idx + to_read <= self.capacity {
            dest[..to_read].copy_from_slice(&buf[read_idx..read_idx + to_read]);
        } else {
            let first = self.capacity - read_idx;
            dest[..first].copy_from_slice(&buf[read_idx..]);
            dest[first..to_read].copy_from_slice(&buf[..to_read - first]);
        }

        drop(buf);
        self.read_pos.store(read_pos + to_read, Ordering::Release);
        to_read
    }
}
