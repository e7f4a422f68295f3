//! Host audio playback via rodio
//!
//! Wraps a rodio sink around a [`RingBuffer`] so engine output can be
//! auditioned live. Underruns play silence rather than ending the stream;
//! call [`AudioDevice::finish`] once the producer is done so playback can
//! terminate cleanly.

use super::{RingBuffer, StreamConfig};
use crate::Result;
use rodio::{OutputStream, Sink, Source};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Batch size for pulls from the ring buffer, keeps lock traffic low
const READ_CHUNK: usize = 1024;

/// rodio source pulling from the shared ring buffer
struct RingBufferSource {
    ring_buffer: Arc<RingBuffer>,
    sample_rate: u32,
    channels: u16,
    finished: Arc<AtomicBool>,
    chunk: Vec<f32>,
    chunk_pos: usize,
}

impl RingBufferSource {
    fn new(
        ring_buffer: Arc<RingBuffer>,
        config: &StreamConfig,
        finished: Arc<AtomicBool>,
    ) -> Self {
        RingBufferSource {
            ring_buffer,
            sample_rate: config.sample_rate,
            channels: config.channels,
            finished,
            chunk: vec![0.0; READ_CHUNK],
            // Force a refill on the first pull
            chunk_pos: READ_CHUNK,
        }
    }
}

impl Iterator for RingBufferSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.chunk_pos >= self.chunk.len() {
            let read = self.ring_buffer.read(&mut self.chunk);
            if read == 0 {
                if self.finished.load(Ordering::Relaxed) {
                    return None;
                }
                // Underrun: keep the stream alive with silence until the
                // producer catches up
                self.chunk.fill(0.0);
            }
            self.chunk_pos = 0;
        }

        let sample = self.chunk[self.chunk_pos];
        self.chunk_pos += 1;
        Some(sample)
    }
}

impl Source for RingBufferSource {
    fn current_frame_len(&self) -> Option<usize> {
        let available = self.ring_buffer.available_read();
        if available > 0 {
            Some(available)
        } else {
            Some(READ_CHUNK)
        }
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Host playback device
///
/// Holds the rodio output stream and sink alive for the lifetime of the
/// preview.
pub struct AudioDevice {
    _stream: OutputStream,
    sink: Sink,
    finished: Arc<AtomicBool>,
}

impl AudioDevice {
    /// Open the default output device and start pulling from `ring_buffer`
    ///
    /// # Errors
    /// Fails when no output device is available or the sink cannot be
    /// created.
    pub fn new(config: &StreamConfig, ring_buffer: Arc<RingBuffer>) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| format!("failed to open audio output: {e}"))?;
        let sink = Sink::try_new(&handle).map_err(|e| format!("failed to create sink: {e}"))?;

        let finished = Arc::new(AtomicBool::new(false));
        let source = RingBufferSource::new(ring_buffer, config, Arc::clone(&finished));
        sink.append(source);

        Ok(AudioDevice {
            _stream: stream,
            sink,
            finished,
        })
    }

    /// Pause playback
    pub fn pause(&self) {
        self.sink.pause();
    }

    /// Resume playback
    pub fn play(&self) {
        self.sink.play();
    }

    /// Signal that no more samples are coming
    ///
    /// The source then ends at the next underrun instead of holding the
    /// stream open with silence.
    pub fn finish(&self) {
        self.finished.store(true, Ordering::Relaxed);
    }

    /// Block until the sink has drained
    pub fn wait_until_done(&self) {
        self.sink.sleep_until_end();
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        self.finish();
        self.sink.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_device(config: &StreamConfig) -> Option<(AudioDevice, Arc<RingBuffer>)> {
        let ring_buffer = Arc::new(RingBuffer::new(config.buffer_size).unwrap());
        match AudioDevice::new(config, Arc::clone(&ring_buffer)) {
            Ok(device) => Some((device, ring_buffer)),
            Err(err) => {
                eprintln!("skipping audio device test (no audio backend): {err}");
                None
            }
        }
    }

    #[test]
    fn test_device_creation_and_finish() {
        let config = StreamConfig::default();
        let Some((device, ring_buffer)) = try_device(&config) else {
            return;
        };

        // Queue a short burst of midpoint silence and let it drain
        let samples = vec![0.0f32; 256];
        assert_eq!(ring_buffer.write(&samples), 256);
        device.finish();
        device.wait_until_done();
    }
}
