//! WAV file export
//!
//! Renders engine output to 8 kHz mono 16-bit WAV files so decoded samples,
//! speech and tunes can be inspected off-target.

use crate::constants::{DUTY_BIAS, SAMPLE_RATE_HZ};
use crate::stream::AudioStream;
use crate::Result;
use std::path::Path;

#[cfg(feature = "mixer")]
use crate::mixer::PolyphonicMixer;

/// Render an audio stream to a WAV file
///
/// Pulls the stream to exhaustion at the engine sample rate.
///
/// # Examples
///
/// ```no_run
/// use pwmsynth::adpcm::TwoBitAdpcm;
/// use pwmsynth::export::export_to_wav;
///
/// # fn main() -> pwmsynth::Result<()> {
/// let payload = std::fs::read("sample.adpcm")?;
/// let mut decoder = TwoBitAdpcm::new(&payload);
/// export_to_wav(&mut decoder, "sample.wav")?;
/// # Ok(())
/// # }
/// ```
pub fn export_to_wav<P: AsRef<Path>>(stream: &mut impl AudioStream, path: P) -> Result<()> {
    let mut samples = Vec::new();
    while stream.has_next() {
        samples.push(stream.next_sample());
    }
    write_wav_file(path.as_ref(), &samples)
}

/// Render a bounded number of mixer ticks to a WAV file
///
/// Stops early once the mixer goes idle. The 8-bit duty output is widened
/// back to 16-bit PCM for the file.
#[cfg(feature = "mixer")]
pub fn export_mixer_to_wav<P: AsRef<Path>>(
    mixer: &mut PolyphonicMixer,
    max_ticks: u32,
    path: P,
) -> Result<()> {
    let mut samples = Vec::new();
    for _ in 0..max_ticks {
        if mixer.is_idle() {
            break;
        }
        samples.push(duty_to_pcm(mixer.tick()));
    }
    write_wav_file(path.as_ref(), &samples)
}

/// Widen a PWM duty value back onto the 16-bit sample range
#[cfg(feature = "mixer")]
#[inline]
fn duty_to_pcm(duty: u8) -> i16 {
    ((duty as i32 - DUTY_BIAS) << 8) as i16
}

fn write_wav_file(path: &Path, samples: &[i16]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE_HZ,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| format!("Failed to create WAV file: {}", e))?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| format!("Failed to write sample: {}", e))?;
    }

    writer
        .finalize()
        .map_err(|e| format!("Failed to finalize WAV file: {}", e))?;

    Ok(())
}
