//! Pull-based sample source contract
//!
//! Every sample producer in the engine (ADPCM decoders, the LPC speech
//! synthesizer) implements [`AudioStream`]: a pull interface delivering one
//! 16-bit signed PCM value per call at the fixed engine sample rate.

/// Common interface for pull-based sample decoders
///
/// Implementations own all of their decode state and are advanced by exactly
/// one caller at a time; there is no shared mutable state and no allocation
/// in the sample path.
///
/// # End of stream
///
/// Pulling past the end of the encoded input is not an error: `next_sample`
/// returns 0 and leaves the decoder state untouched. Callers that care check
/// `has_next` first.
pub trait AudioStream {
    /// Return the decoder to its defined start-of-stream state
    ///
    /// Cursor back to the first code, predictor/step defaults per codec.
    fn reset(&mut self);

    /// True while unread encoded input remains
    fn has_next(&self) -> bool;

    /// Decode and return the next PCM sample, advancing internal state
    fn next_sample(&mut self) -> i16;

    /// Decode samples into a caller-provided buffer
    ///
    /// Fills the whole buffer; positions past end-of-stream hold silence.
    fn render_into(&mut self, buffer: &mut [i16]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}
