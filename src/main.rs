#[cfg(not(all(feature = "export", feature = "mixer")))]
fn main() {
    eprintln!(
        "The pwmsynth demo requires the \"export\" and \"mixer\" features. Rebuild with `--features export` to render the demo tune."
    );
}

#[cfg(all(feature = "export", feature = "mixer"))]
mod demo {
    use pwmsynth::constants::SAMPLE_RATE_HZ;
    use pwmsynth::export::export_mixer_to_wav;
    use pwmsynth::mixer::{NoteCmd, PolyphonicMixer};

    /// Bass line: low C held for 2 seconds, a rest, then E3
    fn bass_track() -> Vec<NoteCmd> {
        vec![
            NoteCmd::from_freq_ms(130.81, 0, 2000), // C3
            NoteCmd::rest(0, 500_000),
            NoteCmd::from_freq_ms(164.81, 0, 2000), // E3
        ]
    }

    /// Melody: alternating high C and E
    fn melody_track() -> Vec<NoteCmd> {
        vec![
            NoteCmd::from_freq_ms(523.25, 0, 300), // C5
            NoteCmd::from_freq_ms(659.25, 50, 300), // E5
            NoteCmd::from_freq_ms(523.25, 50, 300),
            NoteCmd::from_freq_ms(659.25, 50, 300),
            NoteCmd::from_freq_ms(523.25, 50, 300),
            NoteCmd::from_freq_ms(659.25, 50, 300),
        ]
    }

    pub fn run() -> anyhow::Result<()> {
        let output = std::env::args()
            .nth(1)
            .unwrap_or_else(|| "demo.wav".to_string());

        let bass = bass_track();
        let melody = melody_track();

        let mut mixer = PolyphonicMixer::new();
        mixer.bind(0, &bass, 1);
        mixer.bind(1, &melody, 1);

        // Five seconds is plenty; export stops when the tune ends
        let max_ticks = 5 * SAMPLE_RATE_HZ;
        println!("Rendering demo tune to {output}...");
        export_mixer_to_wav(&mut mixer, max_ticks, &output)?;
        println!("Done.");
        Ok(())
    }
}

#[cfg(all(feature = "export", feature = "mixer"))]
fn main() -> anyhow::Result<()> {
    demo::run()
}
