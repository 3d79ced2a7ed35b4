use std::f32::consts::TAU;

use audiovis::audio::{DemoTrack, SampleTap, SpectralAnalyzer};
use audiovis::frame::FrequencyBand;

const RATE: u32 = 48_000;
const FFT: usize = 4096;

fn tone(freq: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| 0.5 * (TAU * freq * i as f32 / RATE as f32).sin())
        .collect()
}

#[test]
fn low_tone_lands_in_the_bass_band() {
    let mut analyzer = SpectralAnalyzer::new(FFT, RATE, 0.0).expect("valid analyzer");
    let frame = analyzer.analyze(&tone(80.0, FFT));

    let bass = frame.energy(FrequencyBand::Bass);
    assert!(bass > 100.0, "bass energy {bass}");
    assert!(bass > frame.energy(FrequencyBand::Mid));
    assert!(bass > frame.energy(FrequencyBand::Treble));
}

#[test]
fn high_tone_lands_in_the_treble_band() {
    let mut analyzer = SpectralAnalyzer::new(FFT, RATE, 0.0).expect("valid analyzer");
    let frame = analyzer.analyze(&tone(8_000.0, FFT));
    assert!(frame.energy(FrequencyBand::Treble) > frame.energy(FrequencyBand::Bass));
}

#[test]
fn smoothing_carries_energy_into_silence() {
    let mut analyzer = SpectralAnalyzer::new(FFT, RATE, 0.8).expect("valid analyzer");
    let loud = tone(440.0, FFT);
    for _ in 0..8 {
        analyzer.analyze(&loud);
    }
    let decaying = analyzer.analyze(&vec![0.0; FFT]);
    assert!(decaying.energy(FrequencyBand::Mid) > 0.0);
    assert_eq!(decaying.amplitude_level, 0.0);

    analyzer.reset();
    let cleared = analyzer.analyze(&vec![0.0; FFT]);
    assert!(cleared.spectrum.iter().all(|&v| v == 0.0));
}

#[test]
fn demo_track_through_the_tap_is_audible() {
    let tap = SampleTap::new(FFT * 2);
    let mut track = DemoTrack::new(RATE);
    // Half a second in: past the first kick and into the pad.
    tap.extend((0..RATE / 2).map(|_| track.next_sample()));
    assert_eq!(tap.len(), FFT * 2);

    let mut analyzer = SpectralAnalyzer::new(FFT, RATE, 0.0).expect("valid analyzer");
    let frame = analyzer.analyze(&tap.latest(FFT));
    assert_eq!(frame.spectrum.len(), FFT / 2);
    assert!(frame.amplitude_level > 0.0);
    assert!(frame.spectrum.iter().any(|&v| v > 0.0));
}
