//! Procedural demo loop: kick, bass, chord pad and metallic hats.

use std::f32::consts::TAU;

pub const BPM: f32 = 120.0;
pub const BEATS_PER_LOOP: u32 = 8;

/// One chord per two beats: Am, F, C, G.
const CHORDS: [[f32; 3]; 4] = [
    [220.00, 261.63, 329.63],
    [174.61, 220.00, 261.63],
    [261.63, 329.63, 392.00],
    [196.00, 246.94, 293.66],
];

/// Inharmonic partials give the hats their metallic colour without noise.
const HAT_PARTIALS: [f32; 3] = [5400.0, 7127.0, 8893.0];

const KICK_GAIN: f32 = 0.8;
const BASS_GAIN: f32 = 0.25;
const PAD_GAIN: f32 = 0.08;
const HAT_GAIN: f32 = 0.15;

#[derive(Debug, Clone)]
pub struct DemoTrack {
    sample_rate: f32,
    loop_len: u64,
    position: u64,
}

impl DemoTrack {
    pub fn new(sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1) as f32;
        let seconds = 60.0 / BPM * BEATS_PER_LOOP as f32;
        Self {
            sample_rate,
            loop_len: ((seconds * sample_rate).round() as u64).max(1),
            position: 0,
        }
    }

    /// Samples in one pass of the loop.
    pub fn loop_len(&self) -> u64 {
        self.loop_len
    }

    pub fn next_sample(&mut self) -> f32 {
        let s = self.sample_at(self.position);
        self.position = (self.position + 1) % self.loop_len;
        s
    }

    pub fn sample_at(&self, position: u64) -> f32 {
        let t = (position % self.loop_len) as f32 / self.sample_rate;
        let beat_len = 60.0 / BPM;
        let beat = (t / beat_len) as usize;
        let in_beat = t - beat as f32 * beat_len;
        let chord = &CHORDS[(beat / 2) % CHORDS.len()];

        (kick(in_beat) + bass(t, in_beat, chord[0]) + pad(t, chord) + hat(t, beat_len))
            .clamp(-1.0, 1.0)
    }
}

/// Pitch-swept sine, 150 Hz falling to 50 Hz.
fn kick(t: f32) -> f32 {
    let phase = TAU * (50.0 * t + 100.0 * (1.0 - (-30.0 * t).exp()) / 30.0);
    phase.sin() * (-12.0 * t).exp() * KICK_GAIN
}

/// Chord root an octave down, retriggered on every eighth.
fn bass(t: f32, in_beat: f32, root: f32) -> f32 {
    let in_eighth = in_beat % (30.0 / BPM);
    (TAU * root / 2.0 * t).sin() * (-6.0 * in_eighth).exp() * BASS_GAIN
}

fn pad(t: f32, chord: &[f32; 3]) -> f32 {
    chord.iter().map(|f| (TAU * f * t).sin()).sum::<f32>() * PAD_GAIN
}

/// Off-beat hats.
fn hat(t: f32, beat_len: f32) -> f32 {
    let half = beat_len / 2.0;
    let slot = (t / half) as u32;
    if slot % 2 == 0 {
        return 0.0;
    }
    let in_half = t - slot as f32 * half;
    let tone = HAT_PARTIALS.iter().map(|f| (TAU * f * t).sin()).sum::<f32>()
        / HAT_PARTIALS.len() as f32;
    tone * (-60.0 * in_half).exp() * HAT_GAIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_is_four_seconds() {
        assert_eq!(DemoTrack::new(48_000).loop_len(), 192_000);
        assert_eq!(DemoTrack::new(44_100).loop_len(), 176_400);
    }

    #[test]
    fn loop_repeats_exactly() {
        let track = DemoTrack::new(8_000);
        let len = track.loop_len();
        for p in (0..len).step_by(997) {
            assert_eq!(track.sample_at(p), track.sample_at(p + len));
        }
    }

    #[test]
    fn next_sample_wraps_around() {
        let mut track = DemoTrack::new(1_000);
        let first: Vec<f32> = (0..16).map(|_| track.next_sample()).collect();
        for _ in 16..track.loop_len() {
            track.next_sample();
        }
        let again: Vec<f32> = (0..16).map(|_| track.next_sample()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn output_is_bounded_and_not_silent() {
        let track = DemoTrack::new(8_000);
        let samples: Vec<f32> = (0..track.loop_len()).map(|p| track.sample_at(p)).collect();
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(samples.iter().any(|s| s.abs() > 0.3));
    }
}
