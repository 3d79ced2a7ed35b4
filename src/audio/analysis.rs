use spectrum_analyzer::scaling::divide_by_N;
use spectrum_analyzer::windows::hann_window;
use spectrum_analyzer::{FrequencyLimit, samples_fft_to_spectrum};

use super::AudioError;
use crate::frame::SpectralFrame;

pub const DEFAULT_FFT_SIZE: usize = 4096;
pub const DEFAULT_SMOOTHING: f32 = 0.8;

const MIN_FFT_SIZE: usize = 64;
const MAX_FFT_SIZE: usize = 16384;
const MIN_DB: f32 = -100.0;
const MAX_DB: f32 = -30.0;

/// Byte magnitude of a linear spectrum value, `[MIN_DB, MAX_DB]` onto `[0, 255]`.
fn to_byte(magnitude: f32) -> f32 {
    if magnitude.is_nan() || magnitude <= 0.0 {
        return 0.0;
    }
    let db = 20.0 * magnitude.log10();
    ((db - MIN_DB) / (MAX_DB - MIN_DB) * 255.0).clamp(0.0, 255.0)
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

/// Windowed FFT over the newest samples, smoothed over time.
#[derive(Debug, Clone)]
pub struct SpectralAnalyzer {
    fft_size: usize,
    sample_rate: u32,
    smoothing: f32,
    smoothed: Vec<f32>,
}

impl SpectralAnalyzer {
    pub fn new(fft_size: usize, sample_rate: u32, smoothing: f32) -> Result<Self, AudioError> {
        if !fft_size.is_power_of_two() || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&fft_size) {
            return Err(AudioError::FftSize(fft_size));
        }
        if sample_rate == 0 {
            return Err(AudioError::SampleRate);
        }
        Ok(Self {
            fft_size,
            sample_rate,
            smoothing: if smoothing.is_finite() { smoothing.clamp(0.0, 0.99) } else { DEFAULT_SMOOTHING },
            smoothed: vec![0.0; fft_size / 2],
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn spectrum_len(&self) -> usize {
        self.fft_size / 2
    }

    pub fn silent_frame(&self) -> SpectralFrame {
        SpectralFrame::silent(self.spectrum_len(), self.spectrum_len(), self.sample_rate)
    }

    /// Forgets the smoothing history.
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
    }

    /// Analyses the newest `fft_size` samples; shorter input is padded with
    /// leading silence.
    pub fn analyze(&mut self, samples: &[f32]) -> SpectralFrame {
        let n = self.fft_size;
        let half = self.spectrum_len();

        let mut window = vec![0.0; n];
        let take = samples.len().min(n);
        for (slot, &s) in window[n - take..].iter_mut().zip(&samples[samples.len() - take..]) {
            *slot = if s.is_finite() { s } else { 0.0 };
        }

        let windowed = hann_window(&window);
        match samples_fft_to_spectrum(
            &windowed,
            self.sample_rate,
            FrequencyLimit::All,
            Some(&divide_by_N),
        ) {
            Ok(spectrum) => {
                let tau = self.smoothing;
                for (slot, (_, mag)) in self.smoothed.iter_mut().zip(spectrum.data()) {
                    *slot = tau * *slot + (1.0 - tau) * mag.val();
                }
            }
            Err(err) => {
                log::warn!("spectrum analysis failed: {err:?}");
                return self.silent_frame();
            }
        }

        SpectralFrame {
            spectrum: self.smoothed.iter().map(|&m| to_byte(m)).collect(),
            waveform: window[n - half..].iter().map(|s| s.clamp(-1.0, 1.0)).collect(),
            amplitude_level: rms(&window).clamp(0.0, 1.0),
            sample_rate: self.sample_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const RATE: u32 = 44_100;

    fn sine(freq: f32, amp: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| amp * (2.0 * PI * freq * i as f32 / RATE as f32).sin())
            .collect()
    }

    #[test]
    fn rejects_bad_fft_sizes() {
        assert!(matches!(SpectralAnalyzer::new(1000, RATE, 0.8), Err(AudioError::FftSize(1000))));
        assert!(matches!(SpectralAnalyzer::new(32, RATE, 0.8), Err(AudioError::FftSize(32))));
        assert!(matches!(SpectralAnalyzer::new(1024, 0, 0.8), Err(AudioError::SampleRate)));
        assert!(SpectralAnalyzer::new(1024, RATE, 0.8).is_ok());
    }

    #[test]
    fn silence_is_all_zero() {
        let mut analyzer = SpectralAnalyzer::new(1024, RATE, 0.8).unwrap();
        let frame = analyzer.analyze(&[0.0; 1024]);
        assert_eq!(frame.spectrum.len(), 512);
        assert_eq!(frame.waveform.len(), 512);
        assert!(frame.spectrum.iter().all(|&v| v == 0.0));
        assert_eq!(frame.amplitude_level, 0.0);
    }

    #[test]
    fn empty_input_pads_to_a_silent_frame() {
        let mut analyzer = SpectralAnalyzer::new(256, RATE, 0.8).unwrap();
        let frame = analyzer.analyze(&[]);
        assert_eq!(frame.spectrum.len(), 128);
        assert!(frame.waveform.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn sine_peaks_in_its_bin() {
        let fft = 4096;
        let bin = 93;
        let freq = bin as f32 * RATE as f32 / fft as f32;
        let input = sine(freq, 0.5, fft);

        let mut analyzer = SpectralAnalyzer::new(fft, RATE, 0.8).unwrap();
        let mut frame = analyzer.analyze(&input);
        for _ in 0..10 {
            frame = analyzer.analyze(&input);
        }

        let peak = frame.spectrum[bin];
        assert_eq!(peak, 255.0);
        assert!(frame.spectrum.iter().all(|&v| v <= peak));
        assert!(frame.spectrum[1000] < 50.0);
        assert!((frame.amplitude_level - 0.5 / 2f32.sqrt()).abs() < 0.01);
    }

    #[test]
    fn output_stays_in_range() {
        let mut analyzer = SpectralAnalyzer::new(512, RATE, 0.5).unwrap();
        let loud: Vec<f32> = (0..512).map(|i| if i % 2 == 0 { 4.0 } else { -4.0 }).collect();
        let frame = analyzer.analyze(&loud);
        assert!(frame.spectrum.iter().all(|&v| (0.0..=255.0).contains(&v)));
        assert!(frame.waveform.iter().all(|&v| (-1.0..=1.0).contains(&v)));
        assert!(frame.amplitude_level <= 1.0);
    }

    #[test]
    fn non_finite_samples_are_silenced() {
        let mut analyzer = SpectralAnalyzer::new(64, RATE, 0.0).unwrap();
        let mut input = vec![0.0; 64];
        input[10] = f32::NAN;
        input[20] = f32::INFINITY;
        let frame = analyzer.analyze(&input);
        assert!(frame.spectrum.iter().all(|&v| v == 0.0));
    }
}
