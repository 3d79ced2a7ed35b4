//! Per-tick audio snapshot handed to the visualizations.

/// Named frequency ranges, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyBand {
    Bass,
    LowMid,
    Mid,
    HighMid,
    Treble,
}

impl FrequencyBand {
    pub const fn range_hz(self) -> (f32, f32) {
        match self {
            Self::Bass => (20.0, 140.0),
            Self::LowMid => (140.0, 400.0),
            Self::Mid => (400.0, 2600.0),
            Self::HighMid => (2600.0, 5200.0),
            Self::Treble => (5200.0, 14000.0),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bass => "bass",
            Self::LowMid => "lowMid",
            Self::Mid => "mid",
            Self::HighMid => "highMid",
            Self::Treble => "treble",
        }
    }
}

/// Spectrum magnitudes in `0..=255`, waveform samples in `-1..=1` and the
/// overall level in `0..=1`. Regenerated every tick; never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    pub spectrum: Vec<f32>,
    pub waveform: Vec<f32>,
    pub amplitude_level: f32,
    pub sample_rate: u32,
}

impl SpectralFrame {
    pub fn silent(spectrum_len: usize, waveform_len: usize, sample_rate: u32) -> Self {
        Self {
            spectrum: vec![0.0; spectrum_len],
            waveform: vec![0.0; waveform_len],
            amplitude_level: 0.0,
            sample_rate,
        }
    }

    pub fn nyquist(&self) -> f32 {
        self.sample_rate as f32 / 2.0
    }

    /// Mean magnitude of the bins covering `band`, `0.0` when none do.
    pub fn energy(&self, band: FrequencyBand) -> f32 {
        let (lo, hi) = band.range_hz();
        self.energy_between(lo, hi)
    }

    pub fn energy_between(&self, lo_hz: f32, hi_hz: f32) -> f32 {
        let len = self.spectrum.len();
        let nyquist = self.nyquist();
        if len == 0 || nyquist <= 0.0 {
            return 0.0;
        }
        let to_index = |hz: f32| (hz / nyquist * len as f32).round().max(0.0) as usize;
        let lo = to_index(lo_hz);
        let hi = to_index(hi_hz).min(len - 1);
        if lo > hi {
            return 0.0;
        }
        let bins = &self.spectrum[lo..=hi];
        bins.iter().sum::<f32>() / bins.len() as f32
    }
}
