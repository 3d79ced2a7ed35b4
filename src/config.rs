use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::audio::analysis::{DEFAULT_FFT_SIZE, DEFAULT_SMOOTHING};
use crate::visualizers::waveform::DEFAULT_SMOOTHNESS;

#[derive(Parser, Debug, Clone)]
#[command(name = "audiovis", version, about = "Audio-reactive terminal visualizations")]
pub struct Config {
    #[arg(long, value_enum, default_value_t = AudioSource::Demo)]
    pub source: AudioSource,

    /// Substring of the device name to open instead of the default.
    #[arg(long)]
    pub device: Option<String>,

    #[arg(long, default_value_t = false)]
    pub list_devices: bool,

    #[arg(long, default_value_t = DEFAULT_FFT_SIZE)]
    pub fft_size: usize,

    #[arg(long, default_value_t = DEFAULT_SMOOTHING)]
    pub smoothing: f32,

    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Visualization shown first.
    #[arg(long)]
    pub visual: Option<String>,

    #[arg(long, default_value_t = DEFAULT_SMOOTHNESS)]
    pub wave_smoothness: usize,

    #[arg(long, default_value_t = false)]
    pub paused: bool,

    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioSource {
    /// Built-in synthesized loop.
    Demo,
    /// Whatever the output device is playing.
    #[value(alias = "system")]
    Loopback,
    #[value(alias = "mic")]
    Input,
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["audiovis"]).unwrap();
        assert_eq!(cfg.source, AudioSource::Demo);
        assert_eq!(cfg.fft_size, 4096);
        assert_eq!(cfg.smoothing, 0.8);
        assert_eq!(cfg.fps, 60);
        assert_eq!(cfg.wave_smoothness, 8);
        assert!(!cfg.paused);
        assert!(cfg.visual.is_none());
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn parses_flags_and_aliases() {
        let cfg = Config::try_parse_from([
            "audiovis",
            "--source",
            "mic",
            "--device",
            "USB",
            "--visual",
            "ridgeplot",
            "--fps",
            "30",
            "--paused",
        ])
        .unwrap();
        assert_eq!(cfg.source, AudioSource::Input);
        assert_eq!(cfg.device.as_deref(), Some("USB"));
        assert_eq!(cfg.visual.as_deref(), Some("ridgeplot"));
        assert!(cfg.paused);
        assert_eq!(cfg.frame_interval(), Duration::from_secs_f64(1.0 / 30.0));
    }

    #[test]
    fn rejects_zero_fps() {
        assert!(Config::try_parse_from(["audiovis", "--fps", "0"]).is_err());
    }
}
