//! Audio transport: a cpal stream feeding a shared sample tap.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use crate::config::AudioSource;

pub mod analysis;
pub mod demo;

pub use analysis::SpectralAnalyzer;
pub use demo::DemoTrack;

/// Output gain applied to the demo track on the way to the speakers.
const DEMO_GAIN: f32 = 0.5;
/// Hard output limit for the synthesized track.
const DEMO_LIMIT: f32 = 0.5;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no default {0} device")]
    NoDevice(&'static str),
    #[error("no {kind} device matching {name:?}")]
    DeviceNotFound { kind: &'static str, name: String },
    #[error("failed to enumerate devices: {0}")]
    Devices(#[from] cpal::DevicesError),
    #[error("failed to query stream config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("failed to pause stream: {0}")]
    Pause(#[from] cpal::PauseStreamError),
    #[error("fft size {0} must be a power of two between 64 and 16384")]
    FftSize(usize),
    #[error("sample rate must be non-zero")]
    SampleRate,
}

/// Bounded mono sample buffer shared between the device callback and the UI.
#[derive(Debug, Clone)]
pub struct SampleTap {
    samples: Arc<Mutex<Vec<f32>>>,
    capacity: usize,
}

impl SampleTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Arc::new(Mutex::new(Vec::with_capacity(capacity * 2))),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<f32>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn extend(&self, samples: impl IntoIterator<Item = f32>) {
        let mut s = self.lock();
        s.extend(samples);
        if s.len() > self.capacity {
            let keep = s.len() - self.capacity;
            s.drain(0..keep);
        }
    }

    /// Interleaved frames down-mixed to mono.
    pub fn extend_interleaved(&self, data: &[f32], channels: usize) {
        let channels = channels.max(1);
        self.extend(
            data.chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32),
        );
    }

    /// Up to `n` most recent samples, oldest first.
    pub fn latest(&self, n: usize) -> Vec<f32> {
        let s = self.lock();
        s[s.len().saturating_sub(n)..].to_vec()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn device_label(device: &cpal::Device) -> String {
    device
        .description()
        .map(|d| d.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string())
}

fn find_device(
    devices: impl Iterator<Item = cpal::Device>,
    kind: &'static str,
    name: &str,
) -> Result<cpal::Device, AudioError> {
    let needle = name.to_lowercase();
    devices
        .into_iter()
        .find(|d| device_label(d).to_lowercase().contains(&needle))
        .ok_or_else(|| AudioError::DeviceNotFound {
            kind,
            name: name.to_string(),
        })
}

fn output_device(host: &cpal::Host, name: Option<&str>) -> Result<cpal::Device, AudioError> {
    match name {
        Some(name) => find_device(host.output_devices()?, "output", name),
        None => host.default_output_device().ok_or(AudioError::NoDevice("output")),
    }
}

fn input_device(host: &cpal::Host, name: Option<&str>) -> Result<cpal::Device, AudioError> {
    match name {
        Some(name) => find_device(host.input_devices()?, "input", name),
        None => host.default_input_device().ok_or(AudioError::NoDevice("input")),
    }
}

pub fn list_devices() -> anyhow::Result<()> {
    let host = cpal::default_host();
    let mut out = io::stdout();
    writeln!(out, "Input devices:")?;
    for dev in host.input_devices()? {
        writeln!(out, "  - {}", device_label(&dev))?;
    }
    writeln!(out, "Output devices:")?;
    for dev in host.output_devices()? {
        writeln!(out, "  - {}", device_label(&dev))?;
    }
    Ok(())
}

/// Play/pause control over the running stream. Pausing empties the tap so the
/// visuals fall silent instead of freezing on the last window.
pub struct AudioTransport {
    stream: cpal::Stream,
    tap: SampleTap,
    sample_rate: u32,
    playing: bool,
}

impl AudioTransport {
    pub fn open(
        source: AudioSource,
        device: Option<&str>,
        tap_capacity: usize,
    ) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let tap = SampleTap::new(tap_capacity);
        let (stream, sample_rate) = match source {
            AudioSource::Demo => Self::demo_stream(&host, device, tap.clone())?,
            // Capturing from an output device gives loopback on hosts that support it.
            AudioSource::Loopback => {
                let dev = output_device(&host, device)?;
                let config: cpal::StreamConfig = dev.default_output_config()?.into();
                Self::capture_stream(&dev, config, tap.clone())?
            }
            AudioSource::Input => {
                let dev = input_device(&host, device)?;
                let config: cpal::StreamConfig = dev.default_input_config()?.into();
                Self::capture_stream(&dev, config, tap.clone())?
            }
        };
        if sample_rate == 0 {
            return Err(AudioError::SampleRate);
        }

        Ok(Self {
            stream,
            tap,
            sample_rate,
            playing: false,
        })
    }

    fn capture_stream(
        device: &cpal::Device,
        config: cpal::StreamConfig,
        tap: SampleTap,
    ) -> Result<(cpal::Stream, u32), AudioError> {
        log::info!(
            "capturing from {} ({} ch @ {} Hz)",
            device_label(device),
            config.channels,
            config.sample_rate
        );
        let channels = config.channels as usize;
        let stream = device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                tap.extend_interleaved(data, channels);
            },
            |err| log::error!("capture stream error: {err}"),
            None,
        )?;
        Ok((stream, config.sample_rate))
    }

    fn demo_stream(
        host: &cpal::Host,
        device: Option<&str>,
        tap: SampleTap,
    ) -> Result<(cpal::Stream, u32), AudioError> {
        let dev = output_device(host, device)?;
        let config: cpal::StreamConfig = dev.default_output_config()?.into();
        log::info!(
            "playing demo track on {} ({} ch @ {} Hz)",
            device_label(&dev),
            config.channels,
            config.sample_rate
        );

        let channels = (config.channels as usize).max(1);
        let mut track = DemoTrack::new(config.sample_rate);
        let mut mono = Vec::new();
        let stream = dev.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                mono.clear();
                for frame in data.chunks_mut(channels) {
                    let s = track.next_sample();
                    frame.fill((s * DEMO_GAIN).clamp(-DEMO_LIMIT, DEMO_LIMIT));
                    mono.push(s);
                }
                tap.extend(mono.iter().copied());
            },
            |err| log::error!("demo stream error: {err}"),
            None,
        )?;
        Ok((stream, config.sample_rate))
    }

    pub fn play(&mut self) -> Result<(), AudioError> {
        self.stream.play()?;
        self.playing = true;
        log::info!("playback started");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), AudioError> {
        self.stream.pause()?;
        self.playing = false;
        self.tap.clear();
        log::info!("playback paused");
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<(), AudioError> {
        if self.playing { self.pause() } else { self.play() }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn tap(&self) -> &SampleTap {
        &self.tap
    }
}
